// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams: the document the pointer lives in and the hover styling shim.

use kurbo::{Point, Vec2};
use understudy_dispatch::EventTarget;
use understudy_hover::ParentLookup;

use crate::error::ShimError;
use crate::options::AvatarStyle;

/// Computed `overflow` value along one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content is not clipped.
    #[default]
    Visible,
    /// Clipped without scrollbars, still scrollable programmatically.
    Hidden,
    /// Clipped, never scrollable.
    Clip,
    /// Always shows scrollbars.
    Scroll,
    /// Scrollbars when content overflows.
    Auto,
}

impl Overflow {
    /// Whether a user could scroll this axis.
    pub fn is_scrollable(self) -> bool {
        matches!(self, Self::Scroll | Self::Auto)
    }
}

/// Computed overflow of an element on both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComputedOverflow {
    /// `overflow-x`.
    pub x: Overflow,
    /// `overflow-y`.
    pub y: Overflow,
}

impl ComputedOverflow {
    /// Same value on both axes.
    pub const fn both(value: Overflow) -> Self {
        Self { x: value, y: value }
    }

    /// Whether either axis is scrollable.
    pub fn is_scrollable(self) -> bool {
        self.x.is_scrollable() || self.y.is_scrollable()
    }
}

/// Visual state of the pointer avatar for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvatarFrame {
    /// Client coordinates of the avatar's center.
    pub position: Point,
    /// `0` hidden, `1` fully visible.
    pub opacity: f64,
    /// Uniform scale; `1` at rest.
    pub scale: f64,
}

/// The document the virtual pointer moves across.
///
/// Elements are identified by a cheap copyable key `K`. Ancestry comes from
/// [`ParentLookup`] and native event dispatch from [`EventTarget`].
pub trait Document<K>: ParentLookup<K> + EventTarget<K> {
    /// Handle to the avatar node created by [`create_avatar`](Self::create_avatar).
    type Avatar;
    /// Handle to a style sheet inserted by [`insert_style_sheet`](Self::insert_style_sheet).
    type StyleSheet;

    /// Topmost hit-testable element at client `point`.
    fn element_from_point(&self, point: Point) -> Option<K>;
    /// The document body.
    fn body(&self) -> Option<K>;
    /// The element that scrolls the viewport.
    fn scrolling_element(&self) -> Option<K>;
    /// Computed overflow of `element`.
    fn overflow(&self, element: K) -> ComputedOverflow;
    /// Current `(scrollLeft, scrollTop)` of `element`.
    fn scroll_offset(&self, element: K) -> Vec2;
    /// Scroll `element`. Hosts clamp to their own scroll range.
    fn set_scroll_offset(&mut self, element: K, offset: Vec2);

    /// Create and attach the avatar node. It must not take part in hit testing.
    fn create_avatar(&mut self, style: &AvatarStyle) -> Self::Avatar;
    /// Apply `frame` to the avatar.
    fn render_avatar(&mut self, avatar: &Self::Avatar, frame: AvatarFrame);
    /// Detach the avatar node.
    fn remove_avatar(&mut self, avatar: Self::Avatar);

    /// Insert a style sheet with the given CSS text.
    fn insert_style_sheet(&mut self, css: &str) -> Self::StyleSheet;
    /// Remove a previously inserted style sheet.
    fn remove_style_sheet(&mut self, sheet: Self::StyleSheet);

    /// Block or unblock real mouse-wheel input.
    fn set_wheel_blocked(&mut self, blocked: bool);
}

/// Where the hover styling shim is loaded from when the host does not provide it.
pub const PSEUDO_STYLER_URL: &str =
    "https://cdn.jsdelivr.net/gh/TSedlar/pseudo-styler@1.0.8/pseudostyler.js";

/// A shim that can force `:hover` rules onto elements.
///
/// Synthetic events do not trigger the host's own `:hover` matching, so the player asks this
/// shim to apply those rules to the elements it enters and remove them from the elements it
/// leaves.
pub trait HoverStyler<K> {
    /// Whether the shim's code is already present.
    fn is_available(&self) -> bool;
    /// Load the shim's code from `url`.
    fn load_script(&mut self, url: &str) -> Result<(), ShimError>;
    /// Index the document's style sheets. Must succeed before styles can be toggled.
    fn load_document_styles(&mut self) -> Result<(), ShimError>;
    /// Force (`true`) or release (`false`) the rules of `pseudo_class` on `element`.
    fn toggle_style(&mut self, element: &K, pseudo_class: &str, force: bool);
}

impl<K, S: HoverStyler<K> + ?Sized> HoverStyler<K> for Box<S> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn load_script(&mut self, url: &str) -> Result<(), ShimError> {
        (**self).load_script(url)
    }

    fn load_document_styles(&mut self) -> Result<(), ShimError> {
        (**self).load_document_styles()
    }

    fn toggle_style(&mut self, element: &K, pseudo_class: &str, force: bool) {
        (**self).toggle_style(element, pseudo_class, force);
    }
}
