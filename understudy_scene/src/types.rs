// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, flags, local geometry, and event records.

use kurbo::{Point, Rect, Size};
use understudy_dispatch::PointerEventKind;
use understudy_player::ComputedOverflow;

/// Identifier for a node in the scene (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is rendered.
        const VISIBLE  = 0b0000_0001;
        /// Node takes part in hit testing (`pointer-events` other than `none`).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local data for a node.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Debug label, used in assertions and logs.
    pub name: String,
    /// Border box in the parent's content coordinates (before the parent's scroll offset).
    pub bounds: Rect,
    /// Stacking order. Higher is on top.
    pub z_index: i32,
    /// Visibility and picking flags.
    pub flags: NodeFlags,
    /// Computed overflow. Anything but `visible` clips descendants for hit testing.
    pub overflow: ComputedOverflow,
    /// Scrollable content size. Defaults to the bounds' size, which leaves nothing to scroll.
    pub content_size: Option<Size>,
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            bounds: Rect::ZERO,
            z_index: 0,
            flags: NodeFlags::default(),
            overflow: ComputedOverflow::default(),
            content_size: None,
        }
    }
}

impl LocalNode {
    /// A named node with the given bounds.
    pub fn new(name: &str, bounds: Rect) -> Self {
        Self {
            name: name.to_owned(),
            bounds,
            ..Self::default()
        }
    }

    /// Set the computed overflow.
    pub fn overflow(mut self, overflow: ComputedOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the scrollable content size.
    pub fn content_size(mut self, size: Size) -> Self {
        self.content_size = Some(size);
        self
    }

    /// Set the z-index.
    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    /// Set the flags.
    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// One native event as the scene received it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EventRecord {
    /// Event kind.
    pub kind: PointerEventKind,
    /// Dispatch target.
    pub target: NodeId,
    /// Client coordinates carried by the event.
    pub position: Point,
    /// Whether a framework handler prevented the default action.
    pub default_prevented: bool,
}

/// Handle to the avatar node created by a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AvatarId(pub(crate) usize);

/// Handle to an inserted style sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleSheetId(pub(crate) usize);
