// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a recording session observes.

use kurbo::Size;

use crate::error::ClipboardError;

/// The page being recorded.
///
/// The host forwards real input to the [`Studio`](crate::Studio) while it is attached.
pub trait StudioHost {
    /// Vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;
    /// Address of the page, written into the script header.
    fn location(&self) -> String;
    /// Viewport size in CSS pixels.
    fn viewport(&self) -> Size;
    /// Replace the system clipboard's contents with `text`.
    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError>;
    /// Start forwarding pointer moves, clicks and key presses.
    fn attach(&mut self);
    /// Stop forwarding input.
    fn detach(&mut self);
}
