// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Studio: record real pointer input as a replayable player script.
//!
//! A [`Studio`] session attaches to a [`StudioHost`], which forwards real input to it:
//!
//! - pointer moves update the last known pointer position;
//! - a click registers `await mouse.to(x, y)`, `await mouse.click({ duration: .4 })` and a
//!   short settle delay, preceded by `await mouse.scrollTo(0, y)` if the page scrolled since
//!   the last registration;
//! - Meta on its own registers a scroll correction;
//! - Meta + Escape serializes everything (page address, viewport size, player bootstrap and the
//!   registrations) to the clipboard and ends the session.
//!
//! The script is made of [`Statement`](understudy_player::Statement)s and replays with
//! [`Player::play_script`](understudy_player::Player::play_script).
//!
//! ```
//! use kurbo::{Point, Size};
//! use understudy_studio::{ClipboardError, Studio, StudioHost};
//!
//! #[derive(Default)]
//! struct Page { clipboard: String }
//!
//! impl StudioHost for Page {
//!     fn scroll_y(&self) -> f64 { 0.0 }
//!     fn location(&self) -> String { "https://example.com/".into() }
//!     fn viewport(&self) -> Size { Size::new(800.0, 600.0) }
//!     fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
//!         self.clipboard = text.to_owned();
//!         Ok(())
//!     }
//!     fn attach(&mut self) {}
//!     fn detach(&mut self) {}
//! }
//!
//! let mut studio = Studio::start(Page::default());
//! studio.pointer_moved(Point::new(40.0, 30.0));
//! studio.clicked();
//! let script = studio.stop().unwrap();
//! assert!(script.contains("await mouse.to(40, 30)\nawait mouse.click({ duration: .4 })"));
//! assert_eq!(studio.host().clipboard, script);
//! ```

mod buffer;
mod error;
mod host;
mod studio;

pub use buffer::{BOOTSTRAP, ReplayBuffer};
pub use error::{ClipboardError, StudioError};
pub use host::StudioHost;
pub use studio::{CLICK_DURATION, KeyAction, SETTLE_DELAY, Studio};
