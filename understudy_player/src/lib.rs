// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Player: a virtual pointer that plays a document like a user would.
//!
//! ## Overview
//!
//! A [`Player`] owns an avatar node in a host [`Document`] and animates it with a
//! [`TweenEngine`]. Every time the pointer moves (or the content under it scrolls) the player
//! hit tests at the pointer, works out which elements were entered and left since the last
//! frame, and dispatches `mousemove`, `mouseleave` and `mouseenter` so the document reacts
//! as it would to a real pointer. Optional integrations:
//!
//! - a [`HoverStyler`] that forces `:hover` rules, since synthetic events do not trigger them;
//! - a [`FrameworkBridge`](understudy_dispatch::FrameworkBridge) for UI frameworks that only
//!   listen through their own handler tables.
//!
//! ## Driving frames
//!
//! The player does not own a clock. Operations such as [`Player::to`] issue tweens and
//! return an [`ActionId`]; the host calls [`Player::tick`] once per animation frame.
//! [`Player::finish`] runs frames until one action completes, which is the blocking
//! equivalent of awaiting it.
//!
//! ```
//! use understudy_player::{AnimateOptions, Player, PlayerOptions};
//! # use understudy_player::{AvatarFrame, AvatarStyle, ComputedOverflow, Document};
//! # use understudy_dispatch::{EventTarget, NativeEvent};
//! # use understudy_hover::ParentLookup;
//! # use kurbo::{Point, Vec2};
//! # #[derive(Default)]
//! # struct Page { hits: usize }
//! # impl ParentLookup<u32> for Page {
//! #     fn parent_of(&self, _: &u32) -> Option<u32> { None }
//! # }
//! # impl EventTarget<u32> for Page {
//! #     fn dispatch_event(&mut self, _: u32, _: &mut NativeEvent<u32>) { self.hits += 1; }
//! # }
//! # impl Document<u32> for Page {
//! #     type Avatar = ();
//! #     type StyleSheet = ();
//! #     fn element_from_point(&self, _: Point) -> Option<u32> { Some(1) }
//! #     fn body(&self) -> Option<u32> { Some(1) }
//! #     fn scrolling_element(&self) -> Option<u32> { None }
//! #     fn overflow(&self, _: u32) -> ComputedOverflow { ComputedOverflow::default() }
//! #     fn scroll_offset(&self, _: u32) -> Vec2 { Vec2::ZERO }
//! #     fn set_scroll_offset(&mut self, _: u32, _: Vec2) {}
//! #     fn create_avatar(&mut self, _: &AvatarStyle) {}
//! #     fn render_avatar(&mut self, _: &(), _: AvatarFrame) {}
//! #     fn remove_avatar(&mut self, _: ()) {}
//! #     fn insert_style_sheet(&mut self, _: &str) {}
//! #     fn remove_style_sheet(&mut self, _: ()) {}
//! #     fn set_wheel_blocked(&mut self, _: bool) {}
//! # }
//!
//! let mut player: Player<u32, Page> = Player::new(Page::default(), PlayerOptions::new());
//! let id = player.to(120.0, 40.0, AnimateOptions::new().duration(0.5));
//! player.finish(id);
//! assert_eq!(player.pointer().position(), kurbo::Point::new(120.0, 40.0));
//! assert_eq!(player.hovered(), Some(1));
//! ```
//!
//! ## Scripts
//!
//! [`Call`] and [`Statement`] describe operations as text (`await mouse.click()`), the
//! format recorded by `understudy_studio`. [`Player::play_script`] replays such a script.

mod action;
mod controller;
mod error;
mod host;
mod options;
mod player;
mod pointer;
mod script;
mod tween;

pub use action::ActionId;
pub use controller::Prop;
pub use error::{PlayerError, ShimError};
pub use host::{
    AvatarFrame, ComputedOverflow, Document, HoverStyler, Overflow, PSEUDO_STYLER_URL,
};
pub use options::{
    AnimateOptions, AvatarStyle, HIDE_CURSOR_CSS, HIDE_SCROLLBAR_CSS, PlayerOptions,
    ResolvedAnimate,
};
pub use player::{DEFAULT_FRAME_INTERVAL, Player};
pub use pointer::PointerState;
pub use script::{Call, ParseCallError, RECEIVER, ScriptError, Statement, parse_script};
pub use tween::{
    Animatable, Curve, Ease, Goal, ParseEaseError, Timeline, Tween, TweenEngine, TweenEvent,
    TweenId,
};
