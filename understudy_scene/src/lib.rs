// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Scene: a headless document for driving a virtual pointer without a browser.
//!
//! - [`Scene`]: an arena of rectangular nodes with `z_index`, overflow clipping, scroll offsets
//!   and hit testing. Implements [`understudy_player::Document`] over [`NodeId`] and records every
//!   native event it receives as an [`EventRecord`].
//! - [`Handlers`]: framework handler tables (`onMouseEnter`, …) keyed by node, usable as a
//!   [`FrameworkBridge`](understudy_dispatch::FrameworkBridge).
//! - [`PseudoStyles`]: a hover styling shim that records which nodes have `:hover` forced.
//!
//! Geometry is client coordinates throughout. A node's bounds are relative to its parent's
//! content box, so scrolling a parent moves its children under a fixed pointer.
//!
//! This crate is not a layout engine. Callers position every node themselves.
//!
//! ```
//! use kurbo::Rect;
//! use understudy_player::{AnimateOptions, Player, PlayerOptions};
//! use understudy_scene::{LocalNode, NodeId, Scene};
//!
//! let mut scene = Scene::new();
//! let body = scene.insert(None, LocalNode::new("body", Rect::new(0.0, 0.0, 800.0, 600.0)));
//! let card = scene.insert(Some(body), LocalNode::new("card", Rect::new(100.0, 100.0, 300.0, 200.0)));
//! scene.set_body(body);
//!
//! let mut player: Player<NodeId, Scene> = Player::new(scene, PlayerOptions::new());
//! let to = player.to(150.0, 150.0, AnimateOptions::new().duration(0.2));
//! player.finish(to);
//! assert_eq!(player.hovered(), Some(card));
//! ```

mod document;
mod handlers;
mod scene;
mod styles;
mod types;

pub use handlers::{CallLog, Handler, HandlerCall, Handlers};
pub use scene::{Avatar, Scene};
pub use styles::{ForcedStyles, PseudoStyles};
pub use types::{AvatarId, EventRecord, LocalNode, NodeFlags, NodeId, StyleSheetId};
