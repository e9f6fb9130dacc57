// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Hover: enter/leave resolution for a synthetic pointer.
//!
//! ## Overview
//!
//! A virtual pointer cannot influence the host's native hover state, so the hover
//! semantics have to be reproduced by hand. This crate computes them.
//! Given the element hit by the pointer in the previous frame and the element hit in
//! the current frame, it returns the minimal set of elements to leave and to enter.
//!
//! Hover is tracked over the full ancestor chain of the hit element, so `mouseenter` /
//! `mouseleave` and `:hover` styling behave as they would for a real pointer: moving
//! between two siblings leaves one and enters the other while their shared parent stays
//! hovered.
//!
//! ## Ordering
//!
//! - Leaves are reported first, innermost → outermost (leaf to root).
//! - Enters follow, outermost → innermost (root to leaf).
//!
//! ## Usage
//!
//! ```
//! use understudy_hover::{HoverEvent, HoverState};
//!
//! // 1 is the root, 2 and 3 are siblings under it.
//! let parents = |n: &u32| match *n {
//!     2 | 3 => Some(1),
//!     _ => None,
//! };
//!
//! let mut hover = HoverState::new();
//! let first = hover.update(Some(2), &parents);
//! assert_eq!(first.enter(), &[1, 2]);
//!
//! let second = hover.update(Some(3), &parents);
//! assert_eq!(
//!     second.events().collect::<Vec<_>>(),
//!     vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]
//! );
//!
//! // Nothing moved: nothing to do.
//! assert!(hover.update(Some(3), &parents).is_empty());
//! ```
//!
//! ## Scope
//!
//! [`HoverScope::AncestorChain`] is the default. [`HoverScope::TargetOnly`] only tracks
//! the direct hit target, which is enough when no UI framework listens to delegated
//! enter/leave events.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chain;
mod resolve;

pub use chain::{NoParent, ParentLookup, ancestor_chain};
pub use resolve::{HoverEvent, HoverScope, HoverState, Transitions, resolve, resolve_scoped};
