// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understudy Dispatch: pointer event synthesis for a virtual pointer.
//!
//! ## Overview
//!
//! A synthetic pointer has to convince two audiences. The host document listens to native
//! pointer events. Some UI frameworks ignore synthetic native `mouseenter`/`mouseleave`
//! and only react through their own handler tables. This crate builds one event per
//! logical kind ([`PointerEventKind`]) and serves both:
//!
//! - a [`NativeEvent`] dispatched through the host's [`EventTarget`];
//! - a [`SyntheticEvent`] handed to framework handlers through a [`FrameworkBridge`], whose
//!   `prevent_default` / `stop_propagation` write through to the native event.
//!
//! It does not perform hit testing and does not decide *which* elements receive enter or
//! leave; see `understudy_hover` for that.
//!
//! ## Delivery
//!
//! [`route`] emits the framework delivery sequence: target then ancestors for bubbling kinds,
//! the target alone otherwise. [`run`] walks a sequence and honors [`Outcome::Stop`].
//! [`dispatch`] ties both to the native dispatch.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bridge;
mod dispatcher;
mod event;

pub use bridge::{EventTarget, FrameworkBridge};
pub use dispatcher::{Dispatch, NoBridge, Outcome, dispatch, route, run};
pub use event::{HandlerProp, NativeEvent, Phase, PointerEventKind, SyntheticEvent};
