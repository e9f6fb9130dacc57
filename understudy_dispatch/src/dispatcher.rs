// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: deliver one logical pointer event natively and to framework handlers.
//!
//! ## Semantics
//!
//! [`dispatch`] builds a [`NativeEvent`] at the pointer position and then:
//!
//! 1. If a [`FrameworkBridge`] is supplied and the kind maps to a [`HandlerProp`], walks the
//!    framework delivery sequence from [`route`] and invokes handlers with a
//!    [`SyntheticEvent`]. Bubbling kinds visit every element of the target's ancestor chain
//!    (target, then each ancestor up to the root); non-bubbling kinds visit the target only.
//!    A handler that stops propagation ends the walk.
//! 2. Dispatches the native event on the target through [`EventTarget`]. This always happens.
//!
//! Framework delivery runs first so that `prevent_default` called from a framework handler
//! is already visible on the native event when the host dispatches it.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understudy_dispatch::{EventTarget, NativeEvent, PointerEventKind, dispatch, NoBridge};
//!
//! use understudy_hover::ParentLookup;
//!
//! // A chain document: the parent of `n` is `n - 1`.
//! #[derive(Default)]
//! struct Log(Vec<(u32, &'static str)>);
//! impl ParentLookup<u32> for Log {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         (*n > 1).then(|| n - 1)
//!     }
//! }
//! impl EventTarget<u32> for Log {
//!     fn dispatch_event(&mut self, target: u32, event: &mut NativeEvent<u32>) {
//!         self.0.push((target, event.type_name()));
//!     }
//! }
//!
//! let mut log = Log::default();
//! dispatch(
//!     PointerEventKind::Enter,
//!     3,
//!     Point::new(10.0, 10.0),
//!     &mut log,
//!     None::<&mut NoBridge>,
//! );
//! assert_eq!(log.0, vec![(3, "mouseenter")]);
//! ```

use alloc::vec::Vec;

use kurbo::Point;
use understudy_hover::{ParentLookup, ancestor_chain};

use crate::bridge::{EventTarget, FrameworkBridge};
use crate::event::{HandlerProp, NativeEvent, Phase, PointerEventKind, SyntheticEvent};

/// Propagation control returned by a delivery handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep delivering.
    Continue,
    /// Abort the remaining deliveries.
    Stop,
}

/// One step of a framework delivery sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase relative to `node`.
    pub phase: Phase,
    /// Element whose handler runs.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// Delivery at the target.
    pub const fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// Delivery to an ancestor while bubbling.
    pub const fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Framework delivery sequence for `kind` aimed at `target`.
///
/// Bubbling kinds produce the target followed by its ancestors, innermost first.
/// Non-bubbling kinds produce the target alone.
pub fn route<K: Copy>(
    kind: PointerEventKind,
    target: K,
    parents: &impl ParentLookup<K>,
) -> Vec<Dispatch<K>> {
    if !kind.bubbles() {
        return alloc::vec![Dispatch::target(target)];
    }
    let chain = ancestor_chain(Some(target), parents);
    let mut out = Vec::with_capacity(chain.len());
    // Chain is root → target; deliver target → root.
    let mut iter = chain.into_iter().rev();
    if let Some(t) = iter.next() {
        out.push(Dispatch::target(t));
    }
    out.extend(iter.map(Dispatch::bubble));
    out
}

/// Walk a delivery sequence and honor [`Outcome::Stop`].
///
/// Returns the entry where delivery stopped, or `None` if the whole sequence ran.
pub fn run<'a, K, E>(
    seq: &'a [Dispatch<K>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}

/// Placeholder bridge type for call sites without framework integration.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoBridge;

impl<K> FrameworkBridge<K> for NoBridge {
    fn is_bound(&self, _: &K) -> bool {
        false
    }

    fn invoke(&mut self, _: &K, _: HandlerProp, _: &mut SyntheticEvent<'_, K>) -> bool {
        false
    }
}

/// Synthesize `kind` at `position` on `target`.
///
/// See the module docs for delivery order. Returns the native event after dispatch so callers
/// can inspect its default-prevented and propagation flags.
///
/// The host answers both the ancestor queries for [`route`] and the native dispatch.
pub fn dispatch<K, H, B>(
    kind: PointerEventKind,
    target: K,
    position: Point,
    host: &mut H,
    bridge: Option<&mut B>,
) -> NativeEvent<K>
where
    K: Copy,
    H: EventTarget<K> + ParentLookup<K>,
    B: FrameworkBridge<K> + ?Sized,
{
    let mut event = NativeEvent::new(kind, target, position);

    if let (Some(bridge), Some(prop)) = (bridge, kind.handler()) {
        let seq = route(kind, target, &*host);
        run(&seq, &mut event, |d, native| {
            let mut synthetic = SyntheticEvent::new(native, d.node, d.phase);
            bridge.invoke(&d.node, prop, &mut synthetic);
            if native.is_propagation_stopped() {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        event.set_phase(Phase::None);
    }

    host.dispatch_event(target, &mut event);
    event
}
