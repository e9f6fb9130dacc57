// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams: native dispatch and framework handler access.

use crate::event::{HandlerProp, NativeEvent, SyntheticEvent};

/// Native event dispatch on the host document.
pub trait EventTarget<K> {
    /// Dispatch `event` on `target` through the host's own propagation.
    ///
    /// Listeners may mark the event as default-prevented or stopped.
    fn dispatch_event(&mut self, target: K, event: &mut NativeEvent<K>);
}

/// Typed access to framework-level handlers attached to elements.
///
/// Some UI frameworks keep their own handler tables (`onMouseEnter`, …) and never see
/// synthetic native enter/leave events. A bridge lets the dispatcher call those handlers
/// directly.
pub trait FrameworkBridge<K> {
    /// Whether `element` exposes framework handlers at all.
    ///
    /// Used once to decide whether framework delivery is worth enabling for a document.
    fn is_bound(&self, element: &K) -> bool;

    /// Invoke the handler registered under `prop` on `element`.
    ///
    /// Returns `false` if the element has no such handler.
    fn invoke(&mut self, element: &K, prop: HandlerProp, event: &mut SyntheticEvent<'_, K>)
    -> bool;
}
