// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event kinds, native events, and framework-facing synthetic events.

use kurbo::Point;

/// Logical pointer event kinds emitted by a virtual pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// `mousemove`: bubbles.
    Move,
    /// `mouseenter`: does not bubble.
    Enter,
    /// `mouseleave`: does not bubble.
    Leave,
    /// `click`: bubbles.
    Click,
}

impl PointerEventKind {
    /// The platform event type name.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Move => "mousemove",
            Self::Enter => "mouseenter",
            Self::Leave => "mouseleave",
            Self::Click => "click",
        }
    }

    /// Whether the platform event bubbles.
    pub const fn bubbles(self) -> bool {
        matches!(self, Self::Move | Self::Click)
    }

    /// Framework handler property mapped to this kind, if any.
    ///
    /// Clicks reach frameworks through their native delegated listeners, so they have no
    /// mapping.
    pub const fn handler(self) -> Option<HandlerProp> {
        match self {
            Self::Move => Some(HandlerProp::OnMouseMove),
            Self::Enter => Some(HandlerProp::OnMouseEnter),
            Self::Leave => Some(HandlerProp::OnMouseLeave),
            Self::Click => None,
        }
    }
}

/// Framework-level handler property names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandlerProp {
    /// `onMouseEnter`
    OnMouseEnter,
    /// `onMouseLeave`
    OnMouseLeave,
    /// `onMouseMove`
    OnMouseMove,
}

impl HandlerProp {
    /// The property name as frameworks spell it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::OnMouseEnter => "onMouseEnter",
            Self::OnMouseLeave => "onMouseLeave",
            Self::OnMouseMove => "onMouseMove",
        }
    }
}

/// Event phase, mirroring the platform's `eventPhase`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not being dispatched.
    #[default]
    None,
    /// Root → target, excluding the target.
    Capture,
    /// At the target.
    Target,
    /// Target's parent → root.
    Bubble,
}

/// A platform pointer event at the virtual pointer's position.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeEvent<K> {
    kind: PointerEventKind,
    target: K,
    position: Point,
    bubbles: bool,
    cancelable: bool,
    phase: Phase,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<K: Copy> NativeEvent<K> {
    /// Build an undispatched, cancelable event of `kind` aimed at `target`.
    pub fn new(kind: PointerEventKind, target: K, position: Point) -> Self {
        Self {
            kind,
            target,
            position,
            bubbles: kind.bubbles(),
            cancelable: true,
            phase: Phase::None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Event kind.
    pub fn kind(&self) -> PointerEventKind {
        self.kind
    }

    /// The platform type name (`mousemove`, …).
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Dispatch target.
    pub fn target(&self) -> K {
        self.target
    }

    /// Client coordinates of the pointer.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Whether the default action can be prevented.
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Current phase. Hosts update this while they dispatch.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Set the current phase.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Whether a listener prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a listener stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Prevent the default action. No effect on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation past the current node.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// A framework-style event object mirroring a [`NativeEvent`].
///
/// Handlers receive this instead of the native event. [`SyntheticEvent::prevent_default`]
/// and [`SyntheticEvent::stop_propagation`] write through to the native event so framework
/// handlers can suppress native behavior.
#[derive(Debug)]
pub struct SyntheticEvent<'a, K> {
    /// Event kind.
    pub kind: PointerEventKind,
    /// The element the event was synthesized for.
    pub target: K,
    /// The element whose handler is being invoked.
    pub current_target: K,
    /// Copied from the native event.
    pub bubbles: bool,
    /// Copied from the native event.
    pub cancelable: bool,
    /// Phase relative to `current_target`.
    pub phase: Phase,
    native: &'a mut NativeEvent<K>,
}

impl<'a, K: Copy> SyntheticEvent<'a, K> {
    /// Wrap `native` for delivery to `current_target` in `phase`.
    pub fn new(native: &'a mut NativeEvent<K>, current_target: K, phase: Phase) -> Self {
        Self {
            kind: native.kind(),
            target: native.target(),
            current_target,
            bubbles: native.bubbles(),
            cancelable: native.cancelable(),
            phase,
            native,
        }
    }

    /// The platform type name.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Pointer position of the underlying native event.
    pub fn position(&self) -> Point {
        self.native.position()
    }

    /// Read through to the native event.
    pub fn default_prevented(&self) -> bool {
        self.native.default_prevented()
    }

    /// Read through to the native event.
    pub fn is_propagation_stopped(&self) -> bool {
        self.native.is_propagation_stopped()
    }

    /// Delegates to [`NativeEvent::prevent_default`].
    pub fn prevent_default(&mut self) {
        self.native.prevent_default();
    }

    /// Delegates to [`NativeEvent::stop_propagation`].
    pub fn stop_propagation(&mut self) {
        self.native.stop_propagation();
    }

    /// The underlying native event.
    pub fn native(&self) -> &NativeEvent<K> {
        &*self.native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_and_leave_do_not_bubble() {
        assert!(!PointerEventKind::Enter.bubbles());
        assert!(!PointerEventKind::Leave.bubbles());
        assert!(PointerEventKind::Move.bubbles());
        assert!(PointerEventKind::Click.bubbles());
    }

    #[test]
    fn handler_names_follow_event_types() {
        assert_eq!(
            PointerEventKind::Enter.handler().map(HandlerProp::name),
            Some("onMouseEnter")
        );
        assert_eq!(
            PointerEventKind::Leave.handler().map(HandlerProp::name),
            Some("onMouseLeave")
        );
        assert_eq!(
            PointerEventKind::Move.handler().map(HandlerProp::name),
            Some("onMouseMove")
        );
        assert_eq!(PointerEventKind::Click.handler(), None);
    }

    #[test]
    fn synthetic_event_writes_through_to_native() {
        let mut native = NativeEvent::new(PointerEventKind::Move, 7_u32, Point::new(3.0, 4.0));
        {
            let mut synthetic = SyntheticEvent::new(&mut native, 2, Phase::Bubble);
            assert_eq!(synthetic.target, 7);
            assert_eq!(synthetic.current_target, 2);
            assert_eq!(synthetic.type_name(), "mousemove");
            assert!(!synthetic.default_prevented());
            synthetic.prevent_default();
            synthetic.stop_propagation();
            assert!(synthetic.default_prevented());
        }
        assert!(native.default_prevented());
        assert!(native.is_propagation_stopped());
        assert_eq!(native.position(), Point::new(3.0, 4.0));
    }
}
