// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame pipeline: what happens every time a tween writes new values.
//!
//! Each position update re-renders the avatar at the effective position, hit tests there,
//! resolves hover against the previous frame, and dispatches `mousemove` on the hit element
//! followed by `mouseleave` / `mouseenter` for the transitions. Scroll updates skip the
//! render but re-run the rest, since the content under a still pointer changes.

use std::fmt::Debug;
use std::hash::Hash;

use kurbo::Vec2;
use understudy_dispatch::{PointerEventKind, dispatch};

use crate::action::{ActionId, Pending, Step};
use crate::host::Document;
use crate::player::Player;
use crate::pointer::{AvatarLook, PointerState};
use crate::tween::{Animatable, Curve, Ease, Tween, TweenEngine, TweenEvent, TweenId};

/// A numeric property the player exposes to its tween engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Prop<K> {
    /// Pointer target x.
    X,
    /// Pointer target y.
    Y,
    /// Trailing pointer x.
    DampedX,
    /// Trailing pointer y.
    DampedY,
    /// Avatar opacity.
    Opacity,
    /// Avatar scale.
    Scale,
    /// `scrollLeft` of an element.
    ScrollLeft(K),
    /// `scrollTop` of an element.
    ScrollTop(K),
    /// A value nothing observes; drives pure waits.
    Progress,
}

/// What runs after each update of a tween.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Hook {
    /// Nothing.
    None,
    /// Re-render the avatar only.
    Render,
    /// Re-render, hit test, resolve hover, dispatch.
    Frame,
    /// Hit test, resolve hover, dispatch.
    Hover,
    /// Chase the target with a trailing tween of this many (already scaled) seconds.
    Follow(f64),
}

/// The values a frame's tweens write into.
struct Stage<'a, D> {
    pointer: &'a mut PointerState,
    look: &'a mut AvatarLook,
    doc: &'a mut D,
}

impl<K, D: Document<K>> Animatable<Prop<K>> for Stage<'_, D>
where
    K: Copy,
{
    fn get(&self, prop: &Prop<K>) -> f64 {
        match *prop {
            Prop::X => self.pointer.position.x,
            Prop::Y => self.pointer.position.y,
            Prop::DampedX => self.pointer.damped_position.x,
            Prop::DampedY => self.pointer.damped_position.y,
            Prop::Opacity => self.look.opacity,
            Prop::Scale => self.look.scale,
            Prop::ScrollLeft(el) => self.doc.scroll_offset(el).x,
            Prop::ScrollTop(el) => self.doc.scroll_offset(el).y,
            Prop::Progress => 0.0,
        }
    }

    fn set(&mut self, prop: &Prop<K>, value: f64) {
        match *prop {
            Prop::X => self.pointer.position.x = value,
            Prop::Y => self.pointer.position.y = value,
            Prop::DampedX => self.pointer.damped_position.x = value,
            Prop::DampedY => self.pointer.damped_position.y = value,
            Prop::Opacity => self.look.opacity = value,
            Prop::Scale => self.look.scale = value,
            Prop::ScrollLeft(el) => {
                let y = self.doc.scroll_offset(el).y;
                self.doc.set_scroll_offset(el, Vec2::new(value, y));
            }
            Prop::ScrollTop(el) => {
                let x = self.doc.scroll_offset(el).x;
                self.doc.set_scroll_offset(el, Vec2::new(x, value));
            }
            Prop::Progress => {}
        }
    }
}

impl<K, D, E> Player<K, D, E>
where
    K: Copy + Eq + Hash + Debug + 'static,
    D: Document<K>,
    E: TweenEngine<Prop<K>>,
{
    /// Advance every running tween by `dt` seconds and run the frame pipeline for each
    /// update. Call this from the host's animation-frame loop.
    pub fn tick(&mut self, dt: f64) {
        let mut events = Vec::new();
        {
            let mut stage = Stage {
                pointer: &mut self.pointer,
                look: &mut self.look,
                doc: &mut self.doc,
            };
            self.engine.advance(dt, &mut stage, &mut events);
        }
        // The trailing tween is replaced once this frame's updates are handled, so its own
        // update in this batch still runs the frame pipeline.
        let mut follow = None;
        let mut framed = false;
        for event in events {
            match event {
                TweenEvent::Update(id) => match self.hooks.get(&id).copied() {
                    Some(Hook::Follow(duration)) => follow = Some(duration),
                    Some(hook) => {
                        framed |= hook == Hook::Frame;
                        self.run_hook(hook);
                    }
                    None => {}
                },
                TweenEvent::Complete(id) => {
                    self.hooks.remove(&id);
                    if self.trailing == Some(id) {
                        self.trailing = None;
                    }
                    self.complete(id);
                }
            }
        }
        if let Some(duration) = follow {
            // Before the first trailing update lands, render where the trailing pointer is.
            if !framed {
                self.update_position();
            }
            self.follow(duration);
        }
    }

    /// Start an action and run its legs up to the first tween.
    pub(crate) fn start(&mut self, steps: impl IntoIterator<Item = Step<K>>) -> ActionId {
        let id = ActionId(self.next_action);
        self.next_action += 1;
        let mut action = Pending::new(id, steps);
        if self.pump(&mut action) {
            self.pending.push(action);
        }
        id
    }

    /// An action that is finished as soon as it is issued.
    pub(crate) fn finished(&mut self) -> ActionId {
        self.start([])
    }

    /// Run legs until one has to wait. Returns whether the action is still pending.
    fn pump(&mut self, action: &mut Pending<K>) -> bool {
        while let Some(step) = action.steps.pop_front() {
            match step {
                Step::Tween(tween, hook) => {
                    let id = self.engine.animate(tween);
                    if hook != Hook::None {
                        self.hooks.insert(id, hook);
                    }
                    action.waiting = Some(id);
                    return true;
                }
                Step::Click(target) => {
                    if let Some(target) = target {
                        self.fire(PointerEventKind::Click, target);
                    }
                }
            }
        }
        action.waiting = None;
        false
    }

    fn complete(&mut self, tween: TweenId) {
        let Some(index) = self
            .pending
            .iter()
            .position(|a| a.waiting == Some(tween))
        else {
            return;
        };
        let mut action = self.pending.remove(index);
        if self.pump(&mut action) {
            self.pending.insert(index, action);
        }
    }

    fn run_hook(&mut self, hook: Hook) {
        match hook {
            Hook::None => {}
            Hook::Render => self.render(),
            Hook::Frame => self.update_position(),
            Hook::Hover => self.update_hover_state(),
            Hook::Follow(duration) => self.follow(duration),
        }
    }

    /// Issue a trailing tween of the damped position towards the target, replacing the
    /// previous one.
    fn follow(&mut self, duration: f64) {
        if let Some(old) = self.trailing.take() {
            self.hooks.remove(&old);
        }
        let target = self.pointer.position;
        let tween = Tween::new(duration)
            .ease(Ease::Out(Curve::Power2))
            .overwrite()
            .to(Prop::DampedX, target.x)
            .to(Prop::DampedY, target.y);
        let id = self.engine.animate(tween);
        self.hooks.insert(id, Hook::Frame);
        self.trailing = Some(id);
    }

    fn render(&mut self) {
        let frame = self.look.frame(self.effective_position());
        self.doc.render_avatar(&self.avatar, frame);
    }

    pub(crate) fn update_position(&mut self) {
        self.render();
        self.update_hover_state();
    }

    /// Hit test at the effective position and deliver move, leave and enter events.
    pub(crate) fn update_hover_state(&mut self) {
        let hit = self.element_under_pointer();
        if let Some(element) = hit {
            self.fire(PointerEventKind::Move, element);
        }
        let transitions = self.hover.update(hit, &self.doc);
        if transitions.is_empty() {
            return;
        }
        tracing::debug!(
            hovered = ?hit,
            leave = ?transitions.leave(),
            enter = ?transitions.enter(),
            "hover changed"
        );
        for &element in transitions.leave() {
            if let Some(styler) = self.styler.as_mut() {
                styler.toggle_style(&element, ":hover", false);
            }
            self.fire(PointerEventKind::Leave, element);
        }
        for &element in transitions.enter() {
            if let Some(styler) = self.styler.as_mut() {
                styler.toggle_style(&element, ":hover", true);
            }
            self.fire(PointerEventKind::Enter, element);
        }
    }

    pub(crate) fn element_under_pointer(&self) -> Option<K> {
        self.doc.element_from_point(self.effective_position())
    }

    /// Dispatch one event at the effective position, through the framework bridge when it
    /// is active.
    fn fire(&mut self, kind: PointerEventKind, target: K) {
        let position = self.effective_position();
        let bridge = if self.framework_events {
            self.bridge.as_deref_mut()
        } else {
            None
        };
        dispatch(kind, target, position, &mut self.doc, bridge);
    }
}
