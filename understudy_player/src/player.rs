// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The player facade.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashMap;
use kurbo::Point;
use understudy_dispatch::FrameworkBridge;
use understudy_hover::HoverState;

use crate::action::{ActionId, Pending, Step};
use crate::controller::{Hook, Prop};
use crate::error::PlayerError;
use crate::host::{Document, HoverStyler, PSEUDO_STYLER_URL};
use crate::options::{AnimateOptions, PlayerOptions, ResolvedAnimate};
use crate::pointer::{AvatarLook, PointerState};
use crate::tween::{Curve, Ease, Timeline, Tween, TweenEngine, TweenId};

/// Frame length used by [`Player::finish`] unless changed with
/// [`Player::set_frame_interval`].
pub const DEFAULT_FRAME_INTERVAL: f64 = 1.0 / 60.0;

/// A virtual pointer animated across a [`Document`].
///
/// Operations return an [`ActionId`] immediately. The action plays out as the host calls
/// [`tick`](Self::tick) from its frame loop; [`finish`](Self::finish) drives frames itself
/// until an action is done. Actions issued while others are still running play
/// concurrently, and on any frame where two of them drive the same value the later one wins.
pub struct Player<K, D: Document<K>, E = Timeline<Prop<K>>> {
    pub(crate) doc: D,
    pub(crate) engine: E,
    pub(crate) avatar: D::Avatar,
    pub(crate) style_sheet: Option<D::StyleSheet>,
    pub(crate) look: AvatarLook,
    pub(crate) pointer: PointerState,
    pub(crate) hover: HoverState<K>,
    pub(crate) styler: Option<Box<dyn HoverStyler<K>>>,
    pub(crate) bridge: Option<Box<dyn FrameworkBridge<K>>>,
    pub(crate) framework_events: bool,
    pub(crate) verbose: bool,
    pub(crate) wheel_blocked: bool,
    pub(crate) damping: f64,
    pub(crate) default_animate: AnimateOptions,
    pub(crate) frame_interval: f64,
    pub(crate) pending: Vec<Pending<K>>,
    pub(crate) hooks: HashMap<TweenId, Hook>,
    pub(crate) trailing: Option<TweenId>,
    pub(crate) next_action: u64,
}

impl<K: fmt::Debug, D: Document<K>, E> fmt::Debug for Player<K, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("pointer", &self.pointer)
            .field("hover", &self.hover)
            .field("look", &self.look)
            .field("damping", &self.damping)
            .field("framework_events", &self.framework_events)
            .field("hover_styles", &self.styler.is_some())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<K, D> Player<K, D>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    D: Document<K>,
{
    /// Create a player on `doc` driven by a fresh [`Timeline`].
    ///
    /// Inserts the override style sheet, blocks the wheel and creates the avatar as
    /// `options` request.
    pub fn new(doc: D, options: PlayerOptions) -> Self {
        Self::with_engine(doc, Timeline::new(), options)
    }
}

impl<K, D, E> Player<K, D, E>
where
    K: Copy + Eq + Hash + fmt::Debug + 'static,
    D: Document<K>,
    E: TweenEngine<Prop<K>>,
{
    /// Create a player on `doc` driven by `engine`.
    pub fn with_engine(mut doc: D, engine: E, options: PlayerOptions) -> Self {
        let style_sheet = options
            .override_css()
            .map(|css| doc.insert_style_sheet(&css));
        if options.prevent_mouse_wheel {
            doc.set_wheel_blocked(true);
        }
        let avatar = doc.create_avatar(&options.avatar_style());
        let look = AvatarLook::default();
        doc.render_avatar(&avatar, look.frame(Point::ZERO));
        Self {
            doc,
            engine,
            avatar,
            style_sheet,
            look,
            pointer: PointerState::default(),
            hover: HoverState::with_scope(options.hover_scope),
            styler: None,
            bridge: None,
            framework_events: false,
            verbose: options.verbose,
            wheel_blocked: options.prevent_mouse_wheel,
            damping: options.move_damping,
            default_animate: options.default_animate,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            pending: Vec::new(),
            hooks: HashMap::new(),
            trailing: None,
            next_action: 0,
        }
    }

    /// Provide access to framework handler tables.
    ///
    /// Nothing is delivered through `bridge` until [`init_react_events`](Self::init_react_events)
    /// confirms that the document's root is bound.
    pub fn with_framework_bridge(mut self, bridge: impl FrameworkBridge<K> + 'static) -> Self {
        self.bridge = Some(Box::new(bridge));
        self
    }

    /// The document.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// The document, mutably. Useful to change content between actions.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// The tween engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The avatar node, for hosts that want to restyle it.
    pub fn avatar(&self) -> &D::Avatar {
        &self.avatar
    }

    /// Pointer state: target position, damped position and speed.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The position events are dispatched at.
    pub fn effective_position(&self) -> Point {
        self.pointer.effective(self.damping > 0.0)
    }

    /// Current playback rate.
    pub fn speed(&self) -> f64 {
        self.pointer.speed()
    }

    /// The element hovered in the latest frame.
    pub fn hovered(&self) -> Option<K> {
        self.hover.current()
    }

    /// Whether the avatar is at all visible.
    pub fn is_visible(&self) -> bool {
        self.look.opacity > 0.0
    }

    /// Whether `action` has run all its legs.
    pub fn is_finished(&self, action: ActionId) -> bool {
        action.0 < self.next_action && self.pending.iter().all(|a| a.id != action)
    }

    /// Whether no action is pending and the engine has nothing left to play.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.engine.is_idle()
    }

    /// Set the frame length used by [`finish`](Self::finish). Ignores non-positive values.
    pub fn set_frame_interval(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.frame_interval = seconds;
        }
    }

    /// Drive frames until `action` is finished. Returns the number of frames stepped.
    ///
    /// An id this player never issued steps no frames.
    pub fn finish(&mut self, action: ActionId) -> usize {
        if action.0 >= self.next_action {
            return 0;
        }
        let mut frames = 0;
        while !self.is_finished(action) {
            self.tick(self.frame_interval);
            frames += 1;
        }
        frames
    }

    /// Drive frames until every action and trailing tween is done.
    pub fn finish_all(&mut self) -> usize {
        let mut frames = 0;
        while !self.is_idle() {
            self.tick(self.frame_interval);
            frames += 1;
        }
        frames
    }

    fn log(&self, op: &str, args: fmt::Arguments<'_>, element: Option<K>) {
        if self.verbose {
            tracing::info!(op, args = %args, element = ?element, "virtual pointer");
        }
    }

    /// A tween leg with `animate`'s timing scaled by the current speed.
    fn leg(&self, animate: ResolvedAnimate) -> Tween<Prop<K>> {
        Tween::new(self.pointer.scaled(animate.duration))
            .delay(self.pointer.scaled(animate.delay))
            .ease(animate.ease)
    }

    fn position_hook(&self) -> Hook {
        if self.damping > 0.0 {
            Hook::Follow(self.pointer.scaled(self.damping))
        } else {
            Hook::Frame
        }
    }

    /// Move to client coordinates `(x, y)`.
    pub fn to(&mut self, x: f64, y: f64, options: AnimateOptions) -> ActionId {
        self.log("to", format_args!("x={x} y={y} {options:?}"), None);
        let r = options.resolve(&self.default_animate);
        let tween = self.leg(r).to(Prop::X, x).to(Prop::Y, y);
        let hook = self.position_hook();
        self.start([Step::Tween(tween, hook)])
    }

    /// Move by `(dx, dy)` relative to wherever the pointer is when the move starts.
    pub fn move_by(&mut self, dx: f64, dy: f64, options: AnimateOptions) -> ActionId {
        self.log("move", format_args!("x={dx} y={dy} {options:?}"), None);
        let r = options.resolve(&self.default_animate);
        let tween = self.leg(r).by(Prop::X, dx).by(Prop::Y, dy);
        let hook = self.position_hook();
        self.start([Step::Tween(tween, hook)])
    }

    /// Wait `seconds`, scaled by speed.
    pub fn delay(&mut self, seconds: f64) -> ActionId {
        self.log("delay", format_args!("duration={seconds}"), None);
        let tween = Tween::new(self.pointer.scaled(seconds))
            .ease(Ease::Linear)
            .to(Prop::Progress, 1.0);
        self.start([Step::Tween(tween, Hook::None)])
    }

    /// Fade the avatar out. Hover keeps being resolved while it fades.
    pub fn hide(&mut self, options: AnimateOptions) -> ActionId {
        self.log("hide", format_args!("{options:?}"), None);
        let r = options.resolve(&self.default_animate);
        let tween = self.leg(r).to(Prop::Opacity, 0.0);
        self.start([Step::Tween(tween, Hook::Frame)])
    }

    /// Fade the avatar in.
    pub fn show(&mut self, options: AnimateOptions) -> ActionId {
        self.log("show", format_args!("{options:?}"), None);
        let r = options.resolve(&self.default_animate);
        let tween = self.leg(r).to(Prop::Opacity, 1.0);
        self.start([Step::Tween(tween, Hook::Render)])
    }

    /// Squash the avatar, click the element under the pointer, release.
    ///
    /// The target is hit tested now, when the click is issued. The avatar does not have to be
    /// visible: a hidden pointer still squashes and clicks, so a click right after
    /// [`hide`](Self::hide) lands on the element under the pointer.
    pub fn click(&mut self, options: AnimateOptions) -> ActionId {
        let target = self.element_under_pointer();
        self.log("click", format_args!("{options:?}"), target);
        let r = options.resolve(&self.default_animate);
        let squash = Tween::new(self.pointer.scaled(0.3 * r.duration))
            .delay(self.pointer.scaled(r.delay))
            .ease(Ease::Out(Curve::Power4))
            .to(Prop::Scale, 0.8);
        let release = Tween::new(self.pointer.scaled(0.4 * r.duration))
            .ease(Ease::InOut(Curve::Power2))
            .to(Prop::Scale, 1.0);
        self.start([
            Step::Tween(squash, Hook::Render),
            Step::Click(target),
            Step::Tween(release, Hook::Render),
        ])
    }

    /// Scroll the nearest scrollable ancestor of `element` (or of the element under the
    /// pointer) to `(x, y)`.
    ///
    /// Without a scrollable ancestor the document's scrolling element is used. If there is
    /// none either, the returned action is already finished.
    pub fn scroll_to(
        &mut self,
        x: f64,
        y: f64,
        options: AnimateOptions,
        element: Option<K>,
    ) -> ActionId {
        let scroller = self.scroll_target(element);
        self.log("scrollTo", format_args!("x={x} y={y} {options:?}"), scroller);
        let Some(scroller) = scroller else {
            return self.finished();
        };
        let r = options.resolve(&self.default_animate);
        let tween = self
            .leg(r)
            .to(Prop::ScrollLeft(scroller), x)
            .to(Prop::ScrollTop(scroller), y);
        self.start([Step::Tween(tween, Hook::Hover)])
    }

    /// Scroll by `(dx, dy)`; target selection as in [`scroll_to`](Self::scroll_to).
    pub fn scroll(
        &mut self,
        dx: f64,
        dy: f64,
        options: AnimateOptions,
        element: Option<K>,
    ) -> ActionId {
        let scroller = self.scroll_target(element);
        self.log("scroll", format_args!("x={dx} y={dy} {options:?}"), scroller);
        let Some(scroller) = scroller else {
            return self.finished();
        };
        let r = options.resolve(&self.default_animate);
        let tween = self
            .leg(r)
            .by(Prop::ScrollLeft(scroller), dx)
            .by(Prop::ScrollTop(scroller), dy);
        self.start([Step::Tween(tween, Hook::Hover)])
    }

    /// The nearest element at or above `element` (below the body) that scrolls on either
    /// axis, falling back to the document's scrolling element.
    fn scroll_target(&self, element: Option<K>) -> Option<K> {
        let body = self.doc.body();
        let mut node = element.or_else(|| self.element_under_pointer());
        while let Some(n) = node {
            if Some(n) == body {
                break;
            }
            if self.doc.overflow(n).is_scrollable() {
                return Some(n);
            }
            node = self.doc.parent_of(&n);
        }
        self.doc.scrolling_element()
    }

    /// Change the playback rate of actions issued from now on.
    ///
    /// Zero, negative and non-finite values are ignored. Returns whether `value` was taken.
    pub fn set_speed(&mut self, value: f64) -> bool {
        self.log("speed", format_args!("value={value}"), None);
        self.pointer.set_speed(value)
    }

    /// Load the hover styling shim and start forcing `:hover` rules on hovered elements.
    ///
    /// Loads the shim's script from [`PSEUDO_STYLER_URL`] first if `styler` reports it
    /// unavailable. On failure the player keeps working without hover styling.
    pub fn init_hovers_hack(
        &mut self,
        mut styler: impl HoverStyler<K> + 'static,
    ) -> Result<(), PlayerError> {
        self.log("initHoversHack", format_args!(""), None);
        if !styler.is_available() {
            styler.load_script(PSEUDO_STYLER_URL)?;
        }
        styler.load_document_styles()?;
        self.styler = Some(Box::new(styler));
        Ok(())
    }

    /// Start delivering enter, leave and move events to framework handlers.
    ///
    /// Only takes effect if a bridge was supplied with
    /// [`with_framework_bridge`](Self::with_framework_bridge) and it reports handlers on
    /// `root`. Returns whether framework delivery is now active.
    pub fn init_react_events(&mut self, root: Option<K>) -> bool {
        let Some(root) = root else {
            return false;
        };
        let bound = self.bridge.as_ref().is_some_and(|b| b.is_bound(&root));
        if bound {
            self.framework_events = true;
            self.log("initReactEvents", format_args!(""), Some(root));
        }
        bound
    }

    /// Tear the player down and hand the document back.
    ///
    /// Removes the override style sheet and the avatar and unblocks the wheel. Pending
    /// actions are dropped unfinished.
    pub fn dispose(self) -> D {
        self.log("dispose", format_args!(""), None);
        let Self {
            mut doc,
            avatar,
            style_sheet,
            wheel_blocked,
            ..
        } = self;
        if let Some(sheet) = style_sheet {
            doc.remove_style_sheet(sheet);
        }
        doc.remove_avatar(avatar);
        if wheel_blocked {
            doc.set_wheel_blocked(false);
        }
        doc
    }
}
