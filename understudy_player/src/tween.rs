// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tweens: the contract between the player and an animation engine.
//!
//! The player never interpolates values itself. It describes each leg of an action as a
//! [`Tween`] over some property type `P` and hands it to a [`TweenEngine`]. The engine writes
//! interpolated values back through [`Animatable`] while [`TweenEngine::advance`] runs and
//! reports progress as [`TweenEvent`]s.
//!
//! [`Timeline`] is the deterministic engine used by default.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

/// Shape of an easing curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Quadratic.
    Power1,
    /// Cubic.
    Power2,
    /// Quartic.
    Power3,
    /// Quintic.
    Power4,
    /// Quarter sine wave.
    Sine,
}

impl Curve {
    fn name(self) -> &'static str {
        match self {
            Self::Power1 => "power1",
            Self::Power2 => "power2",
            Self::Power3 => "power3",
            Self::Power4 => "power4",
            Self::Sine => "sine",
        }
    }

    /// The ease-in form of the curve on `[0, 1]`.
    fn ease_in(self, t: f64) -> f64 {
        match self {
            Self::Power1 => t * t,
            Self::Power2 => t * t * t,
            Self::Power3 => t * t * t * t,
            Self::Power4 => t * t * t * t * t,
            Self::Sine => 1.0 - (t * FRAC_PI_2).cos(),
        }
    }
}

/// An easing function, named the way animation scripts spell it.
///
/// `Display` and `FromStr` use the dotted form: `none`, `power2.out`, `sine.inOut`, …
/// A bare curve name such as `power3` means its `.out` variant.
///
/// ```
/// use understudy_player::{Curve, Ease};
///
/// let ease: Ease = "power4.inOut".parse().unwrap();
/// assert_eq!(ease, Ease::InOut(Curve::Power4));
/// assert_eq!(ease.to_string(), "power4.inOut");
/// assert_eq!("power2".parse::<Ease>().unwrap(), Ease::Out(Curve::Power2));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Constant rate.
    Linear,
    /// Accelerating from zero velocity.
    In(Curve),
    /// Decelerating to zero velocity.
    Out(Curve),
    /// Accelerating until halfway, then decelerating.
    InOut(Curve),
}

impl Default for Ease {
    fn default() -> Self {
        Self::InOut(Curve::Power4)
    }
}

impl Ease {
    /// Map linear progress `t` to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::In(c) => c.ease_in(t),
            Self::Out(c) => 1.0 - c.ease_in(1.0 - t),
            Self::InOut(c) => {
                if t < 0.5 {
                    c.ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - c.ease_in((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("none"),
            Self::In(c) => write!(f, "{}.in", c.name()),
            Self::Out(c) => write!(f, "{}.out", c.name()),
            Self::InOut(c) => write!(f, "{}.inOut", c.name()),
        }
    }
}

/// An ease name that is not in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown ease `{0}`")]
pub struct ParseEaseError(pub String);

impl FromStr for Ease {
    type Err = ParseEaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseEaseError(s.to_string());
        let (curve, dir) = s.trim().split_once('.').unwrap_or((s.trim(), "out"));
        let curve = match curve {
            "none" | "linear" | "power0" => return Ok(Self::Linear),
            "power1" | "quad" => Curve::Power1,
            "power2" | "cubic" => Curve::Power2,
            "power3" | "quart" => Curve::Power3,
            "power4" | "quint" | "strong" => Curve::Power4,
            "sine" => Curve::Sine,
            _ => return Err(err()),
        };
        match dir {
            "in" => Ok(Self::In(curve)),
            "out" => Ok(Self::Out(curve)),
            "inOut" => Ok(Self::InOut(curve)),
            _ => Err(err()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Ease {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// End value of one animated property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Goal {
    /// Absolute target value.
    To(f64),
    /// Relative to the value read when the tween starts (the `+=` form).
    By(f64),
}

impl Goal {
    /// Resolve against the start value.
    pub fn end(self, start: f64) -> f64 {
        match self {
            Self::To(v) => v,
            Self::By(dv) => start + dv,
        }
    }
}

/// One animation leg.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<P> {
    /// Seconds from start to end. Zero completes on the first frame.
    pub duration: f64,
    /// Seconds to wait before reading start values.
    pub delay: f64,
    /// Easing applied to progress.
    pub ease: Ease,
    /// Kill active tweens that drive any of the same properties.
    pub overwrite: bool,
    /// Driven properties and their goals.
    pub props: SmallVec<[(P, Goal); 2]>,
}

impl<P> Tween<P> {
    /// A tween of `duration` seconds with no properties yet.
    ///
    /// Negative and non-finite durations are treated as zero.
    pub fn new(duration: f64) -> Self {
        Self {
            duration: non_negative(duration),
            delay: 0.0,
            ease: Ease::default(),
            overwrite: false,
            props: SmallVec::new(),
        }
    }

    /// Set the start delay.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = non_negative(delay);
        self
    }

    /// Set the ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Kill overlapping tweens when this one is issued.
    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Drive `prop` to `value`.
    pub fn to(mut self, prop: P, value: f64) -> Self {
        self.props.push((prop, Goal::To(value)));
        self
    }

    /// Drive `prop` by `delta` from wherever it is when the tween starts.
    pub fn by(mut self, prop: P, delta: f64) -> Self {
        self.props.push((prop, Goal::By(delta)));
        self
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Handle to a tween issued to an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// Progress notifications produced by [`TweenEngine::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TweenEvent {
    /// The tween wrote new values this frame.
    Update(TweenId),
    /// The tween reached its end. Follows its final `Update`.
    Complete(TweenId),
}

/// Something whose numeric properties an engine can read and write.
pub trait Animatable<P> {
    /// Current value of `prop`.
    fn get(&self, prop: &P) -> f64;
    /// Write `value` to `prop`.
    fn set(&mut self, prop: &P, value: f64);
}

/// An animation engine.
///
/// Engines own timing only. Values live in the [`Animatable`] passed to each
/// [`advance`](Self::advance) call, so an engine may be shared by any number of targets over
/// its lifetime as long as each frame is advanced against the right one.
pub trait TweenEngine<P> {
    /// Start tracking `tween`.
    fn animate(&mut self, tween: Tween<P>) -> TweenId;
    /// Stop `id` without completing it. Returns whether it was active.
    fn kill(&mut self, id: TweenId) -> bool;
    /// Whether `id` has neither completed nor been killed.
    fn is_active(&self, id: TweenId) -> bool;
    /// Whether no tween is active.
    fn is_idle(&self) -> bool;
    /// Advance time by `dt` seconds, writing values into `target` and appending events in
    /// issue order.
    fn advance(&mut self, dt: f64, target: &mut dyn Animatable<P>, events: &mut Vec<TweenEvent>);
}

#[derive(Debug)]
struct Running<P> {
    id: TweenId,
    tween: Tween<P>,
    elapsed: f64,
    /// `(start, end)` per property, read when the delay has elapsed.
    span: Option<SmallVec<[(f64, f64); 2]>>,
}

/// Deterministic engine: tweens advance only when [`TweenEngine::advance`] is called.
///
/// Tweens are processed in issue order, so when two tweens drive the same property in the
/// same frame the later one wins.
#[derive(Debug)]
pub struct Timeline<P> {
    next: u64,
    running: Vec<Running<P>>,
}

impl<P> Default for Timeline<P> {
    fn default() -> Self {
        Self {
            next: 0,
            running: Vec::new(),
        }
    }
}

impl<P> Timeline<P> {
    /// An empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Whether no tween is active.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

impl<P: PartialEq> TweenEngine<P> for Timeline<P> {
    fn animate(&mut self, tween: Tween<P>) -> TweenId {
        let id = TweenId(self.next);
        self.next += 1;
        if tween.overwrite {
            self.running.retain(|r| {
                !r.tween
                    .props
                    .iter()
                    .any(|(p, _)| tween.props.iter().any(|(q, _)| p == q))
            });
        }
        self.running.push(Running {
            id,
            tween,
            elapsed: 0.0,
            span: None,
        });
        id
    }

    fn kill(&mut self, id: TweenId) -> bool {
        let before = self.running.len();
        self.running.retain(|r| r.id != id);
        before != self.running.len()
    }

    fn is_active(&self, id: TweenId) -> bool {
        self.running.iter().any(|r| r.id == id)
    }

    fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    fn advance(&mut self, dt: f64, target: &mut dyn Animatable<P>, events: &mut Vec<TweenEvent>) {
        let dt = non_negative(dt);
        self.running.retain_mut(|r| {
            r.elapsed += dt;
            if r.elapsed < r.tween.delay {
                return true;
            }
            let span = r.span.get_or_insert_with(|| {
                r.tween
                    .props
                    .iter()
                    .map(|(p, goal)| {
                        let start = target.get(p);
                        (start, goal.end(start))
                    })
                    .collect()
            });
            let local = r.elapsed - r.tween.delay;
            let t = if r.tween.duration > 0.0 {
                (local / r.tween.duration).min(1.0)
            } else {
                1.0
            };
            let k = r.tween.ease.apply(t);
            for ((prop, _), (start, end)) in r.tween.props.iter().zip(span.iter()) {
                let value = if t >= 1.0 {
                    *end
                } else {
                    start + (end - start) * k
                };
                target.set(prop, value);
            }
            events.push(TweenEvent::Update(r.id));
            if t >= 1.0 {
                events.push(TweenEvent::Complete(r.id));
                false
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq)]
    enum P {
        A,
        B,
    }

    #[derive(Default)]
    struct Values {
        a: f64,
        b: f64,
    }

    impl Animatable<P> for Values {
        fn get(&self, prop: &P) -> f64 {
            match prop {
                P::A => self.a,
                P::B => self.b,
            }
        }

        fn set(&mut self, prop: &P, value: f64) {
            match prop {
                P::A => self.a = value,
                P::B => self.b = value,
            }
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn eases_hit_their_endpoints() {
        let eases = [
            Ease::Linear,
            Ease::In(Curve::Power1),
            Ease::Out(Curve::Power2),
            Ease::InOut(Curve::Power3),
            Ease::InOut(Curve::Power4),
            Ease::Out(Curve::Sine),
            Ease::InOut(Curve::Sine),
        ];
        for ease in eases {
            assert!(close(ease.apply(0.0), 0.0), "{ease}");
            assert!(close(ease.apply(1.0), 1.0), "{ease}");
        }
        assert!(close(Ease::InOut(Curve::Power2).apply(0.5), 0.5));
        assert!(Ease::Out(Curve::Power4).apply(0.2) > 0.5);
        assert!(Ease::In(Curve::Power4).apply(0.5) < 0.1);
    }

    #[test]
    fn ease_names_round_trip_through_display() {
        for name in ["none", "power1.in", "power2.out", "power4.inOut", "sine.inOut"] {
            let ease: Ease = name.parse().unwrap();
            assert_eq!(ease.to_string(), name);
        }
        assert_eq!("linear".parse::<Ease>(), Ok(Ease::Linear));
        assert_eq!("sine".parse::<Ease>(), Ok(Ease::Out(Curve::Sine)));
        assert_eq!(
            "bounce.out".parse::<Ease>(),
            Err(ParseEaseError("bounce.out".into()))
        );
        assert!("power2.sideways".parse::<Ease>().is_err());
    }

    #[test]
    fn to_goal_reaches_value_on_completion() {
        let mut tl = Timeline::new();
        let mut v = Values::default();
        let id = tl.animate(Tween::new(1.0).ease(Ease::Linear).to(P::A, 10.0));
        let mut events = Vec::new();

        tl.advance(0.25, &mut v, &mut events);
        assert!(close(v.a, 2.5));
        assert_eq!(events, vec![TweenEvent::Update(id)]);

        events.clear();
        tl.advance(1.0, &mut v, &mut events);
        assert_eq!(v.a, 10.0);
        assert_eq!(
            events,
            vec![TweenEvent::Update(id), TweenEvent::Complete(id)]
        );
        assert!(!tl.is_active(id));
        assert!(tl.is_idle());
    }

    #[test]
    fn by_goal_reads_start_after_delay() {
        let mut tl = Timeline::new();
        let mut v = Values { a: 1.0, b: 0.0 };
        tl.animate(Tween::new(0.5).delay(0.5).by(P::A, 4.0));
        let mut events = Vec::new();

        tl.advance(0.25, &mut v, &mut events);
        assert!(events.is_empty());
        // Changed during the delay; the tween must start from here.
        v.a = 6.0;
        tl.advance(1.0, &mut v, &mut events);
        assert_eq!(v.a, 10.0);
    }

    #[test]
    fn zero_duration_completes_on_first_advance() {
        let mut tl = Timeline::new();
        let mut v = Values::default();
        let id = tl.animate(Tween::new(0.0).to(P::B, 3.0));
        let mut events = Vec::new();
        tl.advance(0.0, &mut v, &mut events);
        assert_eq!(v.b, 3.0);
        assert_eq!(
            events,
            vec![TweenEvent::Update(id), TweenEvent::Complete(id)]
        );
    }

    #[test]
    fn overwrite_kills_tweens_on_shared_properties() {
        let mut tl = Timeline::new();
        let a = tl.animate(Tween::new(1.0).to(P::A, 1.0));
        let b = tl.animate(Tween::new(1.0).to(P::B, 1.0));
        let c = tl.animate(Tween::new(1.0).to(P::A, 2.0).overwrite());
        assert!(!tl.is_active(a));
        assert!(tl.is_active(b));
        assert!(tl.is_active(c));
        assert_eq!(tl.len(), 2);
    }

    #[test]
    fn later_tween_wins_on_the_same_frame() {
        let mut tl = Timeline::new();
        let mut v = Values::default();
        tl.animate(Tween::new(0.0).to(P::A, 1.0));
        tl.animate(Tween::new(0.0).to(P::A, 2.0));
        tl.advance(0.0, &mut v, &mut Vec::new());
        assert_eq!(v.a, 2.0);
    }

    #[test]
    fn kill_reports_whether_active() {
        let mut tl: Timeline<P> = Timeline::new();
        let id = tl.animate(Tween::new(1.0));
        assert!(tl.kill(id));
        assert!(!tl.kill(id));
    }

    #[test]
    fn invalid_durations_clamp_to_zero() {
        let t: Tween<P> = Tween::new(f64::NAN).delay(-1.0);
        assert_eq!(t.duration, 0.0);
        assert_eq!(t.delay, 0.0);
    }
}
