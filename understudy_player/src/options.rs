// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Player configuration.

use std::collections::BTreeMap;

use understudy_hover::HoverScope;

use crate::tween::Ease;

/// Style sheet applied when [`PlayerOptions::hide_scrollbar`] is set.
pub const HIDE_SCROLLBAR_CSS: &str = "
body::-webkit-scrollbar,
html::-webkit-scrollbar {
  display: none;
}
body, html {
  -ms-overflow-style: none;
  scrollbar-width: none;
}
";

/// Style sheet applied when [`PlayerOptions::hide_cursor`] is set.
pub const HIDE_CURSOR_CSS: &str = "
body, html, html > body {
  cursor: none !important;
}
";

/// Per-action animation parameters. Unset fields fall back to the player's defaults.
///
/// ```
/// use understudy_player::{AnimateOptions, Curve, Ease};
///
/// let call_site = AnimateOptions::new().duration(0.4);
/// let player_default = AnimateOptions::new().duration(2.0).ease(Ease::Linear);
/// let resolved = call_site.resolve(&player_default);
/// assert_eq!(resolved.duration, 0.4);
/// assert_eq!(resolved.delay, 0.0);
/// assert_eq!(resolved.ease, Ease::Linear);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct AnimateOptions {
    /// Seconds, before speed scaling.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub duration: Option<f64>,
    /// Seconds, before speed scaling.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub delay: Option<f64>,
    /// Easing curve.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub ease: Option<Ease>,
}

impl AnimateOptions {
    /// No overrides.
    pub const fn new() -> Self {
        Self {
            duration: None,
            delay: None,
            ease: None,
        }
    }

    /// Override the duration.
    pub const fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Override the delay.
    pub const fn delay(mut self, seconds: f64) -> Self {
        self.delay = Some(seconds);
        self
    }

    /// Override the ease.
    pub const fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.duration.is_none() && self.delay.is_none() && self.ease.is_none()
    }

    /// Fill unset fields from `defaults`, then from [`ResolvedAnimate::DEFAULT`].
    pub fn resolve(&self, defaults: &Self) -> ResolvedAnimate {
        let base = ResolvedAnimate::DEFAULT;
        ResolvedAnimate {
            duration: self.duration.or(defaults.duration).unwrap_or(base.duration),
            delay: self.delay.or(defaults.delay).unwrap_or(base.delay),
            ease: self.ease.or(defaults.ease).unwrap_or(base.ease),
        }
    }
}

/// Animation parameters with every field decided.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedAnimate {
    /// Seconds, before speed scaling.
    pub duration: f64,
    /// Seconds, before speed scaling.
    pub delay: f64,
    /// Easing curve.
    pub ease: Ease,
}

impl ResolvedAnimate {
    /// One second, no delay, `power4.inOut`.
    pub const DEFAULT: Self = Self {
        duration: 1.0,
        delay: 0.0,
        ease: Ease::InOut(crate::tween::Curve::Power4),
    };
}

/// Inline style of the avatar node: ordered `(property, value)` pairs using camelCase
/// property names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarStyle {
    entries: Vec<(String, String)>,
}

impl Default for AvatarStyle {
    /// A 20px translucent grey disc centered on the pointer, above everything, ignoring hits.
    fn default() -> Self {
        let entries = [
            ("position", "fixed"),
            ("top", "0px"),
            ("left", "0px"),
            ("width", "20px"),
            ("height", "20px"),
            ("borderRadius", "50%"),
            ("border", "1px solid grey"),
            ("backgroundColor", "rgba(0, 0, 0, 0.2)"),
            ("transform", "translate(-50%, -50%)"),
            ("pointerEvents", "none"),
            ("zIndex", "9999999"),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }
}

impl AvatarStyle {
    /// Default style with `overrides` applied. Existing properties keep their position.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut style = Self::default();
        for (property, value) in overrides {
            style.set(property, value);
        }
        style
    }

    /// Set one property.
    pub fn set(&mut self, property: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => value.clone_into(v),
            None => self.entries.push((property.to_owned(), value.to_owned())),
        }
    }

    /// Value of `property`, if set.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// All properties in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Construction options for a [`Player`](crate::Player).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct PlayerOptions {
    /// Insert [`HIDE_SCROLLBAR_CSS`].
    pub hide_scrollbar: bool,
    /// Insert [`HIDE_CURSOR_CSS`].
    pub hide_cursor: bool,
    /// Log every operation at `info`.
    pub verbose: bool,
    /// Block real mouse-wheel input while the player exists.
    pub prevent_mouse_wheel: bool,
    /// Player-wide animation defaults.
    pub default_animate: AnimateOptions,
    /// Avatar style overrides, applied over [`AvatarStyle::default`].
    pub mouse_style: BTreeMap<String, String>,
    /// Seconds the rendered pointer trails its target. `0` disables damping.
    pub move_damping: f64,
    /// Which elements receive hover transitions.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub hover_scope: HoverScope,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            hide_scrollbar: false,
            hide_cursor: false,
            verbose: false,
            prevent_mouse_wheel: false,
            default_animate: AnimateOptions::new(),
            mouse_style: BTreeMap::new(),
            move_damping: 0.0,
            hover_scope: HoverScope::AncestorChain,
        }
    }
}

impl PlayerOptions {
    /// Defaults: everything off, no damping, ancestor-chain hover.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`hide_scrollbar`](Self::hide_scrollbar).
    pub fn hide_scrollbar(mut self, on: bool) -> Self {
        self.hide_scrollbar = on;
        self
    }

    /// Set [`hide_cursor`](Self::hide_cursor).
    pub fn hide_cursor(mut self, on: bool) -> Self {
        self.hide_cursor = on;
        self
    }

    /// Set [`verbose`](Self::verbose).
    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }

    /// Set [`prevent_mouse_wheel`](Self::prevent_mouse_wheel).
    pub fn prevent_mouse_wheel(mut self, on: bool) -> Self {
        self.prevent_mouse_wheel = on;
        self
    }

    /// Set [`default_animate`](Self::default_animate).
    pub fn default_animate(mut self, options: AnimateOptions) -> Self {
        self.default_animate = options;
        self
    }

    /// Add one avatar style override.
    pub fn mouse_style(mut self, property: &str, value: &str) -> Self {
        self.mouse_style
            .insert(property.to_owned(), value.to_owned());
        self
    }

    /// Set [`move_damping`](Self::move_damping). Negative and non-finite values disable it.
    pub fn move_damping(mut self, seconds: f64) -> Self {
        self.move_damping = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        self
    }

    /// Set [`hover_scope`](Self::hover_scope).
    pub fn hover_scope(mut self, scope: HoverScope) -> Self {
        self.hover_scope = scope;
        self
    }

    /// Combined CSS of the requested override sheets, if any.
    pub fn override_css(&self) -> Option<String> {
        let sheets: Vec<&str> = [
            (self.hide_scrollbar, HIDE_SCROLLBAR_CSS),
            (self.hide_cursor, HIDE_CURSOR_CSS),
        ]
        .into_iter()
        .filter_map(|(on, css)| on.then_some(css))
        .collect();
        (!sheets.is_empty()).then(|| sheets.join("\n"))
    }

    /// The avatar style after applying [`mouse_style`](Self::mouse_style).
    pub fn avatar_style(&self) -> AvatarStyle {
        AvatarStyle::with_overrides(
            self.mouse_style
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }
}
