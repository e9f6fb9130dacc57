// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition resolution and per-frame hover state.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::chain::{ParentLookup, ancestor_chain};

/// Which elements take part in hover tracking.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverScope {
    /// The hit element and all of its ancestors.
    #[default]
    AncestorChain,
    /// Only the hit element itself.
    TargetOnly,
}

/// A single hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverEvent<K> {
    /// The element joined the hovered chain.
    Enter(K),
    /// The element left the hovered chain.
    Leave(K),
}

/// The minimal set of hover changes between two frames.
///
/// `leave` is ordered leaf → root and `enter` root → leaf.
/// The two sets are always disjoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transitions<K> {
    leave: Vec<K>,
    enter: Vec<K>,
}

impl<K> Default for Transitions<K> {
    fn default() -> Self {
        Self {
            leave: Vec::new(),
            enter: Vec::new(),
        }
    }
}

impl<K: Copy> Transitions<K> {
    /// Elements leaving the hovered chain, innermost first.
    pub fn leave(&self) -> &[K] {
        &self.leave
    }

    /// Elements entering the hovered chain, outermost first.
    pub fn enter(&self) -> &[K] {
        &self.enter
    }

    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.leave.is_empty() && self.enter.is_empty()
    }

    /// All transitions in application order: every leave, then every enter.
    pub fn events(&self) -> impl Iterator<Item = HoverEvent<K>> + '_ {
        self.leave
            .iter()
            .map(|&k| HoverEvent::Leave(k))
            .chain(self.enter.iter().map(|&k| HoverEvent::Enter(k)))
    }
}

/// Resolve transitions over full ancestor chains.
///
/// `to_enter = chain(current) − chain(previous)` and
/// `to_leave = chain(previous) − chain(current)`.
pub fn resolve<K, P>(previous: Option<K>, current: Option<K>, parents: &P) -> Transitions<K>
where
    K: Copy + Eq + Hash,
    P: ParentLookup<K>,
{
    resolve_scoped(HoverScope::AncestorChain, previous, current, parents)
}

/// Resolve transitions with an explicit [`HoverScope`].
pub fn resolve_scoped<K, P>(
    scope: HoverScope,
    previous: Option<K>,
    current: Option<K>,
    parents: &P,
) -> Transitions<K>
where
    K: Copy + Eq + Hash,
    P: ParentLookup<K>,
{
    let (old, new): (Vec<K>, Vec<K>) = match scope {
        HoverScope::AncestorChain => (
            ancestor_chain(previous, parents),
            ancestor_chain(current, parents),
        ),
        HoverScope::TargetOnly => (previous.into_iter().collect(), current.into_iter().collect()),
    };

    let old_set: HashSet<K> = old.iter().copied().collect();
    let new_set: HashSet<K> = new.iter().copied().collect();

    Transitions {
        leave: old
            .iter()
            .rev()
            .copied()
            .filter(|k| !new_set.contains(k))
            .collect(),
        enter: new
            .iter()
            .copied()
            .filter(|k| !old_set.contains(k))
            .collect(),
    }
}

/// Hover frame: the element under the pointer now and one frame ago.
///
/// Call [`HoverState::update`] on every pointer update, including updates where the
/// pointer did not move (for example while the content under it scrolls).
#[derive(Clone, Debug)]
pub struct HoverState<K> {
    scope: HoverScope,
    current: Option<K>,
    previous: Option<K>,
}

impl<K> Default for HoverState<K> {
    fn default() -> Self {
        Self::with_scope(HoverScope::default())
    }
}

impl<K> HoverState<K> {
    /// Create an empty hover state tracking full ancestor chains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty hover state with the given scope.
    pub fn with_scope(scope: HoverScope) -> Self {
        Self {
            scope,
            current: None,
            previous: None,
        }
    }

    /// The configured scope.
    pub fn scope(&self) -> HoverScope {
        self.scope
    }
}

impl<K: Copy + Eq + Hash> HoverState<K> {
    /// Record this frame's hit and return the transitions since the previous frame.
    pub fn update(&mut self, hit: Option<K>, parents: &impl ParentLookup<K>) -> Transitions<K> {
        self.previous = self.current;
        self.current = hit;
        if self.previous == self.current {
            return Transitions::default();
        }
        resolve_scoped(self.scope, self.previous, self.current, parents)
    }

    /// Element hovered in the latest frame.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Element hovered in the frame before the latest one.
    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    /// Forget both frames without emitting transitions.
    pub fn clear(&mut self) {
        self.current = None;
        self.previous = None;
    }
}
