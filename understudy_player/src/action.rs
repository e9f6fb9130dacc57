// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actions: what a public operation leaves behind for later frames.

use std::collections::VecDeque;

use crate::controller::{Hook, Prop};
use crate::tween::{Tween, TweenId};

/// Handle to an action started by a [`Player`](crate::Player) operation.
///
/// An action is finished once every tween leg it issued has completed. Use
/// [`Player::is_finished`](crate::Player::is_finished) to poll and
/// [`Player::finish`](crate::Player::finish) to drive frames until it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub(crate) u64);

/// One leg of an action.
#[derive(Debug)]
pub(crate) enum Step<K> {
    /// Issue a tween and wait for it to complete.
    Tween(Tween<Prop<K>>, Hook),
    /// Dispatch a click on the element captured when the action was issued.
    Click(Option<K>),
}

/// An action with legs still to run.
#[derive(Debug)]
pub(crate) struct Pending<K> {
    pub(crate) id: ActionId,
    pub(crate) steps: VecDeque<Step<K>>,
    /// Tween of the leg currently running.
    pub(crate) waiting: Option<TweenId>,
}

impl<K> Pending<K> {
    pub(crate) fn new(id: ActionId, steps: impl IntoIterator<Item = Step<K>>) -> Self {
        Self {
            id,
            steps: steps.into_iter().collect(),
            waiting: None,
        }
    }
}
