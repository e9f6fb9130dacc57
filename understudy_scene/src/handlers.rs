// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framework handler tables for scene nodes.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use hashbrown::{HashMap, HashSet};
use understudy_dispatch::{FrameworkBridge, HandlerProp, Phase, SyntheticEvent};

use crate::types::NodeId;

/// A framework-level handler.
pub type Handler = Box<dyn FnMut(&mut SyntheticEvent<'_, NodeId>)>;

/// One handler invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HandlerCall {
    /// Element whose handler ran.
    pub node: NodeId,
    /// Which handler.
    pub prop: HandlerProp,
    /// Phase relative to `node`.
    pub phase: Phase,
    /// Element the event was synthesized for.
    pub target: NodeId,
}

/// Shared view of the invocations made through a [`Handlers`] table.
///
/// Stays readable after the table has been moved into a player.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<HandlerCall>>>);

impl CallLog {
    /// Every invocation so far.
    pub fn calls(&self) -> Vec<HandlerCall> {
        self.0.borrow().clone()
    }

    /// Invocations of `prop`, as `(node, target)` pairs.
    pub fn of(&self, prop: HandlerProp) -> Vec<(NodeId, NodeId)> {
        self.0
            .borrow()
            .iter()
            .filter(|c| c.prop == prop)
            .map(|c| (c.node, c.target))
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A [`FrameworkBridge`] over per-node handler tables, as a component framework mounted at
/// some root would keep them.
///
/// Every invocation is also appended to the table's [`CallLog`].
#[derive(Default)]
pub struct Handlers {
    mounted: HashSet<NodeId>,
    table: HashMap<(NodeId, HandlerProp), Handler>,
    log: CallLog,
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("mounted", &self.mounted)
            .field("handlers", &self.table.len())
            .field("log", &self.log)
            .finish()
    }
}

impl Handlers {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `root` as a framework mount point.
    pub fn mount(mut self, root: NodeId) -> Self {
        self.mounted.insert(root);
        self
    }

    /// Register `handler` as `prop` on `node`, replacing any previous one.
    pub fn on(
        mut self,
        node: NodeId,
        prop: HandlerProp,
        handler: impl FnMut(&mut SyntheticEvent<'_, NodeId>) + 'static,
    ) -> Self {
        self.table.insert((node, prop), Box::new(handler));
        self
    }

    /// Register a handler that does nothing but get recorded.
    pub fn record(self, node: NodeId, prop: HandlerProp) -> Self {
        self.on(node, prop, |_| {})
    }

    /// A handle on this table's invocation log.
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl FrameworkBridge<NodeId> for Handlers {
    fn is_bound(&self, element: &NodeId) -> bool {
        self.mounted.contains(element)
    }

    fn invoke(
        &mut self,
        element: &NodeId,
        prop: HandlerProp,
        event: &mut SyntheticEvent<'_, NodeId>,
    ) -> bool {
        let Some(handler) = self.table.get_mut(&(*element, prop)) else {
            return false;
        };
        self.log.0.borrow_mut().push(HandlerCall {
            node: *element,
            prop,
            phase: event.phase,
            target: event.target,
        });
        handler(event);
        true
    }
}
