// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording [`HoverStyler`] for scenes.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashSet;
use understudy_player::{HoverStyler, ShimError};

use crate::types::NodeId;

#[derive(Debug, Default)]
struct State {
    script_url: Option<String>,
    styles_loaded: bool,
    forced: HashSet<(NodeId, String)>,
}

/// Shared view of the pseudo-class rules a [`PseudoStyles`] currently forces.
#[derive(Clone, Debug, Default)]
pub struct ForcedStyles(Rc<RefCell<State>>);

impl ForcedStyles {
    /// Whether the rules of `pseudo_class` are forced on `node`.
    pub fn is_forced(&self, node: NodeId, pseudo_class: &str) -> bool {
        self.0
            .borrow()
            .forced
            .contains(&(node, pseudo_class.to_owned()))
    }

    /// Number of nodes with forced rules.
    pub fn len(&self) -> usize {
        self.0.borrow().forced.len()
    }

    /// Whether nothing is forced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Where the shim's script was loaded from, if it had to be.
    pub fn script_url(&self) -> Option<String> {
        self.0.borrow().script_url.clone()
    }

    /// Whether the document's styles were indexed.
    pub fn styles_loaded(&self) -> bool {
        self.0.borrow().styles_loaded
    }
}

/// A styling shim that tracks which pseudo-class rules are forced on which nodes.
///
/// Loading can be made to fail to exercise the player's fallback path.
#[derive(Debug, Default)]
pub struct PseudoStyles {
    available: bool,
    script_failure: Option<String>,
    styles_failure: Option<String>,
    state: ForcedStyles,
}

impl PseudoStyles {
    /// A shim whose script still has to be loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A shim whose script is already present.
    pub fn preloaded() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// Make script loading fail with `reason`.
    pub fn fail_script(mut self, reason: &str) -> Self {
        self.script_failure = Some(reason.to_owned());
        self
    }

    /// Make style indexing fail with `reason`.
    pub fn fail_styles(mut self, reason: &str) -> Self {
        self.styles_failure = Some(reason.to_owned());
        self
    }

    /// A handle on the forced rules.
    pub fn forced(&self) -> ForcedStyles {
        self.state.clone()
    }
}

impl HoverStyler<NodeId> for PseudoStyles {
    fn is_available(&self) -> bool {
        self.available
    }

    fn load_script(&mut self, url: &str) -> Result<(), ShimError> {
        if let Some(reason) = &self.script_failure {
            return Err(ShimError::ScriptLoad {
                url: url.to_owned(),
                reason: reason.clone(),
            });
        }
        self.available = true;
        self.state.0.borrow_mut().script_url = Some(url.to_owned());
        Ok(())
    }

    fn load_document_styles(&mut self) -> Result<(), ShimError> {
        if let Some(reason) = &self.styles_failure {
            return Err(ShimError::Styles(reason.clone()));
        }
        self.state.0.borrow_mut().styles_loaded = true;
        Ok(())
    }

    fn toggle_style(&mut self, element: &NodeId, pseudo_class: &str, force: bool) {
        let mut state = self.state.0.borrow_mut();
        let key = (*element, pseudo_class.to_owned());
        if force {
            state.forced.insert(key);
        } else {
            state.forced.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_tracks_forced_rules() {
        let mut styles = PseudoStyles::preloaded();
        let forced = styles.forced();
        let node = NodeId::new(1, 1);

        styles.toggle_style(&node, ":hover", true);
        assert!(forced.is_forced(node, ":hover"));
        styles.toggle_style(&node, ":hover", false);
        assert!(forced.is_empty());
    }

    #[test]
    fn failures_are_reported() {
        let mut styles = PseudoStyles::new().fail_script("offline");
        assert_eq!(
            styles.load_script("https://example.invalid/shim.js"),
            Err(ShimError::ScriptLoad {
                url: "https://example.invalid/shim.js".to_owned(),
                reason: "offline".to_owned(),
            })
        );

        let mut styles = PseudoStyles::preloaded().fail_styles("cross-origin sheet");
        assert_eq!(
            styles.load_document_styles(),
            Err(ShimError::Styles("cross-origin sheet".to_owned()))
        );
    }
}
