// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor chains.

use alloc::vec::Vec;

/// Parent lookup used to reconstruct an element's ancestor chain.
///
/// Any `Fn(&K) -> Option<K>` closure is a [`ParentLookup`], which keeps call sites short
/// when the host already exposes a "parent element of" query.
pub trait ParentLookup<K> {
    /// Return the parent of `node`, or `None` at the document root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

impl<K, F> ParentLookup<K> for F
where
    F: Fn(&K) -> Option<K>,
{
    fn parent_of(&self, node: &K) -> Option<K> {
        self(node)
    }
}

/// A parent lookup for flat documents; every element is its own root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _: &K) -> Option<K> {
        None
    }
}

/// Collect `element` and all of its ancestors, ordered root → element.
///
/// An absent element yields an empty chain.
/// The walk stops at the first element without a parent; callers ensure acyclic ancestry.
pub fn ancestor_chain<K: Copy>(element: Option<K>, parents: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let Some(mut cur) = element else {
        return out;
    };
    loop {
        out.push(cur);
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn parents(n: &u32) -> Option<u32> {
        match *n {
            3 => Some(2),
            2 => Some(1),
            _ => None,
        }
    }

    #[test]
    fn chain_is_root_first() {
        assert_eq!(ancestor_chain(Some(3), &parents), vec![1, 2, 3]);
    }

    #[test]
    fn absent_element_has_empty_chain() {
        assert!(ancestor_chain(None, &parents).is_empty());
    }

    #[test]
    fn no_parent_yields_singleton() {
        assert_eq!(ancestor_chain(Some(3_u32), &NoParent), vec![3]);
    }
}
