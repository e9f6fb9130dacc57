// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene: an arena of rectangular nodes with scrolling and hit testing.

use kurbo::{Point, Rect, Vec2};
use understudy_player::{AvatarFrame, AvatarStyle, ComputedOverflow};

use crate::types::{AvatarId, EventRecord, LocalNode, NodeFlags, NodeId, StyleSheetId};

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    local: LocalNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    scroll: Vec2,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            local,
            parent: None,
            children: Vec::new(),
            scroll: Vec2::ZERO,
        }
    }

    /// Largest scroll offset on each axis.
    fn max_scroll(&self) -> Vec2 {
        let size = self.local.bounds.size();
        let content = self.local.content_size.unwrap_or(size);
        Vec2::new(
            (content.width - size.width).max(0.0),
            (content.height - size.height).max(0.0),
        )
    }
}

/// The avatar node a player created.
#[derive(Clone, Debug, PartialEq)]
pub struct Avatar {
    /// Inline style it was created with.
    pub style: AvatarStyle,
    /// Latest rendered frame.
    pub frame: Option<AvatarFrame>,
    /// Number of renders.
    pub renders: usize,
}

/// A headless document.
///
/// Nodes are axis-aligned boxes positioned in their parent's content coordinates. Scrolling a
/// node shifts its descendants; overflow other than `visible` clips them for hit testing.
/// Hit testing picks the highest `z_index`, then the deepest node, then the later node in
/// document order.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understudy_scene::{LocalNode, Scene};
///
/// let mut scene = Scene::new();
/// let body = scene.insert(None, LocalNode::new("body", Rect::new(0.0, 0.0, 800.0, 600.0)));
/// let button = scene.insert(Some(body), LocalNode::new("button", Rect::new(10.0, 10.0, 90.0, 40.0)));
/// scene.set_body(body);
///
/// assert_eq!(scene.hit_test(Point::new(20.0, 20.0)), Some(button));
/// assert_eq!(scene.hit_test(Point::new(200.0, 200.0)), Some(body));
/// assert_eq!(scene.hit_test(Point::new(900.0, 20.0)), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: Vec<Option<Node>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
    body: Option<NodeId>,
    scrolling_element: Option<NodeId>,
    pub(crate) events: Vec<EventRecord>,
    pub(crate) avatars: Vec<Option<Avatar>>,
    pub(crate) style_sheets: Vec<Option<String>>,
    pub(crate) wheel_blocked: bool,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            (idx, generation)
        } else {
            self.nodes.push(Some(Node::new(1, local)));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        let id = NodeId::new(idx as u32, generation);
        match parent.filter(|p| self.is_alive(*p)) {
            Some(p) => {
                if let Some(n) = self.node_mut(id) {
                    n.parent = Some(p);
                }
                if let Some(n) = self.node_mut(p) {
                    n.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    /// Remove a node and its subtree.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let parent = node.parent;
        let children = node.children.clone();
        for child in children {
            self.remove(child);
        }
        match parent {
            Some(p) => {
                if let Some(n) = self.node_mut(p) {
                    n.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
        if self.body == Some(id) {
            self.body = None;
        }
        if self.scrolling_element == Some(id) {
            self.scrolling_element = None;
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a node, or an empty slice if it is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| &n.children)
    }

    /// Local data of a live node.
    pub fn local(&self, id: NodeId) -> Option<&LocalNode> {
        self.node(id).map(|n| &n.local)
    }

    /// Debug label of a live node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.local(id).map(|l| l.name.as_str())
    }

    /// First live node with the given label, in document order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if node.local.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Mark `id` as the document body. Scroll-target walks stop there.
    pub fn set_body(&mut self, id: NodeId) {
        self.body = Some(id);
    }

    /// The document body.
    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// Mark `id` as the element that scrolls the viewport.
    pub fn set_scrolling_element(&mut self, id: NodeId) {
        self.scrolling_element = Some(id);
    }

    /// The element that scrolls the viewport.
    pub fn scrolling_element(&self) -> Option<NodeId> {
        self.scrolling_element
    }

    /// Computed overflow of a node; `visible` for stale ids.
    pub fn overflow(&self, id: NodeId) -> ComputedOverflow {
        self.local(id).map(|l| l.overflow).unwrap_or_default()
    }

    /// Replace the local bounds of a node.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_mut(id) {
            n.local.bounds = bounds;
            n.scroll = clamp(n.scroll, n.max_scroll());
        }
    }

    /// Replace the flags of a node.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Current scroll offset of a node.
    pub fn scroll_position(&self, id: NodeId) -> Vec2 {
        self.node(id).map_or(Vec2::ZERO, |n| n.scroll)
    }

    /// Scroll a node, clamped to its scrollable range.
    pub fn scroll_node(&mut self, id: NodeId, offset: Vec2) {
        if let Some(n) = self.node_mut(id) {
            n.scroll = clamp(offset, n.max_scroll());
        }
    }

    /// Origin of `id`'s content box in client coordinates, after its own scroll.
    fn content_origin(&self, id: NodeId) -> Point {
        match self.world_bounds(id) {
            Some(rect) => rect.origin() - self.scroll_position(id),
            None => Point::ZERO,
        }
    }

    /// Border box of a node in client coordinates.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        let origin = node
            .parent
            .map_or(Point::ZERO, |p| self.content_origin(p));
        Some(node.local.bounds + origin.to_vec2())
    }

    /// Topmost visible, pickable node containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        // (node, parent content origin, clip, depth)
        let mut stack: Vec<(NodeId, Point, Option<Rect>, usize)> = self
            .roots
            .iter()
            .rev()
            .map(|&r| (r, Point::ZERO, None, 0))
            .collect();
        let mut best: Option<(NodeId, i32, usize)> = None;
        while let Some((id, origin, clip, depth)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if !node.local.flags.contains(NodeFlags::VISIBLE) {
                continue;
            }
            let rect = node.local.bounds + origin.to_vec2();
            let inside = rect.contains(point) && clip.is_none_or(|c| c.contains(point));
            if inside && node.local.flags.contains(NodeFlags::PICKABLE) {
                let z = node.local.z_index;
                let better = match best {
                    None => true,
                    Some((_, bz, bd)) => (z, depth) >= (bz, bd),
                };
                if better {
                    best = Some((id, z, depth));
                }
            }
            let overflow = node.local.overflow;
            let child_clip = if overflow == ComputedOverflow::default() {
                clip
            } else {
                Some(clip.map_or(rect, |c| c.intersect(rect)))
            };
            let child_origin = rect.origin() - node.scroll;
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|&c| (c, child_origin, child_clip, depth + 1)),
            );
        }
        best.map(|(id, _, _)| id)
    }

    /// Every native event received so far, in dispatch order.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    /// State of an avatar, if it has not been removed.
    pub fn avatar(&self, id: AvatarId) -> Option<&Avatar> {
        self.avatars.get(id.0).and_then(|a| a.as_ref())
    }

    /// Number of avatars currently attached.
    pub fn avatar_count(&self) -> usize {
        self.avatars.iter().flatten().count()
    }

    /// CSS text of a style sheet, if it has not been removed.
    pub fn style_sheet(&self, id: StyleSheetId) -> Option<&str> {
        self.style_sheets.get(id.0).and_then(|s| s.as_deref())
    }

    /// CSS text of every attached style sheet.
    pub fn style_sheets(&self) -> impl Iterator<Item = &str> {
        self.style_sheets.iter().flatten().map(String::as_str)
    }

    /// Whether real wheel input is blocked.
    pub fn is_wheel_blocked(&self) -> bool {
        self.wheel_blocked
    }
}

fn clamp(offset: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use understudy_player::Overflow;

    fn page() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let body = scene.insert(None, LocalNode::new("body", Rect::new(0.0, 0.0, 400.0, 300.0)));
        let list = scene.insert(
            Some(body),
            LocalNode::new("list", Rect::new(0.0, 0.0, 200.0, 100.0))
                .overflow(ComputedOverflow::both(Overflow::Auto))
                .content_size(Size::new(200.0, 500.0)),
        );
        let item = scene.insert(
            Some(list),
            LocalNode::new("item", Rect::new(0.0, 150.0, 200.0, 200.0)),
        );
        scene.set_body(body);
        (scene, body, list, item)
    }

    #[test]
    fn scrolling_moves_children_under_a_fixed_point() {
        let (mut scene, _, list, item) = page();
        let p = Point::new(50.0, 60.0);
        assert_eq!(scene.hit_test(p), Some(list));

        scene.scroll_node(list, Vec2::new(0.0, 100.0));
        assert_eq!(scene.hit_test(p), Some(item));
        assert_eq!(
            scene.world_bounds(item),
            Some(Rect::new(0.0, 50.0, 200.0, 100.0))
        );
    }

    #[test]
    fn overflow_clips_descendants() {
        let (scene, body, _, _) = page();
        // The item sits at y=150 inside a 100px tall scroller: clipped away.
        assert_eq!(scene.hit_test(Point::new(50.0, 160.0)), Some(body));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let (mut scene, body, list, _) = page();
        scene.scroll_node(list, Vec2::new(30.0, 1000.0));
        assert_eq!(scene.scroll_position(list), Vec2::new(0.0, 400.0));
        scene.scroll_node(body, Vec2::new(0.0, 10.0));
        assert_eq!(scene.scroll_position(body), Vec2::ZERO);
    }

    #[test]
    fn z_index_beats_depth_and_later_sibling_wins_ties() {
        let mut scene = Scene::new();
        let root = scene.insert(None, LocalNode::new("root", Rect::new(0.0, 0.0, 100.0, 100.0)));
        let a = scene.insert(Some(root), LocalNode::new("a", Rect::new(0.0, 0.0, 50.0, 50.0)));
        let b = scene.insert(Some(root), LocalNode::new("b", Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Some(b));

        let overlay = scene.insert(
            None,
            LocalNode::new("overlay", Rect::new(0.0, 0.0, 20.0, 20.0)).z_index(5),
        );
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Some(overlay));

        scene.set_flags(overlay, NodeFlags::VISIBLE);
        scene.set_flags(b, NodeFlags::empty());
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0)), Some(a));
    }

    #[test]
    fn removal_invalidates_ids_and_subtrees() {
        let (mut scene, body, list, item) = page();
        scene.remove(list);
        assert!(!scene.is_alive(list));
        assert!(!scene.is_alive(item));
        assert!(scene.children_of(body).is_empty());

        let again = scene.insert(Some(body), LocalNode::new("again", Rect::ZERO));
        assert!(scene.is_alive(again));
        assert!(!scene.is_alive(item));
        assert_eq!(scene.find("again"), Some(again));
        assert_eq!(scene.find("item"), None);
    }
}
