// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Document`] implementation for [`Scene`].

use kurbo::{Point, Vec2};
use understudy_dispatch::{EventTarget, NativeEvent};
use understudy_hover::ParentLookup;
use understudy_player::{AvatarFrame, AvatarStyle, ComputedOverflow, Document};

use crate::scene::{Avatar, Scene};
use crate::types::{AvatarId, EventRecord, NodeId, StyleSheetId};

impl ParentLookup<NodeId> for Scene {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }
}

impl EventTarget<NodeId> for Scene {
    fn dispatch_event(&mut self, target: NodeId, event: &mut NativeEvent<NodeId>) {
        self.events.push(EventRecord {
            kind: event.kind(),
            target,
            position: event.position(),
            default_prevented: event.default_prevented(),
        });
    }
}

impl Document<NodeId> for Scene {
    type Avatar = AvatarId;
    type StyleSheet = StyleSheetId;

    fn element_from_point(&self, point: Point) -> Option<NodeId> {
        self.hit_test(point)
    }

    fn body(&self) -> Option<NodeId> {
        Self::body(self)
    }

    fn scrolling_element(&self) -> Option<NodeId> {
        Self::scrolling_element(self)
    }

    fn overflow(&self, element: NodeId) -> ComputedOverflow {
        Self::overflow(self, element)
    }

    fn scroll_offset(&self, element: NodeId) -> Vec2 {
        self.scroll_position(element)
    }

    fn set_scroll_offset(&mut self, element: NodeId, offset: Vec2) {
        self.scroll_node(element, offset);
    }

    fn create_avatar(&mut self, style: &AvatarStyle) -> AvatarId {
        self.avatars.push(Some(Avatar {
            style: style.clone(),
            frame: None,
            renders: 0,
        }));
        AvatarId(self.avatars.len() - 1)
    }

    fn render_avatar(&mut self, avatar: &AvatarId, frame: AvatarFrame) {
        if let Some(Some(a)) = self.avatars.get_mut(avatar.0) {
            a.frame = Some(frame);
            a.renders += 1;
        }
    }

    fn remove_avatar(&mut self, avatar: AvatarId) {
        if let Some(slot) = self.avatars.get_mut(avatar.0) {
            *slot = None;
        }
    }

    fn insert_style_sheet(&mut self, css: &str) -> StyleSheetId {
        self.style_sheets.push(Some(css.to_owned()));
        StyleSheetId(self.style_sheets.len() - 1)
    }

    fn remove_style_sheet(&mut self, sheet: StyleSheetId) {
        if let Some(slot) = self.style_sheets.get_mut(sheet.0) {
            *slot = None;
        }
    }

    fn set_wheel_blocked(&mut self, blocked: bool) {
        self.wheel_blocked = blocked;
    }
}
