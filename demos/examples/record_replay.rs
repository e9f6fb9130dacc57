// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record a session with the studio, then replay the script on a headless page.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understudy_demos --example record_replay`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understudy_dispatch::PointerEventKind;
use understudy_player::{Player, PlayerOptions};
use understudy_scene::{LocalNode, NodeId, Scene};
use understudy_studio::{ClipboardError, KeyAction, Studio, StudioHost};
use ui_events::keyboard::{Key, Modifiers, NamedKey};

/// A browser tab as the studio sees it. The user scrolls it through a shared handle.
#[derive(Debug, Default)]
struct Tab {
    scroll_y: Rc<Cell<f64>>,
    clipboard: String,
}

impl StudioHost for Tab {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn location(&self) -> String {
        "https://example.com/signup".to_owned()
    }

    fn viewport(&self) -> Size {
        Size::new(800.0, 600.0)
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard = text.to_owned();
        Ok(())
    }

    fn attach(&mut self) {
        tracing::debug!("listening to the tab");
    }

    fn detach(&mut self) {
        tracing::debug!("no longer listening to the tab");
    }
}

fn record() -> Result<String, Box<dyn std::error::Error>> {
    let tab = Tab::default();
    let scroll = Rc::clone(&tab.scroll_y);
    let mut studio = Studio::start(tab);

    studio.pointer_moved(Point::new(120.0, 80.0));
    studio.clicked();
    studio.pointer_moved(Point::new(400.0, 300.0));
    studio.clicked();

    // The user scrolls the page, then registers the position with Meta.
    studio.pointer_moved(Point::new(400.0, 320.0));
    scroll.set(900.0);
    studio.key_down(&Key::Named(NamedKey::Meta), Modifiers::META)?;

    studio.pointer_moved(Point::new(400.0, 200.0));
    studio.clicked();

    let action = studio.key_down(&Key::Named(NamedKey::Escape), Modifiers::META)?;
    assert_eq!(action, KeyAction::Stopped, "Meta + Escape ends the session");
    Ok(studio.into_host().clipboard)
}

fn page() -> Scene {
    let mut scene = Scene::new();
    let html = scene.insert(
        None,
        LocalNode::new("html", Rect::new(0.0, 0.0, 800.0, 600.0))
            .content_size(Size::new(800.0, 2000.0)),
    );
    let body = scene.insert(Some(html), LocalNode::new("body", Rect::new(0.0, 0.0, 800.0, 2000.0)));
    scene.insert(Some(body), LocalNode::new("email", Rect::new(80.0, 60.0, 360.0, 100.0)));
    scene.insert(Some(body), LocalNode::new("plan", Rect::new(300.0, 260.0, 500.0, 340.0)));
    scene.insert(Some(body), LocalNode::new("submit", Rect::new(300.0, 1060.0, 500.0, 1140.0)));
    scene.set_body(body);
    scene.set_scrolling_element(html);
    scene
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let script = record()?;
    println!("{script}");

    let mut player: Player<NodeId, Scene> = Player::new(page(), PlayerOptions::new());
    let played = player.play_script(&script)?;
    let scene = player.dispose();
    println!("replayed {played} statements");
    for event in scene.events().iter().filter(|e| e.kind == PointerEventKind::Click) {
        println!(
            "click on {} at {:?}",
            scene.name(event.target).unwrap_or("?"),
            event.position
        );
    }
    Ok(())
}
