// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted walkthrough of a small headless page.
//!
//! Builds a page with a navigation bar and a scrolling list, wires framework handlers and hover
//! styles, plays a short tour with the player API and prints what the page saw.
//!
//! Run:
//! - `RUST_LOG=info cargo run -p understudy_demos --example walkthrough`
//! - `RUST_LOG=debug ...` also shows hover transitions.

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understudy_dispatch::{HandlerProp, PointerEventKind};
use understudy_player::{AnimateOptions, ComputedOverflow, Overflow, Player, PlayerOptions};
use understudy_scene::{Handlers, LocalNode, NodeId, PseudoStyles, Scene};

// Options as a host would pass them from its configuration.
const OPTIONS: &str = r#"{
    "hideCursor": true,
    "hideScrollbar": true,
    "verbose": true,
    "moveDamping": 0.12,
    "defaultAnimate": { "duration": 0.6, "ease": "power2.inOut" },
    "mouseStyle": { "backgroundColor": "rgba(255, 0, 80, 0.4)" }
}"#;

struct Page {
    scene: Scene,
    app: NodeId,
    nav: [NodeId; 3],
    list: NodeId,
}

fn page() -> Page {
    let mut scene = Scene::new();
    let html = scene.insert(
        None,
        LocalNode::new("html", Rect::new(0.0, 0.0, 1024.0, 768.0)),
    );
    let body = scene.insert(
        Some(html),
        LocalNode::new("body", Rect::new(0.0, 0.0, 1024.0, 768.0)),
    );
    let app = scene.insert(Some(body), LocalNode::new("app", Rect::new(0.0, 0.0, 1024.0, 768.0)));
    let bar = scene.insert(Some(app), LocalNode::new("nav", Rect::new(0.0, 0.0, 1024.0, 64.0)));
    let mut links = [bar; 3];
    for (i, name) in ["home", "pricing", "docs"].into_iter().enumerate() {
        let x = 24.0 + 120.0 * i as f64;
        links[i] = scene.insert(Some(bar), LocalNode::new(name, Rect::new(x, 16.0, x + 96.0, 48.0)));
    }
    let list = scene.insert(
        Some(app),
        LocalNode::new("list", Rect::new(24.0, 96.0, 424.0, 496.0))
            .overflow(ComputedOverflow::both(Overflow::Auto))
            .content_size(Size::new(400.0, 2000.0)),
    );
    for row in 0..40 {
        let y = 50.0 * f64::from(row);
        scene.insert(
            Some(list),
            LocalNode::new(&format!("row-{row}"), Rect::new(0.0, y, 400.0, y + 48.0)),
        );
    }
    scene.set_body(body);
    scene.set_scrolling_element(html);
    Page {
        scene,
        app,
        nav: links,
        list,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options: PlayerOptions = serde_json::from_str(OPTIONS)?;
    let Page {
        scene,
        app,
        nav,
        list,
    } = page();

    let mut handlers = Handlers::new().mount(app);
    for link in nav {
        handlers = handlers
            .record(link, HandlerProp::OnMouseEnter)
            .record(link, HandlerProp::OnMouseLeave);
    }
    let calls = handlers.log();
    let styles = PseudoStyles::preloaded();
    let forced = styles.forced();

    let mut player: Player<NodeId, Scene> =
        Player::new(scene, options).with_framework_bridge(handlers);
    player.init_hovers_hack(styles)?;
    player.init_react_events(Some(app));

    // Sweep the navigation bar.
    for link in nav {
        let bounds = player
            .document()
            .world_bounds(link)
            .ok_or("link vanished")?;
        let center = bounds.center();
        player.to(center.x, center.y, AnimateOptions::new());
        // Let the damped pointer settle too.
        player.finish_all();
        println!(
            "hovering {:<8} :hover forced = {}",
            player.document().name(link).unwrap_or("?"),
            forced.is_forced(link, ":hover")
        );
    }

    // Into the list, scroll it, and click a row.
    let id = player.to(200.0, 300.0, AnimateOptions::new().duration(0.8));
    player.finish(id);
    let id = player.scroll(0.0, 600.0, AnimateOptions::new().duration(1.2), None);
    player.finish(id);
    player.set_speed(2.0);
    let id = player.click(AnimateOptions::new());
    player.finish(id);
    let id = player.hide(AnimateOptions::new().duration(0.3));
    player.finish(id);
    player.finish_all();

    let hovered = player.hovered();
    let scene = player.dispose();
    println!(
        "list scrolled to {:?}, pointer over {:?}",
        scene.scroll_position(list),
        hovered.and_then(|n| scene.name(n))
    );
    for event in scene.events().iter().filter(|e| e.kind == PointerEventKind::Click) {
        println!("click on {}", scene.name(event.target).unwrap_or("?"));
    }
    println!("framework handlers ran {} times", calls.calls().len());
    Ok(())
}
