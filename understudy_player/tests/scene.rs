// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the player on a headless scene.

use kurbo::{Point, Rect, Size, Vec2};
use understudy_dispatch::{HandlerProp, PointerEventKind};
use understudy_hover::HoverScope;
use understudy_player::{
    AnimateOptions, ComputedOverflow, Ease, Overflow, PSEUDO_STYLER_URL, Player, PlayerError,
    PlayerOptions, ShimError,
};
use understudy_scene::{Handlers, LocalNode, NodeId, PseudoStyles, Scene};

struct Page {
    scene: Scene,
    body: NodeId,
    a: NodeId,
    b: NodeId,
}

// body 0..400 × 0..300
// ├── a  20..100 × 20..100
// └── b 200..300 × 20..100
fn page() -> Page {
    let mut scene = Scene::new();
    let body = scene.insert(None, LocalNode::new("body", Rect::new(0.0, 0.0, 400.0, 300.0)));
    let a = scene.insert(Some(body), LocalNode::new("a", Rect::new(20.0, 20.0, 100.0, 100.0)));
    let b = scene.insert(Some(body), LocalNode::new("b", Rect::new(200.0, 20.0, 300.0, 100.0)));
    scene.set_body(body);
    Page { scene, body, a, b }
}

fn player(scene: Scene, options: PlayerOptions) -> Player<NodeId, Scene> {
    Player::new(scene, options)
}

fn quick() -> AnimateOptions {
    AnimateOptions::new().duration(0.3)
}

fn transitions(scene: &Scene) -> Vec<(PointerEventKind, NodeId)> {
    scene
        .events()
        .iter()
        .filter(|e| matches!(e.kind, PointerEventKind::Enter | PointerEventKind::Leave))
        .map(|e| (e.kind, e.target))
        .collect()
}

#[test]
fn moving_between_siblings_leaves_one_and_enters_the_other() {
    let Page { scene, body, a, b } = page();
    let mut player = player(scene, PlayerOptions::new());

    let id = player.to(50.0, 50.0, quick());
    player.finish(id);
    assert_eq!(player.hovered(), Some(a));

    let id = player.to(250.0, 50.0, quick());
    player.finish(id);
    assert_eq!(player.hovered(), Some(b));

    use PointerEventKind::{Enter, Leave};
    assert_eq!(
        transitions(player.document()),
        vec![(Enter, body), (Enter, a), (Leave, a), (Enter, b)]
    );
    assert!(
        player
            .document()
            .events()
            .iter()
            .any(|e| e.kind == PointerEventKind::Move && e.target == a),
        "moves are delivered to the element under the pointer"
    );
}

#[test]
fn leaving_the_document_leaves_the_whole_chain_leaf_first() {
    let Page { scene, body, b, .. } = page();
    let mut player = player(scene, PlayerOptions::new());
    let id = player.to(250.0, 50.0, quick());
    player.finish(id);
    player.document_mut().take_events();

    let id = player.to(500.0, 50.0, quick());
    player.finish(id);
    assert_eq!(player.hovered(), None);
    assert_eq!(
        transitions(player.document()),
        vec![(PointerEventKind::Leave, b), (PointerEventKind::Leave, body)]
    );
}

#[test]
fn target_only_scope_swaps_the_hit_element() {
    let Page { scene, body, a, .. } = page();
    let mut player = player(
        scene,
        PlayerOptions::new().hover_scope(HoverScope::TargetOnly),
    );
    let id = player.to(50.0, 50.0, quick());
    player.finish(id);

    use PointerEventKind::{Enter, Leave};
    assert_eq!(
        transitions(player.document()),
        vec![(Enter, body), (Leave, body), (Enter, a)]
    );
}

#[test]
fn framework_handlers_run_only_once_enabled() {
    let Page { scene, body, a, .. } = page();
    let handlers = Handlers::new()
        .mount(body)
        .record(a, HandlerProp::OnMouseEnter)
        .record(a, HandlerProp::OnMouseLeave)
        .record(body, HandlerProp::OnMouseMove);
    let log = handlers.log();
    let mut player = player(scene, PlayerOptions::new()).with_framework_bridge(handlers);

    let id = player.to(50.0, 50.0, quick());
    player.finish(id);
    assert!(log.calls().is_empty(), "framework delivery starts disabled");

    assert!(!player.init_react_events(Some(a)), "a is not a mount point");
    assert!(player.init_react_events(Some(body)));

    let id = player.to(250.0, 50.0, quick());
    player.finish(id);
    assert_eq!(log.of(HandlerProp::OnMouseLeave), vec![(a, a)]);
    assert!(log.of(HandlerProp::OnMouseEnter).is_empty());
    // Moves bubble: the body's handler sees moves targeted at its children.
    assert!(log.of(HandlerProp::OnMouseMove).contains(&(body, a)));

    let id = player.to(50.0, 50.0, quick());
    player.finish(id);
    assert_eq!(log.of(HandlerProp::OnMouseEnter), vec![(a, a)]);
}

#[test]
fn framework_handlers_can_prevent_the_native_default() {
    let Page { scene, body, a, .. } = page();
    let handlers = Handlers::new()
        .mount(body)
        .on(a, HandlerProp::OnMouseEnter, |e| e.prevent_default());
    let mut player = player(scene, PlayerOptions::new()).with_framework_bridge(handlers);
    assert!(player.init_react_events(Some(body)));

    let id = player.to(50.0, 50.0, quick());
    player.finish(id);
    let enter = player
        .document()
        .events()
        .iter()
        .find(|e| e.kind == PointerEventKind::Enter && e.target == a)
        .copied();
    assert_eq!(enter.map(|e| e.default_prevented), Some(true));
}

#[test]
fn hover_styles_follow_the_hovered_chain() {
    let Page { scene, body, a, b } = page();
    let styles = PseudoStyles::new();
    let forced = styles.forced();
    let mut player = player(scene, PlayerOptions::new());
    assert_eq!(player.init_hovers_hack(styles), Ok(()));
    assert_eq!(forced.script_url().as_deref(), Some(PSEUDO_STYLER_URL));
    assert!(forced.styles_loaded());

    let id = player.to(50.0, 50.0, quick());
    player.finish(id);
    assert!(forced.is_forced(a, ":hover"));
    assert!(forced.is_forced(body, ":hover"));

    let id = player.to(250.0, 50.0, quick());
    player.finish(id);
    assert!(!forced.is_forced(a, ":hover"));
    assert!(forced.is_forced(b, ":hover"));
    assert_eq!(forced.len(), 2);
}

#[test]
fn preloaded_styler_is_not_fetched_again() {
    let Page { scene, .. } = page();
    let styles = PseudoStyles::preloaded();
    let forced = styles.forced();
    let mut player = player(scene, PlayerOptions::new());
    assert_eq!(player.init_hovers_hack(styles), Ok(()));
    assert_eq!(forced.script_url(), None);
}

#[test]
fn failed_hover_shim_leaves_the_player_working() {
    let Page { scene, a, .. } = page();
    let styles = PseudoStyles::new().fail_script("offline");
    let forced = styles.forced();
    let mut player = player(scene, PlayerOptions::new());

    assert_eq!(
        player.init_hovers_hack(styles),
        Err(PlayerError::HoverShim(ShimError::ScriptLoad {
            url: PSEUDO_STYLER_URL.to_owned(),
            reason: "offline".to_owned(),
        }))
    );

    let id = player.to(50.0, 50.0, quick());
    player.finish(id);
    assert_eq!(player.hovered(), Some(a));
    assert!(forced.is_empty());
}

#[test]
fn click_targets_the_element_under_the_pointer() {
    let Page { scene, a, .. } = page();
    let mut player = player(scene, PlayerOptions::new());
    let id = player.to(50.0, 50.0, quick());
    player.finish(id);

    let hidden = player.hide(quick());
    player.finish(hidden);
    assert!(!player.is_visible());

    let click = player.click(AnimateOptions::new().duration(0.5));
    player.finish(click);
    let clicks: Vec<_> = player
        .document()
        .events()
        .iter()
        .filter(|e| e.kind == PointerEventKind::Click)
        .map(|e| (e.target, e.position))
        .collect();
    assert_eq!(clicks, vec![(a, Point::new(50.0, 50.0))]);

    let frame = player
        .document()
        .avatar(*player.avatar())
        .and_then(|avatar| avatar.frame);
    assert_eq!(frame.map(|f| f.scale), Some(1.0));
    assert_eq!(frame.map(|f| f.opacity), Some(0.0));
}

#[test]
fn scrolling_a_container_updates_hover_under_a_still_pointer() {
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

    let mut player = player(scene, PlayerOptions::new());
    let id = player.to(50.0, 60.0, quick());
    player.finish(id);
    assert_eq!(player.hovered(), Some(list));

    let id = player.scroll(0.0, 100.0, quick(), None);
    player.finish(id);
    assert_eq!(player.document().scroll_position(list), Vec2::new(0.0, 100.0));
    assert_eq!(player.hovered(), Some(item));
    assert_eq!(player.pointer().position(), Point::new(50.0, 60.0));
}

#[test]
fn scrolling_falls_back_to_the_scrolling_element() {
    let mut scene = Scene::new();
    let html = scene.insert(
        None,
        LocalNode::new("html", Rect::new(0.0, 0.0, 400.0, 300.0))
            .content_size(Size::new(400.0, 1000.0)),
    );
    let body = scene.insert(Some(html), LocalNode::new("body", Rect::new(0.0, 0.0, 400.0, 1000.0)));
    scene.set_body(body);

    let mut player = player(scene, PlayerOptions::new());
    let id = player.to(10.0, 10.0, quick());
    player.finish(id);

    let nothing = player.scroll_to(0.0, 250.0, quick(), None);
    assert!(player.is_finished(nothing), "no scroller, nothing to wait for");
    assert_eq!(player.document().scroll_position(html), Vec2::ZERO);

    player.document_mut().set_scrolling_element(html);
    let id = player.scroll_to(0.0, 250.0, quick(), None);
    player.finish(id);
    assert_eq!(player.document().scroll_position(html), Vec2::new(0.0, 250.0));
    assert_eq!(player.hovered(), Some(body));
}

#[test]
fn damping_trails_the_rendered_pointer() {
    let Page { scene, .. } = page();
    let mut player = player(scene, PlayerOptions::new().move_damping(0.5));
    let id = player.to(100.0, 0.0, AnimateOptions::new().duration(0.2));
    player.finish(id);

    let target = Point::new(100.0, 0.0);
    assert_eq!(player.pointer().position(), target);
    assert_ne!(player.effective_position(), target);
    assert!(!player.is_idle());

    player.finish_all();
    assert_eq!(player.pointer().damped_position(), target);
    assert_eq!(player.effective_position(), target);
}

#[test]
fn damped_pointer_renders_and_hovers_every_frame_of_a_move() {
    let Page { scene, body, a, .. } = page();
    let mut player = player(scene, PlayerOptions::new().move_damping(0.2));
    let avatar = *player.avatar();
    let renders = |p: &Player<NodeId, Scene>| {
        p.document().avatar(avatar).map_or(0, |av| av.renders)
    };

    // Diagonal through `a`; the trailing pointer stays on it.
    let id = player.to(
        250.0,
        250.0,
        AnimateOptions::new().duration(1.0).ease(Ease::Linear),
    );
    let mut frames = 0;
    let mut lagged = false;
    while !player.is_finished(id) {
        let before = renders(&player);
        player.tick(1.0 / 60.0);
        frames += 1;
        assert!(renders(&player) > before, "frame {frames} did not render");

        let damped = player.pointer().damped_position();
        lagged |= damped != player.pointer().position();
        let last_move = player
            .document()
            .events()
            .iter()
            .rev()
            .find(|e| e.kind == PointerEventKind::Move)
            .map(|e| e.position);
        assert_eq!(last_move, Some(damped), "frame {frames} moved elsewhere");
        assert_eq!(player.effective_position(), damped);
    }
    assert!(frames >= 60, "took {frames} frames");
    assert!(lagged, "the trailing pointer never lagged behind");

    use PointerEventKind::{Enter, Leave};
    assert_eq!(
        transitions(player.document()),
        vec![(Enter, body), (Enter, a), (Leave, a)],
        "the trailing pointer crossed `a` while the move was running"
    );
}

#[test]
fn speed_scales_later_actions() {
    let Page { scene, .. } = page();
    let mut player = player(scene, PlayerOptions::new());
    assert!(player.set_speed(2.0));
    assert!(!player.set_speed(0.0));
    assert!(!player.set_speed(f64::NAN));
    assert_eq!(player.speed(), 2.0);

    let id = player.to(100.0, 100.0, AnimateOptions::new().duration(1.0));
    let frames = player.finish(id);
    assert!((30..=31).contains(&frames), "took {frames} frames");
}

#[test]
fn dispose_restores_the_document() {
    let Page { scene, .. } = page();
    let mut player = player(
        scene,
        PlayerOptions::new()
            .hide_cursor(true)
            .hide_scrollbar(true)
            .prevent_mouse_wheel(true),
    );
    let doc = player.document();
    assert_eq!(doc.avatar_count(), 1);
    assert_eq!(doc.style_sheets().count(), 1);
    assert!(doc.is_wheel_blocked());

    let pending = player.to(100.0, 100.0, quick());
    assert!(!player.is_finished(pending));

    let scene = player.dispose();
    assert_eq!(scene.avatar_count(), 0);
    assert_eq!(scene.style_sheets().count(), 0);
    assert!(!scene.is_wheel_blocked());
}

#[test]
fn recorded_scripts_replay() {
    let Page { scene, a, b, .. } = page();
    let mut player = player(scene, PlayerOptions::new());
    let script = "\
const mouse = createVirtualMousePlayer({
\thideCursor: true,
})

await mouse.to(50, 50, { duration: .3 })
await mouse.click({ duration: .2 })

mouse.to(250, 50, { duration: .3 })
await mouse.delay(.1)
";
    assert_eq!(player.play_script(script), Ok(4));
    assert!(player.is_idle());
    assert_eq!(player.pointer().position(), Point::new(250.0, 50.0));
    assert_eq!(player.hovered(), Some(b));
    assert!(
        player
            .document()
            .events()
            .iter()
            .any(|e| e.kind == PointerEventKind::Click && e.target == a)
    );
}

#[test]
fn scripts_with_errors_do_not_play() {
    let Page { scene, .. } = page();
    let mut player = player(scene, PlayerOptions::new());
    let err = player
        .play_script("await mouse.to(10, 10)\nawait mouse.teleport(1, 2)")
        .unwrap_err();
    assert_eq!(err.line, 2);
    assert!(player.document().events().is_empty());
    assert_eq!(player.pointer().position(), Point::ZERO);
}
