//! End-to-end behaviour of expandable panels
//!
//! These tests drive whole panels through the public API the way a host
//! would: measure, click or hover, then tick frames.

use kurs_animation::VisualTarget;
use kurs_core::ContextScope;
use kurs_expandable::{
    CardConfig, ContentConfig, ExpandableConfig, LifecycleHooks, PanelBuilder, PanelConfig,
    PanelHost, Presence, Size, SizeSpec,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

const FRAME: Duration = Duration::from_micros(16_667);

fn tall_card() -> PanelConfig {
    PanelConfig {
        card: CardConfig {
            collapsed_size: SizeSpec::new(480.0, 260.0),
            expanded_size: SizeSpec::new(480.0, 520.0),
            ..CardConfig::default()
        },
        ..PanelConfig::default()
    }
}

#[test]
fn test_toggle_parity() {
    for initial in [false, true] {
        let config = PanelConfig {
            panel: ExpandableConfig {
                initial_expanded: initial,
                ..ExpandableConfig::default()
            },
            ..PanelConfig::default()
        };
        let mut panel = PanelBuilder::new(config).build(&ContextScope::root());

        for n in 1..=9u32 {
            panel.click();
            panel.tick(FRAME);
            assert_eq!(panel.is_expanded(), initial ^ (n % 2 == 1), "after {n} toggles");
        }
    }
}

#[test]
fn test_vertical_width_is_frozen() {
    let mut panel = PanelBuilder::new(tall_card()).build(&ContextScope::root());
    panel.measure_card(Size::new(300.0, 900.0));
    panel.click();

    let mut heights = Vec::new();
    for _ in 0..240 {
        panel.tick(FRAME);
        let size = panel.card().size();
        assert_eq!(size.width, 480.0);
        heights.push(size.height);
    }

    assert!(heights[0] > 260.0 && heights[0] < 520.0);
    assert_eq!(panel.card().target(), Size::new(480.0, 520.0));
    assert_eq!(*heights.last().unwrap(), 520.0);
}

#[test]
fn test_keep_mounted_content_is_never_removed() {
    let mut panel = PanelBuilder::new(PanelConfig::default())
        .content(ContentConfig::default().with_preset("fade").keep_mounted(), 0)
        .build(&ContextScope::root());

    for _ in 0..4 {
        panel.click();
        for _ in 0..60 {
            panel.tick(FRAME);
            assert!(panel.contents()[0].is_mounted());
        }
    }
}

#[test]
fn test_content_present_only_while_expanded() {
    let mut panel = PanelBuilder::new(PanelConfig::default())
        .content(ContentConfig::default().with_preset("fade"), 0)
        .build(&ContextScope::root());
    assert!(!panel.contents()[0].is_mounted());

    panel.click();
    panel.tick(FRAME);
    assert!(panel.contents()[0].is_mounted());

    panel.click();
    panel.tick(FRAME);
    // Exit still playing
    assert_eq!(panel.contents()[0].presence(), Presence::Exiting);

    for _ in 0..30 {
        panel.tick(FRAME);
    }
    assert!(!panel.contents()[0].is_mounted());
}

#[test]
fn test_stagger_children_offsets() {
    let mut panel = PanelBuilder::new(PanelConfig::default())
        .content(ContentConfig::default().staggered(0.1), 3)
        .build(&ContextScope::root());

    let content = &panel.contents()[0];
    let delays: Vec<f32> = (0..3).map(|i| content.child_delay(i).unwrap()).collect();
    assert!((delays[1] - delays[0] - 0.1).abs() < 1e-6);
    assert!((delays[2] - delays[0] - 0.2).abs() < 1e-6);

    panel.click();
    let hidden = VisualTarget::opacity(0.0).with_y(20.0);
    let mut started_at = [None; 3];
    for frame in 1..=60u32 {
        panel.tick(FRAME);
        for (i, visual) in panel.contents()[0].child_visuals().iter().enumerate() {
            if started_at[i].is_none() && *visual != hidden {
                started_at[i] = Some(frame);
            }
        }
    }

    let [a, b, c] = started_at.map(|f| f.expect("child started"));
    assert!(a < b && b < c);
    // 0.1s is six frames at 60fps
    assert!((5..=7).contains(&(b - a)));
    assert!((11..=13).contains(&(c - a)));
}

#[test]
fn test_hover_race_still_expands() {
    let mut config = PanelConfig::default();
    config.card.hover_to_expand = true;
    config.card.expand_delay = 500;
    let mut panel = PanelBuilder::new(config).build(&ContextScope::root());

    panel.hover_start();
    panel.tick(Duration::from_millis(200));
    panel.hover_end();
    panel.tick(Duration::from_millis(299));
    assert!(!panel.is_expanded());

    panel.tick(Duration::from_millis(1));
    assert!(panel.is_expanded());
}

#[test]
fn test_fade_preset_targets() {
    let config = ContentConfig::default().with_preset("fade");
    let targets = kurs_expandable::content::resolved_animation(&config).targets();
    assert_eq!(targets.initial, VisualTarget::opacity(0.0));
    assert_eq!(targets.animate, VisualTarget::opacity(1.0));
    assert_eq!(targets.exit, VisualTarget::opacity(0.0));
}

#[test]
fn test_double_toggle_restores_state_and_size() {
    let mut panel = PanelBuilder::new(tall_card()).build(&ContextScope::root());
    panel.measure_card(Size::new(480.0, 700.0));
    let before = panel.card().size();

    panel.click();
    for _ in 0..10 {
        panel.tick(FRAME);
    }
    panel.click();

    while !panel.is_settled() {
        panel.tick(FRAME);
    }
    assert!(!panel.is_expanded());
    assert_eq!(panel.card().target(), before);
    assert_eq!(panel.card().size(), before);
}

#[test]
fn test_interrupted_toggle_has_no_jump() {
    let mut panel = PanelBuilder::new(tall_card()).build(&ContextScope::root());
    panel.click();
    for _ in 0..8 {
        panel.tick(FRAME);
    }
    let before = panel.card().size().height;

    panel.click();
    panel.tick(FRAME);
    let after = panel.card().size().height;
    assert!((after - before).abs() < 40.0, "{before} -> {after}");
}

#[test]
fn test_controlled_panel_follows_owner() {
    let owner = Rc::new(Cell::new(false));
    let (r, w) = (owner.clone(), owner.clone());
    let starts = Rc::new(RefCell::new(Vec::new()));
    let (s1, s2) = (starts.clone(), starts.clone());

    let mut panel = PanelBuilder::new(PanelConfig::default())
        .controlled(move || r.get(), move |v| w.set(v))
        .hooks(
            LifecycleHooks::new()
                .on_expand_start(move || s1.borrow_mut().push("expand"))
                .on_collapse_start(move || s2.borrow_mut().push("collapse")),
        )
        .build(&ContextScope::root());

    panel.click();
    assert!(owner.get());

    // The owner collapses the panel on its own
    owner.set(false);
    for _ in 0..5 {
        panel.tick(FRAME);
    }
    assert!(!panel.is_expanded());
    assert_eq!(*starts.borrow(), vec!["expand", "collapse"]);
}

#[test]
fn test_initial_delay_holds_size_and_reveal() {
    let mut config = tall_card();
    config.panel.initial_delay = 0.2;
    let mut panel = PanelBuilder::new(config)
        .content(ContentConfig::default().with_preset("fade"), 0)
        .build(&ContextScope::root());

    panel.click();
    for _ in 0..10 {
        panel.tick(FRAME);
    }
    assert_eq!(panel.card().size().height, 260.0);
    assert_eq!(panel.contents()[0].visual(), VisualTarget::opacity(0.0));

    for _ in 0..10 {
        panel.tick(FRAME);
    }
    assert!(panel.card().size().height > 260.0);
}

#[test]
fn test_host_runs_many_cards_to_rest() {
    let mut host = PanelHost::new();
    let builder = PanelBuilder::new(tall_card())
        .content(ContentConfig::default().with_preset("slide-up").staggered(0.1), 4);
    let ids: Vec<_> = (0..6).map(|_| host.add(&builder)).collect();

    for id in ids.iter().step_by(2) {
        host.panel(*id).unwrap().click();
    }
    let frames = host.run_until_idle(2000);
    assert!(frames < 2000);

    for (n, id) in ids.iter().enumerate() {
        let panel = host.panel(*id).unwrap();
        assert_eq!(panel.is_expanded(), n % 2 == 0);
        let expected = if n % 2 == 0 { 520.0 } else { 260.0 };
        assert_eq!(panel.card().size().height, expected);
    }
}
