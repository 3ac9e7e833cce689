//! Subcommand implementations

use crate::config::KursConfig;
use crate::SpecialArgs;
use anyhow::{Context, Result};
use kurs_catalog::{
    format_price, BannerLocal, Cart, Catalog, Course, JsonFileStore, Selection,
    SpecialCourseForm, EMPTY_CART_MESSAGE,
};
use kurs_expandable::{ContentConfig, PanelBuilder, PanelFrame, PanelHost, Size};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Upper bound on simulated frames per run
const MAX_FRAMES: usize = 10_000;

const CARD_WIDTH: f32 = 480.0;
const LINE_HEIGHT: f32 = 20.0;
const CHARS_PER_LINE: usize = 60;
const TAG_ROW_HEIGHT: f32 = 28.0;
const FEATURE_ROW_HEIGHT: f32 = 32.0;

fn now_millis() -> Result<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    Ok(elapsed.as_millis() as u64)
}

fn load_catalog() -> Result<Catalog> {
    Catalog::builtin().context("Failed to load the built-in catalog")
}

pub fn list() -> Result<()> {
    print_catalog(&load_catalog()?);
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    println!("{:<22} {:<28} {:<20} {:>10}", "ID", "Title", "Tag", "Price");
    for course in catalog.iter() {
        println!(
            "{:<22} {:<28} {:<20} {:>10}",
            course.id,
            course.title,
            course.headline_tag().unwrap_or("-"),
            format_price(course.price)
        );
    }
}

/// Natural heights of the details block and the feature list
fn content_heights(course: &Course) -> (f32, f32) {
    let lines = course.description.chars().count().div_ceil(CHARS_PER_LINE).max(1);
    let mut details = lines as f32 * LINE_HEIGHT;
    if !course.extra_tags().is_empty() {
        details += TAG_ROW_HEIGHT;
    }
    let features = course.features.len() as f32 * FEATURE_ROW_HEIGHT;
    (details, features)
}

pub fn expand(config: &KursConfig, id: &str, fps: u32, collapse: bool, hover: bool) -> Result<()> {
    let catalog = load_catalog()?;
    let course = catalog.require(id)?;

    let panels = &config.panels;
    let mut card = panels.card.clone();
    if hover {
        card.hover_to_expand = true;
    }
    let mut panel_config = panels.clone();
    panel_config.card = card;

    let features = ContentConfig {
        stagger: true,
        ..panels.content.clone()
    };
    let builder = PanelBuilder::new(panel_config)
        .content(panels.content.clone(), 0)
        .content(features, course.features.len());

    let mut host = PanelHost::new().with_fps(fps);
    let panel_id = host.add(&builder);

    let (details, feature_rows) = content_heights(course);
    let collapsed_height = panels
        .card
        .collapsed_size
        .height
        .unwrap_or_default();
    {
        let panel = host
            .panel_mut(panel_id)
            .context("Panel vanished from the host")?;
        panel.measure_card(Size::new(CARD_WIDTH, collapsed_height + details + feature_rows));
        panel.measure_content(0, Size::new(CARD_WIDTH, details))?;
        panel.measure_content(1, Size::new(CARD_WIDTH, feature_rows))?;
    }

    println!("{} ({})", course.title, course.course_duration);

    if collapse {
        interact(&mut host, panel_id, hover, true)?;
        let frames = host.run_until_idle(MAX_FRAMES);
        tracing::debug!(frames, "expanded before collapsing");
    }
    interact(&mut host, panel_id, hover, !collapse)?;

    let mut frames = 0;
    while host.has_active_animations() && frames < MAX_FRAMES {
        host.frame();
        frames += 1;
        if let Some(panel) = host.panel(panel_id) {
            print_frame(frames, &panel.frame());
        }
    }
    if host.has_active_animations() {
        tracing::warn!(frames, "card still moving after the frame limit");
    }

    let expanded = host.panel(panel_id).is_some_and(|p| p.is_expanded());
    println!(
        "{} after {frames} frames at {fps} fps",
        if expanded { "Expanded" } else { "Collapsed" }
    );
    Ok(())
}

/// Click, or move the pointer onto (`enter`) or off the card
fn interact(host: &mut PanelHost, id: kurs_animation::AnimationId, hover: bool, enter: bool) -> Result<()> {
    let panel = host.panel_mut(id).context("Panel vanished from the host")?;
    match (hover, enter) {
        (false, _) => panel.click(),
        (true, true) => panel.hover_start(),
        (true, false) => panel.hover_end(),
    }
    Ok(())
}

fn print_frame(n: usize, frame: &PanelFrame) {
    let mut line = format!(
        "{n:>5}  card {:>6.1} x {:>6.1}",
        frame.card.width, frame.card.height
    );
    for content in &frame.contents {
        line.push_str(&format!(
            "  | {:?} h={:.1} a={:.2}",
            content.presence,
            content.height,
            content.visual.resolved_opacity()
        ));
        if !content.children.is_empty() {
            let children: Vec<String> = content
                .children
                .iter()
                .map(|c| format!("{:.2}", c.resolved_opacity()))
                .collect();
            line.push_str(&format!(" [{}]", children.join(" ")));
        }
    }
    println!("{line}");
}

/// Parse `ID` or `ID:QTY`
pub fn parse_selection(input: &str) -> std::result::Result<(String, u32), String> {
    let (id, quantity) = match input.split_once(':') {
        Some((id, qty)) => {
            let qty: u32 = qty
                .parse()
                .map_err(|_| format!("invalid quantity '{qty}'"))?;
            (id, qty)
        }
        None => (input, 1),
    };
    if id.is_empty() {
        return Err("course id is empty".to_string());
    }
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    Ok((id.to_string(), quantity))
}

pub async fn cart(
    config: &KursConfig,
    select: &[(String, u32)],
    accommodation: u32,
    confirm: bool,
) -> Result<()> {
    let catalog = load_catalog()?;

    let mut selection = Selection::new();
    for (id, quantity) in select {
        if !catalog.contains(id) {
            tracing::warn!(course_id = %id, "ignoring unknown course");
            continue;
        }
        selection.select(id, *quantity);
    }
    let cart = Cart::with_accommodation(accommodation);

    let Some(summary) = cart.summarize(&catalog, &selection) else {
        println!("{EMPTY_CART_MESSAGE}");
        return Ok(());
    };
    println!("{summary}");
    println!(
        "{} course(s), {} person(s)",
        selection.selected_count(),
        selection.total_persons()
    );

    if confirm {
        println!("Processing payment...");
        tokio::time::sleep(Duration::from_millis(config.cart.confirm_delay)).await;
        tracing::info!(total = summary.grand_total, "payment confirmed");
        println!("Payment of {} confirmed", format_price(summary.grand_total));
    }
    Ok(())
}

impl From<SpecialArgs> for SpecialCourseForm {
    fn from(args: SpecialArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            price: args.price,
            course_duration: args.duration,
            level: args.level,
            rating: args.rating,
            image_url: args.image_url,
            graduates: args.graduates,
            tags: args.tags,
            reviews: args.reviews,
            features: args.features,
        }
    }
}

pub fn add(args: SpecialArgs) -> Result<()> {
    let mut catalog = load_catalog()?;
    let course = SpecialCourseForm::from(args)
        .submit(now_millis()?)
        .context("Special course rejected")?;
    let id = course.id.clone();
    catalog.add(course)?;
    tracing::info!(%id, "special course added");
    print_catalog(&catalog);
    Ok(())
}

pub fn banner(
    config: &KursConfig,
    close: bool,
    reset: bool,
    store: Option<PathBuf>,
    expires_days: Option<u32>,
) -> Result<()> {
    let mut banner: BannerLocal = config.banner.banner();
    if expires_days.is_some() {
        banner.expires_days = expires_days;
    }
    let mut store = JsonFileStore::new(store.unwrap_or_else(|| config.banner.store.clone()));
    let now = now_millis()?;

    if close {
        banner.close(&mut store, now);
    }
    if reset {
        banner
            .reset(&mut store)
            .with_context(|| format!("Failed to reset {}", store.path().display()))?;
    }

    let visible = banner.is_visible(&mut store, now);
    println!(
        "Banner '{}' is {}",
        banner.storage_key,
        if visible { "visible" } else { "dismissed" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("3").unwrap(), ("3".to_string(), 1));
        assert_eq!(parse_selection("3:4").unwrap(), ("3".to_string(), 4));
        assert!(parse_selection("3:0").is_err());
        assert!(parse_selection("3:x").is_err());
        assert!(parse_selection(":2").is_err());
    }

    #[test]
    fn test_content_heights() {
        let catalog = Catalog::builtin().unwrap();
        let a1 = catalog.get("1").unwrap();
        let (details, features) = content_heights(a1);
        assert!(details >= LINE_HEIGHT);
        assert_eq!(features, 4.0 * FEATURE_ROW_HEIGHT);

        let c1 = catalog.get("5").unwrap();
        assert_eq!(content_heights(c1).1, 0.0);
    }

    #[test]
    fn test_banner_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.json");
        let config = KursConfig::default();

        banner(&config, true, false, Some(path.clone()), None).unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(!config.banner.banner().is_visible(&mut store, now_millis().unwrap()));

        banner(&config, false, true, Some(path.clone()), None).unwrap();
        assert!(config.banner.banner().is_visible(&mut store, now_millis().unwrap()));
    }
}
