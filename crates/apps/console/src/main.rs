use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use foundation::time::Time;
use gazetteer::Gazetteer;
use nav::{NavContext, Phase, TransitionConfig, ViewMode};

/// Interactive drill-down through a country/province/region hierarchy.
#[derive(Parser)]
#[command(name = "console", about = "Hierarchical atlas navigation console")]
struct Args {
    /// Dataset file: a JSON object keyed by location id.
    #[arg(long, default_value = "crates/apps/console/data/locations.json")]
    data: PathBuf,
    /// Override the zoom-in cross-fade delay (seconds).
    #[arg(long)]
    zoom_delay: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let raw = fs::read_to_string(&args.data).expect("cannot read dataset file");
    let tree = Gazetteer::from_json(&raw).expect("dataset failed validation");
    info!("loaded {} locations, root {:?}", tree.len(), tree.root_id());

    let mut config = TransitionConfig::default();
    if let Some(delay) = args.zoom_delay {
        config.zoom_in_delay_s = delay;
    }
    let mut ctx = NavContext::new(tree, config);

    let started = Instant::now();

    render(&ctx);
    prompt();
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let now = Time(started.elapsed().as_secs_f64());
        ctx.tick(now);
        if !dispatch(&mut ctx, line.trim(), now) {
            break;
        }
        for event in ctx.drain_events() {
            info!("gen {} {}: {}", event.generation, event.kind, event.message);
        }
        render(&ctx);
        prompt();
    }
}

/// Returns `false` when the session should end.
fn dispatch(ctx: &mut NavContext, line: &str, now: Time) -> bool {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) => {}
        (Some("select"), Some(id)) => {
            if !ctx.select(id, now) {
                warn!("select {id:?} changed nothing");
            }
        }
        (Some("pin"), Some(id)) => {
            ctx.select_pin(id, now);
        }
        (Some("back"), _) => {
            if !ctx.back(now) {
                warn!("history is empty");
            }
        }
        (Some("next"), _) => ctx.next_asset(),
        (Some("prev"), _) => ctx.prev_asset(),
        (Some("close"), _) => ctx.close_focus(),
        (Some("ids"), _) => {
            for loc in ctx.tree().iter() {
                println!("  {:<20} {:?}", loc.id, loc.level);
            }
        }
        (Some("help"), _) => {
            println!("commands: select <id> | pin <id> | back | next | prev | close | ids | quit");
            println!("(an empty line just advances the transition clock)");
        }
        (Some("quit" | "exit"), _) => return false,
        (Some(other), _) => warn!("unknown command {other:?} (try help)"),
    }
    true
}

fn render(ctx: &NavContext) {
    let active = ctx.active_location();
    let mode = match ctx.view_mode() {
        ViewMode::National => "national",
        ViewMode::Province => "province",
        ViewMode::Projects => "projects",
    };
    let phase = match ctx.phase() {
        Phase::Idle => "terrain",
        Phase::ZoomingIn => "zooming in (terrain fading)",
        Phase::EmbedActive => "embed active",
    };
    let cam = ctx.camera();

    println!();
    println!("== {} [{}] — {} view, layer: {}", active.name, active.id, mode, phase);
    println!(
        "   camera x={:.0}% y={:.0}% zoom={:.1}",
        cam.x, cam.y, cam.zoom
    );
    match ctx.nearest_embed() {
        Some(url) => println!("   embed: {url}"),
        None => println!("   embed: (none)"),
    }
    if let Some(name) = ctx.back_label() {
        println!("   <- return to {name}");
    }

    let pins = ctx.visible_pins();
    if pins.is_empty() {
        println!("   pins: (suppressed)");
    } else {
        println!("   pins:");
        for pin in &pins {
            let marker = if pin.selected { "*" } else { " " };
            let kind = if pin.photo_card { "photo" } else { "pin" };
            println!("     {marker} {:<20} ({kind})", pin.location.id);
        }
    }

    let items = ctx.panel_items();
    if !items.is_empty() {
        println!("   panel:");
        for item in items {
            println!("       {:<20} {}", item.id, item.name);
        }
    }

    let focus = ctx.focus();
    if let Some(target) = focus.target() {
        println!(
            "   [focus] {} — asset {}/{}",
            target.name,
            focus.asset_index() + 1,
            target.ads.len().max(1)
        );
        if let Some(title) = focus.current_title() {
            println!("           {title}");
        }
        if let Some(image) = focus.current_image() {
            println!("           {image}");
        }
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
