//! Life Map Headless Harness
//!
//! Validates camera, fog and session logic against the loaded config and
//! an input script. Runs entirely in-process, no renderer.
//!
//! Usage:
//!   cargo run -p lifemap-simtest
//!   cargo run -p lifemap-simtest -- --verbose
//!   cargo run -p lifemap-simtest -- path/to/script.json
//!
//! `LIFEMAP_CONFIG` points the harness at an alternative config file.

use lifemap_logic::config::{load_config_from_env, validate_config, MapConfig};
use lifemap_logic::constants::{MAP_HEIGHT, MAP_WIDTH, UNKNOWN_NODE_LABEL};
use lifemap_logic::fog::{is_foggy, FogModel};
use lifemap_logic::icons::{sector_icon, Icon};
use lifemap_logic::layout::{validate_layout, MapLayout};
use lifemap_logic::presentation::present_node;
use lifemap_logic::session::{InputEvent, MapSession, RenderSnapshot};
use lifemap_logic::viewport::{FocusChange, PointerButton, ViewportController};
use serde::Serialize;

// ── Input script (same JSON the integration tests replay) ──────────────
const SAMPLE_SCRIPT: &str = include_str!("../../../data/sample_session.json");

/// Used when the config leaves the seed unset, so runs are repeatable.
const HARNESS_SEED: u64 = 20_240_611;

const VIEWPORT: (f32, f32) = (1440.0, 900.0);

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

#[derive(Serialize)]
struct ReplaySummary<'a> {
    config_source: &'a str,
    events: usize,
    rejected: usize,
    mean_fog: f32,
    snapshot: RenderSnapshot,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let script_path = args.iter().find(|a| !a.starts_with("--"));
    println!("=== Life Map Harness ===\n");

    let (mut config, config_path) = load_config_from_env();
    config.seed.get_or_insert(HARNESS_SEED);
    let config_source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".into());

    let script = match script_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("cannot read script {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => SAMPLE_SCRIPT.to_string(),
    };

    let mut results = Vec::new();

    // 1. Config validation
    results.extend(validate_map_config(&config, verbose));

    // 2. Layout generation
    let session = MapSession::new(config.clone(), VIEWPORT.0, VIEWPORT.1);
    results.extend(validate_map_layout(session.layout(), verbose));

    // 3. Camera state machine
    results.extend(validate_camera(&config, session.layout(), verbose));

    // 4. Fog operators
    results.extend(validate_fog(&config, session.layout(), session.fog(), verbose));

    // 5. Presentation rules
    results.extend(validate_presentation(&config, session.layout(), verbose));

    // 6. Script replay
    let (replay_results, summary) = replay_script(session, &script, &config_source, verbose);
    results.extend(replay_results);

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    if let Some(summary) = summary {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("\n{}", json),
            Err(e) => log::warn!("could not serialize replay summary: {}", e),
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_map_config(config: &MapConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Config ---");
    let mut results = Vec::new();

    let errors = validate_config(config);
    results.push(check(
        "config_valid",
        errors.is_empty(),
        format!("{} errors: {:?}", errors.len(), errors),
    ));

    let cam = &config.camera;
    results.push(check(
        "config_default_scale_in_range",
        cam.clamp_scale(cam.default_scale) == cam.default_scale,
        format!(
            "default {} in [{}, {}]",
            cam.default_scale, cam.min_scale, cam.max_scale
        ),
    ));

    let levels = &config.fog;
    results.push(check(
        "config_thresholds_ordered",
        levels.cloud_threshold <= levels.foggy_threshold,
        format!(
            "cloud {} <= foggy {}",
            levels.cloud_threshold, levels.foggy_threshold
        ),
    ));

    if verbose {
        println!(
            "  scale [{}, {}], tilt [{}, {}], spin [{}, {}], relief {}",
            cam.min_scale,
            cam.max_scale,
            cam.min_tilt,
            cam.max_tilt,
            cam.min_spin,
            cam.max_spin,
            levels.relief_amount
        );
    }

    results
}

// ── 2. Layout ───────────────────────────────────────────────────────────

fn validate_map_layout(layout: &MapLayout, verbose: bool) -> Vec<TestResult> {
    println!("--- Layout ---");
    let mut results = Vec::new();

    let errors = validate_layout(layout);
    results.push(check(
        "layout_consistent",
        errors.is_empty(),
        format!("{} errors: {:?}", errors.len(), errors),
    ));

    results.push(check(
        "layout_sector_count",
        layout.sectors.len() == 10,
        format!("{} sectors", layout.sectors.len()),
    ));

    let empty: Vec<&str> = layout
        .sectors
        .iter()
        .filter(|s| layout.nodes_in_sector(&s.id).next().is_none())
        .map(|s| s.id.as_str())
        .collect();
    results.push(check(
        "layout_every_sector_populated",
        empty.is_empty(),
        format!("empty sectors: {:?}", empty),
    ));

    let margin = 400.0;
    let stray: Vec<&str> = layout
        .nodes
        .iter()
        .filter(|n| {
            n.x < -margin || n.y < -margin || n.x > MAP_WIDTH + margin || n.y > MAP_HEIGHT + margin
        })
        .map(|n| n.id.as_str())
        .collect();
    results.push(check(
        "layout_nodes_near_canvas",
        stray.is_empty(),
        format!("{} nodes, off-canvas: {:?}", layout.nodes.len(), stray),
    ));

    let unmapped: Vec<&str> = layout
        .sectors
        .iter()
        .filter(|s| sector_icon(&s.id) == Icon::FALLBACK)
        .map(|s| s.id.as_str())
        .collect();
    results.push(check(
        "layout_sector_icons",
        unmapped.is_empty(),
        format!("sectors on fallback icon: {:?}", unmapped),
    ));

    if verbose {
        for sector in &layout.sectors {
            println!(
                "  {:<12} {:>2} nodes  icon {}",
                sector.id,
                layout.nodes_in_sector(&sector.id).count(),
                sector_icon(&sector.id).name()
            );
        }
    }

    results
}

// ── 3. Camera ───────────────────────────────────────────────────────────

fn validate_camera(config: &MapConfig, layout: &MapLayout, verbose: bool) -> Vec<TestResult> {
    println!("--- Camera ---");
    let mut results = Vec::new();
    let cam_cfg = &config.camera;
    let new_vp = || ViewportController::new(cam_cfg.clone(), VIEWPORT.0, VIEWPORT.1);

    let vp = new_vp();
    let start = vp.camera();
    results.push(check(
        "camera_startup_centred",
        start.pan_x == (VIEWPORT.0 - MAP_WIDTH) / 2.0 && start.pan_y == (VIEWPORT.1 - MAP_HEIGHT) / 2.0,
        format!("pan ({}, {})", start.pan_x, start.pan_y),
    ));

    // Pan by pointer delta
    let mut vp = new_vp();
    vp.begin_interaction(PointerButton::Primary, (100.0, 100.0));
    vp.update_interaction((130.0, 85.0));
    vp.end_interaction();
    let panned = vp.camera();
    results.push(check(
        "camera_pan_tracks_pointer",
        panned.pan_x == start.pan_x + 30.0 && panned.pan_y == start.pan_y - 15.0,
        format!("pan ({}, {})", panned.pan_x, panned.pan_y),
    ));

    // Zoom sweep stays clamped
    let mut vp = new_vp();
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for delta in [-5000.0, -120.0, 40.0, 9000.0, -300.0, 120.0, -20_000.0] {
        vp.zoom(delta);
        lo = lo.min(vp.camera().scale);
        hi = hi.max(vp.camera().scale);
    }
    results.push(check(
        "camera_zoom_clamped",
        lo >= cam_cfg.min_scale && hi <= cam_cfg.max_scale,
        format!("observed [{:.3}, {:.3}]", lo, hi),
    ));

    // Rotation sweep stays clamped
    let mut vp = new_vp();
    vp.begin_interaction(PointerButton::Auxiliary, (0.0, 0.0));
    let mut rotation_ok = true;
    for step in 0..40 {
        let t = step as f32 * 97.0;
        vp.update_interaction((t.sin() * 900.0, t.cos() * 900.0));
        let c = vp.camera();
        rotation_ok &= (cam_cfg.min_tilt..=cam_cfg.max_tilt).contains(&c.tilt_x)
            && (cam_cfg.min_spin..=cam_cfg.max_spin).contains(&c.spin_z);
    }
    vp.end_interaction();
    results.push(check(
        "camera_rotation_clamped",
        rotation_ok,
        format!("final tilt {:.1}, spin {:.1}", vp.camera().tilt_x, vp.camera().spin_z),
    ));

    // Focus round trip on every sector
    let mut restored = 0;
    let mut locked = 0;
    for sector in &layout.sectors {
        let mut vp = new_vp();
        vp.zoom(-200.0);
        let free = vp.camera();
        if vp.focus_sector(sector) != FocusChange::Focused(sector.id.clone()) {
            continue;
        }
        let framed = vp.camera();
        vp.begin_interaction(PointerButton::Primary, (0.0, 0.0));
        vp.update_interaction((250.0, 250.0));
        vp.zoom(500.0);
        if vp.camera() == framed {
            locked += 1;
        }
        if vp.focus_sector(sector) == FocusChange::Cleared && vp.camera() == free {
            restored += 1;
        }
    }
    let n = layout.sectors.len();
    results.push(check(
        "camera_focus_locks",
        locked == n,
        format!("{}/{} sectors locked while focused", locked, n),
    ));
    results.push(check(
        "camera_focus_restores",
        restored == n,
        format!("{}/{} sectors restored the free camera", restored, n),
    ));

    // Reset idempotence
    let mut vp = new_vp();
    vp.zoom(-700.0);
    if let Some(sector) = layout.sectors.first() {
        vp.focus_sector(sector);
    }
    vp.reset_view();
    let once = vp.camera();
    vp.reset_view();
    results.push(check(
        "camera_reset_idempotent",
        once == vp.camera() && once == start && vp.focus().is_none(),
        format!("scale {}, tilt {}", once.scale, once.tilt_x),
    ));

    if verbose {
        println!(
            "  startup pan ({:.0}, {:.0}) scale {}",
            start.pan_x, start.pan_y, start.scale
        );
    }

    results
}

// ── 4. Fog ──────────────────────────────────────────────────────────────

fn validate_fog(
    config: &MapConfig,
    layout: &MapLayout,
    initial: &FogModel,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Fog ---");
    let mut results = Vec::new();
    let levels = &config.fog;

    let out_of_range: Vec<(&str, u8)> = initial
        .iter()
        .filter(|(_, l)| *l < levels.initial_min || *l >= levels.initial_max)
        .collect();
    results.push(check(
        "fog_initial_range",
        initial.len() == layout.nodes.len() && out_of_range.is_empty(),
        format!(
            "{} levels in [{}, {}), outliers {:?}",
            initial.len(),
            levels.initial_min,
            levels.initial_max,
            out_of_range
        ),
    ));

    // Relief walks down by the configured amount and floors at zero
    let mut fog = FogModel::from_levels([("probe", 50)]);
    let mut walk = Vec::new();
    for _ in 0..4 {
        match fog.relieve("probe", levels.relief_amount) {
            Ok(level) => walk.push(level),
            Err(e) => log::warn!("relief failed: {}", e),
        }
    }
    let expected: Vec<u8> = (1..=4)
        .map(|k| 50u8.saturating_sub(levels.relief_amount.saturating_mul(k)))
        .collect();
    results.push(check(
        "fog_relief_floor",
        walk == expected,
        format!("walk {:?}, expected {:?}", walk, expected),
    ));

    // Global adjustment saturates both ways
    let mut fog = initial.clone();
    fog.adjust_all(250);
    let all_max = fog.iter().all(|(_, l)| l == 100);
    fog.adjust_all(-250);
    let all_min = fog.iter().all(|(_, l)| l == 0);
    results.push(check(
        "fog_adjust_saturates",
        all_max && all_min,
        format!("max {}, min {}", all_max, all_min),
    ));

    // Unknown ids leave the model untouched
    let mut fog = initial.clone();
    let rejected = fog.set_level("no-such-node", 10).is_err();
    results.push(check(
        "fog_unknown_node_rejected",
        rejected && fog == *initial,
        format!("rejected {}", rejected),
    ));

    results.push(check(
        "fog_foggy_boundary",
        !is_foggy(levels.foggy_threshold, levels) && is_foggy(levels.foggy_threshold + 1, levels),
        format!("threshold {}", levels.foggy_threshold),
    ));

    if verbose {
        println!("  mean initial fog {:.1}", initial.average());
    }

    results
}

// ── 5. Presentation ─────────────────────────────────────────────────────

fn validate_presentation(config: &MapConfig, layout: &MapLayout, verbose: bool) -> Vec<TestResult> {
    println!("--- Presentation ---");
    let mut results = Vec::new();

    let mut leaks = Vec::new();
    let mut locked_out = Vec::new();
    for node in &layout.nodes {
        for level in [0u8, 40, 60, 61, 100] {
            let p = present_node(node, level, false, None, &config.fog);
            if p.foggy && p.display_label != UNKNOWN_NODE_LABEL {
                leaks.push(format!("{}@{}", node.id, level));
            }
            if !p.relief_control_enabled {
                locked_out.push(format!("{}@{}", node.id, level));
            }
        }
    }
    results.push(check(
        "presentation_identity_hidden",
        leaks.is_empty(),
        format!("label leaks: {:?}", leaks),
    ));
    results.push(check(
        "presentation_relief_always_enabled",
        locked_out.is_empty(),
        format!("slider disabled: {:?}", locked_out),
    ));

    let opacity_ok = layout.nodes.iter().all(|node| {
        (0..=100u8).all(|level| {
            let p = present_node(node, level, false, None, &config.fog);
            p.pin_opacity >= 0.5 && p.pin_opacity <= 1.0 && (0.0..=1.0).contains(&p.label_opacity)
        })
    });
    results.push(check(
        "presentation_opacity_bounds",
        opacity_ok,
        "pin in [0.5, 1], label in [0, 1]".into(),
    ));

    if verbose {
        println!("  {} nodes checked", layout.nodes.len());
    }

    results
}

// ── 6. Script replay ────────────────────────────────────────────────────

fn replay_script<'a>(
    mut session: MapSession,
    script: &str,
    config_source: &'a str,
    verbose: bool,
) -> (Vec<TestResult>, Option<ReplaySummary<'a>>) {
    println!("--- Script Replay ---");
    let mut results = Vec::new();

    let events: Vec<InputEvent> = match serde_json::from_str(script) {
        Ok(e) => e,
        Err(e) => {
            results.push(check(
                "replay_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return (results, None);
        }
    };
    results.push(check(
        "replay_parse",
        !events.is_empty(),
        format!("{} events", events.len()),
    ));

    let total = events.len();
    let mut rejected = 0;
    let mut limits_ok = true;
    let cam_cfg = session.config().camera.clone();
    for (i, event) in events.into_iter().enumerate() {
        let outcome = session.handle(event);
        if let Some(err) = outcome.rejected {
            rejected += 1;
            if verbose {
                println!("  event {} rejected: {}", i, err);
            }
        }
        let cam = session.viewport().camera();
        limits_ok &= (cam_cfg.min_scale..=cam_cfg.max_scale).contains(&cam.scale)
            && (cam_cfg.min_tilt..=cam_cfg.max_tilt).contains(&cam.tilt_x)
            && (cam_cfg.min_spin..=cam_cfg.max_spin).contains(&cam.spin_z);
    }

    results.push(check(
        "replay_all_accepted",
        rejected == 0,
        format!("{}/{} events rejected", rejected, total),
    ));
    results.push(check(
        "replay_camera_in_limits",
        limits_ok,
        "scale, tilt and spin clamped after every event".into(),
    ));
    results.push(check(
        "replay_fog_complete",
        session.fog().len() == session.layout().nodes.len(),
        format!(
            "{} levels for {} nodes",
            session.fog().len(),
            session.layout().nodes.len()
        ),
    ));

    let summary = ReplaySummary {
        config_source,
        events: total,
        rejected,
        mean_fog: session.fog().average(),
        snapshot: session.snapshot(),
    };
    (results, Some(summary))
}
