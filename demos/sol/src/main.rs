//! Headless demo: drives the engine through a scripted session and prints
//! what a presentation layer would react to. Runs a synthetic 60 Hz clock,
//! so a multi-minute session finishes in well under a second.

use nova_engine::{
    commands, default_sol, Engine, InputEvent, OrbitalClock, SimConfig, SimEvent,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn describe(event: &SimEvent) -> Option<String> {
    use nova_engine::api::types::*;
    match event.kind {
        k if k == EVENT_FOCUS && event.a >= 0.0 => {
            Some(format!("focus -> body #{}", event.a as u32))
        }
        k if k == EVENT_FOCUS => Some("focus released".to_string()),
        k if k == EVENT_PHASE => Some(format!("lifecycle phase -> {}", event.a as u32)),
        k if k == EVENT_HOVER && event.a >= 0.0 => {
            Some(format!("hover -> body #{}", event.a as u32))
        }
        _ => None,
    }
}

fn run_frames(engine: &mut Engine, now_ms: &mut f64, count: usize) {
    for _ in 0..count {
        if engine.tick(*now_ms) {
            for event in engine.events() {
                if let Some(line) = describe(event) {
                    println!("[{:>9.1}ms] {}", now_ms, line);
                }
            }
        }
        *now_ms += FRAME_MS;
    }
}

fn main() {
    env_logger::init();

    let catalog = default_sol();
    let registry = catalog.build_registry();
    // Start at a fast time scale so orbital motion is visible per frame.
    let mut clock = OrbitalClock::new(0.0);
    clock.set_mode(nova_engine::TimeMode::Scaled(10.0));

    let mut engine = Engine::new(SimConfig::default(), registry, clock);
    engine.start();
    log::info!("engine started");
    let mut now_ms = 0.0;

    println!("system: {} ({} bodies)", catalog.name, engine.ctx.registry.len());
    run_frames(&mut engine, &mut now_ms, 60);
    println!("date: {}", engine.display_date());

    // Fly to the home planet and let the flight finish.
    let home = engine
        .ctx
        .registry
        .home()
        .map(|b| b.id)
        .unwrap_or_else(|| panic!("catalog has no home body"));
    engine.push_input(InputEvent::Custom {
        kind: commands::FOCUS_BODY,
        a: home.0 as f32,
        b: 0.0,
        c: 0.0,
    });
    run_frames(&mut engine, &mut now_ms, 90);
    println!("camera target: {:?}", engine.ctx.camera.target);

    // Trigger the stellar death sequence and run it to the remnant epoch.
    engine.push_input(InputEvent::Custom {
        kind: commands::LIFECYCLE_TRIGGER,
        a: 0.0,
        b: 0.0,
        c: 0.0,
    });
    let mut frames = 0usize;
    while engine.lifecycle_phase() != 3 && frames < 20_000 {
        run_frames(&mut engine, &mut now_ms, 60);
        frames += 60;
    }
    println!("date: {}", engine.display_date());
    run_frames(&mut engine, &mut now_ms, 600);
    let visible = engine
        .ctx
        .registry
        .iter()
        .filter(|b| b.visual.visible)
        .count();
    println!("bodies still visible after collapse: {}", visible);

    // Reset restores everything.
    engine.push_input(InputEvent::Custom {
        kind: commands::LIFECYCLE_RESET,
        a: 0.0,
        b: 0.0,
        c: 0.0,
    });
    run_frames(&mut engine, &mut now_ms, 10);
    println!("after reset: {}", engine.display_date());
}
