//! Stop Timer native demo host
//!
//! Drives the engine at a fixed frame rate with a scripted player that aims for
//! the target with a little seeded jitter. Set `RUST_LOG=debug` to see every stop.

use std::env;

use stop_timer::settings::SETTINGS_FILE;
use stop_timer::ui::Flash;
use stop_timer::{Callbacks, DeterministicRng, FileStore, RoundEngine, Settings, UiUpdate};

/// How far off target the scripted player may stop (seconds)
const PLAYER_JITTER: f64 = 0.09;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Stop Timer (native) starting...");

    let mut settings = Settings::load(SETTINGS_FILE);
    if let Some(seed) = env::var("STOP_TIMER_SEED").ok().and_then(|s| s.parse().ok()) {
        settings.seed = Some(seed);
    }
    let dt = settings.frame_dt();

    let sink = Callbacks::new().on_ui(|update: &UiUpdate| {
        if let Some(setup) = update.round_setup {
            log::info!("{}", setup);
            if let Some(trap) = setup.trap_text() {
                log::info!("{}", trap);
            }
        }
        if let Some(status) = update.status {
            log::debug!("status: {}", status);
        }
        if update.flash == Some(Flash::Trap) {
            log::warn!("Trap!");
        }
        if let Some(outcome) = update.outcome {
            log::info!(
                "{} | score {} best {}",
                outcome,
                update.score.unwrap_or_default(),
                update.best.unwrap_or_default()
            );
        }
    });

    let store = FileStore::new(&settings.best_score_path);
    log::info!("Best score file: {}", store.path().display());
    let mut engine = RoundEngine::new(settings.engine_config(), store, sink);
    let mut hand = DeterministicRng::new(engine.state().rng.state() ^ 0x5eed_5eed);

    for _ in 0..settings.rounds {
        let aim = engine.state().target + (hand.next_float() * 2.0 - 1.0) * PLAYER_JITTER;
        engine.start_round();
        while engine.state().is_running() && engine.state().elapsed + dt / 2.0 < aim {
            if engine.state().is_hot() && engine.state().boost_charge >= 1.0 {
                engine.activate_boost();
            }
            engine.tick(dt);
        }
        engine.stop_round();
        engine.advance_round();
    }

    let st = engine.state();
    log::info!(
        "Session over after {} rounds: score {}, best {}",
        st.round,
        st.score,
        st.best
    );
}
