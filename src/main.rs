//! Wormhole Dodge headless driver
//!
//! Runs the simulation at the fixed tick with a simple evasive autopilot and
//! logs a run summary. Usage: `wormhole-dodge [ticks] [seed]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use wormhole_dodge::audio::RecordingAudio;
use wormhole_dodge::consts::TICK_MS;
use wormhole_dodge::sim::{PcgRandom, Simulation};
use wormhole_dodge::stats::SharedStats;
use wormhole_dodge::{HighScores, Settings, SimError};

/// Player speed (units per tick) used by the autopilot
const AUTOPILOT_SPEED: i32 = 4;
const DEFAULT_TICKS: u64 = 60 * 60;
const SETTINGS_FILE: &str = "settings.json";
const HIGHSCORES_FILE: &str = "highscores.json";

/// Step away from the nearest missile, drifting back toward the center
fn autopilot(sim: &Simulation, width: i32, height: i32) -> Result<(i32, i32), SimError> {
    let player = sim.player()?;
    let nearest = sim.level()?.missiles().iter().min_by_key(|m| {
        let dx = (m.x - player.x) as i64;
        let dy = (m.y - player.y) as i64;
        dx * dx + dy * dy
    });

    let (tx, ty) = match nearest {
        Some(m) => (player.x - m.x, player.y - m.y),
        None => (width / 2 - player.x, height / 2 - player.y),
    };
    Ok((
        tx.signum() * AUTOPILOT_SPEED,
        ty.signum() * AUTOPILOT_SPEED,
    ))
}

/// Start a session configured from user settings
///
/// `audio` and `stats` are handles; the simulation gets clones sharing their
/// logs.
fn build_simulation(
    settings: Settings,
    seed: u64,
    audio: &RecordingAudio,
    stats: &SharedStats,
) -> Result<Simulation, SimError> {
    let show_hud = settings.show_hud;
    let sink = audio.clone().with_volume(settings.effective_sfx_volume());

    let mut sim = Simulation::new(
        1,
        Box::new(PcgRandom::new(seed)),
        Box::new(settings),
        Box::new(sink),
    )?
    .with_stats(Box::new(stats.clone()));
    sim.set_hud_visible(show_hud);
    sim.initialize_game()?;
    Ok(sim)
}

fn run(ticks: u64, seed: u64) -> Result<(), SimError> {
    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let (width, height) = (settings.world_width, settings.world_height);
    let audio = RecordingAudio::new();
    let stats = SharedStats::new();

    let mut sim = build_simulation(settings, seed, &audio, &stats)?;

    for tick in 0..ticks {
        if !sim.is_game_over() {
            let (dx, dy) = autopilot(&sim, width, height)?;
            sim.move_player(dx, dy)?;
        }
        let report = sim.update()?;
        if report.died {
            log::info!("Died at tick {}", tick);
        }
        if sim.is_game_over() && sim.level()?.missiles().is_empty() {
            break;
        }
    }

    let summary = stats.snapshot();
    let level = sim.level_number()?;
    log::info!(
        "Run finished: score {}, level {}, survived {:.1}s ({} ms ticks)",
        sim.score(),
        level,
        summary.survival_secs(),
        TICK_MS
    );
    log::info!(
        "Hits {}, missiles avoided {}, peak danger x{}, avg danger x{:.2}, sfx {:?}",
        summary.hits,
        summary.missiles_avoided,
        summary.peak_danger,
        summary.average_danger(),
        audio.played()
    );

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let scores_path = Path::new(HIGHSCORES_FILE);
    let mut scores = HighScores::load(scores_path);
    if let Some(rank) = scores.add_score(sim.score(), level, timestamp) {
        log::info!("Leaderboard rank #{}", rank);
        if let Err(e) = scores.save(scores_path) {
            log::warn!("Could not save high scores: {}", e);
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let ticks = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_TICKS);
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| PcgRandom::from_entropy().seed());

    log::info!("Wormhole Dodge (headless) starting: {} ticks, seed {}", ticks, seed);

    if let Err(e) = run(ticks, seed) {
        log::error!("Simulation error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use wormhole_dodge::consts::{HIT_DAMAGE, MAX_HEALTH};
    use wormhole_dodge::sim::Missile;

    fn kill_player(sim: &mut Simulation) {
        let (x, y) = {
            let p = sim.player().unwrap();
            (p.x, p.y)
        };
        for _ in 0..(MAX_HEALTH / HIT_DAMAGE) {
            sim.level_mut()
                .unwrap()
                .add_missile(Missile::new(x, y, DVec2::ZERO));
            sim.update().unwrap();
        }
        assert!(sim.is_game_over());
    }

    #[test]
    fn test_hidden_hud_stops_survival_stats() {
        let settings = Settings {
            show_hud: false,
            ..Settings::default()
        };
        let stats = SharedStats::new();
        let mut sim = build_simulation(settings, 1, &RecordingAudio::new(), &stats).unwrap();
        assert!(!sim.hud_visible());
        sim.update().unwrap();
        let snap = stats.snapshot();
        assert_eq!(snap.survival_ticks, 0);
        assert_eq!(snap.peak_danger, 1);
    }

    #[test]
    fn test_default_settings_count_survival() {
        let stats = SharedStats::new();
        let mut sim =
            build_simulation(Settings::default(), 1, &RecordingAudio::new(), &stats).unwrap();
        assert!(sim.hud_visible());
        sim.update().unwrap();
        assert_eq!(stats.snapshot().survival_ticks, 1);
    }

    #[test]
    fn test_muted_settings_silence_death() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let audio = RecordingAudio::new();
        let mut sim = build_simulation(settings, 1, &audio, &SharedStats::new()).unwrap();
        kill_player(&mut sim);
        assert!(audio.played().is_empty());
    }

    #[test]
    fn test_unmuted_settings_play_death() {
        let audio = RecordingAudio::new();
        let mut sim =
            build_simulation(Settings::default(), 1, &audio, &SharedStats::new()).unwrap();
        kill_player(&mut sim);
        assert_eq!(audio.count(wormhole_dodge::audio::DEATH_SFX), 1);
    }
}
