//! Oswald - episode sampling dry run
//!
//! Usage: `oswald [settings.json] [episodes]`
//!
//! Loads the training settings, samples episode starts with the configured
//! seed and logs the first-tick reward of every car. Useful for checking a
//! settings file before handing it to the trainer.

use std::collections::BTreeMap;
use std::process::ExitCode;

use oswald::game::{GameSnapshot, StateWrapper};
use oswald::{TrainingMatch, TrainingSettings};

const DEFAULT_SETTINGS_PATH: &str = "oswald.json";
const DEFAULT_EPISODES: u32 = 12;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Oswald starting...");

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let episodes = match args.next().map(|s| s.parse::<u32>()) {
        None => DEFAULT_EPISODES,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid episode count: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = match TrainingSettings::load_or_default(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Seed {}, frame skip {} ({} fps), gamma {:.5}",
        settings.seed,
        settings.frame_skip,
        settings.fps(),
        settings.gamma()
    );

    let (blue, orange) = settings.car_counts();
    let mut training = TrainingMatch::from_settings(&settings);
    let mut counts: BTreeMap<&'static str, u32> = BTreeMap::new();

    for episode in 0..episodes {
        let mut wrapper = StateWrapper::new(blue, orange);
        let scenario = training.episode_reset(&mut wrapper);
        *counts.entry(scenario.as_str()).or_default() += 1;

        let initial = GameSnapshot::from(&wrapper);
        training.begin_episode(&initial);
        let outcome = training.step(&initial, &[]);

        for (player, reward) in initial.players.iter().zip(&outcome.rewards) {
            log::info!(
                "Episode {:>3} [{}] car {} ({:?}): reward {:.4}",
                episode + 1,
                scenario.as_str(),
                player.car_id,
                player.team,
                reward
            );
        }
    }

    for (scenario, count) in &counts {
        println!("{:<8} {}", scenario, count);
    }

    ExitCode::SUCCESS
}
