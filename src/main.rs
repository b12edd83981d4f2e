//! Pong - native entry point

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use pong::platform::sdl::SdlPlatform;
use pong::{FrameDriver, Game, GameResult, Settings};

const SETTINGS_PATH: &str = "pong.json";

fn run() -> GameResult<()> {
    let settings = Settings::load_or_default(SETTINGS_PATH);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Serve RNG seed: {}", seed);

    let SdlPlatform {
        renderer,
        mut events,
    } = SdlPlatform::init(&settings.display, &settings.font)?;

    let mut game = Game::new(&settings, renderer, Pcg32::seed_from_u64(seed))?;
    FrameDriver::new(settings.target_fps).run(&mut game, &mut events);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pong starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        if e.is_fatal() {
            std::process::abort();
        }
        std::process::exit(1);
    }
}
