//! Snake Arcade entry point
//!
//! The browser build is driven from JS through `platform::web::WebGame`.
//! Natively this runs a headless autopilot game at 60 fps and records the
//! result on a local leaderboard.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Arcade (native) starting...");
    native::run(native::Options::from_args(std::env::args().skip(1)));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use snake_arcade::audio::{AudioCommand, AudioMixer};
    use snake_arcade::hud::{HudView, StatusLine};
    use snake_arcade::sim::{Cell, Direction, GameEvent, GamePhase, GameState, Session};
    use snake_arcade::{HighScores, Settings};

    /// 60 Hz frames
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub struct Options {
        seed: u64,
        seconds: f64,
        scores: PathBuf,
        settings: PathBuf,
    }

    impl Options {
        /// `--seed N --seconds S --scores PATH --settings PATH`
        pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
            let mut options = Options {
                seed: now_ms() as u64,
                seconds: 120.0,
                scores: PathBuf::from("snake_highscores.json"),
                settings: PathBuf::from("snake_settings.json"),
            };
            while let Some(flag) = args.next() {
                let Some(value) = args.next() else {
                    log::warn!("Missing value for {}", flag);
                    break;
                };
                match flag.as_str() {
                    "--seed" => match value.parse() {
                        Ok(seed) => options.seed = seed,
                        Err(_) => log::warn!("Invalid seed {:?}, using {}", value, options.seed),
                    },
                    "--seconds" => match value.parse() {
                        Ok(seconds) => options.seconds = seconds,
                        Err(_) => log::warn!("Invalid duration {:?}", value),
                    },
                    "--scores" => options.scores = PathBuf::from(value),
                    "--settings" => options.settings = PathBuf::from(value),
                    other => log::warn!("Unknown option {}", other),
                }
            }
            options
        }
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    pub fn run(options: Options) {
        let settings = Settings::load_from(&options.settings);
        let mut mixer = AudioMixer::new(&settings);
        let mut status = StatusLine::default();
        let mut session = Session::new(options.seed);
        log::info!("Game initialized with seed: {}", options.seed);

        if let Some(cmd) = mixer.start_music() {
            play(cmd);
        }

        let frames = (options.seconds * 1000.0 / FRAME_MS) as u64;
        for frame in 0..frames {
            let now = frame as f64 * FRAME_MS;
            if session.state.snake.direction_queue.is_empty() {
                if let Some(dir) = autopilot(&session.state) {
                    session.enqueue_direction(dir);
                }
            }

            session.advance_frame(now);
            let events = session.drain_events();
            status.update(&events, now);
            for cmd in mixer.handle_all(&events) {
                play(cmd);
            }
            for event in &events {
                if let GameEvent::LevelUp { .. } | GameEvent::GameOver { .. } = event {
                    log::info!("{}", status.current().unwrap_or("Game over"));
                }
            }

            if session.phase() == GamePhase::GameOver {
                break;
            }
        }

        let hud = HudView::from_session(&session, &status);
        println!(
            "score {}  level {}  lives {}  time {}  power-ups: {}",
            hud.score,
            hud.level,
            hud.lives,
            hud.timer,
            hud.power_up_summary()
        );
        for line in hud.achievements.iter().filter(|a| a.unlocked) {
            println!("  achievement: {}", line.name);
        }

        let mut scores = HighScores::load_from(&options.scores);
        if let Some(best) = scores.top_score() {
            println!("best on record {}", best);
        }
        if let Some(rank) = scores.record("autopilot", &session, now_ms()) {
            println!("New high score! Rank #{}", rank);
            if let Err(e) = scores.save_to(&options.scores) {
                log::warn!("Could not save high scores: {}", e);
            }
        }
    }

    fn play(cmd: AudioCommand) {
        log::debug!("audio: {:?}", cmd);
    }

    /// Toroidal distance between two cells
    fn distance(state: &GameState, a: Cell, b: Cell) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(state.grid.width - dx) + dy.min(state.grid.height - dy)
    }

    /// Head for the nearest collectible without biting the body
    fn autopilot(state: &GameState) -> Option<Direction> {
        let snake = &state.snake;
        let target = state
            .collectibles
            .iter()
            .min_by_key(|c| distance(state, snake.head, c.pos))?
            .pos;

        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(snake.heading))
            .map(|d| (d, state.grid.step(snake.head, d)))
            .filter(|(_, cell)| !snake.body_contains(*cell))
            .min_by_key(|(_, cell)| distance(state, *cell, target))
            .map(|(d, _)| d)
    }
}
