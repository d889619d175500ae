//! Pinball Core headless runner
//!
//! Plays one game with a simple autopilot and logs what happens.
//!
//! Usage: `pinball-sim [--config table.json] [--seed N] [--frames N]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pinball_core::sim::{FrameInput, GamePhase};
    use pinball_core::{Config, LaunchAim, Pinball};

    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: pinball-sim [--config table.json] [--seed N] [--frames N]");
            std::process::exit(2);
        }
    };

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Config rejected: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let mut game = match Pinball::new(config, args.seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Config rejected: {}", e);
            std::process::exit(1);
        }
    };

    let mut launch_impulse = None;
    let mut launches = 0u32;
    for frame in 0..args.frames {
        let table = game.table();
        let mut input = FrameInput {
            launch_impulse: launch_impulse.take(),
            ..Default::default()
        };

        match table.phase() {
            GamePhase::Ready => {
                // Pull for a while, then fire, alternating aim between balls
                if game.plunger().pull_frames() < 45 {
                    game.hold_plunger();
                } else {
                    let aim = match launches % 3 {
                        0 => LaunchAim::Straight,
                        1 => LaunchAim::Left,
                        _ => LaunchAim::Right,
                    };
                    launch_impulse = game.release_plunger(aim);
                    launches += 1;
                }
            }
            GamePhase::Playing => {
                let ball = table.ball();
                let mid_x = table.config().table.width / 2.0;
                let flipper_zone = ball.pos.y > table.left_flipper.pivot.y - 40.0;
                input.left_flipper = flipper_zone && ball.pos.x < mid_x;
                input.right_flipper = flipper_zone && ball.pos.x >= mid_x;
            }
            GamePhase::GameOver => {
                log::info!("Game over after {} frames", frame);
                break;
            }
        }

        let outcome = game.step_frame(&input);
        if !outcome.bumpers_hit.is_empty() {
            log::debug!(
                "Frame {}: bumpers {:?} +{}",
                frame,
                outcome.bumpers_hit,
                outcome.score_delta
            );
        }
    }

    let table = game.table();
    println!(
        "seed {} | score {} | balls left {} | frames {} | phase {:?}",
        game.seed(),
        table.score(),
        table.balls_remaining(),
        table.frames(),
        table.phase()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the deliverable on wasm; there is no headless runner
}

#[cfg(not(target_arch = "wasm32"))]
struct Args {
    config: Option<std::path::PathBuf>,
    seed: u64,
    frames: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Args {
            config: None,
            seed: 1,
            frames: 60 * 60 * 5,
        };
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "--config" => parsed.config = Some(value()?.into()),
                "--seed" => parsed.seed = value()?.parse().map_err(|e| format!("bad seed: {e}"))?,
                "--frames" => {
                    parsed.frames = value()?.parse().map_err(|e| format!("bad frame count: {e}"))?
                }
                other => return Err(format!("unknown argument {other}")),
            }
        }
        Ok(parsed)
    }
}
