use glam::Vec2;
use pinball_core::sim::{FrameInput, GamePhase, Table, step_frame};
use pinball_core::{Config, FlipperVelocityModel, Pinball, heading_deg};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn drop_ball(game: &mut Pinball) -> Vec<GamePhase> {
    let mut phases = Vec::new();
    let out = game.step_frame(&FrameInput {
        launch_impulse: Some(Vec2::new(0.0, 15.0)),
        ..Default::default()
    });
    assert!(out.launched);
    phases.push(game.table().phase());

    for _ in 0..100 {
        let out = game.step_frame(&FrameInput::default());
        if out.ball_lost {
            phases.push(game.table().phase());
            return phases;
        }
    }
    panic!("ball was never lost");
}

#[test]
fn test_three_balls_then_game_over() {
    let mut game = Pinball::new(Config::default(), 42).unwrap();
    let mut phases = vec![game.table().phase()];
    for _ in 0..3 {
        phases.extend(drop_ball(&mut game));
    }

    assert_eq!(
        phases,
        vec![
            GamePhase::Ready,
            GamePhase::Playing,
            GamePhase::Ready,
            GamePhase::Playing,
            GamePhase::Ready,
            GamePhase::Playing,
            GamePhase::GameOver,
        ]
    );
    assert_eq!(game.table().balls_remaining(), 0);

    // Game over ignores everything until reset
    let out = game.step_frame(&FrameInput {
        launch_impulse: Some(Vec2::new(0.0, -8.0)),
        left_flipper: true,
        ..Default::default()
    });
    assert!(!out.launched);
    assert_eq!(game.table().phase(), GamePhase::GameOver);

    game.reset();
    assert_eq!(game.table().phase(), GamePhase::Ready);
    assert_eq!(game.table().balls_remaining(), 3);
    assert_eq!(game.table().score(), 0);
    assert!(game.table().bumpers().iter().all(|b| !b.is_lit()));
    assert_eq!(game.table().ball().vel, Vec2::ZERO);
}

#[test]
fn test_long_run_keeps_ball_invariants() {
    let mut table = Table::new(Config::default()).unwrap();
    let mut rng = Pcg32::seed_from_u64(0xFEED);
    let config = table.config().clone();
    let (min_speed, max_speed) = (config.physics.min_ball_speed, config.physics.max_ball_speed);

    for frame in 0..5000u32 {
        let launch_impulse = (table.phase() == GamePhase::Ready)
            .then(|| Vec2::new(-2.0 + (frame % 5) as f32, -8.0));
        let input = FrameInput {
            left_flipper: frame % 17 < 5,
            right_flipper: frame % 23 < 5,
            launch_impulse,
        };
        step_frame(&mut table, &input, &mut rng);

        let ball = table.ball();
        assert!(ball.is_finite(), "non-finite ball at frame {frame}");
        if table.phase() == GamePhase::Playing {
            let speed = ball.speed();
            assert!(speed <= max_speed + 1e-3, "speed {speed} at frame {frame}");
            assert!(speed >= min_speed - 1e-3 || speed <= 1e-6);
            // Nothing near the top wall can push the ball back through it
            assert!(ball.pos.y - ball.radius >= config.table.wall_thickness - 1e-3);
        }
        if table.phase() == GamePhase::GameOver {
            table.reset();
        }
    }
}

#[test]
fn test_bumper_heading_over_many_hits() {
    let mut table = Table::new(Config::default()).unwrap();
    let mut rng = Pcg32::seed_from_u64(1000);
    table.phase = GamePhase::Playing;
    let center = table.bumpers()[2].center;
    let mut hits = 0;

    for i in 0..1000 {
        // Park just below bumper 2, heading straight into it
        table.ball.pos = center + Vec2::new(0.0, 11.2);
        table.ball.vel = Vec2::new(0.0, -(1.0 + (i % 10) as f32));
        table.phase = GamePhase::Playing;
        table.balls_remaining = 3;
        let out = step_frame(&mut table, &FrameInput::default(), &mut rng);
        if !out.bumpers_hit.contains(&2) {
            continue;
        }
        hits += 1;
        let speed = table.ball().speed();
        if speed > 1e-6 && table.phase() == GamePhase::Playing {
            assert!(speed >= 1.0 - 1e-3);
        }
    }
    assert!(hits > 900);

    // Direct check of the deflection rule on a single sub-step
    for _ in 0..1000 {
        table.ball.pos = center + Vec2::new(0.0, 10.5);
        table.ball.vel = Vec2::new(0.0, -3.0);
        let report = pinball_core::sim::resolve_substep(&mut table, &mut rng);
        assert_eq!(report.bumpers_hit, vec![2]);
        let heading = heading_deg(table.ball().vel);
        assert!((90.0 - 1e-2..=270.0 + 1e-2).contains(&heading));
        assert!(table.ball().speed() >= 1.0 - 1e-4);
    }
}

#[test]
fn test_mirror_model_still_plays() {
    let mut config = Config::default();
    config.physics.flipper_velocity_model = FlipperVelocityModel::MirrorLeft;
    let mut game = Pinball::new(config, 7).unwrap();
    game.step_frame(&FrameInput {
        launch_impulse: Some(Vec2::new(1.0, -8.0)),
        ..Default::default()
    });
    for frame in 0..2000u32 {
        game.step_frame(&FrameInput {
            left_flipper: frame % 20 < 4,
            right_flipper: frame % 20 >= 10 && frame % 20 < 14,
            launch_impulse: None,
        });
        assert!(game.table().ball().is_finite());
        if game.table().phase() != GamePhase::Playing {
            break;
        }
    }
}
