//! Integration tests for self-play and the settings boundary

use autotris::core::{Board, Settings};
use autotris::engine::Autoplayer;
use autotris::types::DRAIN_PLAN;

fn self_play(settings: Settings, ticks: usize) -> Autoplayer {
    let mut player = Autoplayer::new(settings);
    for _ in 0..ticks {
        player.tick().unwrap();
        if player.board().game_over() {
            break;
        }
    }
    player
}

#[test]
fn test_self_play_clears_lines() {
    let player = self_play(
        Settings {
            ai_delay: DRAIN_PLAN,
            seed: 12345,
            ..Settings::default()
        },
        120,
    );
    let board = player.board();
    assert!(!board.game_over());
    assert!(board.lock_serial() >= 100);
    // 100+ pieces on a 10x20 grid cannot fit without clearing lines.
    assert!(board.lines_cleared() >= 20);
}

#[test]
fn test_same_seed_same_game() {
    let settings = Settings {
        ai_delay: DRAIN_PLAN,
        seed: 99,
        ..Settings::default()
    };
    let a = self_play(settings.clone(), 40);
    let b = self_play(settings, 40);
    assert_eq!(a.board().grid(), b.board().grid());
    assert_eq!(a.board().lines_cleared(), b.board().lines_cleared());
}

#[test]
fn test_narrow_board_plays() {
    let player = self_play(
        Settings {
            cols: 6,
            rows: 16,
            ai_delay: DRAIN_PLAN,
            ..Settings::default()
        },
        40,
    );
    assert_eq!(player.board().grid().cols(), 6);
    assert!(player.board().lock_serial() > 0);
}

#[test]
fn test_settings_json_boundary() {
    let settings = Settings::from_json_str(
        r#"{
            "ai_delay": -3,
            "framerate": 1,
            "weights": { "exp_holes": -2.0, "holes": 150.0 }
        }"#,
    )
    .unwrap();
    assert_eq!(settings.ai_delay, DRAIN_PLAN);
    assert_eq!(settings.framerate, 10);
    assert_eq!(settings.weights.exp_holes, 0.0);
    assert_eq!(settings.weights.holes, 150.0);
    assert!(settings.drains_plan());
}

#[test]
fn test_settings_file_roundtrip() {
    let path = std::env::temp_dir().join(format!("autotris-settings-{}.json", std::process::id()));
    let settings = Settings {
        seed: 4242,
        ai_parallel: true,
        ..Settings::default()
    };
    std::fs::write(&path, settings.to_json_pretty().unwrap()).unwrap();
    let loaded = Settings::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, settings);
}

#[test]
fn test_restart_resets_board_and_plan() {
    let mut player = self_play(
        Settings {
            ai_delay: DRAIN_PLAN,
            ..Settings::default()
        },
        10,
    );
    assert!(player.board().lock_serial() > 0);
    player.restart();
    assert_eq!(player.board().lock_serial(), 0);
    assert_eq!(player.board().grid().filled_count(), 0);
    assert!(player.scheduler().plan().is_none());
}

#[test]
fn test_game_over_is_terminal() {
    let settings = Settings::default();
    let mut board = Board::new(&settings);
    while !board.game_over() {
        board.hard_drop().unwrap();
    }
    let serial = board.lock_serial();
    let grid = board.grid().clone();
    for _ in 0..10 {
        board.tick().unwrap();
    }
    assert_eq!(board.hard_drop().unwrap(), None);
    assert_eq!(board.lock_serial(), serial);
    assert_eq!(board.grid(), &grid);
}
