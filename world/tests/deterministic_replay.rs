mod support;

use std::time::Duration;

use wild_defense_core::{CellCoord, Command, Event, SessionOutcome, TowerKind, WavePhase};
use wild_defense_world::{query, World};

use support::{apply, tick};

const TICKS: u64 = 60 * 180;

fn replay() -> (Vec<Event>, SessionOutcome) {
    let mut world = World::default();
    let mut events = Vec::new();

    for (kind, column, row) in [
        (TowerKind::ChameleonSniper, 7, 5),
        (TowerKind::MeerkatScout, 9, 3),
        (TowerKind::MeerkatScout, 12, 9),
    ] {
        events.extend(apply(
            &mut world,
            Command::PlaceTower {
                kind,
                cell: CellCoord::new(column, row),
            },
        ));
    }

    for index in 1..=TICKS {
        let session = query::session(&world);
        if session.outcome.is_terminal() {
            break;
        }
        if session.wave_phase != WavePhase::Active {
            events.extend(apply(&mut world, Command::StartWave));
        }
        events.extend(tick(&mut world, Duration::from_millis(index * 1_000 / 60)));
    }

    (events, query::session(&world).outcome)
}

#[test]
fn identical_scripts_produce_identical_event_streams() {
    let (first, first_outcome) = replay();
    let (second, second_outcome) = replay();

    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first.len(), second.len());
    assert!(first == second, "replay diverged between runs");
}

#[test]
fn scripted_session_reaches_a_verdict_with_kills() {
    let (events, outcome) = replay();

    assert!(outcome.is_terminal(), "session still running after three minutes");
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::EnemyKilled { .. })));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::TowerPlaced { .. }))
            .count(),
        2,
        "the third tower is unaffordable with the starting currency"
    );
}
