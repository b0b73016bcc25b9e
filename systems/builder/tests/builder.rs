use wild_defense_core::{CellCoord, Command, Event, PlayerInput, TowerId, TowerKind};
use wild_defense_system_builder::Builder;

#[test]
fn placement_without_selection_is_ignored() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[PlayerInput::PlaceTower {
            cell: CellCoord::new(3, 3),
        }],
        &mut commands,
    );

    assert!(
        commands.is_empty(),
        "no tower type selected, so nothing should be placed"
    );
}

#[test]
fn selection_applies_to_later_clicks_in_the_same_frame() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[
            PlayerInput::SelectTower {
                kind: TowerKind::ChameleonSniper,
            },
            PlayerInput::PlaceTower {
                cell: CellCoord::new(1, 2),
            },
            PlayerInput::PlaceTower {
                cell: CellCoord::new(4, 2),
            },
        ],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::PlaceTower {
                kind: TowerKind::ChameleonSniper,
                cell: CellCoord::new(1, 2),
            },
            Command::PlaceTower {
                kind: TowerKind::ChameleonSniper,
                cell: CellCoord::new(4, 2),
            },
        ],
    );
    assert_eq!(builder.selected(), Some(TowerKind::ChameleonSniper));
}

#[test]
fn wave_ability_and_restart_inputs_map_to_commands() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[
            PlayerInput::SelectTower {
                kind: TowerKind::MeerkatScout,
            },
            PlayerInput::StartNextWave,
            PlayerInput::UseAbility {
                tower: TowerId::new(4),
            },
            PlayerInput::Restart,
        ],
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::StartWave,
            Command::UseAbility {
                tower: TowerId::new(4)
            },
            Command::ResetSession,
        ],
    );
    assert_eq!(builder.selected(), None, "restart clears the selection");
}

#[test]
fn session_reset_event_clears_selection() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();
    builder.handle(
        &[],
        &[PlayerInput::SelectTower {
            kind: TowerKind::MeerkatScout,
        }],
        &mut commands,
    );

    builder.handle(&[Event::SessionReset], &[], &mut commands);

    assert_eq!(builder.selected(), None);
    assert!(commands.is_empty());
}

#[test]
fn quit_is_reported_without_commands() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(&[], &[PlayerInput::Quit], &mut commands);

    assert!(builder.quit_requested());
    assert!(commands.is_empty());
}
