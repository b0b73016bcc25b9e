#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system that translates player requests into world commands.
//!
//! The builder remembers which tower type the player selected so later cell
//! clicks can be turned into placement commands. It never inspects the world;
//! affordability and occupancy are decided when the world applies the command.

use wild_defense_core::{Command, Event, PlayerInput, TowerKind};

/// Input system that turns [`PlayerInput`] values into [`Command`] values.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    selected: Option<TowerKind>,
    quit_requested: bool,
}

impl Builder {
    /// Creates a builder with no tower selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            quit_requested: false,
        }
    }

    /// Tower type that placement clicks currently build.
    #[must_use]
    pub const fn selected(&self) -> Option<TowerKind> {
        self.selected
    }

    /// Reports whether the player asked to leave the application.
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Consumes world events and player inputs to emit commands.
    ///
    /// Placement requests arriving before any tower type was selected are
    /// dropped. A session reset clears the selection.
    pub fn handle(&mut self, events: &[Event], inputs: &[PlayerInput], out: &mut Vec<Command>) {
        if events
            .iter()
            .any(|event| matches!(event, Event::SessionReset))
        {
            self.selected = None;
        }

        for input in inputs {
            match *input {
                PlayerInput::SelectTower { kind } => self.selected = Some(kind),
                PlayerInput::PlaceTower { cell } => {
                    if let Some(kind) = self.selected {
                        out.push(Command::PlaceTower { kind, cell });
                    }
                }
                PlayerInput::StartNextWave => out.push(Command::StartWave),
                PlayerInput::UseAbility { tower } => out.push(Command::UseAbility { tower }),
                PlayerInput::Restart => {
                    self.selected = None;
                    out.push(Command::ResetSession);
                }
                PlayerInput::Quit => self.quit_requested = true,
            }
        }
    }
}
