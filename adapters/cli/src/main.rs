#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots a Wild Defense session.
//!
//! The binary loads a level, drives the world through the headless backend at
//! a fixed tick rate and prints the outcome once the session ends.

mod headless;
mod placement;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wild_defense_config::GameConfig;
use wild_defense_core::{Command, Event, PlayerInput};
use wild_defense_rendering::{
    palette, FrameControl, Presentation, RenderingBackend, Scene, SceneSnapshot,
    TileGridPresentation,
};
use wild_defense_system_builder::Builder;
use wild_defense_world::{apply, query, World};

use crate::{headless::HeadlessBackend, placement::Placement};

/// Command-line arguments accepted by the Wild Defense binary.
#[derive(Debug, Parser)]
#[command(name = "wild-defense", about = "Runs a Wild Defense session.")]
struct CliArgs {
    /// Level file to load instead of the built-in level.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Simulation ticks per second.
    #[arg(long, default_value_t = 60)]
    tick_hz: u32,
    /// Stops the session after this many ticks.
    #[arg(long, value_name = "TICKS")]
    max_ticks: Option<u64>,
    /// Tower to build before the first wave, as kind@column,row. Repeatable.
    #[arg(long = "place", value_name = "KIND@COLUMN,ROW")]
    placements: Vec<Placement>,
}

/// Entry point for the Wild Defense command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    ensure!(args.tick_hz > 0, "--tick-hz must be at least 1");

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load level {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut world = World::new(Arc::new(config));
    println!("{}", query::welcome_banner(&world));

    let grid = query::config(&world).grid();
    let tile_grid = TileGridPresentation::new(
        grid.columns(),
        grid.rows(),
        grid.cell_length(),
        grid.reserved_rows(),
        palette::GRAY,
    )?;
    let scene = Scene::new(tile_grid, query::path(&world));
    let presentation = Presentation::new("Wild Defense", palette::GREEN, scene);

    let placements = if args.placements.is_empty() {
        Placement::defaults()
    } else {
        args.placements
    };
    let frame_interval = Duration::from_secs(1) / args.tick_hz;
    let backend = HeadlessBackend::new(frame_interval, args.max_ticks).with_opening(placements);

    let mut builder = Builder::new();
    let mut now = Duration::ZERO;
    let mut events: Vec<Event> = Vec::new();
    let mut commands: Vec<Command> = Vec::new();

    backend.run(presentation, move |delta, frame_input, scene| {
        now += delta;

        let mut inputs = frame_input.inputs;
        if let Some(cell) = frame_input
            .click_world_space
            .and_then(|click| scene.tile_grid.cell_at(click))
        {
            inputs.push(PlayerInput::PlaceTower { cell });
        }

        builder.handle(&events, &inputs, &mut commands);
        events.clear();
        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }
        apply(&mut world, Command::Tick { now }, &mut events);

        let enemies = query::enemy_view(&world);
        let towers = query::tower_view(&world);
        let session = query::session(&world);
        scene.refresh(&SceneSnapshot {
            enemies: &enemies,
            towers: &towers,
            attack_events: query::attack_events(&world),
            session,
            wave_status: query::wave_status(&world),
            selected_tower: builder.selected(),
            now: query::clock(&world),
            attack_effect_lifetime: query::config(&world).economy().attack_effect_lifetime(),
        });

        if builder.quit_requested() || session.outcome.is_terminal() {
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use wild_defense_core::{CellCoord, TowerKind};

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn repeated_place_flags_collect_in_order() {
        let args = CliArgs::try_parse_from([
            "wild-defense",
            "--place",
            "chameleon@7,5",
            "--place",
            "meerkat@2,3",
            "--max-ticks",
            "600",
        ])
        .expect("arguments parse");

        assert_eq!(args.tick_hz, 60);
        assert_eq!(args.max_ticks, Some(600));
        assert_eq!(
            args.placements,
            vec![
                Placement {
                    kind: TowerKind::ChameleonSniper,
                    cell: CellCoord::new(7, 5),
                },
                Placement {
                    kind: TowerKind::MeerkatScout,
                    cell: CellCoord::new(2, 3),
                },
            ]
        );
    }

    #[test]
    fn malformed_placement_is_rejected() {
        let error = CliArgs::try_parse_from(["wild-defense", "--place", "eagle@1,1"])
            .expect_err("unknown kind must be rejected");

        assert!(error.to_string().contains("eagle"));
    }
}
