//! Fixed-timestep backend that runs sessions without a window.

use std::{collections::VecDeque, time::Duration};

use anyhow::Result;
use glam::Vec2;
use wild_defense_core::{CellCoord, PlayerInput};
use wild_defense_rendering::{
    FrameControl, FrameInput, Presentation, RenderingBackend, Scene, TileGridPresentation,
};

use crate::placement::Placement;

/// Backend that advances frames as fast as possible with a constant delta.
///
/// Requested placements are issued as clicks during the first frames. Once
/// they are done the backend presses start wave whenever the scene offers it.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frame_interval: Duration,
    max_frames: Option<u64>,
    opening: VecDeque<Placement>,
}

impl HeadlessBackend {
    pub(crate) fn new(frame_interval: Duration, max_frames: Option<u64>) -> Self {
        Self {
            frame_interval,
            max_frames,
            opening: VecDeque::new(),
        }
    }

    pub(crate) fn with_opening(mut self, placements: Vec<Placement>) -> Self {
        self.opening = placements.into();
        self
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            frame_interval,
            max_frames,
            mut opening,
        } = self;
        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;

        tracing::info!(
            title = %window_title,
            width = scene.tile_grid.width(),
            height = scene.tile_grid.height(),
            ?frame_interval,
            "headless session started"
        );

        let mut frames: u64 = 0;
        let mut wave_text = String::new();
        loop {
            if max_frames.is_some_and(|limit| frames >= limit) {
                tracing::warn!(frames, "frame limit reached before the session ended");
                break;
            }

            let input = match opening.pop_front() {
                Some(placement) => FrameInput {
                    inputs: vec![PlayerInput::SelectTower {
                        kind: placement.kind,
                    }],
                    click_world_space: Some(cell_center(&scene.tile_grid, placement.cell)),
                },
                None if scene.hud.start_wave_available => FrameInput {
                    inputs: vec![PlayerInput::StartNextWave],
                    click_world_space: None,
                },
                None => FrameInput::default(),
            };

            let control = update_scene(frame_interval, input, &mut scene);
            frames += 1;

            if scene.hud.wave_text != wave_text {
                wave_text.clone_from(&scene.hud.wave_text);
                tracing::info!(
                    currency = scene.hud.currency,
                    base_health = scene.hud.base_health,
                    "{wave_text}"
                );
            }

            if control == FrameControl::Exit {
                break;
            }
        }

        let hud = &scene.hud;
        match hud.banner() {
            Some(banner) => println!("{banner}"),
            None => println!("Stopped after {frames} frames."),
        }
        println!(
            "Currency: {}  Base health: {}  Waves started: {}  Towers: {}",
            hud.currency,
            hud.base_health,
            hud.waves_started,
            scene.towers.len()
        );

        Ok(())
    }
}

fn cell_center(grid: &TileGridPresentation, cell: CellCoord) -> Vec2 {
    let half = grid.tile_length / 2.0;
    Vec2::new(
        cell.column() as f32 * grid.tile_length + half,
        cell.row() as f32 * grid.tile_length + half,
    )
}
