#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Wild Defense adapters.
//!
//! Backends receive a [`Presentation`] once and then repeatedly hand the
//! adapter's update closure a [`FrameInput`] and a mutable [`Scene`]. The
//! scene is a display-only copy of world queries expressed in `glam` vectors;
//! nothing in it feeds back into the simulation.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};
use wild_defense_core::{
    AttackEvent, CellCoord, EnemyId, EnemyKind, EnemyView, PlayerInput, SessionOutcome,
    SessionSnapshot, TowerId, TowerKind, TowerView, WaveStatus, WorldPoint,
};

/// Radius of the circle drawn for every enemy, in world units.
pub const ENEMY_RADIUS: f32 = 15.0;

/// Gap left between a tower's square and the edges of its cell, in world units.
pub const TOWER_INSET: f32 = 5.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Named colors of the Wild Defense look.
pub mod palette {
    use super::Color;

    /// End screen background and sniper towers.
    pub const BLACK: Color = Color::from_rgb_u8(0, 0, 0);
    /// Grass background and the filled part of health bars.
    pub const GREEN: Color = Color::from_rgb_u8(34, 139, 19);
    /// Enemy path.
    pub const BROWN: Color = Color::from_rgb_u8(139, 69, 19);
    /// Grid lines and range circles.
    pub const GRAY: Color = Color::from_rgb_u8(128, 128, 128);
    /// Scout towers, attack lines and the empty part of health bars.
    pub const RED: Color = Color::from_rgb_u8(255, 0, 0);
    /// Enemies.
    pub const YELLOW: Color = Color::from_rgb_u8(255, 255, 0);
}

/// Errors raised while assembling presentation descriptors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to give every cell an area.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}

/// Describes the square build grid rendered under the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
    /// Number of bottom rows covered by the interface strip.
    pub reserved_rows: u32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_length` is not a positive number.
    pub fn new(
        columns: u32,
        rows: u32,
        tile_length: f32,
        reserved_rows: u32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if !tile_length.is_finite() || tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
            reserved_rows,
            line_color,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// World-space y coordinate where the interface strip begins.
    #[must_use]
    pub const fn interface_top(&self) -> f32 {
        self.rows.saturating_sub(self.reserved_rows) as f32 * self.tile_length
    }

    /// Converts a world-space position to the cell that contains it.
    ///
    /// Returns `None` when the position lies outside the grid.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let column = (position.x / self.tile_length).floor() as u32;
        let row = (position.y / self.tile_length).floor() as u32;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(CellCoord::new(column, row))
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Discrete requests captured since the previous frame, in arrival order.
    pub inputs: Vec<PlayerInput>,
    /// World-space position of a click on the play area, if any.
    pub click_world_space: Option<Vec2>,
}

/// Decision returned by the adapter after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop the backend and return from [`RenderingBackend::run`].
    Exit,
}

/// Tower drawn as a square inside its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Identifier of the tower.
    pub id: TowerId,
    /// Type of the tower.
    pub kind: TowerKind,
    /// Center of the tower's cell.
    pub center: Vec2,
    /// Side length of the drawn square.
    pub size: f32,
    /// Radius of the range circle.
    pub range: f32,
    /// Fill color, lightened while the tower is camouflaged.
    pub color: Color,
    /// Whether the tower is camouflaged.
    pub hidden: bool,
}

/// Enemy drawn as a circle with a health bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Center of the enemy.
    pub position: Vec2,
    /// Radius of the drawn circle.
    pub radius: f32,
    /// Fill color of the circle.
    pub color: Color,
    /// Fraction of the health bar that is filled.
    pub health_ratio: f32,
}

/// Fading line from a tower to the enemy it hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackLine {
    /// Tower end of the line.
    pub from: Vec2,
    /// Enemy end of the line.
    pub to: Vec2,
    /// Line color whose alpha falls from 1.0 to 0.0 as the line ages.
    pub color: Color,
}

/// Counters and labels shown in the interface strip.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// Currency available for placements.
    pub currency: u32,
    /// Remaining base health.
    pub base_health: i32,
    /// Filled fraction of the base health bar.
    pub base_health_ratio: f32,
    /// Wave readout text.
    pub wave_text: String,
    /// Number of waves started so far.
    pub waves_started: u32,
    /// Whether the start wave button is offered.
    pub start_wave_available: bool,
    /// Tower type highlighted in the sidebar.
    pub selected_tower: Option<TowerKind>,
    /// Session outcome.
    pub outcome: SessionOutcome,
}

impl Hud {
    /// Text shown on the end screen, if the session is over.
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        match self.outcome {
            SessionOutcome::Running => None,
            SessionOutcome::Won => Some("You win!".to_owned()),
            SessionOutcome::Lost => Some(format!(
                "Game Over! You survived {} waves",
                self.waves_started
            )),
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            currency: 0,
            base_health: 0,
            base_health_ratio: 1.0,
            wave_text: String::new(),
            waves_started: 0,
            start_wave_available: false,
            selected_tower: None,
            outcome: SessionOutcome::Running,
        }
    }
}

/// World queries captured for one frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneSnapshot<'a> {
    /// Enemies on the path.
    pub enemies: &'a EnemyView,
    /// Placed towers.
    pub towers: &'a TowerView,
    /// Attack lines that are still visible.
    pub attack_events: &'a [AttackEvent],
    /// Economy and progress counters.
    pub session: SessionSnapshot,
    /// Wave readout.
    pub wave_status: WaveStatus,
    /// Tower type chosen by the player.
    pub selected_tower: Option<TowerKind>,
    /// Session time of the snapshot.
    pub now: Duration,
    /// Display lifetime of attack lines.
    pub attack_effect_lifetime: Duration,
}

/// Scene description combining the static level with the latest world state.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Build grid.
    pub tile_grid: TileGridPresentation,
    /// Waypoints of the enemy path.
    pub path: Vec<Vec2>,
    /// Color of the path strip.
    pub path_color: Color,
    /// Towers to draw.
    pub towers: Vec<SceneTower>,
    /// Enemies to draw.
    pub enemies: Vec<SceneEnemy>,
    /// Attack lines to draw.
    pub attack_lines: Vec<AttackLine>,
    /// Interface strip contents.
    pub hud: Hud,
}

impl Scene {
    /// Creates a scene for a level with nothing on it yet.
    #[must_use]
    pub fn new(tile_grid: TileGridPresentation, path: &[WorldPoint]) -> Self {
        Self {
            tile_grid,
            path: path.iter().copied().map(to_vec2).collect(),
            path_color: palette::BROWN,
            towers: Vec::new(),
            enemies: Vec::new(),
            attack_lines: Vec::new(),
            hud: Hud::default(),
        }
    }

    /// Location of the base the enemies walk toward.
    #[must_use]
    pub fn base(&self) -> Option<Vec2> {
        self.path.last().copied()
    }

    /// Replaces the dynamic parts of the scene with the provided snapshot.
    pub fn refresh(&mut self, snapshot: &SceneSnapshot<'_>) {
        let tower_size = (self.tile_grid.tile_length - 2.0 * TOWER_INSET).max(0.0);

        self.towers.clear();
        self.towers.extend(snapshot.towers.iter().map(|tower| {
            let hidden = tower.ability.is_hidden();
            let base = tower_color(tower.kind);
            SceneTower {
                id: tower.id,
                kind: tower.kind,
                center: to_vec2(tower.center),
                size: tower_size,
                range: tower.range,
                color: if hidden { base.lighten(0.6) } else { base },
                hidden,
            }
        }));

        self.enemies.clear();
        self.enemies
            .extend(snapshot.enemies.iter().map(|enemy| SceneEnemy {
                id: enemy.id,
                kind: enemy.kind,
                position: to_vec2(enemy.position),
                radius: ENEMY_RADIUS,
                color: palette::YELLOW,
                health_ratio: enemy.health_ratio(),
            }));

        let lifetime = snapshot.attack_effect_lifetime.as_secs_f32();
        self.attack_lines.clear();
        self.attack_lines
            .extend(snapshot.attack_events.iter().map(|event| {
                let age = snapshot.now.saturating_sub(event.created_at).as_secs_f32();
                let opacity = if lifetime > 0.0 {
                    (1.0 - age / lifetime).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                AttackLine {
                    from: to_vec2(event.from),
                    to: to_vec2(event.to),
                    color: palette::RED.with_alpha(opacity),
                }
            }));

        let session = snapshot.session;
        self.hud = Hud {
            currency: session.currency,
            base_health: session.base_health,
            base_health_ratio: session.base_health_ratio(),
            wave_text: snapshot.wave_status.to_string(),
            waves_started: session.waves_started,
            start_wave_available: session.outcome == SessionOutcome::Running
                && matches!(snapshot.wave_status, WaveStatus::AwaitingStart { .. }),
            selected_tower: snapshot.selected_tower,
            outcome: session.outcome,
        };
    }
}

/// Fill color of a tower type.
#[must_use]
pub const fn tower_color(kind: TowerKind) -> Color {
    match kind {
        TowerKind::MeerkatScout => palette::RED,
        TowerKind::ChameleonSniper => palette::BLACK,
    }
}

fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Wild Defense scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the backend, and refreshes the scene before it is
    /// presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}
