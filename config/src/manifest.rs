//! TOML level file layout.

use std::time::Duration;

use serde::Deserialize;
use wild_defense_core::{
    EnemyKind, EnemyStats, SpawnEntry, TowerKind, TowerStats, Wave, WaveSchedule, WorldPoint,
};

use crate::{
    ConfigError, EconomyPolicy, EnemyCatalog, GameConfig, GridConfig, TowerCatalog,
    SUPPORTED_LEVEL_VERSION,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Level {
    version: u32,
    path: Option<Vec<[f32; 2]>>,
    grid: Option<RawGrid>,
    economy: Option<RawEconomy>,
    enemies: Option<RawEnemies>,
    towers: Option<RawTowers>,
    waves: Option<Vec<RawWave>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrid {
    columns: u32,
    rows: u32,
    cell_length: f32,
    reserved_rows: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEconomy {
    starting_currency: u32,
    base_health: i32,
    leak_penalty: i32,
    attack_effect_lifetime_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnemies {
    poacher: Option<EnemyStats>,
    deforester: Option<EnemyStats>,
    invasive: Option<EnemyStats>,
    bulldozer: Option<EnemyStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTowers {
    meerkat: Option<TowerStats>,
    chameleon: Option<TowerStats>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWave {
    spawns: Vec<RawSpawn>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSpawn {
    kind: EnemyKind,
    delay_ms: u64,
}

pub(crate) fn parse(contents: &str) -> Result<GameConfig, ConfigError> {
    let level: Level = toml::from_str(contents)?;
    if level.version != SUPPORTED_LEVEL_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: level.version,
            expected: SUPPORTED_LEVEL_VERSION,
        });
    }

    let fallback = GameConfig::default();

    let grid = level.grid.map_or(*fallback.grid(), |grid| {
        GridConfig::new(grid.columns, grid.rows, grid.cell_length, grid.reserved_rows)
    });

    let path = level.path.map_or_else(
        || fallback.path().to_vec(),
        |points| {
            points
                .into_iter()
                .map(|[x, y]| WorldPoint::new(x, y))
                .collect()
        },
    );

    let economy = level.economy.map_or(*fallback.economy(), |economy| {
        EconomyPolicy::new(
            economy.starting_currency,
            economy.base_health,
            economy.leak_penalty,
            Duration::from_millis(economy.attack_effect_lifetime_ms),
        )
    });

    let enemies = merge_enemies(*fallback.enemies(), level.enemies.unwrap_or_default());
    let towers = merge_towers(*fallback.towers(), level.towers.unwrap_or_default());

    let waves = level.waves.map_or_else(
        || fallback.waves().clone(),
        |waves| {
            WaveSchedule::new(
                waves
                    .into_iter()
                    .map(|wave| {
                        Wave::new(
                            wave.spawns
                                .into_iter()
                                .map(|spawn| {
                                    SpawnEntry::new(
                                        spawn.kind,
                                        Duration::from_millis(spawn.delay_ms),
                                    )
                                })
                                .collect(),
                        )
                    })
                    .collect(),
            )
        },
    );

    GameConfig::new(grid, path, enemies, towers, waves, economy)
}

fn merge_enemies(mut catalog: EnemyCatalog, overrides: RawEnemies) -> EnemyCatalog {
    let entries = [
        (EnemyKind::Poacher, overrides.poacher),
        (EnemyKind::Deforester, overrides.deforester),
        (EnemyKind::InvasiveSpecies, overrides.invasive),
        (EnemyKind::Bulldozer, overrides.bulldozer),
    ];
    for (kind, stats) in entries {
        if let Some(stats) = stats {
            catalog = catalog.with(kind, stats);
        }
    }
    catalog
}

fn merge_towers(mut catalog: TowerCatalog, overrides: RawTowers) -> TowerCatalog {
    let entries = [
        (TowerKind::MeerkatScout, overrides.meerkat),
        (TowerKind::ChameleonSniper, overrides.chameleon),
    ];
    for (kind, stats) in entries {
        if let Some(stats) = stats {
            catalog = catalog.with(kind, stats);
        }
    }
    catalog
}
