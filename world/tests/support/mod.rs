#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use wild_defense_config::{EconomyPolicy, EnemyCatalog, GameConfig, GridConfig, TowerCatalog};
use wild_defense_core::{Command, EnemyKind, Event, SpawnEntry, Wave, WaveSchedule, WorldPoint};
use wild_defense_world::{self as world, World};

pub fn level(
    path: &[(f32, f32)],
    enemies: EnemyCatalog,
    waves: Vec<Wave>,
    economy: EconomyPolicy,
) -> Arc<GameConfig> {
    let config = GameConfig::new(
        GridConfig::default(),
        path.iter().map(|&(x, y)| WorldPoint::new(x, y)).collect(),
        enemies,
        TowerCatalog::default(),
        WaveSchedule::new(waves),
        economy,
    )
    .expect("test level is valid");
    Arc::new(config)
}

pub fn wave(spawns: &[(EnemyKind, u64)]) -> Wave {
    Wave::new(
        spawns
            .iter()
            .map(|&(kind, delay_ms)| SpawnEntry::new(kind, Duration::from_millis(delay_ms)))
            .collect(),
    )
}

pub fn apply(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

pub fn tick(world: &mut World, now: Duration) -> Vec<Event> {
    apply(world, Command::Tick { now })
}
