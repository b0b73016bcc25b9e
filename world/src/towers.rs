//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use wild_defense_core::{
    Ability, CellCoord, EnemyId, TowerId, TowerKind, TowerSnapshot, TowerStats, WorldPoint,
};
use wild_defense_system_tower_targeting::{nearest_in_range, Candidate};

use crate::enemies::Enemy;

/// Outcome of a successful attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Strike {
    pub(crate) enemy: EnemyId,
    pub(crate) damage: i32,
    pub(crate) remaining_health: i32,
    pub(crate) from: WorldPoint,
    pub(crate) to: WorldPoint,
}

/// Stationary actor that periodically damages the nearest enemy in range.
#[derive(Clone, Debug)]
pub(crate) struct Tower {
    id: TowerId,
    kind: TowerKind,
    cell: CellCoord,
    center: WorldPoint,
    level: u32,
    stats: TowerStats,
    last_attack: Duration,
    ability: Ability,
}

impl Tower {
    pub(crate) fn place(
        id: TowerId,
        kind: TowerKind,
        cell: CellCoord,
        center: WorldPoint,
        stats: TowerStats,
    ) -> Self {
        Self {
            id,
            kind,
            cell,
            center,
            level: 1,
            stats,
            last_attack: Duration::ZERO,
            ability: kind.initial_ability(),
        }
    }

    pub(crate) const fn id(&self) -> TowerId {
        self.id
    }

    /// Index of the closest living enemy within range.
    ///
    /// Enemies whose health ran out this tick stay targetable until their
    /// death is resolved.
    pub(crate) fn find_target(&self, enemies: &[Enemy]) -> Option<usize> {
        let candidates = enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| !enemy.is_dead())
            .map(|(index, enemy)| Candidate::new(index, enemy.position()));
        nearest_in_range(self.center, self.stats.range, candidates).map(|selection| selection.key)
    }

    /// Cooldown between attacks, or `None` when it does not fit in a `Duration`.
    fn attack_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(1.0 / f64::from(self.stats.attack_speed)).ok()
    }

    pub(crate) fn can_attack(&self, now: Duration) -> bool {
        self.attack_interval()
            .is_some_and(|interval| now.saturating_sub(self.last_attack) >= interval)
    }

    /// Hits the nearest enemy in range when the cooldown has elapsed.
    ///
    /// The cooldown only restarts when a target was actually hit.
    pub(crate) fn attack(&mut self, now: Duration, enemies: &mut [Enemy]) -> Option<Strike> {
        if !self.can_attack(now) {
            return None;
        }
        let index = self.find_target(enemies)?;
        let enemy = &mut enemies[index];

        let remaining_health = enemy.take_damage(self.stats.damage);
        self.last_attack = now;

        Some(Strike {
            enemy: enemy.id(),
            damage: self.stats.damage,
            remaining_health,
            from: self.center,
            to: enemy.position(),
        })
    }

    /// Triggers the cosmetic ability and returns its new state.
    pub(crate) fn use_ability(&mut self) -> Ability {
        self.ability = self.ability.used();
        self.ability
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            center: self.center,
            level: self.level,
            range: self.stats.range,
            damage: self.stats.damage,
            attack_speed: self.stats.attack_speed,
            cost: self.stats.cost,
            ability: self.ability,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, Tower>,
    occupancy: BTreeMap<CellCoord, TowerId>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            occupancy: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    pub(crate) fn is_occupied(&self, cell: CellCoord) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// Stores a new tower on a free cell and returns its identifier.
    pub(crate) fn insert(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
        center: WorldPoint,
        stats: TowerStats,
    ) -> TowerId {
        debug_assert!(!self.is_occupied(cell), "cell {cell:?} already holds a tower");
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.occupancy.insert(cell, id);
        let _ = self
            .entries
            .insert(id, Tower::place(id, kind, cell, center, stats));
        id
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Tower> {
        self.entries.values()
    }

    /// Towers in identifier order, which is also placement order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tower> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use wild_defense_core::{EnemyKind, EnemyStats};

    fn sniper() -> Tower {
        Tower::place(
            TowerId::new(0),
            TowerKind::ChameleonSniper,
            CellCoord::new(0, 0),
            WorldPoint::new(0.0, 0.0),
            TowerStats::new(30, 3.0, 100.0, 100),
        )
    }

    fn stationary_enemy(id: u32, x: f32) -> Enemy {
        let path: Arc<[WorldPoint]> =
            vec![WorldPoint::new(x, 0.0), WorldPoint::new(x + 1_000.0, 0.0)].into();
        Enemy::spawn(
            EnemyId::new(id),
            EnemyKind::Poacher,
            EnemyStats::new(50, 0.0, 5, 10),
            path,
        )
    }

    #[test]
    fn targets_closest_enemy_within_range() {
        let tower = sniper();
        let enemies = vec![
            stationary_enemy(0, 80.0),
            stationary_enemy(1, 120.0),
            stationary_enemy(2, 50.0),
        ];

        assert_eq!(tower.find_target(&enemies), Some(2));
    }

    #[test]
    fn unresolved_enemy_with_exhausted_health_stays_targetable() {
        let tower = sniper();
        let mut enemies = vec![stationary_enemy(0, 10.0), stationary_enemy(1, 90.0)];
        let _ = enemies[0].take_damage(50);
        assert_eq!(tower.find_target(&enemies), Some(0));

        assert!(enemies[0].resolve_death());
        assert_eq!(tower.find_target(&enemies), Some(1));
    }

    #[test]
    fn interval_too_long_for_duration_never_fires() {
        let mut tower = Tower::place(
            TowerId::new(0),
            TowerKind::MeerkatScout,
            CellCoord::new(0, 0),
            WorldPoint::new(0.0, 0.0),
            TowerStats::new(5, 1e-20, 150.0, 75),
        );
        let mut enemies = vec![stationary_enemy(0, 10.0)];

        assert!(!tower.can_attack(Duration::MAX));
        assert_eq!(tower.attack(Duration::from_secs(3_600), &mut enemies), None);
    }

    #[test]
    fn first_attack_waits_for_one_interval() {
        let tower = sniper();

        assert!(!tower.can_attack(Duration::from_millis(333)));
        assert!(tower.can_attack(Duration::from_millis(334)));
    }

    #[test]
    fn missing_target_leaves_cooldown_untouched() {
        let mut tower = sniper();
        let mut enemies = vec![stationary_enemy(0, 500.0)];

        assert_eq!(tower.attack(Duration::from_secs(1), &mut enemies), None);
        assert_eq!(tower.last_attack, Duration::ZERO);

        enemies.push(stationary_enemy(1, 40.0));
        let strike = tower
            .attack(Duration::from_secs(1), &mut enemies)
            .expect("target in range");
        assert_eq!(strike.enemy, EnemyId::new(1));
        assert_eq!(strike.remaining_health, 20);
        assert_eq!(tower.last_attack, Duration::from_secs(1));
    }

    #[test]
    fn never_fires_twice_within_one_interval() {
        let mut tower = sniper();
        let mut enemies = vec![stationary_enemy(0, 10.0)];
        let mut fired_at = Vec::new();

        for millis in (0..=2_000).step_by(10) {
            let now = Duration::from_millis(millis);
            if tower.attack(now, &mut enemies).is_some() {
                fired_at.push(now);
            }
            if enemies[0].resolve_death() {
                enemies[0] = stationary_enemy(1, 10.0);
            }
        }

        assert!(fired_at.len() >= 5);
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs_f64(1.0 / 3.0));
        }
    }

    #[test]
    fn camouflage_toggles_on_each_use() {
        let mut tower = sniper();
        assert_eq!(tower.use_ability(), Ability::Camouflage { hidden: false });
        assert_eq!(tower.use_ability(), Ability::Camouflage { hidden: true });
    }

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = TowerRegistry::new();
        let stats = TowerStats::new(5, 2.5, 150.0, 75);
        let first = registry.insert(
            TowerKind::MeerkatScout,
            CellCoord::new(1, 1),
            WorldPoint::new(96.0, 96.0),
            stats,
        );
        let second = registry.insert(
            TowerKind::MeerkatScout,
            CellCoord::new(2, 1),
            WorldPoint::new(160.0, 96.0),
            stats,
        );

        assert_eq!(first, TowerId::new(0));
        assert_eq!(second, TowerId::new(1));
        assert!(registry.is_occupied(CellCoord::new(2, 1)));
        assert!(!registry.is_occupied(CellCoord::new(3, 1)));
    }
}
