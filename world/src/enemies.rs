//! Enemy entities travelling along the shared path.

use std::sync::Arc;

use wild_defense_core::{EnemyId, EnemyKind, EnemySnapshot, EnemyStats, WorldPoint};

/// Moving, damageable actor following the level path.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    path: Arc<[WorldPoint]>,
    path_index: usize,
    position: WorldPoint,
    health: i32,
    max_health: i32,
    speed: f32,
    damage: i32,
    reward: u32,
    dead: bool,
}

impl Enemy {
    /// Creates an enemy at the first waypoint with stats copied from its kind.
    pub(crate) fn spawn(
        id: EnemyId,
        kind: EnemyKind,
        stats: EnemyStats,
        path: Arc<[WorldPoint]>,
    ) -> Self {
        let position = path.first().copied().unwrap_or_default();
        Self {
            id,
            kind,
            path,
            path_index: 0,
            position,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            reward: stats.reward,
            dead: false,
        }
    }

    pub(crate) const fn id(&self) -> EnemyId {
        self.id
    }

    pub(crate) const fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub(crate) const fn position(&self) -> WorldPoint {
        self.position
    }

    pub(crate) const fn reward(&self) -> u32 {
        self.reward
    }

    pub(crate) const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Reports whether the enemy stands on the final waypoint.
    pub(crate) fn reached_end(&self) -> bool {
        self.path_index + 1 >= self.path.len()
    }

    /// Moves one step toward the next waypoint.
    ///
    /// When the waypoint is closer than one step the enemy snaps onto it and
    /// the leftover distance is dropped.
    pub(crate) fn advance(&mut self) {
        if self.dead || self.reached_end() {
            return;
        }

        let target = self.path[self.path_index + 1];
        let distance = self.position.distance(target);
        if distance < self.speed || distance <= f32::EPSILON {
            self.position = target;
            self.path_index += 1;
        } else {
            self.position = self.position.step_toward(target, self.speed);
        }
    }

    /// Removes health and returns what is left.
    pub(crate) fn take_damage(&mut self, damage: i32) -> i32 {
        debug_assert!(!self.dead, "dead enemies must not be attacked");
        self.health = self.health.saturating_sub(damage.max(0));
        self.health
    }

    /// Marks the enemy dead the first time its health is exhausted.
    pub(crate) fn resolve_death(&mut self) -> bool {
        if self.dead || self.health > 0 {
            return false;
        }
        self.dead = true;
        true
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            path_index: self.path_index,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            damage: self.damage,
            reward: self.reward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f32, f32)]) -> Arc<[WorldPoint]> {
        points
            .iter()
            .map(|&(x, y)| WorldPoint::new(x, y))
            .collect::<Vec<_>>()
            .into()
    }

    fn poacher(path: Arc<[WorldPoint]>) -> Enemy {
        Enemy::spawn(
            EnemyId::new(0),
            EnemyKind::Poacher,
            EnemyStats::new(50, 2.0, 5, 10),
            path,
        )
    }

    #[test]
    fn snaps_to_waypoint_closer_than_one_step() {
        let mut enemy = poacher(path(&[(0.0, 0.0), (1.5, 0.0), (1.5, 100.0)]));

        enemy.advance();

        assert_eq!(enemy.position(), WorldPoint::new(1.5, 0.0));
        assert_eq!(enemy.snapshot().path_index, 1);
    }

    #[test]
    fn moves_exactly_speed_when_waypoint_is_far() {
        let mut enemy = poacher(path(&[(0.0, 0.0), (0.0, 10.0)]));

        enemy.advance();

        assert_eq!(enemy.position(), WorldPoint::new(0.0, 2.0));
        assert_eq!(enemy.snapshot().path_index, 0);
    }

    #[test]
    fn reaches_last_index_within_step_bound_and_stays_on_path() {
        let points = [(0.0, 256.0), (512.0, 256.0), (512.0, 512.0), (768.0, 512.0)];
        let shared = path(&points);
        let length: f32 = shared
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum();
        let bound = (length / 2.0) as usize + shared.len();

        let mut enemy = poacher(Arc::clone(&shared));
        let mut steps = 0;
        while !enemy.reached_end() {
            enemy.advance();
            steps += 1;
            assert!(steps <= bound, "enemy needed more than {bound} steps");

            let index = enemy.snapshot().path_index;
            let position = enemy.position();
            let on_segment = shared.get(index + 1).map_or(true, |next| {
                let start = shared[index];
                let direct = start.distance(*next);
                let via = start.distance(position) + position.distance(*next);
                (via - direct).abs() < 1e-3
            });
            assert!(on_segment, "enemy left the path at {position:?}");
        }

        assert_eq!(enemy.position(), WorldPoint::new(768.0, 512.0));
        enemy.advance();
        assert_eq!(enemy.position(), WorldPoint::new(768.0, 512.0));
    }

    #[test]
    fn resolve_death_reports_once() {
        let mut enemy = poacher(path(&[(0.0, 0.0), (10.0, 0.0)]));
        assert!(!enemy.resolve_death());

        assert_eq!(enemy.take_damage(30), 20);
        assert_eq!(enemy.take_damage(30), -10);

        assert!(enemy.resolve_death());
        assert!(!enemy.resolve_death());
        assert!(enemy.is_dead());
    }

    #[test]
    fn dead_enemy_does_not_move() {
        let mut enemy = poacher(path(&[(0.0, 0.0), (10.0, 0.0)]));
        let _ = enemy.take_damage(50);
        assert!(enemy.resolve_death());

        enemy.advance();

        assert_eq!(enemy.position(), WorldPoint::new(0.0, 0.0));
    }
}
