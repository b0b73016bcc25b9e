#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave spawner that turns elapsed wave time into enemy spawns.
//!
//! The spawner walks an immutable [`WaveSchedule`] through the
//! `idle -> active -> complete` cycle. It only tracks cursors and timestamps;
//! the world owns the enemies it asks for and reports back when they are gone.

use std::time::Duration;

use wild_defense_core::{EnemyKind, Wave, WavePhase, WaveSchedule};

/// Result of a request to start the next wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveStart {
    /// The next wave was loaded and is now active.
    Started {
        /// One-based number of the wave.
        wave: u32,
        /// Number of spawns the wave schedules.
        spawns: usize,
    },
    /// A wave is still active; nothing changed.
    AlreadyActive {
        /// One-based number of the active wave.
        wave: u32,
    },
    /// Every wave of the schedule has already been started.
    Exhausted,
}

/// Cursor over a wave schedule.
#[derive(Clone, Debug, Default)]
pub struct Spawner {
    phase: WavePhase,
    waves_started: usize,
    cursor: usize,
    started_at: Duration,
}

impl Spawner {
    /// Creates a spawner positioned before the first wave.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the next wave and records `now` as its start time.
    pub fn start_wave(&mut self, now: Duration, schedule: &WaveSchedule) -> WaveStart {
        if self.phase == WavePhase::Active {
            return WaveStart::AlreadyActive {
                wave: self.waves_started as u32,
            };
        }

        let Some(wave) = schedule.get(self.waves_started) else {
            return WaveStart::Exhausted;
        };

        self.waves_started += 1;
        self.phase = WavePhase::Active;
        self.cursor = 0;
        self.started_at = now;

        WaveStart::Started {
            wave: self.waves_started as u32,
            spawns: wave.len(),
        }
    }

    /// Emits the kind of every entry whose delay has elapsed at `now`.
    ///
    /// Several entries may become due within one call; they are emitted in
    /// schedule order.
    pub fn spawn_tick(&mut self, now: Duration, schedule: &WaveSchedule, out: &mut Vec<EnemyKind>) {
        if self.phase != WavePhase::Active {
            return;
        }
        let Some(wave) = self.active_wave(schedule) else {
            return;
        };

        let elapsed = now.saturating_sub(self.started_at);
        let entries = wave.entries();
        while let Some(entry) = entries.get(self.cursor) {
            if entry.delay() > elapsed {
                break;
            }
            out.push(entry.kind());
            self.cursor += 1;
        }
    }

    /// Completes the active wave once every spawn was issued and `all_dead` holds.
    ///
    /// Returns the one-based number of the wave that was completed.
    pub fn settle(&mut self, schedule: &WaveSchedule, all_dead: bool) -> Option<u32> {
        if self.phase != WavePhase::Active || !all_dead {
            return None;
        }
        if self.remaining_spawns(schedule) > 0 {
            return None;
        }
        self.phase = WavePhase::Complete;
        Some(self.waves_started as u32)
    }

    /// Progress of the current wave.
    #[must_use]
    pub const fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Number of waves started so far.
    #[must_use]
    pub const fn waves_started(&self) -> u32 {
        self.waves_started as u32
    }

    /// Scheduled entries of the active wave that have not been spawned yet.
    #[must_use]
    pub fn remaining_spawns(&self, schedule: &WaveSchedule) -> usize {
        if self.phase != WavePhase::Active {
            return 0;
        }
        self.active_wave(schedule)
            .map_or(0, |wave| wave.len().saturating_sub(self.cursor))
    }

    /// Waves of the schedule that have not been started yet.
    #[must_use]
    pub fn waves_remaining(&self, schedule: &WaveSchedule) -> usize {
        schedule.len().saturating_sub(self.waves_started)
    }

    fn active_wave<'a>(&self, schedule: &'a WaveSchedule) -> Option<&'a Wave> {
        self.waves_started
            .checked_sub(1)
            .and_then(|index| schedule.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wild_defense_core::SpawnEntry;

    fn schedule() -> WaveSchedule {
        WaveSchedule::new(vec![Wave::new(vec![
            SpawnEntry::new(EnemyKind::Poacher, Duration::ZERO),
            SpawnEntry::new(EnemyKind::Deforester, Duration::from_millis(500)),
        ])])
    }

    #[test]
    fn idle_spawner_emits_nothing() {
        let mut spawner = Spawner::new();
        let mut spawned = Vec::new();
        spawner.spawn_tick(Duration::from_secs(10), &schedule(), &mut spawned);
        assert!(spawned.is_empty());
        assert_eq!(spawner.phase(), WavePhase::Idle);
    }

    #[test]
    fn entry_due_exactly_at_its_delay_is_spawned() {
        let schedule = schedule();
        let mut spawner = Spawner::new();
        let _ = spawner.start_wave(Duration::from_millis(100), &schedule);

        let mut spawned = Vec::new();
        spawner.spawn_tick(Duration::from_millis(599), &schedule, &mut spawned);
        assert_eq!(spawned, vec![EnemyKind::Poacher]);

        spawner.spawn_tick(Duration::from_millis(600), &schedule, &mut spawned);
        assert_eq!(spawned, vec![EnemyKind::Poacher, EnemyKind::Deforester]);
    }

    #[test]
    fn settle_waits_for_the_cursor() {
        let schedule = schedule();
        let mut spawner = Spawner::new();
        let _ = spawner.start_wave(Duration::ZERO, &schedule);
        let mut spawned = Vec::new();
        spawner.spawn_tick(Duration::ZERO, &schedule, &mut spawned);

        assert_eq!(spawner.settle(&schedule, true), None);
        assert_eq!(spawner.remaining_spawns(&schedule), 1);
    }
}
