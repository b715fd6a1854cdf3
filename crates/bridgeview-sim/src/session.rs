// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simulation session state machine
//!
//! Idle (no entries) → Running (entries populated, one selected) → Idle on
//! reset. A new run implicitly discards the previous one. The session owns no
//! renderer resources; "apply appearance" is expressed by returning
//! `(component, Appearance)` pairs for the host to act on.

use crate::stress::DeformationSample;
use crate::{FORCE_DEFAULT, FORCE_MAX, FORCE_MIN};
use bridgeview_model::Appearance;
use rand::Rng;

/// One component participating in the current run.
#[derive(Clone, Debug)]
pub struct SimulationEntry<K> {
    pub component: K,
    /// Random coefficient in `[0.5, 2.0)`; purely cosmetic.
    pub stiffness: f32,
    /// Appearance snapshot taken when the run started.
    pub original: Appearance,
}

/// Session state for the force simulation overlay.
///
/// Exactly one instance exists per viewer; the hosting UI controller owns it
/// and drives it from slider/button events.
#[derive(Clone, Debug)]
pub struct SimulationSession<K> {
    force: f32,
    entries: Vec<SimulationEntry<K>>,
    /// Index into `entries`, `None` when nothing is selected.
    selected: Option<usize>,
}

impl<K: Copy + PartialEq> Default for SimulationSession<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + PartialEq> SimulationSession<K> {
    pub fn new() -> Self {
        Self {
            force: FORCE_DEFAULT,
            entries: Vec::new(),
            selected: None,
        }
    }

    /// Current global force in kN, always within the slider bounds.
    pub fn force(&self) -> f32 {
        self.force
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SimulationEntry<K>] {
        &self.entries
    }

    /// Start a new run over `count` components drawn uniformly without
    /// replacement from `pool`, using the thread-local RNG.
    ///
    /// Returns the restorations of the previous run (empty on a first run).
    pub fn start_random_run(
        &mut self,
        pool: &[(K, Appearance)],
        count: usize,
    ) -> Vec<(K, Appearance)> {
        self.start_random_run_with(pool, count, &mut rand::thread_rng())
    }

    /// As [`start_random_run`](Self::start_random_run) but with a caller
    /// provided RNG, so tests can seed.
    ///
    /// An empty pool is a no-op: no entries, no selection change. If `count`
    /// exceeds the pool, the whole pool is drawn.
    pub fn start_random_run_with<R: Rng + ?Sized>(
        &mut self,
        pool: &[(K, Appearance)],
        count: usize,
        rng: &mut R,
    ) -> Vec<(K, Appearance)> {
        if pool.is_empty() {
            return Vec::new();
        }

        let restorations = self.clear_entries();

        let draw = count.min(pool.len());
        for idx in rand::seq::index::sample(rng, pool.len(), draw) {
            let (component, original) = pool[idx];
            self.entries.push(SimulationEntry {
                component,
                stiffness: rng.gen_range(0.5..2.0),
                original,
            });
        }

        self.selected = if self.entries.is_empty() { None } else { Some(0) };
        log::debug!("simulation run started with {} entries", self.entries.len());
        restorations
    }

    /// Store a new global force, clamped to the slider bounds. Existing
    /// entries keep their stiffness; only the derived visuals change.
    pub fn apply_force(&mut self, force: f32) {
        self.force = force.clamp(FORCE_MIN, FORCE_MAX);
    }

    /// Current visuals for every entry, in entry order.
    pub fn visuals(&self) -> impl Iterator<Item = (K, DeformationSample, Appearance)> + '_ {
        let force = self.force;
        self.entries.iter().map(move |entry| {
            let sample = DeformationSample::evaluate(force, entry.stiffness);
            (entry.component, sample, sample.appearance())
        })
    }

    /// Select the entry for `component`, if it participates in the run.
    ///
    /// Returns true when found (the detail panel should refresh); on a miss
    /// the selection is left untouched and the caller decides what to do.
    pub fn select_by_component(&mut self, component: &K) -> bool {
        match self.entries.iter().position(|e| e.component == *component) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    /// The selected entry with its current sample, if any.
    pub fn selected(&self) -> Option<(&SimulationEntry<K>, DeformationSample)> {
        let entry = &self.entries[self.selected?];
        Some((entry, DeformationSample::evaluate(self.force, entry.stiffness)))
    }

    /// End the run: returns every entry's original appearance for the host
    /// to restore, empties the session and puts the force back to default.
    pub fn reset(&mut self) -> Vec<(K, Appearance)> {
        self.force = FORCE_DEFAULT;
        self.clear_entries()
    }

    fn clear_entries(&mut self) -> Vec<(K, Appearance)> {
        self.selected = None;
        self.entries
            .drain(..)
            .map(|e| (e.component, e.original))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgeview_model::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(n: u64) -> Vec<(u64, Appearance)> {
        (0..n)
            .map(|id| (id, Appearance::flat(Rgb::new(id as f32 / 100.0, 0.5, 0.5))))
            .collect()
    }

    #[test]
    fn test_empty_pool_is_noop() {
        let mut session = SimulationSession::<u64>::new();
        let restorations = session.start_random_run_with(&[], 1, &mut StdRng::seed_from_u64(1));
        assert!(restorations.is_empty());
        assert!(!session.is_running());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_single_draw_stiffness_range() {
        let pool = pool(10);
        for seed in 0..50 {
            let mut session = SimulationSession::new();
            session.start_random_run_with(&pool, 1, &mut StdRng::seed_from_u64(seed));
            assert_eq!(session.entries().len(), 1);
            let stiffness = session.entries()[0].stiffness;
            assert!((0.5..2.0).contains(&stiffness), "stiffness {stiffness}");
        }
    }

    #[test]
    fn test_draw_without_replacement() {
        let pool = pool(5);
        let mut session = SimulationSession::new();
        // count larger than the pool draws everything exactly once
        session.start_random_run_with(&pool, 99, &mut StdRng::seed_from_u64(3));
        let mut ids: Vec<u64> = session.entries().iter().map(|e| e.component).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_run_selects_first_entry() {
        let pool = pool(10);
        let mut session = SimulationSession::new();
        session.start_random_run_with(&pool, 3, &mut StdRng::seed_from_u64(4));
        let (entry, _) = session.selected().expect("selection after run");
        assert_eq!(entry.component, session.entries()[0].component);
    }

    #[test]
    fn test_apply_force_clamps() {
        let mut session = SimulationSession::<u64>::new();
        session.apply_force(-10.0);
        assert_eq!(session.force(), 0.0);
        session.apply_force(9999.0);
        assert_eq!(session.force(), 3000.0);
        session.apply_force(1234.0);
        assert_eq!(session.force(), 1234.0);
    }

    #[test]
    fn test_reset_restores_snapshots() {
        let pool = pool(8);
        let mut session = SimulationSession::new();
        session.start_random_run_with(&pool, 4, &mut StdRng::seed_from_u64(5));
        session.apply_force(2200.0);

        let restorations = session.reset();
        assert_eq!(restorations.len(), 4);
        for (component, appearance) in restorations {
            let (_, expected) = pool
                .iter()
                .find(|(id, _)| *id == component)
                .expect("restored component came from the pool");
            assert_eq!(appearance, *expected);
        }
        assert!(!session.is_running());
        assert!(session.selected().is_none());
        assert_eq!(session.force(), FORCE_DEFAULT);
    }

    #[test]
    fn test_rerun_restores_previous_run() {
        let pool = pool(8);
        let mut session = SimulationSession::new();
        session.start_random_run_with(&pool, 2, &mut StdRng::seed_from_u64(6));
        let first: Vec<u64> = session.entries().iter().map(|e| e.component).collect();

        let restorations =
            session.start_random_run_with(&pool, 2, &mut StdRng::seed_from_u64(7));
        let restored: Vec<u64> = restorations.iter().map(|(c, _)| *c).collect();
        assert_eq!(restored, first);
        assert_eq!(session.entries().len(), 2);
    }

    #[test]
    fn test_select_miss_keeps_selection() {
        let pool = pool(6);
        let mut session = SimulationSession::new();
        session.start_random_run_with(&pool, 2, &mut StdRng::seed_from_u64(8));
        let before = session.selected().map(|(e, _)| e.component);

        assert!(!session.select_by_component(&999));
        assert_eq!(session.selected().map(|(e, _)| e.component), before);
    }

    #[test]
    fn test_select_hit_moves_selection() {
        let pool = pool(6);
        let mut session = SimulationSession::new();
        session.start_random_run_with(&pool, 3, &mut StdRng::seed_from_u64(9));
        let last = session.entries()[2].component;

        assert!(session.select_by_component(&last));
        let (entry, _) = session.selected().unwrap();
        assert_eq!(entry.component, last);
    }

    #[test]
    fn test_visuals_follow_force() {
        let pool = pool(4);
        let mut session = SimulationSession::new();
        session.start_random_run_with(&pool, 4, &mut StdRng::seed_from_u64(10));

        session.apply_force(0.0);
        for (_, sample, appearance) in session.visuals() {
            assert_eq!(sample.intensity, 0.0);
            assert_eq!(appearance.diffuse, crate::stress::SAFE);
        }

        session.apply_force(3000.0);
        for (_, sample, _) in session.visuals() {
            // 3000 kN through any stiffness < 2.0 saturates the gradient
            assert_eq!(sample.intensity, 1.0);
        }
    }
}
