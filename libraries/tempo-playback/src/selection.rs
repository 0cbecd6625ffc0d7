//! Next/previous track selection
//!
//! Decisions depend only on catalog order, the current track, the shuffle
//! flag and the repeat mode. The random source for shuffle is injected so
//! picks can be reproduced.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt;
use tempo_core::{Catalog, Track, TrackId};

use crate::types::RepeatMode;

/// Track selection policy
pub struct SelectionPolicy {
    rng: Box<dyn RngCore + Send>,
}

impl SelectionPolicy {
    /// Create a policy drawing shuffle picks from `rng`
    pub fn new(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Deterministic policy for a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Policy seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Track to play after `current`
    ///
    /// - Repeat One: the current track again
    /// - Shuffle: a uniformly random other track (the only track when the
    ///   catalog has one)
    /// - Otherwise the next track in catalog order, wrapping only under
    ///   Repeat All
    ///
    /// Returns `None` when nothing should play next, when the catalog is
    /// empty, or when nothing is selected.
    pub fn next<'a>(
        &mut self,
        catalog: &'a Catalog,
        current: Option<TrackId>,
        shuffle: bool,
        repeat: RepeatMode,
    ) -> Option<&'a Track> {
        let index = catalog.index_of(current?)?;
        let len = catalog.len();

        if repeat == RepeatMode::One {
            return catalog.get(index);
        }

        if shuffle {
            return catalog.get(self.random_other(index, len));
        }

        if index + 1 == len && repeat != RepeatMode::All {
            return None;
        }

        catalog.get((index + 1) % len)
    }

    /// Track to play before `current`
    ///
    /// Always sequential regardless of shuffle; wraps from the first track
    /// to the last.
    pub fn previous<'a>(&self, catalog: &'a Catalog, current: Option<TrackId>) -> Option<&'a Track> {
        let index = catalog.index_of(current?)?;
        let previous = if index == 0 {
            catalog.len() - 1
        } else {
            index - 1
        };
        catalog.get(previous)
    }

    /// Uniform pick from `0..len` excluding `exclude` (when len > 1)
    fn random_other(&mut self, exclude: usize, len: usize) -> usize {
        if len <= 1 {
            return exclude;
        }

        let pick = self.rng.gen_range(0..len - 1);
        if pick >= exclude {
            pick + 1
        } else {
            pick
        }
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl fmt::Debug for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionPolicy").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_catalog(count: u32) -> Catalog {
        Catalog::new(
            (1..=count)
                .map(|id| Track::new(id, format!("Track {}", id), format!("audio/{}.mp3", id)))
                .collect(),
        )
        .unwrap()
    }

    fn id(n: u32) -> Option<TrackId> {
        Some(TrackId::new(n))
    }

    #[test]
    fn random_other_never_returns_excluded() {
        let mut policy = SelectionPolicy::seeded(7);
        for exclude in 0..5 {
            for _ in 0..200 {
                let pick = policy.random_other(exclude, 5);
                assert_ne!(pick, exclude);
                assert!(pick < 5);
            }
        }
    }

    #[test]
    fn random_other_covers_all_candidates() {
        let mut policy = SelectionPolicy::seeded(11);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[policy.random_other(2, 4)] = true;
        }
        assert_eq!(seen, [true, true, false, true]);
    }

    #[test]
    fn sequential_next_and_stop() {
        let catalog = create_catalog(3);
        let mut policy = SelectionPolicy::seeded(1);

        let next = policy.next(&catalog, id(1), false, RepeatMode::Off);
        assert_eq!(next.map(|t| t.id), id(2));

        assert!(policy.next(&catalog, id(3), false, RepeatMode::Off).is_none());
    }

    #[test]
    fn previous_wraps_to_last() {
        let catalog = create_catalog(3);
        let policy = SelectionPolicy::seeded(1);

        assert_eq!(policy.previous(&catalog, id(1)).map(|t| t.id), id(3));
        assert_eq!(policy.previous(&catalog, id(3)).map(|t| t.id), id(2));
    }

    #[test]
    fn seeded_policies_agree() {
        let catalog = create_catalog(10);
        let mut a = SelectionPolicy::seeded(42);
        let mut b = SelectionPolicy::seeded(42);

        for _ in 0..20 {
            let pick_a = a.next(&catalog, id(5), true, RepeatMode::Off).map(|t| t.id);
            let pick_b = b.next(&catalog, id(5), true, RepeatMode::Off).map(|t| t.id);
            assert_eq!(pick_a, pick_b);
        }
    }
}
