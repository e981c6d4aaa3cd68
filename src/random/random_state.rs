use std::any::TypeId;
use std::cell::{RefCell, RefMut};

use log::trace;

use crate::hashing::{hash_str, HashMap};
use crate::rand::distr::uniform::{SampleRange, SampleUniform};
use crate::rand::seq::{index, SliceRandom};
use crate::rand::{Rng, SeedableRng};
use crate::random::{RngHolder, RngId};

/// A base seed plus the lazily created generators derived from it.
///
/// Generators are stored in a `RefCell` so sampling only needs `&self`; this lets callers draw
/// numbers while holding shared borrows of the structures they are iterating.
pub struct RandomState {
    base_seed: u64,
    rng_holders: RefCell<HashMap<TypeId, RngHolder>>,
}

impl RandomState {
    #[must_use]
    pub fn new(base_seed: u64) -> Self {
        RandomState {
            base_seed,
            rng_holders: RefCell::new(HashMap::default()),
        }
    }

    /// Resets the base seed. Existing generators are dropped so they get re-seeded on next use.
    pub fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random state with seed {base_seed}");
        self.base_seed = base_seed;
        self.rng_holders.get_mut().clear();
    }

    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Gets a mutable reference to the generator associated with `R`, creating it if needed.
    fn get_rng<R: RngId>(&self) -> RefMut<R::RngType> {
        let rng_holders = self.rng_holders.borrow_mut();
        RefMut::map(rng_holders, |holders| {
            holders
                .entry(TypeId::of::<R>())
                .or_insert_with(|| {
                    trace!(
                        "creating new RNG {} (seed={})",
                        R::get_name(),
                        self.base_seed
                    );
                    let seed_offset = hash_str(R::get_name());
                    RngHolder {
                        rng: Box::new(R::RngType::seed_from_u64(
                            self.base_seed.wrapping_add(seed_offset),
                        )),
                    }
                })
                .rng
                .downcast_mut::<R::RngType>()
                .expect("RngHolder stored under the wrong type id")
        })
    }

    /// Applies `sampler` to the generator associated with the given [`RngId`].
    pub fn sample<R: RngId, T>(
        &self,
        _rng_type: R,
        sampler: impl FnOnce(&mut R::RngType) -> T,
    ) -> T {
        let mut rng = self.get_rng::<R>();
        sampler(&mut rng)
    }

    /// Gets a random sample within the range provided by `range`.
    pub fn sample_range<R: RngId, S, T>(&self, rng_id: R, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform,
    {
        self.sample(rng_id, |rng| rng.random_range(range))
    }

    /// Gets a random boolean value which is true with probability `p`.
    ///
    /// # Panics
    /// Panics if `p` is outside `[0, 1]`; callers validate rates before sampling.
    pub fn sample_bool<R: RngId>(&self, rng_id: R, p: f64) -> bool
    where
        R::RngType: Rng,
    {
        self.sample(rng_id, |rng| rng.random_bool(p))
    }

    /// Shuffles `values` in place (Fisher–Yates).
    pub fn shuffle<R: RngId, T>(&self, rng_id: R, values: &mut [T])
    where
        R::RngType: Rng,
    {
        self.sample(rng_id, |rng| values.shuffle(rng));
    }

    /// Draws `amount` distinct indices from `0..length`. Returns every index when `amount`
    /// exceeds `length`.
    pub fn sample_indices<R: RngId>(&self, rng_id: R, length: usize, amount: usize) -> Vec<usize>
    where
        R::RngType: Rng,
    {
        let amount = amount.min(length);
        self.sample(rng_id, |rng| index::sample(rng, length, amount).into_vec())
    }
}

impl Default for RandomState {
    fn default() -> Self {
        Self::new(0)
    }
}
