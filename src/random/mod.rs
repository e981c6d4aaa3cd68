//! Seedable random streams.
//!
//! A [`RandomState`] holds one base seed and lazily creates an independent generator per
//! [`RngId`] type. Each stream is seeded from the base seed plus a hash of the stream name, so
//! adding draws to one stream never shifts the values produced by another. The network owns
//! one `RandomState` for topology generation and each simulation owns one for the epidemic.
mod macros;
mod random_state;

use std::any::Any;

pub use macros::define_rng;
pub use random_state::RandomState;

use crate::rand::SeedableRng;

pub trait RngId: Copy + Clone + 'static {
    type RngType: SeedableRng;
    fn get_name() -> &'static str;
}

// This is a wrapper that allows for future support for different types of
// random number generators (anything that implements SeedableRng is valid).
struct RngHolder {
    rng: Box<dyn Any>,
}
