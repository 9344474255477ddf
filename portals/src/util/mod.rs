//! Various utilities.

mod rand;

pub use rand::JavaRandom;
