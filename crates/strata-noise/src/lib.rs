//! Parity random source and gradient/simplex noise used by every generation stage.
#![forbid(unsafe_code)]

pub mod math;
mod improved;
mod octaves;
mod random;
mod simplex;

pub use improved::ImprovedNoise;
pub use octaves::OctavesNoise;
pub use random::JavaRandom;
pub use simplex::{PerlinNoise, SimplexNoise};
