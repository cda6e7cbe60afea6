//! Turning pieces into models and solving them.

mod model;
mod solve;

pub use model::{Decoder, HarmonyModel};
pub use solve::{harmonize, Harmonizer};
