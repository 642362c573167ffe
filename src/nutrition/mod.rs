//! Nutrition calculation module
//!
//! Daily goal derivation from a user's physical attributes.

pub mod goals;

pub use goals::{
    basal_rate, carb_target, energy_target, fat_target, macro_targets, protein_target,
    DEFAULT_AGE,
};
