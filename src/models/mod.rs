//! Data models
//!
//! Domain entities and their database operations.

mod food;
mod food_log;
mod macro_targets;
mod meal;
mod nutrients;
mod shared_diet;
mod user;

pub use food::{Food, FoodCategory};
pub use food_log::FoodLogEntry;
pub use macro_targets::MacroTargets;
pub use meal::{Meal, MealType};
pub use nutrients::Nutrients;
pub use shared_diet::{SharedDiet, SharedDietConfig};
pub use user::{Gender, GoalDirection, User, UserConfig, WeightEntry};
