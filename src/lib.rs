//! Calorize Library
//!
//! Core functionality for diet tracking: user profiles, meals, the food
//! catalog, and daily nutritional goal computation.

pub mod build_info;
pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod session;
