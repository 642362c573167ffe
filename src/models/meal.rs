//! Meal model
//!
//! A meal groups foods eaten at a time of day. Nutrient totals are folds
//! over the contained foods, recomputed on each read since foods are only
//! ever appended.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

use super::Food;

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").unwrap());

/// Meal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" | "snacks" => Some(MealType::Snack),
            _ => None,
        }
    }
}

/// A meal at a time of day with an append-only food list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    meal_type: MealType,
    time: String,
    foods: Vec<Food>,
}

impl Meal {
    /// Create an empty meal. The time must be 24-hour `HH:MM`.
    pub fn new(meal_type: MealType, time: impl Into<String>) -> ValidationResult<Self> {
        let time = time.into();
        if !TIME_RE.is_match(&time) {
            return Err(ValidationError::invalid(
                "invalid time, use the HH:MM 24-hour format",
            ));
        }
        Ok(Self {
            meal_type,
            time,
            foods: Vec::new(),
        })
    }

    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Append a food to the meal
    pub fn add_food(&mut self, food: Food) {
        self.foods.push(food);
    }

    /// Total energy over all foods, in kcal
    pub fn energy_kcal(&self) -> f64 {
        self.foods.iter().map(Food::energy_kcal).sum()
    }

    /// Total protein over all foods, in grams
    pub fn protein_g(&self) -> f64 {
        self.foods.iter().map(Food::protein_g).sum()
    }

    /// Total carbohydrate over all foods, in grams
    pub fn carbs_g(&self) -> f64 {
        self.foods.iter().map(Food::carbs_g).sum()
    }

    /// Total fat over all foods, in grams
    pub fn fat_g(&self) -> f64 {
        self.foods.iter().map(Food::fat_g).sum()
    }
}
