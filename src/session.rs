//! Login session context
//!
//! Cross-screen state scoped to one logged-in user: the selected date,
//! the meal being edited, and the food under inspection. Created at login
//! and passed to each screen handler by reference.

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::models::{Food, MealType, User};

/// State for one logged-in user
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
    selected_date: NaiveDate,
    meal_type: Option<MealType>,
    selected_food: Option<Food>,
}

impl Session {
    /// Start a session for a logged-in user, selecting today's date
    pub fn new(user: User) -> Self {
        Self {
            user,
            selected_date: chrono::Local::now().date_naive(),
            meal_type: None,
            selected_food: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn meal_type(&self) -> Option<MealType> {
        self.meal_type
    }

    pub fn selected_food(&self) -> Option<&Food> {
        self.selected_food.as_ref()
    }

    /// Select a date from `yyyy-MM-dd` text input
    pub fn select_date(&mut self, date: &str) -> ValidationResult<()> {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            ValidationError::Parse {
                field: "date",
                message: e.to_string(),
            }
        })?;
        self.selected_date = parsed;
        Ok(())
    }

    pub fn select_meal(&mut self, meal_type: MealType) {
        self.meal_type = Some(meal_type);
    }

    pub fn select_food(&mut self, food: Food) {
        self.selected_food = Some(food);
    }

    /// Drop the meal and food selections, keeping the date
    pub fn clear_selection(&mut self) {
        self.meal_type = None;
        self.selected_food = None;
    }
}
