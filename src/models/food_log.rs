//! Food log model
//!
//! Persisted food snapshots logged under a user, meal type, and date. Rows
//! are denormalized: the logged food's name and nutrients are copied, so
//! later catalog edits never rewrite history.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::error::ValidationError;

use super::{Food, FoodCategory, MealType, Nutrients};

/// A persisted food-log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: i64,
    pub user_id: i64,
    pub meal_type: MealType,
    pub food_name: String,
    pub nutrients: Nutrients,
    pub logged_on: String,
}

/// Raw food_log row, converted through the meal-type parse
struct FoodLogRow {
    id: i64,
    user_id: i64,
    meal_type: String,
    food_name: String,
    nutrients: Nutrients,
    logged_on: String,
}

impl FoodLogRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            meal_type: row.get("meal_type")?,
            food_name: row.get("food_name")?,
            nutrients: Nutrients {
                energy_kcal: row.get("energy_kcal")?,
                protein_g: row.get("protein_g")?,
                carbs_g: row.get("carbs_g")?,
                fat_g: row.get("fat_g")?,
                fiber_g: row.get("fiber_g")?,
                calcium_mg: row.get("calcium_mg")?,
            },
            logged_on: row.get("logged_on")?,
        })
    }

    fn into_entry(self) -> DbResult<FoodLogEntry> {
        let meal_type =
            MealType::from_str(&self.meal_type).ok_or_else(|| ValidationError::Parse {
                field: "meal_type",
                message: format!("unrecognized meal type '{}'", self.meal_type),
            })?;
        Ok(FoodLogEntry {
            id: self.id,
            user_id: self.user_id,
            meal_type,
            food_name: self.food_name,
            nutrients: self.nutrients,
            logged_on: self.logged_on,
        })
    }
}

impl FoodLogEntry {
    /// The logged snapshot as a Food. The id is 0 and the category Other,
    /// since neither is stored with the row.
    fn into_food(self) -> Food {
        Food::from_parts(0, self.food_name, FoodCategory::Other, self.nutrients)
    }

    /// Log a food under a user's meal for a date
    pub fn log_food(
        conn: &Connection,
        user_id: i64,
        meal_type: MealType,
        date: NaiveDate,
        food: &Food,
    ) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO food_log (
                user_id, meal_type, food_name,
                energy_kcal, protein_g, carbs_g, fat_g, fiber_g, calcium_mg,
                logged_on
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                user_id,
                meal_type.as_str(),
                food.name(),
                food.energy_kcal(),
                food.protein_g(),
                food.carbs_g(),
                food.fat_g(),
                food.fiber_g(),
                food.calcium_mg(),
                date.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(())
    }

    /// Fetch the foods logged under a meal type on a date
    pub fn foods_for_meal(
        conn: &Connection,
        user_id: i64,
        meal_type: MealType,
        date: NaiveDate,
    ) -> DbResult<Vec<Food>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM food_log
            WHERE user_id = ?1 AND meal_type = ?2 AND logged_on = ?3
            ORDER BY id ASC
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![
                    user_id,
                    meal_type.as_str(),
                    date.format("%Y-%m-%d").to_string()
                ],
                FoodLogRow::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.into_entry().map(Self::into_food))
            .collect()
    }

    /// Fetch a user's most recently logged foods, newest first
    pub fn recent_foods(conn: &Connection, user_id: i64, limit: i64) -> DbResult<Vec<Food>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_log WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
        )?;

        let rows = stmt
            .query_map(params![user_id, limit], FoodLogRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.into_entry().map(Self::into_food))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::{Gender, GoalDirection, User, UserConfig};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn test_user(conn: &Connection) -> i64 {
        let mut user = User::new(UserConfig {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret123".to_string(),
            weight_kg: 70.0,
            height_cm: 175,
            gender: Gender::Female,
            goal: GoalDirection::Maintain,
        })
        .unwrap();
        User::insert(conn, &mut user).unwrap();
        user.id()
    }

    fn food(id: i64, name: &str, kcal: f64) -> Food {
        Food::new(
            id,
            name,
            FoodCategory::Fruit,
            Nutrients::new(kcal, 1.0, 0.5, 10.0, 2.0, 5.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_log_and_fetch_by_meal_and_date() {
        let conn = test_conn();
        let user_id = test_user(&conn);
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();

        FoodLogEntry::log_food(&conn, user_id, MealType::Breakfast, date, &food(1, "Apple", 52.0))
            .unwrap();
        FoodLogEntry::log_food(&conn, user_id, MealType::Lunch, date, &food(2, "Rice", 130.0))
            .unwrap();

        let breakfast =
            FoodLogEntry::foods_for_meal(&conn, user_id, MealType::Breakfast, date).unwrap();
        assert_eq!(breakfast.len(), 1);
        assert_eq!(breakfast[0].name(), "Apple");
        assert_eq!(breakfast[0].energy_kcal(), 52.0);

        let other_date = NaiveDate::from_ymd_opt(2023, 12, 26).unwrap();
        let none =
            FoodLogEntry::foods_for_meal(&conn, user_id, MealType::Breakfast, other_date).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_recent_foods_newest_first() {
        let conn = test_conn();
        let user_id = test_user(&conn);
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        for (id, name) in [(1, "Apple"), (2, "Rice"), (3, "Beans")] {
            FoodLogEntry::log_food(&conn, user_id, MealType::Dinner, date, &food(id, name, 100.0))
                .unwrap();
        }

        let recent = FoodLogEntry::recent_foods(&conn, user_id, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name(), "Beans");
        assert_eq!(recent[1].name(), "Rice");
    }

    #[test]
    fn test_unrecognized_meal_type_is_an_error() {
        let conn = test_conn();
        let user_id = test_user(&conn);

        // Sneak past the schema CHECK to simulate a row written by an
        // older or foreign schema.
        conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
            .unwrap();
        conn.execute(
            r#"
            INSERT INTO food_log (
                user_id, meal_type, food_name,
                energy_kcal, protein_g, carbs_g, fat_g, fiber_g, calcium_mg,
                logged_on
            ) VALUES (?1, 'brunch', 'Toast', 120.0, 4.0, 20.0, 2.0, 1.0, 10.0, '2024-01-10')
            "#,
            params![user_id],
        )
        .unwrap();

        let err = FoodLogEntry::recent_foods(&conn, user_id, 10).unwrap_err();
        assert!(matches!(
            err,
            crate::db::DbError::Validation(ValidationError::Parse {
                field: "meal_type",
                ..
            })
        ));
    }
}
