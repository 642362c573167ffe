//! Shared diet model
//!
//! An immutable snapshot of foods one user shares with another on a date.
//! Built from a config with all fields validated before the snapshot exists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

use super::{Food, User};

/// Accumulated fields for a shared diet; all are required at finalize
#[derive(Debug, Clone, Default)]
pub struct SharedDietConfig {
    pub sender: Option<User>,
    pub recipient: Option<User>,
    pub foods: Option<Vec<Food>>,
    /// ISO `yyyy-MM-dd`
    pub date: Option<String>,
}

/// A validated shared-diet snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedDiet {
    sender: User,
    recipient: User,
    foods: Vec<Food>,
    date: NaiveDate,
}

impl SharedDiet {
    /// Finalize a config into a snapshot. Rejects missing fields, equal
    /// sender and recipient, an empty food list, or an unparseable date.
    pub fn new(config: SharedDietConfig) -> ValidationResult<Self> {
        let sender = config.sender.ok_or(ValidationError::Missing("sender"))?;
        let recipient = config
            .recipient
            .ok_or(ValidationError::Missing("recipient"))?;
        let foods = config.foods.ok_or(ValidationError::Missing("foods"))?;
        let date = config.date.ok_or(ValidationError::Missing("date"))?;

        if sender == recipient {
            return Err(ValidationError::invalid(
                "sender and recipient cannot be the same user",
            ));
        }
        if foods.is_empty() {
            return Err(ValidationError::invalid(
                "a shared diet must contain at least one food",
            ));
        }
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
            ValidationError::Parse {
                field: "date",
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            sender,
            recipient,
            foods,
            date,
        })
    }

    pub fn sender(&self) -> &User {
        &self.sender
    }

    pub fn recipient(&self) -> &User {
        &self.recipient
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Total energy over the shared foods, in kcal
    pub fn total_energy_kcal(&self) -> f64 {
        self.foods.iter().map(Food::energy_kcal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCategory, Gender, GoalDirection, Nutrients, UserConfig};

    fn user(email: &str) -> User {
        User::new(UserConfig {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            weight_kg: 60.0,
            height_cm: 165,
            gender: Gender::Female,
            goal: GoalDirection::Lose,
        })
        .unwrap()
    }

    /// Two users with distinct repository-assigned ids
    fn distinct_users() -> (User, User) {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        let mut sender = user("ana@example.com");
        let mut recipient = user("bruno@example.com");
        User::insert(&conn, &mut sender).unwrap();
        User::insert(&conn, &mut recipient).unwrap();
        (sender, recipient)
    }

    fn apple() -> Food {
        Food::new(
            1,
            "Apple",
            FoodCategory::Fruit,
            Nutrients::new(52.0, 0.3, 0.2, 14.0, 2.4, 6.0).unwrap(),
        )
        .unwrap()
    }

    fn config(sender: User, recipient: User) -> SharedDietConfig {
        SharedDietConfig {
            sender: Some(sender),
            recipient: Some(recipient),
            foods: Some(vec![apple()]),
            date: Some("2023-12-25".to_string()),
        }
    }

    #[test]
    fn test_valid_construction_and_total() {
        let (sender, recipient) = distinct_users();
        let diet = SharedDiet::new(config(sender, recipient)).unwrap();
        assert_eq!(diet.total_energy_kcal(), 52.0);
        assert_eq!(diet.foods().len(), 1);
        assert_eq!(
            diet.date(),
            NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()
        );
    }

    #[test]
    fn test_rejects_same_sender_and_recipient() {
        // Two unpersisted users share id 0, so they compare equal
        let cfg = config(user("ana@example.com"), user("bruno@example.com"));
        assert!(SharedDiet::new(cfg).is_err());
    }

    #[test]
    fn test_rejects_empty_food_list() {
        let (sender, recipient) = distinct_users();
        let mut cfg = config(sender, recipient);
        cfg.foods = Some(Vec::new());
        assert!(SharedDiet::new(cfg).is_err());
    }

    #[test]
    fn test_rejects_malformed_date() {
        let (sender, recipient) = distinct_users();
        let mut cfg = config(sender, recipient);
        cfg.date = Some("2023-13-45".to_string());
        assert!(SharedDiet::new(cfg).is_err());
    }

    #[test]
    fn test_rejects_missing_fields() {
        let cfg = SharedDietConfig::default();
        assert!(matches!(
            SharedDiet::new(cfg),
            Err(ValidationError::Missing("sender"))
        ));

        let cfg = SharedDietConfig {
            sender: Some(user("ana@example.com")),
            ..Default::default()
        };
        assert!(matches!(
            SharedDiet::new(cfg),
            Err(ValidationError::Missing("recipient"))
        ));
    }
}
