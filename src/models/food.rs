//! Food model
//!
//! An immutable catalog food with per-100g nutrients. Equality, ordering,
//! and hashing are keyed by id.

use std::cmp::Ordering;

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::error::{ValidationError, ValidationResult};

use super::Nutrients;

/// Food category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Meat,
    Dairy,
    Grain,
    #[default]
    Other,
}

impl FoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Fruit => "fruit",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Meat => "meat",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Grain => "grain",
            FoodCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fruit" => FoodCategory::Fruit,
            "vegetable" => FoodCategory::Vegetable,
            "meat" => FoodCategory::Meat,
            "dairy" => FoodCategory::Dairy,
            "grain" => FoodCategory::Grain,
            _ => FoodCategory::Other,
        }
    }
}

/// A food item with per-100g nutritional content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    id: i64,
    name: String,
    category: FoodCategory,
    nutrients: Nutrients,
}

impl Food {
    /// Create a new food, rejecting a blank name or negative nutrients
    pub fn new(
        id: i64,
        name: impl Into<String>,
        category: FoodCategory,
        nutrients: Nutrients,
    ) -> ValidationResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Missing("food name"));
        }
        nutrients.validate()?;
        Ok(Self {
            id,
            name,
            category,
            nutrients,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FoodCategory {
        self.category
    }

    pub fn nutrients(&self) -> &Nutrients {
        &self.nutrients
    }

    pub fn energy_kcal(&self) -> f64 {
        self.nutrients.energy_kcal
    }

    pub fn protein_g(&self) -> f64 {
        self.nutrients.protein_g
    }

    pub fn fat_g(&self) -> f64 {
        self.nutrients.fat_g
    }

    pub fn carbs_g(&self) -> f64 {
        self.nutrients.carbs_g
    }

    pub fn fiber_g(&self) -> f64 {
        self.nutrients.fiber_g
    }

    pub fn calcium_mg(&self) -> f64 {
        self.nutrients.calcium_mg
    }

    /// Derive a portion of this food for a gram amount. Catalog nutrients
    /// are per 100g, so the portion scales by grams / 100.
    pub fn portion(&self, grams: f64) -> ValidationResult<Self> {
        if grams <= 0.0 {
            return Err(ValidationError::invalid(
                "portion grams must be positive",
            ));
        }
        Ok(Self {
            id: self.id,
            name: self.name.clone(),
            category: self.category,
            nutrients: self.nutrients.scale(grams / 100.0),
        })
    }
}

impl Food {
    /// Construct without validation, for rows already validated on insert
    pub(crate) fn from_parts(
        id: i64,
        name: String,
        category: FoodCategory,
        nutrients: Nutrients,
    ) -> Self {
        Self {
            id,
            name,
            category,
            nutrients,
        }
    }
}

impl PartialEq for Food {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Food {}

impl PartialOrd for Food {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Food {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::hash::Hash for Food {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Food {
    /// Create a Food from a foods-table row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: FoodCategory::from_str(row.get::<_, String>("category")?.as_str()),
            nutrients: Nutrients {
                energy_kcal: row.get("energy_kcal")?,
                protein_g: row.get("protein_g")?,
                fat_g: row.get("fat_g")?,
                carbs_g: row.get("carbs_g")?,
                fiber_g: row.get("fiber_g")?,
                calcium_mg: row.get("calcium_mg")?,
            },
        })
    }

    /// Insert a food into the catalog
    pub fn insert(conn: &Connection, food: &Food) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT INTO foods (
                id, name, category,
                energy_kcal, protein_g, fat_g, carbs_g, fiber_g, calcium_mg
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                food.id,
                food.name,
                food.category.as_str(),
                food.nutrients.energy_kcal,
                food.nutrients.protein_g,
                food.nutrients.fat_g,
                food.nutrients.carbs_g,
                food.nutrients.fiber_g,
                food.nutrients.calcium_mg,
            ],
        )?;
        Ok(())
    }

    /// Get a catalog food by id
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(food) => Ok(Some(food)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List the whole catalog ordered by name
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods ORDER BY name ASC")?;

        let foods = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// Search catalog foods by name substring
    pub fn search_by_name(conn: &Connection, query: &str, limit: i64) -> DbResult<Vec<Self>> {
        let pattern = format!("%{}%", query);
        let mut stmt = conn.prepare(
            "SELECT * FROM foods WHERE name LIKE ?1 ORDER BY name ASC LIMIT ?2",
        )?;

        let foods = stmt
            .query_map(params![pattern, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }
}
