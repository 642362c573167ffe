//! Food catalog loader
//!
//! Reads a JSON array of food records from a file and seeds the foods
//! table. Records run through the validated `Food` constructor, so a
//! catalog with negative nutrients is rejected as a whole.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::Deserialize;
use thiserror::Error;

use crate::db::DbResult;
use crate::error::ValidationError;
use crate::models::{Food, FoodCategory, Nutrients};

/// Catalog loading error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// One record of the catalog file
#[derive(Debug, Deserialize)]
struct FoodRecord {
    id: i64,
    name: String,
    #[serde(default)]
    category: FoodCategory,
    #[serde(default)]
    energy_kcal: f64,
    #[serde(default)]
    protein_g: f64,
    #[serde(default)]
    fat_g: f64,
    #[serde(default)]
    carbs_g: f64,
    #[serde(default)]
    fiber_g: f64,
    #[serde(default)]
    calcium_mg: f64,
}

/// Load a food catalog from a JSON file
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<Food>, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    let records: Vec<FoodRecord> = serde_json::from_str(&contents)?;

    let mut foods = Vec::with_capacity(records.len());
    for record in records {
        let nutrients = Nutrients::new(
            record.energy_kcal,
            record.protein_g,
            record.fat_g,
            record.carbs_g,
            record.fiber_g,
            record.calcium_mg,
        )?;
        foods.push(Food::new(record.id, record.name, record.category, nutrients)?);
    }
    Ok(foods)
}

/// Insert catalog foods into the foods table, skipping ids already
/// present. Returns the number of rows inserted.
pub fn seed_foods(conn: &Connection, foods: &[Food]) -> DbResult<usize> {
    let mut inserted = 0;
    let mut stmt = conn.prepare(
        r#"
        INSERT OR IGNORE INTO foods (
            id, name, category,
            energy_kcal, protein_g, fat_g, carbs_g, fiber_g, calcium_mg
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )?;

    for food in foods {
        inserted += stmt.execute(params![
            food.id(),
            food.name(),
            food.category().as_str(),
            food.energy_kcal(),
            food.protein_g(),
            food.fat_g(),
            food.carbs_g(),
            food.fiber_g(),
            food.calcium_mg(),
        ])?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    const SAMPLE: &str = r#"[
        {
            "id": 1,
            "name": "Apple",
            "category": "fruit",
            "energy_kcal": 52.0,
            "protein_g": 0.3,
            "fat_g": 0.2,
            "carbs_g": 14.0,
            "fiber_g": 2.4,
            "calcium_mg": 6.0
        },
        {
            "id": 2,
            "name": "Rice",
            "category": "grain",
            "energy_kcal": 130.0,
            "carbs_g": 28.0
        }
    ]"#;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("calorize-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_foods() {
        let path = write_temp("catalog.json", SAMPLE);
        let foods = load_foods(&path).unwrap();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].name(), "Apple");
        assert_eq!(foods[0].category(), FoodCategory::Fruit);
        // Omitted fields default to zero
        assert_eq!(foods[1].protein_g(), 0.0);
        assert_eq!(foods[1].carbs_g(), 28.0);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let path = write_temp("broken.json", "[{\"id\": ");
        assert!(matches!(load_foods(&path), Err(CatalogError::Json(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_negative_nutrients() {
        let path = write_temp(
            "negative.json",
            r#"[{"id": 1, "name": "Bad", "energy_kcal": -5.0}]"#,
        );
        assert!(matches!(load_foods(&path), Err(CatalogError::Invalid(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_rejects_missing_file() {
        let missing = std::env::temp_dir().join("calorize-no-such-catalog.json");
        assert!(matches!(load_foods(missing), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_seed_skips_existing_ids() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let path = write_temp("seed.json", SAMPLE);
        let foods = load_foods(&path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(seed_foods(&conn, &foods).unwrap(), 2);
        // Seeding again is a no-op
        assert_eq!(seed_foods(&conn, &foods).unwrap(), 0);

        let stored = Food::list(&conn).unwrap();
        assert_eq!(stored.len(), 2);
    }
}
