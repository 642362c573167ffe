//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- Account, physical attributes, stated goal
        -- ============================================
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            weight REAL NOT NULL,                -- current weight in kg
            height_cm INTEGER NOT NULL,
            gender TEXT CHECK(gender IN ('male', 'female', 'other')) NOT NULL,
            goal TEXT CHECK(goal IN ('maintain', 'lose', 'gain')) NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_users_email ON users(email);

        -- ============================================
        -- FRIENDS
        -- Directed friend links between users
        -- ============================================
        CREATE TABLE friends (
            user_id INTEGER NOT NULL,
            friend_id INTEGER NOT NULL,
            PRIMARY KEY (user_id, friend_id),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (friend_id) REFERENCES users(id) ON DELETE CASCADE
        );

        -- ============================================
        -- WEIGHTS
        -- Weight history, one row per recorded entry
        -- ============================================
        CREATE TABLE weights (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            weight REAL NOT NULL,                -- kg
            recorded_on TEXT NOT NULL DEFAULT (date('now')),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_weights_user ON weights(user_id, recorded_on);

        -- ============================================
        -- FOOD LOG
        -- Denormalized food snapshots logged per
        -- user, meal type, and date
        -- ============================================
        CREATE TABLE food_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            meal_type TEXT CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')) NOT NULL,
            food_name TEXT NOT NULL,
            energy_kcal REAL NOT NULL DEFAULT 0,
            protein_g REAL NOT NULL DEFAULT 0,
            carbs_g REAL NOT NULL DEFAULT 0,
            fat_g REAL NOT NULL DEFAULT 0,
            fiber_g REAL NOT NULL DEFAULT 0,
            calcium_mg REAL NOT NULL DEFAULT 0,
            logged_on TEXT NOT NULL DEFAULT (date('now')),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_food_log_user_date ON food_log(user_id, meal_type, logged_on);

        -- ============================================
        -- FOODS
        -- Food catalog with per-100g nutrients
        -- ============================================
        CREATE TABLE foods (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT CHECK(category IN ('fruit', 'vegetable', 'meat', 'dairy', 'grain', 'other')) NOT NULL,
            energy_kcal REAL NOT NULL DEFAULT 0,
            protein_g REAL NOT NULL DEFAULT 0,
            fat_g REAL NOT NULL DEFAULT 0,
            carbs_g REAL NOT NULL DEFAULT 0,
            fiber_g REAL NOT NULL DEFAULT 0,
            calcium_mg REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX idx_foods_name ON foods(name);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
