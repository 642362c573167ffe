//! Calorize
//!
//! Application launcher: prepares the local database and food catalog for
//! the presentation layer.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use calorize::{build_info, catalog, db};

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("CALORIZE_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("calorize.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("calorize=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    // Get database path
    let db_path = get_database_path();
    tracing::info!(path = %db_path.display(), "database path");

    // Ensure data directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Initialize database and run migrations
    let database = db::Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        tracing::info!(version, "database schema ready");
        Ok(())
    })?;

    // Seed the food catalog when a catalog file is configured
    if let Ok(catalog_path) = std::env::var("CALORIZE_FOODS_JSON") {
        let foods = catalog::load_foods(&catalog_path)?;
        let inserted = database.with_conn(|conn| catalog::seed_foods(conn, &foods))?;
        tracing::info!(
            total = foods.len(),
            inserted,
            path = %catalog_path,
            "food catalog seeded"
        );
    }

    Ok(())
}
