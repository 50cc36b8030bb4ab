//! Helper functions could be used in api/, front/, ...

use sqlx::{
    SqlitePool,
    sqlite::SqliteConnectOptions,
};
use std::str::FromStr;

pub async fn setup_sqlite_db_pool(db_host: &str) -> anyhow::Result<SqlitePool> {
    Ok(SqlitePool::connect_with(
        SqliteConnectOptions::from_str(db_host)?
            .create_if_missing(true)
            .pragma("foreign_keys", "ON"),
    )
    .await?)
}

const SEED_PETS: [(&str, &str, i64); 7] = [
    ("Max", "Golden Retriever", 3),
    ("Bella", "Labrador", 2),
    ("Sneezy", "Cat", 5),
    ("Charlie", "Beagle", 4),
    ("Luna", "Pug", 1),
    ("Tyson", "Boxer", 3),
    ("Shasha", "Dog", 2),
];

/// Creates the schema if absent and seeds the pets table when it is empty.
/// Pets are provisioned here only; the app itself never writes to them.
pub async fn provision_database(db_pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(include_str!("../migrations/init.sql"))
        .execute(db_pool)
        .await?;

    let pet_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets;")
        .fetch_one(db_pool)
        .await?;

    if pet_count == 0 {
        log::info!("seeding pets table");
        for (name, breed, age) in SEED_PETS {
            sqlx::query("INSERT INTO pets (name, breed, age) VALUES ($1, $2, $3);")
                .bind(name)
                .bind(breed)
                .bind(age)
                .execute(db_pool)
                .await?;
        }
    }

    Ok(())
}

/// Rewrites a `DD/MM/YYYY` date to the canonical `YYYY-MM-DD` storage format.
///
/// Empty or whitespace-only input yields `None`. Input in any other shape,
/// including an already canonical date, passes through unchanged. Calendar
/// correctness is deliberately not checked: a pattern-matching value such as
/// `40/15/2024` is rewritten as-is.
pub fn normalize_date(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let [day, month, year] = trimmed.split('/').collect::<Vec<&str>>()[..] {
        if !day.is_empty() && !month.is_empty() && year.len() == 4 {
            return Some(format!("{year}-{month}-{day}"));
        }
    }

    Some(input.to_string())
}
