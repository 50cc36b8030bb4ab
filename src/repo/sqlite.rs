use crate::models;
use async_trait::async_trait;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            breed: row.try_get("breed")?,
            age: row.try_get("age")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::vaccine::VaccineRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            vaccine_name: row.try_get("vaccine_name")?,
            date_issued: row.try_get("date_issued")?,
            next_due_date: row.try_get("next_due_date")?,
            category: row.try_get("type")?,
            image_url: row.try_get("image_url")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn get_all_pets(&self) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn pet_exists(&self, pet_id: i64) -> anyhow::Result<bool> {
        Ok(
            sqlx::query_scalar::<_, bool>(sqlite_queries::QUERY_PET_EXISTS)
                .bind(pet_id)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn get_vaccine_records(
        &self,
        pet_id: Option<i64>,
    ) -> anyhow::Result<Vec<models::vaccine::VaccineRecord>> {
        Ok(sqlx::query_as::<_, models::vaccine::VaccineRecord>(
            sqlite_queries::QUERY_GET_VACCINE_RECORDS,
        )
        .bind(pet_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn insert_vaccine_record(
        &self,
        record: &models::vaccine::NewVaccineRecord,
    ) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_VACCINE_RECORD)
            .bind(record.pet_id)
            .bind(record.vaccine_name.to_string())
            .bind(record.date_issued.clone())
            .bind(record.next_due_date.clone())
            .bind(record.category.to_string())
            .bind(record.image_url.clone())
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_vaccine_record_by_id(
        &self,
        record_id: i64,
    ) -> anyhow::Result<models::vaccine::VaccineRecord> {
        Ok(sqlx::query_as::<_, models::vaccine::VaccineRecord>(
            sqlite_queries::QUERY_GET_VACCINE_RECORD_BY_ID,
        )
        .bind(record_id)
        .fetch_one(&self.db_pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils;
    use std::str::FromStr;

    // one connection only: every connection to sqlite::memory: gets its
    // own database, so the pool must not open a second one
    async fn setup_test_repo() -> SqlxSqliteRepo {
        let db_pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(
                sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
                    .expect("connect options")
                    .pragma("foreign_keys", "ON"),
            )
            .await
            .expect("in-memory pool");
        utils::provision_database(&db_pool)
            .await
            .expect("provisioning");

        SqlxSqliteRepo { db_pool }
    }

    fn record_for(pet_id: i64, vaccine_name: &str) -> models::vaccine::NewVaccineRecord {
        models::vaccine::NewVaccineRecord {
            pet_id,
            vaccine_name: vaccine_name.to_string(),
            category: "Vaccination".to_string(),
            ..Default::default()
        }
    }

    #[ntex::test]
    async fn test_provisioning_seeds_pets_once() {
        let repo = setup_test_repo().await;

        // running provisioning again must not duplicate the seed
        utils::provision_database(&repo.db_pool).await.unwrap();

        let pets = repo.get_all_pets().await.unwrap();
        assert_eq!(pets.len(), 7);
        assert!(pets.iter().any(|p| p.name == "Luna"));
    }

    #[ntex::test]
    async fn test_pet_exists() {
        let repo = setup_test_repo().await;

        assert!(repo.pet_exists(1).await.unwrap());
        assert!(!repo.pet_exists(9999).await.unwrap());
    }

    #[ntex::test]
    async fn test_insert_and_read_back_record() {
        let repo = setup_test_repo().await;

        let mut record = record_for(1, "Rabies");
        record.date_issued = Some("2024-03-05".to_string());
        record.image_url = Some("/uploads/abc.jpg".to_string());

        let record_id = repo.insert_vaccine_record(&record).await.unwrap();
        let stored = repo.get_vaccine_record_by_id(record_id).await.unwrap();

        assert_eq!(stored.id, record_id);
        assert_eq!(stored.pet_id, 1);
        assert_eq!(stored.vaccine_name, "Rabies");
        assert_eq!(stored.date_issued.as_deref(), Some("2024-03-05"));
        assert_eq!(stored.next_due_date, None);
        assert_eq!(stored.category, "Vaccination");
        assert_eq!(stored.image_url.as_deref(), Some("/uploads/abc.jpg"));
    }

    #[ntex::test]
    async fn test_list_filters_by_pet() {
        let repo = setup_test_repo().await;

        repo.insert_vaccine_record(&record_for(1, "Rabies"))
            .await
            .unwrap();
        repo.insert_vaccine_record(&record_for(2, "Parvo"))
            .await
            .unwrap();

        let filtered = repo.get_vaccine_records(Some(2)).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].vaccine_name, "Parvo");

        let all = repo.get_vaccine_records(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[ntex::test]
    async fn test_list_orders_date_issued_desc_nulls_last() {
        let repo = setup_test_repo().await;

        let mut older = record_for(1, "older");
        older.date_issued = Some("2023-01-10".to_string());
        let mut newer = record_for(1, "newer");
        newer.date_issued = Some("2024-06-01".to_string());
        let undated = record_for(1, "undated");

        repo.insert_vaccine_record(&undated).await.unwrap();
        repo.insert_vaccine_record(&older).await.unwrap();
        repo.insert_vaccine_record(&newer).await.unwrap();

        let names = repo
            .get_vaccine_records(Some(1))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.vaccine_name)
            .collect::<Vec<String>>();

        assert_eq!(names, vec!["newer", "older", "undated"]);
    }

    #[ntex::test]
    async fn test_foreign_key_pragma_rejects_unknown_pet() {
        let repo = setup_test_repo().await;

        let result = repo.insert_vaccine_record(&record_for(9999, "Rabies")).await;

        assert!(result.is_err());
        assert!(repo.get_vaccine_records(None).await.unwrap().is_empty());
    }
}
