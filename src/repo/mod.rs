pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    async fn get_all_pets(&self) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn pet_exists(&self, pet_id: i64) -> anyhow::Result<bool>;

    async fn get_vaccine_records(
        &self,
        pet_id: Option<i64>,
    ) -> anyhow::Result<Vec<models::vaccine::VaccineRecord>>;

    async fn insert_vaccine_record(
        &self,
        record: &models::vaccine::NewVaccineRecord,
    ) -> anyhow::Result<i64>;

    async fn get_vaccine_record_by_id(
        &self,
        record_id: i64,
    ) -> anyhow::Result<models::vaccine::VaccineRecord>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
