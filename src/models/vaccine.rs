use chrono::NaiveDateTime;

/// A stored vaccine record. Created once through the ingestion endpoint,
/// never updated or deleted.
///
/// `date_issued` and `next_due_date` hold the canonical `YYYY-MM-DD` string
/// when present. They stay strings end to end: the normalizer contract
/// forbids calendar validation, so a malformed but pattern-matching value
/// must survive storage untouched.
#[derive(Debug, Default, Clone)]
pub struct VaccineRecord {
    pub id: i64,
    pub pet_id: i64,
    pub vaccine_name: String,
    pub date_issued: Option<String>,
    pub next_due_date: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Field set for a record about to be inserted. Dates are already in
/// canonical form; id and created_at are assigned by the store.
#[derive(Debug, Default, Clone)]
pub struct NewVaccineRecord {
    pub pet_id: i64,
    pub vaccine_name: String,
    pub date_issued: Option<String>,
    pub next_due_date: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
}
