//! # Vaccine API Module
//!
//! Business logic of the vaccine record ingestion pipeline: listing stored
//! records, validating and persisting confirmed records, and turning an
//! uploaded certificate image into a draft suggestion via the extraction
//! service.

use crate::{consts, front, models, repo, services, utils};
use derive_more::{Display, Error};
use serde::Serialize;
use uuid::Uuid;

/// Schema for a stored vaccine record as the API returns it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineRecordSchema {
    pub id: i64,
    pub pet_id: i64,
    pub vaccine_name: String,
    pub date_issued: Option<String>,
    pub next_due_date: Option<String>,
    #[serde(rename = "type")]
    pub category: String,
    pub image_url: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<models::vaccine::VaccineRecord> for VaccineRecordSchema {
    fn from(val: models::vaccine::VaccineRecord) -> Self {
        VaccineRecordSchema {
            id: val.id,
            pet_id: val.pet_id,
            vaccine_name: val.vaccine_name,
            date_issued: val.date_issued,
            next_due_date: val.next_due_date,
            category: val.category,
            image_url: val.image_url,
            created_at: val.created_at,
        }
    }
}

/// Unconfirmed field set suggested by the extraction service, returned by
/// the analyze endpoint for the caller to review and edit. Nothing is
/// persisted for it except the uploaded image itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecordSchema {
    pub vaccine_name: String,
    pub category: String,
    pub date_issued: String,
    pub next_due_date: String,
    pub image_url: String,
}

/// Failure modes of persisting a confirmed record.
#[derive(Debug, Display, Error)]
pub enum AddRecordError {
    /// Pet reference or vaccine name missing from the submitted form
    #[display("Pet ID and Vaccine Name are required")]
    MissingFields,
    /// Pet reference does not resolve to an existing pet; nothing written
    #[display("pet with id {_0} does not exist")]
    UnknownPet(#[error(not(source))] i64),
    #[display("{_0}")]
    Storage(#[error(not(source))] anyhow::Error),
}

/// Failure modes of analyzing an uploaded certificate.
#[derive(Debug, Display, Error)]
pub enum AnalyzeError {
    #[display("{_0}")]
    Storage(#[error(not(source))] anyhow::Error),
    #[display("{_0}")]
    Extraction(#[error(not(source))] services::extraction::ExtractionError),
}

/// Lists stored vaccine records, optionally filtered to one pet, most
/// recently issued first.
pub async fn get_vaccine_records(
    pet_id: Option<i64>,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<Vec<VaccineRecordSchema>> {
    Ok(repo
        .get_vaccine_records(pet_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Stores an uploaded certificate under a collision-resistant name and
/// returns its public url path. The file is kept no matter what happens to
/// the rest of the request.
async fn store_certificate(
    upload: &front::forms::vaccine::CertificateUpload,
    storage_service: &services::ImplStorageService,
) -> anyhow::Result<String> {
    let file_name = format!(
        "{id}.{extension}",
        id = Uuid::new_v4(),
        extension = upload.filename_extension
    );

    storage_service
        .save_certificate(&file_name, upload.body.clone())
        .await
}

/// Persists a confirmed vaccine record.
///
/// Validates presence of the pet reference and vaccine name, verifies the
/// pet exists before any write, normalizes both dates to the canonical
/// format and inserts. A certificate uploaded with the form is stored first
/// and its path overrides any caller-supplied image url. Returns the stored
/// record with id and creation timestamp populated.
pub async fn add_vaccine_record(
    form: front::forms::vaccine::AddVaccineForm,
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
) -> Result<VaccineRecordSchema, AddRecordError> {
    let pet_id = form.pet_id.ok_or(AddRecordError::MissingFields)?;
    if form.vaccine_name.trim().is_empty() {
        return Err(AddRecordError::MissingFields);
    }

    if !repo
        .pet_exists(pet_id)
        .await
        .map_err(AddRecordError::Storage)?
    {
        return Err(AddRecordError::UnknownPet(pet_id));
    }

    let image_url = match &form.certificate {
        Some(upload) => Some(
            store_certificate(upload, storage_service)
                .await
                .map_err(AddRecordError::Storage)?,
        ),
        None => form.image_url.filter(|url| !url.trim().is_empty()),
    };

    let record = models::vaccine::NewVaccineRecord {
        pet_id,
        vaccine_name: form.vaccine_name,
        date_issued: utils::normalize_date(&form.date_issued),
        next_due_date: utils::normalize_date(&form.next_due_date),
        category: if form.category.trim().is_empty() {
            consts::DEFAULT_VACCINE_CATEGORY.to_string()
        } else {
            form.category
        },
        image_url,
    };

    let record_id = repo
        .insert_vaccine_record(&record)
        .await
        .map_err(AddRecordError::Storage)?;

    Ok(repo
        .get_vaccine_record_by_id(record_id)
        .await
        .map_err(AddRecordError::Storage)?
        .into())
}

/// Runs the extraction pipeline on an uploaded certificate image: store the
/// upload, ask the extraction service for a suggestion, return the draft
/// with the stored path attached. Nothing is persisted to the record store.
///
/// The upload is stored before extraction and deliberately kept when
/// extraction fails, so the caller can resubmit without re-uploading.
pub async fn analyze_certificate(
    upload: front::forms::vaccine::CertificateUpload,
    storage_service: &services::ImplStorageService,
    extraction_service: &services::ImplExtractionService,
) -> Result<DraftRecordSchema, AnalyzeError> {
    let image_url = store_certificate(&upload, storage_service)
        .await
        .map_err(AnalyzeError::Storage)?;

    let fields = extraction_service
        .extract_certificate(&upload.body, &upload.mime_type)
        .await
        .map_err(AnalyzeError::Extraction)?;

    Ok(DraftRecordSchema {
        vaccine_name: fields.vaccine_name,
        category: fields.category,
        date_issued: fields.date_issued,
        next_due_date: fields.next_due_date,
        image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use crate::services::extraction::{ExtractedCertFields, ExtractionError};
    use crate::services::{MockExtractionService, MockStorageService};
    use chrono::Utc;
    use mockall::predicate::*;

    fn create_test_form(pet_id: Option<i64>, vaccine_name: &str) -> front::forms::vaccine::AddVaccineForm {
        front::forms::vaccine::AddVaccineForm {
            pet_id,
            vaccine_name: vaccine_name.to_string(),
            ..Default::default()
        }
    }

    fn create_test_upload() -> front::forms::vaccine::CertificateUpload {
        front::forms::vaccine::CertificateUpload {
            filename_extension: "jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            body: vec![0xff, 0xd8, 0xff],
        }
    }

    fn create_stored_record(record_id: i64) -> models::vaccine::VaccineRecord {
        models::vaccine::VaccineRecord {
            id: record_id,
            pet_id: 1,
            vaccine_name: "Rabies".to_string(),
            date_issued: Some("2024-03-05".to_string()),
            next_due_date: None,
            category: "Vaccination".to_string(),
            image_url: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[ntex::test]
    async fn test_add_missing_pet_id_fails_before_any_repo_call() {
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());
        let mock_storage: services::ImplStorageService = Box::new(MockStorageService::new());

        let result =
            add_vaccine_record(create_test_form(None, "Rabies"), &mock_repo, &mock_storage).await;

        assert!(matches!(result, Err(AddRecordError::MissingFields)));
    }

    #[ntex::test]
    async fn test_add_missing_vaccine_name_fails_before_any_repo_call() {
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(MockAppRepo::new());
        let mock_storage: services::ImplStorageService = Box::new(MockStorageService::new());

        let result =
            add_vaccine_record(create_test_form(Some(1), "   "), &mock_repo, &mock_storage).await;

        assert!(matches!(result, Err(AddRecordError::MissingFields)));
    }

    #[ntex::test]
    async fn test_add_unknown_pet_fails_without_insert() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_pet_exists()
            .with(eq(9999))
            .times(1)
            .returning(|_| Ok(false));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let mock_storage: services::ImplStorageService = Box::new(MockStorageService::new());

        let result = add_vaccine_record(
            create_test_form(Some(9999), "Rabies"),
            &mock_repo,
            &mock_storage,
        )
        .await;

        assert!(matches!(result, Err(AddRecordError::UnknownPet(9999))));
    }

    #[ntex::test]
    async fn test_add_normalizes_dates_and_defaults_category() {
        let record_id = 7;

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_pet_exists()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(true));
        mock_repo
            .expect_insert_vaccine_record()
            .withf(|record| {
                record.pet_id == 1
                    && record.vaccine_name == "Rabies"
                    && record.date_issued.as_deref() == Some("2024-03-05")
                    && record.next_due_date.is_none()
                    && record.category == "Vaccination"
            })
            .times(1)
            .returning(move |_| Ok(record_id));
        mock_repo
            .expect_get_vaccine_record_by_id()
            .with(eq(record_id))
            .times(1)
            .returning(move |id| Ok(create_stored_record(id)));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);
        let mock_storage: services::ImplStorageService = Box::new(MockStorageService::new());

        let mut form = create_test_form(Some(1), "Rabies");
        form.date_issued = "05/03/2024".to_string();

        let stored = add_vaccine_record(form, &mock_repo, &mock_storage)
            .await
            .unwrap();

        assert_eq!(stored.id, record_id);
        assert_eq!(stored.date_issued.as_deref(), Some("2024-03-05"));
        assert_eq!(stored.category, "Vaccination");
    }

    #[ntex::test]
    async fn test_add_uploaded_certificate_overrides_caller_url() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_pet_exists()
            .returning(|_| Ok(true));
        mock_repo
            .expect_insert_vaccine_record()
            .withf(|record| {
                record
                    .image_url
                    .as_deref()
                    .is_some_and(|url| url.starts_with("/uploads/") && url.ends_with(".jpg"))
            })
            .times(1)
            .returning(|_| Ok(3));
        mock_repo
            .expect_get_vaccine_record_by_id()
            .returning(|id| Ok(create_stored_record(id)));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        let mut mock_storage = MockStorageService::new();
        mock_storage
            .expect_save_certificate()
            .times(1)
            .returning(|file_name, _| {
                let path = format!("/uploads/{file_name}");
                Ok(path)
            });
        let mock_storage: services::ImplStorageService = Box::new(mock_storage);

        let mut form = create_test_form(Some(1), "Rabies");
        form.image_url = Some("/uploads/stale.png".to_string());
        form.certificate = Some(create_test_upload());

        assert!(
            add_vaccine_record(form, &mock_repo, &mock_storage)
                .await
                .is_ok()
        );
    }

    #[ntex::test]
    async fn test_list_passes_filter_to_repo() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_vaccine_records()
            .with(eq(Some(3)))
            .times(1)
            .returning(|_| Ok(vec![]));
        let mock_repo: Box<dyn repo::AppRepo> = Box::new(mock_repo);

        assert!(
            get_vaccine_records(Some(3), &mock_repo)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[ntex::test]
    async fn test_analyze_attaches_stored_path_to_draft() {
        let mut mock_storage = MockStorageService::new();
        mock_storage
            .expect_save_certificate()
            .times(1)
            .returning(|_, _| {
                Ok("/uploads/stored-file.jpg".to_string())
            });
        let mock_storage: services::ImplStorageService = Box::new(mock_storage);

        let mut mock_extraction = MockExtractionService::new();
        mock_extraction
            .expect_extract_certificate()
            .withf(|image, mime_type| image == [0xff, 0xd8, 0xff] && mime_type == "image/jpeg")
            .times(1)
            .returning(|_, _| {
                Ok(ExtractedCertFields {
                    vaccine_name: "Parvo".to_string(),
                    category: "Vaccination".to_string(),
                    ..Default::default()
                })
            });
        let mock_extraction: services::ImplExtractionService = Box::new(mock_extraction);

        let draft = analyze_certificate(create_test_upload(), &mock_storage, &mock_extraction)
            .await
            .unwrap();

        assert_eq!(draft.vaccine_name, "Parvo");
        assert_eq!(draft.category, "Vaccination");
        assert_eq!(draft.date_issued, "");
        assert_eq!(draft.next_due_date, "");
        assert_eq!(draft.image_url, "/uploads/stored-file.jpg");
    }

    #[ntex::test]
    async fn test_analyze_stores_upload_even_when_extraction_fails() {
        let mut mock_storage = MockStorageService::new();
        mock_storage
            .expect_save_certificate()
            .times(1)
            .returning(|_, _| Ok("/uploads/kept.jpg".to_string()));
        let mock_storage: services::ImplStorageService = Box::new(mock_storage);

        let mut mock_extraction = MockExtractionService::new();
        mock_extraction
            .expect_extract_certificate()
            .times(1)
            .returning(|_, _| Err(ExtractionError::MalformedResponse));
        let mock_extraction: services::ImplExtractionService = Box::new(mock_extraction);

        let result =
            analyze_certificate(create_test_upload(), &mock_storage, &mock_extraction).await;

        assert!(matches!(
            result,
            Err(AnalyzeError::Extraction(ExtractionError::MalformedResponse))
        ));
    }
}
