//! Multipart form deserialization for the vaccine endpoints.

use crate::{consts, front::utils};
use anyhow::bail;
use futures::TryStreamExt;

/// An uploaded certificate image as it left the multipart stream.
#[derive(Debug, Default, Clone)]
pub struct CertificateUpload {
    pub filename_extension: String,
    pub mime_type: String,
    pub body: Vec<u8>,
}

/// Confirmed record fields submitted to `POST /api/vaccines`.
///
/// `pet_id` is `None` both when the field is absent and when it does not
/// parse as an integer; either way the api layer rejects it as missing.
#[derive(Debug, Default)]
pub struct AddVaccineForm {
    pub pet_id: Option<i64>,
    pub vaccine_name: String,
    pub date_issued: String,
    pub next_due_date: String,
    pub category: String,
    pub image_url: Option<String>,
    pub certificate: Option<CertificateUpload>,
}

async fn read_certificate_upload(
    field: ntex_multipart::Field,
    content_disposition: &str,
) -> anyhow::Result<CertificateUpload> {
    let mime_type = field.content_type().essence_str().to_string();
    let filename_extension = utils::get_filename_extension(content_disposition)?;

    let body = utils::get_bytes_value(field).await;
    if body.len() > consts::CERT_IMAGE_MAX_SIZE_BYTES {
        bail!(
            "image is to big. max size: {}",
            consts::CERT_IMAGE_MAX_SIZE_BYTES
        )
    }

    Ok(CertificateUpload {
        filename_extension,
        mime_type,
        body,
    })
}

/// Deserializes the analyze form, which carries a single `image` file field.
/// Returns `None` when no image was part of the request.
pub async fn deserialize_analyze_form(
    mut payload: ntex_multipart::Multipart,
) -> anyhow::Result<Option<CertificateUpload>> {
    while let Ok(Some(field)) = payload.try_next().await {
        let content_disposition =
            utils::get_header_str_value(field.headers(), "content-disposition");

        if field.content_type().essence_str().contains("image")
            && content_disposition.contains("\"image\"")
        {
            return Ok(Some(read_certificate_upload(field, &content_disposition).await?));
        }
    }

    Ok(None)
}

/// Deserializes the add form: text fields plus an optional `certificate`
/// file field.
pub async fn deserialize_add_vaccine_form(
    mut payload: ntex_multipart::Multipart,
) -> anyhow::Result<AddVaccineForm> {
    let mut form = AddVaccineForm::default();

    while let Ok(Some(field)) = payload.try_next().await {
        let content_disposition =
            utils::get_header_str_value(field.headers(), "content-disposition");

        if field.content_type().essence_str().contains("image")
            && content_disposition.contains("certificate")
        {
            form.certificate =
                Some(read_certificate_upload(field, &content_disposition).await?);

            continue;
        }

        let field_value = utils::get_field_value(field).await;

        if content_disposition.contains("petId") {
            form.pet_id = field_value.trim().parse::<i64>().ok();
        } else if content_disposition.contains("vaccineName") {
            form.vaccine_name = field_value;
        } else if content_disposition.contains("dateIssued") {
            form.date_issued = field_value;
        } else if content_disposition.contains("nextDueDate") {
            form.next_due_date = field_value;
        } else if content_disposition.contains("imageUrl") {
            form.image_url = Some(field_value);
        } else if content_disposition.contains("\"type\"") {
            form.category = field_value;
        }
    }

    Ok(form)
}
