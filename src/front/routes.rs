//! Route configuration for the JSON API.

use super::{pet, vaccine};
use ntex::web;

/// Configures the `/api` scope.
///
/// # Routes
/// - `GET /api/pets` - List pets in display-priority order
/// - `GET /api/vaccines?petId=<id>` - List vaccine records, optional filter
/// - `POST /api/vaccines` - Persist a confirmed vaccine record
/// - `POST /api/vaccines/analyze` - Extract a draft record from an upload
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service((
            web::scope("/pets").service((pet::list_pets,)),
            web::scope("/vaccines").service((
                vaccine::analyze_certificate,
                vaccine::list_vaccine_records,
                vaccine::add_vaccine_record,
            )),
        )),
    );
}
