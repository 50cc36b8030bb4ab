pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Instruction sent to the extraction model alongside the certificate image.
pub const CERT_EXTRACTION_PROMPT: &str = "Extract details from this vaccine certificate image. \
Return strictly raw JSON (no markdown) with this schema: \
{ \"vaccineName\": string, \"dateIssued\": \"DD/MM/YYYY\", \"nextDueDate\": \"DD/MM/YYYY\", \
\"category\": \"Vaccination\" | \"Deworming\" }. If a date is missing, use empty string. \
Identify the most recent or relevant vaccine if multiple are present. \
If unsure between Vaccination and Deworming, default to 'Vaccination'.";

pub const EXTRACTION_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_VACCINE_CATEGORY: &str = "Vaccination";

/// Display policy for `GET /api/pets`: these names are pinned to positions
/// 1-3 in this order, everything else follows in id order.
pub const PET_DISPLAY_PRIORITY: [&str; 3] = ["Max", "Shasha", "Tyson"];

pub const CERT_IMAGE_MAX_SIZE_BYTES: usize = 6_000_000;

/// Public url prefix where stored certificate images are served from.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";
