pub const QUERY_GET_ALL_PETS: &str = r#"
SELECT
    id,name,breed,age
FROM pets
ORDER BY id;
"#;

pub const QUERY_PET_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM pets WHERE id=$1);
"#;

// Optional filter resolved inside the query; NULLS LAST keeps undated
// records at the bottom of the listing.
pub const QUERY_GET_VACCINE_RECORDS: &str = r#"
SELECT
    id,pet_id,vaccine_name,date_issued,next_due_date,type,image_url,created_at
FROM vaccines
WHERE ($1 IS NULL OR pet_id=$1)
ORDER BY date_issued DESC NULLS LAST;
"#;

pub const QUERY_INSERT_VACCINE_RECORD: &str = r#"
INSERT INTO vaccines (
    pet_id,vaccine_name,date_issued,next_due_date,type,image_url
) VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_GET_VACCINE_RECORD_BY_ID: &str = r#"
SELECT
    id,pet_id,vaccine_name,date_issued,next_due_date,type,image_url,created_at
FROM vaccines
WHERE id=$1;
"#;
