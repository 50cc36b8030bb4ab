use anyhow::bail;
use futures::StreamExt;
use std::path::Path;

/// Concats all the [bytes](ntex::util::Bytes) extracted from [Field](ntex_multipart::Field)
pub async fn get_bytes_value(field: ntex_multipart::Field) -> Vec<u8> {
    field
        .filter_map(|x| async move { if let Ok(b) = x { Some(b) } else { None } })
        .collect::<Vec<ntex::util::Bytes>>()
        .await
        .concat()
}

async fn get_bytes_as_str(
    x: Result<ntex::util::Bytes, ntex_multipart::MultipartError>,
) -> Option<String> {
    if let Ok(Ok(v)) = x.map(|b| std::str::from_utf8(&b).map(|value| value.to_string())) {
        return Some(v);
    }

    None
}

/// Concats all the utf8 string values extracted from [Field](ntex_multipart::Field)
pub async fn get_field_value(field: ntex_multipart::Field) -> String {
    field
        .filter_map(get_bytes_as_str)
        .collect::<Vec<String>>()
        .await
        .join("")
}

pub fn get_header_str_value(headers: &ntex::http::HeaderMap, key: &str) -> String {
    let default_header_value = ntex::http::header::HeaderValue::from_static("");

    headers
        .get(key)
        .unwrap_or(&default_header_value)
        .to_str()
        .unwrap_or_default()
        .to_string()
}

/// Lowercased filename extension from a multipart content-disposition header
pub fn get_filename_extension(content_disposition: &str) -> anyhow::Result<String> {
    let sections = content_disposition.split(";").collect::<Vec<&str>>();
    let mut sections = sections
        .iter()
        .filter(|s| s.trim().starts_with("filename="))
        .map(|w| {
            let name = &w.trim()["filename=".len()..];
            name.trim_matches('"')
        });

    if let Some(extension) = Path::new(sections.next().unwrap_or_default()).extension() {
        if let Some(extension) = extension.to_str() {
            return Ok(extension.to_string().trim().to_lowercase());
        }
    }

    bail!("filename extension couldnt be found in the request content_disposition form")
}
