use crate::error::ExtractError;
use serde_json::Value;

#[derive(Debug, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    NotFound(ExtractError),
}

/// Reads the `value` field of the first record in a query response.
pub fn extract_image_url(response: &Value) -> Extraction {
    match try_extract(response) {
        Ok(url) => Extraction::Found(url.to_owned()),
        Err(reason) => Extraction::NotFound(reason),
    }
}

fn try_extract(response: &Value) -> Result<&str, ExtractError> {
    let records = response.as_array().ok_or(ExtractError::NotAList)?;
    let first = records.first().ok_or(ExtractError::IndexOutOfRange)?;
    let value = first.get("value").ok_or(ExtractError::MissingValue)?;
    value.as_str().ok_or(ExtractError::NotAString)
}
