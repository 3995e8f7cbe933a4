#![forbid(unsafe_code)]

use super::super::StoreError;
use ng_core::graph::{DataBag, validate_data_bag};

pub(in crate::store) fn checked_data(data: DataBag) -> Result<DataBag, StoreError> {
    validate_data_bag(&data).map_err(|err| StoreError::InvalidInput(err.message()))?;
    Ok(data)
}

pub(in crate::store) fn encode_data(data: &DataBag) -> Result<Option<String>, StoreError> {
    if data.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(data)?))
}

pub(in crate::store) fn decode_data(raw: Option<&str>) -> Result<DataBag, serde_json::Error> {
    match raw {
        None => Ok(DataBag::new()),
        Some(raw) if raw.trim().is_empty() => Ok(DataBag::new()),
        Some(raw) => serde_json::from_str(raw),
    }
}
