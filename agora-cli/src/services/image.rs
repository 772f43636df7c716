use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fs;
use std::path::Path;

use agora_shared::ValidationError;

use crate::error::CliResult;

/// Reads an image file as plain base64, without a data-URL prefix
pub fn encode_image(path: Option<&Path>) -> CliResult<String> {
    let path = path.ok_or(ValidationError::MissingImage)?;
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(ValidationError::MissingImage.into());
    }
    Ok(STANDARD.encode(bytes))
}
