use std::path::Path;

use crate::api::errors::ApiError;

pub(crate) fn validate_document_upload(
    filename: &str,
    content_type: &str,
    allowed_extensions: &[String],
) -> Result<(), ApiError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| ApiError::BadRequest("File must have an extension".to_string()))?;

    if !allowed_extensions.iter().any(|allowed| allowed == &extension) {
        return Err(ApiError::BadRequest(format!("File extension '{extension}' is not allowed")));
    }

    let mime = content_type.trim().to_ascii_lowercase();
    if mime_allowed_for_extension(&mime, &extension) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "MIME type '{mime}' does not match extension '.{extension}'"
        )))
    }
}

fn mime_allowed_for_extension(mime: &str, extension: &str) -> bool {
    match extension {
        "pdf" => mime == "application/pdf",
        "jpg" | "jpeg" => matches!(mime, "image/jpeg" | "image/jpg"),
        "png" => mime == "image/png",
        "webp" => mime == "image/webp",
        _ => false,
    }
}

/// Rejects blank text and text over `max_chars` characters.
pub(crate) fn validate_text(
    field: &'static str,
    value: &str,
    max_chars: u64,
) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be blank")));
    }
    if value.chars().count() as u64 > max_chars {
        return Err(ApiError::BadRequest(format!(
            "{field} exceeds the maximum length of {max_chars} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec!["pdf".to_string(), "jpg".to_string(), "png".to_string()]
    }

    #[test]
    fn document_upload_accepts_matching_pairs() {
        assert!(validate_document_upload("scan.pdf", "application/pdf", &allowed()).is_ok());
        assert!(validate_document_upload("photo.JPG", "image/jpeg", &allowed()).is_ok());
    }

    #[test]
    fn document_upload_rejects_mismatched_mime() {
        let err = validate_document_upload("scan.pdf", "image/png", &allowed());
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn document_upload_rejects_disallowed_extension() {
        let err = validate_document_upload("macro.exe", "application/pdf", &allowed());
        assert!(matches!(err, Err(ApiError::BadRequest(_))));
        let missing = validate_document_upload("noextension", "application/pdf", &allowed());
        assert!(matches!(missing, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn text_validation_rejects_blank_and_overlong() {
        assert!(validate_text("Reasoning", "valid text", 100).is_ok());
        assert!(matches!(validate_text("Reasoning", "   ", 100), Err(ApiError::BadRequest(_))));
        assert!(matches!(validate_text("Reasoning", "abcdef", 5), Err(ApiError::BadRequest(_))));
    }
}
