use sha2::{Digest, Sha256};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::domain::models::SupportingDocument;

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub(crate) fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .filter(|extension| !extension.is_empty())
}

pub(crate) fn build_document(
    filename: &str,
    content_type: &str,
    bytes: &[u8],
    uploaded_at: PrimitiveDateTime,
) -> SupportingDocument {
    SupportingDocument {
        id: Uuid::new_v4().to_string(),
        filename: filename.to_string(),
        content_type: content_type.to_string(),
        size_bytes: bytes.len() as u64,
        sha256: sha256_hex(bytes),
        uploaded_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_stable_hex() {
        let digest = sha256_hex(b"appeal evidence");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, sha256_hex(b"appeal evidence"));
        assert_ne!(digest, sha256_hex(b"appeal evidence!"));
    }

    #[test]
    fn file_extension_is_lowercased() {
        assert_eq!(file_extension("Scan.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("noextension"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn build_document_records_size_and_checksum() {
        let now = crate::core::time::primitive_now_utc();
        let document = build_document("scan.pdf", "application/pdf", b"%PDF-1.7", now);
        assert_eq!(document.filename, "scan.pdf");
        assert_eq!(document.size_bytes, 8);
        assert_eq!(document.sha256, sha256_hex(b"%PDF-1.7"));
    }
}
