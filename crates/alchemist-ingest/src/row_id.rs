use sha2::Digest;

use alchemist_model::RowId;

/// Deterministic row id: sha256("<source_id>\0<record_number>"), first 16 bytes.
pub fn derive_row_id(source_id: &str, record_number: u64) -> RowId {
    let mut hasher = sha2::Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(record_number.to_string().as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    RowId::from_first_16_bytes_of_sha256(digest)
}
