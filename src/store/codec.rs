//! Embedding BLOB encoding for SQLite persistence.
//!
//! Embeddings are stored as little-endian f32 bytes. The encoding round-trips
//! exactly at f32 width; dimensionality is not fixed here — the engine checks
//! vector lengths against the model contract at its own boundary.

use crate::errors::Error;

/// Encode an embedding as a little-endian f32 BLOB.
///
/// # Errors
///
/// Returns `Error::InvalidVector` for an empty vector.
pub fn vec_to_blob(vec: &[f32]) -> Result<Vec<u8>, Error> {
    if vec.is_empty() {
        return Err(Error::InvalidVector(
            "Cannot encode an empty embedding".to_string(),
        ));
    }
    Ok(vec.iter().flat_map(|&x| x.to_le_bytes()).collect())
}

/// Decode a little-endian f32 BLOB back into an embedding.
///
/// # Errors
///
/// Returns `Error::InvalidVector` if the blob is empty or its length is not
/// a multiple of 4 bytes.
pub fn blob_to_vec(blob: &[u8]) -> Result<Vec<f32>, Error> {
    if blob.is_empty() || blob.len() % 4 != 0 {
        return Err(Error::InvalidVector(format!(
            "Invalid embedding blob length: {} bytes",
            blob.len()
        )));
    }
    let mut vec = Vec::with_capacity(blob.len() / 4);
    for chunk in blob.chunks_exact(4) {
        let val = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        vec.push(val);
    }
    Ok(vec)
}
