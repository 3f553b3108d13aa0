//! PNG header validation for pathway maps.
//!
//! KEGG serves pathway images as PNG. We only check the signature and the
//! leading IHDR chunk; pixel data is never decoded.

use super::entities::{PathwayId, PathwayImage};
use super::errors::DomainError;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
/// Signature + chunk length + "IHDR" + width + height.
const MIN_HEADER_LEN: usize = 8 + 4 + 4 + 8;

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Validate raw bytes as a well-formed PNG and wrap them with their dimensions.
pub fn validate_png(pathway_id: &PathwayId, bytes: Vec<u8>) -> Result<PathwayImage, DomainError> {
    if bytes.len() < MIN_HEADER_LEN {
        return Err(DomainError::Image(format!(
            "{}: {} bytes is too short for a PNG header",
            pathway_id,
            bytes.len()
        )));
    }
    if bytes[..8] != PNG_SIGNATURE {
        return Err(DomainError::Image(format!("{}: missing PNG signature", pathway_id)));
    }
    let chunk_len = be_u32(&bytes[8..12]);
    if &bytes[12..16] != b"IHDR" || chunk_len != 13 {
        return Err(DomainError::Image(format!(
            "{}: first chunk is not IHDR",
            pathway_id
        )));
    }
    let width = be_u32(&bytes[16..20]);
    let height = be_u32(&bytes[20..24]);
    if width == 0 || height == 0 {
        return Err(DomainError::Image(format!(
            "{}: zero image dimension ({}x{})",
            pathway_id, width, height
        )));
    }

    Ok(PathwayImage {
        pathway_id: pathway_id.clone(),
        width,
        height,
        bytes,
    })
}

/// Minimal PNG header for tests (signature + IHDR, no pixel data).
#[cfg(test)]
pub(crate) fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    out.extend_from_slice(&13u32.to_be_bytes());
    out.extend_from_slice(b"IHDR");
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[8, 6, 0, 0, 0]);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}
