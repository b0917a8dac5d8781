//! Packed `f32` tensor buffers.
//!
//! Model input and output buffers are contiguous 32-bit floats in native
//! byte order, with no header. The element count is implied by the byte
//! length, so every decode is checked against the expected count.

use handsign_common::error::{HandsignError, HandsignResult};

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Pack floats into a native-endian byte buffer.
pub fn encode_f32s(values: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * F32_SIZE);
    for value in values {
        bytes.extend_from_slice(&value.to_ne_bytes());
    }
    bytes
}

/// Unpack a native-endian byte buffer holding exactly `expected` floats.
///
/// Any other byte length is a [`HandsignError::ShapeMismatch`]; the buffer
/// is never truncated or padded. `context` names the buffer in the error.
pub fn decode_f32s(
    bytes: &[u8],
    expected: usize,
    context: &'static str,
) -> HandsignResult<Vec<f32>> {
    if bytes.len() != expected * F32_SIZE {
        return Err(HandsignError::shape_mismatch(
            context,
            expected * F32_SIZE,
            bytes.len(),
        ));
    }
    Ok(bytes
        .chunks_exact(F32_SIZE)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn layout_is_native_endian_and_contiguous() {
        let bytes = encode_f32s(&[1.0, -2.5]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[4..], &(-2.5f32).to_ne_bytes());
    }

    #[test]
    fn decode_reports_byte_lengths() {
        let err = decode_f32s(&[0u8; 56], 15, "model input").unwrap_err();
        assert!(matches!(
            err,
            HandsignError::ShapeMismatch {
                context: "model input",
                expected: 60,
                actual: 56,
            }
        ));
    }

    proptest! {
        #[test]
        fn decode_rejects_any_other_length(len in 0usize..200) {
            prop_assume!(len != 26 * 4);
            let bytes = vec![0u8; len];
            prop_assert!(decode_f32s(&bytes, 26, "model output").is_err());
        }
    }
}
