//! Base64url (RFC 4648 §5, no padding) helpers shared by the builder,
//! the header codec and the parser.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Length of `len` bytes once base64url encoded without padding.
#[inline]
pub(crate) const fn encoded_len(len: usize) -> usize {
    // 4 output chars per full 3-byte group, plus 2 or 3 chars for a tail
    let groups = len / 3;
    match len % 3 {
        0 => groups * 4,
        1 => groups * 4 + 2,
        _ => groups * 4 + 3,
    }
}

/// Base64url encode `input` into a fresh string
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Append the base64url encoding of `input` to `output`.
///
/// Writes into `output`'s existing capacity; callers size it up front.
#[inline]
pub(crate) fn base64_url_encode_into(input: &[u8], output: &mut String) {
    URL_SAFE_NO_PAD.encode_string(input, output);
}

/// Decode a base64url segment into the front of `output`, returning the
/// number of bytes written.
///
/// Rejects padding characters, characters outside the URL-safe alphabet and
/// non-canonical trailing bits.
#[inline]
pub(crate) fn base64_url_decode_into(
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, base64::DecodeSliceError> {
    URL_SAFE_NO_PAD.decode_slice(input, output)
}
