//! Positional binary encoding of [`CallerInfo`].
//!
//! Every token starts with a 2-byte big-endian version tag. The tag selects a
//! decoder from [`LAYOUTS`]; unknown tags are rejected before any other byte
//! is read. New tokens are always written in [`CURRENT_VERSION`].
//!
//! The layouts carry no field tags, so adding a field means adding a version
//! and a decoder entry, never appending to an existing layout.
//!
//! Decoding is strict: a short read is [`TokenError::TruncatedInput`] and any
//! byte left over after the last field is [`TokenError::TrailingData`].

mod reader;
pub mod v1;

use common::{CallerInfo, GenerateError, TokenError};

use reader::Reader;

/// Version tag of layout 1.0.
pub const VERSION_1_0: u16 = v1::VERSION;

/// Version written by [`encode`].
pub const CURRENT_VERSION: u16 = VERSION_1_0;

type DecodeFn = fn(&mut Reader<'_>) -> Result<CallerInfo, TokenError>;

/// Decoders for every layout still accepted, keyed by version tag.
const LAYOUTS: &[(u16, DecodeFn)] = &[(VERSION_1_0, v1::decode)];

/// Version tags [`decode`] accepts.
pub fn supported_versions() -> impl Iterator<Item = u16> {
    LAYOUTS.iter().map(|(version, _)| *version)
}

/// Exact length of `encode(caller)` in bytes.
pub fn encoded_len(caller: &CallerInfo) -> usize {
    v1::encoded_len(caller)
}

/// Encode `caller` in the current layout.
///
/// # Errors
///
/// Returns [`GenerateError::FieldTooLong`] if `key` or `oauthid` exceeds
/// [`common::MAX_FIELD_LEN`] bytes.
pub fn encode(caller: &CallerInfo) -> Result<Vec<u8>, GenerateError> {
    let mut out = Vec::with_capacity(encoded_len(caller));
    v1::encode(caller, &mut out)?;
    Ok(out)
}

/// Decode a record, consuming every byte of `bytes`.
///
/// # Errors
///
/// - [`TokenError::VersionMismatch`] if the tag names no known layout.
/// - [`TokenError::TruncatedInput`] if a field is cut short.
/// - [`TokenError::EncodingError`] if `oauthid` is not UTF-8.
/// - [`TokenError::TrailingData`] if bytes remain after the last field.
pub fn decode(bytes: &[u8]) -> Result<CallerInfo, TokenError> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u16()?;
    let layout = LAYOUTS
        .iter()
        .find_map(|(v, layout)| (*v == version).then_some(*layout))
        .ok_or(TokenError::VersionMismatch { found: version })?;
    let caller = layout(&mut reader)?;
    reader.finish()?;
    Ok(caller)
}
