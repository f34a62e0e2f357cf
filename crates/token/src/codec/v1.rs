//! Layout version 1.0 (tag `10`).
//!
//! ```text
//! [0:2)   version tag
//! [2:10)  expire          i64
//! [10:14) securityLevel   i32
//! [14:18) appid           i32
//! [18:26) deviceId        i64
//! [26:34) uid             i64
//! [34:36) keyLen          u16, 0 = no key
//! [36:36+keyLen) key
//! -- only if bytes remain --
//! oauthLen u16, then oauthid UTF-8
//! ```
//!
//! `oauthid` has no presence flag: it exists iff bytes follow the key. A later
//! layout that appends a field after it must introduce an explicit flag.

use common::{CallerInfo, GenerateError, TokenError, MAX_FIELD_LEN};

use super::reader::Reader;

pub const VERSION: u16 = 10;

/// Size of the fixed part including the key length prefix.
pub const FIXED_LEN: usize = 36;

pub(super) fn encoded_len(caller: &CallerInfo) -> usize {
    let key = caller.key.as_deref().map_or(0, <[u8]>::len);
    let oauth = match oauthid_bytes(caller) {
        Some(bytes) => 2 + bytes.len(),
        None => 0,
    };
    FIXED_LEN + key + oauth
}

pub(super) fn encode(caller: &CallerInfo, out: &mut Vec<u8>) -> Result<(), GenerateError> {
    out.extend_from_slice(&VERSION.to_be_bytes());
    out.extend_from_slice(&caller.expire.to_be_bytes());
    out.extend_from_slice(&caller.security_level.to_be_bytes());
    out.extend_from_slice(&caller.appid.to_be_bytes());
    out.extend_from_slice(&caller.device_id.to_be_bytes());
    out.extend_from_slice(&caller.uid.to_be_bytes());
    put_prefixed(out, "key", caller.key.as_deref().unwrap_or_default())?;
    if let Some(oauthid) = oauthid_bytes(caller) {
        put_prefixed(out, "oauthid", oauthid)?;
    }
    Ok(())
}

pub(super) fn decode(r: &mut Reader<'_>) -> Result<CallerInfo, TokenError> {
    let expire = r.read_i64()?;
    let security_level = r.read_i32()?;
    let appid = r.read_i32()?;
    let device_id = r.read_i64()?;
    let uid = r.read_i64()?;

    let key = r.read_prefixed()?;
    let key = (!key.is_empty()).then(|| key.to_vec());

    let oauthid = if r.is_empty() {
        None
    } else {
        let raw = r.read_prefixed()?;
        if raw.is_empty() {
            None
        } else {
            let text = std::str::from_utf8(raw)
                .map_err(|e| TokenError::EncodingError(format!("oauthid: {e}")))?;
            Some(text.to_owned())
        }
    };

    Ok(CallerInfo {
        expire,
        security_level,
        appid,
        device_id,
        uid,
        key,
        oauthid,
    })
}

fn oauthid_bytes(caller: &CallerInfo) -> Option<&[u8]> {
    caller
        .oauthid
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::as_bytes)
}

fn put_prefixed(out: &mut Vec<u8>, field: &'static str, bytes: &[u8]) -> Result<(), GenerateError> {
    if bytes.len() > MAX_FIELD_LEN {
        return Err(GenerateError::FieldTooLong {
            field,
            len: bytes.len(),
        });
    }
    // MAX_FIELD_LEN fits in u16.
    out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}
