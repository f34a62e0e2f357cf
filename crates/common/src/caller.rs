//! [`CallerInfo`]: the identity record carried inside every caller token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity and access attributes of a caller.
///
/// A value is built per call by the issuing or validating code and consumed
/// immediately by the token codec; it has no persistence of its own.
///
/// `key` and `oauthid` are optional trailing fields. On the wire an empty
/// value is indistinguishable from an absent one, so [`CallerInfo::with_key`]
/// and [`CallerInfo::with_oauthid`] store empty input as `None`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerInfo {
    /// Absolute expiry timestamp (epoch milliseconds).
    pub expire: i64,
    /// Caller trust tier.
    pub security_level: i32,
    /// Issuing application id.
    pub appid: i32,
    /// Device identifier.
    pub device_id: i64,
    /// User id; `0` means no user is bound (device token).
    pub uid: i64,
    /// Per-caller symmetric key material, standard base64 in JSON.
    #[serde(default, with = "crate::serde_base64", skip_serializing_if = "Option::is_none")]
    pub key: Option<Vec<u8>>,
    /// External identity reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauthid: Option<String>,
}

impl CallerInfo {
    /// Attach key material. An empty slice clears the key.
    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        let key = key.into();
        self.key = (!key.is_empty()).then_some(key);
        self
    }

    /// Attach an external identity reference. An empty string clears it.
    pub fn with_oauthid(mut self, oauthid: impl Into<String>) -> Self {
        let oauthid = oauthid.into();
        self.oauthid = (!oauthid.is_empty()).then_some(oauthid);
        self
    }

    /// Derive the device-token form of this record: a copy with `uid` set to 0.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn as_device(&self) -> Self {
        Self {
            uid: 0,
            ..self.clone()
        }
    }

    /// Returns `true` if no user is bound to this caller.
    pub fn is_device_token(&self) -> bool {
        self.uid == 0
    }

    /// Returns `true` if the token expired at or before `now_millis`.
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expire <= now_millis
    }
}

impl fmt::Debug for CallerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material and the external id never reach logs.
        f.debug_struct("CallerInfo")
            .field("expire", &self.expire)
            .field("security_level", &self.security_level)
            .field("appid", &self.appid)
            .field("device_id", &self.device_id)
            .field("uid", &self.uid)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("oauthid", &self.oauthid.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CallerInfo {
        CallerInfo {
            expire: 1_700_000_000_000,
            security_level: 1,
            appid: 42,
            device_id: 123_456_789,
            uid: 987_654_321,
            ..CallerInfo::default()
        }
    }

    #[test]
    fn as_device_clears_uid_only() {
        let caller = sample().with_key(vec![1, 2, 3]).with_oauthid("ext-1");
        let device = caller.as_device();
        assert_eq!(device.uid, 0);
        assert_eq!(caller.uid, 987_654_321);
        assert_eq!(CallerInfo { uid: caller.uid, ..device }, caller);
    }

    #[test]
    fn empty_optionals_normalize_to_none() {
        let caller = sample().with_key(Vec::new()).with_oauthid("");
        assert!(caller.key.is_none());
        assert!(caller.oauthid.is_none());
    }

    #[test]
    fn expiry_is_inclusive() {
        let caller = sample();
        assert!(!caller.is_expired(caller.expire - 1));
        assert!(caller.is_expired(caller.expire));
    }

    #[test]
    fn debug_redacts_secrets() {
        let caller = sample().with_key(b"super-secret".to_vec()).with_oauthid("github:1234");
        let out = format!("{caller:?}");
        assert!(!out.contains("github"));
        assert!(out.contains("REDACTED"));
    }

    #[test]
    fn json_uses_camel_case_and_base64_key() {
        let caller = sample().with_key(vec![0xde, 0xad, 0xbe, 0xef]);
        let json = serde_json::to_value(&caller).unwrap();
        assert_eq!(json["securityLevel"], 1);
        assert_eq!(json["deviceId"], 123_456_789);
        assert_eq!(json["key"], "3q2+7w==");
        assert!(json.get("oauthid").is_none());

        let decoded: CallerInfo = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, caller);
    }
}
