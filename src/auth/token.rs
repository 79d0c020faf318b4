use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are treated as expired this long before their actual expiry.
const EXPIRY_LEEWAY_SECS: i64 = 30;

/// OAuth token as cached in the token file.
///
/// Field names follow the Google token endpoint response, plus `created`, the unix
/// timestamp at which the token was obtained.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl Token {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let created = DateTime::<Utc>::from_timestamp(self.created?, 0)?;
        created.checked_add_signed(TimeDelta::try_seconds(self.expires_in?)?)
    }

    /// A token without expiry information, or with one out of range, is considered expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at()
            .and_then(|expires_at| {
                expires_at.checked_sub_signed(TimeDelta::try_seconds(EXPIRY_LEEWAY_SECS)?)
            })
            .map_or(true, |refresh_at| refresh_at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
