//! Access/refresh token lifecycle

use chrono::{DateTime, TimeDelta, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Token pair held by one client for its lifetime
///
/// Transitions are `valid -> expired -> refreshed`; only
/// [`TokenState::from_refresh`] produces a new access token.
#[derive(Clone, PartialEq)]
pub struct TokenState {
    pub access_token: Option<CompactString>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token: CompactString,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

/// Body of `POST /access-token`
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub access_id: &'a str,
    pub refresh_token: &'a str,
}

/// Token exchange response; lifetimes are seconds from issue
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: CompactString,
    pub refresh_token: CompactString,
    pub access_token_expires_in: i64,
    pub refresh_token_expires_in: i64,
}

impl TokenState {
    /// State before the first exchange: no access token yet
    pub fn new(refresh_token: impl Into<CompactString>) -> Self {
        Self {
            access_token: None,
            access_token_expires_at: None,
            refresh_token: refresh_token.into(),
            refresh_token_expires_at: None,
        }
    }

    /// State seeded with an already issued pair
    pub fn issued(
        access_token: impl Into<CompactString>,
        access_token_expires_at: DateTime<Utc>,
        refresh_token: impl Into<CompactString>,
        refresh_token_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            access_token_expires_at: Some(access_token_expires_at),
            refresh_token: refresh_token.into(),
            refresh_token_expires_at: Some(refresh_token_expires_at),
        }
    }

    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match (&self.access_token, self.access_token_expires_at) {
            (Some(_), Some(expires_at)) => now >= expires_at,
            _ => true,
        }
    }

    /// Whether the refresh token is known to be past its expiry
    pub fn refresh_expired(&self, now: DateTime<Utc>) -> bool {
        self.refresh_token_expires_at
            .is_some_and(|expires_at| now >= expires_at)
    }

    /// Access token usable at `now`
    pub fn valid_access_token(&self, now: DateTime<Utc>) -> Option<&str> {
        if self.needs_refresh(now) {
            None
        } else {
            self.access_token.as_deref()
        }
    }

    pub fn from_refresh(response: RefreshResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: Some(response.access_token),
            access_token_expires_at: Some(expiry(now, response.access_token_expires_in)),
            refresh_token: response.refresh_token,
            refresh_token_expires_at: Some(expiry(now, response.refresh_token_expires_in)),
        }
    }
}

fn expiry(now: DateTime<Utc>, lifetime_secs: i64) -> DateTime<Utc> {
    TimeDelta::try_seconds(lifetime_secs.max(0))
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl std::fmt::Debug for TokenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenState")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("access_token_expires_at", &self.access_token_expires_at)
            .field("refresh_token", &"<redacted>")
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish()
    }
}
