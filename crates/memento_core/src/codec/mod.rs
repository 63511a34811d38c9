//! Versioned state token codec.
//!
//! # Responsibility
//! - Encode `AppInputState` into a compact URL-safe token (`v2.<base64url>`).
//! - Decode and validate tokens from local storage or share-link fragments.
//!
//! # Invariants
//! - The token prefix and the embedded `schemaVersion` must both match the
//!   current version; foreign versions are rejected, never migrated.
//! - Decoding never panics; every failure maps to `StateCodecError`, and
//!   `decode_state` collapses it to `None`.
//! - `decode_state(&encode_state(s)) == Some(s)` for in-range `s`.

use crate::config::{LIFE_EXPECTANCY_MAX, LIFE_EXPECTANCY_MIN};
use crate::model::category::Category;
use crate::model::input::{AppInputState, ColorScheme};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Schema version written into every payload.
pub const SCHEMA_VERSION: u32 = 2;
/// Token prefix naming the schema version.
pub const TOKEN_PREFIX: &str = "v2.";
/// Marker separating a share link's base URL from its token.
pub const FRAGMENT_MARKER: char = '#';

// Encode without padding; accept tokens with or without it.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reasons a token failed to decode.
#[derive(Debug)]
pub enum StateCodecError {
    /// Token does not start with the current version prefix.
    UnsupportedPrefix,
    /// Token body is not valid base64url.
    Base64(base64::DecodeError),
    /// Decoded bytes are not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
    /// Payload is not valid JSON or a field has the wrong type/shape.
    Payload(serde_json::Error),
    /// Payload declares a different schema version.
    SchemaVersionMismatch(i64),
    /// A numeric field is NaN or infinite.
    NonFiniteNumber(&'static str),
}

impl Display for StateCodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPrefix => {
                write!(f, "state token must start with `{TOKEN_PREFIX}`")
            }
            Self::Base64(err) => write!(f, "state token is not base64url: {err}"),
            Self::Utf8(err) => write!(f, "state token is not UTF-8: {err}"),
            Self::Payload(err) => write!(f, "state payload is malformed: {err}"),
            Self::SchemaVersionMismatch(found) => write!(
                f,
                "state schema version {found} is not supported (expected {SCHEMA_VERSION})"
            ),
            Self::NonFiniteNumber(field) => write!(f, "state field `{field}` is not finite"),
        }
    }
}

impl Error for StateCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Base64(err) => Some(err),
            Self::Utf8(err) => Some(err),
            Self::Payload(err) => Some(err),
            Self::UnsupportedPrefix
            | Self::SchemaVersionMismatch(_)
            | Self::NonFiniteNumber(_) => None,
        }
    }
}

impl StateCodecError {
    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedPrefix => "unsupported_prefix",
            Self::Base64(_) => "invalid_base64",
            Self::Utf8(_) => "invalid_utf8",
            Self::Payload(_) => "invalid_payload",
            Self::SchemaVersionMismatch(_) => "schema_version_mismatch",
            Self::NonFiniteNumber(_) => "non_finite_number",
        }
    }
}

impl From<base64::DecodeError> for StateCodecError {
    fn from(value: base64::DecodeError) -> Self {
        Self::Base64(value)
    }
}

impl From<std::string::FromUtf8Error> for StateCodecError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        Self::Utf8(value)
    }
}

impl From<serde_json::Error> for StateCodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadOut<'a> {
    schema_version: u32,
    #[serde(flatten)]
    state: &'a AppInputState,
}

// Numbers are read as f64 so out-of-range or fractional values are clamped
// and rounded instead of rejected.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadIn {
    schema_version: i64,
    birth_date: String,
    life_expectancy_years: f64,
    categories: Vec<CategoryIn>,
    color_scheme: ColorScheme,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryIn {
    id: String,
    name: String,
    color: String,
    past_percent: f64,
    future_percent: f64,
}

/// Encodes state into a versioned, URL-safe token.
pub fn encode_state(state: &AppInputState) -> String {
    let payload = PayloadOut {
        schema_version: SCHEMA_VERSION,
        state,
    };
    // Serializing plain strings, integers and a unit enum cannot fail.
    let json = serde_json::to_vec(&payload).unwrap_or_default();
    format!("{TOKEN_PREFIX}{}", TOKEN_ENGINE.encode(json))
}

/// Decodes a token, returning `None` on any failure.
///
/// Failures are logged with a reason code, never with token contents.
pub fn decode_state(token: &str) -> Option<AppInputState> {
    match try_decode_state(token) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(
                "event=state_decode module=codec status=error error_code={} error={}",
                err.code(),
                err
            );
            None
        }
    }
}

/// Decodes a token and reports why it failed.
///
/// A leading `#` is ignored so raw URL fragments can be passed directly.
/// Life expectancy is clamped into the supported bounds and every percent
/// is rounded and clamped into `[0, 100]`.
pub fn try_decode_state(token: &str) -> Result<AppInputState, StateCodecError> {
    let trimmed = token.trim();
    let trimmed = trimmed.strip_prefix(FRAGMENT_MARKER).unwrap_or(trimmed);
    let encoded = trimmed
        .strip_prefix(TOKEN_PREFIX)
        .ok_or(StateCodecError::UnsupportedPrefix)?;

    let bytes = TOKEN_ENGINE.decode(encoded)?;
    let json = String::from_utf8(bytes)?;
    let payload: PayloadIn = serde_json::from_str(&json)?;
    if payload.schema_version != i64::from(SCHEMA_VERSION) {
        return Err(StateCodecError::SchemaVersionMismatch(
            payload.schema_version,
        ));
    }

    let categories = payload
        .categories
        .into_iter()
        .map(|category| {
            Ok(Category {
                id: category.id,
                name: category.name,
                color: category.color,
                past_percent: normalize_percent(category.past_percent, "pastPercent")?,
                future_percent: normalize_percent(category.future_percent, "futurePercent")?,
            })
        })
        .collect::<Result<Vec<_>, StateCodecError>>()?;

    Ok(AppInputState {
        birth_date: payload.birth_date,
        life_expectancy_years: normalize_life_expectancy(payload.life_expectancy_years)?,
        categories,
        color_scheme: payload.color_scheme,
    })
}

/// Builds a share link: `<base_url>#<token>`.
///
/// Any existing fragment on `base_url` is replaced.
pub fn build_share_url(base_url: &str, state: &AppInputState) -> String {
    let base = base_url
        .split_once(FRAGMENT_MARKER)
        .map_or(base_url, |(base, _)| base);
    format!("{base}{FRAGMENT_MARKER}{}", encode_state(state))
}

/// Extracts the fragment of a full URL, or `None` when it has none.
pub fn token_from_url(url: &str) -> Option<&str> {
    url.split_once(FRAGMENT_MARKER)
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

fn normalize_life_expectancy(value: f64) -> Result<u32, StateCodecError> {
    if !value.is_finite() {
        return Err(StateCodecError::NonFiniteNumber("lifeExpectancyYears"));
    }
    let clamped = value.clamp(f64::from(LIFE_EXPECTANCY_MIN), f64::from(LIFE_EXPECTANCY_MAX));
    Ok(clamped.round() as u32)
}

fn normalize_percent(value: f64, field: &'static str) -> Result<u32, StateCodecError> {
    if !value.is_finite() {
        return Err(StateCodecError::NonFiniteNumber(field));
    }
    Ok(value.round().clamp(0.0, 100.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::{normalize_percent, TOKEN_ENGINE};
    use base64::Engine;

    #[test]
    fn percent_rounds_half_away_from_zero_then_clamps() {
        assert_eq!(normalize_percent(49.5, "p").unwrap(), 50);
        assert_eq!(normalize_percent(-3.0, "p").unwrap(), 0);
        assert_eq!(normalize_percent(180.2, "p").unwrap(), 100);
    }

    #[test]
    fn engine_uses_url_safe_alphabet_without_padding() {
        let encoded = TOKEN_ENGINE.encode([0xFB, 0xFF]);
        assert_eq!(encoded, "-_8");
        assert_eq!(TOKEN_ENGINE.decode("-_8=").unwrap(), vec![0xFB, 0xFF]);
    }
}
