//! Serde helpers for numeric fields the API sends as strings.
//!
//! ActiveCampaign returns most integers as decimal strings (`"id": "12"`),
//! but accepts and sometimes returns plain numbers. Fields using these
//! helpers accept both, plus `null` and the empty string as "absent".

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Float(f64),
    Text(String),
}

/// Deserializes an optional `u64` from a number, a decimal string or `null`.
///
/// # Errors
///
/// Fails when the value is a non-numeric string or a negative/fractional
/// number.
pub fn option_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<NumberOrText> = Option::deserialize(deserializer)?;

    match value {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Float(f)) => {
            #[allow(clippy::cast_precision_loss)]
            let in_range = f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64;
            if in_range {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let n = f as u64;
                Ok(Some(n))
            } else {
                Err(serde::de::Error::custom(format!(
                    "expected a non-negative integer, found {f}"
                )))
            }
        }
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<u64>().map(Some).map_err(|_| {
                serde::de::Error::custom(format!("expected a non-negative integer, found {text:?}"))
            })
        }
    }
}

/// Deserializes a `Vec<T>`, treating `null` as empty.
///
/// # Errors
///
/// Fails when the value is neither `null` nor a sequence of `T`.
pub fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
