//! Player profile and input-boundary validation.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{AGE_MAX, AGE_MIN};

/// User-facing validation failures. Messages are shown as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("enter a valid age between {min} and {max}")]
    InvalidAge { min: u8, max: u8 },
    #[error("enter your name")]
    EmptyName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Girl,
    Boy,
    #[default]
    Unspecified,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Girl => "girl",
            Self::Boy => "boy",
            Self::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = std::convert::Infallible;

    /// Unknown values read as `Unspecified`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "girl" | "f" | "female" => Self::Girl,
            "boy" | "m" | "male" => Self::Boy,
            _ => Self::Unspecified,
        })
    }
}

/// Who is playing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Gender,
}

/// Parse a typed age, accepting only whole numbers in `[1, 120]`.
///
/// # Errors
///
/// Returns [`ProfileError::InvalidAge`] for anything else.
pub fn parse_age(input: &str) -> Result<u8, ProfileError> {
    let invalid = ProfileError::InvalidAge {
        min: AGE_MIN,
        max: AGE_MAX,
    };
    let age: u8 = input.trim().parse().map_err(|_| invalid.clone())?;
    if (AGE_MIN..=AGE_MAX).contains(&age) {
        Ok(age)
    } else {
        Err(invalid)
    }
}

/// Trim a typed name and reject blanks.
///
/// # Errors
///
/// Returns [`ProfileError::EmptyName`] when nothing but whitespace was typed.
pub fn parse_name(input: &str) -> Result<String, ProfileError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ProfileError::EmptyName);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_inside_range_parse() {
        assert_eq!(parse_age("7"), Ok(7));
        assert_eq!(parse_age(" 120 "), Ok(120));
        assert_eq!(parse_age("1"), Ok(1));
    }

    #[test]
    fn ages_outside_range_are_rejected_with_message() {
        for bad in ["0", "121", "-3", "abc", "", "7.5", "300"] {
            let err = parse_age(bad).unwrap_err();
            assert_eq!(err.to_string(), "enter a valid age between 1 and 120");
        }
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(parse_name("  Lucía "), Ok("Lucía".to_string()));
        assert_eq!(parse_name("   "), Err(ProfileError::EmptyName));
    }

    #[test]
    fn gender_codec_is_lenient() {
        assert_eq!("Girl".parse::<Gender>(), Ok(Gender::Girl));
        assert_eq!("m".parse::<Gender>(), Ok(Gender::Boy));
        assert_eq!("??".parse::<Gender>(), Ok(Gender::Unspecified));
        assert_eq!(Gender::Boy.to_string(), "boy");
    }
}
