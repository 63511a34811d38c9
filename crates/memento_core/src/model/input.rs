//! User-editable input state.
//!
//! # Responsibility
//! - Define the exact shape persisted locally and embedded in share links.
//!
//! # Invariants
//! - `birth_date` is kept verbatim; parsing happens in `week`.
//! - Wire names are camelCase to stay compatible with existing tokens.

use crate::config::LIFE_EXPECTANCY_DEFAULT;
use crate::model::category::{default_categories, Category};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Visual theme selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Obsidian,
    Paper,
    Midnight,
}

impl ColorScheme {
    /// Stable wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Obsidian => "obsidian",
            Self::Paper => "paper",
            Self::Midnight => "midnight",
        }
    }

    pub fn all() -> [ColorScheme; 3] {
        [Self::Obsidian, Self::Paper, Self::Midnight]
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "obsidian" => Ok(Self::Obsidian),
            "paper" => Ok(Self::Paper),
            "midnight" => Ok(Self::Midnight),
            other => Err(format!(
                "unsupported color scheme `{other}`; expected obsidian|paper|midnight"
            )),
        }
    }
}

/// Everything a user can edit; the unit of persistence and sharing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInputState {
    /// `YYYY-MM-DD`, or empty before the user has entered a date.
    pub birth_date: String,
    pub life_expectancy_years: u32,
    pub categories: Vec<Category>,
    pub color_scheme: ColorScheme,
}

impl Default for AppInputState {
    fn default() -> Self {
        Self {
            birth_date: String::new(),
            life_expectancy_years: LIFE_EXPECTANCY_DEFAULT,
            categories: default_categories(),
            color_scheme: ColorScheme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppInputState, ColorScheme};

    #[test]
    fn color_scheme_parses_wire_values_only() {
        for scheme in ColorScheme::all() {
            assert_eq!(scheme.as_str().parse::<ColorScheme>().unwrap(), scheme);
        }
        assert!("Obsidian".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn default_state_has_no_birth_date() {
        let state = AppInputState::default();
        assert!(state.birth_date.is_empty());
        assert_eq!(state.life_expectancy_years, 80);
        assert_eq!(state.color_scheme, ColorScheme::Obsidian);
    }
}
