//! Plot theme settings
//!
//! Cosmetic defaults passed through to the render description untouched.
//! Resolution never reads them, so a writer is free to interpret or ignore
//! any field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub grid: GridTheme,
    pub font: FontTheme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridTheme {
    pub show: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontTheme {
    pub family: String,
    pub size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            grid: GridTheme {
                show: true,
                color: "#e5e5e5".to_string(),
            },
            font: FontTheme {
                family: "sans-serif".to_string(),
                size: 11.0,
            },
        }
    }
}

impl Theme {
    /// White background, no grid
    pub fn minimal() -> Self {
        Self {
            grid: GridTheme {
                show: false,
                color: "#e5e5e5".to_string(),
            },
            ..Self::default()
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#1f1f1f".to_string(),
            grid: GridTheme {
                show: true,
                color: "#3a3a3a".to_string(),
            },
            ..Self::default()
        }
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f64) -> Self {
        self.font = FontTheme {
            family: family.into(),
            size,
        };
        self
    }
}
