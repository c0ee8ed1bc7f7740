use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page layout configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    pub gap_mm: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            card_width_mm: ID1_WIDTH_MM,
            card_height_mm: ID1_HEIGHT_MM,
            gap_mm: DEFAULT_GAP_MM,
        }
    }
}

impl LayoutOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page width", self.page_width_mm),
            ("page height", self.page_height_mm),
            ("card width", self.card_width_mm),
            ("card height", self.card_height_mm),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::Config(format!(
                    "The {} must be a positive length, got {}",
                    name, value
                )));
            }
        }

        if !self.gap_mm.is_finite() || self.gap_mm < 0.0 {
            return Err(LayoutError::Config(format!(
                "The gap must not be negative, got {}",
                self.gap_mm
            )));
        }

        if self.card_width_mm > self.page_width_mm {
            return Err(LayoutError::Config(format!(
                "Card width {}mm exceeds page width {}mm",
                self.card_width_mm, self.page_width_mm
            )));
        }

        let stack = 2.0 * self.card_height_mm + self.gap_mm;
        if stack > self.page_height_mm {
            return Err(LayoutError::Config(format!(
                "Two cards with gap need {}mm but the page is {}mm tall",
                stack, self.page_height_mm
            )));
        }

        Ok(())
    }
}
