//! Course data model

use serde::{Deserialize, Serialize};

/// Icon name used when a feature is given without one
pub const DEFAULT_FEATURE_ICON: &str = "Info";

/// One highlighted feature of a course
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub icon: String,
    pub text: String,
}

impl Feature {
    pub fn new(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
        }
    }
}

/// A bookable course
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub course_duration: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduates: Option<u32>,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
}

impl Course {
    /// Tag shown while the course card is collapsed
    pub fn headline_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Tags revealed once the card expands
    pub fn extra_tags(&self) -> &[String] {
        self.tags.get(1..).unwrap_or_default()
    }

    pub fn is_special(&self) -> bool {
        self.id.starts_with(crate::special::SPECIAL_ID_PREFIX)
    }
}

/// Format a price the way the cart shows it: whole amounts without decimals
pub fn format_price(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}
