//! Ad-hoc "special" courses entered through a form

use crate::course::{Course, Feature, DEFAULT_FEATURE_ICON};
use crate::error::{CatalogError, Result};

/// Id prefix of courses created from the form
pub const SPECIAL_ID_PREFIX: &str = "special-";

pub const DEFAULT_SPECIAL_PRICE: f64 = 1000.0;
pub const DEFAULT_SPECIAL_DURATION: &str = "1";

/// Allowed difficulty rating range
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Raw form input. Optional text left empty and counts left at zero are
/// dropped from the resulting course.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialCourseForm {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub course_duration: String,
    pub level: String,
    pub rating: u8,
    pub image_url: String,
    pub graduates: u32,
    /// Comma separated
    pub tags: String,
    pub reviews: u32,
    /// `icon:text` entries separated by `;`
    pub features: String,
}

impl Default for SpecialCourseForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: DEFAULT_SPECIAL_PRICE,
            course_duration: DEFAULT_SPECIAL_DURATION.to_string(),
            level: String::new(),
            rating: *RATING_RANGE.start(),
            image_url: String::new(),
            graduates: 0,
            tags: String::new(),
            reviews: 0,
            features: String::new(),
        }
    }
}

impl SpecialCourseForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::validation("title", "must not be blank"));
        }
        if self.description.trim().is_empty() {
            return Err(CatalogError::validation("description", "must not be blank"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::validation(
                "price",
                format!("must be a non-negative amount, got {}", self.price),
            ));
        }
        if !RATING_RANGE.contains(&self.rating) {
            return Err(CatalogError::validation(
                "rating",
                format!(
                    "must be between {} and {}, got {}",
                    RATING_RANGE.start(),
                    RATING_RANGE.end(),
                    self.rating
                ),
            ));
        }
        Ok(())
    }

    /// Validate and build the course, stamping its id with `now_millis`
    pub fn submit(&self, now_millis: u64) -> Result<Course> {
        self.validate()?;

        let course_duration = match self.course_duration.trim() {
            "" => DEFAULT_SPECIAL_DURATION.to_string(),
            d => d.to_string(),
        };

        let course = Course {
            id: format!("{SPECIAL_ID_PREFIX}{now_millis}"),
            title: self.title.trim().to_string(),
            level: non_empty(&self.level),
            image_url: non_empty(&self.image_url),
            course_duration,
            description: self.description.trim().to_string(),
            price: self.price,
            graduates: non_zero(self.graduates),
            rating: self.rating,
            tags: parse_tags(&self.tags),
            reviews: non_zero(self.reviews),
            features: parse_features(&self.features),
        };
        tracing::debug!(id = %course.id, title = %course.title, "special course created");
        Ok(course)
    }
}

/// Split a comma separated tag list, dropping blanks
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Parse `icon:text;icon:text`. A missing icon becomes
/// [`DEFAULT_FEATURE_ICON`], a missing text becomes empty.
pub fn parse_features(input: &str) -> Vec<Feature> {
    input
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (icon, text) = entry.split_once(':').unwrap_or((entry, ""));
            let icon = match icon.trim() {
                "" => DEFAULT_FEATURE_ICON,
                icon => icon,
            };
            Feature::new(icon, text.trim())
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn non_zero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}
