//! The course list

use crate::course::Course;
use crate::error::{CatalogError, Result};
use indexmap::IndexMap;

const BUILTIN_COURSES: &str = include_str!("../data/courses.json");

/// Courses keyed by id, in display order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    courses: IndexMap<String, Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six stock German courses, A1 through C2
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_COURSES)
    }

    /// Parse a JSON array of courses; ids must be unique
    pub fn from_json(json: &str) -> Result<Self> {
        let list: Vec<Course> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for course in list {
            catalog.add(course)?;
        }
        tracing::debug!(courses = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Append a course at the end of the list
    pub fn add(&mut self, course: Course) -> Result<()> {
        if self.courses.contains_key(&course.id) {
            return Err(CatalogError::DuplicateCourse(course.id));
        }
        self.courses.insert(course.id.clone(), course);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Course> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownCourse(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        let list: Vec<&Course> = self.iter().collect();
        Ok(serde_json::to_string_pretty(&list)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 6);

        let titles: Vec<&str> = catalog.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            ["German A1", "German A2", "German B1", "German B2", "German C1", "German C2"]
        );

        let a1 = catalog.get("1").unwrap();
        assert_eq!(a1.price, 1000.0);
        assert_eq!(a1.graduates, Some(4400));
        assert_eq!(a1.reviews, Some(2048));
        assert_eq!(a1.headline_tag(), Some("available online"));
        assert_eq!(a1.features.len(), 4);
        assert_eq!(a1.features[0].icon, "Laptop");

        assert_eq!(catalog.get("2").unwrap().price, 79.99);
        assert_eq!(catalog.get("6").unwrap().rating, 8);
        assert!(catalog.get("4").unwrap().tags.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = Catalog::builtin().unwrap();
        let copy = catalog.get("1").unwrap().clone();
        assert!(matches!(
            catalog.add(copy),
            Err(CatalogError::DuplicateCourse(id)) if id == "1"
        ));
    }

    #[test]
    fn test_require_unknown() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.require("nope").unwrap_err();
        assert_eq!(err.to_string(), "unknown course 'nope'");
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::builtin().unwrap();
        let json = catalog.to_json().unwrap();
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }
}
