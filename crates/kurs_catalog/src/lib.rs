//! Kurs Catalog
//!
//! Course data and the booking flow around the expandable course cards:
//!
//! - [`Catalog`]: the course list, with six built-in German courses
//! - [`Selection`]: picked courses and participant counts
//! - [`Cart`]: per-line and grand totals including accommodation
//! - [`SpecialCourseForm`]: validated ad-hoc courses
//! - [`BannerLocal`]: the banner dismiss flag over a [`DismissStore`]
//!
//! # Example
//!
//! ```rust
//! use kurs_catalog::{Cart, Catalog, Selection};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut selection = Selection::new();
//! selection.toggle("1");
//! selection.update_quantity("1", 1);
//!
//! let summary = Cart::new().summarize(&catalog, &selection).unwrap();
//! assert_eq!(summary.grand_total, 2000.0);
//! ```

pub mod banner;
pub mod cart;
pub mod catalog;
pub mod course;
pub mod error;
pub mod selection;
pub mod special;

pub use banner::{BannerLocal, DismissStore, JsonFileStore, MemoryDismissStore, DEFAULT_STORAGE_KEY};
pub use cart::{Cart, CartLine, CartSummary, ACCOMMODATION_PRICE, EMPTY_CART_MESSAGE};
pub use catalog::Catalog;
pub use course::{format_price, Course, Feature, DEFAULT_FEATURE_ICON};
pub use error::{CatalogError, Result};
pub use selection::Selection;
pub use special::{parse_features, parse_tags, SpecialCourseForm, SPECIAL_ID_PREFIX};
