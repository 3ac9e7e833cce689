//! Cart totals
//!
//! The cart prices selected courses per participant and adds an optional
//! accommodation line priced per unit.

use crate::catalog::Catalog;
use crate::course::format_price;
use crate::selection::Selection;
use std::fmt;

/// Price of one accommodation unit
pub const ACCOMMODATION_PRICE: f64 = 500.0;

/// Shown instead of a summary when nothing is selected
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    pub course_id: String,
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub total: f64,
}

/// Accommodation counter of the cart
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    accommodation: u32,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accommodation(count: u32) -> Self {
        Self {
            accommodation: count,
        }
    }

    pub fn accommodation(&self) -> u32 {
        self.accommodation
    }

    pub fn add_accommodation(&mut self) {
        self.accommodation = self.accommodation.saturating_add(1);
    }

    /// Remove one unit; stays at zero
    pub fn remove_accommodation(&mut self) {
        self.accommodation = self.accommodation.saturating_sub(1);
    }

    /// Price the selection. `None` when nothing is selected.
    ///
    /// Selected ids missing from the catalog are left out.
    pub fn summarize(&self, catalog: &Catalog, selection: &Selection) -> Option<CartSummary> {
        if selection.is_empty() {
            return None;
        }

        let lines: Vec<CartLine> = selection
            .iter()
            .filter_map(|(id, quantity)| {
                let Some(course) = catalog.get(id) else {
                    tracing::debug!(course_id = id, "selected course not in catalog");
                    return None;
                };
                Some(CartLine {
                    course_id: course.id.clone(),
                    title: course.title.clone(),
                    unit_price: course.price,
                    quantity,
                    total: course.price * f64::from(quantity),
                })
            })
            .collect();

        let courses_total = lines.iter().map(|l| l.total).sum();
        let accommodation_total = ACCOMMODATION_PRICE * f64::from(self.accommodation);

        Some(CartSummary {
            lines,
            courses_total,
            accommodation_count: self.accommodation,
            accommodation_total,
            grand_total: courses_total + accommodation_total,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub courses_total: f64,
    pub accommodation_count: u32,
    pub accommodation_total: f64,
    pub grand_total: f64,
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24} {:>10} {:>8} {:>10}", "Course", "Price", "Persons", "Total")?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<24} {:>10} {:>8} {:>10}",
                line.title,
                format_price(line.unit_price),
                line.quantity,
                format_price(line.total)
            )?;
        }
        writeln!(
            f,
            "{:<24} {:>10} {:>8} {:>10}",
            "Accommodation",
            format_price(ACCOMMODATION_PRICE),
            self.accommodation_count,
            format_price(self.accommodation_total)
        )?;
        write!(f, "{:>44} {:>10}", "Grand Total", format_price(self.grand_total))
    }
}
