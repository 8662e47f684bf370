//! Table identifiers and documented row shapes.
//!
//! Rows are owned by the external store and are passed through verbatim, so
//! the structs here describe the wire shape for the API document; they are
//! not used to decode rows.

pub mod customer;
pub mod food;

pub use customer::{Customer, CustomerTable, SortDirection};
pub use food::{Food, FoodNameUpdate, FoodUnitUpdate, Foods, NewFood};
