//! Domain model types.
//!
//! A [`Tour`] is the single solution representation shared by the exact,
//! genetic, and memetic solvers.

mod tour;

pub use tour::{format_tour, Tour};
