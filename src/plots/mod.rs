//! High-level chart types.
//!
//! Provides ready-to-use visualization types with builder APIs.

mod pie;

pub use pie::{PieChart, PieSlice};
