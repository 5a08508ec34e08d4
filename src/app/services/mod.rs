//! Services layer - pure operations and utilities.
//!
//! This module contains stateless logic shared by the controllers and skins:
//! - Column projection and its inverse
//! - Lenient field coercion (prices, names)
//! - Skin rendering contract and view model

pub mod coerce;
pub mod columns;
pub mod render;
