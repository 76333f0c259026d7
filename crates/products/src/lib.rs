//! Product service schemas.
//!
//! Shapes exchanged at the product service boundary. Prices are exact decimals
//! end to end; they never pass through a binary float.

pub mod product;

pub use product::{Product, ProductCreate, ProductId, ProductResponse};
