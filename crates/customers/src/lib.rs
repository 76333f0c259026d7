//! Customer service schemas.
//!
//! Shapes exchanged at the customer service boundary: the stored entity, the
//! create request (no server-assigned fields), and the response body. Storage
//! and routing belong to the service itself.

pub mod customer;

pub use customer::{Customer, CustomerCreate, CustomerId, CustomerResponse};
