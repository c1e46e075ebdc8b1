//! Gateway Services Layer
//!
//! Business logic that spans more than one store call lives here;
//! handlers stay thin HTTP adapters.

pub mod order;

pub use order::{OrderError, OrderService};
