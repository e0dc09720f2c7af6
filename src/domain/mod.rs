//! Domain layer: entities, lookup outcomes, store errors and the traits the
//! infrastructure layer implements.

pub mod entities;
pub mod repositories;
pub mod store_error;

pub use store_error::{StoreError, StoreKind};
