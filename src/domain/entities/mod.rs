//! Core domain entities representing the business data model.
//!
//! Entities are read-only views of records owned by the external stores.
//!
//! # Entity Types
//!
//! - [`Link`] - A referral link with conversion counters
//! - [`Program`] - A referral program and its commission policy
//! - [`EnrolledPartner`] - The partner enrolled through a link
//! - [`LinkWithRelations`] - A link joined with its program and enrollment
//! - [`EmbedData`] - The assembled record behind an embedded dashboard

pub mod embed;
pub mod link;
pub mod program;

pub use embed::{EmbedData, EmbedLookup, LinkWithRelations, NotFoundReason};
pub use link::{Link, LinkCountFilter, LinkId};
pub use program::{CommissionType, EnrolledPartner, Program};
