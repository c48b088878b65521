//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record and its validation rules.
//!
//! # Invariants
//! - Contacts are identified by their natural key (first + last name).

pub mod contact;
