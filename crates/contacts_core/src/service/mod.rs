//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into contact book use-cases.
//! - Keep callers decoupled from the chosen store backend.

pub mod contact_service;
