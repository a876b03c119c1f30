//! Domain model for the two managed record families.
//!
//! # Responsibility
//! - Define entities (persisted shape) and DTOs (boundary shape) for
//!   bibliographic and roster records.
//! - Enforce field-level validation while converting DTO to entity.
//!
//! # Invariants
//! - DTOs are structurally permissive: every field is optional at the type
//!   level, and only validation decides acceptability.
//! - Entities never hold values that would fail DTO validation.

pub mod book;
pub mod dates;
pub mod player;
