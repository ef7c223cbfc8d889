//! Shared Kernel - Vocabulary used by every marketplace crate
//!
//! This crate contains the smallest shared core:
//! - The unified error type and its classification
//! - Typed UUID identifiers for persisted entities
//!
//! Anything placed here must mean the same thing in the account crate and
//! in the marketplace crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
