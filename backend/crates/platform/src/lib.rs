//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policy, hashing and verification (Argon2id)
//! - Signed, expiring session tokens (JWT, HS256)

pub mod password;
pub mod token;
