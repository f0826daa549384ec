//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Password hashing (Argon2id) and the account password policy
//! - Cookie management
//! - Flash notice encoding
//! - Client fingerprinting

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod flash;
pub mod password;
