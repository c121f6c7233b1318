//! Account module: signup, profile editing and lookups.
//!
//! Split like the other modules in this crate: plain input/output types in
//! `domain`, the hashing seam in `password`, business rules in `service`.

pub mod domain;
pub mod password;
pub mod service;

pub use password::{Argon2Hasher, CredentialHasher};
pub use service::AccountService;
