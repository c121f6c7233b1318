//! Service layer for accounts, project membership and invitations.
//! - Business rules live here; entities and validation come from `models`.
//! - Every operation returns `ServiceError`, independent of the web layer.

pub mod errors;
pub mod account;
pub mod membership;
pub mod invite;
pub mod project;
pub mod context;
#[cfg(test)]
pub mod test_support;

pub use context::ServiceContext;
pub use errors::ServiceError;
