//! Project invitations: sending, pending lookups and the accept/decline transitions.

pub mod domain;
pub mod service;

pub use service::InviteService;
