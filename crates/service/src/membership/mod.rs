//! Project membership: member listing, role lookup and changes, removal.

pub mod domain;
pub mod service;

pub use service::MembershipService;
