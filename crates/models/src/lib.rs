//! SeaORM entities and row-level helpers for accounts, projects,
//! memberships and invites.

pub mod errors;
pub mod db;
pub mod user;
pub mod project;
pub mod project_member;
pub mod invite;

pub use invite::InviteStatus;
pub use project_member::ProjectRole;

#[cfg(test)]
mod tests;
