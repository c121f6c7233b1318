use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::account::{AccountService, CredentialHasher};
use crate::invite::InviteService;
use crate::membership::MembershipService;

/// Services built once at startup and shared by every request.
#[derive(Clone)]
pub struct ServiceContext {
    pub db: DatabaseConnection,
    pub accounts: Arc<AccountService>,
    pub memberships: Arc<MembershipService>,
    pub invites: Arc<InviteService>,
}

impl ServiceContext {
    pub fn new(db: DatabaseConnection, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(db.clone(), hasher)),
            memberships: Arc::new(MembershipService::new(db.clone())),
            invites: Arc::new(InviteService::new(db.clone())),
            db,
        }
    }
}
