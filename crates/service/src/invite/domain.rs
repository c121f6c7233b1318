use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{invite, project, InviteStatus};

/// A received invite together with the name of the project it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteView {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub project_id: Uuid,
    pub project_name: Option<String>,
    pub status: InviteStatus,
    pub created_at: DateTime<FixedOffset>,
}

impl InviteView {
    pub fn from_parts(i: invite::Model, p: Option<project::Model>) -> Self {
        Self {
            id: i.id,
            sender_id: i.sender_id,
            receiver_id: i.receiver_id,
            project_id: i.project_id,
            project_name: p.map(|p| p.name),
            status: i.status,
            created_at: i.created_at,
        }
    }
}
