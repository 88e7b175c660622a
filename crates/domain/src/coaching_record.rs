use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The "next call" summary an older coaching view reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextCall {
    pub datetime: i64,
    pub timezone: Tz,
    pub location: String,
    pub title: String,
}

/// Per-organization-per-client record consumed by the legacy coaching
/// view. Records exist either under the namespaced id
/// `"{organization_id}_{client_id}"` or, for pre-tenancy data, under the
/// bare client id. The negotiation engine only ever updates `next_call`
/// on records a coach already set up.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientCoachingRecord {
    pub id: String,
    pub organization_id: Option<ID>,
    pub client_user_id: ID,
    pub next_call: Option<NextCall>,
}

impl ClientCoachingRecord {
    pub fn namespaced_id(organization_id: &ID, client_id: &ID) -> String {
        format!("{}_{}", organization_id, client_id)
    }

    pub fn legacy_id(client_id: &ID) -> String {
        client_id.as_string()
    }
}

impl Entity<String> for ClientCoachingRecord {
    fn id(&self) -> String {
        self.id.clone()
    }
}
