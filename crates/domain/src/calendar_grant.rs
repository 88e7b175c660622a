use crate::shared::entity::Entity;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarGrantStatus {
    Active,
    Revoked,
}

impl CalendarGrantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
        }
    }
}

impl FromStr for CalendarGrantStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "revoked" => Ok(Self::Revoked),
            _ => Err(anyhow::Error::msg(format!("Invalid grant status: {}", s))),
        }
    }
}

/// An external-calendar credential, maintained by the OAuth flow.
/// Read-only for the negotiation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrant {
    pub id: String,
    pub calendar_id: Option<String>,
    pub status: CalendarGrantStatus,
}

impl Entity<String> for CalendarGrant {
    fn id(&self) -> String {
        self.id.clone()
    }
}
