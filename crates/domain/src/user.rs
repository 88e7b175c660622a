use crate::shared::entity::{Entity, ID};

/// Profile surface of a platform user, as far as the negotiation engine
/// needs it: a display name for reminder payloads and an email for
/// external calendar participants.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    pub fn new() -> Self {
        Self {
            id: Default::default(),
            name: None,
            email: None,
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
