// veche-client/src/models/actions.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Stored action as returned with a discussion; `payload` is a JSON document
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: Uuid,
    pub action_type: String,
    pub payload: String,
}

impl Action {
    // Parse the stored payload, None when it is not a known proposal
    pub fn proposal(&self) -> Option<ActionProposal> {
        serde_json::from_str(&self.payload).ok()
    }
}

/// Structural change proposed alongside a discussion.
///
/// Proposals are queued with the discussion; nothing here carries them out.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionProposal {
    #[serde(rename_all = "camelCase")]
    RenameParty { party_id: Uuid, new_name: String },
    #[serde(rename_all = "camelCase")]
    RenameCompany { company_id: Uuid, new_name: String },
    #[serde(rename_all = "camelCase")]
    EvictUser { user_id: Uuid, party_id: Uuid },
    #[serde(rename_all = "camelCase")]
    DeleteParty { party_id: Uuid },
}

impl ActionProposal {
    pub fn action_type(&self) -> &'static str {
        match self {
            ActionProposal::RenameParty { .. } => "RENAME_PARTY",
            ActionProposal::RenameCompany { .. } => "RENAME_COMPANY",
            ActionProposal::EvictUser { .. } => "EVICT_USER",
            ActionProposal::DeleteParty { .. } => "DELETE_PARTY",
        }
    }

    pub fn to_request(&self) -> Result<NewActionRequest, serde_json::Error> {
        Ok(NewActionRequest {
            action_type: self.action_type().to_string(),
            payload: serde_json::to_string(self)?,
        })
    }
}

// Body of `POST /discussions/{id}/action`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewActionRequest {
    pub action_type: String,
    pub payload: String,
}
