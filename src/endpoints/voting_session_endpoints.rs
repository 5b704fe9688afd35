// veche-client/src/endpoints/voting_session_endpoints.rs
use crate::client::{ApiClient, ApiRequest};
use crate::models::{
    ClientError, CreateVotingSessionRequest, Discussion, Status, UpdateVotingSessionRequest,
    VotingSession,
};
use log::info;
use uuid::Uuid;

// Shared by create and update: a name, a party and at least one discussion
fn check_session_fields(name: &str, party_id: Option<Uuid>, discussion_ids: &[Uuid]) -> Result<(), ClientError> {
    if name.trim().is_empty() {
        return Err(ClientError::Validation("Session name is required".to_string()));
    }
    if party_id.is_none() {
        return Err(ClientError::Validation("Choose a party".to_string()));
    }
    if discussion_ids.is_empty() {
        return Err(ClientError::Validation("Select at least one discussion".to_string()));
    }
    Ok(())
}

/// Discussions that can be put into a new session: still `WAITING` and,
/// when a party is chosen, owned by it.
pub fn eligible_discussions(discussions: &[Discussion], party_id: Option<Uuid>) -> Vec<&Discussion> {
    discussions
        .iter()
        .filter(|d| d.status == Status::Waiting)
        .filter(|d| party_id.map_or(true, |pid| d.party.id == pid))
        .collect()
}

impl ApiClient {
    pub async fn list_voting_sessions(&self) -> Result<Vec<VotingSession>, ClientError> {
        self.fetch_json(ApiRequest::get("/voting-sessions")).await
    }

    pub async fn get_voting_session(&self, id: Uuid) -> Result<VotingSession, ClientError> {
        self.fetch_json(ApiRequest::get(format!("/voting-sessions/{}", id)))
            .await
    }

    pub async fn create_voting_session(&self, session: &CreateVotingSessionRequest) -> Result<(), ClientError> {
        check_session_fields(&session.name, session.party_id, &session.discussion_ids)?;

        info!(
            "📝 Creating voting session {} with {} discussions",
            session.name,
            session.discussion_ids.len()
        );
        let request = ApiRequest::post("/voting-sessions").json(session)?;
        self.send_unit(request).await
    }

    pub async fn update_voting_session(&self, id: Uuid, session: &UpdateVotingSessionRequest) -> Result<(), ClientError> {
        check_session_fields(&session.name, session.party_id, &session.discussion_ids)?;

        let request = ApiRequest::patch(format!("/voting-sessions/{}", id)).json(session)?;
        self.send_unit(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorKind, Party};
    use crate::tests::support::{respond, signed_in_client};
    use chrono::{TimeZone, Utc};
    use reqwest::Method;
    use serde_json::json;

    fn discussion(party: &Party, status: Status) -> Discussion {
        Discussion {
            id: Uuid::new_v4(),
            subject: "Item".to_string(),
            content: String::new(),
            created_at: None,
            party: party.clone(),
            creator_name: String::new(),
            file_url: None,
            file_name: None,
            file_size: None,
            status,
            votes: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[test]
    fn only_waiting_discussions_of_the_party_are_eligible() {
        let board = Party { id: Uuid::new_v4(), name: "Board".to_string() };
        let staff = Party { id: Uuid::new_v4(), name: "Staff".to_string() };
        let items = vec![
            discussion(&board, Status::Waiting),
            discussion(&board, Status::Voting),
            discussion(&staff, Status::Waiting),
        ];

        assert_eq!(eligible_discussions(&items, Some(board.id)).len(), 1);
        assert_eq!(eligible_discussions(&items, None).len(), 2);
    }

    #[test]
    fn session_fields_are_required() {
        let party = Some(Uuid::new_v4());
        let ids = vec![Uuid::new_v4()];
        assert!(check_session_fields("  ", party, &ids).is_err());
        assert!(check_session_fields("Spring", None, &ids).is_err());
        assert!(check_session_fields("Spring", party, &[]).is_err());
        assert!(check_session_fields("Spring", party, &ids).is_ok());
    }

    #[actix_rt::test]
    async fn list_and_get_use_session_paths() {
        let id = Uuid::new_v4();
        let session = json!({
            "id": id,
            "name": "Spring",
            "party": { "id": Uuid::new_v4(), "name": "Board" },
            "status": "VOTING",
        })
        .to_string();
        let (client, transport) = signed_in_client(vec![respond(200, "[]"), respond(200, &session)]);

        assert!(client.list_voting_sessions().await.unwrap().is_empty());
        let loaded = client.get_voting_session(id).await.unwrap();

        assert_eq!(loaded.id, id);
        assert_eq!(loaded.status, Status::Voting);
        assert!(transport.seen().iter().all(|r| r.method == Method::GET));
        assert_eq!(transport.paths(), vec!["/voting-sessions".to_string(), format!("/voting-sessions/{}", id)]);
    }

    #[actix_rt::test]
    async fn create_session_uses_starts_at_names() {
        let (client, transport) = signed_in_client(vec![respond(201, "")]);
        let party = Uuid::new_v4();
        let discussion = Uuid::new_v4();
        let first = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        client
            .create_voting_session(&CreateVotingSessionRequest {
                name: "Spring".to_string(),
                party_id: Some(party),
                discussion_ids: vec![discussion],
                first_round_starts_at: Some(first),
                second_round_starts_at: None,
                ends_at: None,
            })
            .await
            .unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].path, "/voting-sessions");
        let body = seen[0].body.as_ref().unwrap();
        assert_eq!(body["partyId"], json!(party));
        assert_eq!(body["discussionIds"], json!([discussion]));
        assert_eq!(body["firstRoundStartsAt"], json!(first));
        assert!(body.get("secondRoundStartsAt").is_some());
        assert!(body.get("endsAt").is_some());
        assert!(body.get("firstRoundStart").is_none());
    }

    #[actix_rt::test]
    async fn update_session_uses_round_start_names() {
        let (client, transport) = signed_in_client(vec![respond(200, "")]);
        let id = Uuid::new_v4();
        let end = Utc.with_ymd_and_hms(2025, 3, 8, 18, 0, 0).unwrap();

        client
            .update_voting_session(
                id,
                &UpdateVotingSessionRequest {
                    name: "Spring".to_string(),
                    party_id: Some(Uuid::new_v4()),
                    discussion_ids: vec![Uuid::new_v4()],
                    first_round_start: None,
                    second_round_start: None,
                    end_time: Some(end),
                },
            )
            .await
            .unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].method, Method::PATCH);
        assert_eq!(seen[0].path, format!("/voting-sessions/{}", id));
        let body = seen[0].body.as_ref().unwrap();
        assert_eq!(body["endTime"], json!(end));
        assert!(body.get("firstRoundStart").is_some());
        assert!(body.get("endsAt").is_none());
    }

    #[actix_rt::test]
    async fn session_without_discussions_is_never_sent() {
        let (client, transport) = signed_in_client(Vec::new());

        let err = client
            .create_voting_session(&CreateVotingSessionRequest {
                name: "Spring".to_string(),
                party_id: Some(Uuid::new_v4()),
                discussion_ids: Vec::new(),
                first_round_starts_at: None,
                second_round_starts_at: None,
                ends_at: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(transport.seen().is_empty());
    }
}
