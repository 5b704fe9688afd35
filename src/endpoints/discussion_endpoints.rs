// veche-client/src/endpoints/discussion_endpoints.rs
use crate::client::{ApiClient, ApiRequest};
use crate::models::{
    check_vote, ActionProposal, ClientError, CommentData, CreateDiscussionRequest, Discussion,
    Status, UpdateDiscussionRequest, VoteValue,
};
use crate::utils::error_normalizer;
use log::{info, warn};
use uuid::Uuid;

fn discussion_path(id: Uuid) -> String {
    format!("/discussions/{}", id)
}

impl ApiClient {
    pub async fn list_discussions(&self) -> Result<Vec<Discussion>, ClientError> {
        self.fetch_json(ApiRequest::get("/discussions")).await
    }

    /// Loads one discussion, searching the full list when the backend has no
    /// single-item route (404 or 405).
    ///
    /// Any other failure is reported as the backend classified it.
    pub async fn get_discussion(&self, id: Uuid) -> Result<Discussion, ClientError> {
        let single = self.request(ApiRequest::get(discussion_path(id))).await?;
        if single.is_success() {
            return single.json();
        }
        if !matches!(single.status, 404 | 405) {
            return Err(error_normalizer::api_error_from_response(&single).into());
        }

        warn!("🔍 Single fetch of discussion {} returned {}, searching list", id, single.status);
        self.list_discussions()
            .await?
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ClientError::NotFound("Discussion".to_string()))
    }

    pub async fn create_discussion(&self, discussion: &CreateDiscussionRequest) -> Result<(), ClientError> {
        if discussion.subject.trim().is_empty() {
            return Err(ClientError::Validation("Subject is required".to_string()));
        }
        if discussion.party_id.is_none() {
            return Err(ClientError::Validation("Choose a party".to_string()));
        }

        info!("📝 Creating discussion: {}", discussion.subject);
        let request = ApiRequest::post("/discussions").json(discussion)?;
        self.send_unit(request).await
    }

    pub async fn update_discussion(&self, id: Uuid, updates: &UpdateDiscussionRequest) -> Result<(), ClientError> {
        let request = ApiRequest::patch(discussion_path(id)).json(updates)?;
        self.send_unit(request).await
    }

    // Unconditional "set status to X"; the backend decides whether it is allowed
    pub async fn set_discussion_status(&self, id: Uuid, target: Status) -> Result<(), ClientError> {
        info!("🔁 Setting discussion {} to {}", id, target);
        let path = format!("{}/{}", discussion_path(id), target.transition_segment());
        self.send_unit(ApiRequest::post(path)).await
    }

    // Same as `set_discussion_status`, noting jumps outside the canonical order
    pub async fn change_discussion_status(&self, discussion: &Discussion, target: Status) -> Result<(), ClientError> {
        if !Status::is_canonical_transition(discussion.status, target) {
            warn!(
                "⚠️ Discussion {} moves {} -> {} outside the usual order",
                discussion.id, discussion.status, target
            );
        }
        self.set_discussion_status(discussion.id, target).await
    }

    pub async fn vote(&self, id: Uuid, value: VoteValue) -> Result<(), ClientError> {
        let request = ApiRequest::post(format!("{}/vote", discussion_path(id))).query("vote", value);
        self.send_unit(request).await
    }

    /// Casts a vote after checking it against the discussion's status.
    ///
    /// A non-empty argument is posted as a comment once the vote is recorded.
    pub async fn cast_vote(
        &self,
        discussion: &Discussion,
        value: VoteValue,
        argument: Option<&str>,
    ) -> Result<(), ClientError> {
        let submission = check_vote(discussion.status, value, argument).map_err(ClientError::Validation)?;

        info!("🗳️ Voting {} on discussion {}", submission.value, discussion.id);
        self.vote(discussion.id, submission.value).await?;

        if let Some(argument) = submission.argument {
            let request = ApiRequest::post(format!("{}/comments", discussion_path(discussion.id)))
                .json(&CommentData { content: argument })?;
            self.send_unit(request).await?;
        }

        Ok(())
    }

    pub async fn attach_action(&self, id: Uuid, proposal: &ActionProposal) -> Result<(), ClientError> {
        info!("📎 Attaching {} to discussion {}", proposal.action_type(), id);
        let body = proposal.to_request()?;
        let request = ApiRequest::post(format!("{}/action", discussion_path(id))).json(&body)?;
        self.send_unit(request).await
    }
}
