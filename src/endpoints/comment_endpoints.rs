// veche-client/src/endpoints/comment_endpoints.rs
use crate::client::{ApiClient, ApiRequest};
use crate::models::{ClientError, Comment, CommentData};
use log::info;
use uuid::Uuid;

fn non_empty(content: &str) -> Result<String, ClientError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ClientError::Validation("Comment cannot be empty".to_string()));
    }
    Ok(content.to_string())
}

impl ApiClient {
    pub async fn list_comments(&self, discussion_id: Uuid) -> Result<Vec<Comment>, ClientError> {
        self.fetch_json(ApiRequest::get(format!("/discussions/{}/comments", discussion_id)))
            .await
    }

    pub async fn post_comment(&self, discussion_id: Uuid, content: &str) -> Result<(), ClientError> {
        let content = non_empty(content)?;

        info!("💬 Commenting on discussion {}", discussion_id);
        let request = ApiRequest::post(format!("/discussions/{}/comments", discussion_id))
            .json(&CommentData { content })?;
        self.send_unit(request).await
    }

    pub async fn edit_comment(&self, comment_id: Uuid, content: &str) -> Result<(), ClientError> {
        let content = non_empty(content)?;

        let request = ApiRequest::patch(format!("/comments/{}", comment_id)).json(&CommentData { content })?;
        self.send_unit(request).await
    }
}
