//! HTTP submission to the feedback backend

use super::FeedbackApi;
use crate::constants::FEEDBACKS_PATH;
use crate::error::{FeedbackError, Result};
use crate::types::FeedbackPayload;
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub struct HttpFeedbackApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFeedbackApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), FEEDBACKS_PATH)
    }
}

#[async_trait]
impl FeedbackApi for HttpFeedbackApi {
    async fn submit(&self, payload: &FeedbackPayload) -> Result<()> {
        let url = self.endpoint();
        debug!(
            url = %url,
            feedback_type = ?payload.feedback_type,
            has_screenshot = payload.screenshot.is_some(),
            "Posting feedback"
        );

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            info!(status = %status, "Feedback accepted");
            Ok(())
        } else {
            warn!(status = %status, "Feedback rejected by server");
            Err(FeedbackError::Status(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedbackType;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> FeedbackPayload {
        FeedbackPayload {
            feedback_type: FeedbackType::Bug,
            comment: "Button does nothing".into(),
            screenshot: Some("data:image/png;base64,AAAA".into()),
        }
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = HttpFeedbackApi::new("http://localhost:3333/");
        assert_eq!(api.endpoint(), "http://localhost:3333/feedbacks");
    }

    #[tokio::test]
    async fn posts_json_body_to_feedbacks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedbacks"))
            .and(body_json(json!({
                "type": "BUG",
                "comment": "Button does nothing",
                "screenshot": "data:image/png;base64,AAAA"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpFeedbackApi::new(server.uri());
        api.submit(&payload()).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedbacks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = HttpFeedbackApi::new(server.uri());
        let err = api.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, FeedbackError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        // Grab a free port, then release it so nothing is listening there
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpFeedbackApi::new(format!("http://127.0.0.1:{}", port));
        let err = api.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, FeedbackError::Http(_)));
    }
}
