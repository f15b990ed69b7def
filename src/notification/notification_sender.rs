use async_trait::async_trait;
use reqwest::Client;

use super::notification_dto::NotificationMessage;
use crate::error::{AppError, Result};

pub const DEFAULT_NOTIFY_BASE_URL: &str = "https://www.notifyx.cn/api/v1/send";

/// Delivers a reminder to an external push service on behalf of `api_key`.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, api_key: &str, message: &NotificationMessage) -> Result<()>;
}

/// NotifyX-style endpoint: `POST {base_url}/{api_key}` with a JSON body.
#[derive(Clone)]
pub struct NotifyXSender {
    client: Client,
    base_url: String,
}

impl NotifyXSender {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), api_key)
    }
}

#[async_trait]
impl NotificationSender for NotifyXSender {
    async fn send(&self, api_key: &str, message: &NotificationMessage) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(api_key))
            .json(message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Push endpoint answered {}: {}", status, body);
            return Err(AppError::Upstream(body));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::Path, http::StatusCode, routing::post, Json, Router};

    use super::*;

    type Received = Arc<Mutex<Vec<(String, NotificationMessage)>>>;

    async fn spawn_endpoint(status: StatusCode, reply: &'static str) -> (String, Received) {
        let received: Received = Arc::default();
        let sink = received.clone();
        let app = Router::new().route(
            "/send/:key",
            post(move |Path(key): Path<String>, Json(message): Json<NotificationMessage>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push((key, message));
                    (status, reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/send"), received)
    }

    fn message() -> NotificationMessage {
        NotificationMessage {
            title: "Schedule reminder: Standup".into(),
            content: "Your scheduled time has arrived".into(),
            description: "Time: 2024-01-01 09:00, priority: Medium".into(),
        }
    }

    #[test]
    fn test_endpoint_joins_key() {
        let sender = NotifyXSender::new("https://example.test/api/v1/send/");
        assert_eq!(
            sender.endpoint("abc"),
            "https://example.test/api/v1/send/abc"
        );
    }

    #[tokio::test]
    async fn test_send_posts_message_to_key_path() {
        let (base_url, received) = spawn_endpoint(StatusCode::OK, "{}").await;
        let sender = NotifyXSender::new(base_url);

        sender.send("key-123", &message()).await.unwrap();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0, "key-123");
        assert_eq!(received[0].1, message());
    }

    #[tokio::test]
    async fn test_send_failure_carries_upstream_body() {
        let (base_url, _) = spawn_endpoint(StatusCode::UNAUTHORIZED, "invalid key").await;
        let sender = NotifyXSender::new(base_url);

        let err = sender.send("bad", &message()).await.unwrap_err();
        match err {
            AppError::Upstream(body) => assert_eq!(body, "invalid key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
