//! # Webhook Ingress
//!
//! Optional push-based ingress: accepts one platform update per POST on
//! the token-derived secret path and hands it to the same router as the
//! polling path. The response is sent immediately after handoff and is
//! never coupled to how long the reply takes downstream.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::bot::Router;
use crate::transport::Transport;
use crate::update::classify_update;

/// The secret route updates are pushed to, derived from the bot token
pub fn webhook_path(token: &str) -> String {
    format!("/bot{}", token)
}

/// Serve the webhook ingress until the shutdown signal fires
pub async fn run_webhook_server<T: Transport + 'static>(
    port: u16,
    secret_path: String,
    router: Arc<Router<T>>,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("Webhook server listening on {}", addr);

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                info!("Webhook server shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _)) => {
                        let io = TokioIo::new(stream);
                        let router = Arc::clone(&router);
                        let secret_path = secret_path.clone();
                        tokio::spawn(async move {
                            let service = hyper::service::service_fn(
                                move |req: hyper::Request<hyper::body::Incoming>| {
                                    handle_request(
                                        Arc::clone(&router),
                                        secret_path.clone(),
                                        req,
                                    )
                                },
                            );
                            if let Err(e) =
                                http1::Builder::new().serve_connection(io, service).await
                            {
                                debug!(error = %e, "Webhook connection error");
                            }
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to accept webhook connection");
                    }
                }
            }
        }
    }
}

async fn handle_request<T, B>(
    router: Arc<Router<T>>,
    secret_path: String,
    req: hyper::Request<B>,
) -> Result<hyper::Response<String>, Infallible>
where
    T: Transport + 'static,
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    if req.method() != hyper::Method::POST || req.uri().path() != secret_path {
        let mut response = hyper::Response::new("Not Found".to_string());
        *response.status_mut() = hyper::StatusCode::NOT_FOUND;
        return Ok(response);
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "Failed to read webhook body");
            let mut response = hyper::Response::new("Bad Request".to_string());
            *response.status_mut() = hyper::StatusCode::BAD_REQUEST;
            return Ok(response);
        }
    };

    match serde_json::from_slice::<teloxide::types::Update>(&body) {
        Ok(update) => {
            // Hand off and answer right away; the 200 does not wait for
            // the reply to be sent.
            if let Some(inbound) = classify_update(update) {
                let router = Arc::clone(&router);
                tokio::spawn(async move { router.dispatch(inbound).await });
            } else {
                debug!("Dropping webhook update with no consumable payload");
            }
            Ok(hyper::Response::new("OK".to_string()))
        }
        Err(e) => {
            warn!(error = %e, "Malformed webhook payload");
            let mut response = hyper::Response::new("Bad Request".to_string());
            *response.status_mut() = hyper::StatusCode::BAD_REQUEST;
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use teloxide::types::{ChatId, InlineKeyboardMarkup};
    use url::Url;

    use crate::errors::BotResult;

    /// Transport double that records sent texts
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send_message(
            &self,
            _chat: ChatId,
            text: &str,
            _keyboard: Option<InlineKeyboardMarkup>,
        ) -> BotResult<()> {
            self.sent.lock().push(text.to_string());
            Ok(())
        }

        async fn acknowledge_callback(&self, _callback_id: &str) -> BotResult<()> {
            Ok(())
        }
    }

    /// Transport double whose sends never complete
    struct StalledTransport;

    #[async_trait]
    impl Transport for StalledTransport {
        async fn send_message(
            &self,
            _chat: ChatId,
            _text: &str,
            _keyboard: Option<InlineKeyboardMarkup>,
        ) -> BotResult<()> {
            std::future::pending().await
        }

        async fn acknowledge_callback(&self, _callback_id: &str) -> BotResult<()> {
            std::future::pending().await
        }
    }

    const SECRET_PATH: &str = "/bot123:abc";

    fn test_router<T: Transport>(transport: T) -> Arc<Router<T>> {
        Arc::new(Router::new(
            Arc::new(transport),
            Url::parse("https://game.example/play").unwrap(),
        ))
    }

    fn request(method: hyper::Method, path: &str, body: &str) -> hyper::Request<String> {
        hyper::Request::builder()
            .method(method)
            .uri(path)
            .body(body.to_string())
            .unwrap()
    }

    fn message_payload(text: &str) -> String {
        format!(
            r#"{{"update_id": 10000, "message": {{"message_id": 1, "date": 1441645532,
                "chat": {{"id": 7, "type": "private", "first_name": "Test"}},
                "from": {{"id": 7, "is_bot": false, "first_name": "Test"}},
                "text": "{}"}}}}"#,
            text
        )
    }

    #[test]
    fn test_webhook_path_embeds_token() {
        assert_eq!(webhook_path("123:abc"), "/bot123:abc");
    }

    /// Unknown routes and wrong methods are rejected with 404
    #[tokio::test]
    async fn test_unknown_route_and_method_get_not_found() {
        let router = test_router(RecordingTransport::default());

        let response = handle_request(
            Arc::clone(&router),
            SECRET_PATH.to_string(),
            request(hyper::Method::POST, "/bot999:wrong", &message_payload("hi")),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), hyper::StatusCode::NOT_FOUND);

        let response = handle_request(
            Arc::clone(&router),
            SECRET_PATH.to_string(),
            request(hyper::Method::GET, SECRET_PATH, ""),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), hyper::StatusCode::NOT_FOUND);
    }

    /// Malformed JSON on the secret path is rejected with 400
    #[tokio::test]
    async fn test_malformed_payload_gets_bad_request() {
        let router = test_router(RecordingTransport::default());

        let response = handle_request(
            router,
            SECRET_PATH.to_string(),
            request(hyper::Method::POST, SECRET_PATH, "{not json"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), hyper::StatusCode::BAD_REQUEST);
    }

    /// A valid update is answered 200 and reaches the shared router
    #[tokio::test]
    async fn test_valid_update_is_accepted_and_dispatched() {
        let transport = Arc::new(RecordingTransport::default());
        let router = Arc::new(Router::new(
            Arc::clone(&transport),
            Url::parse("https://game.example/play").unwrap(),
        ));

        let response = handle_request(
            router,
            SECRET_PATH.to_string(),
            request(hyper::Method::POST, SECRET_PATH, &message_payload("hello")),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), hyper::StatusCode::OK);

        // Dispatch runs on a spawned task; wait for it to land
        for _ in 0..50 {
            if !transport.sent.lock().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(transport.sent.lock().len(), 1);
    }

    /// The 200 is returned immediately after handoff, not after the reply
    #[tokio::test]
    async fn test_response_does_not_wait_for_reply_delivery() {
        let router = test_router(StalledTransport);

        let response = tokio::time::timeout(
            Duration::from_millis(200),
            handle_request(
                router,
                SECRET_PATH.to_string(),
                request(hyper::Method::POST, SECRET_PATH, &message_payload("hello")),
            ),
        )
        .await
        .expect("response must not wait for the stalled send")
        .unwrap();
        assert_eq!(response.status(), hyper::StatusCode::OK);
    }
}
