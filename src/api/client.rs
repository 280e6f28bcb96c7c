//! HTTP client for Kibana's Agent Builder API
//!
//! ```ignore
//! let client = AgentBuilderClient::new(BridgeConfig::from_env()?)?;
//! let agents = client.list_agents().await?;
//! let reply = client
//!     .converse(&ConverseRequest::new("elastic-ai-agent", "hello"))
//!     .await?;
//! ```

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;

use super::auth::ApiKeyAuth;
use super::provider::AgentBuilderApi;
use super::types::{agents_from_payload, Agent, ConverseRequest, ConverseResponse};
use crate::config::BridgeConfig;
use crate::core::{BridgeError, BridgeResult};

pub const AGENTS_PATH: &str = "/api/agent_builder/agents";
pub const CONVERSE_PATH: &str = "/api/agent_builder/converse";

/// Upper bound for the agent listing call
const LIST_TIMEOUT: Duration = Duration::from_secs(60);

/// Agent Builder client bound to one Kibana space
pub struct AgentBuilderClient {
    client: Client,
    config: BridgeConfig,
}

impl AgentBuilderClient {
    /// Build a client from resolved configuration
    pub fn new(config: BridgeConfig) -> BridgeResult<Self> {
        let headers = ApiKeyAuth::new(&config.api_key).headers()?;

        if !config.verify_ssl {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| BridgeError::invalid_argument(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn list_timeout(&self) -> Duration {
        self.config.timeout.min(LIST_TIMEOUT)
    }

    /// Turn a response into JSON, mapping non-success statuses to `Api`
    async fn read_json(response: Response) -> BridgeResult<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read error body for HTTP {}: {}", status.as_u16(), e);
                    String::new()
                }
            };
            tracing::warn!("Agent Builder returned HTTP {}", status.as_u16());
            return Err(BridgeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| BridgeError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AgentBuilderApi for AgentBuilderClient {
    async fn list_agents(&self) -> BridgeResult<Vec<Agent>> {
        let url = self.config.url(AGENTS_PATH);
        tracing::info!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.list_timeout())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Agent listing failed: {}", e);
                BridgeError::from(e)
            })?;

        let agents = agents_from_payload(Self::read_json(response).await?);
        tracing::info!("Listed {} agents", agents.len());
        Ok(agents)
    }

    async fn converse(&self, request: &ConverseRequest) -> BridgeResult<ConverseResponse> {
        let url = self.config.url(CONVERSE_PATH);
        tracing::info!(agent = %request.agent_id, "POST {}", url);
        tracing::debug!(
            conversation = ?request.conversation_id,
            input_len = request.input.len(),
            overrides = !request.overrides.is_empty(),
            "Converse request"
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Converse failed: {}", e);
                BridgeError::from(e)
            })?;

        let reply = ConverseResponse::from_payload(Self::read_json(response).await?);
        tracing::debug!(conversation = ?reply.conversation_id, "Converse reply");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeKibana {
        bodies: Arc<Mutex<Vec<Value>>>,
        headers: Arc<Mutex<Vec<HeaderMap>>>,
    }

    async fn list_handler(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("ApiKey k") {
            return Err(StatusCode::UNAUTHORIZED);
        }
        Ok(Json(json!({
            "results": [
                {"id": "zeta", "name": "Zeta"},
                {"id": "alpha", "name": "Alpha", "description": "first"}
            ]
        })))
    }

    async fn space_list_handler() -> Json<Value> {
        Json(json!([{"id": "ops-agent"}]))
    }

    async fn converse_handler(
        State(fake): State<FakeKibana>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        fake.bodies.lock().unwrap().push(body.clone());
        fake.headers.lock().unwrap().push(headers);

        if body["agent_id"] == "missing" {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({"statusCode": 404, "message": "Agent missing not found"})),
            );
        }

        let conversation = body
            .get("conversation_id")
            .cloned()
            .unwrap_or_else(|| json!("c1"));
        (
            StatusCode::OK,
            Json(json!({
                "conversation_id": conversation,
                "response": {"message": format!("echo: {}", body["input"].as_str().unwrap_or(""))}
            })),
        )
    }

    async fn slow_handler() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Json(json!({"conversation_id": "late"}))
    }

    async fn empty_error_handler() -> StatusCode {
        StatusCode::BAD_GATEWAY
    }

    async fn garbage_handler() -> &'static str {
        "<html>not json</html>"
    }

    async fn spawn_fake() -> (String, FakeKibana) {
        let fake = FakeKibana::default();
        let app = Router::new()
            .route(AGENTS_PATH, get(list_handler))
            .route("/s/ops/api/agent_builder/agents", get(space_list_handler))
            .route(CONVERSE_PATH, post(converse_handler))
            .route("/s/slow/api/agent_builder/converse", post(slow_handler))
            .route("/s/garbage/api/agent_builder/converse", post(garbage_handler))
            .route("/s/gateway/api/agent_builder/agents", get(empty_error_handler))
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), fake)
    }

    fn client_for(base_url: &str) -> AgentBuilderClient {
        AgentBuilderClient::new(BridgeConfig::new(base_url, "k")).unwrap()
    }

    #[tokio::test]
    async fn test_list_agents_keeps_server_order() {
        let (base, _fake) = spawn_fake().await;
        let agents = client_for(&base).list_agents().await.unwrap();

        let ids: Vec<_> = agents.iter().map(Agent::id).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(agents[1].description(), "first");
    }

    #[tokio::test]
    async fn test_list_agents_in_space() {
        let (base, _fake) = spawn_fake().await;
        let client =
            AgentBuilderClient::new(BridgeConfig::new(&base, "k").with_space("ops")).unwrap();
        let agents = client.list_agents().await.unwrap();
        assert_eq!(agents[0].id(), "ops-agent");
    }

    #[tokio::test]
    async fn test_list_agents_bad_key_is_api_error() {
        let (base, _fake) = spawn_fake().await;
        let client = AgentBuilderClient::new(BridgeConfig::new(&base, "wrong")).unwrap();

        match client.list_agents().await {
            Err(BridgeError::Api { status, .. }) => assert_eq!(status, 401),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_converse_sends_body_and_headers() {
        let (base, fake) = spawn_fake().await;
        let client = client_for(&base);

        let reply = client
            .converse(&ConverseRequest::new("agent-1", "hello"))
            .await
            .unwrap();
        assert_eq!(reply.conversation_id.as_deref(), Some("c1"));
        assert_eq!(reply.message(), Some("echo: hello"));

        let bodies = fake.bodies.lock().unwrap();
        assert_eq!(bodies[0], json!({"agent_id": "agent-1", "input": "hello"}));

        let headers = fake.headers.lock().unwrap();
        assert_eq!(headers[0].get("kbn-xsrf").unwrap(), "true");
        assert_eq!(headers[0].get("authorization").unwrap(), "ApiKey k");
    }

    #[tokio::test]
    async fn test_converse_threads_conversation_id() {
        let (base, fake) = spawn_fake().await;
        let client = client_for(&base);

        let request = ConverseRequest::new("agent-1", "again").with_conversation(Some("c42".into()));
        let reply = client.converse(&request).await.unwrap();
        assert_eq!(reply.conversation_id.as_deref(), Some("c42"));
        assert_eq!(fake.bodies.lock().unwrap()[0]["conversation_id"], "c42");
    }

    #[tokio::test]
    async fn test_converse_api_error_carries_body() {
        let (base, _fake) = spawn_fake().await;
        let err = client_for(&base)
            .converse(&ConverseRequest::new("missing", "hi"))
            .await
            .unwrap_err();

        match err {
            BridgeError::Api { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Agent missing not found"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_without_body() {
        let (base, _fake) = spawn_fake().await;
        let client =
            AgentBuilderClient::new(BridgeConfig::new(&base, "k").with_space("gateway")).unwrap();

        match client.list_agents().await {
            Err(BridgeError::Api { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.is_empty());
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_converse_timeout_is_network_error() {
        let (base, _fake) = spawn_fake().await;
        let config = BridgeConfig::new(&base, "k")
            .with_space("slow")
            .with_timeout(Duration::from_millis(200));
        let client = AgentBuilderClient::new(config).unwrap();

        let err = client
            .converse(&ConverseRequest::new("agent-1", "hi"))
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let (base, _fake) = spawn_fake().await;
        let client =
            AgentBuilderClient::new(BridgeConfig::new(&base, "k").with_space("garbage")).unwrap();

        let err = client
            .converse(&ConverseRequest::new("agent-1", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .list_agents()
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(!err.is_timeout());
    }
}
