// src/probe/telegram.rs
use super::{Identity, MessagingClient, ProbeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Bot API client that answers "who am I" through `getMe`.
pub struct BotApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GetMeResponse {
    ok: bool,
    result: Option<BotUser>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BotUser {
    id: i64,
    username: Option<String>,
}

impl BotApiClient {
    pub fn new(
        base_url: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn endpoint(&self, token: &str) -> Result<Url, ProbeError> {
        self.base_url
            .join(&format!("./bot{}/getMe", token))
            .map_err(|e| ProbeError::Transport(e.to_string()))
    }
}

#[async_trait]
impl MessagingClient for BotApiClient {
    async fn get_self_identity(&self) -> Result<Identity, ProbeError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ProbeError::MissingCredential("BOT_TOKEN"))?;

        let response: GetMeResponse = self
            .client
            .get(self.endpoint(token)?)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(ProbeError::Rejected(
                response.description.unwrap_or_else(|| "getMe failed".to_string()),
            ));
        }

        let user = response.result.ok_or(ProbeError::EmptyIdentity)?;
        Ok(Identity {
            id: user.id,
            username: user.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_ME_OK: &str =
        r#"{"ok":true,"result":{"id":123,"is_bot":true,"username":"music_bot"}}"#;
    const GET_ME_UNAUTHORIZED: &str =
        r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;

    fn client(server: &mockito::ServerGuard, token: Option<&str>) -> BotApiClient {
        BotApiClient::new(
            Url::parse(&server.url()).unwrap(),
            token.map(str::to_string),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_me_returns_identity() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/bot123:abc/getMe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GET_ME_OK)
            .create_async()
            .await;

        let identity = client(&server, Some("123:abc"))
            .get_self_identity()
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(identity.id, 123);
        assert_eq!(identity.username.as_deref(), Some("music_bot"));
        assert!(!identity.is_empty());
    }

    #[tokio::test]
    async fn test_get_me_rejected_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/bot123:bad/getMe")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(GET_ME_UNAUTHORIZED)
            .create_async()
            .await;

        let err = client(&server, Some("123:bad"))
            .get_self_identity()
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Rejected(ref msg) if msg == "Unauthorized"));
    }

    #[tokio::test]
    async fn test_missing_token_skips_request() {
        let server = mockito::Server::new_async().await;
        let err = client(&server, Some(""))
            .get_self_identity()
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::MissingCredential("BOT_TOKEN")));
    }
}
