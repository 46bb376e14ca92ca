use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::constants::{CONFIG_ENDPOINT, CONFIRM_ENDPOINT, SPIN_ENDPOINT, START_GAME_ENDPOINT};
use shared::error::WheelError;
use shared::game_api::{api_url, ApiResponse, ConfirmRequest, SpinRequest, SpinResponse, StartGameResponse};
use shared::shared_wheel_game::GameConfig;
use shared::validation::RegistrationRequest;

use crate::config::get_api_base_url;

type ErrorKind = fn(String) -> WheelError;

/// Client for the game-session API.
#[derive(Debug, Clone, PartialEq)]
pub struct GameClient {
    base_url: String,
}

impl GameClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(get_api_base_url())
    }

    pub async fn fetch_config(&self) -> Result<GameConfig, WheelError> {
        let url = api_url(&self.base_url, CONFIG_ENDPOINT);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| transport_error(WheelError::ConfigLoad, &url, e))?;

        let config = read_envelope::<GameConfig>(response, WheelError::ConfigLoad)
            .await?
            .into_result(WheelError::ConfigLoad)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn start_game(&self, request: &RegistrationRequest) -> Result<StartGameResponse, WheelError> {
        post(&api_url(&self.base_url, START_GAME_ENDPOINT), request, WheelError::SessionStart)
            .await?
            .into_result(WheelError::SessionStart)
    }

    pub async fn spin(&self, request: &SpinRequest) -> Result<SpinResponse, WheelError> {
        post(&api_url(&self.base_url, SPIN_ENDPOINT), request, WheelError::SpinRequest)
            .await?
            .into_result(WheelError::SpinRequest)
    }

    /// Returns the server's acknowledgement text, if it sent one.
    pub async fn confirm(&self, request: &ConfirmRequest) -> Result<Option<String>, WheelError> {
        post::<_, serde_json::Value>(&api_url(&self.base_url, CONFIRM_ENDPOINT), request, WheelError::Confirm)
            .await?
            .into_ack(WheelError::Confirm)
    }
}

async fn post<B: Serialize, T: DeserializeOwned>(
    url: &str,
    body: &B,
    kind: ErrorKind,
) -> Result<ApiResponse<T>, WheelError> {
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .map_err(|e| transport_error(kind, url, e))?
        .send()
        .await
        .map_err(|e| transport_error(kind, url, e))?;

    read_envelope(response, kind).await
}

async fn read_envelope<T: DeserializeOwned>(response: Response, kind: ErrorKind) -> Result<ApiResponse<T>, WheelError> {
    let status = response.status();
    let ok = response.ok();

    match response.json::<ApiResponse<T>>().await {
        Ok(envelope) if ok => Ok(envelope),
        Ok(envelope) => {
            log::error!("{} returned HTTP {}", response.url(), status);
            Err(kind(envelope.message.unwrap_or_else(|| format!("!HTTP {}", status))))
        }
        Err(e) => {
            log::error!("Unreadable response from {} (HTTP {}): {}", response.url(), status, e);
            Err(kind(format!("!HTTP {}: {}", status, e)))
        }
    }
}

fn transport_error(kind: ErrorKind, url: &str, e: gloo_net::Error) -> WheelError {
    log::error!("Request to {} failed: {}", url, e);
    kind(format!("!{}", e))
}
