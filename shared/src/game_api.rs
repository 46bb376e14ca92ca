use serde::{Deserialize, Serialize};

use crate::constants::API_STATUS_SUCCESS;
use crate::error::WheelError;
use crate::shared_wheel_game::{Prize, PrizeId};

// === API Types ===

/// Envelope shared by every game endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status == API_STATUS_SUCCESS
    }

    /// Unwraps `data`, mapping a failed status or a missing payload to `kind`.
    pub fn into_result(self, kind: fn(String) -> WheelError) -> Result<T, WheelError> {
        if !self.is_success() {
            return Err(kind(self.message.unwrap_or_default()));
        }
        self.data
            .ok_or_else(|| kind("!response has no data".to_string()))
    }

    /// For endpoints that only acknowledge. Returns the server message.
    pub fn into_ack(self, kind: fn(String) -> WheelError) -> Result<Option<String>, WheelError> {
        if self.is_success() {
            Ok(self.message)
        } else {
            Err(kind(self.message.unwrap_or_default()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub session_id: String,
    #[serde(rename = "maxPlaysPerDay", default, skip_serializing_if = "Option::is_none")]
    pub max_plays_per_day: Option<u32>,
    #[serde(rename = "playsToday", default, skip_serializing_if = "Option::is_none")]
    pub plays_today: Option<u32>,
    #[serde(rename = "remainingPlays")]
    pub remaining_plays: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPrize {
    pub id: PrizeId,
    pub name: String,
    #[serde(rename = "backgroundColor", default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl ServerPrize {
    /// Builds a wheel prize for a server prize the local config does not know.
    pub fn to_prize(&self) -> Prize {
        let mut prize = Prize::new(self.id.clone(), &self.name, 1.0, "");
        match &self.background_color {
            Some(color) => prize.background_color = color.clone(),
            None => prize.background_color = "#E5E7EB".to_string(),
        }
        prize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResponse {
    pub angle: f64,
    pub index: usize,
    pub prize: ServerPrize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub session_id: String,
    pub prize_id: PrizeId,
    pub prize_name: String,
    pub prize_index: usize,
    pub angle: f64,
}

pub fn api_url(base: &str, endpoint: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), endpoint)
}
