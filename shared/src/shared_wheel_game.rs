use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::constants::BETTER_LUCK_PRIZE_NAME;
use crate::error::WheelError;

/// Prize identifier as it appears on the wire: a number or a string.
/// The original form is kept for serialization, while equality and hashing
/// use the trimmed text so that `3 == "3"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrizeId {
    Int(i64),
    Text(String),
}

impl PrizeId {
    /// Normalised text used for comparisons.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            PrizeId::Int(n) => Cow::Owned(n.to_string()),
            PrizeId::Text(s) => Cow::Borrowed(s.trim()),
        }
    }
}

impl PartialEq for PrizeId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PrizeId::Int(a), PrizeId::Int(b)) => a == b,
            _ => self.key() == other.key(),
        }
    }
}

impl Eq for PrizeId {}

impl Hash for PrizeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for PrizeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<i64> for PrizeId {
    fn from(id: i64) -> Self {
        PrizeId::Int(id)
    }
}

impl From<&str> for PrizeId {
    fn from(id: &str) -> Self {
        PrizeId::Text(id.to_string())
    }
}

impl From<String> for PrizeId {
    fn from(id: String) -> Self {
        PrizeId::Text(id)
    }
}

fn default_weight() -> f64 {
    1.0
}

fn default_segment_color() -> String {
    "#E5E7EB".to_string()
}

/// One segment of the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    pub id: PrizeId,
    pub name: String,
    #[serde(default = "default_weight", alias = "probability")]
    pub weight: f64,
    #[serde(default = "default_segment_color")]
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_left: Option<u32>,
    #[serde(default)]
    pub consolation: bool,
}

impl Prize {
    pub fn new(id: impl Into<PrizeId>, name: &str, weight: f64, background_color: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            weight,
            background_color: background_color.to_string(),
            text_color: None,
            quantity_left: None,
            consolation: false,
        }
    }

    pub fn with_text_color(mut self, color: &str) -> Self {
        self.text_color = Some(color.to_string());
        self
    }

    pub fn consolation(mut self) -> Self {
        self.consolation = true;
        self
    }

    pub fn is_sold_out(&self) -> bool {
        self.quantity_left == Some(0)
    }

    /// Weight used by the draw: sold-out prizes and malformed weights count as zero.
    pub fn effective_weight(&self) -> f64 {
        if self.is_sold_out() || !self.weight.is_finite() || self.weight <= 0.0 {
            0.0
        } else {
            self.weight
        }
    }

    pub fn is_winning(&self) -> bool {
        !self.consolation && self.name != BETTER_LUCK_PRIZE_NAME
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub max_plays_per_day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_plays_total: Option<u32>,
    pub prizes: Vec<Prize>,
}

impl GameConfig {
    /// Checks the invariants the draw and the angle math rely on.
    pub fn validate(&self) -> Result<(), WheelError> {
        if self.prizes.is_empty() {
            return Err(WheelError::ConfigLoad("prize list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for prize in &self.prizes {
            if !prize.weight.is_finite() || prize.weight < 0.0 {
                return Err(WheelError::ConfigLoad(format!(
                    "prize {} has invalid weight {}",
                    prize.id, prize.weight
                )));
            }
            if !seen.insert(prize.id.clone()) {
                return Err(WheelError::ConfigLoad(format!("duplicate prize id {}", prize.id)));
            }
        }
        Ok(())
    }

    pub fn prize_index(&self, id: &PrizeId) -> Option<usize> {
        self.prizes.iter().position(|prize| &prize.id == id)
    }

    pub fn segment_count(&self) -> usize {
        self.prizes.len()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Vòng Quay May Mắn".to_string(),
            description: "Quay là trúng - Nhận quà liền tay!".to_string(),
            max_plays_per_day: 3,
            max_plays_total: None,
            prizes: vec![
                Prize::new(1, "Voucher 50K", 12.0, "#FF6B6B").with_text_color("#FFFFFF"),
                Prize::new(2, BETTER_LUCK_PRIZE_NAME, 30.0, "#F3F4F6")
                    .with_text_color("#374151")
                    .consolation(),
                Prize::new(3, "Voucher 100K", 6.0, "#4ECDC4").with_text_color("#FFFFFF"),
                Prize::new(4, "Móc khóa", 15.0, "#FFD93D").with_text_color("#1F2937"),
                Prize::new(5, "Giảm 10%", 20.0, "#7B68EE").with_text_color("#FFFFFF"),
                Prize::new(6, "Ly giữ nhiệt", 10.0, "#FF9A76").with_text_color("#FFFFFF"),
                Prize::new(7, "Tai nghe Bluetooth", 2.0, "#1E3A8A").with_text_color("#FFFFFF"),
                Prize::new(8, "Sổ tay", 5.0, "#34D399").with_text_color("#1F2937"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_plays: Option<u32>,
}

impl Player {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            session_id: None,
            remaining_plays: None,
        }
    }
}

/// One charged spin. Timestamp is milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub prize_id: PrizeId,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayHistory {
    pub player: Player,
    #[serde(default)]
    pub spins: Vec<SpinResult>,
}

// Constants for frontend animation
pub const SPIN_DURATION_MS: u32 = 3000;
pub const SETTLE_FALLBACK_MS: u32 = 3500;
pub const ROTATION_RESET_DELAY_MS: u32 = 50;
pub const SPIN_EASING: &str = "cubic-bezier(0.25, 0.8, 0.25, 1)";
pub const MIN_EXTRA_ROTATIONS: u32 = 2;
pub const MAX_EXTRA_ROTATIONS: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_id_accepts_numbers_and_strings() {
        let from_number: PrizeId = serde_json::from_str("3").unwrap();
        let from_text: PrizeId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "\"3\"");
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "3");

        let slug: PrizeId = serde_json::from_str("\"voucher-50k\"").unwrap();
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"voucher-50k\"");
    }

    #[test]
    fn test_numeric_looking_text_ids_keep_their_form() {
        for text in ["007", "+5", "-0"] {
            let id: PrizeId = serde_json::from_str(&format!("\"{}\"", text)).unwrap();
            assert_eq!(id, PrizeId::from(text));
            assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", text));
        }
        assert_ne!(PrizeId::from("007"), PrizeId::from(7));

        let ids: HashSet<PrizeId> = [PrizeId::from(3), PrizeId::from(" 3 ")].into_iter().collect();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_prize_reads_probability_alias_and_defaults() {
        let prize: Prize = serde_json::from_str(
            r##"{"id": 1, "name": "Voucher", "probability": 0.25, "backgroundColor": "#fff"}"##,
        )
        .unwrap();
        assert_eq!(prize.weight, 0.25);
        assert!(prize.text_color.is_none());

        let bare: Prize = serde_json::from_str(r#"{"id": "x", "name": "Sổ tay"}"#).unwrap();
        assert_eq!(bare.weight, 1.0);
        assert!(!bare.background_color.is_empty());
    }

    #[test]
    fn test_effective_weight() {
        let mut prize = Prize::new(1, "Voucher", 4.0, "#fff");
        assert_eq!(prize.effective_weight(), 4.0);
        prize.quantity_left = Some(0);
        assert_eq!(prize.effective_weight(), 0.0);
        prize.quantity_left = Some(2);
        prize.weight = f64::NAN;
        assert_eq!(prize.effective_weight(), 0.0);
    }

    #[test]
    fn test_is_winning() {
        assert!(Prize::new(1, "Voucher", 1.0, "#fff").is_winning());
        assert!(!Prize::new(2, BETTER_LUCK_PRIZE_NAME, 1.0, "#fff").is_winning());
        assert!(!Prize::new(3, "Thêm lượt", 1.0, "#fff").consolation().is_winning());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.segment_count(), 8);
        assert_eq!(config.prize_index(&PrizeId::from(3)), Some(2));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let mut config = GameConfig::default();
        config.prizes.clear();
        assert!(matches!(config.validate(), Err(WheelError::ConfigLoad(_))));

        let mut config = GameConfig::default();
        config.prizes[1].id = PrizeId::from(1);
        assert!(matches!(config.validate(), Err(WheelError::ConfigLoad(_))));

        let mut config = GameConfig::default();
        config.prizes[0].weight = -1.0;
        assert!(matches!(config.validate(), Err(WheelError::ConfigLoad(_))));
    }

    #[test]
    fn test_config_parses_remote_shape() {
        let json = r##"{
            "title": "Lucky",
            "description": "Spin",
            "maxPlaysPerDay": 2,
            "prizes": [
                {"id": 1, "name": "A", "weight": 1, "backgroundColor": "#111", "textColor": "#fff"},
                {"id": 2, "name": "B", "weight": 0, "backgroundColor": "#222", "quantityLeft": 5}
            ]
        }"##;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_plays_per_day, 2);
        assert_eq!(config.max_plays_total, None);
        assert_eq!(config.prizes[1].quantity_left, Some(5));
        assert!(config.validate().is_ok());
    }
}
