use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Local, TimeZone};

use crate::constants::PLAY_HISTORY_STORAGE_KEY;
use crate::error::WheelError;
use crate::shared_wheel_game::{GameConfig, PlayHistory, Player, SpinResult};

/// String key-value storage with the same contract as the browser's `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, WheelError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), WheelError>;
}

/// In-process store used by tests and when browser storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, WheelError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WheelError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, WheelError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WheelError> {
        (**self).set_item(key, value)
    }
}

/// The single persisted play record. Every append rewrites the whole blob,
/// so two tabs racing on it lose one of the writes.
pub struct PlayHistoryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PlayHistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PLAY_HISTORY_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the record. A missing, unreadable or corrupt record counts as no history.
    pub fn load(&self) -> Option<PlayHistory> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read play history: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<PlayHistory>(&raw) {
            Ok(history) => Some(history),
            Err(e) => {
                log::warn!("Ignoring corrupt play history under '{}': {}", self.key, e);
                None
            }
        }
    }

    pub fn save_play_history(&self, player: &Player, spin: SpinResult) -> Result<(), WheelError> {
        let mut spins = self.load().map(|history| history.spins).unwrap_or_default();
        spins.push(spin);

        let history = PlayHistory {
            player: player.clone(),
            spins,
        };
        let encoded = serde_json::to_string(&history)
            .map_err(|e| WheelError::Storage(format!("encode failed: {}", e)))?;
        self.store.set_item(&self.key, &encoded)
    }

    pub fn get_stored_player(&self) -> Option<Player> {
        self.load().map(|history| history.player)
    }

    /// Spins whose timestamp falls on the same calendar day as `now`, in `now`'s time zone.
    pub fn plays_on_day_of<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> u32 {
        let Some(history) = self.load() else {
            return 0;
        };
        let today = now.date_naive();
        let zone = now.timezone();

        history
            .spins
            .iter()
            .filter_map(|spin| zone.timestamp_millis_opt(spin.timestamp).single())
            .filter(|played_at| played_at.date_naive() == today)
            .count() as u32
    }

    pub fn total_plays(&self) -> u32 {
        self.load().map(|history| history.spins.len() as u32).unwrap_or(0)
    }

    pub fn remaining_plays_at<Tz: TimeZone>(&self, max_plays_per_day: u32, now: &DateTime<Tz>) -> u32 {
        max_plays_per_day.saturating_sub(self.plays_on_day_of(now))
    }

    pub fn get_remaining_plays(&self, max_plays_per_day: u32) -> u32 {
        self.remaining_plays_at(max_plays_per_day, &Local::now())
    }

    /// Daily allowance, further capped by the lifetime allowance when one is configured.
    pub fn remaining_for<Tz: TimeZone>(&self, config: &GameConfig, now: &DateTime<Tz>) -> u32 {
        let today = self.remaining_plays_at(config.max_plays_per_day, now);
        match config.max_plays_total {
            Some(total) => today.min(total.saturating_sub(self.total_plays())),
            None => today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_wheel_game::PrizeId;
    use chrono::{Duration, FixedOffset};

    fn player() -> Player {
        Player::new("An", "0912345678")
    }

    fn spin_at(timestamp: i64) -> SpinResult {
        SpinResult {
            prize_id: PrizeId::from(1),
            timestamp,
        }
    }

    #[test]
    fn test_remaining_plays_follow_the_calendar_day() {
        let history = PlayHistoryStore::new(MemoryStore::new());
        assert_eq!(history.get_remaining_plays(3), 3);

        let now = Local::now();
        history.save_play_history(&player(), spin_at(now.timestamp_millis())).unwrap();
        assert_eq!(history.get_remaining_plays(3), 2);

        let yesterday = PlayHistoryStore::new(MemoryStore::new());
        let then = now - Duration::days(1);
        yesterday.save_play_history(&player(), spin_at(then.timestamp_millis())).unwrap();
        assert_eq!(yesterday.get_remaining_plays(3), 3);
    }

    #[test]
    fn test_day_boundary_is_local_midnight() {
        let zone = FixedOffset::east_opt(7 * 3600).unwrap();
        let history = PlayHistoryStore::new(MemoryStore::new());

        let late = zone.with_ymd_and_hms(2024, 5, 1, 23, 59, 0).unwrap();
        history.save_play_history(&player(), spin_at(late.timestamp_millis())).unwrap();

        let same_evening = zone.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap();
        let next_morning = zone.with_ymd_and_hms(2024, 5, 2, 0, 0, 1).unwrap();
        assert_eq!(history.remaining_plays_at(3, &same_evening), 2);
        assert_eq!(history.remaining_plays_at(3, &next_morning), 3);
    }

    #[test]
    fn test_remaining_never_goes_negative() {
        let history = PlayHistoryStore::new(MemoryStore::new());
        let now = Local::now();
        for _ in 0..5 {
            history.save_play_history(&player(), spin_at(now.timestamp_millis())).unwrap();
        }
        assert_eq!(history.get_remaining_plays(3), 0);
    }

    #[test]
    fn test_append_keeps_spins_and_replaces_player() {
        let history = PlayHistoryStore::new(MemoryStore::new());
        assert!(history.get_stored_player().is_none());

        history.save_play_history(&player(), spin_at(1)).unwrap();
        let renamed = Player::new("Bình", "0987654321");
        history.save_play_history(&renamed, spin_at(2)).unwrap();

        let stored = history.load().unwrap();
        assert_eq!(stored.player, renamed);
        assert_eq!(stored.spins, vec![spin_at(1), spin_at(2)]);
        assert_eq!(history.get_stored_player().unwrap().name, "Bình");
    }

    #[test]
    fn test_corrupt_record_is_treated_as_empty() {
        let store = MemoryStore::new();
        store.set_item(PLAY_HISTORY_STORAGE_KEY, "{not json").unwrap();
        let history = PlayHistoryStore::new(&store);
        assert!(history.load().is_none());
        assert_eq!(history.get_remaining_plays(2), 2);

        history.save_play_history(&player(), spin_at(5)).unwrap();
        assert_eq!(history.load().unwrap().spins.len(), 1);
    }

    #[test]
    fn test_record_uses_fixed_key_and_camel_case() {
        let store = MemoryStore::new();
        let history = PlayHistoryStore::new(&store);
        history.save_play_history(&player(), spin_at(1_700_000_000_000)).unwrap();

        let raw = store.get_item("luckyWheelGame").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["player"]["phone"], "0912345678");
        assert_eq!(json["spins"][0]["prizeId"], 1);
        assert_eq!(json["spins"][0]["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_total_cap() {
        let mut config = GameConfig::default();
        config.max_plays_per_day = 3;
        config.max_plays_total = Some(4);

        let history = PlayHistoryStore::new(MemoryStore::new());
        let now = Local::now();
        let earlier = (now - Duration::days(3)).timestamp_millis();
        for _ in 0..3 {
            history.save_play_history(&player(), spin_at(earlier)).unwrap();
        }
        assert_eq!(history.remaining_for(&config, &now), 1);

        config.max_plays_total = None;
        assert_eq!(history.remaining_for(&config, &now), 3);
    }
}
