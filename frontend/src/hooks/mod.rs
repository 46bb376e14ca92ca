pub mod use_game_config;

pub use use_game_config::{use_game_config, ConfigState};
