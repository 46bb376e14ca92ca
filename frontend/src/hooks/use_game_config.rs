use std::rc::Rc;

use shared::shared_wheel_game::GameConfig;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::GameClient;
use crate::config::{config_source, ConfigSource};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigState {
    Loading,
    Ready(Rc<GameConfig>),
    Failed(String),
}

#[hook]
pub fn use_game_config() -> ConfigState {
    let state = use_state(|| match config_source() {
        ConfigSource::Static => ConfigState::Ready(Rc::new(GameConfig::default())),
        ConfigSource::Remote => ConfigState::Loading,
    });

    {
        let state = state.clone();

        use_effect_with((), move |_| {
            if config_source() == ConfigSource::Remote {
                spawn_local(async move {
                    match GameClient::from_env().fetch_config().await {
                        Ok(config) => {
                            log::info!("Loaded wheel config with {} prizes", config.segment_count());
                            state.set(ConfigState::Ready(Rc::new(config)));
                        }
                        Err(e) => {
                            log::error!("Failed to load wheel config: {}", e);
                            state.set(ConfigState::Failed(e.user_message()));
                        }
                    }
                });
            }
            || ()
        });
    }

    (*state).clone()
}
