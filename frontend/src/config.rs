use shared::wheel_session::PlayMode;
use web_sys::window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// The prize list compiled into the widget.
    Static,
    /// Fetched from the game API on load.
    Remote,
}

pub fn get_api_base_url() -> String {
    // Build-time override, e.g. WHEEL_API_DOMAIN=https://promo.example.vn
    if let Some(domain) = option_env!("WHEEL_API_DOMAIN") {
        if !domain.is_empty() {
            return domain.trim_end_matches('/').to_string();
        }
    }

    // Same origin as the page hosting the widget
    if let Some(window) = window() {
        if let Ok(origin) = window.location().origin() {
            if origin.starts_with("http") {
                return origin;
            }
        }
    }

    "http://127.0.0.1:3000".to_string()
}

pub fn config_source() -> ConfigSource {
    match option_env!("WHEEL_CONFIG_SOURCE") {
        Some("remote") => ConfigSource::Remote,
        _ => ConfigSource::Static,
    }
}

pub fn play_mode() -> PlayMode {
    match option_env!("WHEEL_PLAY_MODE") {
        Some("remote") => PlayMode::Remote { confirm: false },
        Some("remote-confirm") => PlayMode::Remote { confirm: true },
        Some("local") | None => PlayMode::Local,
        Some(other) => {
            log::warn!("Unknown WHEEL_PLAY_MODE '{}', playing locally", other);
            PlayMode::Local
        }
    }
}
