pub mod constants;
pub mod error;
pub mod shared_wheel_game;
pub mod validation;
pub mod prize_selection;
pub mod wheel_angle;
pub mod play_history;
pub mod settle_gate;
pub mod spin_machine;
pub mod game_api;
pub mod wheel_session;
pub mod confetti;

pub use error::WheelError;
