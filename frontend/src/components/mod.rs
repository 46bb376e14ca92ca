pub mod confetti_canvas;
pub mod lucky_wheel;
pub mod prize_notification;
pub mod registration_form;

pub use confetti_canvas::ConfettiCanvas;
pub use lucky_wheel::{LuckyWheel, SpinTarget};
pub use prize_notification::PrizeNotification;
pub use registration_form::{Registration, RegistrationForm};
