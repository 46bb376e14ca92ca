pub const START_GAME_ENDPOINT: &str = "/api/v1/game/start";
pub const SPIN_ENDPOINT: &str = "/api/v1/game/spin";
pub const CONFIRM_ENDPOINT: &str = "/api/v1/game/confirm";
pub const CONFIG_ENDPOINT: &str = "/api/v1/game/config";

pub const API_STATUS_SUCCESS: &str = "success";

pub const PLAY_HISTORY_STORAGE_KEY: &str = "luckyWheelGame";

pub const NAME_REQUIRED_ERROR: &str = "Vui lòng nhập họ tên";
pub const PHONE_REQUIRED_ERROR: &str = "Vui lòng nhập số điện thoại";
pub const PHONE_FORMAT_ERROR: &str = "Số điện thoại phải có 10 chữ số";
pub const CONFIG_LOAD_ERROR: &str = "Không thể tải cấu hình trò chơi";
pub const SESSION_START_ERROR: &str = "Không thể bắt đầu trò chơi";
pub const SPIN_REQUEST_ERROR: &str = "Không thể quay lúc này, vui lòng thử lại";
pub const CONFIRM_ERROR: &str = "Không thể xác nhận phần thưởng, vui lòng thử lại";
pub const STORAGE_ERROR: &str = "Không thể lưu lịch sử quay";
pub const GENERIC_ERROR: &str = "Đã có lỗi xảy ra";
pub const NO_PLAYS_LEFT_ERROR: &str = "Bạn đã hết lượt quay hôm nay";
pub const ALREADY_SPINNING_ERROR: &str = "Vòng quay đang quay";
pub const NOT_REGISTERED_ERROR: &str = "Vui lòng đăng ký trước khi quay";

pub const BETTER_LUCK_PRIZE_NAME: &str = "Chúc may mắn lần sau";

pub const PHONE_DIGITS: usize = 10;

pub const SPIN_BUTTON_LABEL: &str = "QUAY NGAY";
pub const SPINNING_LABEL: &str = "Đang quay...";
pub const NO_PLAYS_LABEL: &str = "Hết lượt quay";
pub const REGISTER_BUTTON_LABEL: &str = "Bắt đầu chơi";
pub const WIN_TITLE: &str = "Chúc mừng!";
pub const WIN_CONTACT_MESSAGE: &str =
    "Chúng tôi sẽ liên hệ với bạn qua số điện thoại đã đăng ký để trao giải trong thời gian sớm nhất.";
pub const LOSE_TITLE: &str = "Tiếc quá!";
pub const LOSE_MESSAGE: &str = "Chúc bạn may mắn lần sau!";
pub const CLOSE_LABEL: &str = "Đóng";
