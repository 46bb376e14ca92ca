pub const CONTAINER: &str = "min-h-screen bg-gradient-to-b from-indigo-900 via-purple-900 to-gray-900 w-full px-4 sm:px-6 lg:px-8";
pub const CONTAINER_SM: &str = "max-w-md mx-auto px-4 sm:px-6 py-8";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const CARD_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-blue-600";
pub const INPUT_ERROR: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-red-500 focus:ring-2 focus:ring-inset focus:ring-red-500 sm:text-sm";
pub const FORM: &str = "mt-4 space-y-4";
pub const TEXT_H1: &str = "text-4xl font-black text-transparent bg-clip-text bg-gradient-to-r from-yellow-300 to-pink-400 text-center";
pub const TEXT_H3: &str = "text-xl font-bold text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-200 text-center mt-2";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const TEXT_GREETING: &str = "text-lg text-white text-center";
pub const LOADING_SPINNER: &str = "animate-spin h-5 w-5 text-blue-600 dark:text-blue-400";
pub const AUTH_BUTTON: &str = "w-full py-3 px-4 text-sm font-semibold text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 rounded-lg transition-all duration-200 transform hover:translate-y-[-1px] hover:shadow-lg disabled:opacity-50 disabled:cursor-not-allowed";

// Wheel
pub const WHEEL_WRAPPER: &str = "relative mx-auto my-8 w-80 h-80 sm:w-96 sm:h-96";
pub const WHEEL_DISC: &str = "absolute inset-0 rounded-full border-8 border-yellow-400 shadow-[0_0_40px_rgba(255,215,0,0.35)] overflow-hidden";
pub const WHEEL_LABEL: &str = "absolute left-1/2 top-1/2 w-28 -ml-14 text-center text-xs sm:text-sm font-bold leading-tight pointer-events-none";
pub const WHEEL_POINTER: &str = "absolute left-1/2 -top-3 -translate-x-1/2 z-10 w-0 h-0 border-l-[14px] border-r-[14px] border-t-[28px] border-l-transparent border-r-transparent border-t-red-500 drop-shadow";
pub const WHEEL_HUB: &str = "absolute left-1/2 top-1/2 w-16 h-16 -ml-8 -mt-8 z-10 flex items-center justify-center rounded-full bg-blue-900 border-4 border-yellow-400 shadow-lg text-white font-bold cursor-pointer disabled:cursor-not-allowed disabled:opacity-80";
pub const SPIN_BUTTON: &str = "block mx-auto px-10 py-4 text-lg font-black tracking-wide text-white bg-gradient-to-r from-pink-500 to-orange-400 rounded-full shadow-lg hover:shadow-xl transform hover:scale-105 transition-all duration-300 animate-pulse-subtle disabled:opacity-60 disabled:hover:scale-100 disabled:cursor-not-allowed";

// Notification
pub const MODAL_BACKDROP: &str = "fixed inset-0 z-40 flex items-center justify-center bg-black/60 backdrop-blur-sm";
pub const MODAL_CARD: &str = "relative z-50 max-w-sm w-full mx-4 rounded-2xl bg-white dark:bg-gray-900 p-8 text-center shadow-2xl";
pub const MODAL_PRIZE: &str = "mt-4 text-2xl font-black text-transparent bg-clip-text bg-gradient-to-r from-orange-400 to-pink-500";
pub const CONFETTI_CANVAS: &str = "fixed inset-0 z-50 pointer-events-none";
