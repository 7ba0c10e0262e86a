use eframe::egui::Color32;

pub const ERROR_TEXT: Color32 = Color32::from_rgb(220, 96, 96);
pub const SUCCESS_FILL: Color32 = Color32::from_rgb(42, 92, 58);
pub const SUCCESS_STROKE: Color32 = Color32::from_rgb(92, 160, 110);
pub const FAILURE_FILL: Color32 = Color32::from_rgb(111, 53, 53);
pub const FAILURE_STROKE: Color32 = Color32::from_rgb(175, 96, 96);
