use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 94, g: 186, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 196, b: 0 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const STATUS_OK: Color = Color::Green;
pub const STATUS_THROTTLED: Color = Color::Red;
pub const STATUS_CLIENT_ERR: Color = Color::Yellow;
pub const STATUS_SERVER_ERR: Color = Color::Magenta;
