/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Completion percentage color:
/// \>=80 → green
/// \>=50 → yellow
/// otherwise red
pub fn color_for_percentage(value: i64) -> &'static str {
    if value >= 80 {
        GREEN
    } else if value >= 50 {
        YELLOW
    } else {
        RED
    }
}

/// Punctuality delta color: early or exact is green, up to 15 minutes
/// late is yellow, later than that red.
pub fn color_for_delta(mins: Option<i64>) -> &'static str {
    match mins {
        None => GREY,
        Some(m) if m <= 0 => GREEN,
        Some(m) if m <= 15 => YELLOW,
        Some(_) => RED,
    }
}

pub fn paint(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}
