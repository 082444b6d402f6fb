/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Cumulative time colour:
/// \>0 → reset
/// \<0 → red (end-sum smaller than start-sum)
/// 0 or unknown → grey
pub fn color_for_duration(secs: Option<i64>) -> &'static str {
    match secs {
        Some(s) if s > 0 => RESET,
        Some(s) if s < 0 => RED,
        _ => GREY,
    }
}

/// Grey out placeholder cells such as `--:--:--`.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim().starts_with("--") {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

static ANSI_RE: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}
