/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Opportunities color:
/// \>0 → green
/// 0 → grey
pub fn color_for_opportunities(value: u64) -> &'static str {
    if value > 0 { GREEN } else { GREY }
}

/// Pending-buffer color: yellow while something still waits for a sync.
pub fn color_for_pending(pending: usize) -> &'static str {
    if pending > 0 { YELLOW } else { GREY }
}
