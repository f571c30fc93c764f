//! Icons and glyph constants used throughout the UI.

// Spinner animation frames (braille characters)
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// Pull request row
pub const PULL_REQUEST: &str = "";
pub const INDICATOR_CHECK: &str = "✓";
pub const INDICATOR_X: &str = "✗";
pub const INDICATOR_TROPHY: &str = "🏆";
pub const INDICATOR_EYE: &str = "👁";
pub const INDICATOR_CODE: &str = "</>";

// Issue cards
pub const ISSUE_OPEN: &str = "◉";
pub const PACKAGE: &str = "📦";

// Selection/Navigation indicators
pub const SELECTOR: &str = "▶ ";

// Cursor
pub const CURSOR: &str = "█";

// Language share bars
pub const BAR_FILLED: &str = "█";
pub const BAR_EMPTY: &str = "░";

// List/UI elements
pub const BULLET: &str = "•";
pub const SEPARATOR_CHAR: &str = "─";
pub const LINK: &str = "↗";
