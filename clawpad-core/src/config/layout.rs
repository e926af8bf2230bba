//! Screen geometry
//!
//! The panel runs in inverted landscape: 320×240 logical pixels. The top
//! two thirds hold a 4×2 grid of 80×80 pose buttons, the bottom third the
//! two 160-wide claw toggles.

/// Logical display width in pixels
pub const SCREEN_WIDTH: u16 = 320;

/// Logical display height in pixels
pub const SCREEN_HEIGHT: u16 = 240;

/// Pose button grid
pub const GRID_COLUMNS: u16 = 4;
pub const GRID_ROWS: u16 = 2;
pub const CELL_SIZE: u16 = 80;

/// Border between a cell's outer and inner colour
pub const CELL_BORDER: u16 = 5;

/// Top edge of the claw toggle band
pub const TOGGLE_TOP: u16 = GRID_ROWS * CELL_SIZE;

/// Width of each toggle's touch zone
pub const TOGGLE_WIDTH: u16 = SCREEN_WIDTH / 2;

/// Painted toggle button, relative to its zone's left edge
pub const TOGGLE_INSET: u16 = 5;
pub const TOGGLE_BUTTON_WIDTH: u16 = 150;
pub const TOGGLE_BUTTON_HEIGHT: u16 = 70;

/// Highlight panel inside a toggle button
pub const TOGGLE_PANEL_INSET: u16 = 10;
pub const TOGGLE_PANEL_WIDTH: u16 = 140;
pub const TOGGLE_PANEL_HEIGHT: u16 = 60;

/// Scale of all on-screen labels
pub const LABEL_SCALE: u16 = 3;

/// Gap between glyphs
pub const CHAR_SPACING: u16 = 1;

/// Gap between text lines
pub const LINE_SPACING: u16 = 1;

/// Status readout geometry (128×64 OLED, 8 px font)
pub const READOUT_WIDTH: u8 = 128;
pub const READOUT_GLYPH_WIDTH: u8 = 8;
pub const READOUT_TITLE_ROW: u8 = 20;
pub const READOUT_DETAIL_ROW: u8 = 30;
