//! Shared layout constants for page components
//!
//! These constants are used by multiple pages and define consistent
//! sizing for common page elements like headers, text rows, and buttons.

/// Standard page header height in pixels
pub const PAGE_HEADER_HEIGHT_PX: u32 = 40;

/// Standard button height in pixels
pub const BUTTON_HEIGHT_PX: u32 = 40;

/// Standard text row height for small/medium font in pixels
pub const TEXT_ROW_HEIGHT_PX: u32 = 20;

/// Page title row height in pixels (large font)
pub const TITLE_ROW_HEIGHT_PX: u32 = 30;

/// Horizontal margin between page edge and content in pixels
pub const PAGE_MARGIN_PX: u32 = 20;

/// Gap between the last content row and a bottom button in pixels
pub const BUTTON_GAP_PX: u32 = 15;
