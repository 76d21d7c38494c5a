//! Theme constants for Test Media Generator.

use iced::Color;

/// Banner and accent colors.
pub mod colors {
    use super::Color;

    /// Drop zone border before a CSV is loaded
    pub const PRIMARY: Color = Color::from_rgb(0.24, 0.35, 0.50);

    /// Drop zone border after a successful load
    pub const SUCCESS: Color = Color::from_rgb(0.18, 0.55, 0.28);

    /// Success banner background
    pub const SUCCESS_BG: Color = Color::from_rgb(0.18, 0.35, 0.18);

    /// Error banner background
    pub const ERROR_BG: Color = Color::from_rgb(0.45, 0.18, 0.18);

    /// Text on banners
    pub const TEXT_ON_BANNER: Color = Color::from_rgb(0.93, 0.93, 0.93);

    /// Log panel text
    pub const TEXT_MUTED: Color = Color::from_rgb(0.45, 0.45, 0.45);
}

/// Spacing constants.
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: f32 = 4.0;
    /// Small spacing (8px)
    pub const SM: f32 = 8.0;
    /// Medium spacing (12px)
    pub const MD: f32 = 12.0;
    /// Large spacing (16px)
    pub const LG: f32 = 16.0;
    /// Extra large spacing (24px)
    pub const XL: f32 = 24.0;
}

/// Font sizes.
pub mod font {
    pub const SM: f32 = 11.0;
    pub const NORMAL: f32 = 13.0;
    pub const LG: f32 = 16.0;
}
