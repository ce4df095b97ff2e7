// File: crates/chart-core/src/types.rs
// Summary: Shared layout constants (logical surface size, margins) and the Insets type.

/// Logical surface width (viewbox units).
pub const WIDTH: u32 = 800;
/// Logical surface height (viewbox units).
pub const HEIGHT: u32 = 800;

/// Margin convention shared by every chart.
pub const MARGIN_TOP: u32 = 40;
pub const MARGIN_RIGHT: u32 = 28;
pub const MARGIN_BOTTOM: u32 = 48;
pub const MARGIN_LEFT: u32 = 64;

/// Screen margins, in logical units.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, MARGIN_BOTTOM)
    }
}
