//! The chart color palette.

/// The fixed 12-color cycle used for chart series.
pub const PALETTE: [&str; 12] = [
    "#1db954", "#ff6b6b", "#4ecdc4", "#45b7d1", "#f9ca24", "#f0932b", "#eb4d4b", "#6c5ce7",
    "#a29bfe", "#fd79a8", "#00b894", "#00cec9",
];

/// The color for the series at `index` in the caller's selection, cycling
/// once the palette runs out. Purely positional: the same selection always
/// gets the same colors.
#[must_use]
pub const fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
