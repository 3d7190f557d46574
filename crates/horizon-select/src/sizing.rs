//! Width of the search field in multiple mode.
//!
//! In multiple mode the text field shares a wrapping row with the committed
//! chips. It gets whatever width the chips leave, but never less than the
//! typed text needs.

/// Horizontal padding reserved inside the chip row.
pub const INPUT_PADDING: f32 = 12.0;

/// Width budget per typed character.
pub const WIDTH_PER_CHAR: f32 = 10.0;

/// Width used when nothing is left over.
pub const MIN_INPUT_WIDTH: f32 = 10.0;

/// Compute the maximum width of the search field.
///
/// The result is always positive.
pub fn input_max_width(container_width: f32, chip_widths: &[f32], text_len: usize) -> f32 {
    let used: f32 = chip_widths.iter().sum();
    let available = container_width - used - INPUT_PADDING;
    let width = available.max(text_len as f32 * WIDTH_PER_CHAR);

    if width > 0.0 { width } else { MIN_INPUT_WIDTH }
}
