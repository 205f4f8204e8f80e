#[allow(clippy::module_inception)]
mod consts {
	include!(concat!(env!("OUT_DIR"), "/consts.rs"));
}
pub use consts::*;

/// Side length of the square digit sampling window
pub const DIGIT_WINDOW_SIZE: u32 = MIN_CELL_WIDTH - DIGIT_WINDOW_START;

const _: () = assert!(DIGIT_WINDOW_START < MIN_CELL_WIDTH, "digit window is empty");
const _: () = assert!(BEVEL_SAMPLE_INSET < MIN_CELL_WIDTH, "bevel sample falls outside of the cell");
const _: () = assert!(MIN_CELL_WIDTH > 0, "segmentation would never advance");
