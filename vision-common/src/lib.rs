//! Data model, tunables and seams shared by the board recognition pipeline.

#[macro_use]
extern crate lazy_static;

pub use msv_util::*;

pub mod prelude {
	pub use crate::{
		board::{Board, BoardCapability, BoardView, Boundaries, CellState, CellValue},
		cancel::Cancellation,
		capture::{Bitmap, Capture},
		error::{Axis, Edge, VisionError},
		palette::PixelClass,
	};

	pub use msv_util::*;
}

pub mod board;
pub mod cancel;
pub mod capture;
pub mod consts;
pub mod error;
pub mod masks;
pub mod palette;

#[cfg(any(test, feature = "synth"))]
pub mod synth;
