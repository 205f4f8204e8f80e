//! Deterministic screenshots of a board, drawn in the colors the classifiers expect.

use crate::{consts::*, masks::DIGIT_MASKS, prelude::*};
use msv_util::imageproc::{drawing::draw_filled_rect_mut, rect::Rect as DrawRect};

pub const WINDOW_BACKGROUND: image::Rgb<u8> = image::Rgb([120, 120, 120]);
pub const WINDOW_CHROME: image::Rgb<u8> = image::Rgb([30, 40, 90]);
pub const SEPARATOR: image::Rgb<u8> = image::Rgb([20, 20, 40]);
pub const REVEALED: image::Rgb<u8> = image::Rgb([190, 190, 200]);
pub const BEVEL: image::Rgb<u8> = image::Rgb([70, 110, 200]);
pub const FLAG: image::Rgb<u8> = image::Rgb([255, 0, 0]);
pub const DIGIT: image::Rgb<u8> = image::Rgb([40, 70, 190]);
pub const MINE: image::Rgb<u8> = image::Rgb([0, 0, 0]);

#[derive(Clone, Debug)]
pub struct SynthScreenshot {
	pub board: Board,
	/// Distance between two separator lines
	pub stride: u32,
	/// Top-left corner of the grid's outer frame
	pub origin: [u32; 2],
	/// Width of the dark window frame on the left of the bitmap
	pub chrome: u32,
}
impl SynthScreenshot {
	pub fn new(board: Board) -> Self {
		SynthScreenshot {
			board,
			stride: 20,
			origin: [40, 30],
			chrome: 8,
		}
	}

	#[inline]
	pub fn stride(mut self, stride: u32) -> Self {
		self.stride = stride;
		self
	}

	#[inline]
	pub fn chrome(mut self, chrome: u32) -> Self {
		self.chrome = chrome;
		self
	}

	pub fn grid_box(&self) -> Rect<u32> {
		let [left, top] = self.origin;
		Rect {
			left,
			top,
			right: left + self.board.columns() as u32 * self.stride,
			bottom: top + self.board.rows() as u32 * self.stride,
		}
	}

	pub fn boundaries(&self) -> Boundaries {
		let grid = self.grid_box();
		Boundaries {
			columns: (0..=self.board.columns() as u32).map(|i| grid.left + i * self.stride).collect(),
			rows: (0..=self.board.rows() as u32).map(|i| grid.top + i * self.stride).collect(),
		}
	}

	/// The grid is centered vertically so the midline always crosses it
	pub fn render(&self) -> Bitmap {
		let grid = self.grid_box();
		let (w, h) = (grid.right + self.origin[0] + 1, grid.bottom + self.origin[1] + 1);

		let mut image = Bitmap::from_pixel(w, h, WINDOW_BACKGROUND);
		if self.chrome > 0 {
			draw_filled_rect_mut(&mut image, DrawRect::at(0, 0).of_size(self.chrome, h), WINDOW_CHROME);
		}
		draw_filled_rect_mut(
			&mut image,
			DrawRect::at(grid.left as i32, grid.top as i32).of_size(grid.width() + 1, grid.height() + 1),
			SEPARATOR,
		);

		let boundaries = self.boundaries();
		for (column, row, value) in self.board.iter() {
			if let Some(cell) = boundaries.cell(column, row) {
				paint_cell(&mut image, cell, value);
			}
		}

		image
	}
}

/// Paints the inside of `cell`, whose edges are the separator lines around it
pub fn paint_cell(image: &mut Bitmap, cell: Rect<u32>, value: CellValue) {
	let (left, top) = (cell.left as i32, cell.top as i32);
	let fill = |image: &mut Bitmap, x: i32, y: i32, w: u32, h: u32, color: image::Rgb<u8>| {
		draw_filled_rect_mut(image, DrawRect::at(left + x, top + y).of_size(w, h), color);
	};

	let (w, h) = (cell.width() - 1, cell.height() - 1);
	match value.state {
		CellState::Hidden | CellState::Flagged => fill(image, 1, 1, w, h, BEVEL),
		CellState::Visible | CellState::Bomb => fill(image, 1, 1, w, h, REVEALED),
	}

	match value.state {
		CellState::Hidden => {}

		// Anything drawn past the minimum cell width must look the same on every line up to
		// the next separator, or segmentation sees a boundary there
		CellState::Flagged => {
			let x = (cell.left + cell.right) / 2;
			for y in (cell.top + 5)..=(cell.top + 13) {
				image.put_pixel(x, y, FLAG);
			}
		}

		CellState::Bomb => {
			fill(image, 4, 4, 13, 13, MINE);
			fill(image, 1, (cell.height() / 2) as i32, w, 1, MINE);
		}

		CellState::Visible => {
			if let Some(mask) = DIGIT_MASKS.iter().find(|mask| mask.digit == value.value) {
				paint_digit(image, cell, mask.bits());
			}
		}
	}
}

/// Draws a digit window, `true` pixels in the digit color
pub fn paint_digit(image: &mut Bitmap, cell: Rect<u32>, window: &crate::masks::DigitWindow) {
	for (y, line) in window.iter().enumerate() {
		for (x, dark) in line.iter().enumerate() {
			if *dark {
				image.put_pixel(
					cell.left + DIGIT_WINDOW_START + x as u32,
					cell.top + DIGIT_WINDOW_START + y as u32,
					DIGIT,
				);
			}
		}
	}
}
