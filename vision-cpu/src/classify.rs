//! Reads the state and digit of a single cell.

use msv_vision_common::{
	consts::*,
	masks::{DigitWindow, DIGIT_MASKS, MASK_SIZE},
	prelude::*,
};

const OUTSIDE: image::Rgb<u8> = image::Rgb([0, 0, 0]);

/// Pixels outside of the bitmap read as black
#[inline]
fn pixel(bitmap: &Bitmap, x: u32, y: u32) -> image::Rgb<u8> {
	bitmap.checked_pixel(x, y).unwrap_or(OUTSIDE)
}

pub fn cell_state(bitmap: &Bitmap, cell: Rect<u32>) -> CellState {
	let [center_x, center_y] = cell.center();

	let bevel = pixel(
		bitmap,
		cell.right.saturating_sub(BEVEL_SAMPLE_INSET),
		cell.bottom.saturating_sub(BEVEL_SAMPLE_INSET),
	);
	if bevel.bevel_shade() > BEVEL_BLUE_RED_DIFF {
		let flagged = (cell.top..=cell.bottom).any(|y| pixel(bitmap, center_x, y).is_flag_marker());
		return if flagged { CellState::Flagged } else { CellState::Hidden };
	}

	let light = (cell.left..=cell.right).filter(|&x| pixel(bitmap, x, center_y).is_light()).count() as u32;
	if light < BOMB_LIGHT_PIXEL_MIN {
		return CellState::Bomb;
	}

	CellState::Visible
}

pub fn sample_digit_window(bitmap: &Bitmap, cell: Rect<u32>) -> DigitWindow {
	let mut window = [[false; MASK_SIZE]; MASK_SIZE];
	for (y, line) in window.iter_mut().enumerate() {
		for (x, dark) in line.iter_mut().enumerate() {
			let px = pixel(
				bitmap,
				cell.left.saturating_add(DIGIT_WINDOW_START + x as u32),
				cell.top.saturating_add(DIGIT_WINDOW_START + y as u32),
			);
			*dark = !px.is_light();
		}
	}
	window
}

/// The closest digit mask, or 0 if none is closer than `DIGIT_MATCH_SENTINEL` pixels.
///
/// Ties go to the smaller digit.
pub fn read_digit(window: &DigitWindow) -> u8 {
	let mut best = (0, DIGIT_MATCH_SENTINEL);
	for mask in DIGIT_MASKS.iter() {
		let difference = mask.difference(window);
		if difference < best.1 {
			best = (mask.digit, difference);
		}
	}
	best.0
}

pub fn classify(bitmap: &Bitmap, cell: Rect<u32>) -> CellValue {
	match cell_state(bitmap, cell) {
		CellState::Visible => CellValue::visible(read_digit(&sample_digit_window(bitmap, cell))),
		state => CellValue { state, value: 0 },
	}
}

#[cfg(test)]
use msv_vision_common::synth::{self, SynthScreenshot};

#[cfg(test)]
fn render_single(value: CellValue) -> (Bitmap, Rect<u32>) {
	let synth = SynthScreenshot::new(Board::from_fn(1, 1, |_, _| value));
	let cell = synth.boundaries().cell(0, 0).unwrap();
	(synth.render(), cell)
}

#[test]
fn test_classify_digits() {
	for value in 0..=8 {
		let (bitmap, cell) = render_single(CellValue::visible(value));
		assert_eq!(classify(&bitmap, cell), CellValue::visible(value));
	}
}

#[test]
fn test_classify_covered() {
	let (bitmap, cell) = render_single(CellValue::HIDDEN);
	assert_eq!(classify(&bitmap, cell), CellValue::HIDDEN);

	let (bitmap, cell) = render_single(CellValue::FLAGGED);
	assert_eq!(classify(&bitmap, cell), CellValue::FLAGGED);
}

#[test]
fn test_classify_bomb() {
	let (bitmap, cell) = render_single(CellValue::BOMB);
	assert_eq!(classify(&bitmap, cell), CellValue::BOMB);
}

#[test]
fn test_bomb_light_pixel_threshold() {
	let (mut bitmap, cell) = render_single(CellValue::visible(0));
	let [_, center_y] = cell.center();

	// darken the center row, then let exactly `n` pixels through
	for n in [BOMB_LIGHT_PIXEL_MIN - 1, BOMB_LIGHT_PIXEL_MIN] {
		for x in cell.left..=cell.right {
			bitmap.put_pixel(x, center_y, synth::MINE);
		}
		for x in (cell.left + 1)..(cell.left + 1 + n) {
			bitmap.put_pixel(x, center_y, synth::REVEALED);
		}

		let expected = if n < BOMB_LIGHT_PIXEL_MIN { CellState::Bomb } else { CellState::Visible };
		assert_eq!(cell_state(&bitmap, cell), expected, "{n} light pixels");
	}
}

#[test]
fn test_noisy_digit() {
	let (mut bitmap, cell) = render_single(CellValue::visible(0));

	// a 6 with a handful of pixels flipped either way is still a 6
	let mut window = *DIGIT_MASKS[5].bits();
	window[0][0] = true;
	window[14][14] = true;
	window[1][4] = false;
	window[12][10] = false;
	synth::paint_digit(&mut bitmap, cell, &window);

	assert_eq!(classify(&bitmap, cell), CellValue::visible(6));
}

#[test]
fn test_unrecognizable_digit() {
	let mut window = [[false; MASK_SIZE]; MASK_SIZE];
	for line in window.iter_mut().take(5) {
		*line = [true; MASK_SIZE];
	}
	assert_eq!(read_digit(&window), 0);
	assert_eq!(read_digit(&[[false; MASK_SIZE]; MASK_SIZE]), 0);
}

#[test]
fn test_cell_partly_outside_bitmap() {
	let (bitmap, _) = render_single(CellValue::visible(0));

	// black outside, so the digit window is all dark and the center row has no light pixels
	let cell = Rect::new(bitmap.width() - 5, bitmap.height() - 30, bitmap.width() + 15, bitmap.height() - 10);
	assert_eq!(cell_state(&bitmap, cell), CellState::Bomb);
	assert_eq!(read_digit(&sample_digit_window(&bitmap, cell)), 0);
}
