//! Reference pixel masks for the digits 1 to 8.
//!
//! Each mask covers the digit window of a cell, i.e. offsets
//! `DIGIT_WINDOW_START..MIN_CELL_WIDTH` from the cell's top-left separator in
//! both axes. `#` is a dark (non-light) pixel, `.` a light one.

use crate::consts::*;

pub const MASK_SIZE: usize = DIGIT_WINDOW_SIZE as usize;

/// A sampled digit window, `[y][x]`, `true` where the pixel is not light
pub type DigitWindow = [[bool; MASK_SIZE]; MASK_SIZE];

const _: () = assert!(MASK_SIZE == 15, "digit mask art is drawn for a 15x15 window");

#[rustfmt::skip]
const DIGIT_ART: [[&str; MASK_SIZE]; 8] = [
	[
		"...............",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....#######....",
		"....#######....",
		".........##....",
		".........##....",
		".........##....",
		"....#######....",
		"....#######....",
		"....##.........",
		"....##.........",
		"....##.........",
		"....#######....",
		"....#######....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....#######....",
		"....#######....",
		".........##....",
		".........##....",
		".........##....",
		"....#######....",
		"....#######....",
		".........##....",
		".........##....",
		".........##....",
		"....#######....",
		"....#######....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....##...##....",
		"....##...##....",
		"....##...##....",
		"....##...##....",
		"....##...##....",
		"....#######....",
		"....#######....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....#######....",
		"....#######....",
		"....##.........",
		"....##.........",
		"....##.........",
		"....#######....",
		"....#######....",
		".........##....",
		".........##....",
		".........##....",
		"....#######....",
		"....#######....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....#######....",
		"....#######....",
		"....##.........",
		"....##.........",
		"....##.........",
		"....#######....",
		"....#######....",
		"....##...##....",
		"....##...##....",
		"....##...##....",
		"....#######....",
		"....#######....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....#######....",
		"....#######....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		".........##....",
		"...............",
		"...............",
	],
	[
		"...............",
		"....#######....",
		"....#######....",
		"....##...##....",
		"....##...##....",
		"....##...##....",
		"....#######....",
		"....#######....",
		"....##...##....",
		"....##...##....",
		"....##...##....",
		"....#######....",
		"....#######....",
		"...............",
		"...............",
	],
];

#[derive(Clone, Debug)]
pub struct DigitMask {
	pub digit: u8,
	bits: DigitWindow,
}
impl DigitMask {
	fn from_art(digit: u8, art: &[&str; MASK_SIZE]) -> Self {
		let mut bits = [[false; MASK_SIZE]; MASK_SIZE];
		for (y, line) in art.iter().enumerate() {
			assert_eq!(line.len(), MASK_SIZE, "digit {digit} mask row {y} has the wrong width");
			for (x, px) in line.bytes().enumerate() {
				bits[y][x] = px == b'#';
			}
		}
		DigitMask { digit, bits }
	}

	#[inline]
	pub fn bits(&self) -> &DigitWindow {
		&self.bits
	}

	pub fn dark_pixels(&self) -> u32 {
		self.bits.iter().flatten().filter(|px| **px).count() as u32
	}

	/// Number of pixels where `window` disagrees with this mask
	pub fn difference(&self, window: &DigitWindow) -> u32 {
		self.bits
			.iter()
			.flatten()
			.zip(window.iter().flatten())
			.filter(|(a, b)| a != b)
			.count() as u32
	}
}

lazy_static! {
	pub static ref DIGIT_MASKS: [DigitMask; 8] = {
		let mut digit = 0;
		DIGIT_ART.map(|art| {
			digit += 1;
			DigitMask::from_art(digit, &art)
		})
	};
}

#[test]
fn test_digit_masks() {
	for (i, mask) in DIGIT_MASKS.iter().enumerate() {
		assert_eq!(mask.digit as usize, i + 1);

		// a blank revealed cell must never match a digit
		assert!(mask.dark_pixels() >= DIGIT_MATCH_SENTINEL, "digit {} has only {} dark pixels", mask.digit, mask.dark_pixels());

		assert_eq!(mask.difference(mask.bits()), 0);
	}

	for a in DIGIT_MASKS.iter() {
		for b in DIGIT_MASKS.iter().filter(|b| b.digit != a.digit) {
			assert!(a.difference(b.bits()) > 0, "digits {} and {} are indistinguishable", a.digit, b.digit);
		}
	}
}

#[test]
fn test_mask_difference() {
	let blank = [[false; MASK_SIZE]; MASK_SIZE];
	let one = &DIGIT_MASKS[0];
	assert_eq!(one.difference(&blank), one.dark_pixels());
	assert!(one.bits()[1][9]);
	assert!(!one.bits()[0][0]);
}
