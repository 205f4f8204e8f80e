//! Fixed color heuristics shared by every stage of the pipeline.

use crate::{consts::*, prelude::*};

pub trait PixelClass {
	/// Grid frame and separator lines
	fn is_dark(&self) -> bool;

	/// Revealed cell background and digit-free pixels
	fn is_light(&self) -> bool;

	fn is_flag_marker(&self) -> bool;

	/// Blue minus red, high on the raised bevel of a covered cell
	fn bevel_shade(&self) -> i16;
}
impl PixelClass for image::Rgb<u8> {
	#[inline]
	fn is_dark(&self) -> bool {
		let [r, g, b] = self.0;
		b < DARK_BLUE_MAX && g < DARK_GREEN_MAX && r < DARK_RED_MAX
	}

	#[inline]
	fn is_light(&self) -> bool {
		self.0.into_iter().all(|c| c > LIGHT_CHANNEL_MIN)
	}

	#[inline]
	fn is_flag_marker(&self) -> bool {
		let [r, g, _] = self.0;
		r > FLAG_RED_MIN && g < FLAG_GREEN_MAX
	}

	#[inline]
	fn bevel_shade(&self) -> i16 {
		self.0[2] as i16 - self.0[0] as i16
	}
}

#[test]
fn test_pixel_classes() {
	let px = |r: u8, g: u8, b: u8| msv_util::image::Rgb([r, g, b]);

	assert!(px(99, 99, 149).is_dark());
	assert!(!px(100, 0, 0).is_dark());
	assert!(!px(0, 0, 150).is_dark());

	assert!(px(151, 151, 151).is_light());
	assert!(!px(150, 255, 255).is_light());

	// neither
	let neutral = px(120, 120, 120);
	assert!(!neutral.is_dark() && !neutral.is_light());

	assert!(px(231, 49, 0).is_flag_marker());
	assert!(!px(230, 0, 0).is_flag_marker());

	assert_eq!(px(70, 0, 200).bevel_shade(), 130);
	assert_eq!(px(200, 0, 70).bevel_shade(), -130);
}
