pub trait CheckedPixel: image::GenericImageView {
	/// Like `get_pixel`, but `None` instead of a panic outside of the image
	fn checked_pixel(&self, x: u32, y: u32) -> Option<<Self as image::GenericImageView>::Pixel>;

	/// Signed coordinates, for scans that walk off the top or left of the image
	#[inline]
	fn checked_pixel_signed(&self, x: i64, y: i64) -> Option<<Self as image::GenericImageView>::Pixel> {
		if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
			return None;
		}
		self.checked_pixel(x as u32, y as u32)
	}
}
impl<I: image::GenericImageView> CheckedPixel for I {
	#[inline]
	fn checked_pixel(&self, x: u32, y: u32) -> Option<<Self as image::GenericImageView>::Pixel> {
		if x >= self.width() || y >= self.height() {
			return None;
		}
		Some(image::GenericImageView::get_pixel(self, x, y))
	}
}

pub trait ChannelSum: image::Pixel {
	/// R + G + B
	fn channel_sum(&self) -> u32;
}
impl ChannelSum for image::Rgb<u8> {
	#[inline]
	fn channel_sum(&self) -> u32 {
		self.0[0] as u32 + self.0[1] as u32 + self.0[2] as u32
	}
}

pub trait ConvertPixel<T: Sized + image::Pixel>: Sized + image::Pixel {
	fn convert(self) -> T;
}
impl ConvertPixel<image::Rgb<u8>> for image::Bgra<u8> {
	#[inline]
	fn convert(self) -> image::Rgb<u8> {
		image::Rgb([self.0[2], self.0[1], self.0[0]])
	}
}

#[test]
fn test_checked_pixel() {
	let image = image::RgbImage::from_pixel(4, 3, image::Rgb([1, 2, 3]));
	assert_eq!(image.checked_pixel(3, 2), Some(image::Rgb([1, 2, 3])));
	assert_eq!(image.checked_pixel(4, 0), None);
	assert_eq!(image.checked_pixel(0, 3), None);
	assert_eq!(image.checked_pixel_signed(-1, 0), None);
	assert_eq!(image.checked_pixel_signed(0, 0).map(|px| px.channel_sum()), Some(6));
}

#[test]
fn test_bgra_to_rgb() {
	let rgb: image::Rgb<u8> = image::Bgra::<u8>([10, 20, 30, 255]).convert();
	assert_eq!(rgb, image::Rgb([30, 20, 10]));
}
