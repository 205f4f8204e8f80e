use crate::prelude::*;

/// One captured window, RGB. Read-only for the whole analysis pass.
pub type Bitmap = image::RgbImage;

/// Produces a pixel-addressable snapshot of the currently visible game window.
///
/// The recognition pipeline never talks to the OS; platform specific sources implement this.
pub trait Capture {
	fn capture(&mut self) -> Result<Bitmap, VisionError>;
}
impl<C: Capture + ?Sized> Capture for Box<C> {
	#[inline]
	fn capture(&mut self) -> Result<Bitmap, VisionError> {
		(**self).capture()
	}
}
