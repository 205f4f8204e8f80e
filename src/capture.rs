use crate::prelude::*;

/// A screenshot on disk, in any format `image` can decode
pub struct FileCapture {
	path: PathBuf,
}
impl FileCapture {
	#[inline]
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}
impl Capture for FileCapture {
	fn capture(&mut self) -> Result<Bitmap, VisionError> {
		let image = image::open(&self.path).map_err(|err| VisionError::capture(format_args!("{}: {err}", self.path.display())))?;
		Ok(image.into_rgb8())
	}
}

#[cfg(feature = "screen")]
pub use screen::ScreenCapture;

#[cfg(feature = "screen")]
mod screen {
	use super::*;

	/// Attempts before a display that keeps returning `WouldBlock` counts as a failure
	const WOULD_BLOCK_RETRIES: usize = 40;

	/// The primary display, optionally cropped to the game window
	pub struct ScreenCapture {
		capturer: scrap::Capturer,
		region: Option<[u32; 4]>,
	}
	impl ScreenCapture {
		pub fn new(region: Option<[u32; 4]>) -> Result<Self, VisionError> {
			let display = scrap::Display::primary().map_err(VisionError::capture)?;
			let capturer = scrap::Capturer::new(display).map_err(VisionError::capture)?;
			Ok(Self { capturer, region })
		}

		/// The configured region clipped to the display, or the whole display
		fn crop(&self) -> Result<[u32; 4], VisionError> {
			let (w, h) = (self.capturer.width() as u32, self.capturer.height() as u32);
			match self.region {
				None => Ok([0, 0, w, h]),
				Some([x, y, rw, rh]) => {
					if x >= w || y >= h {
						return Err(VisionError::capture(format_args!("capture region starts outside of the {w}x{h} display")));
					}
					Ok([x, y, rw.min(w - x), rh.min(h - y)])
				}
			}
		}
	}
	impl Capture for ScreenCapture {
		fn capture(&mut self) -> Result<Bitmap, VisionError> {
			let [x0, y0, w, h] = self.crop()?;
			let height = self.capturer.height();

			let mut attempts = 0;
			loop {
				match self.capturer.frame() {
					Ok(frame) => {
						// Rows may be padded past `width * 4`
						let stride = frame.len() / height.max(1);

						break Ok(Bitmap::from_fn(w, h, |x, y| {
							let i = (y0 + y) as usize * stride + (x0 + x) as usize * 4;
							match frame.get(i..i + 4) {
								Some(&[b, g, r, a]) => image::Bgra([b, g, r, a]).convert(),
								_ => image::Rgb([0, 0, 0]),
							}
						}));
					}

					Err(ref err) if err.kind() == std::io::ErrorKind::WouldBlock && attempts < WOULD_BLOCK_RETRIES => {
						attempts += 1;
						std::thread::sleep(Duration::from_millis(25));
					}

					Err(err) => break Err(VisionError::capture(err)),
				}
			}
		}
	}
}

#[test]
fn test_file_capture() {
	use msv_vision_common::synth::SynthScreenshot;

	let bitmap = SynthScreenshot::new(Board::from_fn(3, 2, |_, _| CellValue::visible(1))).render();
	let path = std::env::temp_dir().join(format!("msv-file-capture-{}.png", std::process::id()));
	bitmap.save(&path).unwrap();

	let captured = FileCapture::new(&path).capture();
	std::fs::remove_file(&path).ok();

	assert_eq!(captured.unwrap(), bitmap);
}

#[test]
fn test_missing_file_capture() {
	let mut capture = FileCapture::new(std::env::temp_dir().join("msv-no-such-screenshot.png"));
	assert!(matches!(capture.capture(), Err(VisionError::CaptureFailure(_))));
}
