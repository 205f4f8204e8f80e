//! Finds the grid's dark outer frame inside a window bitmap.

use msv_vision_common::{consts::*, prelude::*};

/// Walks from `xy` in steps of `dir` while `keep_going` holds and returns the first position where it doesn't.
///
/// Leaving the bitmap, or visiting more than `MAX_SCAN_PIXELS` pixels, means the transition doesn't exist.
fn scan_while(bitmap: &Bitmap, edge: Edge, xy: [i64; 2], dir: [i64; 2], keep_going: impl Fn(&image::Rgb<u8>) -> bool) -> Result<[i64; 2], VisionError> {
	let [mut x, mut y] = xy;
	for _ in 0..MAX_SCAN_PIXELS {
		match bitmap.checked_pixel_signed(x, y) {
			Some(pixel) if keep_going(&pixel) => {
				x += dir[0];
				y += dir[1];
			}
			Some(_) => return Ok([x, y]),
			None => break,
		}
	}
	Err(VisionError::BoundaryNotFound { edge, x, y })
}

/// Returns the inclusive bounding box of the grid's outer frame.
///
/// `start_x` is where the search starts along the vertical midline, past any window chrome.
pub fn find_grid(bitmap: &Bitmap, start_x: u32, cancel: &Cancellation) -> Result<Rect<u32>, VisionError> {
	cancel.check()?;

	let mid = (bitmap.height() / 2) as i64;

	// Skip the window's own dark border, then the light/neutral gap up to the grid frame
	let [x, _] = scan_while(bitmap, Edge::Left, [start_x as i64, mid], [1, 0], |px| px.is_dark())?;
	let [left, _] = scan_while(bitmap, Edge::Left, [x, mid], [1, 0], |px| !px.is_dark())?;

	cancel.check()?;

	// Follow the frame's left stroke up and down
	let [_, above] = scan_while(bitmap, Edge::Top, [left, mid], [0, -1], |px| px.is_dark())?;
	let [_, below] = scan_while(bitmap, Edge::Bottom, [left, mid], [0, 1], |px| px.is_dark())?;
	let (top, bottom) = (above + 1, below - 1);

	cancel.check()?;

	// ...and the top stroke to the right
	let [past_right, _] = scan_while(bitmap, Edge::Right, [left, top], [1, 0], |px| px.is_dark())?;
	let right = past_right - 1;

	let grid = Rect {
		left: left as u32,
		top: top as u32,
		right: right as u32,
		bottom: bottom as u32,
	};

	log::debug!("grid frame at {:?} to {:?}", grid.top_left(), grid.bottom_right());

	Ok(grid)
}

#[cfg(test)]
use msv_vision_common::synth::SynthScreenshot;

#[cfg(test)]
fn hidden_board(columns: usize, rows: usize) -> Board {
	Board::from_fn(columns, rows, |_, _| CellValue::HIDDEN)
}

#[test]
fn test_find_grid() {
	for (columns, rows) in [(9, 9), (16, 16), (30, 16), (1, 1)] {
		let synth = SynthScreenshot::new(hidden_board(columns, rows));
		let bitmap = synth.render();
		assert_eq!(find_grid(&bitmap, EDGE_SEARCH_OFFSET, &Cancellation::none()), Ok(synth.grid_box()), "{columns}x{rows}");
	}
}

#[test]
fn test_find_grid_without_chrome() {
	let synth = SynthScreenshot::new(hidden_board(9, 9)).chrome(0);
	let bitmap = synth.render();
	assert_eq!(find_grid(&bitmap, 0, &Cancellation::none()), Ok(synth.grid_box()));
	assert_eq!(find_grid(&bitmap, EDGE_SEARCH_OFFSET, &Cancellation::none()), Ok(synth.grid_box()));
}

#[test]
fn test_light_bitmap_has_no_boundary() {
	let bitmap = Bitmap::from_pixel(200, 100, image::Rgb([255, 255, 255]));
	assert!(matches!(
		find_grid(&bitmap, EDGE_SEARCH_OFFSET, &Cancellation::none()),
		Err(VisionError::BoundaryNotFound { edge: Edge::Left, .. })
	));
}

#[test]
fn test_empty_bitmap() {
	let bitmap = Bitmap::new(0, 0);
	assert!(matches!(find_grid(&bitmap, 0, &Cancellation::none()), Err(VisionError::BoundaryNotFound { .. })));
}

#[test]
fn test_start_outside_bitmap() {
	let synth = SynthScreenshot::new(hidden_board(2, 2));
	let bitmap = synth.render();
	assert!(matches!(
		find_grid(&bitmap, bitmap.width() + 10, &Cancellation::none()),
		Err(VisionError::BoundaryNotFound { edge: Edge::Left, .. })
	));
}

#[test]
fn test_frame_touching_bitmap_edge() {
	// A dark stroke that runs off the bottom of the bitmap
	let mut bitmap = Bitmap::from_pixel(50, 40, image::Rgb([255, 255, 255]));
	for y in 10..40 {
		bitmap.put_pixel(20, y, image::Rgb([0, 0, 0]));
	}
	assert_eq!(
		find_grid(&bitmap, 0, &Cancellation::none()),
		Err(VisionError::BoundaryNotFound { edge: Edge::Bottom, x: 20, y: 40 })
	);

	// ...and one that runs off the top
	let mut bitmap = Bitmap::from_pixel(50, 40, image::Rgb([255, 255, 255]));
	for y in 0..30 {
		bitmap.put_pixel(20, y, image::Rgb([0, 0, 0]));
	}
	assert_eq!(
		find_grid(&bitmap, 0, &Cancellation::none()),
		Err(VisionError::BoundaryNotFound { edge: Edge::Top, x: 20, y: -1 })
	);
}

#[test]
fn test_find_grid_cancelled() {
	let bitmap = SynthScreenshot::new(hidden_board(9, 9)).render();
	let flag = Arc::new(AtomicBool::new(true));
	assert_eq!(
		find_grid(&bitmap, EDGE_SEARCH_OFFSET, &Cancellation::none().with_flag(flag)),
		Err(VisionError::Cancelled)
	);
}
