//! Splits the grid into cells by following brightness transitions.
//!
//! A separator line is darker than the cell interior right after it, so a line that is
//! strictly brighter than the one before it marks a boundary. After each boundary the scan
//! jumps a whole minimum cell width ahead, which yields exactly one boundary per separator.

use msv_vision_common::{consts::*, prelude::*};

/// Σ(R + G + B) over `span` for every line in `lines`; `None` for lines outside of the bitmap
fn brightness_profile(
	bitmap: &Bitmap,
	axis: Axis,
	lines: core::ops::RangeInclusive<u32>,
	span: core::ops::RangeInclusive<u32>,
	cancel: &Cancellation,
) -> Result<Vec<Option<u64>>, VisionError> {
	lines
		.into_par_iter()
		.map(|line| {
			cancel.check()?;

			Ok(span
				.clone()
				.map(|i| {
					let (x, y) = match axis {
						Axis::Columns => (line, i),
						Axis::Rows => (i, line),
					};
					bitmap.checked_pixel(x, y).map(|pixel| pixel.channel_sum() as u64)
				})
				.sum::<Option<u64>>())
		})
		.collect()
}

/// Boundary scan over a brightness profile, where `profile[0]` is the brightness of line `leading`.
pub fn scan_axis(profile: &[Option<u64>], leading: u32, trailing: u32) -> Vec<u32> {
	let brightness = |pos: u32| profile.get((pos - leading) as usize).copied().flatten();

	let mut boundaries = Vec::new();

	let mut pos = leading;
	let mut current = brightness(pos);
	while pos <= trailing {
		let next = brightness(pos + 1);

		if matches!((current, next), (Some(current), Some(next)) if next > current) {
			boundaries.push(pos);

			pos += MIN_CELL_WIDTH;
			if pos > trailing {
				break;
			}
			current = brightness(pos);
		} else {
			pos += 1;
			current = next;
		}
	}

	// Trailing cell without a brighter line after its separator (e.g. the bitmap ends there)
	if let Some(&last) = boundaries.last() {
		if trailing - last > TRAILING_CELL_MIN_GAP {
			boundaries.push(trailing);
		}
	}

	boundaries
}

fn segment_axis(bitmap: &Bitmap, grid: Rect<u32>, axis: Axis, cancel: &Cancellation) -> Result<Vec<u32>, VisionError> {
	let (leading, trailing, span) = match axis {
		Axis::Columns => (grid.left, grid.right, grid.top..=grid.bottom),
		Axis::Rows => (grid.top, grid.bottom, grid.left..=grid.right),
	};

	if trailing < leading {
		return Err(VisionError::EmptySegmentation(axis));
	}

	if trailing - leading > MAX_SCAN_PIXELS {
		let (edge, x, y) = match axis {
			Axis::Columns => (Edge::Right, grid.right, grid.top),
			Axis::Rows => (Edge::Bottom, grid.left, grid.bottom),
		};
		return Err(VisionError::BoundaryNotFound { edge, x: x as i64, y: y as i64 });
	}

	let profile = brightness_profile(bitmap, axis, leading..=trailing.saturating_add(1), span, cancel)?;

	cancel.check()?;

	let boundaries = scan_axis(&profile, leading, trailing);

	// A single boundary doesn't enclose any cell
	if boundaries.len() < 2 {
		return Err(VisionError::EmptySegmentation(axis));
	}

	log::debug!("{} {axis} boundaries: {boundaries:?}", boundaries.len());

	Ok(boundaries)
}

/// Column and row boundaries of the cells inside `grid`
pub fn segment(bitmap: &Bitmap, grid: Rect<u32>, cancel: &Cancellation) -> Result<Boundaries, VisionError> {
	let (columns, rows) = rayon::join(
		|| segment_axis(bitmap, grid, Axis::Columns, cancel),
		|| segment_axis(bitmap, grid, Axis::Rows, cancel),
	);

	Ok(Boundaries {
		columns: columns?,
		rows: rows?,
	})
}

#[cfg(test)]
use msv_vision_common::synth::SynthScreenshot;

#[cfg(test)]
fn mixed_board(columns: usize, rows: usize) -> Board {
	Board::from_fn(columns, rows, |column, row| match (column * 7 + row * 3) % 12 {
		0 => CellValue::HIDDEN,
		1 => CellValue::FLAGGED,
		2 => CellValue::BOMB,
		n => CellValue::visible(n as u8 - 3),
	})
}

#[test]
fn test_uniform_stride() {
	for (columns, rows, stride) in [(9, 9, 20), (16, 16, 18), (30, 16, 24), (1, 1, 20), (5, 3, 19)] {
		let synth = SynthScreenshot::new(mixed_board(columns, rows)).stride(stride);
		let bitmap = synth.render();

		let boundaries = segment(&bitmap, synth.grid_box(), &Cancellation::none()).unwrap();

		assert_eq!(boundaries.columns.len(), columns + 1);
		assert_eq!(boundaries.rows.len(), rows + 1);
		assert!(boundaries.columns.windows(2).all(|pair| pair[1] - pair[0] == stride), "{columns}x{rows}@{stride}: {:?}", boundaries.columns);
		assert!(boundaries.rows.windows(2).all(|pair| pair[1] - pair[0] == stride), "{columns}x{rows}@{stride}: {:?}", boundaries.rows);
		assert_eq!(boundaries, synth.boundaries());
	}
}

#[test]
fn test_trailing_cell_appended() {
	// frame, 19 lines of cell, separator, 19 lines of cell, frame, then the bitmap ends
	let mut profile = vec![Some(1)];
	profile.extend([Some(5); 19]);
	profile.push(Some(1));
	profile.extend([Some(5); 19]);
	profile.push(Some(1));
	profile.push(None);

	assert_eq!(scan_axis(&profile, 100, 140), [100, 120, 140]);
}

#[test]
fn test_trailing_sliver_ignored() {
	let mut profile = vec![Some(1)];
	profile.extend([Some(5); 19]);
	profile.push(Some(1));
	profile.extend([Some(5); 3]);

	assert_eq!(scan_axis(&profile, 100, 122), [100, 120]);
}

#[test]
fn test_flat_region_is_empty() {
	let bitmap = Bitmap::from_pixel(60, 60, image::Rgb([120, 120, 120]));
	assert_eq!(
		segment(&bitmap, Rect::new(5, 5, 50, 50), &Cancellation::none()),
		Err(VisionError::EmptySegmentation(Axis::Columns))
	);
	assert_eq!(scan_axis(&[Some(3); 10], 0, 8), Vec::<u32>::new());
}

#[test]
fn test_segment_cancelled() {
	let synth = SynthScreenshot::new(mixed_board(4, 4));
	let bitmap = synth.render();
	let flag = Arc::new(AtomicBool::new(true));
	assert_eq!(
		segment(&bitmap, synth.grid_box(), &Cancellation::none().with_flag(flag)),
		Err(VisionError::Cancelled)
	);
}
