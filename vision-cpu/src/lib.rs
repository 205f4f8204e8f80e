//! The board recognition pipeline: edges → segmentation → per-cell classification.
//!
//! Every stage is a pure function over an immutable [`Bitmap`], so a pass can be re-run on
//! the same screenshot and always produces the same [`Board`].

use msv_vision_common::{consts::*, prelude::*};

pub mod assemble;
pub mod classify;
pub mod edges;
pub mod segment;

#[derive(Clone, Debug)]
pub struct PassOptions {
	/// Horizontal start of the edge search, past the window's own frame
	pub edge_search_offset: u32,
	pub cancel: Cancellation,
}
impl Default for PassOptions {
	#[inline]
	fn default() -> Self {
		PassOptions {
			edge_search_offset: EDGE_SEARCH_OFFSET,
			cancel: Cancellation::none(),
		}
	}
}

/// Everything a pass found out about a screenshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
	pub grid: Rect<u32>,
	pub boundaries: Boundaries,
	pub board: Board,
}

pub fn recognize(bitmap: &Bitmap, options: &PassOptions) -> Result<Analysis, VisionError> {
	let started = Instant::now();
	let cancel = &options.cancel;

	let grid = edges::find_grid(bitmap, options.edge_search_offset, cancel)?;
	let boundaries = segment::segment(bitmap, grid, cancel)?;
	let board = assemble::assemble(bitmap, &boundaries, cancel)?;

	log::debug!(
		"recognized {}x{} board in {:?} (grid {:?})",
		board.columns(),
		board.rows(),
		started.elapsed(),
		<[u32; 4]>::from(grid)
	);

	Ok(Analysis { grid, boundaries, board })
}

#[inline]
pub fn analyze(bitmap: &Bitmap, options: &PassOptions) -> Result<Board, VisionError> {
	recognize(bitmap, options).map(|analysis| analysis.board)
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
fn test_full_pass() {
	let synth = SynthScreenshot::new(mixed_board(9, 9));
	let bitmap = synth.render();

	let analysis = recognize(&bitmap, &PassOptions::default()).unwrap();
	assert_eq!(analysis.grid, synth.grid_box());
	assert_eq!(analysis.boundaries, synth.boundaries());
	assert_eq!(analysis.board, synth.board, "\n{}\n{}", analysis.board, synth.board);
}

#[test]
fn test_pass_is_idempotent() {
	let bitmap = SynthScreenshot::new(mixed_board(16, 16)).render();
	let first = analyze(&bitmap, &PassOptions::default()).unwrap();
	let second = analyze(&bitmap, &PassOptions::default()).unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_board_sizes() {
	for (columns, rows, stride) in [(30, 16, 20), (8, 8, 24), (1, 1, 18), (4, 7, 19)] {
		let synth = SynthScreenshot::new(mixed_board(columns, rows)).stride(stride);
		let board = analyze(&synth.render(), &PassOptions::default()).unwrap();
		assert_eq!(board, synth.board, "{columns}x{rows}@{stride}");
	}
}

#[test]
fn test_pass_cancelled() {
	let bitmap = SynthScreenshot::new(mixed_board(9, 9)).render();

	let options = PassOptions {
		cancel: Cancellation::none().with_flag(Arc::new(AtomicBool::new(true))),
		..Default::default()
	};
	assert_eq!(analyze(&bitmap, &options), Err(VisionError::Cancelled));

	let options = PassOptions {
		cancel: Cancellation::none().with_timeout(Duration::ZERO),
		..Default::default()
	};
	assert_eq!(analyze(&bitmap, &options), Err(VisionError::TimedOut(Duration::ZERO)));
}

#[test]
fn test_all_light_bitmap() {
	let bitmap = Bitmap::from_pixel(640, 480, image::Rgb([255, 255, 255]));
	assert!(matches!(
		analyze(&bitmap, &PassOptions::default()),
		Err(VisionError::BoundaryNotFound { .. })
	));
}
