use crate::prelude::*;

/// What happened during a [`ScreenBoard::refresh`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refresh {
	/// A new frame was analyzed and replaced the board
	Updated,
	/// Same pixels as the last analyzed frame, the board was kept
	Unchanged,
}

/// The live board of a game window, re-recognized from a [`Capture`] source on demand
pub struct ScreenBoard<C: Capture> {
	source: C,
	view: BoardView,
	last_frame_crc32: Option<u32>,
}
impl<C: Capture> ScreenBoard<C> {
	pub fn new(source: C) -> Self {
		Self {
			source,
			view: BoardView::default(),
			last_frame_crc32: None,
		}
	}

	#[inline]
	pub fn board(&self) -> &Board {
		self.view.snapshot()
	}

	/// One capture → analyze cycle.
	///
	/// The pass's time budget starts once the frame is captured. On failure the previous board
	/// stays in place and the next refresh retries from scratch.
	pub fn refresh(&mut self, options: &vision::PassOptions) -> Result<Refresh, VisionError> {
		let bitmap = self.source.capture()?;

		// Don't waste time on duplicate frames
		let crc32 = crc32fast::hash(bitmap.as_raw());
		if self.last_frame_crc32 == Some(crc32) {
			log::debug!("frame unchanged, keeping the current board");
			return Ok(Refresh::Unchanged);
		}

		let options = vision::PassOptions {
			edge_search_offset: options.edge_search_offset,
			cancel: options.cancel.restarted(),
		};
		let board = vision::analyze(&bitmap, &options)?;

		self.view = BoardView::new(board);
		self.last_frame_crc32 = Some(crc32);

		Ok(Refresh::Updated)
	}
}
impl<C: Capture> BoardCapability for ScreenBoard<C> {
	#[inline]
	fn dimensions(&self) -> (usize, usize) {
		self.view.dimensions()
	}

	#[inline]
	fn value(&self, column: usize, row: usize) -> Option<u8> {
		self.view.value(column, row)
	}

	#[inline]
	fn state(&self, column: usize, row: usize) -> Option<CellState> {
		self.view.state(column, row)
	}

	#[inline]
	fn set_state(&mut self, column: usize, row: usize, state: CellState) -> Result<(), VisionError> {
		self.view.set_state(column, row, state)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use msv_vision_common::synth::SynthScreenshot;
	use std::collections::VecDeque;

	/// Hands out queued frames, counting how many were taken
	struct QueuedCapture {
		frames: VecDeque<Result<Bitmap, VisionError>>,
		taken: usize,
		delay: Duration,
	}
	impl Capture for QueuedCapture {
		fn capture(&mut self) -> Result<Bitmap, VisionError> {
			self.taken += 1;
			std::thread::sleep(self.delay);
			self.frames.pop_front().unwrap_or_else(|| Err(VisionError::capture("no more frames")))
		}
	}

	fn screen_board(frames: Vec<Result<Bitmap, VisionError>>) -> ScreenBoard<QueuedCapture> {
		ScreenBoard::new(QueuedCapture {
			frames: frames.into(),
			taken: 0,
			delay: Duration::ZERO,
		})
	}

	fn with_cancel(cancel: Cancellation) -> vision::PassOptions {
		vision::PassOptions {
			cancel,
			..Default::default()
		}
	}

	fn sample_board() -> Board {
		Board::from_fn(5, 4, |column, row| match (column + row) % 4 {
			0 => CellValue::HIDDEN,
			1 => CellValue::visible(row as u8 + 1),
			2 => CellValue::FLAGGED,
			_ => CellValue::visible(0),
		})
	}

	#[test]
	fn test_empty_before_first_refresh() {
		let board = screen_board(vec![]);
		assert_eq!(board.dimensions(), (0, 0));
		assert_eq!(board.value(0, 0), None);
		assert!(board.board().is_empty());
	}

	#[test]
	fn test_refresh() {
		let synth = SynthScreenshot::new(sample_board());
		let mut board = screen_board(vec![Ok(synth.render())]);

		assert_eq!(board.refresh(&vision::PassOptions::default()), Ok(Refresh::Updated));
		assert_eq!(board.board(), &synth.board);
		assert_eq!(board.dimensions(), (5, 4));
		assert_eq!(board.state(0, 0), Some(CellState::Hidden));
		assert_eq!(board.value(1, 0), Some(1));
	}

	#[test]
	fn test_unchanged_frame_is_reused() {
		let bitmap = SynthScreenshot::new(sample_board()).render();
		let mut board = screen_board(vec![Ok(bitmap.clone()), Ok(bitmap)]);

		assert_eq!(board.refresh(&vision::PassOptions::default()), Ok(Refresh::Updated));
		board.set_state(0, 0, CellState::Flagged).unwrap();

		// bookkeeping survives as no new board was built
		assert_eq!(board.refresh(&vision::PassOptions::default()), Ok(Refresh::Unchanged));
		assert_eq!(board.state(0, 0), Some(CellState::Flagged));
		assert_eq!(board.source.taken, 2);
	}

	#[test]
	fn test_failed_refresh_keeps_board() {
		let synth = SynthScreenshot::new(sample_board());
		let blank = Bitmap::from_pixel(320, 200, image::Rgb([255, 255, 255]));
		let mut board = screen_board(vec![
			Ok(synth.render()),
			Err(VisionError::capture("window minimized")),
			Ok(blank),
			Ok(synth.render()),
		]);

		assert_eq!(board.refresh(&vision::PassOptions::default()), Ok(Refresh::Updated));

		assert_eq!(board.refresh(&vision::PassOptions::default()), Err(VisionError::CaptureFailure("window minimized".into())));
		assert_eq!(board.board(), &synth.board);

		assert!(matches!(board.refresh(&vision::PassOptions::default()), Err(VisionError::BoundaryNotFound { .. })));
		assert_eq!(board.board(), &synth.board);

		// the first frame again, unchanged since the last successful pass
		assert_eq!(board.refresh(&vision::PassOptions::default()), Ok(Refresh::Unchanged));
	}

	#[test]
	fn test_cancelled_refresh_is_retryable() {
		let bitmap = SynthScreenshot::new(sample_board()).render();
		let mut board = screen_board(vec![Ok(bitmap.clone()), Ok(bitmap)]);

		let flag = Arc::new(AtomicBool::new(true));
		let cancel = Cancellation::none().with_flag(flag.clone());
		assert_eq!(board.refresh(&with_cancel(cancel.clone())), Err(VisionError::Cancelled));
		assert!(board.board().is_empty());

		flag.store(false, Ordering::Release);
		assert_eq!(board.refresh(&with_cancel(cancel.clone())), Ok(Refresh::Updated));
		assert_eq!(board.dimensions(), (5, 4));
	}

	#[test]
	fn test_budget_starts_after_capture() {
		let bitmap = SynthScreenshot::new(sample_board()).render();
		let mut board = screen_board(vec![Ok(bitmap)]);
		board.source.delay = Duration::from_millis(700);

		// the capture alone outlasts the budget, the analysis doesn't
		let options = with_cancel(Cancellation::none().with_timeout(Duration::from_millis(500)));
		assert_eq!(board.refresh(&options), Ok(Refresh::Updated));
		assert_eq!(board.dimensions(), (5, 4));
	}

	#[test]
	fn test_custom_edge_search_offset() {
		let synth = SynthScreenshot::new(sample_board());
		let mut board = screen_board(vec![Ok(synth.render())]);

		let options = vision::PassOptions {
			edge_search_offset: 0,
			..Default::default()
		};
		assert_eq!(board.refresh(&options), Ok(Refresh::Updated));
		assert_eq!(board.board(), &synth.board);
	}

	#[test]
	fn test_out_of_range_write() {
		let mut board = screen_board(vec![]);
		assert_eq!(board.set_state(0, 0, CellState::Visible), Err(VisionError::CellOutOfRange { column: 0, row: 0 }));
	}
}
