use crate::classify::classify;
use msv_vision_common::prelude::*;

/// Classifies every cell enclosed by `boundaries` into a column-major board.
pub fn assemble(bitmap: &Bitmap, boundaries: &Boundaries, cancel: &Cancellation) -> Result<Board, VisionError> {
	let (columns, rows) = boundaries.dimensions();
	if columns == 0 {
		return Err(VisionError::EmptySegmentation(Axis::Columns));
	}
	if rows == 0 {
		return Err(VisionError::EmptySegmentation(Axis::Rows));
	}

	let cells = (0..columns * rows)
		.into_par_iter()
		.map(|i| {
			cancel.check()?;

			let (column, row) = (i / rows, i % rows);
			let cell = boundaries.cell(column, row).ok_or(VisionError::CellOutOfRange { column, row })?;

			let value = classify(bitmap, cell);
			log::debug!("{column},{row}: {:?} {}", value.state, value.value);

			Ok(value)
		})
		.collect::<Result<Vec<_>, VisionError>>()?;

	Board::from_column_major(columns, rows, cells).ok_or(VisionError::EmptySegmentation(Axis::Columns))
}

#[test]
fn test_assemble_single_row() {
	use msv_vision_common::synth::SynthScreenshot;

	let board = Board::from_fn(4, 1, |column, _| match column {
		0 => CellValue::HIDDEN,
		1 => CellValue::visible(2),
		2 => CellValue::FLAGGED,
		_ => CellValue::visible(0),
	});
	let synth = SynthScreenshot::new(board.clone());
	let bitmap = synth.render();

	assert_eq!(assemble(&bitmap, &synth.boundaries(), &Cancellation::none()), Ok(board));
}

#[test]
fn test_assemble_without_cells() {
	let bitmap = Bitmap::new(10, 10);
	let no_rows = Boundaries { columns: vec![0, 5], rows: vec![0] };
	assert_eq!(assemble(&bitmap, &no_rows, &Cancellation::none()), Err(VisionError::EmptySegmentation(Axis::Rows)));
	assert_eq!(assemble(&bitmap, &Boundaries::default(), &Cancellation::none()), Err(VisionError::EmptySegmentation(Axis::Columns)));
}

#[test]
fn test_assemble_timed_out() {
	let bitmap = Bitmap::new(10, 10);
	let boundaries = Boundaries { columns: vec![0, 5], rows: vec![0, 5] };
	assert_eq!(
		assemble(&bitmap, &boundaries, &Cancellation::none().with_timeout(Duration::ZERO)),
		Err(VisionError::TimedOut(Duration::ZERO))
	);
}
