use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
	Hidden,
	Flagged,
	Visible,
	Bomb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellValue {
	pub state: CellState,
	/// Only meaningful when `state` is `Visible`, otherwise always 0
	pub value: u8,
}
impl CellValue {
	pub const HIDDEN: CellValue = CellValue { state: CellState::Hidden, value: 0 };
	pub const FLAGGED: CellValue = CellValue { state: CellState::Flagged, value: 0 };
	pub const BOMB: CellValue = CellValue { state: CellState::Bomb, value: 0 };

	#[inline]
	pub const fn visible(value: u8) -> Self {
		CellValue { state: CellState::Visible, value }
	}

	#[inline]
	fn symbol(&self) -> char {
		match self.state {
			CellState::Hidden => '#',
			CellState::Flagged => 'F',
			CellState::Bomb => '*',
			CellState::Visible if self.value == 0 => '.',
			CellState::Visible => char::from(b'0' + self.value.min(9)),
		}
	}
}

/// Cell separator positions along both axes, in bitmap pixels
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Boundaries {
	pub columns: Vec<u32>,
	pub rows: Vec<u32>,
}
impl Boundaries {
	/// (columns, rows) of cells described by these boundaries
	#[inline]
	pub fn dimensions(&self) -> (usize, usize) {
		(self.columns.len().saturating_sub(1), self.rows.len().saturating_sub(1))
	}

	/// The pixel rectangle of a cell, edges inclusive of the separators on both sides
	#[inline]
	pub fn cell(&self, column: usize, row: usize) -> Option<Rect<u32>> {
		Some(Rect {
			left: *self.columns.get(column)?,
			right: *self.columns.get(column + 1)?,
			top: *self.rows.get(row)?,
			bottom: *self.rows.get(row + 1)?,
		})
	}
}

/// Snapshot of every cell of the grid, indexed `[column][row]`
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
	columns: usize,
	rows: usize,
	cells: Box<[CellValue]>,
}
impl Board {
	#[inline]
	pub fn empty() -> Self {
		Board { columns: 0, rows: 0, cells: Box::default() }
	}

	/// `cells` is column-major, i.e. `cells[column * rows + row]`
	pub fn from_column_major(columns: usize, rows: usize, cells: Vec<CellValue>) -> Option<Self> {
		if columns.checked_mul(rows)? != cells.len() {
			return None;
		}
		Some(Board { columns, rows, cells: cells.into_boxed_slice() })
	}

	pub fn from_fn(columns: usize, rows: usize, mut f: impl FnMut(usize, usize) -> CellValue) -> Self {
		let mut cells = Vec::with_capacity(columns * rows);
		for column in 0..columns {
			for row in 0..rows {
				cells.push(f(column, row));
			}
		}
		Board { columns, rows, cells: cells.into_boxed_slice() }
	}

	#[inline]
	pub fn columns(&self) -> usize {
		self.columns
	}

	#[inline]
	pub fn rows(&self) -> usize {
		self.rows
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	#[inline]
	pub fn get(&self, column: usize, row: usize) -> Option<CellValue> {
		if column >= self.columns || row >= self.rows {
			return None;
		}
		Some(self.cells[column * self.rows + row])
	}

	/// (column, row, cell) in column-major order
	pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellValue)> + '_ {
		let rows = self.rows;
		self.cells.iter().enumerate().map(move |(i, cell)| (i / rows, i % rows, *cell))
	}

	#[inline]
	pub fn count(&self, state: CellState) -> usize {
		self.cells.iter().filter(|cell| cell.state == state).count()
	}
}
impl Default for Board {
	#[inline]
	fn default() -> Self {
		Board::empty()
	}
}
impl core::ops::Index<(usize, usize)> for Board {
	type Output = CellValue;

	#[inline]
	fn index(&self, (column, row): (usize, usize)) -> &Self::Output {
		assert!(column < self.columns && row < self.rows, "cell ({column}, {row}) is outside of a {}x{} board", self.columns, self.rows);
		&self.cells[column * self.rows + row]
	}
}
impl core::fmt::Display for Board {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		use core::fmt::Write;
		for row in 0..self.rows {
			for column in 0..self.columns {
				f.write_char(self[(column, row)].symbol())?;
			}
			f.write_char('\n')?;
		}
		Ok(())
	}
}
impl core::fmt::Debug for Board {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Board")
			.field("columns", &self.columns)
			.field("rows", &self.rows)
			.field("hidden", &self.count(CellState::Hidden))
			.field("flagged", &self.count(CellState::Flagged))
			.field("bombs", &self.count(CellState::Bomb))
			.finish()
	}
}

/// What a downstream consumer (e.g. a solver) gets to see of the board
pub trait BoardCapability {
	/// (columns, rows)
	fn dimensions(&self) -> (usize, usize);

	fn value(&self, column: usize, row: usize) -> Option<u8>;
	fn state(&self, column: usize, row: usize) -> Option<CellState>;

	/// Consumer bookkeeping only, e.g. marking a cell after clicking it. Never touches the recognized snapshot.
	fn set_state(&mut self, column: usize, row: usize, state: CellState) -> Result<(), VisionError>;
}

/// A recognized board plus the consumer's own state marks
#[derive(Clone, Debug)]
pub struct BoardView {
	snapshot: Arc<Board>,
	states: Box<[CellState]>,
}
impl BoardView {
	pub fn new(board: Board) -> Self {
		let states = board.cells.iter().map(|cell| cell.state).collect();
		BoardView { snapshot: Arc::new(board), states }
	}

	#[inline]
	pub fn snapshot(&self) -> &Arc<Board> {
		&self.snapshot
	}

	#[inline]
	fn index(&self, column: usize, row: usize) -> Option<usize> {
		if column >= self.snapshot.columns || row >= self.snapshot.rows {
			None
		} else {
			Some(column * self.snapshot.rows + row)
		}
	}
}
impl Default for BoardView {
	#[inline]
	fn default() -> Self {
		BoardView::new(Board::empty())
	}
}
impl BoardCapability for BoardView {
	#[inline]
	fn dimensions(&self) -> (usize, usize) {
		(self.snapshot.columns, self.snapshot.rows)
	}

	#[inline]
	fn value(&self, column: usize, row: usize) -> Option<u8> {
		self.snapshot.get(column, row).map(|cell| cell.value)
	}

	#[inline]
	fn state(&self, column: usize, row: usize) -> Option<CellState> {
		self.index(column, row).map(|i| self.states[i])
	}

	fn set_state(&mut self, column: usize, row: usize, state: CellState) -> Result<(), VisionError> {
		let i = self.index(column, row).ok_or(VisionError::CellOutOfRange { column, row })?;
		self.states[i] = state;
		Ok(())
	}
}

#[cfg(test)]
fn sample_board() -> Board {
	Board::from_fn(3, 2, |column, row| match (column, row) {
		(0, 0) => CellValue::HIDDEN,
		(1, 0) => CellValue::FLAGGED,
		(2, 0) => CellValue::visible(3),
		(0, 1) => CellValue::visible(0),
		(1, 1) => CellValue::BOMB,
		_ => CellValue::visible(8),
	})
}

#[test]
fn test_board_indexing() {
	let board = sample_board();
	assert_eq!((board.columns(), board.rows()), (3, 2));
	assert_eq!(board[(2, 0)], CellValue::visible(3));
	assert_eq!(board.get(1, 1), Some(CellValue::BOMB));
	assert_eq!(board.get(3, 0), None);
	assert_eq!(board.get(0, 2), None);
	assert_eq!(board.iter().count(), 6);
	assert_eq!(board.iter().nth(3), Some((1, 1, CellValue::BOMB)));
	assert_eq!(board.to_string(), "#F3\n.*8\n");
}

#[test]
fn test_board_from_column_major() {
	assert!(Board::from_column_major(2, 2, vec![CellValue::HIDDEN; 3]).is_none());
	let board = Board::from_column_major(2, 1, vec![CellValue::HIDDEN, CellValue::BOMB]).unwrap();
	assert_eq!(board.get(1, 0), Some(CellValue::BOMB));
}

#[test]
fn test_boundaries_cell() {
	let boundaries = Boundaries { columns: vec![10, 30, 50], rows: vec![5, 25] };
	assert_eq!(boundaries.dimensions(), (2, 1));
	assert_eq!(boundaries.cell(1, 0), Some(Rect::new(30, 5, 50, 25)));
	assert_eq!(boundaries.cell(2, 0), None);
	assert_eq!(boundaries.cell(0, 1), None);
}

#[test]
fn test_board_view_bookkeeping() {
	let mut view = BoardView::new(sample_board());
	assert_eq!(view.dimensions(), (3, 2));
	assert_eq!(view.state(0, 0), Some(CellState::Hidden));

	view.set_state(0, 0, CellState::Flagged).unwrap();
	assert_eq!(view.state(0, 0), Some(CellState::Flagged));

	// the recognized snapshot is untouched
	assert_eq!(view.snapshot()[(0, 0)], CellValue::HIDDEN);
	assert_eq!(view.value(2, 0), Some(3));

	assert_eq!(view.set_state(3, 0, CellState::Visible), Err(VisionError::CellOutOfRange { column: 3, row: 0 }));
	assert_eq!(view.state(0, 2), None);
	assert_eq!(view.value(0, 2), None);
}
