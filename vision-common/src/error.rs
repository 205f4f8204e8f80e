use crate::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
	Left,
	Top,
	Right,
	Bottom,
}
impl core::fmt::Display for Edge {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(match self {
			Edge::Left => "left",
			Edge::Top => "top",
			Edge::Right => "right",
			Edge::Bottom => "bottom",
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
	Columns,
	Rows,
}
impl core::fmt::Display for Axis {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(match self {
			Axis::Columns => "column",
			Axis::Rows => "row",
		})
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VisionError {
	/// An edge scan left the bitmap, or ran past its pixel ceiling, without the expected color transition
	#[error("grid {edge} edge not found (scan stopped at {x}, {y})")]
	BoundaryNotFound { edge: Edge, x: i64, y: i64 },

	#[error("no {0} boundaries detected")]
	EmptySegmentation(Axis),

	#[error("capture failed: {0}")]
	CaptureFailure(Box<str>),

	#[error("analysis pass cancelled")]
	Cancelled,

	#[error("analysis pass exceeded its {0:?} budget")]
	TimedOut(Duration),

	#[error("cell ({column}, {row}) is outside of the board")]
	CellOutOfRange { column: usize, row: usize },
}
impl VisionError {
	#[inline]
	pub fn capture(err: impl core::fmt::Display) -> Self {
		VisionError::CaptureFailure(err.to_string().into_boxed_str())
	}
}
