/// Inclusive pixel rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect<T> {
	pub left: T,
	pub top: T,
	pub right: T,
	pub bottom: T,
}
impl<T: Copy> Rect<T> {
	#[inline]
	pub const fn new(left: T, top: T, right: T, bottom: T) -> Self {
		Self { left, top, right, bottom }
	}

	#[inline]
	pub fn top_left(&self) -> [T; 2] {
		[self.left, self.top]
	}

	#[inline]
	pub fn bottom_right(&self) -> [T; 2] {
		[self.right, self.bottom]
	}

	#[inline]
	pub fn width(&self) -> T
	where
		T: core::ops::Sub<Output = T>
	{
		self.right - self.left
	}

	#[inline]
	pub fn height(&self) -> T
	where
		T: core::ops::Sub<Output = T>
	{
		self.bottom - self.top
	}

	/// Midpoint of the rectangle, rounded towards the top-left
	#[inline]
	pub fn center(&self) -> [T; 2]
	where
		T: core::ops::Add<Output = T> + core::ops::Div<Output = T> + From<u8>
	{
		[(self.left + self.right) / T::from(2), (self.top + self.bottom) / T::from(2)]
	}
}
impl<T: Copy> From<Rect<T>> for [T; 4] {
	#[inline]
	fn from(rect: Rect<T>) -> Self {
		[rect.left, rect.top, rect.right, rect.bottom]
	}
}

#[test]
fn test_rect() {
	let rect = Rect::new(10_u32, 20, 31, 40);
	assert_eq!(rect.width(), 21);
	assert_eq!(rect.height(), 20);
	assert_eq!(rect.center(), [20, 30]);
	assert_eq!(<[u32; 4]>::from(rect), [10, 20, 31, 40]);
}
