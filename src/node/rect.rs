/// Axis-aligned pixel rectangle; `right` and `bottom` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
	pub left: u32,
	pub top: u32,
	pub right: u32,
	pub bottom: u32,
}

impl Rect {
	pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
		Rect { left, top, right, bottom }
	}

	/// The rectangle covering a whole `width` by `height` image.
	pub fn from_size(width: u32, height: u32) -> Self {
		Rect::new(0, 0, width, height)
	}

	pub fn width(&self) -> u32 {
		self.right.saturating_sub(self.left)
	}

	pub fn height(&self) -> u32 {
		self.bottom.saturating_sub(self.top)
	}

	pub fn area(&self) -> u64 {
		self.width() as u64 * self.height() as u64
	}

	/// True if the rectangle covers no pixels.
	pub fn is_empty(&self) -> bool {
		self.width() == 0 || self.height() == 0
	}

	pub fn contains(&self, x: u32, y: u32) -> bool {
		x >= self.left && x < self.right && y >= self.top && y < self.bottom
	}

	/// Splits the rectangle at its midpoint into
	/// top-left, top-right, bottom-left and bottom-right parts.
	///
	/// Odd extents put the extra column/row in the right/bottom parts;
	/// a one pixel extent yields empty left/top parts.
	pub fn quarters(&self) -> [Rect; 4] {
		let mid_x = self.left + self.width() / 2;
		let mid_y = self.top + self.height() / 2;
		[
			Rect::new(self.left, self.top, mid_x, mid_y),
			Rect::new(mid_x, self.top, self.right, mid_y),
			Rect::new(self.left, mid_y, mid_x, self.bottom),
			Rect::new(mid_x, mid_y, self.right, self.bottom),
		]
	}
}
