use super::error::{Error, Result};
use super::{QuadTree, Quadrant};

impl Quadrant {
	/// Pre-order walk pushing every node that stands for its region at
	/// `depth`: leaves above `depth`, and whatever node sits at `depth`.
	fn collect<'a>(&'a self, depth: u32, out: &mut Vec<&'a Quadrant>) {
		if self.is_leaf() || self.depth() == depth {
			out.push(self);
		} else if let Some(children) = self.children() {
			for child in children.iter() {
				child.collect(depth, out);
			}
		}
	}

	fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Quadrant>) {
		match self.children() {
			Some(children) => children.iter().for_each(|c| c.collect_leaves(out)),
			None => out.push(self),
		}
	}
}

impl QuadTree {
	/// The regions making up the image at rendering depth `depth`,
	/// in top-left, top-right, bottom-left, bottom-right pre-order.
	///
	/// Fails with `DepthOutOfRange` past `max_depth()`.
	pub fn quadrants_at(&self, depth: u32) -> Result<Vec<&Quadrant>> {
		if depth > self.max_depth() {
			return Err(Error::DepthOutOfRange { requested: depth, max: self.max_depth() });
		}
		let mut out = Vec::new();
		self.root().collect(depth, &mut out);
		Ok(out)
	}

	/// Every leaf of the tree, in the same order as `quadrants_at`.
	pub fn leaves(&self) -> Vec<&Quadrant> {
		let mut out = Vec::new();
		self.root().collect_leaves(&mut out);
		out
	}
}
