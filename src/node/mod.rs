pub mod codec;
pub mod detail;
pub mod error;
pub mod rect;
pub mod render;
pub mod traverse;

use image::{GenericImageView, RgbImage};

use detail::Histogram;
use error::{Error, Result};
use rect::Rect;

pub type Color = image::Rgb<u8>;

/// Depth at which subdivision always stops.
pub const MAX_DEPTH: u32 = 8;
/// Regions with a detail score at or below this are not subdivided.
pub const DETAIL_THRESHOLD: f64 = 13.;
/// Default integer scale factor applied to the source before building.
pub const SIZE_MULT: u32 = 1;

/// Stop conditions for subdivision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildOptions {
	pub max_depth: u32,
	/// Lower values give a finer decomposition.
	pub detail_threshold: f64,
}

impl Default for BuildOptions {
	fn default() -> Self {
		BuildOptions { max_depth: MAX_DEPTH, detail_threshold: DETAIL_THRESHOLD }
	}
}

/// Node in a quadtree over an image.
///
/// Every node keeps the average color of its whole region, such that
/// tree descent can stop at any level and give a meaningful preview.
/// Branch nodes have exactly four children, ordered top-left, top-right,
/// bottom-left, bottom-right.
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrant {
	bbox: Rect,
	depth: u32,
	colour: Color,
	detail: f64,
	leaf: bool,
	children: Option<Box<[Quadrant; 4]>>,
}

impl Quadrant {
	/// Measures the region `bbox` of `img`.
	///
	/// The result has no children and is not yet marked as a leaf;
	/// that is up to the builder. An empty region gets black and a
	/// detail of zero.
	pub fn new(img: &RgbImage, bbox: Rect, depth: u32) -> Result<Self> {
		if bbox.left > bbox.right || bbox.top > bbox.bottom ||
			bbox.right > img.width() || bbox.bottom > img.height() {
			return Err(Error::InvalidRegion { rect: bbox, width: img.width(), height: img.height() });
		}

		let (colour, detail) = if bbox.is_empty() {
			(image::Rgb([0; 3]), 0.)
		} else {
			let region = image::imageops::crop_imm(img, bbox.left, bbox.top, bbox.width(), bbox.height());
			let mut sums = [0u64; 3];
			let mut hist = Histogram::default();
			for (_, _, pix) in region.pixels() {
				for (sum, value) in sums.iter_mut().zip(pix.0.iter()) {
					*sum += *value as u64;
				}
				hist.add(pix);
			}
			let count = bbox.area();
			(
				image::Rgb([
					(sums[0] / count) as u8,
					(sums[1] / count) as u8,
					(sums[2] / count) as u8,
				]),
				hist.detail(),
			)
		};

		Ok(Quadrant { bbox, depth, colour, detail, leaf: false, children: None })
	}

	pub fn bbox(&self) -> Rect {
		self.bbox
	}

	pub fn depth(&self) -> u32 {
		self.depth
	}

	/// Mean color of the region, truncated per channel.
	pub fn colour(&self) -> Color {
		self.colour
	}

	pub fn detail(&self) -> f64 {
		self.detail
	}

	pub fn is_leaf(&self) -> bool {
		self.leaf
	}

	pub fn children(&self) -> Option<&[Quadrant; 4]> {
		self.children.as_deref()
	}

	/// Number of nodes in this subtree, including itself.
	pub fn node_count(&self) -> usize {
		1 + self.children().map_or(0, |c| c.iter().map(Quadrant::node_count).sum())
	}

	/// Expands the node over `bbox` and everything below it.
	///
	/// Returns the node along with the deepest leaf depth in its subtree.
	fn build(img: &RgbImage, bbox: Rect, depth: u32, options: &BuildOptions) -> Result<(Self, u32)> {
		let mut node = Quadrant::new(img, bbox, depth)?;
		if depth >= options.max_depth || node.detail <= options.detail_threshold {
			node.leaf = true;
			return Ok((node, depth));
		}

		let [tl, tr, bl, br] = bbox.quarters();
		let (tl, tl_depth) = Quadrant::build(img, tl, depth + 1, options)?;
		let (tr, tr_depth) = Quadrant::build(img, tr, depth + 1, options)?;
		let (bl, bl_depth) = Quadrant::build(img, bl, depth + 1, options)?;
		let (br, br_depth) = Quadrant::build(img, br, depth + 1, options)?;
		node.children = Some(Box::new([tl, tr, bl, br]));
		let reached = tl_depth.max(tr_depth).max(bl_depth).max(br_depth);
		Ok((node, reached))
	}
}

/// Quadtree decomposition of a whole image.
///
/// Built once from a source image; read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadTree {
	root: Quadrant,
	width: u32,
	height: u32,
	max_depth: u32,
}

impl QuadTree {
	/// Analyzes `img` into a quadtree, splitting every region whose detail
	/// exceeds `options.detail_threshold` until `options.max_depth`.
	pub fn new(img: &RgbImage, options: &BuildOptions) -> Result<Self> {
		if img.width() == 0 || img.height() == 0 {
			return Err(Error::InvalidDimensions { width: img.width(), height: img.height() });
		}
		if !(options.detail_threshold >= 0.) {
			return Err(Error::InvalidInput(format!(
				"detail threshold must be non-negative, got {}", options.detail_threshold)));
		}

		let bbox = Rect::from_size(img.width(), img.height());
		let (root, max_depth) = Quadrant::build(img, bbox, 0, options)?;
		let tree = QuadTree { root, width: img.width(), height: img.height(), max_depth };
		log::debug!(
			"built quadtree over {}x{} image: {} nodes, {} leaves, depth {}",
			tree.width, tree.height, tree.node_count(), tree.leaves().len(), tree.max_depth
		);
		Ok(tree)
	}

	pub fn root(&self) -> &Quadrant {
		&self.root
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	/// Depth of the deepest leaf; the largest valid rendering depth.
	pub fn max_depth(&self) -> u32 {
		self.max_depth
	}

	pub fn node_count(&self) -> usize {
		self.root.node_count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::Rgb;

	/// 4x4 image with solid red, green, blue and black 2x2 quadrants.
	pub(crate) fn four_colors() -> RgbImage {
		RgbImage::from_fn(4, 4, |x, y| match (x < 2, y < 2) {
			(true, true) => Rgb([255, 0, 0]),
			(false, true) => Rgb([0, 255, 0]),
			(true, false) => Rgb([0, 0, 255]),
			(false, false) => Rgb([0, 0, 0]),
		})
	}

	#[test]
	fn quadrant_averages_region() {
		let img = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([10, 20, 31]) } else { Rgb([20, 40, 60]) });
		let q = Quadrant::new(&img, Rect::from_size(2, 1), 3).unwrap();
		assert_eq!(q.colour(), Rgb([15, 30, 45]));
		assert_eq!(q.depth(), 3);
		assert!(!q.is_leaf());
		assert!(q.children().is_none());
		assert!(q.detail() > 0.);
	}

	#[test]
	fn empty_quadrant_is_neutral() {
		let img = four_colors();
		let q = Quadrant::new(&img, Rect::new(2, 0, 2, 4), 1).unwrap();
		assert_eq!(q.colour(), Rgb([0, 0, 0]));
		assert_eq!(q.detail(), 0.);
	}

	#[test]
	fn quadrant_outside_image_is_rejected() {
		let img = four_colors();
		match Quadrant::new(&img, Rect::new(0, 0, 5, 4), 0) {
			Err(Error::InvalidRegion { width: 4, height: 4, .. }) => (),
			other => panic!("unexpected result {:?}", other),
		}
	}

	#[test]
	fn uniform_image_is_single_leaf() {
		let img = RgbImage::from_pixel(2, 2, Rgb([128, 128, 128]));
		let tree = QuadTree::new(&img, &BuildOptions { max_depth: 8, detail_threshold: 0. }).unwrap();
		assert!(tree.root().is_leaf());
		assert!(tree.root().children().is_none());
		assert_eq!(tree.root().colour(), Rgb([128, 128, 128]));
		assert_eq!(tree.max_depth(), 0);
		assert_eq!(tree.node_count(), 1);
	}

	#[test]
	fn four_color_image_splits_once() {
		let img = four_colors();
		let tree = QuadTree::new(&img, &BuildOptions { max_depth: 1, detail_threshold: 0. }).unwrap();
		assert_eq!(tree.max_depth(), 1);
		let children = tree.root().children().unwrap();
		let expected = [
			(Rect::new(0, 0, 2, 2), Rgb([255, 0, 0])),
			(Rect::new(2, 0, 4, 2), Rgb([0, 255, 0])),
			(Rect::new(0, 2, 2, 4), Rgb([0, 0, 255])),
			(Rect::new(2, 2, 4, 4), Rgb([0, 0, 0])),
		];
		for (child, (bbox, colour)) in children.iter().zip(expected.iter()) {
			assert_eq!(child.bbox(), *bbox);
			assert_eq!(child.colour(), *colour);
			assert_eq!(child.depth(), 1);
			assert_eq!(child.detail(), 0.);
			assert!(child.is_leaf());
		}
	}

	#[test]
	fn max_depth_caps_subdivision() {
		let img = RgbImage::from_fn(16, 16, |x, y| if (x + y) % 2 == 0 { Rgb([255; 3]) } else { Rgb([0; 3]) });
		let tree = QuadTree::new(&img, &BuildOptions { max_depth: 2, detail_threshold: 0. }).unwrap();
		assert_eq!(tree.max_depth(), 2);
		assert_eq!(tree.node_count(), 1 + 4 + 16);
	}

	#[test]
	fn empty_image_is_rejected() {
		let img = RgbImage::new(0, 3);
		match QuadTree::new(&img, &BuildOptions::default()) {
			Err(Error::InvalidDimensions { width: 0, height: 3 }) => (),
			other => panic!("unexpected result {:?}", other),
		}
	}

	#[test]
	fn negative_threshold_is_rejected() {
		let img = four_colors();
		let options = BuildOptions { detail_threshold: -1., ..Default::default() };
		assert!(matches!(QuadTree::new(&img, &options), Err(Error::InvalidInput(_))));
	}
}
