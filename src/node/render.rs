use image::{Rgb, RgbImage};

use super::error::Result;
use super::rect::Rect;
use super::{Color, QuadTree};

/// Number of times the finished image is repeated at the end of an
/// animation, as a pause before it loops.
pub const FINAL_FRAME_REPEATS: usize = 4;
/// Default display time of each animation frame.
pub const DEFAULT_FRAME_DURATION_MS: u32 = 1000;
/// Default animation loop count; 0 loops forever.
pub const DEFAULT_LOOP_COUNT: u16 = 0;

const OUTLINE: Color = Rgb([0, 0, 0]);

/// Settings for `QuadTree::animation_frames` and the animation encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationOptions {
	pub frame_duration_ms: u32,
	/// How many times to play the animation; 0 means forever.
	pub loop_count: u16,
	pub show_lines: bool,
	pub final_frame_repeats: usize,
}

impl Default for AnimationOptions {
	fn default() -> Self {
		AnimationOptions {
			frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
			loop_count: DEFAULT_LOOP_COUNT,
			show_lines: false,
			final_frame_repeats: FINAL_FRAME_REPEATS,
		}
	}
}

fn fill(img: &mut RgbImage, bbox: Rect, color: Color) {
	if bbox.is_empty() {
		return;
	}
	image::imageops::replace(
		img,
		&RgbImage::from_pixel(bbox.width(), bbox.height(), color),
		bbox.left as i64,
		bbox.top as i64,
	);
}

/// Draws a one pixel border along the inside edge of `bbox`.
fn outline(img: &mut RgbImage, bbox: Rect) {
	if bbox.is_empty() {
		return;
	}
	let (last_x, last_y) = (bbox.right - 1, bbox.bottom - 1);
	for x in bbox.left..bbox.right {
		img.put_pixel(x, bbox.top, OUTLINE);
		img.put_pixel(x, last_y, OUTLINE);
	}
	for y in bbox.top..bbox.bottom {
		img.put_pixel(bbox.left, y, OUTLINE);
		img.put_pixel(last_x, y, OUTLINE);
	}
}

impl QuadTree {
	/// Paints the regions at rendering depth `depth` with their average
	/// colors onto a fresh black image the size of the source.
	///
	/// With `show_lines`, each region also gets a black border.
	pub fn render(&self, depth: u32, show_lines: bool) -> Result<RgbImage> {
		let quadrants = self.quadrants_at(depth)?;
		let mut img = RgbImage::from_pixel(self.width(), self.height(), Rgb([0, 0, 0]));
		for quadrant in quadrants {
			fill(&mut img, quadrant.bbox(), quadrant.colour());
			if show_lines {
				outline(&mut img, quadrant.bbox());
			}
		}
		Ok(img)
	}

	/// Renders every depth from the root down to `max_depth() - 1`,
	/// followed by the full-depth image `options.final_frame_repeats` times.
	pub fn animation_frames(&self, options: &AnimationOptions) -> Result<Vec<RgbImage>> {
		let mut frames = (0..self.max_depth())
			.map(|depth| self.render(depth, options.show_lines))
			.collect::<Result<Vec<_>>>()?;
		let last = self.render(self.max_depth(), options.show_lines)?;
		frames.extend(std::iter::repeat(last).take(options.final_frame_repeats));
		Ok(frames)
	}
}
