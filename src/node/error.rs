use image::ImageError;
use thiserror::Error;

use super::rect::Rect;

/// Reason why a quadtree couldn't be built, rendered, or written out.
#[derive(Error, Debug)]
pub enum Error {
	/// The source image has a zero dimension.
	#[error("invalid image dimensions: {width}x{height}")]
	InvalidDimensions { width: u32, height: u32 },

	/// A region lies (partly) outside the image it is cropped from.
	#[error("region {rect:?} does not fit in a {width}x{height} image")]
	InvalidRegion { rect: Rect, width: u32, height: u32 },

	/// Some other argument is unusable (zero scale factor, negative
	/// threshold, mismatched animation frames...).
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A rendering depth deeper than any leaf of the tree was requested.
	#[error("depth {requested} is larger than the tree's depth {max}")]
	DepthOutOfRange { requested: u32, max: u32 },

	/// The source image could not be read.
	#[error("could not decode image: {0}")]
	Decode(#[source] ImageError),

	/// The output could not be written.
	#[error("could not encode image: {0}")]
	Encode(#[source] ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
