//! Reading source images and writing rendered stills and animations.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{Delay, DynamicImage, Frame, RgbImage};

use super::error::{Error, Result};

/// Opens an image in any format the `image` crate understands, as 8-bit RGB.
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
	let img = image::open(path.as_ref()).map_err(Error::Decode)?.to_rgb8();
	log::debug!("decoded {} ({}x{})", path.as_ref().display(), img.width(), img.height());
	Ok(img)
}

/// Scales both dimensions of `img` by `size_mult`; a factor of 1 returns
/// an unchanged copy.
pub fn prepare_source(img: &RgbImage, size_mult: u32) -> Result<RgbImage> {
	match size_mult {
		0 => Err(Error::InvalidInput("size multiplier must be at least 1".into())),
		1 => Ok(img.clone()),
		n => {
			let scaled = |d: u32| d.checked_mul(n).ok_or_else(|| Error::InvalidInput(
				format!("scaling {}x{} by {} overflows", img.width(), img.height(), n)));
			let (width, height) = (scaled(img.width())?, scaled(img.height())?);
			Ok(image::imageops::resize(img, width, height, FilterType::CatmullRom))
		}
	}
}

/// Writes a still image; the format follows the extension of `path`.
pub fn save_image<P: AsRef<Path>>(img: &RgbImage, path: P) -> Result<()> {
	log::debug!("writing {}", path.as_ref().display());
	img.save(path.as_ref()).map_err(Error::Encode)
}

/// Encodes `frames` as a GIF animation into `writer`.
///
/// `loop_count` is the number of plays; 0 loops forever.
pub fn write_animation<W: Write>(
	writer: W,
	frames: Vec<RgbImage>,
	frame_duration_ms: u32,
	loop_count: u16
) -> Result<()> {
	let (width, height) = match frames.first() {
		Some(f) => f.dimensions(),
		None => return Err(Error::InvalidInput("an animation needs at least one frame".into())),
	};
	if frames.iter().any(|f| f.dimensions() != (width, height)) {
		return Err(Error::InvalidInput("animation frames differ in size".into()));
	}

	let mut encoder = GifEncoder::new(writer);
	encoder.set_repeat(match loop_count {
		0 => Repeat::Infinite,
		n => Repeat::Finite(n),
	}).map_err(Error::Encode)?;
	log::debug!("encoding {} frames of {}x{}", frames.len(), width, height);
	let delay = Delay::from_numer_denom_ms(frame_duration_ms, 1);
	encoder.encode_frames(frames.into_iter().map(|f|
		Frame::from_parts(DynamicImage::ImageRgb8(f).to_rgba8(), 0, 0, delay)
	)).map_err(Error::Encode)
}

/// Writes `frames` as a GIF animation file at `path`.
pub fn save_animation<P: AsRef<Path>>(
	frames: Vec<RgbImage>,
	path: P,
	frame_duration_ms: u32,
	loop_count: u16
) -> Result<()> {
	let file = File::create(path.as_ref()).map_err(|e| Error::Encode(e.into()))?;
	write_animation(BufWriter::new(file), frames, frame_duration_ms, loop_count)
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::Rgb;

	#[test]
	fn unit_multiplier_keeps_image() {
		let img = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
		assert_eq!(prepare_source(&img, 1).unwrap(), img);
	}

	#[test]
	fn multiplier_scales_dimensions() {
		let img = RgbImage::from_pixel(3, 2, Rgb([50, 60, 70]));
		let scaled = prepare_source(&img, 3).unwrap();
		assert_eq!(scaled.dimensions(), (9, 6));
	}

	#[test]
	fn zero_multiplier_is_rejected() {
		let img = RgbImage::new(1, 1);
		assert!(matches!(prepare_source(&img, 0), Err(Error::InvalidInput(_))));
	}

	#[test]
	fn animation_needs_frames() {
		let res = write_animation(Vec::new(), Vec::new(), 100, 0);
		assert!(matches!(res, Err(Error::InvalidInput(_))));
	}

	#[test]
	fn animation_frames_must_match() {
		let frames = vec![RgbImage::new(2, 2), RgbImage::new(3, 2)];
		let res = write_animation(Vec::new(), frames, 100, 0);
		assert!(matches!(res, Err(Error::InvalidInput(_))));
	}

	#[test]
	fn missing_file_is_decode_error() {
		assert!(matches!(load_source("does/not/exist.png"), Err(Error::Decode(_))));
	}
}
