use super::Color;

/// Luma weights for red, green and blue, so that brightness variation
/// counts for more than hue variation when deciding whether to split.
const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Per-channel 256-bin intensity histogram of a region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
	pub channels: [[u32; 256]; 3],
}

impl Default for Histogram {
	fn default() -> Self {
		Histogram { channels: [[0; 256]; 3] }
	}
}

impl Histogram {
	pub fn from_pixels<I: IntoIterator<Item = Color>>(pixels: I) -> Self {
		let mut hist = Histogram::default();
		for pix in pixels {
			hist.add(pix);
		}
		hist
	}

	pub fn add(&mut self, pix: Color) {
		for (channel, value) in self.channels.iter_mut().zip(pix.0.iter()) {
			channel[*value as usize] += 1;
		}
	}

	/// Luma-weighted sum of the per-channel standard deviations.
	///
	/// Zero for an empty or uniformly coloured region.
	pub fn detail(&self) -> f64 {
		self.channels.iter()
			.zip(LUMA_WEIGHTS.iter())
			.map(|(bins, weight)| channel_detail(bins) * weight)
			.sum()
	}
}

/// Standard deviation of the bin index, weighted by bin count.
fn channel_detail(bins: &[u32; 256]) -> f64 {
	let total: u64 = bins.iter().map(|&x| x as u64).sum();
	if total == 0 {
		return 0.;
	}
	let total = total as f64;
	let mean = bins.iter()
		.enumerate()
		.map(|(i, &x)| i as f64 * x as f64)
		.sum::<f64>() / total;
	let variance = bins.iter()
		.enumerate()
		.map(|(i, &x)| x as f64 * (mean - i as f64).powi(2))
		.sum::<f64>() / total;
	variance.sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::Rgb;

	#[test]
	fn empty_histogram_has_no_detail() {
		assert_eq!(Histogram::default().detail(), 0.);
	}

	#[test]
	fn uniform_region_has_no_detail() {
		let hist = Histogram::from_pixels(std::iter::repeat(Rgb([200, 17, 3])).take(50));
		assert_eq!(hist.detail(), 0.);
	}

	#[test]
	fn channel_detail_is_standard_deviation() {
		// Half at 0, half at 100: mean 50, deviation 50.
		let mut bins = [0; 256];
		bins[0] = 10;
		bins[100] = 10;
		assert!((channel_detail(&bins) - 50.).abs() < 1e-9);
	}

	#[test]
	fn channels_are_luma_weighted() {
		let red = Histogram::from_pixels(vec![Rgb([0, 0, 0]), Rgb([100, 0, 0])]);
		let green = Histogram::from_pixels(vec![Rgb([0, 0, 0]), Rgb([0, 100, 0])]);
		let blue = Histogram::from_pixels(vec![Rgb([0, 0, 0]), Rgb([0, 0, 100])]);
		assert!((red.detail() - 50. * 0.2989).abs() < 1e-9);
		assert!((green.detail() - 50. * 0.5870).abs() < 1e-9);
		assert!((blue.detail() - 50. * 0.1140).abs() < 1e-9);
		assert!(green.detail() > red.detail() && red.detail() > blue.detail());
	}
}
