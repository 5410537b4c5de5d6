use image::error::ImageError;

use quadtree_render::{AnimationOptions, BuildOptions, Error, QuadTree};

use std::str::FromStr;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Parses an optional numeric argument, exiting with status 2 if it is malformed.
fn numeric_arg<T: FromStr>(matches: &clap::ArgMatches, name: &str, default: T) -> T {
	match matches.value_of(name) {
		None => default,
		Some(s) => match s.parse() {
			Ok(n) => n,
			Err(_) => error_exit(&format!("Non-numeric value for {}", name), 2)
		}
	}
}

/// Maps a library error onto a message and exit status.
fn report(e: Error) -> ! {
	let code = match &e {
		Error::InvalidDimensions { .. } | Error::InvalidRegion { .. } => 4,
		Error::InvalidInput(_) | Error::DepthOutOfRange { .. } => 2,
		Error::Decode(ImageError::IoError(_)) | Error::Encode(ImageError::IoError(_)) => 3,
		Error::Decode(ImageError::Decoding(_)) |
		Error::Decode(ImageError::Unsupported(_)) => 4,
		Error::Decode(ImageError::Limits(_)) | Error::Encode(ImageError::Limits(_)) => 5,
		Error::Encode(_) => 3,
		_ => 10
	};
	error_exit(&e.to_string(), code)
}

/// `clap`-based CLI for rendering quadtree decompositions of images.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	env_logger::init();

	let clap_matches = clap::App::new("quadtree_render")
		.version("0.1.0")
		.author("vkcz")
		.about("Splits an image into a quadtree of uniform regions and renders it back.")
		.arg_from_usage("-d, --depth=[N] 'Depth to render at; defaults to the depth of the tree'")
		.arg_from_usage("-l, --lines 'Draw a black border around every region'")
		.arg_from_usage("-m, --max-depth=[N] 'Maximum subdivision depth; defaults to 8'")
		.arg_from_usage("-t, --threshold=[N] 'Detail above which a region is split; defaults to 13'")
		.arg_from_usage("-s, --size-mult=[N] 'Integer factor to scale the input by first; defaults to 1'")
		.arg_from_usage("-g, --gif=[PATH] 'Also write an animation of the refinement to PATH'")
		.arg_from_usage("--duration=[MS] 'Milliseconds per animation frame; defaults to 1000'")
		.arg_from_usage("--loop=[N] 'Number of animation plays, 0 for forever; defaults to 0'")
		.arg_from_usage("<INPUT> 'Path to input image'")
		.arg_from_usage("[OUTPUT] 'Path to output image; defaults to INPUT with a _quadtree.png suffix'")
		.get_matches();

	let defaults = BuildOptions::default();
	let options = BuildOptions {
		max_depth: numeric_arg(&clap_matches, "max-depth", defaults.max_depth),
		detail_threshold: numeric_arg(&clap_matches, "threshold", defaults.detail_threshold),
	};
	let size_mult = numeric_arg(&clap_matches, "size-mult", quadtree_render::SIZE_MULT);
	let show_lines = clap_matches.is_present("lines");

	let input_path = clap_matches.value_of("INPUT").unwrap();
	let source = quadtree_render::load_source(input_path)
		.and_then(|img| quadtree_render::prepare_source(&img, size_mult))
		.unwrap_or_else(|e| report(e));

	log::info!("building quadtree for {}x{} image", source.width(), source.height());
	let tree = QuadTree::new(&source, &options).unwrap_or_else(|e| report(e));
	log::info!("tree reached depth {} with {} leaves", tree.max_depth(), tree.leaves().len());

	let depth = numeric_arg(&clap_matches, "depth", tree.max_depth());
	let output = tree.render(depth, show_lines).unwrap_or_else(|e| report(e));
	let output_path = clap_matches.value_of("OUTPUT").map(String::from)
		.unwrap_or_else(|| input_path.rsplitn(2, '.').last().unwrap().to_string() + "_quadtree.png");
	quadtree_render::save_image(&output, &output_path).unwrap_or_else(|e| report(e));
	log::info!("wrote depth {} rendering to {}", depth, output_path);

	if let Some(gif_path) = clap_matches.value_of("gif") {
		let anim = AnimationOptions {
			frame_duration_ms: numeric_arg(&clap_matches, "duration", quadtree_render::DEFAULT_FRAME_DURATION_MS),
			loop_count: numeric_arg(&clap_matches, "loop", quadtree_render::DEFAULT_LOOP_COUNT),
			show_lines,
			..Default::default()
		};
		let frames = tree.animation_frames(&anim).unwrap_or_else(|e| report(e));
		log::info!("writing {} animation frames to {}", frames.len(), gif_path);
		quadtree_render::save_animation(frames, gif_path, anim.frame_duration_ms, anim.loop_count)
			.unwrap_or_else(|e| report(e));
	}
}
