#[macro_use]
extern crate lazy_static;

mod board;
mod capture;
mod logs;
mod settings;

use prelude::*;
mod prelude {
	pub(crate) use crate::settings::SETTINGS;
	pub(crate) use msv_vision_common::{consts, prelude::*};
	pub(crate) use msv_vision_cpu as vision;
}

use board::{Refresh, ScreenBoard};

const USAGE: &str = "\
usage: msv [--watch] [--verbose] [--dumplogs] <screenshot>
       msv --screen [--watch] [--verbose] [--dumplogs]";

#[derive(Debug, PartialEq, Eq)]
enum Source {
	File(PathBuf),
	#[cfg(feature = "screen")]
	Screen,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
enum ArgsError {
	#[error("unknown flag {0}")]
	UnknownFlag(String),

	#[error("expected a single screenshot path or --screen")]
	NoSource,

	#[cfg(not(feature = "screen"))]
	#[error("screen capture is not available in this build (enable the `screen` feature)")]
	ScreenUnsupported,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
	source: Source,
	watch: bool,
	verbose: bool,
	dump_logs: bool,
}
impl Args {
	fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
		let (mut watch, mut verbose, mut dump_logs, mut screen) = (false, false, false, false);
		let mut path = None;

		for arg in args {
			match arg.as_str() {
				"--watch" => watch = true,
				"--verbose" => verbose = true,
				"--dumplogs" => dump_logs = true,
				"--screen" => screen = true,
				flag if flag.starts_with("--") => return Err(ArgsError::UnknownFlag(flag.to_string())),
				file if path.is_none() => path = Some(PathBuf::from(file)),
				_ => return Err(ArgsError::NoSource),
			}
		}

		let source = match (path, screen) {
			(Some(path), false) => Source::File(path),

			#[cfg(feature = "screen")]
			(None, true) => Source::Screen,

			#[cfg(not(feature = "screen"))]
			(None, true) => return Err(ArgsError::ScreenUnsupported),

			_ => return Err(ArgsError::NoSource),
		};

		Ok(Args {
			source,
			watch,
			verbose,
			dump_logs,
		})
	}
}

static SHUTDOWN_COUNT: std::sync::atomic::AtomicU8 = std::sync::atomic::AtomicU8::new(0);

fn main() {
	let args = match Args::parse(std::env::args().skip(1)) {
		Ok(args) => args,
		Err(err) => {
			eprintln!("{err}\n\n{USAGE}");
			std::process::exit(2);
		}
	};

	logs::init(args.verbose, args.dump_logs);

	if let Err(err) = run(args) {
		log::error!("{err:#}");
		std::process::exit(1);
	}
}

fn run(args: Args) -> Result<(), AnyError> {
	let shutdown = Arc::new(AtomicBool::new(false));
	{
		let shutdown = shutdown.clone();
		let handler = move || {
			if SHUTDOWN_COUNT.fetch_add(1, Ordering::SeqCst) >= 2 {
				log::info!("forcing shutdown");
				std::process::exit(1);
			}
			log::info!("shutting down...");
			shutdown.store(true, Ordering::Release);
		};
		if ctrlc::set_handler(handler).is_err() {
			log::error!("Failed to set CTRL+C handler, shutting down might not work");
		}
	}

	let source: Box<dyn Capture> = match args.source {
		Source::File(path) => Box::new(capture::FileCapture::new(path)),

		#[cfg(feature = "screen")]
		Source::Screen => Box::new(capture::ScreenCapture::new(SETTINGS.capture_region)?),
	};

	let mut board = ScreenBoard::new(source);
	loop {
		match board.refresh(&SETTINGS.pass_options(shutdown.clone())) {
			Ok(Refresh::Updated) => {
				log::info!("{:?}", board.board());
				println!("{}", board.board());
			}

			Ok(Refresh::Unchanged) => {}

			Err(VisionError::Cancelled) => break,

			// The window may just be covered or minimized right now
			Err(err) if args.watch => log::warn!("{err}"),

			Err(err) => return Err(err.into()),
		}

		if !args.watch || shutdown.load(Ordering::Acquire) {
			break;
		}

		std::thread::sleep(SETTINGS.watch_interval());

		if shutdown.load(Ordering::Acquire) {
			break;
		}
	}

	Ok(())
}

#[cfg(test)]
fn args(args: &[&str]) -> Result<Args, ArgsError> {
	Args::parse(args.iter().map(|arg| arg.to_string()))
}

#[test]
fn test_parse_args() {
	assert_eq!(
		args(&["--verbose", "board.png"]),
		Ok(Args {
			source: Source::File(PathBuf::from("board.png")),
			watch: false,
			verbose: true,
			dump_logs: false,
		})
	);

	let parsed = args(&["--dumplogs", "shot.bmp", "--watch"]).unwrap();
	assert!(parsed.watch && parsed.dump_logs && !parsed.verbose);

	assert_eq!(args(&[]), Err(ArgsError::NoSource));
	assert_eq!(args(&["a.png", "b.png"]), Err(ArgsError::NoSource));
	assert_eq!(args(&["--fast", "a.png"]), Err(ArgsError::UnknownFlag("--fast".to_string())));
	assert_eq!(args(&["--screen", "a.png"]), Err(ArgsError::NoSource));
}

#[cfg(not(feature = "screen"))]
#[test]
fn test_screen_without_feature() {
	assert_eq!(args(&["--screen"]), Err(ArgsError::ScreenUnsupported));
}

#[cfg(feature = "screen")]
#[test]
fn test_screen_source() {
	assert_eq!(args(&["--screen", "--watch"]).map(|args| args.source), Ok(Source::Screen));
}
