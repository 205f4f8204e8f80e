use crate::prelude::*;
use std::{
	fs::{File, OpenOptions},
	io::Write as IoWrite,
};

#[inline]
fn format_record(record: &log::Record) -> String {
	format!("[{}] [{}] {}", record.level(), record.module_path().unwrap_or("?"), record.args())
}

struct MsvLoggerFile {
	level: log::Level,
	file: Mutex<File>,
}
impl MsvLoggerFile {
	fn new(level: log::Level) -> Result<Self, MsvLogger> {
		match OpenOptions::new().append(true).create(true).open(std::env::temp_dir().join("msv.log")) {
			Ok(mut f) => {
				writeln!(
					f,
					"============ MSV LOG {} ============",
					std::time::SystemTime::now()
						.duration_since(std::time::SystemTime::UNIX_EPOCH)
						.map(|d| d.as_secs())
						.unwrap_or(0)
				)
				.ok();
				Ok(MsvLoggerFile { level, file: Mutex::new(f) })
			}
			Err(_) => Err(MsvLogger { level }),
		}
	}
}
impl log::Log for MsvLoggerFile {
	#[inline]
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		metadata.level() <= self.level
	}

	fn log(&self, record: &log::Record) {
		if !self.enabled(record.metadata()) {
			return;
		}

		let text = format_record(record);

		eprintln!("{text}");

		writeln!(&mut *self.file.lock(), "{text}").ok();
	}

	fn flush(&self) {
		self.file.lock().flush().ok();
	}
}

struct MsvLogger {
	level: log::Level,
}
impl log::Log for MsvLogger {
	#[inline]
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		metadata.level() <= self.level
	}

	fn log(&self, record: &log::Record) {
		if self.enabled(record.metadata()) {
			eprintln!("{}", format_record(record));
		}
	}

	fn flush(&self) {}
}

/// Logs go to stderr so stdout only carries the recognized board
pub fn init(verbose: bool, dump_logs: bool) {
	let level = if verbose { log::Level::Debug } else { log::Level::Info };
	log::set_max_level(level.to_level_filter());

	let logger: Box<dyn log::Log> = if dump_logs {
		match MsvLoggerFile::new(level).map(Box::new).map_err(Box::new) {
			Ok(logger) => logger,
			Err(logger) => logger,
		}
	} else {
		Box::new(MsvLogger { level })
	};
	log::set_logger(Box::leak(logger)).expect("Failed to initialize logger");
}

#[test]
fn test_format_record() {
	assert_eq!(
		format_record(
			&log::Record::builder()
				.args(format_args!("grid at {:?}", [1, 2]))
				.level(log::Level::Warn)
				.module_path(Some("msv::board"))
				.build()
		),
		"[WARN] [msv::board] grid at [1, 2]"
	);
}
