use crate::prelude::*;

const SETTINGS_PATH: &str = "settings.json";

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
	/// Horizontal start of the grid edge search, past the window frame
	pub edge_search_offset: u32,

	/// Time budget of a single analysis pass
	pub pass_timeout_ms: u64,

	/// Delay between two passes in `--watch` mode
	pub watch_interval_ms: u64,

	/// `[x, y, w, h]` of the game window on the screen, the whole display if unset
	pub capture_region: Option<[u32; 4]>,
}
impl Default for Settings {
	fn default() -> Self {
		Self {
			edge_search_offset: consts::EDGE_SEARCH_OFFSET,
			pass_timeout_ms: consts::PASS_TIMEOUT_MS,
			watch_interval_ms: 500,
			capture_region: None,
		}
	}
}
impl Settings {
	fn load() -> Self {
		Self::load_from(SETTINGS_PATH)
	}

	/// Missing or unreadable files fall back to the defaults
	pub fn load_from(path: impl AsRef<Path>) -> Self {
		let path = path.as_ref();
		let file = match std::fs::File::open(path) {
			Ok(file) => file,
			Err(_) => return Self::default(),
		};
		match serde_json::from_reader(std::io::BufReader::new(file)) {
			Ok(settings) => settings,
			Err(err) => {
				log::warn!("Ignoring {}: {err}", path.display());
				Self::default()
			}
		}
	}

	#[inline]
	pub fn pass_timeout(&self) -> Duration {
		Duration::from_millis(self.pass_timeout_ms)
	}

	#[inline]
	pub fn watch_interval(&self) -> Duration {
		Duration::from_millis(self.watch_interval_ms)
	}

	/// Options for one pass, cancelled by `shutdown` or after `pass_timeout_ms` of analysis
	pub fn pass_options(&self, shutdown: Arc<AtomicBool>) -> vision::PassOptions {
		vision::PassOptions {
			edge_search_offset: self.edge_search_offset,
			cancel: Cancellation::none().with_flag(shutdown).with_timeout(self.pass_timeout()),
		}
	}
}

lazy_static! {
	pub static ref SETTINGS: Settings = Settings::load();
}

#[test]
fn test_partial_settings() {
	let settings: Settings = serde_json::from_str(r#"{ "pass_timeout_ms": 50, "capture_region": [10, 20, 300, 200] }"#).unwrap();
	assert_eq!(settings.pass_timeout(), Duration::from_millis(50));
	assert_eq!(settings.capture_region, Some([10, 20, 300, 200]));
	assert_eq!(settings.edge_search_offset, consts::EDGE_SEARCH_OFFSET);
	assert_eq!(settings.watch_interval_ms, Settings::default().watch_interval_ms);
}

#[test]
fn test_missing_settings_file() {
	let settings = Settings::load_from(std::env::temp_dir().join("msv-settings-that-do-not-exist.json"));
	assert_eq!(settings, Settings::default());
}

#[test]
fn test_broken_settings_file() {
	let path = std::env::temp_dir().join(format!("msv-broken-settings-{}.json", std::process::id()));
	std::fs::write(&path, "{ not json").unwrap();
	assert_eq!(Settings::load_from(&path), Settings::default());
	std::fs::remove_file(&path).ok();
}

#[test]
fn test_pass_options() {
	let settings = Settings { edge_search_offset: 7, ..Default::default() };
	let shutdown = Arc::new(AtomicBool::new(false));

	let options = settings.pass_options(shutdown.clone());
	assert_eq!(options.edge_search_offset, 7);
	assert_eq!(options.cancel.check(), Ok(()));

	shutdown.store(true, Ordering::Release);
	assert_eq!(options.cancel.check(), Err(VisionError::Cancelled));
}
