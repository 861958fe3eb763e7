use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_REMOTE_DEBOUNCE_MS: u64 = 600;
pub const DEFAULT_BULK_SAVE_CAP: usize = 5_000;
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CREDENTIAL_ENV: &str = "YOMU_TOKEN";

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub browse: Browse,
	pub remote: Option<Remote>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Browse {
	/// Quiet period before a remote-mode state change is emitted to the fetcher.
	pub remote_debounce_ms: u64,
	/// Hard limit on the number of words a single bulk save may confirm.
	pub bulk_save_cap: usize,
}
impl Default for Browse {
	fn default() -> Self {
		Self { remote_debounce_ms: DEFAULT_REMOTE_DEBOUNCE_MS, bulk_save_cap: DEFAULT_BULK_SAVE_CAP }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Remote {
	pub api_base: String,
	#[serde(default = "default_remote_timeout_ms")]
	pub timeout_ms: u64,
	/// Environment variable holding the bearer credential. Absent or empty means logged out.
	#[serde(default = "default_credential_env")]
	pub credential_env: String,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

fn default_remote_timeout_ms() -> u64 {
	DEFAULT_REMOTE_TIMEOUT_MS
}

fn default_credential_env() -> String {
	DEFAULT_CREDENTIAL_ENV.to_string()
}
