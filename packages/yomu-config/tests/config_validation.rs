use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use yomu_config::{DEFAULT_BULK_SAVE_CAP, DEFAULT_CREDENTIAL_ENV, DEFAULT_REMOTE_DEBOUNCE_MS, Error};

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
log_level = "info"

[browse]
remote_debounce_ms = 600
bulk_save_cap = 5000

[remote]
api_base = "http://127.0.0.1:8000/"
timeout_ms = 10000
credential_env = "YOMU_TOKEN"

[remote.default_headers]
"User-Agent" = "YomuBrowser/0.1"
"#;

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: &str) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("yomu_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn validation_message(payload: &str) -> String {
	let err = yomu_config::parse(payload).expect_err("Expected a validation error.");

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error: {err:?}");

	err.to_string()
}

#[test]
fn loads_sample_config_and_normalizes_api_base() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML);
	let result = yomu_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");
	let remote = cfg.remote.expect("Sample config has a remote section.");

	assert_eq!(remote.api_base, "http://127.0.0.1:8000");
	assert_eq!(cfg.browse.bulk_save_cap, 5_000);
	assert_eq!(cfg.browse.remote_debounce_ms, 600);
}

#[test]
fn browse_and_remote_defaults_apply() {
	let cfg = yomu_config::parse(
		r#"
[service]
log_level = "debug"

[remote]
api_base = "https://yomu.example"
"#,
	)
	.expect("Minimal config must load.");
	let remote = cfg.remote.expect("Remote section is present.");

	assert_eq!(cfg.browse.remote_debounce_ms, DEFAULT_REMOTE_DEBOUNCE_MS);
	assert_eq!(cfg.browse.bulk_save_cap, DEFAULT_BULK_SAVE_CAP);
	assert_eq!(remote.credential_env, DEFAULT_CREDENTIAL_ENV);
	assert!(remote.default_headers.is_empty());
}

#[test]
fn remote_section_is_optional() {
	let cfg = yomu_config::parse("[service]\nlog_level = \"info\"\n").expect("Config must load.");

	assert!(cfg.remote.is_none());
}

#[test]
fn zero_debounce_is_rejected() {
	let payload = sample_toml_with("browse", "remote_debounce_ms", Value::Integer(0));
	let message = validation_message(&payload);

	assert!(message.contains("browse.remote_debounce_ms"), "Unexpected error message: {message}");
}

#[test]
fn zero_bulk_cap_is_rejected() {
	let payload = sample_toml_with("browse", "bulk_save_cap", Value::Integer(0));
	let message = validation_message(&payload);

	assert!(message.contains("browse.bulk_save_cap"), "Unexpected error message: {message}");
}

#[test]
fn api_base_requires_http_scheme() {
	let payload =
		sample_toml_with("remote", "api_base", Value::String("ftp://yomu.example".to_string()));
	let message = validation_message(&payload);

	assert!(message.contains("http:// or https://"), "Unexpected error message: {message}");
}

#[test]
fn default_header_values_must_be_strings() {
	let mut headers = toml::Table::new();

	headers.insert("X-Retry".to_string(), Value::Integer(3));

	let payload = sample_toml_with("remote", "default_headers", Value::Table(headers));
	let message = validation_message(&payload);

	assert!(message.contains("X-Retry"), "Unexpected error message: {message}");
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("yomu_config_missing_file.toml");
	let err = yomu_config::load(&path).expect_err("Missing file must fail.");

	assert!(matches!(err, Error::ReadConfig { .. }));
	assert!(err.to_string().contains("yomu_config_missing_file.toml"));
}
