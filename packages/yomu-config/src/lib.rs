mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Browse, Config, DEFAULT_BULK_SAVE_CAP, DEFAULT_CREDENTIAL_ENV, DEFAULT_REMOTE_DEBOUNCE_MS,
	DEFAULT_REMOTE_TIMEOUT_MS, Remote, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } => {
			Error::ParseConfig { path: path.to_path_buf(), source }
		},
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::validation("service.log_level", "must be non-empty."));
	}
	if cfg.browse.remote_debounce_ms == 0 {
		return Err(Error::validation("browse.remote_debounce_ms", "must be greater than zero."));
	}
	if cfg.browse.bulk_save_cap == 0 {
		return Err(Error::validation("browse.bulk_save_cap", "must be greater than zero."));
	}

	let Some(remote) = cfg.remote.as_ref() else {
		return Ok(());
	};

	if remote.api_base.is_empty() {
		return Err(Error::validation("remote.api_base", "must be non-empty."));
	}
	if !(remote.api_base.starts_with("http://") || remote.api_base.starts_with("https://")) {
		return Err(Error::validation("remote.api_base", "must start with http:// or https://."));
	}
	if remote.timeout_ms == 0 {
		return Err(Error::validation("remote.timeout_ms", "must be greater than zero."));
	}
	if remote.credential_env.is_empty() {
		return Err(Error::validation("remote.credential_env", "must be non-empty."));
	}

	for (key, value) in &remote.default_headers {
		if !value.is_string() {
			return Err(Error::validation(
				"remote.default_headers",
				format!("value for {key} must be a string."),
			));
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if let Some(remote) = cfg.remote.as_mut() {
		remote.api_base = remote.api_base.trim().trim_end_matches('/').to_string();
		remote.credential_env = remote.credential_env.trim().to_string();
	}
}
