//! HTTP calls against the Yomu word API.
//!
//! Every function builds its own client bounded by `Remote::timeout_ms`.

pub mod dictionary;
pub mod examples;
pub mod words;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

use yomu_config::Remote;

pub fn auth_headers(token: Option<&str>, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(token) = token {
		headers.insert(AUTHORIZATION, format!("Bearer {token}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::NonStringHeader { name: key.clone() });
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn client(cfg: &Remote) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}

pub(crate) fn endpoint(cfg: &Remote, path: &str) -> String {
	format!("{}{path}", cfg.api_base)
}

pub(crate) fn require_token<'a>(token: Option<&'a str>, path: &'static str) -> Result<&'a str> {
	token.filter(|token| !token.is_empty()).ok_or(Error::Unauthenticated { path })
}
