use serde::Deserialize;

use yomu_config::Remote;
use yomu_domain::Candidate;

use crate::{Error, Result, auth_headers, client, endpoint};

const DICTIONARY_PATH: &str = "/words/dictionary";

/// Query string understood by the dictionary endpoint. Pagination is offset based on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionaryQuery {
	pub skip: usize,
	pub limit: usize,
	pub search: Option<String>,
	pub level: Option<u8>,
	pub min_freq: Option<u32>,
	pub max_freq: Option<u32>,
	pub exclude_saved: bool,
	pub sort: String,
	pub order: String,
}
impl DictionaryQuery {
	/// Key/value pairs in wire order. Unset and zero-valued filters are left out, matching how the
	/// backend treats them as absent.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![("skip", self.skip.to_string()), ("limit", self.limit.to_string())];

		if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
			pairs.push(("search", search.to_string()));
		}
		if let Some(level) = self.level.filter(|level| *level > 0) {
			pairs.push(("level", level.to_string()));
		}
		if let Some(min) = self.min_freq.filter(|min| *min > 0) {
			pairs.push(("min_freq", min.to_string()));
		}
		if let Some(max) = self.max_freq.filter(|max| *max > 0) {
			pairs.push(("max_freq", max.to_string()));
		}
		if self.exclude_saved {
			pairs.push(("exclude_saved", "true".to_string()));
		}

		pairs.push(("sort", self.sort.clone()));
		pairs.push(("order", self.order.clone()));

		pairs
	}
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct DictionaryPage {
	pub items: Vec<Candidate>,
	pub total: usize,
}

pub async fn fetch_page(
	cfg: &Remote,
	token: Option<&str>,
	query: &DictionaryQuery,
) -> Result<DictionaryPage> {
	let res = client(cfg)?
		.get(endpoint(cfg, DICTIONARY_PATH))
		.headers(auth_headers(token, &cfg.default_headers)?)
		.query(&query.to_pairs())
		.send()
		.await?;
	let body: serde_json::Value = res.error_for_status()?.json().await?;

	parse_page(body)
}

fn parse_page(body: serde_json::Value) -> Result<DictionaryPage> {
	if !body.get("items").is_some_and(serde_json::Value::is_array) {
		return Err(Error::InvalidResponse {
			path: DICTIONARY_PATH,
			message: "missing items array.".to_string(),
		});
	}

	Ok(serde_json::from_value(body)?)
}
