use serde::Deserialize;
use serde_json::json;

use yomu_config::Remote;

use crate::{Result, auth_headers, client, endpoint, require_token};

const LIST_PATH: &str = "/words/list";
const SAVE_PATH: &str = "/words/save";
const REMOVE_PATH: &str = "/words/remove";
const SAVE_BULK_PATH: &str = "/words/save/bulk";
const REMOVE_BULK_PATH: &str = "/words/remove/bulk";

#[derive(Debug, Deserialize)]
pub struct BulkSaveReply {
	#[serde(default)]
	pub saved_count: usize,
	#[serde(default)]
	pub message: String,
}

/// Every word the signed-in user has saved, as plain base forms.
pub async fn list_saved(cfg: &Remote, token: Option<&str>) -> Result<Vec<String>> {
	let token = require_token(token, LIST_PATH)?;
	let res = client(cfg)?
		.get(endpoint(cfg, LIST_PATH))
		.headers(auth_headers(Some(token), &cfg.default_headers)?)
		.send()
		.await?;

	Ok(res.error_for_status()?.json().await?)
}

pub async fn save_word(cfg: &Remote, token: Option<&str>, word: &str) -> Result<()> {
	let token = require_token(token, SAVE_PATH)?;

	client(cfg)?
		.post(endpoint(cfg, SAVE_PATH))
		.headers(auth_headers(Some(token), &cfg.default_headers)?)
		.json(&json!({ "word": word }))
		.send()
		.await?
		.error_for_status()?;

	Ok(())
}

pub async fn remove_word(cfg: &Remote, token: Option<&str>, word: &str) -> Result<()> {
	let token = require_token(token, REMOVE_PATH)?;

	client(cfg)?
		.delete(endpoint(cfg, REMOVE_PATH))
		.headers(auth_headers(Some(token), &cfg.default_headers)?)
		.json(&json!({ "word": word }))
		.send()
		.await?
		.error_for_status()?;

	Ok(())
}

pub async fn save_words(cfg: &Remote, token: Option<&str>, words: &[String]) -> Result<BulkSaveReply> {
	let token = require_token(token, SAVE_BULK_PATH)?;
	let res = client(cfg)?
		.post(endpoint(cfg, SAVE_BULK_PATH))
		.headers(auth_headers(Some(token), &cfg.default_headers)?)
		.json(&json!({ "words": words }))
		.send()
		.await?;

	Ok(res.error_for_status()?.json().await?)
}

pub async fn remove_words(cfg: &Remote, token: Option<&str>, words: &[String]) -> Result<()> {
	let token = require_token(token, REMOVE_BULK_PATH)?;

	client(cfg)?
		.post(endpoint(cfg, REMOVE_BULK_PATH))
		.headers(auth_headers(Some(token), &cfg.default_headers)?)
		.json(&json!({ "words": words }))
		.send()
		.await?
		.error_for_status()?;

	Ok(())
}
