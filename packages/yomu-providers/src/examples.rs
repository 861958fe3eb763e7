use serde::Deserialize;

use yomu_config::Remote;
use yomu_domain::ExampleSentence;

use crate::{Result, auth_headers, client, endpoint};

const EXAMPLES_PATH: &str = "/words/examples";

#[derive(Debug, Deserialize)]
struct ExamplesReply {
	#[serde(default)]
	sentences: Vec<ExampleSentence>,
}

/// Example sentences for `word`, possibly empty.
pub async fn fetch_examples(cfg: &Remote, word: &str) -> Result<Vec<ExampleSentence>> {
	let res = client(cfg)?
		.get(endpoint(cfg, EXAMPLES_PATH))
		.headers(auth_headers(None, &cfg.default_headers)?)
		.query(&[("word", word)])
		.send()
		.await?;
	let reply: ExamplesReply = res.error_for_status()?.json().await?;

	Ok(reply.sentences)
}

#[cfg(test)]
mod tests {
	use crate::examples::ExamplesReply;

	#[test]
	fn decodes_sentence_pairs() {
		let reply: ExamplesReply = serde_json::from_value(serde_json::json!({
			"sentences": [{ "jp": "猫が好きです。", "en": "I like cats." }]
		}))
		.expect("Failed to decode reply.");

		assert_eq!(reply.sentences[0].source_text, "猫が好きです。");
		assert_eq!(reply.sentences[0].translated_text, "I like cats.");
	}

	#[test]
	fn missing_sentences_is_an_empty_result() {
		let reply: ExamplesReply =
			serde_json::from_value(serde_json::json!({})).expect("Failed to decode reply.");

		assert!(reply.sentences.is_empty());
	}
}
