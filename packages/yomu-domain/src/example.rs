use serde::{Deserialize, Serialize};

/// One example sentence pair shown in a word's detail row.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct ExampleSentence {
	#[serde(alias = "jp")]
	pub source_text: String,
	#[serde(default, alias = "en")]
	pub translated_text: String,
}
