use serde::Deserialize;

/// Provenance recorded when a word was saved from an episode.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct EpisodeContext {
	#[serde(alias = "anime_title")]
	pub series_title: String,
	#[serde(default, alias = "episode")]
	pub episode_number: Option<u32>,
	#[serde(default)]
	pub sentence: Option<String>,
	#[serde(default)]
	pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextSource {
	Episode(EpisodeContext),
	Text(String),
}

/// Decodes a row's opaque context string. Anything that is not a well-formed episode object is
/// kept as plain text.
pub fn parse_context(raw: &str) -> ContextSource {
	let trimmed = raw.trim_start();

	if !trimmed.starts_with('{') {
		return ContextSource::Text(raw.to_string());
	}

	match serde_json::from_str::<EpisodeContext>(trimmed) {
		Ok(episode) => ContextSource::Episode(episode),
		Err(_) => ContextSource::Text(raw.to_string()),
	}
}
