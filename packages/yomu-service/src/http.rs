//! Collaborators backed by the word API over HTTP.

use std::{env, sync::Arc};

use yomu_config::Remote;
use yomu_domain::ExampleSentence;
use yomu_providers::{
	dictionary::{self, DictionaryQuery},
	examples, words,
};

use crate::{
	BoxFuture, BulkCandidateSource, BulkDeleteHandler, CredentialStore, DictionarySource,
	ExampleSource, Result, SavedWordsBackend,
	browse::{QueryParams, RemotePage},
};

/// Reads the bearer token from an environment variable. Empty values count as signed out.
pub struct EnvCredentials {
	var: String,
}
impl EnvCredentials {
	pub fn new(var: impl Into<String>) -> Self {
		Self { var: var.into() }
	}

	pub fn from_config(cfg: &Remote) -> Self {
		Self::new(cfg.credential_env.clone())
	}
}
impl CredentialStore for EnvCredentials {
	fn bearer(&self) -> Option<String> {
		env::var(&self.var).ok().map(|token| token.trim().to_string()).filter(|t| !t.is_empty())
	}
}

#[derive(Clone)]
pub struct HttpCollaborators {
	cfg: Remote,
	token: Option<String>,
}
impl HttpCollaborators {
	pub fn new(cfg: Remote, credentials: &dyn CredentialStore) -> Self {
		Self { cfg, token: credentials.bearer() }
	}

	pub fn is_signed_in(&self) -> bool {
		self.token.is_some()
	}

	async fn save_all(&self, bases: &[String]) -> Result<()> {
		let reply = words::save_words(&self.cfg, self.token.as_deref(), bases).await?;

		tracing::info!(requested = bases.len(), saved = reply.saved_count, "Bulk save accepted.");

		Ok(())
	}
}
impl SavedWordsBackend for HttpCollaborators {
	fn list_saved<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move { Ok(words::list_saved(&self.cfg, self.token.as_deref()).await?) })
	}

	fn save_word<'a>(&'a self, base: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(words::save_word(&self.cfg, self.token.as_deref(), base).await?) })
	}

	fn delete_word<'a>(&'a self, base: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(
			async move { Ok(words::remove_word(&self.cfg, self.token.as_deref(), base).await?) },
		)
	}

	fn save_words<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>> {
		Box::pin(self.save_all(bases))
	}

	fn delete_words<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>> {
		Box::pin(
			async move { Ok(words::remove_words(&self.cfg, self.token.as_deref(), bases).await?) },
		)
	}
}
impl BulkDeleteHandler for HttpCollaborators {
	fn delete_all<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>> {
		self.delete_words(bases)
	}
}
impl DictionarySource for HttpCollaborators {
	fn fetch_page<'a>(&'a self, params: &'a QueryParams) -> BoxFuture<'a, Result<RemotePage>> {
		Box::pin(async move {
			let page =
				dictionary::fetch_page(&self.cfg, self.token.as_deref(), &dictionary_query(params))
					.await?;

			Ok(RemotePage { items: page.items, total: page.total })
		})
	}
}
impl ExampleSource for HttpCollaborators {
	fn fetch_examples<'a>(&'a self, base: &'a str) -> BoxFuture<'a, Result<Vec<ExampleSentence>>> {
		Box::pin(async move { Ok(examples::fetch_examples(&self.cfg, base).await?) })
	}
}

/// The full unsaved listing for the current filters, used as the bulk-save list when rows are
/// paginated on the server.
pub struct UnsavedDictionaryWords {
	http: Arc<HttpCollaborators>,
	params: QueryParams,
	cap: usize,
}
impl UnsavedDictionaryWords {
	pub fn new(http: Arc<HttpCollaborators>, params: QueryParams, cap: usize) -> Self {
		Self { http, params, cap }
	}
}
impl BulkCandidateSource for UnsavedDictionaryWords {
	fn fetch_unsaved<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(async move {
			let mut query = dictionary_query(&self.params);

			query.skip = 0;
			// One more than the cap so truncation stays observable.
			query.limit = self.cap.saturating_add(1);
			query.exclude_saved = true;

			let page =
				dictionary::fetch_page(&self.http.cfg, self.http.token.as_deref(), &query).await?;

			Ok(page.items.into_iter().map(|candidate| candidate.base).collect())
		})
	}
}

/// Maps page-numbered browse parameters onto the offset-based dictionary query.
pub fn dictionary_query(params: &QueryParams) -> DictionaryQuery {
	let page_size = params.page_size.max(1);

	DictionaryQuery {
		skip: params.page.saturating_sub(1).saturating_mul(page_size),
		limit: page_size,
		search: Some(params.search.clone()).filter(|search| !search.trim().is_empty()),
		level: params.level,
		min_freq: params.min_frequency,
		max_freq: params.max_frequency,
		exclude_saved: params.hide_saved,
		sort: params.sort_by.as_str().to_string(),
		order: params.sort_order.as_str().to_string(),
	}
}
