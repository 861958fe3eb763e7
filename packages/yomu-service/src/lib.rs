pub mod browse;
pub mod examples;
pub mod http;
pub mod notify;
pub mod saved;

mod error;

pub use browse::{
	BrowseController, BrowseMode, ExportSnapshot, PageView, QueryEmission, QueryParams, RemotePage,
};
pub use error::{Error, Result};
pub use examples::{ExampleCache, FetchOutcome};
pub use http::{EnvCredentials, HttpCollaborators, UnsavedDictionaryWords};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use saved::{
	BulkKind, BulkOutcome, BulkPrepare, PendingBulkOp, SavedSetCollaborators, SavedSetController,
};

use std::{future::Future, pin::Pin};

use tokio::sync::mpsc::UnboundedSender;

use yomu_domain::ExampleSentence;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of the bearer credential. `None` means the session is signed out.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	fn bearer(&self) -> Option<String>;
}

/// Persistence for the signed-in user's word list.
pub trait SavedWordsBackend
where
	Self: Send + Sync,
{
	fn list_saved<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>>;

	fn save_word<'a>(&'a self, base: &'a str) -> BoxFuture<'a, Result<()>>;

	fn delete_word<'a>(&'a self, base: &'a str) -> BoxFuture<'a, Result<()>>;

	fn save_words<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>>;

	fn delete_words<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>>;
}

/// Supplies the full bulk-save list when rows are paginated remotely.
pub trait BulkCandidateSource
where
	Self: Send + Sync,
{
	fn fetch_unsaved<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>>>;
}

pub trait BulkSaveHandler
where
	Self: Send + Sync,
{
	fn save_all<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>>;
}

pub trait BulkDeleteHandler
where
	Self: Send + Sync,
{
	fn delete_all<'a>(&'a self, bases: &'a [String]) -> BoxFuture<'a, Result<()>>;
}

/// Server-side filtered, sorted and paginated word listing.
pub trait DictionarySource
where
	Self: Send + Sync,
{
	fn fetch_page<'a>(&'a self, params: &'a QueryParams) -> BoxFuture<'a, Result<RemotePage>>;
}

pub trait ExampleSource
where
	Self: Send + Sync,
{
	fn fetch_examples<'a>(&'a self, base: &'a str) -> BoxFuture<'a, Result<Vec<ExampleSentence>>>;
}

/// Receives the remote-mode parameter bundle whenever the browse state settles.
pub trait QuerySink
where
	Self: Send + Sync,
{
	fn emit(&self, emission: QueryEmission);
}

impl QuerySink for UnboundedSender<QueryEmission> {
	fn emit(&self, emission: QueryEmission) {
		if self.send(emission).is_err() {
			tracing::debug!("Query emission receiver dropped.");
		}
	}
}
