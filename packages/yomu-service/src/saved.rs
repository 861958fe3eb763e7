//! The signed-in user's saved-word membership cache and its mutation protocol.
//!
//! Single saves are applied locally first and persisted in the background without rollback.
//! Bulk saves and deletes are two-phase: `prepare_*` builds the list and opens a confirmation,
//! `execute_*` runs it, and both phases always leave the confirmation closed afterwards.

use std::{collections::HashSet, sync::Arc};

use tokio::{runtime::Handle, task::JoinHandle};

use yomu_config::DEFAULT_BULK_SAVE_CAP;

use crate::{
	BulkCandidateSource, BulkDeleteHandler, BulkSaveHandler, CredentialStore, Result,
	SavedWordsBackend,
	notify::{Notice, Notifier},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkKind {
	Save,
	Delete,
}

/// A bulk operation waiting for the user's confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingBulkOp {
	kind: BulkKind,
	items: Vec<String>,
	cap: Option<usize>,
	truncated: bool,
}
impl PendingBulkOp {
	pub fn kind(&self) -> BulkKind {
		self.kind
	}

	pub fn items(&self) -> &[String] {
		&self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// True when more words were eligible than the cap allowed.
	pub fn is_truncated(&self) -> bool {
		self.truncated
	}

	/// Whether the list sits exactly at the bulk-save limit.
	pub fn at_cap(&self) -> bool {
		self.cap.is_some_and(|cap| self.items.len() == cap)
	}

	pub fn confirmation_message(&self) -> String {
		let count = self.items.len();

		match self.kind {
			BulkKind::Save if self.at_cap() => format!(
				"Save {count} words to your list? The list was truncated to the {count}-word limit."
			),
			BulkKind::Save => format!("Save {count} words to your list?"),
			BulkKind::Delete => format!("Remove {count} words from your list?"),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkPrepare {
	/// A confirmation is now open.
	AwaitingConfirmation { count: usize, truncated: bool },
	NothingToDo,
	Failed,
	SignedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulkOutcome {
	Completed { count: usize },
	Failed,
	NotPending,
	SignedOut,
}

#[derive(Clone)]
pub struct SavedSetCollaborators {
	pub backend: Arc<dyn SavedWordsBackend>,
	/// Remote-mode source of the authoritative bulk-save list.
	pub bulk_candidates: Option<Arc<dyn BulkCandidateSource>>,
	/// Replaces the backend's batch save when present.
	pub bulk_save: Option<Arc<dyn BulkSaveHandler>>,
	pub bulk_delete: Option<Arc<dyn BulkDeleteHandler>>,
}
impl SavedSetCollaborators {
	pub fn new(backend: Arc<dyn SavedWordsBackend>) -> Self {
		Self { backend, bulk_candidates: None, bulk_save: None, bulk_delete: None }
	}

	pub fn with_bulk_candidates(mut self, source: Arc<dyn BulkCandidateSource>) -> Self {
		self.bulk_candidates = Some(source);

		self
	}

	pub fn with_bulk_save(mut self, handler: Arc<dyn BulkSaveHandler>) -> Self {
		self.bulk_save = Some(handler);

		self
	}

	pub fn with_bulk_delete(mut self, handler: Arc<dyn BulkDeleteHandler>) -> Self {
		self.bulk_delete = Some(handler);

		self
	}
}

pub struct SavedSetController {
	saved: HashSet<String>,
	signed_in: bool,
	collaborators: SavedSetCollaborators,
	notifier: Arc<dyn Notifier>,
	bulk_save_cap: usize,
	pending_save: Option<PendingBulkOp>,
	pending_delete: Option<PendingBulkOp>,
}
impl SavedSetController {
	/// Seeds the set from the backend when a credential exists. A failed listing is reported and
	/// leaves the session signed in with an empty set.
	pub async fn init(
		credentials: &dyn CredentialStore,
		collaborators: SavedSetCollaborators,
		notifier: Arc<dyn Notifier>,
	) -> Self {
		let mut controller = Self::signed_out(collaborators, notifier);

		if credentials.bearer().is_none() {
			tracing::debug!("No credential; saved words stay disabled.");

			return controller;
		}

		controller.signed_in = true;

		match controller.collaborators.backend.list_saved().await {
			Ok(bases) => {
				tracing::debug!(count = bases.len(), "Loaded saved words.");

				controller.saved = bases.into_iter().collect();
			},
			Err(err) => {
				tracing::warn!(error = %err, "Failed to load saved words.");

				controller.notifier.notify(Notice::error("Failed to load your saved words."));
			},
		}

		controller
	}

	pub fn signed_out(collaborators: SavedSetCollaborators, notifier: Arc<dyn Notifier>) -> Self {
		Self {
			saved: HashSet::new(),
			signed_in: false,
			collaborators,
			notifier,
			bulk_save_cap: DEFAULT_BULK_SAVE_CAP,
			pending_save: None,
			pending_delete: None,
		}
	}

	pub fn with_bulk_save_cap(mut self, cap: usize) -> Self {
		self.bulk_save_cap = cap.max(1);

		self
	}

	pub fn is_signed_in(&self) -> bool {
		self.signed_in
	}

	pub fn contains(&self, base: &str) -> bool {
		self.saved.contains(base)
	}

	pub fn saved(&self) -> &HashSet<String> {
		&self.saved
	}

	pub fn len(&self) -> usize {
		self.saved.len()
	}

	pub fn is_empty(&self) -> bool {
		self.saved.is_empty()
	}

	pub fn pending_save(&self) -> Option<&PendingBulkOp> {
		self.pending_save.as_ref()
	}

	pub fn pending_delete(&self) -> Option<&PendingBulkOp> {
		self.pending_delete.as_ref()
	}

	pub fn confirmation_open(&self, kind: BulkKind) -> bool {
		match kind {
			BulkKind::Save => self.pending_save.is_some(),
			BulkKind::Delete => self.pending_delete.is_some(),
		}
	}

	/// Marks `base` saved right away and persists it in the background.
	///
	/// The local set is not rolled back if persistence fails; the returned handle resolves to
	/// the persistence result for callers that want to report it. Signed-out sessions get `None`,
	/// as do calls made outside an async runtime, which keep the local insert only.
	pub fn mark_saved(&mut self, base: &str) -> Option<JoinHandle<Result<()>>> {
		if !self.signed_in {
			return None;
		}

		self.saved.insert(base.to_string());

		let Ok(handle) = Handle::try_current() else {
			tracing::warn!(base = %base, "No async runtime; saved word was not persisted.");

			return None;
		};
		let backend = Arc::clone(&self.collaborators.backend);
		let base = base.to_string();

		Some(handle.spawn(async move {
			let result = backend.save_word(&base).await;

			if let Err(err) = &result {
				tracing::warn!(error = %err, base = %base, "Failed to persist saved word.");
			}

			result
		}))
	}

	/// Forwards a delete to the backend. The local set is left alone; the view decides what to
	/// do with the row.
	pub fn mark_delete_intent(&self, base: &str) -> Option<JoinHandle<Result<()>>> {
		if !self.signed_in {
			return None;
		}

		let Ok(handle) = Handle::try_current() else {
			tracing::warn!(base = %base, "No async runtime; delete was not sent.");

			return None;
		};
		let backend = Arc::clone(&self.collaborators.backend);
		let base = base.to_string();

		Some(handle.spawn(async move { backend.delete_word(&base).await }))
	}

	/// Builds the bulk-save list and opens its confirmation. Any earlier pending save is
	/// discarded first, so a run that ends without a list leaves no confirmation open.
	pub async fn prepare_bulk_save(&mut self, candidate_bases: &[String]) -> BulkPrepare {
		if !self.signed_in {
			return BulkPrepare::SignedOut;
		}

		self.pending_save = None;

		let eligible = match self.collaborators.bulk_candidates.as_ref() {
			Some(source) => match source.fetch_unsaved().await {
				Ok(bases) => bases,
				Err(err) => {
					tracing::warn!(error = %err, "Failed to fetch words for bulk save.");

					self.notifier.notify(Notice::error("Failed to fetch words to save."));

					return BulkPrepare::Failed;
				},
			},
			None => self.unsaved_in_order(candidate_bases),
		};

		if eligible.is_empty() {
			self.notifier.notify(Notice::info("No new words to save."));

			return BulkPrepare::NothingToDo;
		}

		let truncated = eligible.len() > self.bulk_save_cap;
		let mut items = eligible;

		items.truncate(self.bulk_save_cap);

		if truncated {
			tracing::info!(cap = self.bulk_save_cap, "Bulk save list truncated.");
		}

		let count = items.len();

		self.pending_save = Some(PendingBulkOp {
			kind: BulkKind::Save,
			items,
			cap: Some(self.bulk_save_cap),
			truncated,
		});

		BulkPrepare::AwaitingConfirmation { count, truncated }
	}

	pub async fn execute_bulk_save(&mut self) -> BulkOutcome {
		let Some(pending) = self.pending_save.take() else {
			return BulkOutcome::NotPending;
		};

		if !self.signed_in {
			return BulkOutcome::SignedOut;
		}

		let count = pending.items.len();
		let result = match self.collaborators.bulk_save.as_ref() {
			Some(handler) => handler.save_all(&pending.items).await,
			None => self.collaborators.backend.save_words(&pending.items).await,
		};

		match result {
			Ok(()) => {
				self.saved.extend(pending.items);
				self.notifier.notify(Notice::success(format!("Saved {count} words.")));

				BulkOutcome::Completed { count }
			},
			Err(err) => {
				tracing::warn!(error = %err, count, "Bulk save failed.");

				self.notifier.notify(Notice::error("Failed to save words."));

				BulkOutcome::Failed
			},
		}
	}

	pub fn cancel_bulk_save(&mut self) {
		self.pending_save = None;
	}

	/// Opens a delete confirmation for every word given. No cap applies.
	pub fn prepare_bulk_delete(&mut self, bases: &[String]) -> BulkPrepare {
		if !self.signed_in {
			return BulkPrepare::SignedOut;
		}

		self.pending_delete = None;

		if bases.is_empty() {
			self.notifier.notify(Notice::info("No words to delete."));

			return BulkPrepare::NothingToDo;
		}

		self.pending_delete = Some(PendingBulkOp {
			kind: BulkKind::Delete,
			items: bases.to_vec(),
			cap: None,
			truncated: false,
		});

		BulkPrepare::AwaitingConfirmation { count: bases.len(), truncated: false }
	}

	/// Runs the confirmed delete through the batch-delete collaborator. The local set is not
	/// touched; the collaborator owns removal from whatever list is on screen.
	pub async fn execute_bulk_delete(&mut self) -> BulkOutcome {
		let Some(pending) = self.pending_delete.take() else {
			return BulkOutcome::NotPending;
		};

		if !self.signed_in {
			return BulkOutcome::SignedOut;
		}

		let Some(handler) = self.collaborators.bulk_delete.as_ref() else {
			tracing::warn!("Bulk delete confirmed without a delete handler.");

			self.notifier.notify(Notice::error("Bulk delete is not available here."));

			return BulkOutcome::Failed;
		};
		let count = pending.items.len();

		match handler.delete_all(&pending.items).await {
			Ok(()) => BulkOutcome::Completed { count },
			Err(err) => {
				tracing::warn!(error = %err, count, "Bulk delete failed.");

				self.notifier.notify(Notice::error("Failed to delete words."));

				BulkOutcome::Failed
			},
		}
	}

	pub fn cancel_bulk_delete(&mut self) {
		self.pending_delete = None;
	}

	fn unsaved_in_order(&self, candidate_bases: &[String]) -> Vec<String> {
		let mut seen = HashSet::new();

		candidate_bases
			.iter()
			.filter(|base| !self.saved.contains(base.as_str()))
			.filter(|base| seen.insert(base.as_str()))
			.cloned()
			.collect()
	}
}
