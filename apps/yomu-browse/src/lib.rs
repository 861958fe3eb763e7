use std::{collections::HashSet, fs, path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use yomu_cli::ViewArgs;
use yomu_config::{Config, Remote};
use yomu_domain::Candidate;
use yomu_service::{
	BrowseController, BulkOutcome, BulkPrepare, DictionarySource, EnvCredentials,
	HttpCollaborators, QueryEmission, SavedSetCollaborators, SavedSetController, TracingNotifier,
	UnsavedDictionaryWords,
};

#[derive(Debug, Parser)]
#[command(
	version = yomu_cli::VERSION,
	rename_all = "kebab",
	styles = yomu_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Filter, sort and page a word list held in a local JSON file.
	Local {
		#[arg(long, short = 'i', value_name = "FILE")]
		input: PathBuf,
		/// JSON array of already saved base forms, used by --hide-saved.
		#[arg(long, value_name = "FILE")]
		saved: Option<PathBuf>,
		#[command(flatten)]
		view: ViewArgs,
	},
	/// Browse the dictionary served by `[remote].api_base`.
	Remote {
		#[command(flatten)]
		view: ViewArgs,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = yomu_config::load(&args.config)?;
	init_tracing(&config)?;
	match args.command {
		Command::Local { input, saved, view } => run_local(&config, input, saved, view).await,
		Command::Remote { view } => run_remote(&config, view).await,
	}
}

/// Builds a local controller over `candidates` with `view` applied.
pub fn browse_local(
	candidates: Vec<Candidate>,
	saved: HashSet<String>,
	view: &ViewArgs,
) -> BrowseController {
	let mut controller = BrowseController::local(candidates, saved)
		.with_label(view.label.clone())
		.with_sort(view.sort_state());

	view.apply(&mut controller);

	controller
}

async fn run_local(
	config: &Config,
	input: PathBuf,
	saved: Option<PathBuf>,
	view: ViewArgs,
) -> color_eyre::Result<()> {
	let candidates: Vec<Candidate> = serde_json::from_str(&fs::read_to_string(&input)?)?;
	let saved: HashSet<String> = match saved {
		Some(path) => serde_json::from_str(&fs::read_to_string(&path)?)?,
		None => HashSet::new(),
	};

	tracing::info!(count = candidates.len(), input = %input.display(), "Loaded candidates.");

	let controller = browse_local(candidates, saved, &view);

	print_result(&controller, view.export)?;

	if view.save_all {
		let remote = remote_config(config)?;
		let http =
			Arc::new(HttpCollaborators::new(remote.clone(), &EnvCredentials::from_config(remote)));
		let bases: Vec<String> = controller
			.export_snapshot()
			.items
			.into_iter()
			.map(|candidate| candidate.base)
			.collect();
		let saved_set = saved_set(remote, SavedSetCollaborators::new(http), config).await;

		bulk_save(saved_set, &bases, view.yes).await?;
	}

	Ok(())
}

async fn run_remote(config: &Config, view: ViewArgs) -> color_eyre::Result<()> {
	let remote = remote_config(config)?;
	let http =
		Arc::new(HttpCollaborators::new(remote.clone(), &EnvCredentials::from_config(remote)));
	let (tx, mut rx) = mpsc::unbounded_channel::<QueryEmission>();
	let mut controller = BrowseController::remote_with_debounce(
		Arc::new(tx),
		Duration::from_millis(config.browse.remote_debounce_ms),
	)
	.with_label(view.label.clone())
	.with_sort(view.sort_state());

	view.apply(&mut controller);
	controller.mount();

	let emission = rx.recv().await.ok_or_else(|| eyre::eyre!("Browse emission channel closed."))?;
	let page = http.fetch_page(&emission.params).await?;

	controller.apply_remote_page(emission.seq, page);
	print_result(&controller, view.export)?;

	if view.save_all {
		let source = UnsavedDictionaryWords::new(
			http.clone(),
			controller.query_params(),
			config.browse.bulk_save_cap,
		);
		let collaborators = SavedSetCollaborators::new(http.clone())
			.with_bulk_candidates(Arc::new(source))
			.with_bulk_delete(http);
		let saved_set = saved_set(remote, collaborators, config).await;

		bulk_save(saved_set, &[], view.yes).await?;
	}

	Ok(())
}

async fn saved_set(
	remote: &Remote,
	collaborators: SavedSetCollaborators,
	config: &Config,
) -> SavedSetController {
	SavedSetController::init(
		&EnvCredentials::from_config(remote),
		collaborators,
		Arc::new(TracingNotifier),
	)
	.await
	.with_bulk_save_cap(config.browse.bulk_save_cap)
}

async fn bulk_save(
	mut saved_set: SavedSetController,
	candidate_bases: &[String],
	confirmed: bool,
) -> color_eyre::Result<()> {
	match saved_set.prepare_bulk_save(candidate_bases).await {
		BulkPrepare::AwaitingConfirmation { .. } => {},
		BulkPrepare::SignedOut => return Err(eyre::eyre!("Bulk save requires a bearer token.")),
		BulkPrepare::Failed => return Err(eyre::eyre!("Failed to prepare the bulk save.")),
		BulkPrepare::NothingToDo => return Ok(()),
	}

	let message = saved_set
		.pending_save()
		.map(|pending| pending.confirmation_message())
		.unwrap_or_default();

	eprintln!("{message}");

	if !confirmed {
		saved_set.cancel_bulk_save();
		eprintln!("Re-run with --yes to confirm.");

		return Ok(());
	}

	match saved_set.execute_bulk_save().await {
		BulkOutcome::Completed { count } => {
			tracing::info!(count, "Bulk save completed.");

			Ok(())
		},
		outcome => Err(eyre::eyre!("Bulk save did not complete: {outcome:?}.")),
	}
}

fn print_result(controller: &BrowseController, export: bool) -> color_eyre::Result<()> {
	let json = if export {
		serde_json::to_string_pretty(&controller.export_snapshot())?
	} else {
		serde_json::to_string_pretty(&controller.view())?
	};

	println!("{json}");

	Ok(())
}

fn remote_config(config: &Config) -> color_eyre::Result<&Remote> {
	config.remote.as_ref().ok_or_else(|| eyre::eyre!("A [remote] section is required."))
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
	Ok(())
}
