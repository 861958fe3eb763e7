use clap::Parser;

use yomu_browse::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	yomu_browse::run(args).await
}
