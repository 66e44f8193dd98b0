use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = tagrank_api::Args::parse();

	tagrank_api::run(args).await
}
