use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = haven_api::Args::parse();
	haven_api::run(args).await
}
