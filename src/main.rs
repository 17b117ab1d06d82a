use clap::Parser;

use gh_releaser::{
    Args, Result,
    dispatch::Dispatcher,
    event::Event,
    forge::{github::Github, manager::ForgeManager},
    output::{self, OutputWriter},
    repo::Repository,
};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("gh_releaser")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

async fn run(args: &Args) -> Result<()> {
    let event = Event::from_env()?;
    event.ensure_supported()?;

    let dispatch_config = args.dispatch_config()?;
    let remote_config = args.remote_config(&event)?;

    let repo = Repository::open(&args.workspace)?;
    let forge = ForgeManager::new(Box::new(Github::new(remote_config)?));

    let outputs = Dispatcher::new(dispatch_config, &repo, &repo, &forge)
        .run(&event)
        .await?;

    OutputWriter::from_env().write(&outputs)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(args.debug)?;

    if let Err(err) = run(&args).await {
        println!("{}", output::error_annotation(&err.to_string()));
        return Err(err.into());
    }

    Ok(())
}
