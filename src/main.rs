mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use autoaws::{
    Action, AssumeYes, Confirm, Outcome, Pipeline, StdinConfirm, TerraformCli, Workspace, config,
    output,
};
use cli::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let action = Action::from(cli.action);

    println!("Loading configuration from: {}", cli.config.display());
    let config = config::load(&cli.config)?;
    config.validate()?;

    let workspace = Workspace::new(&cli.working_dir);
    println!("{}", output::summary(&config, action, &workspace)?);

    let runner = TerraformCli::with_program(&cli.terraform_bin, &cli.working_dir);
    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    };

    let mut pipeline = Pipeline::new(&config, workspace, runner, confirm);
    match pipeline.run(action)? {
        Outcome::Completed => println!("\nAll done!"),
        Outcome::Cancelled { at } => tracing::info!(stage = %at, "stopped at user request"),
    }

    Ok(())
}
