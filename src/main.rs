use clap::Parser;
use miette::Result;
use vents::cli::{load_config, Cli, Commands};
use vents::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    vents::logging::init_logging(cli.verbose);

    let printer = Printer::new();

    match cli.command {
        Commands::Spawns(args) => {
            let config = load_config(cli.config.as_deref())?;
            vents::cli::spawns::run(args, &config, &printer)?
        }
        Commands::Dump(args) => {
            let config = load_config(cli.config.as_deref())?;
            vents::cli::dump::run(args, &config, &printer)?
        }
        Commands::Check(args) => {
            let config = load_config(cli.config.as_deref())?;
            let outcome = vents::cli::check::run(args, &config, &printer)?;
            if !outcome.needs_regeneration() {
                std::process::exit(vents::cli::check::EXIT_UP_TO_DATE);
            }
        }
        Commands::Completions(args) => vents::cli::completions::run(args)?,
    }

    Ok(())
}
