mod cli;
mod page;
mod paths;
mod run;
mod store;
mod theme;

use anyhow::Result;
use cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Where) => run::print_paths(),
        None => run::run(cli.run),
    }
}
