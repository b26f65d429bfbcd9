//! Prints the descriptor of an encoded typed view read from stdin.

use std::io::Write;

use treeform::cli::{self, CliError};

fn run() -> Result<(), CliError> {
    if std::env::args().len() > 1 {
        return Err(CliError::Usage("treeform-view-header < VIEW"));
    }
    let input = cli::read_stdin()?;
    let out = cli::describe_view(&input)?;
    std::io::stdout().write_all(out.as_bytes())?;
    Ok(())
}

fn main() {
    cli::init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
