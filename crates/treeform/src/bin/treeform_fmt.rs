//! Reads one JSON document from stdin and writes it re-formatted to stdout.
//!
//! Usage: `treeform-fmt [CONFIG]`, e.g. `treeform-fmt "pretty, indent=4"`.

use std::io::Write;

use treeform::cli::{self, CliError};

fn run() -> Result<(), CliError> {
    let mut args = std::env::args().skip(1);
    let config = args.next().unwrap_or_default();
    if args.next().is_some() {
        return Err(CliError::Usage("treeform-fmt [CONFIG]"));
    }
    let input = cli::read_stdin()?;
    let out = cli::reformat(&input, &config)?;
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
