use std::io::{self, Write};
use std::process;

use clap::Parser;

use task_tracker::cli::Cli;
use task_tracker::cmd::execute_command;
use task_tracker::config::StoreConfig;
use task_tracker::exitcode;
use task_tracker::logging::setup_logging;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    // Errors share stdout with regular output; logs go to stderr.
    let (output, code) = match execute_command(&cli, &StoreConfig::default()) {
        Ok(output) => (output, exitcode::OK),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            (format!("{e}\n"), e.exit_code())
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Failed to write output: {e}");
            process::exit(exitcode::IOERR);
        }
    }
    process::exit(code);
}
