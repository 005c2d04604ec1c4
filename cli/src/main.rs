use std::process::ExitCode;

use clap::Parser;

use cli::args::{Cli, Commands};
use cli::commands::{compile, disassemble, run};
use cli::Status;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                Status::ArgError.into()
            } else {
                Status::Success.into()
            };
        }
    };

    cli::init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Compile {
            path,
            output,
            debug,
        } => compile::compile_file(path, output.as_deref(), *debug).map(|_| ()),
        Commands::Run { path, memory } => run::run_file(path, *memory),
        Commands::Disassemble { path } => disassemble::disassemble_file(path),
    };

    match result {
        Ok(()) => Status::Success.into(),
        Err(err) => {
            tracing::error!("{err:#}");
            cli::status_of(&err).into()
        }
    }
}
