pub mod args;
pub mod commands;

use std::io;

use compiler::CompileError;
use tracing_subscriber::{fmt, EnvFilter};
use vm::instruction::DecodeError;
use vm::{LoaderError, RuntimeError};

/// Process exit status of the `macro` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Success = 0,
    ArgError = 1,
    NoInputFile = 2,
    LexerError = 3,
    CompilerError = 4,
    RuntimeError = 5,
}

impl From<Status> for std::process::ExitCode {
    fn from(status: Status) -> Self {
        std::process::ExitCode::from(status as u8)
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "trace"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Map a command failure to the exit status for its category.
pub fn status_of(err: &anyhow::Error) -> Status {
    for cause in err.chain() {
        if let Some(compile) = cause.downcast_ref::<CompileError>() {
            return match compile {
                CompileError::Lex(_) => Status::LexerError,
                CompileError::Invalid(_) => Status::CompilerError,
            };
        }
        if cause.is::<LoaderError>() || cause.is::<RuntimeError>() || cause.is::<DecodeError>() {
            return Status::RuntimeError;
        }
        if let Some(io) = cause.downcast_ref::<io::Error>() {
            if io.kind() == io::ErrorKind::NotFound {
                return Status::NoInputFile;
            }
        }
    }
    Status::ArgError
}
