use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vm::specs::DEFAULT_MEMORY_KB;

#[derive(Parser, Debug)]
#[command(name = "macro", version)]
#[command(about = "Compile and run Macro automation scripts", long_about = None)]
pub struct Cli {
    /// Trace every executed instruction
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a script (.mcs) to bytecode (.mcc)
    Compile {
        /// Input script
        path: PathBuf,
        /// Output file [default: <script name>.mcc]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report token and byte counts
        #[arg(short, long)]
        debug: bool,
    },
    /// Run a compiled program, or a script after compiling it
    Run {
        /// Program (.mcc) or script (.mcs)
        path: PathBuf,
        /// Memory budget in KiB
        #[arg(short, long, default_value_t = DEFAULT_MEMORY_KB)]
        memory: usize,
    },
    /// Print the instruction listing of a program or script
    Disassemble {
        /// Program (.mcc) or script (.mcs)
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults_to_sixteen_kib() {
        let cli = Cli::try_parse_from(["macro", "run", "a.mcc"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { memory: 16, .. }));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["macro", "compile", "a.mcs", "-d", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Compile { debug: true, .. }));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["macro", "-v", "-q", "run", "a.mcc"]).is_err());
    }
}
