use std::env;
use std::ffi::OsStr;
use std::fs::File;
use std::io::stdout;
use std::io::BufWriter;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::info;
use log::LevelFilter;

use enfa_determinize::determinize;
use enfa_determinize::epsilon_closures;
use enfa_determinize::DeterminizeOptions;
use enfa_io::io_enfa::read_enfa;
use enfa_io::io_enfa::write_closures;
use enfa_io::io_enfa::write_dfa;
use enfa_utilities::Timing;

#[derive(Parser, Debug)]
#[command(
    name = "enfa2dfa",
    about = "Converts an epsilon nondeterministic finite automaton into an equivalent DFA"
)]
struct Cli {
    #[arg(value_name = "FILE")]
    filename: String,

    /// Write the DFA to this file instead of stdout.
    output: Option<String>,

    /// Report every step of the subset construction.
    #[arg(short, long)]
    verbose: bool,

    /// Number the DFA states instead of printing their sets of states.
    #[arg(short, long)]
    enumerate: bool,

    /// Print the epsilon closure of every state before converting.
    #[arg(long)]
    closures: bool,

    /// Abort when the DFA has more than this number of states.
    #[arg(long)]
    max_states: Option<usize>,

    #[arg(long)]
    time: bool,
}

/// Returns the log level for `--verbose`, a level given by RUST_LOG takes precedence.
fn verbose_level(verbose: bool, rust_log: Option<&OsStr>) -> Option<LevelFilter> {
    (verbose && rust_log.is_none()).then_some(LevelFilter::Info)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = verbose_level(cli.verbose, env::var_os("RUST_LOG").as_deref()) {
        builder.filter_level(level);
    }
    builder.init();

    let mut timing = Timing::new();

    let mut read_time = timing.start("read");
    let file = File::open(&cli.filename).with_context(|| format!("Cannot open {}", cli.filename))?;
    let automaton = read_enfa(file)?;
    read_time.finish();
    info!("{}", automaton);

    if cli.closures {
        let mut closure_time = timing.start("closures");
        let closures = epsilon_closures(&automaton);
        closure_time.finish();

        let mut out = stdout().lock();
        writeln!(out, "The epsilon closure of each state:")?;
        write_closures(&mut out, &automaton, &closures)?;
        writeln!(out)?;
    }

    let mut determinize_time = timing.start("determinize");
    let options = DeterminizeOptions {
        verbose: cli.verbose,
        enumerate: cli.enumerate,
        max_states: cli.max_states,
    };
    let dfa = determinize(&automaton, &options)?;
    determinize_time.finish();
    info!("{}", dfa);

    let mut write_time = timing.start("write");
    if let Some(file) = cli.output {
        let mut writer = BufWriter::new(File::create(&file).with_context(|| format!("Cannot create {file}"))?);
        write_dfa(&mut writer, &automaton, &dfa)?;
        writer.flush()?;
    } else {
        write_dfa(&mut stdout().lock(), &automaton, &dfa)?;
    }
    write_time.finish();

    if cli.time {
        timing.print();
    }

    Ok(ExitCode::SUCCESS)
}
