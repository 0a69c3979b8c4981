use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::Level;

use prov_perf::config::{SelectorConfig, UsageLayout};
use prov_perf::data::utils::format_value;
use prov_perf::metrics::monotonic::clean_up_file;
use prov_perf::metrics::usage::{average_file, decompose_file, CpuMode};
use prov_perf::report::summary_table;
use prov_perf::sweep::run_selector;

#[derive(Debug, Parser)]
#[command(name = "prov_perf", about = "Prepare provenance benchmark logs for plotting")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clamp noisy progress timestamps to a non-decreasing series.
    Clean {
        #[arg(short, long, help = "input data file path")]
        input: PathBuf,
        #[arg(short, long, help = "output data file path")]
        output: PathBuf,
    },
    /// Append the best trial of every sweep point to per-metric series.
    Select {
        /// Directory holding the result tables and the series files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// JSON file describing the sweeps.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Do not print the summary tables.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Memory plus the average CPU over all cores.
    CpuMem {
        input: PathBuf,
        mem_output: PathBuf,
        cpu_output: PathBuf,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Memory plus the busiest core.
    CpuMemHighest {
        input: PathBuf,
        mem_output: PathBuf,
        core_output: PathBuf,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Memory plus one series per core, one output path per core.
    CpuMemCores {
        input: PathBuf,
        mem_output: PathBuf,
        #[arg(required = true)]
        core_outputs: Vec<PathBuf>,
        #[arg(long, default_value_t = 4096.0)]
        total_mem_mb: f64,
    },
    /// Memory plus the process CPU column.
    PsCpu {
        input: PathBuf,
        mem_output: PathBuf,
        cpu_output: PathBuf,
        #[arg(long, default_value_t = 4096.0)]
        total_mem_mb: f64,
    },
    /// Print the mean of a one-value-per-line series.
    Average { input: PathBuf },
}

#[derive(Debug, Args)]
struct LayoutArgs {
    /// Number of cores sampled in the per-thread block.
    #[arg(long, default_value_t = 4)]
    cores: usize,
    /// Machine memory, so %MEM can be turned into megabytes.
    #[arg(long, default_value_t = 4096.0)]
    total_mem_mb: f64,
}

impl From<LayoutArgs> for UsageLayout {
    fn from(args: LayoutArgs) -> Self {
        UsageLayout {
            cores: args.cores,
            total_mem_mb: args.total_mem_mb,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Clean { input, output } => {
            clean_up_file(&input, &output)
                .with_context(|| format!("cleaning {}", input.display()))?;
        }
        Command::Select {
            data_dir,
            config,
            quiet,
        } => {
            let mut selector = match &config {
                Some(path) => SelectorConfig::from_json_file(path)?,
                None => SelectorConfig::default(),
            };
            if let Some(dir) = data_dir {
                selector.data_dir = dir;
            }
            let outcomes = run_selector(&selector).with_context(|| {
                format!("selecting best trials under {}", selector.data_dir.display())
            })?;
            if !quiet {
                for outcome in &outcomes {
                    println!("{}", summary_table(outcome));
                }
            }
        }
        Command::CpuMem {
            input,
            mem_output,
            cpu_output,
            layout,
        } => {
            decompose_file(&input, &mem_output, &[cpu_output], layout.into(), CpuMode::Average)
                .with_context(|| format!("decomposing {}", input.display()))?;
        }
        Command::CpuMemHighest {
            input,
            mem_output,
            core_output,
            layout,
        } => {
            decompose_file(&input, &mem_output, &[core_output], layout.into(), CpuMode::Highest)
                .with_context(|| format!("decomposing {}", input.display()))?;
        }
        Command::CpuMemCores {
            input,
            mem_output,
            core_outputs,
            total_mem_mb,
        } => {
            let layout = UsageLayout {
                cores: core_outputs.len(),
                total_mem_mb,
            };
            decompose_file(&input, &mem_output, &core_outputs, layout, CpuMode::PerCore)
                .with_context(|| format!("decomposing {}", input.display()))?;
        }
        Command::PsCpu {
            input,
            mem_output,
            cpu_output,
            total_mem_mb,
        } => {
            let layout = UsageLayout {
                total_mem_mb,
                ..UsageLayout::default()
            };
            decompose_file(&input, &mem_output, &[cpu_output], layout, CpuMode::Process)
                .with_context(|| format!("decomposing {}", input.display()))?;
        }
        Command::Average { input } => {
            let mean = average_file(&input)
                .with_context(|| format!("averaging {}", input.display()))?;
            println!("{}", format_value(mean));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    if env::args_os().len() < 2 {
        eprintln!("{}", Cli::command().render_help());
        process::exit(1);
    }
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
