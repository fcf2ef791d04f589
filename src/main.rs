use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
#[cfg(feature = "generate-docs")]
use clap::CommandFactory;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prefuzz::artifact::ArtifactStore;
use prefuzz::config::{FuzzConfig, load_config};
use prefuzz::device::AdbBridge;
use prefuzz::document;
use prefuzz::fuzzer::{DeviceSession, Fuzzer, RoundStatus};
use prefuzz::preference::PreferenceSpec;
use prefuzz::sampler::ValueSampler;

mod cli_examples;

#[derive(Debug, Parser)]
#[command(
    name = "prefuzz",
    about = "prefuzz: randomized shared-preferences documents for fuzzing Android apps",
    version = env!("CARGO_PKG_VERSION"),
    propagate_version = true
)]
struct Cli {
    /// Enable debug-level logging when RUST_LOG is unset.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate documents, keep new ones, and apply them to a device.
    Run {
        /// Fuzz config (YAML, or TOML with a .toml extension).
        config: PathBuf,
        /// Directory that receives generated documents.
        #[arg(long, value_name = "DIR", default_value = "gen")]
        path: PathBuf,
        /// Serial number of the device to test on.
        #[arg(long, value_name = "SERIAL")]
        device: Option<String>,
        /// Number of fuzzing rounds.
        #[arg(
            long,
            value_name = "N",
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        rounds: u32,
        /// Only generate and store documents; never touch a device.
        #[arg(long)]
        dry_run: bool,
        /// Print one JSON report per round on stdout.
        #[arg(long)]
        json: bool,
    },
    /// Print one freshly sampled document to stdout without storing it.
    Render {
        config: PathBuf,
    },
    /// Validate a config and list the resolved preference domains.
    Check {
        config: PathBuf,
        /// Print machine-readable JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print an annotated example config.
    Example,
    /// Generate shell completions and man page (internal, for packaging).
    #[cfg(feature = "generate-docs")]
    #[command(hide = true)]
    GenDocs {
        /// Output directory (creates completions/ and man/ inside it).
        #[arg(long, value_name = "DIR")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Run {
            config,
            path,
            device,
            rounds,
            dry_run,
            json,
        } => {
            let (config, specs) = load_specs(&config).await?;
            let opts = RunOptions {
                out_dir: path,
                device,
                rounds,
                dry_run,
                json,
            };
            run_rounds(config, specs, opts).await?;
        }
        Commands::Render { config } => {
            let (_, specs) = load_specs(&config).await?;
            let sampled = ValueSampler::new().sample_all(&specs);
            println!("{}", document::render(&sampled));
        }
        Commands::Check { config, json } => {
            let (config, specs) = load_specs(&config).await?;
            if json {
                let rendered = serde_json::to_string_pretty(&describe_specs_json(&config, &specs))
                    .context("failed to encode check output")?;
                println!("{rendered}");
            } else {
                println!("{}", describe_specs_human(&config, &specs));
            }
        }
        Commands::Example => {
            cli_examples::print_example_config();
        }
        #[cfg(feature = "generate-docs")]
        Commands::GenDocs { out_dir } => {
            generate_docs(&out_dir)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

struct RunOptions {
    out_dir: PathBuf,
    device: Option<String>,
    rounds: u32,
    dry_run: bool,
    json: bool,
}

async fn load_specs(path: &Path) -> Result<(FuzzConfig, Vec<PreferenceSpec>)> {
    let config = load_config(path).await?;
    let specs = config
        .resolve()
        .with_context(|| format!("invalid preference in {}", path.display()))?;
    Ok((config, specs))
}

async fn run_rounds(config: FuzzConfig, specs: Vec<PreferenceSpec>, opts: RunOptions) -> Result<()> {
    let target = if opts.dry_run {
        None
    } else {
        Some(config.device_target()?)
    };
    let bridge = AdbBridge::discover(opts.device);
    let store = ArtifactStore::new(&opts.out_dir);
    let mut fuzzer = Fuzzer::new(config.name.clone(), specs, ValueSampler::new(), store);

    let session = target.as_ref().map(|target| DeviceSession {
        bridge: &bridge,
        target,
    });

    let (mut written, mut duplicates) = (0usize, 0usize);
    for _ in 0..opts.rounds {
        let report = fuzzer.run_round(session.as_ref()).await?;
        match report.status {
            RoundStatus::Duplicate => duplicates += 1,
            RoundStatus::Written | RoundStatus::Applied => written += 1,
        }
        if opts.json {
            println!(
                "{}",
                serde_json::to_string(&report).context("failed to encode round report")?
            );
        }
    }

    info!(
        rounds = opts.rounds,
        written,
        duplicates,
        out_dir = %opts.out_dir.display(),
        "fuzzing finished"
    );
    Ok(())
}

fn describe_specs_human(config: &FuzzConfig, specs: &[PreferenceSpec]) -> String {
    let mut out = format!("{}: {} preferences", config.name, specs.len());
    for spec in specs {
        let domain: Vec<String> = spec.domain().iter().map(ToString::to_string).collect();
        out.push_str(&format!(
            "\n  {} ({}) [{}]",
            spec.name(),
            spec.kind(),
            domain.join(", ")
        ));
        if let Some(bounds) = spec.cardinality() {
            out.push_str(&format!(
                " size {}..={}{}",
                bounds.min,
                bounds.max,
                if bounds.distinct { " distinct" } else { "" }
            ));
        }
    }
    out
}

fn describe_specs_json(config: &FuzzConfig, specs: &[PreferenceSpec]) -> serde_json::Value {
    let preferences: Vec<serde_json::Value> = specs
        .iter()
        .map(|spec| {
            let domain: Vec<String> = spec.domain().iter().map(ToString::to_string).collect();
            let mut entry = json!({
                "name": spec.name(),
                "type": spec.kind().tag(),
                "domain": domain,
            });
            if let Some(bounds) = spec.cardinality() {
                entry["min"] = json!(bounds.min);
                entry["max"] = json!(bounds.max);
                entry["distinct"] = json!(bounds.distinct);
            }
            entry
        })
        .collect();
    json!({ "name": config.name, "preferences": preferences })
}

#[cfg(feature = "generate-docs")]
fn generate_docs(out_dir: &std::path::Path) -> Result<()> {
    use clap_complete::{Shell, generate_to};
    use clap_mangen::Man;
    use std::fs;

    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");

    fs::create_dir_all(&completions_dir)
        .with_context(|| format!("failed to create {}", completions_dir.display()))?;
    fs::create_dir_all(&man_dir)
        .with_context(|| format!("failed to create {}", man_dir.display()))?;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, &bin_name, &completions_dir)
            .with_context(|| format!("failed generating {shell:?} completion"))?;
    }

    let man = Man::new(Cli::command());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).context("failed rendering man page")?;
    let man_path = man_dir.join("prefuzz.1");
    fs::write(&man_path, &buffer)
        .with_context(|| format!("failed writing {}", man_path.display()))?;

    eprintln!("Generated completions and man page in {}", out_dir.display());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
