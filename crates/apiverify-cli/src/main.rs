//! apiverify CLI - data-driven API verification and snapshot runs

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use apiverify_core::RunConfig;
use apiverify_runner::{ConsoleLog, Runner};

#[derive(Parser)]
#[command(name = "apiverify")]
#[command(about = "Data-driven API verification and snapshot runner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a verification run
    Run {
        /// Config file (default: apiverify.toml)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize config file
    Init,

    /// Check config presence and validity
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Run { config } => {
            let cfg = if let Some(path) = config {
                RunConfig::load(std::path::Path::new(&path))?
            } else {
                RunConfig::load_default()?
            };

            eprintln!("Config:");
            eprintln!("  url:   {}{}", cfg.url_base, cfg.url_path);
            eprintln!("  mode:  {:?}, store: {:?}", cfg.run_mode, cfg.store_policy);
            if cfg.is_data_driven() {
                eprintln!("  rows:  data-driven");
            } else {
                eprintln!("  rows:  single static request");
            }
            eprintln!();

            let mut log = ConsoleLog;
            let summary = Runner::new(cfg).run(&mut log)?;

            if !summary.errors.is_empty() {
                eprintln!("\nErrors:");
                for err in &summary.errors {
                    eprintln!("  - {err}");
                }
            }
            eprintln!(
                "\nProcessed {} rows in {:.2?}, {} errors",
                summary.total_rows,
                summary.elapsed,
                summary.errors.len()
            );

            Ok(if summary.is_success() { 0 } else { 1 })
        }

        Commands::Init => {
            let config_path = "apiverify.toml";
            if std::path::Path::new(config_path).exists() {
                eprintln!("{config_path} already exists");
                return Ok(1);
            }

            std::fs::write(config_path, RunConfig::example())?;
            println!("Created {config_path}");
            println!("\nEdit the file to configure:");
            println!("  - url_base / url_path: the endpoint under test");
            println!("  - data_source_connection: rows driving the run");
            println!("  - store_policy / run_mode: snapshot behavior");
            Ok(0)
        }

        Commands::Doctor => {
            println!("apiverify doctor");
            println!("================\n");

            match RunConfig::load_default() {
                Ok(cfg) => {
                    println!("[OK] Config file");
                    match cfg.validate() {
                        Ok(()) => println!("[OK] Config valid ({} {})", cfg.request_method, cfg.url_path),
                        Err(e) => println!("[NG] Config invalid: {e}"),
                    }
                    if let Some(connection) = &cfg.data_source_connection {
                        let exists = std::path::Path::new(connection).exists();
                        println!(
                            "[{}] Data source ({connection})",
                            if exists { "OK" } else { "NG" }
                        );
                    }
                }
                Err(e) => {
                    println!("[--] Config file: {e}");
                    println!("\nCreate one with:");
                    println!("  apiverify init");
                }
            }

            Ok(0)
        }
    }
}
