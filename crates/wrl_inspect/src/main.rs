use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use wrl_core::vrml::{load_wrl_batch, ParseOptions};
use wrl_core::MaterialEquality;

mod report;

/// Inspect N64 VRML (.wrl) scene dumps
#[derive(Parser)]
#[command(name = "wrl_inspect")]
#[command(version, about = "Parse WRL scene dumps and report materials and meshes")]
struct Cli {
    /// WRL files to parse (parsed in parallel)
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Print each scene as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Also compare specular color when deduplicating materials
    #[arg(long)]
    include_specular: bool,

    /// Log every block the parser enters
    #[arg(long)]
    trace_blocks: bool,

    /// Print the assembled triangles of every mesh
    #[arg(long, conflicts_with = "json")]
    triangles: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        let equality = if self.include_specular {
            MaterialEquality::IncludeSpecular
        } else {
            MaterialEquality::Legacy
        };

        ParseOptions::default()
            .with_equality(equality)
            .with_trace_blocks(self.trace_blocks)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = cli.parse_options();
    let results = load_wrl_batch(&cli.files, &options);

    let mut failures = 0;
    for (path, result) in cli.files.iter().zip(results) {
        match result {
            Ok(scene) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&scene)?);
                } else {
                    print!("{}", report::summary(&scene));
                    if cli.triangles {
                        print!("{}", report::triangles(&scene));
                    }
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        log::error!("{} of {} file(s) failed to parse", failures, cli.files.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
