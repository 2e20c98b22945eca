use anyhow::{Context, Result};
use k2ixbrl::{
    core::config::GeneratorConfig,
    ixbrl,
    utils::files::{load_report, read_input, write_output},
};
use log::debug;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "k2ixbrl", about = "Convert K2 annual reports to and from iXBRL")]
enum Opt {
    /// Encode a report JSON file as an iXBRL document
    Generate {
        /// Write the document here instead of standard output
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
        /// Report JSON, or - for standard input
        input: String,
    },
    /// Decode an iXBRL document into report JSON
    Parse {
        /// Write the JSON here instead of standard output
        #[structopt(short, long, parse(from_os_str))]
        output: Option<PathBuf>,
        /// iXBRL document, or - for standard input
        input: String,
    },
}

fn generate(input: &str, output: Option<PathBuf>) -> Result<()> {
    let config = GeneratorConfig::from_env()?;
    let mut report = load_report(input)?;
    config.apply(&mut report.meta);
    debug!("Generating with {:?}", config);

    let bytes = ixbrl::generate_to_bytes(&report)
        .with_context(|| format!("Failed to generate iXBRL for {}", input))?;
    write_output(output.as_deref(), &bytes)?;
    if let Some(path) = output {
        eprintln!("Generated {} ({} bytes)", path.display(), bytes.len());
    }
    Ok(())
}

fn parse(input: &str, output: Option<PathBuf>) -> Result<()> {
    let content = read_input(input)?;
    let report =
        ixbrl::parse(&content).with_context(|| format!("Failed to parse iXBRL in {}", input))?;

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    write_output(output.as_deref(), json.as_bytes())?;
    if let Some(path) = output {
        eprintln!("Parsed {} ({} bytes)", path.display(), json.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    match Opt::from_args() {
        Opt::Generate { output, input } => generate(&input, output),
        Opt::Parse { output, input } => parse(&input, output),
    }
}
