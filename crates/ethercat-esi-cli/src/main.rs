// crates/ethercat-esi-cli/src/main.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use ethercat_esi::{
    CodegenOptions, RowOrder, SlaveCodeGenerator, load_esi_from_str,
    load_object_dictionary_from_str,
};
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "esi-tool", version, about = "EtherCAT ESI file tools")]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Export the object dictionary of an ESI file as CSV
    OdCsv {
        input: PathBuf,
        output: PathBuf,
        /// Order rows by Index and SubIdx instead of file order
        #[arg(long)]
        sorted: bool,
    },
    /// Generate Structured Text slave initialization code
    SlaveSt {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        names: TargetNames,
    },
}

/// Symbols of the PLC program the generated code is pasted into.
#[derive(Args, Debug)]
struct TargetNames {
    #[arg(long, default_value = "pSlave")]
    slave_pointer: String,
    #[arg(long, default_value = "readeeprom.dwVendorID")]
    vendor_selector: String,
    #[arg(long, default_value = "readeeprom.dwProductID")]
    product_selector: String,
    #[arg(long, default_value = "xDeviceRecognized")]
    recognized_flag: String,
}

impl From<TargetNames> for CodegenOptions {
    fn from(names: TargetNames) -> Self {
        CodegenOptions {
            slave_pointer: names.slave_pointer,
            vendor_selector: names.vendor_selector,
            product_selector: names.product_selector,
            recognized_flag: names.recognized_flag,
        }
    }
}

fn main() -> Result<()> {
    let Cli { verbose, cmd } = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level(verbose)))
        .init();

    run(cmd)
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn run(cmd: Cmd) -> Result<()> {
    match cmd {
        Cmd::OdCsv {
            input,
            output,
            sorted,
        } => {
            let xml = read_esi(&input)?;
            let dump = load_object_dictionary_from_str(&xml)
                .with_context(|| format!("read object dictionary from {}", input.display()))?;
            let order = if sorted {
                RowOrder::Sorted
            } else {
                RowOrder::Insertion
            };
            let csv = dump.to_csv(order).context("render CSV")?;
            fs::write(&output, csv).with_context(|| format!("write {}", output.display()))?;
            info!(
                "Wrote {} rows with {} columns to {}",
                dump.dictionary.len(),
                dump.fields.len(),
                output.display()
            );
        }
        Cmd::SlaveSt {
            input,
            output,
            names,
        } => {
            let xml = read_esi(&input)?;
            let file = load_esi_from_str(&xml)
                .with_context(|| format!("read devices from {}", input.display()))?;
            let code = SlaveCodeGenerator::new(names.into())
                .generate(&file)
                .context("generate slave code")?;
            fs::write(&output, code).with_context(|| format!("write {}", output.display()))?;
            info!("Wrote {} device cases to {}", file.devices.len(), output.display());
        }
    }

    Ok(())
}

/// Reads an ESI file as text. Files that are not valid UTF-8 are taken to be
/// ISO-8859-1, the other encoding ESI files are commonly shipped in.
fn read_esi(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            debug!("{} is not UTF-8, decoding as ISO-8859-1", path.display());
            Ok(err.into_bytes().into_iter().map(char::from).collect())
        }
    }
}
