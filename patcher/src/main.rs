use cert_store::Certificate;
use clap::{Parser, Subcommand};
use log::{error, info};
use patcher::catalog::Catalog;
use patcher::{apply_sets, build_cert_store, check_sets, verify_sets, PatcherError};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug, Clone)]
enum Cmd {
    /// Apply patch sets to an image
    Apply {
        /// Image to patch
        image: PathBuf,
        /// JSON patch catalog
        #[arg(short, long)]
        catalog: PathBuf,
        /// Sets to apply in order, all sets of the catalog if omitted
        #[arg(short, long)]
        set: Vec<String>,
        /// Where to write the patched image, defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only check that every set applies to the image
        #[arg(short, long)]
        dry_run: bool,
    },
    /// Check that patch sets have been applied to an image
    Verify {
        image: PathBuf,
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(short, long)]
        set: Vec<String>,
    },
    /// Build a certificate store holding a single CA certificate
    CertStore {
        /// Subject common name
        #[arg(short = 'n', long)]
        common_name: String,
        /// DER encoded subject
        #[arg(short, long)]
        subject: PathBuf,
        /// DER encoded certificate
        #[arg(short, long)]
        certificate: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args.cmd) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(cmd: Cmd) -> Result<(), PatcherError> {
    match cmd {
        Cmd::Apply {
            image,
            catalog,
            set,
            output,
            dry_run,
        } => {
            let catalog = Catalog::from_file(&catalog)?;
            let sets = catalog.select(&set)?;
            let original = std::fs::read(&image)?;

            if dry_run {
                for (set, report) in sets.iter().zip(check_sets(&original, &sets)?) {
                    info!("{} applies, {} writes", set.name, report.writes());
                }
                return Ok(());
            }

            let (patched, reports) = apply_sets(&original, &sets)?;
            let output = output.unwrap_or(image);
            std::fs::write(&output, patched)?;
            info!(
                "Applied {} sets to {}",
                reports.len(),
                output.to_string_lossy()
            );
        }
        Cmd::Verify {
            image,
            catalog,
            set,
        } => {
            let catalog = Catalog::from_file(&catalog)?;
            let sets = catalog.select(&set)?;
            let image = std::fs::read(&image)?;
            verify_sets(&image, &sets)?;
            info!("All {} sets are applied", sets.len());
        }
        Cmd::CertStore {
            common_name,
            subject,
            certificate,
            output,
        } => {
            let certificate = Certificate::new(
                common_name,
                std::fs::read(&subject)?,
                std::fs::read(&certificate)?,
            );
            let store = build_cert_store(certificate)?;
            std::fs::write(&output, store)?;
        }
    }
    Ok(())
}
