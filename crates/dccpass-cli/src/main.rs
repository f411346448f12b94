//! Command-line interface for dccpass.
//!
//! Creates wallet passes from decoded certificate payloads and checks
//! existing `.pkpass` files against their manifest.

use clap::{Parser, Subcommand};
use dccpass::{
    verify_pass_archive, AssetBundle, DirValueSetSource, HttpValueSetSource, MessageCatalog,
    PassBuilder, PassConfig, RawPayload, RemoteSigner, ValueSetSource,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dccpass")]
#[command(about = "Digital COVID Certificate wallet pass tool")]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a signed .pkpass from a payload JSON file
    Create(CreateArgs),
    /// Check a .pkpass against its manifest
    Verify {
        /// Pass archive to check
        input: PathBuf,
    },
}

#[derive(clap::Args)]
struct CreateArgs {
    /// Payload file: {"raw": "HC1:...", "decoded": {...}}
    payload: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Directory with icon.png, icon@2x.png, logo.png, logo@2x.png
    #[arg(short, long)]
    assets: PathBuf,

    /// Output file (default: payload path with .pkpass extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read value sets from this directory instead of value_set_url
    #[arg(long)]
    value_sets: Option<PathBuf>,

    /// Override signer_url from the configuration file
    #[arg(long)]
    signer_url: Option<String>,

    /// Label translations (TOML), merged over the English defaults
    #[arg(long)]
    locale: Option<PathBuf>,

    /// ZIP compression level (0-9, default: 6)
    #[arg(short = 'z', long, default_value = "6")]
    zip_level: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Create(args) => create(args).await,
        Command::Verify { input } => verify(&input),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn create(args: CreateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PassConfig::load(&args.config)?;
    if let Some(ref url) = args.signer_url {
        config.signer_url = url.clone();
        config.validate()?;
    }

    let payload: RawPayload = serde_json::from_slice(&std::fs::read(&args.payload)?)?;
    let value_sets = value_set_source(&args, &config)?;

    let mut translator = MessageCatalog::english();
    if let Some(ref locale) = args.locale {
        translator = translator.merged_with(MessageCatalog::load(locale)?);
    }

    let signer = RemoteSigner::new(config.signer_config())?;
    let builder = PassBuilder::new(config.identifiers())
        .translator(translator)
        .assets(AssetBundle::from_dir(&args.assets)?)
        .compression_level(args.zip_level);

    let pkpass = builder
        .create_pass(&payload, value_sets.as_ref(), &signer)
        .await?;

    let output = args.output.unwrap_or_else(|| {
        let mut out = args.payload.clone();
        out.set_extension("pkpass");
        out
    });
    log::info!("writing {} bytes to {}", pkpass.len(), output.display());
    std::fs::write(&output, pkpass)?;

    println!("Created: {}", output.display());
    Ok(())
}

fn value_set_source(
    args: &CreateArgs,
    config: &PassConfig,
) -> Result<Box<dyn ValueSetSource>, Box<dyn std::error::Error>> {
    if let Some(ref dir) = args.value_sets {
        return Ok(Box::new(DirValueSetSource::new(dir)));
    }
    if let Some(ref url) = config.value_set_url {
        return Ok(Box::new(HttpValueSetSource::new(url.as_str(), config.timeout())?));
    }
    Err("Must provide either --value-sets or value_set_url in the configuration".into())
}

fn verify(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    verify_pass_archive(&data)?;
    println!("Valid: {}", input.display());
    Ok(())
}
