use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "transform-chain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON pipeline document to its descriptor.
    Render(RenderArgs),
    /// List registered operation kinds and their options.
    Schema(SchemaArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input pipeline document (JSON).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also print the pipeline fingerprint.
    #[arg(long)]
    fingerprint: bool,
}

#[derive(Parser, Debug)]
struct SchemaArgs {
    /// Only show this kind.
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Schema(args) => cmd_schema(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open pipeline document '{}'", args.in_path.display()))?;
    let pipeline = transform_chain::Pipeline::from_reader(BufReader::new(f))
        .with_context(|| format!("load pipeline document '{}'", args.in_path.display()))?;

    tracing::info!(ops = pipeline.len(), "pipeline loaded");
    println!("{}", pipeline.render());
    if args.fingerprint {
        println!("{}", pipeline.fingerprint());
    }
    Ok(())
}

fn cmd_schema(args: SchemaArgs) -> anyhow::Result<()> {
    let schemas: Vec<_> = match &args.kind {
        Some(kind) => vec![
            transform_chain::schema(kind)
                .with_context(|| format!("unknown operation kind '{kind}'"))?,
        ],
        None => transform_chain::schemas().to_vec(),
    };

    for schema in schemas {
        println!("{}", schema.kind);
        for opt in schema.options {
            println!("  {:<20} {}", opt.name, opt.ty.describe());
        }
    }
    Ok(())
}
