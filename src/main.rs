use anyhow::Context;
use clap::Parser;
use noodles::core::Region;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vcf_intervals::{
    IntervalOptions, ResourceLocator, VariantReader,
    config::{Cli, Command, DictArgs, IntervalsArgs, QueryArgs, ServeConfig},
    handlers::{AppState, create_router},
    storage::LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout carries command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| cli.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Command::Intervals(args) => intervals(args),
        Command::Dict(args) => dict(args),
        Command::Query(args) => query(args),
        Command::Serve(config) => serve(config).await,
    }
}

fn output(path: Option<&std::path::Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn intervals(args: IntervalsArgs) -> anyhow::Result<()> {
    let locator = ResourceLocator::parse(&args.input)?;
    let mut builder = VariantReader::builder(locator).require_index(false);
    if let Some(index) = &args.index {
        builder = builder.index(ResourceLocator::parse(index)?);
    }

    let reader = builder.open()?;
    let list = reader.to_interval_list_with(IntervalOptions {
        include_filtered: args.include_filtered,
    })?;
    reader.close()?;

    list.write_to(output(args.output.as_deref())?)?;
    Ok(())
}

fn dict(args: DictArgs) -> anyhow::Result<()> {
    let locator = ResourceLocator::parse(&args.input)?;
    let dictionary = VariantReader::read_sequence_dictionary(&locator)?;

    let mut out = output(None)?;
    dictionary.write_sq_lines(&mut out)?;
    out.flush()?;
    Ok(())
}

fn query(args: QueryArgs) -> anyhow::Result<()> {
    let locator = ResourceLocator::parse(&args.input)?;
    let region = args
        .region
        .parse::<Region>()
        .map_err(|e| vcf_intervals::Error::InvalidRegion(format!("{}: {}", args.region, e)))?;

    let mut builder = VariantReader::builder(locator);
    if let Some(index) = &args.index {
        builder = builder.index(ResourceLocator::parse(index)?);
    }
    let mut reader = builder.open()?;

    let mut out = output(None)?;
    for record in reader.query(&region)? {
        serde_json::to_writer(&mut out, &record?)?;
        writeln!(out)?;
    }
    out.flush()?;

    reader.close()?;
    Ok(())
}

async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    let storage = Arc::new(LocalStorage::new(config.data_dir.clone()));
    let state = AppState { storage };

    let app = create_router(state);
    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let addr = config.bind_address();
    tracing::info!("Starting vcf-intervals server on {}", addr);
    tracing::info!("Data directory: {:?}", config.data_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
