//! docgrid binary entry point.

mod cli;
mod columns;
mod error;

use crate::cli::{Cli, Command, GridFormat};
use crate::columns::{load_columns, COLUMNS_TEMPLATE};
use crate::error::{CliError, Result};
use clap::Parser;
use docgrid_client::docling::content_type_for;
use docgrid_client::{DoclingConverter, OllamaClient};
use docgrid_domain::traits::DocumentConverter;
use docgrid_domain::{Column, Document};
use docgrid_engine::{RunController, RunSummary};
use docgrid_export::{export_csv, export_json};
use docgrid_store::ResultStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            files,
            columns,
            model,
            endpoint,
            convert_endpoint,
            overwrite,
            select,
            format,
            out,
        } => {
            run(
                files,
                columns,
                model,
                endpoint,
                convert_endpoint,
                overwrite,
                select,
                format,
                out,
            )
            .await?
        }
        Command::Convert { file, endpoint } => convert(&file, &endpoint).await?,
        Command::ColumnsInit { path } => columns_init(&path)?,
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn run(
    files: Vec<PathBuf>,
    columns_path: PathBuf,
    model: String,
    endpoint: String,
    convert_endpoint: Option<String>,
    overwrite: bool,
    select: Vec<String>,
    format: GridFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let columns = load_columns(&columns_path)?;
    let documents = load_documents(&files, convert_endpoint.as_deref()).await?;
    info!(
        documents = documents.len(),
        columns = columns.len(),
        model,
        "grid loaded"
    );

    let store = ResultStore::new();
    let controller = Arc::new(
        RunController::new(OllamaClient::new(endpoint), store.clone()).with_model(model),
    );

    let summary = if select.is_empty() {
        drive(&controller, documents.clone(), columns.clone(), overwrite, false).await?
    } else {
        let selected: Vec<Document> = documents
            .iter()
            .filter(|d| select.iter().any(|name| name == &d.name))
            .cloned()
            .collect();
        if selected.is_empty() {
            return Err(CliError::Selection(format!(
                "none of {:?} match a loaded document",
                select
            )));
        }
        drive(&controller, selected, columns.clone(), true, true).await?
    };

    eprintln!(
        "planned {}, merged {}, failed {}, discarded {}{}",
        summary.planned,
        summary.merged,
        summary.failed,
        summary.discarded,
        if summary.cancelled { " (cancelled)" } else { "" },
    );

    let grid = match format {
        GridFormat::Csv => export_csv(&documents, &columns, &store)?,
        GridFormat::Json => export_json(&documents, &columns, &store)?,
    };
    match out {
        Some(path) => std::fs::write(path, grid)?,
        None => print!("{}", grid),
    }
    Ok(())
}

/// Await the run while mapping Ctrl-C to a cooperative stop.
///
/// The run keeps draining after the stop signal; we await the same task so
/// the summary and column statuses reflect the settled state.
async fn drive(
    controller: &Arc<RunController<OllamaClient>>,
    documents: Vec<Document>,
    columns: Vec<Column>,
    overwrite: bool,
    rerun: bool,
) -> Result<RunSummary> {
    let runner = Arc::clone(controller);
    let mut run = tokio::spawn(async move {
        if rerun {
            runner.rerun(&documents, &columns).await
        } else {
            runner.start(&documents, &columns, overwrite).await
        }
    });

    let summary = tokio::select! {
        res = &mut run => res?,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, stopping run");
            controller.stop();
            (&mut run).await?
        }
    };
    Ok(summary)
}

async fn load_documents(
    files: &[PathBuf],
    convert_endpoint: Option<&str>,
) -> Result<Vec<Document>> {
    let converter = convert_endpoint.map(DoclingConverter::new);
    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let document = match &converter {
            Some(converter) => {
                let bytes = tokio::fs::read(path).await?;
                converter.convert(&name, bytes).await?
            }
            None => {
                let content = tokio::fs::read_to_string(path).await?;
                Document::new(name.clone(), content, content_type_for(&name))
            }
        };
        documents.push(document);
    }
    Ok(documents)
}

async fn convert(file: &Path, endpoint: &str) -> Result<()> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    let bytes = tokio::fs::read(file).await?;
    let document = DoclingConverter::new(endpoint).convert(&name, bytes).await?;
    print!("{}", document.content);
    Ok(())
}

fn columns_init(path: &Path) -> Result<()> {
    std::fs::write(path, COLUMNS_TEMPLATE)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
