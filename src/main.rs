use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_server::api::create_router;
use search_server::{DocumentStatus, NewDocument, SearchServer, VERSION};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about = "In-memory TF-IDF document search server", long_about = None)]
struct Args {
    /// Space-separated stop words, applied before any document is indexed
    #[arg(short, long, default_value = "")]
    stop_words: String,

    /// JSON file with an array of {id, text, status, ratings} documents
    #[arg(short, long)]
    docs: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Print the top documents for a query
    Search {
        #[arg(short, long)]
        query: String,

        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
    },
    /// Print the query words found in one document
    Match {
        #[arg(short, long)]
        query: String,

        #[arg(long)]
        id: i32,
    },
}

// Load documents from JSON
fn load_documents(path: &Path) -> Result<Vec<NewDocument>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let docs = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse documents from {}", path.display()))?;
    Ok(docs)
}

fn build_server(args: &Args) -> Result<SearchServer> {
    let mut server = SearchServer::with_stop_words(&args.stop_words);

    if let Some(path) = &args.docs {
        let start = Instant::now();
        let docs = load_documents(path)?;
        let added = server
            .add_documents(docs)
            .context("Failed to index documents")?;
        tracing::info!("Indexed {} documents in {:?}", added, start.elapsed());
    }

    Ok(server)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("search_server=info")),
        )
        .init();

    let args = Args::parse();
    let server = build_server(&args)?;

    match args.command {
        Command::Serve { addr } => {
            let router = create_router(Arc::new(RwLock::new(server)));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on {}", addr);
            axum::serve(listener, router).await?;
        }
        Command::Search { query, status } => {
            let start = Instant::now();
            let documents = server.find_top_documents_by_status(&query, status)?;
            tracing::info!("Search found {} documents in {:?}", documents.len(), start.elapsed());

            for doc in documents {
                println!(
                    "{{ document_id = {}, relevance = {:.6}, rating = {} }}",
                    doc.id, doc.relevance, doc.rating
                );
            }
        }
        Command::Match { query, id } => {
            let matched = server.match_document(&query, id)?;
            println!(
                "{{ document_id = {}, status = {}, words = {} }}",
                id,
                matched.status,
                matched.words.join(" ")
            );
        }
    }

    Ok(())
}
