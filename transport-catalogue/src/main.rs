use std::error::Error;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};

use transport_catalogue::logging;
use transport_catalogue::requests::{
    RequestHandler, load_document, process_document, read_document,
};
use transport_catalogue::web::{AppState, create_router};

/// Environment variable overriding the listen address of `serve`.
const ADDR_ENV: &str = "TRANSPORT_CATALOGUE_ADDR";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

const USAGE: &str = "\
usage: transport-catalogue [DOCUMENT]
       transport-catalogue serve DOCUMENT

Without `serve`, reads a JSON request document from DOCUMENT (or stdin) and
writes the answers to stdout. With `serve`, loads the network from DOCUMENT
and answers queries over HTTP.";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => answer_batch(None),
        [flag] if flag == "-h" || flag == "--help" => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        [command, path] if command == "serve" => serve(Path::new(path)).await,
        [path] => answer_batch(Some(Path::new(path))),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Answer every stat request of a document, writing a JSON array to stdout.
fn answer_batch(path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let document = match path {
        Some(path) => load_document(path)?,
        None => read_document(io::stdin().lock())?,
    };
    let responses = process_document(&document)?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &responses)?;
    writeln!(stdout)?;
    Ok(())
}

/// Load the network from a document and serve queries until interrupted.
async fn serve(path: &Path) -> Result<(), Box<dyn Error>> {
    let document = load_document(path)?;
    if !document.stat_requests.is_empty() {
        info!(
            count = document.stat_requests.len(),
            "ignoring stat requests in served document"
        );
    }
    let handler = RequestHandler::from_document(&document)?;

    let addr: SocketAddr = std::env::var(ADDR_ENV)
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .map_err(|e| format!("invalid {ADDR_ENV}: {e}"))?;

    let app = create_router(AppState::new(handler));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "transport catalogue listening");
    info!("endpoints: GET /health, GET /bus/:name, GET /stop/:name, GET /route?from=&to=, GET /map, POST /stat");

    axum::serve(listener, app).await?;
    Ok(())
}
