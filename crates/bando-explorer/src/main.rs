#![forbid(unsafe_code)]

//! bando-explorer binary entry point.

mod app;
mod cli;
mod term;

use std::error::Error;
use std::io;
use std::process;

use bando_client::{BackendClient, BackendConfig};
use bando_model::Analysis;
use crossterm::event::{self, Event};
use tracing::info;

use crate::app::App;

const SAMPLE_ANALYSIS: &str = include_str!("../assets/sample_analysis.json");

fn main() {
    let opts = cli::Opts::parse();
    init_tracing();

    if !opts.has_source() {
        eprintln!("no snapshot source given\n\n{}", cli::Opts::help());
        process::exit(2);
    }

    let analysis = match load_analysis(&opts) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("bando-explorer: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(analysis, &opts) {
        eprintln!("terminal error: {e}");
        process::exit(1);
    }
}

/// Opt-in logging: only wired up when `RUST_LOG` is set, and routed to
/// stderr so frames on stdout stay intact.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }
}

fn load_analysis(opts: &cli::Opts) -> Result<Analysis, Box<dyn Error>> {
    if opts.sample {
        return Ok(Analysis::from_json(SAMPLE_ANALYSIS)?);
    }
    if let Some(path) = &opts.file {
        let payload = std::fs::read_to_string(path)?;
        return Ok(Analysis::from_json(&payload)?);
    }
    if let Some(url) = &opts.url {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        return runtime.block_on(fetch_remote(url, opts.doc.as_deref()));
    }
    Err("no snapshot source given".into())
}

async fn fetch_remote(url: &str, doc: Option<&str>) -> Result<Analysis, Box<dyn Error>> {
    // Tuning still comes from the environment; the CLI url wins over
    // BANDO_BACKEND_URL.
    let mut config = BackendConfig::from_env().unwrap_or_else(|_| BackendConfig::new(url));
    config.base_url = url.trim_end_matches('/').to_string();
    let client = BackendClient::new(config)?;

    let name = match doc {
        Some(doc) => doc.to_owned(),
        None => client
            .list_analyses()
            .await?
            .into_iter()
            .next()
            .ok_or("the backend has no finished analyses")?,
    };
    info!(document = %name, "fetching analysis");
    Ok(client.fetch_analysis(&name).await?)
}

fn run(analysis: Analysis, opts: &cli::Opts) -> io::Result<()> {
    let mut app = App::new(analysis, opts.ascii, opts.collapsed);
    let mut session = term::TerminalSession::enter()?;
    let color = !opts.no_color;

    while !app.should_quit() {
        let (width, height) = crossterm::terminal::size()?;
        let frame = app.render(width, height);
        term::present(session.out(), &frame, color)?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}
