//! Command-line argument parsing for the explorer.
//!
//! Parses args manually (no external dependencies) to keep the binary
//! lean. Supports environment variable overrides via the `BANDO_EXPLORER_*`
//! prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
bando-explorer — browse tender evaluation criteria in the terminal

USAGE:
    bando-explorer [OPTIONS]

SNAPSHOT SOURCE (one required):
    --file=PATH          Load an analysis JSON from disk
    --url=BASE           Fetch from a running analysis backend
    --sample             Use the bundled sample analysis

OPTIONS:
    --doc=NAME           Document to fetch with --url (default: first listed)
    --ascii              ASCII tree guides instead of Unicode
    --collapsed          Start with every criterion collapsed
    --no-color           Plain output without colors or attributes
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Up/Down, k/j         Move between visible criteria
    Enter / Space        Collapse or expand the current criterion
    e / c / t            Expand all / collapse all / toggle all
    d                    Expand or shorten the current description
    x                    Compact mode: shorten every description
    s                    Open/close the similar-criteria panel
    n / p                Cycle the similar-criteria selection
    ?                    Toggle the help overlay
    q                    Quit

ENVIRONMENT VARIABLES:
    BANDO_EXPLORER_FILE      Override --file
    BANDO_EXPLORER_ASCII     Set to 1 to force --ascii
    BANDO_EXPLORER_NO_COLOR  Set to 1 to force --no-color
    BANDO_BACKEND_URL        Backend base URL (see bando-client)";

/// Parsed command-line options.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Analysis JSON on disk.
    pub file: Option<String>,
    /// Backend base URL.
    pub url: Option<String>,
    /// Document to fetch from the backend.
    pub doc: Option<String>,
    /// Use the bundled sample snapshot.
    pub sample: bool,
    /// ASCII guides.
    pub ascii: bool,
    /// Start fully collapsed.
    pub collapsed: bool,
    /// Disable colors and attributes.
    pub no_color: bool,
}

impl Opts {
    /// Parse `std::env::args`, applying environment overrides. Exits the
    /// process on `--help`, `--version` or malformed input.
    #[must_use]
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(file) = env::var("BANDO_EXPLORER_FILE") {
            if !file.is_empty() {
                opts.file = Some(file);
            }
        }
        opts.ascii = env_flag("BANDO_EXPLORER_ASCII");
        opts.no_color = env_flag("BANDO_EXPLORER_NO_COLOR");

        for arg in env::args().skip(1) {
            if let Some(value) = arg.strip_prefix("--file=") {
                opts.file = Some(value.to_string());
            } else if let Some(value) = arg.strip_prefix("--url=") {
                opts.url = Some(value.to_string());
            } else if let Some(value) = arg.strip_prefix("--doc=") {
                opts.doc = Some(value.to_string());
            } else {
                match arg.as_str() {
                    "--sample" => opts.sample = true,
                    "--ascii" => opts.ascii = true,
                    "--collapsed" => opts.collapsed = true,
                    "--no-color" => opts.no_color = true,
                    "--help" | "-h" => {
                        println!("{HELP_TEXT}");
                        process::exit(0);
                    }
                    "--version" | "-V" => {
                        println!("bando-explorer {VERSION}");
                        process::exit(0);
                    }
                    other => {
                        eprintln!("unknown option: {other}\n\n{HELP_TEXT}");
                        process::exit(2);
                    }
                }
            }
        }
        opts
    }

    /// Whether any snapshot source was given.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.sample || self.file.is_some() || self.url.is_some()
    }

    /// The help text, for the no-source error path.
    #[must_use]
    pub fn help() -> &'static str {
        HELP_TEXT
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}
