//! CLI commands and argument parsing

use crate::error::Result;
use crate::pagination::{Paging, PagingRequest};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Virtual pagination over size-limited REST APIs
#[derive(Parser, Debug)]
#[command(name = "virtual-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer access token (overrides config auth)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Page size used when none is requested
    #[arg(long, global = true)]
    pub default_page_size: Option<u32>,

    /// Largest page size the API accepts
    #[arg(long, global = true)]
    pub max_page_size: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the physical pages needed for a logical window
    Plan {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Collect a logical window from an endpoint
    Fetch {
        /// Endpoint path, relative to the base URL
        path: String,

        /// Dotted path to the records array in the response
        #[arg(long)]
        records_path: Option<String>,

        /// Extra query parameter (key=value), repeatable
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        #[command(flatten)]
        paging: PagingArgs,
    },
}

/// Logical window arguments.
///
/// Signed so that negative input reaches validation and gets a proper error.
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Page number (1-based)
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Page size
    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,

    /// Drop this many items from the start of the window
    #[arg(long, allow_negative_numbers = true)]
    pub ignore_first: Option<i64>,

    /// Drop this many items from the end of the window
    #[arg(long, allow_negative_numbers = true)]
    pub ignore_last: Option<i64>,
}

impl PagingArgs {
    /// Convert to a validated descriptor; `None` when no paging flag was given
    pub fn to_paging(&self) -> Result<Option<Paging>> {
        if self.page.is_none()
            && self.page_size.is_none()
            && self.ignore_first.is_none()
            && self.ignore_last.is_none()
        {
            return Ok(None);
        }

        let request = PagingRequest {
            page: self.page.unwrap_or(0),
            page_size: self.page_size.unwrap_or(0),
            ignore_first_n: self.ignore_first.unwrap_or(0),
            ignore_last_n: self.ignore_last.unwrap_or(0),
        };
        Paging::try_from(request).map(Some)
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let cli = Cli::try_parse_from([
            "virtual-pager",
            "plan",
            "--page",
            "2",
            "--page-size",
            "201",
        ])
        .unwrap();

        let Commands::Plan { paging } = cli.command else {
            panic!("Expected Plan");
        };
        assert_eq!(paging.to_paging().unwrap(), Some(Paging::new(2, 201)));
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from([
            "virtual-pager",
            "--base-url",
            "https://api.example.com",
            "fetch",
            "/athlete/activities",
            "--records-path",
            "data",
            "-q",
            "before=1700000000",
            "--ignore-first",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("https://api.example.com"));
        let Commands::Fetch {
            path,
            records_path,
            query,
            paging,
        } = cli.command
        else {
            panic!("Expected Fetch");
        };
        assert_eq!(path, "/athlete/activities");
        assert_eq!(records_path.as_deref(), Some("data"));
        assert_eq!(query, vec![("before".to_string(), "1700000000".to_string())]);
        assert_eq!(paging.ignore_first, Some(3));
    }

    #[test]
    fn test_no_paging_flags_means_defaults() {
        assert_eq!(PagingArgs::default().to_paging().unwrap(), None);
    }

    #[test]
    fn test_negative_paging_is_rejected() {
        let cli =
            Cli::try_parse_from(["virtual-pager", "plan", "--page", "-1"]).unwrap();
        let Commands::Plan { paging } = cli.command else {
            panic!("Expected Plan");
        };
        assert!(paging.to_paging().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_bad_query_pair() {
        assert!(parse_key_value("novalue").is_err());
        assert_eq!(
            parse_key_value("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }
}
