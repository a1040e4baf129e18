//! CLI runner - executes commands

use crate::auth::AuthConfig;
use crate::cli::commands::{Cli, Commands, OutputFormat, PagingArgs};
use crate::config::{load_config, PagerConfig};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpPageSource};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Plan { paging } => self.plan(paging),
            Commands::Fetch {
                path,
                records_path,
                query,
                paging,
            } => {
                self.fetch(path, records_path.as_deref(), query, paging)
                    .await
            }
        }
    }

    /// Load the config file (if any) and apply command-line overrides
    fn load_config(&self, require_base_url: bool) -> Result<PagerConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)
                .with_context(|| format!("Loading config '{}'", path.display()))?,
            None => PagerConfig::new(self.cli.base_url.clone().unwrap_or_default()),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(size) = self.cli.default_page_size {
            config.paging.default_page_size = size;
        }
        if let Some(size) = self.cli.max_page_size {
            config.paging.max_page_size = size;
        }
        if let Some(token) = &self.cli.token {
            config.auth = AuthConfig::bearer(token);
        }

        if require_base_url {
            config.validate()?;
        } else {
            config.paging.validate()?;
        }
        Ok(config)
    }

    /// Print the physical plan for a logical window
    fn plan(&self, args: &PagingArgs) -> Result<()> {
        let config = self.load_config(false)?;
        let paging = args.to_paging()?;
        let pages = config.pager().plan(paging.as_ref())?;

        for physical in &pages {
            self.output_message(&json!({
                "type": "PLAN",
                "paging": physical,
            }));
        }

        Ok(())
    }

    /// Collect a logical window and print its records
    async fn fetch(
        &self,
        path: &str,
        records_path: Option<&str>,
        query: &[(String, String)],
        args: &PagingArgs,
    ) -> Result<()> {
        let config = self.load_config(true)?;
        let paging = args.to_paging()?;
        let client = Arc::new(HttpClient::with_auth(
            config.client_config(),
            config.auth.clone(),
        )?);

        let mut source: HttpPageSource<Value> = HttpPageSource::new(client, path)
            .with_page_param(&config.http.page_param)
            .with_page_size_param(&config.http.page_size_param);
        if let Some(records_path) = records_path {
            source = source.with_records_path(records_path);
        }
        for (key, value) in query {
            source = source.with_query(key, value);
        }

        let start = Instant::now();
        let records = config.pager().collect(paging.as_ref(), &source).await?;

        let Some(records) = records else {
            self.output_message(&json!({
                "type": "LOG",
                "log": {
                    "level": "ERROR",
                    "message": format!("Resource '{path}' not found"),
                }
            }));
            return Err(Error::Other(format!("Resource '{path}' not found")));
        };

        info!(
            "Collected {} records from {} in {:?}",
            records.len(),
            path,
            start.elapsed()
        );

        for record in &records {
            self.output_message(&json!({
                "type": "RECORD",
                "record": record,
            }));
        }

        self.output_message(&json!({
            "type": "SUMMARY",
            "path": path,
            "paging": paging.unwrap_or_default().normalized(&config.paging),
            "records": records.len(),
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("command", &self.cli.command)
            .finish_non_exhaustive()
    }
}
