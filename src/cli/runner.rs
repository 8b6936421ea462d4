//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_listing, ListingConfig};
use crate::driver::{IterateOptions, Pager};
use crate::error::{Error, Result};
use crate::fetch::HttpPageFetcher;
use crate::types::PagingMode;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

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
            Commands::Walk {
                cap,
                cursor,
                page_size,
                no_paginate,
                keep_going_on_empty,
            } => {
                self.walk(
                    *cap,
                    cursor.clone(),
                    *page_size,
                    *no_paginate,
                    *keep_going_on_empty,
                )
                .await
            }
            Commands::Page { cursor, page_size } => {
                self.page(cursor.clone(), *page_size).await
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load the listing definition
    fn load_listing(&self) -> Result<ListingConfig> {
        let path = self
            .cli
            .listing
            .as_ref()
            .ok_or_else(|| Error::config("Listing file not specified (use -l flag)"))?;
        load_listing(path)
    }

    /// Walk the listing, printing items as JSON lines
    async fn walk(
        &self,
        cap: Option<u64>,
        cursor: Option<String>,
        page_size: Option<u32>,
        no_paginate: bool,
        keep_going_on_empty: bool,
    ) -> Result<()> {
        let config = self.load_listing()?;
        let name = config.display_name().to_string();
        let fetcher = HttpPageFetcher::new(config)?;

        let mode = PagingMode::infer(cursor.is_some(), cap.is_some(), no_paginate);
        if mode.is_manual() {
            info!("Pagination is under caller control for {name}");
        } else {
            info!("Auto-iterating {name}");
        }

        let options = IterateOptions {
            initial_cursor: cursor,
            cap,
            paging_mode: mode,
            page_size,
            stop_capped_on_empty: !keep_going_on_empty,
        };

        let token = CancellationToken::new();
        let signal_token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal_token.cancel();
            }
        });

        let mut pager = Pager::new(fetcher, options)?.with_cancellation(token);

        let outcome = loop {
            match pager.next_page().await {
                Ok(Some(items)) => {
                    for item in items {
                        println!("{}", serde_json::to_string(&item)?);
                    }
                }
                Ok(None) => break Ok(()),
                Err(e) if e.is_cancelled() => {
                    warn!("{e}");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        if let Some(cursor) = pager.resume_cursor() {
            info!("Resume with --cursor {cursor}");
        }

        outcome
    }

    /// Fetch exactly one page, printing items and the next cursor
    async fn page(&self, cursor: Option<String>, page_size: Option<u32>) -> Result<()> {
        let config = self.load_listing()?;
        let fetcher = HttpPageFetcher::new(config)?;

        let options = IterateOptions {
            initial_cursor: cursor,
            cap: None,
            paging_mode: PagingMode::Manual,
            page_size,
            stop_capped_on_empty: true,
        };

        let mut pager = Pager::new(fetcher, options)?;
        let items = pager.next_page().await?.unwrap_or_default();

        let output = json!({
            "items": items,
            "next_cursor": pager.resume_cursor(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }

    /// Validate the listing definition
    fn validate(&self) -> Result<()> {
        let config = self.load_listing()?;
        println!("Listing '{}' is valid", config.display_name());
        Ok(())
    }
}
