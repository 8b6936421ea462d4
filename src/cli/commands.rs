//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pagewalk CLI
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Listing definition file (YAML)
    #[arg(short, long, global = true)]
    pub listing: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Iterate the listing, printing items as JSON lines
    ///
    /// Binding --cap or --cursor hands control of pagination to you: the
    /// walk fetches a single page and prints the token to continue with.
    Walk {
        /// Stop fetching once this many items have been printed
        #[arg(long)]
        cap: Option<u64>,

        /// Continuation token to resume from
        #[arg(long)]
        cursor: Option<String>,

        /// Page-size hint forwarded to the service
        #[arg(long)]
        page_size: Option<u32>,

        /// Fetch a single page even without --cap or --cursor
        #[arg(long)]
        no_paginate: bool,

        /// Let a capped walk continue through an empty first page
        #[arg(long)]
        keep_going_on_empty: bool,
    },

    /// Fetch exactly one page, printing items and the next cursor
    Page {
        /// Continuation token to resume from
        #[arg(long)]
        cursor: Option<String>,

        /// Page-size hint forwarded to the service
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Validate a listing definition
    Validate,
}
