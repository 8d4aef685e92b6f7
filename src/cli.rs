// src/cli.rs
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Browse the Solutio SaaS catalogue from the terminal.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "solutio", version, about)]
pub struct CliArgs {
    /// Display language (default: catalogue source language)
    #[arg(short, long = "lang", visible_alias = "language", value_name = "CODE")]
    pub language: Option<String>,

    /// Filter on name or description
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only tools in this category ("all" = no filter)
    #[arg(short, long, value_name = "NAME")]
    pub category: Option<String>,

    /// Only tools for this audience ("all" = no filter)
    #[arg(short, long, value_name = "NAME")]
    pub target: Option<String>,

    /// Number of result pages to reveal
    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=1000)
    )]
    pub pages: usize,

    /// Ignore the cached snapshot and fetch again
    #[arg(long)]
    pub refresh: bool,

    /// Use this config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            language: None,
            search: None,
            category: None,
            target: None,
            pages: 1,
            refresh: false,
            config: None,
        }
    }
}
