//! prdigest - CLI entry point.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use prdigest::analysis::{AnalyzerOptions, ChangeAnalyzer};
use prdigest::config::{self, Config, DisplayMode};
use prdigest::git::repo::toplevel;
use prdigest::git::{SystemGit, ensure_work_tree, resolve_base};
use prdigest::report::{markdown_document, render_json, render_terminal, write_atomic};

/// Summarize the changes between the current branch and a base branch.
#[derive(Parser, Debug)]
#[command(name = "prdigest")]
#[command(about = "Summarize the changes between the current branch and a base branch")]
#[command(version)]
struct Cli {
    /// Base branch to compare against (default: main, or PRDIGEST_BASE)
    #[arg(value_name = "BASE")]
    base_branch: Option<String>,

    /// Base branch to compare against (same as the positional argument)
    #[arg(long, value_name = "BRANCH")]
    base: Option<String>,

    /// Build the Markdown on the repository's PR template (or a built-in one)
    #[arg(long)]
    template: bool,

    /// Detect likely breaking changes
    #[arg(long)]
    breaking: bool,

    /// Print Markdown instead of the terminal report
    #[arg(long)]
    markdown: bool,

    /// Print the summary as JSON
    #[arg(long, conflicts_with = "markdown")]
    json: bool,

    /// Also write the Markdown summary to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Skip reviewer suggestions (one git log per changed file)
    #[arg(long)]
    no_reviewers: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let display = if self.json {
            DisplayMode::Json
        } else if self.markdown {
            DisplayMode::Markdown
        } else {
            DisplayMode::Terminal
        };

        let explicit_base = self.base_branch.as_deref().or(self.base.as_deref());

        Config {
            base_branch: config::resolve_base_branch(explicit_base),
            display,
            use_template: self.template,
            detect_breaking: self.breaking,
            suggest_reviewers: !self.no_reviewers,
            output: self.output,
            git_program: config::git_program_override(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config();
    debug!("Resolved config: {:?}", config);

    run(&config)
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_new(config::log_filter(verbose))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let ansi = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &Config) -> Result<()> {
    // Step 1: Locate git and check we are inside a work tree
    let git = SystemGit::locate(config.git_program.clone()).context("git is required")?;
    ensure_work_tree(&git)
        .context("Not inside a git repository. Run prdigest from within a git working tree.")?;

    // Step 2: Resolve the base branch
    let base = resolve_base(&git, &config.base_branch);

    // Step 3: Analyze
    let options = AnalyzerOptions {
        detect_breaking: config.detect_breaking,
        suggest_reviewers: config.suggest_reviewers,
    };
    let summary = ChangeAnalyzer::new(&git, options).analyze(&base);

    if !summary.has_changes() {
        let warning = format!(
            "⚠ No changes found between {} and HEAD. Nothing to summarize.",
            base.resolved
        );
        eprintln!("{}", warning.yellow());
        return Ok(());
    }

    // Step 4: Display
    let repo_root = toplevel(&git);
    let markdown = markdown_document(&summary, config.use_template, repo_root.as_deref());

    match config.display {
        DisplayMode::Terminal => print!("{}", render_terminal(&summary)),
        DisplayMode::Markdown => print!("{}", markdown),
        DisplayMode::Json => println!("{}", render_json(&summary)?),
    }

    // Step 5: Persist the Markdown form if requested
    if let Some(path) = &config.output {
        write_atomic(path, &markdown)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        eprintln!("{} Wrote Markdown summary to {}", "✓".green(), path.display());
    }

    Ok(())
}
