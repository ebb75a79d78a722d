//! changes - CLI entry point.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use changes::editor;
use changes::error::ChangelogError;
use changes::git::{DEFAULT_TAG_FORMAT, GitCli, workspace_tag_format};
use changes::github::GitHubUsers;
use changes::project::{PACKAGE_JSON, Project, install_scripts};
use changes::release::{CHANGES_FILE, ChangesConfig, CommitLinks, Completion, write_changes};

/// Generate a changelog section from the commits since the last release.
#[derive(Parser, Debug)]
#[command(name = "changes")]
#[command(about = "Generate a changelog section from the commits since the last release")]
#[command(version)]
struct Cli {
    /// Path to the changes file
    #[arg(short, long, default_value = CHANGES_FILE)]
    file: PathBuf,

    /// Tag name template, e.g. "${name}@${version}"
    #[arg(short, long, default_value = DEFAULT_TAG_FORMAT)]
    tag: String,

    /// Link commits, optionally to the given base URL (defaults to homepage or repository)
    #[arg(short, long, value_name = "URL")]
    commits: Option<Option<String>>,

    /// Append a "Released by" footer
    #[arg(long)]
    footer: bool,

    /// Package in a monorepo: tag with the directory name and only include its commits
    #[arg(short, long)]
    workspace: bool,

    /// Install the version scripts into package.json and exit
    #[arg(long)]
    init: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init {
        return run_init(&cli);
    }

    let project = Project::load(Path::new(PACKAGE_JSON))
        .context("Failed to read package.json. Run changes from the package root.")?;
    let config = build_config(&cli)?;
    let vcs = GitCli::new(".");

    let lookup = GitHubUsers::from_env();

    let state = match write_changes(&config, &project, &vcs, &lookup).await {
        Ok(state) => state,
        Err(e @ ChangelogError::VersionAlreadyExists { .. }) => {
            eprintln!("{}", e);
            if let ChangelogError::VersionAlreadyExists { pending, .. } = &e {
                if let Some(preview) = pending_preview(pending) {
                    eprintln!("{}", preview);
                }
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Failed to update changes file"),
    };

    let reviewed = match editor::open(&state.changes_file) {
        Ok(reviewed) => reviewed,
        Err(e) => {
            state.abort().context("Failed to restore changes file")?;
            return Err(e).context("Failed to open changes file for review");
        }
    };

    let completion = if reviewed {
        state
            .commit(&project.version, &vcs)
            .context("Failed to stage changes file")?
    } else {
        state.abort().context("Failed to restore changes file")?
    };

    Ok(match completion {
        Completion::Staged => ExitCode::SUCCESS,
        Completion::RolledBack => {
            eprintln!("Changes file reverted, release aborted");
            ExitCode::FAILURE
        }
    })
}

/// The changes since an already released version, `None` without any.
fn pending_preview(pending: &str) -> Option<String> {
    (!pending.is_empty()).then(|| format!("# Changes for next release:\n\n{}", pending))
}

/// Set up tracing on stderr, controlled by RUST_LOG (default: warn).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn run_init(cli: &Cli) -> Result<ExitCode> {
    let file = cli.file.to_string_lossy();
    let changes_file = (file != CHANGES_FILE).then_some(&*file);

    let installed = install_scripts(Path::new(PACKAGE_JSON), changes_file)
        .context("Failed to install version scripts")?;

    if installed {
        println!("✓ Added version scripts to {}", PACKAGE_JSON);
    } else {
        println!("{} already defines a \"version\" script, nothing to do", PACKAGE_JSON);
    }

    Ok(ExitCode::SUCCESS)
}

fn build_config(cli: &Cli) -> Result<ChangesConfig> {
    let commits = match &cli.commits {
        None => CommitLinks::Disabled,
        Some(None) => CommitLinks::FromMetadata,
        Some(Some(url)) => CommitLinks::Template(url.clone()),
    };

    let (tag_format, package_dir) = if cli.workspace {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let name = cwd
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("Current directory has no name")?;
        debug!(package = %name, "Workspace mode");
        (workspace_tag_format(&name), Some(PathBuf::from(".")))
    } else {
        (cli.tag.clone(), None)
    };

    Ok(ChangesConfig {
        changes_file: cli.file.clone(),
        tag_format,
        commits,
        footer: cli.footer,
        package_dir,
    })
}
