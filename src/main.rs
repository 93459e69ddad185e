use std::path::PathBuf;

use branchdiff_core::{BranchDiffConfig, ComparisonMode, OutputFormat};
use branchdiff_gitlab::{CompareRequest, GitLabClient};
use clap::{ArgAction, Parser};
use env_logger::Env;
use miette::{IntoDiagnostic, Result};

#[derive(Parser)]
#[command(
    name = "branchdiff",
    version,
    about = "Classify the files that differ between two GitLab branches",
    long_about = "Compares two branches of a GitLab project and prints which files were added,\n\
                   changed, deleted, renamed, or changed type, as JSON for CI pipelines.\n\n\
                   Requires GITLAB_API_TOKEN (or the variable named by gitlab.token_env).\n\n\
                   Examples:\n  \
                     branchdiff --project-id 42 --source-branch feature --target-branch main\n  \
                     branchdiff --project-id 42 --source-branch v2 --target-branch v1 --straight\n  \
                     branchdiff --project-id 42 --source-branch a --target-branch b --format text"
)]
struct Cli {
    /// Branch on which the changes exist
    #[arg(long, default_value = "")]
    source_branch: String,

    /// Branch with which to compare
    #[arg(long, default_value = "")]
    target_branch: String,

    /// Compare the branch tips directly instead of against their merge base
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        long_help = "Git comparison type.\n\n\
                       --straight / --straight=true   direct two-point comparison\n\
                       --straight=false (default)     three-dot comparison against the merge base"
    )]
    straight: bool,

    /// Project in which the branches reside
    #[arg(long, default_value_t = 0)]
    project_id: u64,

    /// GitLab API base URL (default: https://gitlab.com/api/v4)
    #[arg(long, env = "GITLAB_URL")]
    gitlab_url: Option<String>,

    /// Path to configuration file (default: .branchdiff.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        default_value = "json",
        long_help = "Output format for the report.\n\n\
                       Formats:\n  \
                         json      Pretty-printed JSON with snake_case keys (default)\n  \
                         text      Human-readable summary\n  \
                         markdown  GitHub-flavored Markdown"
    )]
    format: OutputFormat,

    /// Enable verbose (debug) logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .into_diagnostic()?;
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().into_diagnostic()?;
    let config = BranchDiffConfig::load(cli.config.as_deref(), &cwd)?;
    let gitlab = config.gitlab.with_base_url(cli.gitlab_url);

    let token = gitlab.resolve_token(|name| std::env::var(name).ok())?;

    let request = CompareRequest {
        project_id: cli.project_id,
        source_branch: cli.source_branch,
        target_branch: cli.target_branch,
        mode: ComparisonMode::from_straight(cli.straight),
    };
    request.validate()?;

    let client = GitLabClient::new(&gitlab, &token)?;
    log::info!(
        "comparing {} with {} in project {} via {}",
        request.source_branch,
        request.target_branch,
        request.project_id,
        client.base_url()
    );
    let entries = client.compare(&request).await?;

    let report = branchdiff_classify::classify(&entries);

    // Render fully before writing so a failure never leaves partial output.
    let output = match cli.format {
        OutputFormat::Json => report.to_json_pretty()?,
        OutputFormat::Text => report.to_string(),
        OutputFormat::Markdown => report.to_markdown(),
    };
    println!("{}", output.trim_end());

    Ok(())
}
