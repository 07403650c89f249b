use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use git_tag_bump::cli::{run_tag_workflow, BumpSelection, TagWorkflowArgs, WorkflowResult};
use git_tag_bump::config::{self, Config};
use git_tag_bump::domain::{BumpCategory, PreReleaseFormat};
use git_tag_bump::git::Git2Repository;
use git_tag_bump::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BumpMode {
    Major,
    Minor,
    Patch,
    None,
    /// Classify the branch name with the configured rules
    Auto,
}

impl From<BumpMode> for BumpSelection {
    fn from(mode: BumpMode) -> Self {
        match mode {
            BumpMode::Major => BumpSelection::Explicit(BumpCategory::Major),
            BumpMode::Minor => BumpSelection::Explicit(BumpCategory::Minor),
            BumpMode::Patch => BumpSelection::Explicit(BumpCategory::Patch),
            BumpMode::None => BumpSelection::Explicit(BumpCategory::None),
            BumpMode::Auto => BumpSelection::FromBranch,
        }
    }
}

#[derive(clap::Parser)]
#[command(
    name = "git-tag-bump",
    version,
    about = "Compute the next semantic version tag for a git repository"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, default_value = ".", help = "Path to the repository")]
    repo_path: String,

    #[arg(short, long, value_enum, default_value_t = BumpMode::Patch, help = "Bump type")]
    bump: BumpMode,

    #[arg(long, help = "Branch name to classify instead of the checked-out branch")]
    branch: Option<String>,

    #[arg(long, help = "Version to bump instead of the latest tag")]
    base: Option<String>,

    #[arg(long, help = "Let --base win when it disagrees with the repository tags")]
    allow_base_mismatch: bool,

    #[arg(long, help = "Whether to create a pre-release")]
    pre_release: bool,

    #[arg(long, help = "Pre-release format: semver, date or datetime")]
    prerelease_format: Option<PreReleaseFormat>,

    #[arg(long, help = "Pre-release prefix")]
    prerelease_prefix: Option<String>,

    #[arg(long, help = "Consider pre-release tags when looking for the latest version")]
    include_prereleases: bool,

    #[arg(long, help = "Bump type used when no branch rule matches")]
    fallback_bump: Option<BumpCategory>,

    #[arg(long, help = "Create the tag locally")]
    create_tag: bool,

    #[arg(long, help = "Create the tag and push it to the remote")]
    push: bool,

    #[arg(long, help = "Remote to push to")]
    remote: Option<String>,

    #[arg(long, help = "Compute the tag without touching the repository")]
    dry_run: bool,

    #[arg(long, help = "Show the branch rules and exit")]
    list_rules: bool,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,
}

impl Args {
    /// Command line values, falling back to the configuration file
    fn workflow_args(&self, config: &Config) -> TagWorkflowArgs {
        TagWorkflowArgs {
            bump: self.bump.into(),
            branch: self.branch.clone(),
            base: self.base.clone(),
            allow_base_mismatch: self.allow_base_mismatch,
            include_prereleases: self.include_prereleases,
            pre_release: self.pre_release,
            prerelease_format: self.prerelease_format.unwrap_or(config.prerelease.format),
            prerelease_prefix: self
                .prerelease_prefix
                .clone()
                .unwrap_or_else(|| config.prerelease.prefix.clone()),
            fallback_bump: self.fallback_bump.or(config.behavior.fallback_bump),
            create_tag: self.create_tag,
            push: self.push,
            remote: self
                .remote
                .clone()
                .unwrap_or_else(|| config.behavior.remote.clone()),
            dry_run: self.dry_run,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let rules = config.rule_set().context("Error loading branch rules")?;

    if args.list_rules {
        ui::display_rules(&rules);
        return Ok(());
    }

    let repo = Git2Repository::open(&args.repo_path)?;
    let workflow_args = args.workflow_args(&config);
    let result = run_tag_workflow(&repo, &rules, &workflow_args)?;

    report(&result, &workflow_args);
    println!("{}", result.tag);
    Ok(())
}

fn report(result: &WorkflowResult, args: &TagWorkflowArgs) {
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    if let Some(branch) = &result.branch {
        ui::display_status(&format!("Branch '{}' requires a {} bump", branch, result.bump));
    }
    ui::display_proposed_tag(&result.base.to_string(), &result.tag);

    if args.dry_run && (args.create_tag || args.push) {
        ui::display_status("Dry run: no tag created");
    } else if result.pushed {
        ui::display_success(&format!("Pushed tag {} to {}", result.tag, args.remote));
    } else if result.created {
        ui::display_success(&format!("Created tag: {}", result.tag));
        ui::display_manual_push_instruction(&result.tag, &args.remote);
    }
}
