use anyhow::Result;
use clap::Parser;

use git_autover::config::{self, StrategyKind};
use git_autover::git::{Git2Repository, Repository};
use git_autover::metadata::MetadataMap;
use git_autover::strategy::{FullHistoryStrategy, NearestTagStrategy, Strategy};
use git_autover::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-autover",
    about = "Compute a version number from git tag history"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short,
        long,
        default_value = ".",
        help = "Directory from which the repository is discovered"
    )]
    dir: String,

    #[arg(
        short,
        long,
        help = "Strategy to use (nearest-tag or full-history), overriding the configured one"
    )]
    strategy: Option<String>,

    #[arg(short, long, help = "Also print the metadata that justified the version")]
    metadata: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-autover {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Cannot load configuration: {}", e));
            std::process::exit(1);
        }
    };

    let naming = match config.naming.compile() {
        Ok(naming) => naming,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Open repository and observe its working-tree state
    let repo = match Git2Repository::open(&args.dir) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let dirty = repo.is_dirty()?;
    let branch = repo.current_branch()?;

    let kind = match args.strategy.as_deref() {
        None => config.strategy.kind,
        Some("nearest-tag") => StrategyKind::NearestTag,
        Some("full-history") => StrategyKind::FullHistory,
        Some(other) => {
            ui::display_error(&format!(
                "Unknown strategy '{}' (expected nearest-tag or full-history)",
                other
            ));
            std::process::exit(1);
        }
    };

    let strategy: Box<dyn Strategy> = match kind {
        StrategyKind::NearestTag => Box::new(NearestTagStrategy::new(naming, dirty, branch)),
        StrategyKind::FullHistory => {
            let strategy = FullHistoryStrategy::new(naming, dirty);
            match config.strategy.depth_limit {
                Some(limit) => Box::new(strategy.with_depth_limit(limit)),
                None => Box::new(strategy),
            }
        }
    };

    // Materialize history per the strategy's search policy, then resolve
    let head = repo.head_commit()?;
    let parents = repo.collect_parents(strategy.as_ref())?;

    let mut metadata = MetadataMap::new();
    match strategy.build(&head, &parents, &mut metadata) {
        Ok(version) => {
            println!("{}", version);
            if args.metadata {
                ui::display_metadata(&metadata);
            }
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Version calculation failed: {}", e));
            std::process::exit(1);
        }
    }
}
