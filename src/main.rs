use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use git_release::config;
use git_release::context::ReleaseContext;
use git_release::manifest::NpmManifest;
use git_release::ui;
use git_release::vcs::Git2Vcs;
use git_release::workflow::{self, ReleaseOutcome};

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Bump the package version, then commit, tag, and push the release"
)]
struct Args {
    #[arg(help = "Release target: patch, minor, major, or an explicit version like 1.2.3")]
    target: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Git remote to push to (overrides configuration)")]
    remote: Option<String>,

    #[arg(short = 'y', long, help = "Skip the confirmation prompt")]
    yes: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            ui::display_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let config =
        config::load_config(args.config.as_deref()).context("failed to load configuration")?;

    let workdir = std::env::current_dir().context("cannot determine working directory")?;
    let ctx = ReleaseContext {
        remote: args.remote.unwrap_or_else(|| config.remote.clone()),
        dry_run: args.dry_run,
        assume_yes: args.yes,
        workdir,
    };

    let vcs = Git2Vcs::discover(&ctx.workdir)?;
    let mut manifest = NpmManifest::open(&ctx.workdir)?;
    let mut prompt = ui::TerminalPrompt;

    let outcome = workflow::run_release(
        &ctx,
        &config,
        args.target.as_deref(),
        &vcs,
        &mut manifest,
        &mut prompt,
    )?;

    Ok(match outcome {
        ReleaseOutcome::UsageShown => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
