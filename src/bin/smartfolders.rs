use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitCode};

use clap::Parser;
use tracing::{error, warn};

use smartfolders::{Config, Feedback, FolderBrowser, MatchMode, Spotlight};

/// Browse your Smart Folders from Alfred.
#[derive(Debug, Parser)]
#[command(name = "smartfolders", version, about)]
struct Args {
    /// Browse this folder only; QUERY filters its contents.
    #[arg(short = 'f', long = "folder", value_name = "NAME")]
    folder: Option<String>,

    /// Matching strategy for content filters: prefix, substring or fuzzy.
    #[arg(long, value_name = "MODE")]
    match_mode: Option<MatchMode>,

    /// Cap on emitted rows.
    #[arg(long, value_name = "N")]
    max_results: Option<usize>,

    /// Open the bundled help file and exit.
    #[arg(long)]
    helpfile: bool,

    /// A folder-name prefix, or a folder name followed by a content filter.
    query: Option<String>,
}

fn main() -> ExitCode {
    let _guard = smartfolders::init_logging();
    let args = Args::parse();

    if args.helpfile {
        open_helpfile();
        return ExitCode::SUCCESS;
    }

    let config = Config::from_env().with_overrides(args.match_mode, args.max_results);
    let browser = FolderBrowser::new(Spotlight::new(), Spotlight::new(), config);
    let query = args.query.unwrap_or_default();
    let hits = browser.respond(args.folder.as_deref(), &query);

    let feedback = Feedback::from_hits(&hits, config.max_results);
    if let Err(err) = feedback.write_to(io::stdout().lock()) {
        error!("could not write feedback: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Best-effort `open` of the Help.html shipped next to the executable.
fn open_helpfile() {
    let Some(help) = helpfile_path() else {
        warn!("could not locate Help.html");
        return;
    };
    match Command::new("open").arg(&help).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("open {} exited with {status}", help.display()),
        Err(err) => warn!("could not open {}: {err}", help.display()),
    }
}

fn helpfile_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("Help.html"))
}
