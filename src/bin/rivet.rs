use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use rivet::{checkout_branch, create_commit, diff_working_vs_index, history, status, Repository};

#[derive(Parser)]
#[command(name = "rivet", version, about = "A minimal content-addressed version-control engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a repository in the current directory
    Init,
    /// Stage files for the next commit
    Add {
        /// Files to stage
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove paths from the staging area
    Rm {
        /// Repository-relative paths to unstage
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Record the staged set as a new commit
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// Show staged, modified, and untracked paths
    Status,
    /// Show differences between working files and staged content
    Diff,
    /// List branches, or create or delete one
    Branch {
        /// Branch to create (or delete with -d)
        name: Option<String>,
        /// Delete the named branch
        #[arg(short, long, requires = "name")]
        delete: bool,
    },
    /// Switch to a branch, replacing the working directory with its
    /// snapshot
    Checkout {
        /// Branch to switch to
        name: String,
    },
    /// Show the commit history of the current branch
    Log,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn open_repo() -> rivet::Result<Repository> {
    Repository::find(std::env::current_dir()?)
}

fn run(cli: Cli) -> rivet::Result<()> {
    match cli.command {
        Command::Init => {
            let repo = Repository::init(std::env::current_dir()?)?;
            println!(
                "Initialized empty rivet repository in {}",
                repo.meta_dir().display()
            );
        }

        Command::Add { paths } => {
            let repo = open_repo()?;
            let store = repo.objects();
            let mut index = repo.index()?;
            for path in paths {
                index.add(&path, &store)?;
                println!("added {}", path.display());
            }
        }

        Command::Rm { paths } => {
            let repo = open_repo()?;
            let mut index = repo.index()?;
            for path in paths {
                index.remove(&path)?;
                println!("unstaged {}", path);
            }
        }

        Command::Commit { message } => {
            let repo = open_repo()?;
            let hash = create_commit(&repo, &message)?;
            println!("[{}] {}", repo.current_branch()?, hash);
        }

        Command::Status => {
            let repo = open_repo()?;
            let report = status(&repo)?;

            if report.is_clean() {
                println!("nothing to report, working directory clean");
            }
            if !report.staged.is_empty() {
                println!("Changes to be committed:");
                for path in &report.staged {
                    println!("  {}", path);
                }
            }
            if !report.modified.is_empty() {
                println!("Changes not staged for commit:");
                for path in &report.modified {
                    println!("  {}", path);
                }
            }
            if !report.untracked.is_empty() {
                println!("Untracked files:");
                for path in &report.untracked {
                    println!("  {}", path);
                }
            }
        }

        Command::Diff => {
            let repo = open_repo()?;
            for entry in diff_working_vs_index(&repo)? {
                println!("diff a/{0} b/{0}", entry.path);
                print!("{}", entry.patch);
            }
        }

        Command::Branch { name, delete } => {
            let repo = open_repo()?;
            match name {
                Some(name) if delete => {
                    repo.branches().delete(&name)?;
                    println!("deleted branch {}", name);
                }
                Some(name) => {
                    repo.branches().create(&name)?;
                    println!("created branch {}", name);
                }
                None => {
                    let current = repo.current_branch()?;
                    for branch in repo.branches().list()? {
                        let marker = if branch == current { "*" } else { " " };
                        println!("{} {}", marker, branch);
                    }
                }
            }
        }

        Command::Checkout { name } => {
            let repo = open_repo()?;
            checkout_branch(&repo, &name)?;
            println!("switched to branch {}", name);
        }

        Command::Log => {
            let repo = open_repo()?;
            for (hash, commit) in history(&repo)? {
                let date = chrono::DateTime::from_timestamp(commit.timestamp as i64, 0)
                    .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| commit.timestamp.to_string());
                println!("commit {}", hash);
                println!("date   {}", date);
                println!();
                println!("    {}", commit.message);
                println!();
            }
        }
    }

    Ok(())
}
