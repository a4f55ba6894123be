//! Library inventory and loan tracker.
//!
//! Without a subcommand, runs the interactive menu over the configured
//! libraries. Subcommands perform single operations for scripting.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use library::catalog::LibraryCatalog;
use library::core::error::CatalogError;
use library::exit_codes;
use library::io::config::{CONFIG_FILE_NAME, LibraryConfig, load_config, write_config};
use library::io::record_store::check_record;
use library::logging;
use library::session::{Console, Session};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "library",
    version,
    about = "Track book inventory and loans for a set of libraries"
)]
struct Cli {
    /// Config file (default: `<data-dir>/library.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the record files. Overrides the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive menu (the default).
    Menu,
    /// Write a default `library.toml`.
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print every title, one per line.
    Books(Target),
    /// Print every loan as `title<TAB>borrower`.
    Loans(Target),
    /// Add a title.
    Add {
        title: String,
        #[command(flatten)]
        target: Target,
    },
    /// Delete a title that is not on loan.
    Delete {
        title: String,
        #[command(flatten)]
        target: Target,
    },
    /// Lend an available title.
    Lend {
        title: String,
        /// Name of the person borrowing the book.
        #[arg(short, long)]
        borrower: String,
        #[command(flatten)]
        target: Target,
    },
    /// Return a lent title.
    Return {
        title: String,
        #[command(flatten)]
        target: Target,
    },
    /// Check every configured record against the schema and invariants.
    Validate,
}

#[derive(Args)]
struct Target {
    /// Library id from the config (e.g. `city`).
    #[arg(short, long)]
    library: String,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<CatalogError>() {
            Some(rejection) => {
                eprintln!("{rejection}");
                exit_codes::REJECTED
            }
            None => {
                eprintln!("{:#}", err);
                exit_codes::INVALID
            }
        },
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(|| {
        cli.data_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join(CONFIG_FILE_NAME)
    });

    if let Some(Command::Init { force }) = cli.command {
        return cmd_init(&cli, &config_path, force);
    }

    let mut cfg = load_config(&config_path)?;
    if let Some(data_dir) = &cli.data_dir {
        cfg.data_dir = data_dir.clone();
    }
    debug!(data_dir = %cfg.data_dir.display(), "config resolved");

    match cli.command {
        None | Some(Command::Menu) | Some(Command::Init { .. }) => cmd_menu(&cfg),
        Some(Command::Books(target)) => {
            let library = open_library(&cfg, &target)?;
            for title in library.list_books() {
                println!("{title}");
            }
            Ok(exit_codes::OK)
        }
        Some(Command::Loans(target)) => {
            let library = open_library(&cfg, &target)?;
            for (title, borrower) in library.list_loans() {
                println!("{title}\t{borrower}");
            }
            Ok(exit_codes::OK)
        }
        Some(Command::Add { title, target }) => {
            let mut library = open_library(&cfg, &target)?;
            let title = library.add_book(&title)?;
            println!("added: {title}");
            Ok(exit_codes::OK)
        }
        Some(Command::Delete { title, target }) => {
            let mut library = open_library(&cfg, &target)?;
            let title = library.delete_book(&title)?;
            println!("deleted: {title}");
            Ok(exit_codes::OK)
        }
        Some(Command::Lend {
            title,
            borrower,
            target,
        }) => {
            let mut library = open_library(&cfg, &target)?;
            let loan = library.lend_book(&title, &borrower)?;
            println!("lent: {} -> {}", loan.title, loan.borrower);
            Ok(exit_codes::OK)
        }
        Some(Command::Return { title, target }) => {
            let mut library = open_library(&cfg, &target)?;
            let loan = library.return_book(&title)?;
            println!("returned: {} <- {}", loan.title, loan.borrower);
            Ok(exit_codes::OK)
        }
        Some(Command::Validate) => cmd_validate(&cfg),
    }
}

fn cmd_init(cli: &Cli, config_path: &Path, force: bool) -> Result<i32> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    let mut cfg = LibraryConfig::default();
    // Without --config the file lands in the data dir, where "." already points.
    // With it, a relative --data-dir means relative to the working directory,
    // while load_config resolves relative paths against the config file.
    if let (Some(data_dir), Some(_)) = (&cli.data_dir, &cli.config) {
        cfg.data_dir = std::path::absolute(data_dir)
            .with_context(|| format!("resolve {}", data_dir.display()))?;
    }
    write_config(config_path, &cfg)?;
    println!("init: wrote {}", config_path.display());
    Ok(exit_codes::OK)
}

fn cmd_menu(cfg: &LibraryConfig) -> Result<i32> {
    let mut session = Session::new(cfg);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    session.run(&mut console)?;
    Ok(exit_codes::OK)
}

fn cmd_validate(cfg: &LibraryConfig) -> Result<i32> {
    let mut code = exit_codes::OK;
    for entry in &cfg.libraries {
        let path = cfg.record_path(entry);
        let problems = check_record(&path)?;
        if problems.is_empty() {
            println!("validate: {} ok ({})", entry.id, path.display());
            continue;
        }
        code = exit_codes::INVALID;
        println!("validate: {} invalid ({})", entry.id, path.display());
        for problem in problems {
            println!("- {problem}");
        }
    }
    Ok(code)
}

fn open_library(cfg: &LibraryConfig, target: &Target) -> Result<LibraryCatalog> {
    let entry = cfg.library(&target.library)?;
    LibraryCatalog::open(&entry.name, cfg.record_path(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_subcommand_runs_menu() {
        let cli = Cli::parse_from(["library"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["library", "init", "--force"]);
        assert!(matches!(cli.command, Some(Command::Init { force: true })));
    }

    #[test]
    fn parse_lend_with_borrower_and_library() {
        let cli = Cli::parse_from([
            "library",
            "--data-dir",
            "/tmp/libs",
            "lend",
            "Dune",
            "--borrower",
            "Alice",
            "--library",
            "city",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/libs")));
        match cli.command {
            Some(Command::Lend {
                title,
                borrower,
                target,
            }) => {
                assert_eq!(title, "Dune");
                assert_eq!(borrower, "Alice");
                assert_eq!(target.library, "city");
            }
            _ => panic!("expected lend"),
        }
    }

    #[test]
    fn global_options_accepted_after_subcommand() {
        let cli = Cli::parse_from(["library", "books", "-l", "school", "--config", "x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Command::Books(_))));
    }
}
