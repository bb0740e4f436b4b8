use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use release_train::cli::{self, BumpRequest, ChangelogRequest, DiscoverRequest};
use release_train::discovery::{split_tag_list, TagSource};
use release_train::git::Git2Repository;
use release_train::{config, manifest, ui, ReleaseTrainError};

#[derive(Parser)]
#[command(
    name = "release-train",
    version,
    about = "Tag discovery and release notes for a dev → rc → stable release train"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the highest dev or rc tag, or confirm an explicit one
    DiscoverTag {
        #[arg(long, help = "Tag stage to search: dev or rc")]
        pattern: String,

        #[arg(long, help = "Explicit tag to validate against the tag list")]
        validate: Option<String>,

        #[arg(long, help = "Comma-separated tags to use instead of the repository")]
        tag_list: Option<String>,
    },

    /// Render release notes for a stage and write them to a file
    Changelog {
        #[arg(long, help = "Release stage: dev, rc or stable")]
        stage: String,

        #[arg(long, help = "Version being released, without the v prefix")]
        version: String,

        #[arg(long, help = "Tag this release was promoted from")]
        source_tag: Option<String>,

        #[arg(long, help = "Repository (owner/name) for compare links")]
        repo: Option<String>,

        #[arg(long, help = "File to write the notes to")]
        output: PathBuf,

        #[arg(long, help = "Release date (YYYY-MM-DD), defaults to today in UTC")]
        date: Option<NaiveDate>,
    },

    /// Write a release version into pyproject.toml and/or the catalog
    BumpVersion {
        #[arg(long, help = "Version to write")]
        version: String,

        #[arg(long, help = "Path to pyproject.toml")]
        pyproject: Option<PathBuf>,

        #[arg(long, help = "Path to the YAML catalog")]
        catalog: Option<PathBuf>,
    },

    /// Print a value from a TOML file by dotted key
    ReadTomlField {
        #[arg(long, help = "TOML file to read")]
        file: PathBuf,

        #[arg(long, help = "Dotted key path, e.g. project.version")]
        key: String,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("RELEASE_TRAIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_repository() -> Option<Git2Repository> {
    match Git2Repository::open(".") {
        Ok(repo) => Some(repo),
        Err(e) => {
            warn!(error = %e, "not inside a git repository");
            None
        }
    }
}

fn exit_code_for(error: &ReleaseTrainError) -> i32 {
    if error.is_invalid_request() {
        2
    } else {
        1
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::DiscoverTag {
            pattern,
            validate,
            tag_list,
        } => {
            let repo;
            let source = match tag_list {
                Some(list) => TagSource::Explicit(split_tag_list(&list)),
                None => match open_repository() {
                    Some(opened) => {
                        repo = opened;
                        TagSource::Live(&repo)
                    }
                    None => TagSource::Explicit(Vec::new()),
                },
            };

            let outcome = cli::run_discover(&source, &DiscoverRequest { pattern, validate });
            ui::display_boundary_warnings(&outcome.warnings);
            println!("{}", outcome.report.to_json());
            process::exit(outcome.report.exit_code());
        }

        Command::Changelog {
            stage,
            version,
            source_tag,
            repo,
            output,
            date,
        } => {
            let config = match config::load_config(args.config.as_deref()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    ui::display_error(&format!("Error loading config: {}", e));
                    process::exit(1);
                }
            };

            let request = ChangelogRequest {
                stage,
                version,
                source_tag,
                repo,
                output,
                release_date: date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
            };

            let history = open_repository();
            match cli::run_changelog(history.as_ref(), &request, &config) {
                Ok(outcome) => {
                    ui::display_status(&ui::describe_previous_tag(
                        outcome.previous_tag.as_deref(),
                    ));
                    ui::display_success(&format!(
                        "Release notes written to {}",
                        request.output.display()
                    ));
                    print!("{}", outcome.notes);
                }
                Err(e) => {
                    ui::display_error(&e.to_string());
                    process::exit(exit_code_for(&e));
                }
            }
        }

        Command::BumpVersion {
            version,
            pyproject,
            catalog,
        } => {
            let request = BumpRequest {
                version,
                pyproject,
                catalog,
            };
            match cli::run_bump_version(&request) {
                Ok(updated) => {
                    for line in updated {
                        ui::display_success(&line);
                    }
                }
                Err(e) => {
                    ui::display_error(&e.to_string());
                    process::exit(exit_code_for(&e));
                }
            }
        }

        Command::ReadTomlField { file, key } => match manifest::read_toml_field(&file, &key) {
            Ok(value) => println!("{}", value),
            Err(e) => {
                ui::display_error(&e.to_string());
                process::exit(1);
            }
        },
    }

    Ok(())
}
