use std::{ffi::OsString, path::PathBuf};

use clap::{command, error::ErrorKind, Arg, ArgAction, ArgMatches, Command};

use crate::error::ScaffoldError;

const USAGE: &str = "Usage: newpage <title> [--only-page]";

/// Everything one invocation needs to know, collected from the command line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Options {
    pub title: String,
    pub only_page: bool,
    pub pages_dir: PathBuf,
    pub content_dir: PathBuf,
    pub layouts_dir: PathBuf,
    pub collection: String,
    pub strict_dirs: bool,
    pub dry_run: bool,
}

/// What the command line asked for.
#[derive(Debug)]
pub(crate) enum Invocation {
    Scaffold(Options),
    /// `--help` or `--version`: print and exit successfully.
    Info(String),
}

fn command() -> Command {
    command!().args(&[
        Arg::new("title")
            .help("Title of the new page. The slug is derived from it.")
            .value_name("TITLE")
            .allow_hyphen_values(true),
        Arg::new("only_page")
            .long("only-page")
            .help("Create only the page file, without a content entry")
            .action(ArgAction::SetTrue),
        Arg::new("pages_dir")
            .long("pages-dir")
            .help("Directory of pages")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("src/pages"),
        Arg::new("content_dir")
            .long("content-dir")
            .help("Directory of content entries")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("src/content/spec"),
        Arg::new("layouts_dir")
            .long("layouts-dir")
            .help("Directory holding MainGridLayout.astro, imported relative to the page")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("src/layouts"),
        Arg::new("collection")
            .long("collection")
            .help("Content collection the page looks its entry up in")
            .default_value("spec"),
        Arg::new("strict_dirs")
            .long("strict-dirs")
            .help("Fail when a target directory is missing instead of creating it")
            .action(ArgAction::SetTrue),
        Arg::new("dry_run")
            .long("dry-run")
            .help("Run every check and print what would be created, without writing")
            .action(ArgAction::SetTrue),
    ])
}

pub(crate) fn parse<I, T>(args: I) -> Result<Invocation, ScaffoldError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(Invocation::Info(e.render().to_string()));
        }
        Err(e) => return Err(ScaffoldError::Usage(e.render().to_string())),
    };

    Ok(Invocation::Scaffold(from_matches(&matches)?))
}

fn from_matches(matches: &ArgMatches) -> Result<Options, ScaffoldError> {
    let title = matches.get_one::<String>("title").ok_or_else(|| {
        ScaffoldError::Usage(format!("Missing required arguments\n{USAGE}"))
    })?;
    // all have defaults
    let pages_dir = matches
        .get_one::<PathBuf>("pages_dir")
        .cloned()
        .unwrap_or_default();
    let content_dir = matches
        .get_one::<PathBuf>("content_dir")
        .cloned()
        .unwrap_or_default();
    let layouts_dir = matches
        .get_one::<PathBuf>("layouts_dir")
        .cloned()
        .unwrap_or_default();
    let collection = matches
        .get_one::<String>("collection")
        .cloned()
        .unwrap_or_default();

    Ok(Options {
        title: title.clone(),
        only_page: matches.get_flag("only_page"),
        pages_dir,
        content_dir,
        layouts_dir,
        collection,
        strict_dirs: matches.get_flag("strict_dirs"),
        dry_run: matches.get_flag("dry_run"),
    })
}
