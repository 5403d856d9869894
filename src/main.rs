use std::{
    ffi::OsString,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context as _;
use context::Context;
use error::ScaffoldError;
use fs::{FileSystem, LocalFs};
use options::Invocation;
use scaffold::scaffold;

mod context;
mod error;
mod fs;
mod options;
mod scaffold;
mod slug;
mod template;

fn run<I, T>(args: I, ctx: &Context, out: &mut dyn Write) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = match options::parse(args)? {
        Invocation::Scaffold(options) => options,
        Invocation::Info(text) => {
            write!(out, "{text}")?;
            return Ok(());
        }
    };
    log::debug!("{options:?}");

    for artifact in scaffold(ctx, &options)? {
        let shown = ctx.display_path(&artifact.path);
        if options.dry_run {
            writeln!(out, "Would create {}", shown.display())?;
        } else {
            writeln!(out, "{} {} created", artifact.kind.label(), shown.display())?;
        }
    }

    Ok(())
}

/// Message printed to stderr for a failed invocation.
fn report(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ScaffoldError>() {
        // clap already formats its own usage text
        Some(ScaffoldError::Usage(msg)) if msg.starts_with("error:") => msg.clone(),
        _ => format!("Error: {e:#}\n"),
    }
}

/// Run one invocation and return its exit status.
fn execute<I, T>(
    args: I,
    cwd: PathBuf,
    fs: &dyn FileSystem,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let ctx = Context::new(cwd, fs);
    match run(args, &ctx, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = err.write_all(report(&e).as_bytes());
            1
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cwd = match std::env::current_dir().context("while reading the working directory") {
        Ok(cwd) => cwd,
        Err(e) => {
            eprint!("{}", report(&e));
            return ExitCode::FAILURE;
        }
    };

    ExitCode::from(execute(
        std::env::args_os(),
        cwd,
        &LocalFs,
        &mut io::stdout(),
        &mut io::stderr(),
    ))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::fs::MemoryFs;

    struct Outcome {
        code: u8,
        stdout: String,
        stderr: String,
    }

    fn invoke(fs: &MemoryFs, args: &[&str]) -> Outcome {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = execute(
            std::iter::once("newpage").chain(args.iter().copied()),
            PathBuf::from("/site"),
            fs,
            &mut stdout,
            &mut stderr,
        );
        Outcome {
            code,
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    #[test]
    fn success_lists_created_files() {
        let fs = MemoryFs::new();
        let outcome = invoke(&fs, &["Hello World"]);

        assert_eq!(outcome.code, 0);
        assert_eq!(
            outcome.stdout,
            "Content src/content/spec/hello-world.md created\nPage src/pages/hello-world.astro created\n"
        );
        assert!(outcome.stderr.is_empty());
    }

    #[test]
    fn dry_run_lists_planned_files() {
        let fs = MemoryFs::new();
        let outcome = invoke(&fs, &["Contact", "--only-page", "--dry-run"]);

        assert_eq!(outcome.code, 0);
        assert_eq!(outcome.stdout, "Would create src/pages/contact.astro\n");
        assert!(fs.files().is_empty());
    }

    #[test]
    fn missing_title_exits_one() {
        let outcome = invoke(&MemoryFs::new(), &[]);

        assert_eq!(outcome.code, 1);
        assert_eq!(
            outcome.stderr,
            "Error: Missing required arguments\nUsage: newpage <title> [--only-page]\n"
        );
        assert!(outcome.stdout.is_empty());
    }

    #[test]
    fn clap_usage_text_is_passed_through() {
        let outcome = invoke(&MemoryFs::new(), &["Title", "--bogus"]);

        assert_eq!(outcome.code, 1);
        assert!(outcome.stderr.starts_with("error: "));
        assert!(!outcome.stderr.contains("Error: error:"));
    }

    #[test]
    fn empty_slug_exits_one() {
        let fs = MemoryFs::new();
        let outcome = invoke(&fs, &["!!!"]);

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.stderr, "Error: Title \"!!!\" produced an empty slug\n");
        assert!(fs.files().is_empty());
    }

    #[test]
    fn existing_targets_exit_one() {
        let fs = MemoryFs::new().with_file("/site/src/pages/about.astro", "mine");
        let outcome = invoke(&fs, &["About"]);
        assert_eq!(outcome.code, 1);
        assert_eq!(
            outcome.stderr,
            "Error: Page file src/pages/about.astro already exists\n"
        );

        let fs = MemoryFs::new().with_file("/site/src/content/spec/about.md", "# Mine\n");
        let outcome = invoke(&fs, &["About"]);
        assert_eq!(outcome.code, 1);
        assert_eq!(
            outcome.stderr,
            "Error: Content file src/content/spec/about.md already exists\n"
        );
        assert!(!fs.exists(Path::new("/site/src/pages/about.astro")));
    }

    #[test]
    fn missing_directory_exits_one_in_strict_mode() {
        let outcome = invoke(&MemoryFs::new(), &["About", "--strict-dirs"]);

        assert_eq!(outcome.code, 1);
        assert_eq!(outcome.stderr, "Error: Directory src/pages does not exist\n");
    }

    #[test]
    fn help_exits_zero() {
        let outcome = invoke(&MemoryFs::new(), &["--help"]);

        assert_eq!(outcome.code, 0);
        assert!(outcome.stdout.contains("--only-page"));
        assert!(outcome.stderr.is_empty());
    }

    #[test]
    fn io_errors_carry_context_chain() {
        let e = anyhow::Error::new(ScaffoldError::io(
            "/site/src/pages/a.astro",
            io::Error::from(io::ErrorKind::PermissionDenied),
        ))
        .context("while writing Page file");

        let msg = report(&e);
        assert!(msg.starts_with("Error: while writing Page file: I/O error on /site/src/pages/a.astro: "));
        assert!(msg.ends_with('\n'));
    }
}
