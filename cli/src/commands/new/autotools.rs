//! # Autotools Bootstrap
//!
//! File: cli/src/commands/new/autotools.rs
//!
//! ## Overview
//!
//! Turns a freshly written project into a configurable GNU package.
//!
//! ## Architecture
//!
//! 1. `write_gnu_files` creates the files a GNU standard build insists on
//!    (`README`, `NOTES`, `ChangeLog`, `NEWS`, `AUTHORS`); current automake
//!    no longer copies them with `--add-missing`.
//! 2. `autoscan` writes `configure.scan`.
//! 3. `edit_configure_scan` fills in the package name, version and bug
//!    report address and inserts `AM_INIT_AUTOMAKE` ahead of
//!    `AC_CONFIG_SRCDIR`, producing `configure.ac`.
//! 4. `autoheader`, `aclocal`, `automake --add-missing --copy` and
//!    `autoconf` run in that order.
//! 5. The man page named in `Makefile.am` is touched so `make dist` finds it.
//!
//! Every tool runs in the project directory and any failure stops the
//! bootstrap.
//!
use super::identity::ProgramId;
use crate::common::fs::io::{touch, write_buffer, write_lines};
use crate::common::process::run_command;
use crate::core::buffer::Buffer;
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use chrono::Local;
use std::path::Path;
use tracing::{debug, info};

/// Version written into `configure.ac`.
pub const INITIAL_VERSION: &str = "1.0";

const CONFIGURE_INCREMENT: usize = 128;

/// Tools run after `configure.ac` exists, in order.
const BOOTSTRAP_STEPS: [(&str, &[&str]); 4] = [
    ("autoheader", &[]),
    ("aclocal", &[]),
    ("automake", &["--add-missing", "--copy"]),
    ("autoconf", &[]),
];

/// Writes the GNU documentation files into `project_dir`.
pub fn write_gnu_files(project_dir: &Path, id: &ProgramId, cfg: &Config) -> Result<()> {
    for name in ["README", "NOTES", "NEWS"] {
        let line = format!("{} for {}", name, id.exe);
        write_lines(&project_dir.join(name), &[&line])?;
    }

    let title = format!("ChangeLog for {}", id.exe);
    let entry = format!(
        "{}  {}  <{}>",
        Local::now().format("%Y-%m-%d"),
        cfg.author,
        cfg.email
    );
    write_lines(
        &project_dir.join("ChangeLog"),
        &[&title, "", &entry, "", "\t* Initial project layout."],
    )?;

    let title = format!("Author for {}", id.exe);
    let author = format!("{} {}", cfg.author, cfg.email);
    write_lines(&project_dir.join("AUTHORS"), &[&title, author.trim()])?;
    debug!("Wrote GNU documentation files in {:?}", project_dir);
    Ok(())
}

/// Rewrites `configure.scan` into `configure.ac`.
///
/// # Errors
///
/// Returns `NotFound` when `autoscan` left no `configure.scan` behind.
pub fn edit_configure_scan(project_dir: &Path, id: &ProgramId, email: &str) -> Result<()> {
    let scan = project_dir.join("configure.scan");
    let mut buffer = Buffer::read_file(&scan, 1)
        .with_context(|| format!("autoscan did not produce {:?}", scan))?;

    buffer.replace_all(b"FULL-PACKAGE-NAME", id.exe.as_bytes(), CONFIGURE_INCREMENT)?;
    buffer.replace_all(b"VERSION", INITIAL_VERSION.as_bytes(), CONFIGURE_INCREMENT)?;
    buffer.replace_all(b"BUG-REPORT-ADDRESS", email.as_bytes(), CONFIGURE_INCREMENT)?;
    // Scanning resumes after each replacement, so the reinserted
    // AC_CONFIG_SRCDIR is not matched again.
    buffer.replace_all(
        b"AC_CONFIG_SRCDIR",
        b"AM_INIT_AUTOMAKE\nAC_CONFIG_SRCDIR",
        CONFIGURE_INCREMENT,
    )?;

    write_buffer(&project_dir.join("configure.ac"), &buffer)
}

/// Runs the whole bootstrap in `project_dir`.
pub fn bootstrap(project_dir: &Path, id: &ProgramId, cfg: &Config) -> Result<()> {
    info!("Adding autotools support to {:?}", project_dir);
    write_gnu_files(project_dir, id, cfg)?;

    run_command("autoscan", &[], project_dir)?;
    edit_configure_scan(project_dir, id, &cfg.email)?;
    for (program, args) in BOOTSTRAP_STEPS {
        run_command(program, args, project_dir)?;
    }

    touch(&project_dir.join(&id.man))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config() -> Config {
        Config {
            progdir: "/tmp".into(),
            author: "A. Hacker".into(),
            email: "hacker@example.org".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_gnu_files() -> Result<()> {
        let dir = tempdir()?;
        let id = ProgramId::from_name("Hello")?;
        write_gnu_files(dir.path(), &id, &config())?;

        assert_eq!(fs::read_to_string(dir.path().join("README"))?, "README for hello\n");
        assert_eq!(fs::read_to_string(dir.path().join("NEWS"))?, "NEWS for hello\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("AUTHORS"))?,
            "Author for hello\nA. Hacker hacker@example.org\n"
        );
        let changelog = fs::read_to_string(dir.path().join("ChangeLog"))?;
        assert!(changelog.starts_with("ChangeLog for hello\n\n"));
        assert!(changelog.contains("  A. Hacker  <hacker@example.org>\n"));
        Ok(())
    }

    #[test]
    fn test_edit_configure_scan() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("configure.scan"),
            "AC_PREREQ([2.71])\n\
             AC_INIT([FULL-PACKAGE-NAME], [VERSION], [BUG-REPORT-ADDRESS])\n\
             AC_CONFIG_SRCDIR([hello.c])\n\
             AC_CONFIG_HEADERS([config.h])\n",
        )?;
        let id = ProgramId::from_name("Hello")?;
        edit_configure_scan(dir.path(), &id, "hacker@example.org")?;

        assert_eq!(
            fs::read_to_string(dir.path().join("configure.ac"))?,
            "AC_PREREQ([2.71])\n\
             AC_INIT([hello], [1.0], [hacker@example.org])\n\
             AM_INIT_AUTOMAKE\n\
             AC_CONFIG_SRCDIR([hello.c])\n\
             AC_CONFIG_HEADERS([config.h])\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_configure_scan() -> Result<()> {
        let dir = tempdir()?;
        let id = ProgramId::from_name("hello")?;
        assert!(edit_configure_scan(dir.path(), &id, "").is_err());
        Ok(())
    }
}
