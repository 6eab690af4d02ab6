//! # newprogram New Command Integration Tests
//!
//! File: cli/tests/new.rs
//!
//! ## Overview
//!
//! Runs `newprogram new` end to end in a sandbox: first-run setup, project
//! layout, dependency handling, option code generation and the autotools
//! bootstrap (against fake autotools scripts put first on `PATH`).
//!

mod common;

use common::*;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::MetadataExt;

#[test]
fn test_first_run_installs_configuration() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["new", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please edit config.toml"));

    for name in ["am.mak", "config.toml", "goptC", "goptH", "mainC"] {
        assert!(sandbox.config_dir().join(name).is_file(), "{} missing", name);
    }
    assert!(!sandbox.progdir().join("Hello").exists());
}

#[test]
fn test_new_project_layout() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    fs::write(sandbox.stubdir().join("str.h"), "/* str.h stub */\n").unwrap();
    fs::write(sandbox.compdir().join("str.c"), "/* str.c */\n").unwrap();
    fs::write(sandbox.compdir().join("files.c"), "/* files.c */\n").unwrap();

    sandbox
        .cmd()
        .args([
            "new",
            "someProg",
            "--depends",
            "str.h+c",
            "-d",
            "files.c",
            "--options",
            "vverbose ooutput:",
            "--extra-dist",
            "someprog.conf",
            "--skip-autotools",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'someProg' created successfully"));

    let project = sandbox.progdir().join("Someprog");
    let makefile = fs::read_to_string(project.join("Makefile.am")).unwrap();
    assert!(makefile.contains("bin_PROGRAMS=someprog\n"));
    assert!(makefile.contains(
        "someprog_SOURCES=someprog.c str.h str.c files.c gopt.c gopt.h\n"
    ));
    assert!(makefile.contains("man_MANS=someprog.1\n"));
    assert!(makefile.contains("somdir=$(datadir)/someprog\n"));
    assert!(makefile.contains("som_DATA= someprog.conf\n"));
    assert!(makefile.contains("EXTRA_DIST=someprog.1 someprog.conf\n"));

    // Stub copied, library sources hard linked.
    assert_eq!(
        fs::read_to_string(project.join("str.h")).unwrap(),
        "/* str.h stub */\n"
    );
    assert_eq!(
        fs::metadata(project.join("str.c")).unwrap().ino(),
        fs::metadata(sandbox.compdir().join("str.c")).unwrap().ino()
    );
    assert!(project.join("files.c").is_file());

    let main = fs::read_to_string(project.join("someprog.c")).unwrap();
    assert!(main.contains("#define HAVE_GOPT\n"));
    assert!(main.contains("if (opts.o_v) printf(\"%d\\n\", opts.o_v);"));
    let gopt = fs::read_to_string(project.join("gopt.c")).unwrap();
    assert!(gopt.contains("\":hvo:\""));
    assert!(gopt.contains("case 'o':"));
    assert!(gopt.contains("someProg [option] program_name"));
    assert!(!gopt.contains("target */"));
    let header = fs::read_to_string(project.join("gopt.h")).unwrap();
    assert!(header.contains("o_o;"));

    assert!(!project.join("configure.ac").exists());
}

#[test]
fn test_plain_project_has_no_option_files() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    sandbox
        .cmd()
        .args(["new", "ls", "--skip-autotools"])
        .assert()
        .success();

    let project = sandbox.progdir().join("Ls");
    assert!(project.join("ls.c").is_file());
    assert!(!project.join("gopt.c").exists());
    let makefile = fs::read_to_string(project.join("Makefile.am")).unwrap();
    assert!(makefile.contains("ls_SOURCES=ls.c\n"));
    assert!(makefile.contains("lsdir=$(datadir)/ls\n"));
}

#[test]
fn test_unknown_dependency_is_a_warning() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    sandbox
        .cmd()
        .args(["new", "hello", "-d", "nothere.c", "--skip-autotools"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Software file unknown: nothere.c"));

    let makefile =
        fs::read_to_string(sandbox.progdir().join("Hello").join("Makefile.am")).unwrap();
    assert!(makefile.contains("hello_SOURCES=hello.c nothere.c\n"));
}

#[test]
fn test_existing_project_needs_force() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    fs::create_dir_all(sandbox.progdir().join("Hello")).unwrap();

    sandbox
        .cmd()
        .args(["new", "hello", "--skip-autotools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .cmd()
        .args(["new", "hello", "--skip-autotools", "--force"])
        .assert()
        .success();
    assert!(sandbox.progdir().join("Hello/hello.c").is_file());
}

#[test]
fn test_invalid_option_word_fails() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    sandbox
        .cmd()
        .args(["new", "hello", "--options", "v", "--skip-autotools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no long option name"));
    assert!(!sandbox.progdir().join("Hello").exists());
}

#[test]
fn test_autotools_bootstrap() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    sandbox
        .cmd_with_fake_autotools()
        .args(["new", "Hello"])
        .assert()
        .success();

    let project = sandbox.progdir().join("Hello");
    let configure_ac = fs::read_to_string(project.join("configure.ac")).unwrap();
    assert_eq!(
        configure_ac,
        "AC_PREREQ([2.71])\n\
         AC_INIT([hello], [1.0], [hacker@example.org])\n\
         AM_INIT_AUTOMAKE\n\
         AC_CONFIG_SRCDIR([main.c])\n"
    );
    assert_eq!(
        fs::read_to_string(project.join(".ran-automake")).unwrap(),
        "--add-missing --copy\n"
    );
    for tool in ["autoheader", "aclocal", "autoconf"] {
        assert!(project.join(format!(".ran-{}", tool)).is_file());
    }
    assert!(project.join("hello.1").is_file());
    assert_eq!(
        fs::read_to_string(project.join("AUTHORS")).unwrap(),
        "Author for hello\nA. Hacker hacker@example.org\n"
    );
    assert_eq!(
        fs::read_to_string(project.join("README")).unwrap(),
        "README for hello\n"
    );
    assert!(fs::read_to_string(project.join("ChangeLog"))
        .unwrap()
        .starts_with("ChangeLog for hello\n"));
}

#[test]
fn test_failing_autotool_stops_bootstrap() {
    let sandbox = Sandbox::new();
    sandbox.configure();
    let mut cmd = sandbox.cmd_with_fake_autotools();
    write_script(&sandbox.bin_dir().join("aclocal"), "exit 3\n");

    cmd.args(["new", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("External command failed: aclocal"));

    let project = sandbox.progdir().join("Hello");
    assert!(project.join("configure.ac").is_file());
    assert!(!project.join(".ran-automake").exists());
    assert!(!project.join("hello.1").exists());
}
