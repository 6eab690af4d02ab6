//! # Program Identity
//!
//! File: cli/src/commands/new/identity.rs
//!
//! Derives every name used by the generated autotools files from the project
//! name the user typed. For `someProg`:
//!
//! | field | value |
//! |---|---|
//! | `exe` | `someprog` |
//! | `src` | `someprog.c` |
//! | `man` | `someprog.1` |
//! | `thr` | `som` |
//! | `dir` | `Someprog` |
//!
use crate::core::error::{NewProgramError, Result};
use anyhow::bail;

/// Names derived from a project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramId {
    /// Project directory name: `exe` with its first letter upper-cased.
    pub dir: String,
    /// Binary name, always lower case.
    pub exe: String,
    /// Main source file.
    pub src: String,
    /// Man page.
    pub man: String,
    /// Three letter abbreviation required by the Makefile.am stub.
    pub thr: String,
    /// The name exactly as given, used in the generated synopsis.
    pub display_name: String,
}

impl ProgramId {
    pub fn from_name(name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            bail!(NewProgramError::ArgumentParsing(
                "No project name provided.".to_string()
            ));
        }
        if name.contains('/') || name.contains(char::is_whitespace) || name.starts_with('.') {
            bail!(NewProgramError::ArgumentParsing(format!(
                "'{}' cannot be used as a program name",
                name
            )));
        }

        let exe = name.to_ascii_lowercase();
        let thr: String = exe.chars().take(3).collect();
        let mut chars = exe.chars();
        let dir = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };

        Ok(Self {
            src: format!("{}.c", exe),
            man: format!("{}.1", exe),
            dir,
            thr,
            exe,
            display_name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_mixed_case_name() -> Result<()> {
        let id = ProgramId::from_name("someProg")?;
        assert_eq!(
            id,
            ProgramId {
                dir: "Someprog".into(),
                exe: "someprog".into(),
                src: "someprog.c".into(),
                man: "someprog.1".into(),
                thr: "som".into(),
                display_name: "someProg".into(),
            }
        );
        Ok(())
    }

    #[test]
    fn test_short_names_keep_whole_abbreviation() -> Result<()> {
        let id = ProgramId::from_name("ls")?;
        assert_eq!(id.thr, "ls");
        assert_eq!(id.dir, "Ls");
        Ok(())
    }

    #[test]
    fn test_rejects_unusable_names() {
        for name in ["", "   ", "a/b", "two words", ".hidden"] {
            assert!(ProgramId::from_name(name).is_err(), "{:?} should be rejected", name);
        }
    }
}
