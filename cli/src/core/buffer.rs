//! # newprogram Buffer Engine
//!
//! File: cli/src/core/buffer.rs
//!
//! ## Overview
//!
//! A growable byte buffer plus the small set of positional edits that the
//! scaffolding flow is built on: appending NUL-terminated records, growing,
//! replacing every occurrence of a literal byte pattern, inserting at an
//! offset, and flipping the record delimiter between NUL ("string mode") and
//! newline ("line mode").
//!
//! The same engine backs three otherwise unrelated call sites:
//! - the directory walker, which appends one record per visited path
//! - the template patcher, which loads a stock file and rewrites markers
//! - the legacy configuration reader, which looks up `key=value` lines
//!
//! ## Architecture
//!
//! - `data` owns the whole allocation. Its length *is* the capacity, and
//!   everything in `data[end..]` (the headroom) is kept zero-filled.
//! - `end` is the number of bytes in use.
//! - Only offsets are ever handed out, so a reallocation inside `Vec` can
//!   never leave a caller holding a stale position.
//!
//! Every growth decision reserves `FUDGE_FENCE` bytes beyond what the edit
//! strictly needs. Do not remove it: boundary cases where the free space
//! equals, or is one byte away from, the required space must keep working.
//!
//! ## Examples
//!
//! ```rust
//! let mut buf = Buffer::read_file(Path::new("Makefile.am"), 0)?;
//! buf.replace_all(b"exe%s", b"hello", DEFAULT_INCREMENT)?;
//! io::write_buffer(Path::new("Makefile.am"), &buf)?;
//! ```
//!
use crate::core::error::{NewProgramError, Result};
use anyhow::bail;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

/// Extra headroom kept around every growth decision.
pub const FUDGE_FENCE: usize = 8;

/// Growth increment used by callers that have no better estimate.
pub const DEFAULT_INCREMENT: usize = 1024;

/// An owned, growable byte buffer holding NUL- or newline-terminated records.
///
/// Release happens on `Drop`; a moved-from buffer cannot be touched again.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buffer {
    data: Vec<u8>,
    end: usize,
}

impl Buffer {
    /// Creates an empty buffer with no storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `bytes` followed by `extra` zero bytes of headroom.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn from_bytes(bytes: &[u8], extra: usize) -> Result<Self> {
        let capacity = checked_capacity(bytes.len(), extra)?;
        let mut data = allocate(capacity)?;
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            data,
            end: bytes.len(),
        })
    }

    /// Loads the whole of a regular file, adding `extra` bytes of zeroed headroom.
    ///
    /// # Errors
    ///
    /// * `NotFound` if nothing (or something other than a regular file) is at `path`.
    /// * `PermissionDenied` / `Io` if the file cannot be opened or is read short.
    /// * `OutOfMemory` if the capacity cannot be reserved.
    pub fn read_file(path: &Path, extra: usize) -> Result<Self> {
        match Self::read_file_if_exists(path, extra)? {
            Some(buffer) => Ok(buffer),
            None => bail!(NewProgramError::NotFound {
                path: path.to_path_buf()
            }),
        }
    }

    /// Like [`Buffer::read_file`], but an absent file yields `Ok(None)`.
    pub fn read_file_if_exists(path: &Path, extra: usize) -> Result<Option<Self>> {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(NewProgramError::from_io(path, e).into()),
        };
        if !metadata.is_file() {
            tracing::debug!("{} is not a regular file, treating as absent", path.display());
            return Ok(None);
        }

        let size = usize::try_from(metadata.len()).map_err(|_| NewProgramError::OutOfMemory {
            requested: usize::MAX,
        })?;
        let capacity = checked_capacity(size, extra)?;
        let mut data = allocate(capacity)?;

        let mut file = File::open(path).map_err(|e| NewProgramError::from_io(path, e))?;
        // A file that shrank between stat and read is an I/O failure, not a short buffer.
        file.read_exact(&mut data[..size])
            .map_err(|source| NewProgramError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::trace!("Loaded {} bytes from {} ({} spare)", size, path.display(), extra);
        Ok(Some(Self { data, end: size }))
    }

    /// Bytes in use.
    pub fn len(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    /// Total allocated bytes, used or not.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Free bytes after `end`.
    pub fn spare(&self) -> usize {
        self.data.len() - self.end
    }

    /// The used region `[0, end)`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.end]
    }

    /// Grows (positive `delta`) or shrinks (negative `delta`) the capacity.
    ///
    /// Content in `[0, end)` is preserved and new capacity is zero-filled.
    ///
    /// # Errors
    ///
    /// * `CapacityExceeded` if the new capacity would cut into used bytes.
    /// * `OutOfMemory` if the allocation fails.
    pub fn resize(&mut self, delta: isize) -> Result<()> {
        let old = self.data.len();
        let new = if delta >= 0 {
            old.checked_add(delta.unsigned_abs())
                .ok_or(NewProgramError::OutOfMemory {
                    requested: usize::MAX,
                })?
        } else {
            old.checked_sub(delta.unsigned_abs()).unwrap_or(0)
        };

        if new < self.end {
            bail!(NewProgramError::CapacityExceeded(format!(
                "cannot shrink buffer to {} bytes while {} are in use",
                new, self.end
            )));
        }

        if new > old {
            self.data
                .try_reserve_exact(new - old)
                .map_err(|_| NewProgramError::OutOfMemory { requested: new })?;
            self.data.resize(new, 0);
        } else {
            self.data.truncate(new);
            self.data.shrink_to_fit();
        }
        tracing::trace!("Buffer resized from {} to {} bytes", old, new);
        Ok(())
    }

    /// Makes sure `needed` bytes plus the fudge fence fit after `end`.
    fn reserve_for(&mut self, needed: isize, increment: usize) -> Result<()> {
        let needed = needed + FUDGE_FENCE as isize;
        if needed > self.spare() as isize {
            let increment = isize::try_from(increment).unwrap_or(isize::MAX);
            self.resize(increment.max(needed))?;
        }
        Ok(())
    }

    /// Appends `record` followed by a terminating NUL.
    ///
    /// # Errors
    ///
    /// `MalformedInput` if the record itself contains a NUL byte; otherwise
    /// only the allocation failures of [`Buffer::resize`].
    pub fn append_record(&mut self, record: &[u8], increment: usize) -> Result<()> {
        if record.contains(&0) {
            bail!(NewProgramError::MalformedInput(format!(
                "record contains a NUL byte: {:?}",
                String::from_utf8_lossy(record)
            )));
        }
        self.reserve_for(record.len() as isize, increment)?;

        let start = self.end;
        self.data[start..start + record.len()].copy_from_slice(record);
        self.data[start + record.len()] = 0;
        self.end += record.len() + 1;
        Ok(())
    }

    /// Inserts `bytes` at `offset`, moving the tail right.
    pub fn insert_at(&mut self, offset: usize, bytes: &[u8], increment: usize) -> Result<()> {
        if offset > self.end {
            bail!(NewProgramError::CapacityExceeded(format!(
                "insert offset {} is past the end of the buffer ({})",
                offset, self.end
            )));
        }
        self.reserve_for(bytes.len() as isize, increment)?;

        self.data.copy_within(offset..self.end, offset + bytes.len());
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.end += bytes.len();
        Ok(())
    }

    /// Finds `marker`, then inserts `text` just before the newline that ends
    /// its line (or at the end of the buffer when no newline follows).
    ///
    /// Returns the offset at which `text` was inserted.
    pub fn insert_at_line_end(
        &mut self,
        marker: &[u8],
        text: &[u8],
        increment: usize,
    ) -> Result<usize> {
        let at = self.find(marker, 0).ok_or_else(|| {
            NewProgramError::MalformedInput(format!(
                "marker {:?} not found",
                String::from_utf8_lossy(marker)
            ))
        })?;
        let line_end = self.find_byte(b'\n', at + marker.len()).unwrap_or(self.end);
        self.insert_at(line_end, text, increment)?;
        Ok(line_end)
    }

    /// Replaces every occurrence of `find` with `repl` and returns how many
    /// were replaced.
    ///
    /// The scan resumes after each written replacement, so a replacement that
    /// contains the pattern is never matched again.
    pub fn replace_all(&mut self, find: &[u8], repl: &[u8], increment: usize) -> Result<usize> {
        if find.is_empty() {
            bail!(NewProgramError::MalformedInput(
                "cannot replace an empty pattern".to_string()
            ));
        }
        let delta = repl.len() as isize - find.len() as isize;
        let mut pos = 0;
        let mut count = 0;

        while let Some(at) = self.find(find, pos) {
            self.reserve_for(delta, increment)?;

            let old_end = self.end;
            let new_end = (old_end as isize + delta) as usize;
            self.data.copy_within(at + find.len()..old_end, at + repl.len());
            self.data[at..at + repl.len()].copy_from_slice(repl);
            if new_end < old_end {
                // Keep the headroom zeroed after a shrink.
                self.data[new_end..old_end].fill(0);
            }
            self.end = new_end;

            pos = at + repl.len();
            count += 1;
        }
        Ok(count)
    }

    /// Offset of the first occurrence of `pattern` in `[from, end)`.
    pub fn find(&self, pattern: &[u8], from: usize) -> Option<usize> {
        if pattern.is_empty() || from > self.end {
            return None;
        }
        self.data[from..self.end]
            .windows(pattern.len())
            .position(|window| window == pattern)
            .map(|i| i + from)
    }

    /// Offset of the first `byte` in `[from, end)`.
    pub fn find_byte(&self, byte: u8, from: usize) -> Option<usize> {
        if from > self.end {
            return None;
        }
        self.data[from..self.end]
            .iter()
            .position(|b| *b == byte)
            .map(|i| i + from)
    }

    /// Switches to line mode; returns the number of delimiters converted.
    pub fn strings_to_lines(&mut self) -> usize {
        self.swap_delimiter(0, b'\n')
    }

    /// Switches to string mode; returns the number of delimiters converted.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn lines_to_strings(&mut self) -> usize {
        self.swap_delimiter(b'\n', 0)
    }

    fn swap_delimiter(&mut self, from: u8, to: u8) -> usize {
        let mut count = 0;
        for b in self.data[..self.end].iter_mut().filter(|b| **b == from) {
            *b = to;
            count += 1;
        }
        count
    }

    /// Number of NUL-terminated records.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn record_count(&self) -> usize {
        self.as_bytes().iter().filter(|b| **b == 0).count()
    }

    /// Iterates over the records of a string-mode buffer.
    pub fn records(&self) -> impl Iterator<Item = &[u8]> {
        let bytes = self.as_bytes();
        let body = bytes.strip_suffix(b"\0").unwrap_or(bytes);
        body.split(|b| *b == 0).filter(move |_| !bytes.is_empty())
    }

    /// Records as owned strings (invalid UTF-8 is replaced).
    pub fn to_string_list(&self) -> Vec<String> {
        self.records()
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect()
    }
}

fn checked_capacity(len: usize, extra: usize) -> Result<usize> {
    len.checked_add(extra).ok_or_else(|| {
        NewProgramError::OutOfMemory {
            requested: usize::MAX,
        }
        .into()
    })
}

fn allocate(capacity: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)
        .map_err(|_| NewProgramError::OutOfMemory {
            requested: capacity,
        })?;
    data.resize(capacity, 0);
    Ok(data)
}
