//! Gateway transaction-number allocation.
//!
//! Numbers must be unique per shop and per day and are only six digits
//! wide on the wire, so a single counter file is shared by every process
//! generating forms. An exclusive flock serializes allocations; each call
//! opens its own handle, which makes the lock effective across threads
//! and across processes.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use tracing::debug;

use crate::error::SequenceError;

/// Highest stored value before the counter wraps back to zero.
const MAX_NUMBER: i64 = 899_999;

const LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(5);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    path: PathBuf,
}

impl SequenceAllocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the next number, zero-padded to six digits.
    ///
    /// The counter file is created on first use. Missing or garbled
    /// content counts as zero, and the increment wraps past 899999, so a
    /// corrupted file degrades to a restart of the cycle rather than an
    /// error.
    pub fn allocate(&self) -> Result<String, SequenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)?;

        self.lock(&file)?;
        let result = Self::advance(&mut file);
        let _ = file.unlock();
        result
    }

    /// Bounded acquisition with backoff. Form generation fails fast
    /// rather than stalling behind a wedged holder.
    fn lock(&self, file: &File) -> Result<(), SequenceError> {
        let deadline = Instant::now() + LOCK_TIMEOUT;
        let mut delay = INITIAL_RETRY_DELAY;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(()),
                Err(_) if Instant::now() < deadline => {
                    debug!(path = %self.path.display(), "sequence file locked, retrying");
                    std::thread::sleep(delay);
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
                Err(_) => {
                    return Err(SequenceError::LockTimeout {
                        path: self.path.clone(),
                    })
                }
            }
        }
    }

    fn advance(file: &mut File) -> Result<String, SequenceError> {
        let mut stored = String::new();
        file.read_to_string(&mut stored)?;
        let current = stored.trim().parse::<i64>().unwrap_or(0);

        let mut next = current + 1;
        if !(0..=MAX_NUMBER).contains(&next) {
            next = 0;
        }

        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        write!(file, "{next}")?;
        file.flush()?;

        Ok(format!("{next:06}"))
    }
}
