//! # Error Types
//!
//! Error handling for controlling-terminal lookups.
//!
//! We use `thiserror` to generate the `Error` trait implementations and the
//! display messages. The legacy sentinel API never surfaces these; it folds
//! every variant into `0`.

use std::io;

use thiserror::Error;

use crate::types::DeviceId;

/// Main error type for ctty lookups
///
/// ## Error Categories
///
/// 1. **Platform errors**: UnsupportedPlatform
/// 2. **Query errors**: ProcessNotFound, PermissionDenied, SizeMismatch, QueryFailed
/// 3. **Naming errors**: DeviceNameUnavailable
/// 4. **Argument errors**: InvalidArgument
/// 5. **I/O errors**: Io
#[derive(Error, Debug)]
pub enum CttyError
{
    /// The target has no known `kinfo_proc` layout
    ///
    /// Reading a record with the wrong layout yields garbage, so targets
    /// other than FreeBSD and macOS refuse to query at all. The string is
    /// `std::env::consts::OS` of the running binary.
    #[error("Unsupported platform: {0} (only FreeBSD and macOS are supported)")]
    UnsupportedPlatform(&'static str),

    /// An argument could not be expressed in the kernel's types
    ///
    /// Example: a pid that does not fit in a C `int`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The kernel has no process table entry for the pid
    ///
    /// FreeBSD reports this as `ESRCH`. macOS returns success with a
    /// zero-length reply.
    #[error("Process not found: PID {0}")]
    ProcessNotFound(u32),

    /// The kernel refused the process table query (`EPERM` / `EACCES`)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The kernel wrote a different number of bytes than one `kinfo_proc`
    ///
    /// This means the compiled record layout does not match the running
    /// kernel, or the buffer was too small (`ENOMEM`). The record is not
    /// read when this happens.
    #[error("Process record size mismatch: expected {expected} bytes, kernel returned {actual}")]
    SizeMismatch
    {
        /// `size_of` the compiled platform record
        expected: usize,
        /// Bytes reported by the kernel, when known
        actual: usize,
    },

    /// Any other `sysctl` failure
    #[error("Process table query for PID {pid} failed: {source}")]
    QueryFailed
    {
        /// Process the query was about
        pid: u32,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// `devname_r(3)` could not name the device
    #[error("No device name for device {0}")]
    DeviceNameUnavailable(DeviceId),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CttyError
{
    /// Classify an error returned by a process table query
    ///
    /// `expected` is the record size that was requested, used for `ENOMEM`.
    #[must_use]
    pub fn from_query_error(pid: u32, expected: usize, source: io::Error) -> Self
    {
        match source.raw_os_error() {
            Some(libc::ESRCH) => CttyError::ProcessNotFound(pid),
            Some(libc::EPERM | libc::EACCES) => {
                CttyError::PermissionDenied(format!("process table query for PID {pid}: {source}"))
            }
            Some(libc::ENOMEM) => CttyError::SizeMismatch { expected, actual: 0 },
            _ => CttyError::QueryFailed { pid, source },
        }
    }
}

/// Convenience type alias for `Result<T, CttyError>`
///
/// ```rust
/// use ctty_core::error::CttyResult;
/// fn foo() -> CttyResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type CttyResult<T> = std::result::Result<T, CttyError>;
