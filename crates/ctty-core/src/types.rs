//! # Types
//!
//! Platform-agnostic types for process table queries.

use std::fmt;

use crate::error::{CttyError, CttyResult};

/// Process identifier (PID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(pub u32);

impl ProcessId
{
    /// The pid of the calling process
    #[must_use]
    pub fn current() -> Self
    {
        ProcessId(std::process::id())
    }
}

impl From<u32> for ProcessId
{
    fn from(pid: u32) -> Self
    {
        ProcessId(pid)
    }
}

impl From<ProcessId> for u32
{
    fn from(pid: ProcessId) -> Self
    {
        pid.0
    }
}

impl fmt::Display for ProcessId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

/// Kernel device identifier
///
/// The value is the kernel's `dev_t` widened to 64 bits. How major and minor
/// numbers are packed into it is up to the kernel, so this type treats the
/// value as opaque.
///
/// `0` is not special here. It only becomes "none" at the legacy boundary,
/// see [`DeviceId::to_legacy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u64);

impl DeviceId
{
    /// Raw 64-bit value
    #[must_use]
    pub const fn as_raw(self) -> u64
    {
        self.0
    }

    /// Collapse a lookup result into the legacy sentinel convention
    ///
    /// `None` (no controlling terminal) and every error become `0`.
    ///
    /// ```rust
    /// use ctty_core::{CttyError, DeviceId};
    ///
    /// assert_eq!(DeviceId::to_legacy(&Ok(Some(DeviceId(0x1000003)))), 0x1000003);
    /// assert_eq!(DeviceId::to_legacy(&Ok(None)), 0);
    /// assert_eq!(DeviceId::to_legacy(&Err(CttyError::ProcessNotFound(1))), 0);
    /// ```
    #[must_use]
    pub fn to_legacy(result: &CttyResult<Option<DeviceId>>) -> u64
    {
        match result {
            Ok(Some(dev)) => dev.0,
            Ok(None) | Err(_) => 0,
        }
    }
}

impl From<u64> for DeviceId
{
    fn from(raw: u64) -> Self
    {
        DeviceId(raw)
    }
}

impl From<DeviceId> for u64
{
    fn from(dev: DeviceId) -> Self
    {
        dev.0
    }
}

impl fmt::Display for DeviceId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

/// Number of MIB components in a process table query
pub const PROCESS_QUERY_MIB_LEN: usize = 4;

/// A process table lookup: "kernel, process table, by pid, for this pid"
///
/// Built fresh for every call. On BSD targets [`ProcessQuery::mib`] renders it
/// as `[CTL_KERN, KERN_PROC, KERN_PROC_PID, pid]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessQuery
{
    pid: ProcessId,
}

impl ProcessQuery
{
    /// Query for the calling process
    #[must_use]
    pub fn current() -> Self
    {
        ProcessQuery { pid: ProcessId::current() }
    }

    /// Process this query selects
    #[must_use]
    pub const fn pid(&self) -> ProcessId
    {
        self.pid
    }

    /// The pid as a C `int`, as `sysctl` expects it
    ///
    /// ## Errors
    ///
    /// [`CttyError::InvalidArgument`] if the pid is larger than `c_int::MAX`.
    pub fn pid_as_c_int(&self) -> CttyResult<libc::c_int>
    {
        libc::c_int::try_from(self.pid.0)
            .map_err(|_| CttyError::InvalidArgument(format!("PID {} does not fit in a C int", self.pid)))
    }

    /// The sysctl MIB for this query
    ///
    /// ## Errors
    ///
    /// See [`ProcessQuery::pid_as_c_int`].
    #[cfg(any(target_os = "freebsd", target_os = "macos"))]
    pub fn mib(&self) -> CttyResult<[libc::c_int; PROCESS_QUERY_MIB_LEN]>
    {
        Ok([libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_PID, self.pid_as_c_int()?])
    }

    #[cfg(test)]
    pub(crate) const fn for_pid(pid: u32) -> Self
    {
        ProcessQuery { pid: ProcessId(pid) }
    }
}
