//! # Kernel Record Layouts
//!
//! `sysctl(KERN_PROC_PID)` fills in a `struct kinfo_proc`, and every BSD
//! flavour lays that struct out differently. Each supported kernel gets its own
//! [`KernelRecordLayout`] that names the record type and knows where the
//! controlling terminal lives inside it:
//!
//! - **FreeBSD**: `ki_tdev`
//!   - See: [sys/user.h](https://cgit.freebsd.org/src/tree/sys/sys/user.h)
//! - **macOS**: `kp_eproc.e_tdev`
//!   - See: [sys/sysctl.h](https://github.com/apple-oss-distributions/xnu/blob/main/bsd/sys/sysctl.h)
//!
//! [`NativeLayout`] picks one of them with `#[cfg(target_os = ...)]`. There is
//! no runtime detection; on other targets no layout exists and [`SUPPORTED`]
//! is `false`.

use std::mem;

use crate::types::DeviceId;

#[cfg(target_os = "freebsd")]
pub mod freebsd;
#[cfg(target_os = "macos")]
pub mod macos;

/// How to read the controlling terminal out of a kernel process record
pub trait KernelRecordLayout
{
    /// The fixed-size record the kernel writes
    type Record;

    /// Human readable name, for logs and `ctty info`
    const NAME: &'static str;

    /// Number of bytes to request from the kernel
    ///
    /// Always `size_of::<Self::Record>()`.
    const RECORD_SIZE: usize = mem::size_of::<Self::Record>();

    /// A blank record for the kernel to fill in
    fn empty_record() -> Self::Record;

    /// Extract the controlling terminal device
    ///
    /// Returns `None` when the kernel reports `NODEV`, i.e. the process has no
    /// controlling terminal.
    fn ctty_device(record: &Self::Record) -> Option<DeviceId>;
}

#[cfg(target_os = "freebsd")]
pub use freebsd::FreeBsdLayout as NativeLayout;
#[cfg(target_os = "macos")]
pub use macos::DarwinLayout as NativeLayout;

/// Whether this build has a record layout for its target
pub const SUPPORTED: bool = cfg!(any(target_os = "freebsd", target_os = "macos"));

/// Name of the compiled-in layout, or `"unsupported"`
#[must_use]
pub fn layout_name() -> &'static str
{
    #[cfg(any(target_os = "freebsd", target_os = "macos"))]
    {
        NativeLayout::NAME
    }

    #[cfg(not(any(target_os = "freebsd", target_os = "macos")))]
    {
        "unsupported"
    }
}

/// Size of the compiled-in record, or `None` on unsupported targets
#[must_use]
pub fn record_size() -> Option<usize>
{
    #[cfg(any(target_os = "freebsd", target_os = "macos"))]
    {
        Some(NativeLayout::RECORD_SIZE)
    }

    #[cfg(not(any(target_os = "freebsd", target_os = "macos")))]
    {
        None
    }
}
