//! # ctty-core
//!
//! Controlling-terminal lookup for BSD-family kernels.
//!
//! This crate answers one question: which terminal device is the controlling
//! terminal (ctty) of the current process? It asks the kernel's process table
//! through `sysctl(3)` (`CTL_KERN` / `KERN_PROC` / `KERN_PROC_PID`) instead of
//! opening `/dev/tty` and calling `stat` on it.
//!
//! ## Platform Support
//!
//! - **FreeBSD**: `kinfo_proc.ki_tdev`
//! - **macOS**: `kinfo_proc.kp_eproc.e_tdev`
//! - **Anything else**: builds, but every lookup reports
//!   [`CttyError::UnsupportedPlatform`]
//!
//! ## Two entry points
//!
//! [`controlling_tty_device`] returns `Ok(None)` when there is no controlling
//! terminal and an error when the kernel query fails.
//! [`resolve_controlling_tty_device`] keeps the old sentinel convention and
//! folds both cases into `0`.
//!
//! ```rust,no_run
//! match ctty_core::controlling_tty_device()? {
//!     Some(dev) => println!("ctty device: {dev}"),
//!     None => println!("no controlling terminal"),
//! }
//! # Ok::<(), ctty_core::CttyError>(())
//! ```
//!
//! ## Why unsafe code is needed
//!
//! `sysctl` and `devname_r` are C functions that write into caller-owned
//! buffers. The unsafe blocks are confined to [`sysctl`], [`devname`] and the
//! zeroed records in [`platform`].

#![allow(unsafe_code)] // Required for sysctl(3) and devname_r(3)

pub mod devname;
pub mod error;
pub mod platform;
pub mod prelude;
pub mod resolver;
pub mod sysctl;
pub mod types;

pub use devname::{controlling_tty_path, device_path};
pub use error::{CttyError, CttyResult};
pub use platform::KernelRecordLayout;
#[cfg(any(target_os = "freebsd", target_os = "macos"))]
pub use platform::NativeLayout;
pub use resolver::{controlling_tty_device, resolve_controlling_tty_device, CttyResolver};
pub use sysctl::{ProcessTable, Sysctl};
pub use types::{DeviceId, ProcessId, ProcessQuery};
