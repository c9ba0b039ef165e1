//! Common module for library exports

pub use crate::error::{CttyError, CttyResult};
pub use crate::platform::KernelRecordLayout;
#[cfg(any(target_os = "freebsd", target_os = "macos"))]
pub use crate::platform::NativeLayout;
pub use crate::resolver::{controlling_tty_device, resolve_controlling_tty_device, CttyResolver};
pub use crate::sysctl::{ProcessTable, Sysctl};
pub use crate::types::{DeviceId, ProcessId, ProcessQuery};
