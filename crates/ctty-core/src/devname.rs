//! # Device Names
//!
//! Turn a [`DeviceId`] back into a `/dev` path with `devname_r(3)`.
//!
//! ```c
//! char *devname_r(dev_t dev, mode_t type, char *buf, int len);
//! ```
//!
//! On failure the function returns `NULL`, or a placeholder that starts with
//! `?` (macOS) or `#` (FreeBSD, e.g. `#C:0x5c`), depending on the OS.
//!
//! See: [devname(3) man page](https://man.freebsd.org/cgi/man.cgi?query=devname&sektion=3)

use std::path::PathBuf;

use crate::error::{CttyError, CttyResult};
use crate::resolver::controlling_tty_device;
use crate::types::DeviceId;

#[cfg(any(target_os = "freebsd", target_os = "macos"))]
mod ffi
{
    use libc::{c_char, c_int, dev_t, mode_t};

    extern "C" {
        pub fn devname_r(dev: dev_t, kind: mode_t, buf: *mut c_char, len: c_int) -> *mut c_char;
    }
}

/// Room for `SPECNAMELEN` (255) bytes plus NUL
#[cfg(any(target_os = "freebsd", target_os = "macos"))]
const DEVNAME_BUF_LEN: usize = 256;

#[cfg(target_os = "macos")]
#[allow(clippy::cast_possible_wrap)] // inverse of the widening in DarwinLayout
fn to_dev_t(dev: DeviceId) -> Option<libc::dev_t>
{
    u32::try_from(dev.0).ok().map(|raw| raw as libc::dev_t)
}

#[cfg(target_os = "freebsd")]
fn to_dev_t(dev: DeviceId) -> Option<libc::dev_t>
{
    libc::dev_t::try_from(dev.0).ok()
}

/// `/dev` path of a character device
///
/// ## Errors
///
/// - [`CttyError::DeviceNameUnavailable`]: the OS has no name for `dev`
/// - [`CttyError::InvalidArgument`]: `dev` does not fit in this platform's `dev_t`
/// - [`CttyError::UnsupportedPlatform`]: not FreeBSD or macOS
#[cfg(any(target_os = "freebsd", target_os = "macos"))]
pub fn device_path(dev: DeviceId) -> CttyResult<PathBuf>
{
    use std::ffi::CStr;

    use libc::{c_char, c_int};

    let raw = to_dev_t(dev).ok_or_else(|| CttyError::InvalidArgument(format!("device {dev} does not fit in dev_t")))?;

    let mut buf = [0 as c_char; DEVNAME_BUF_LEN];

    // SAFETY: `buf` is a writable array of DEVNAME_BUF_LEN bytes and outlives
    // the call. devname_r NUL-terminates within `len` bytes. The returned
    // pointer is either NULL, into `buf`, or a static string.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // 256 fits
    let name = unsafe {
        let res = ffi::devname_r(raw, libc::S_IFCHR, buf.as_mut_ptr(), DEVNAME_BUF_LEN as c_int);
        if res.is_null() {
            return Err(CttyError::DeviceNameUnavailable(dev));
        }
        CStr::from_ptr(res).to_string_lossy().into_owned()
    };

    if name.is_empty() || name.starts_with('?') || name.starts_with('#') {
        return Err(CttyError::DeviceNameUnavailable(dev));
    }

    tracing::debug!(%dev, name = %name, "named device");
    Ok(PathBuf::from("/dev").join(name))
}

/// `/dev` path of a character device
///
/// ## Errors
///
/// Always [`CttyError::UnsupportedPlatform`] on this target.
#[cfg(not(any(target_os = "freebsd", target_os = "macos")))]
pub fn device_path(dev: DeviceId) -> CttyResult<PathBuf>
{
    let _ = dev;
    Err(CttyError::UnsupportedPlatform(std::env::consts::OS))
}

/// `/dev` path of the calling process's controlling terminal
///
/// `Ok(None)` when there is no controlling terminal.
///
/// ## Errors
///
/// Anything from [`controlling_tty_device`] or [`device_path`].
pub fn controlling_tty_path() -> CttyResult<Option<PathBuf>>
{
    controlling_tty_device()?.map(device_path).transpose()
}
