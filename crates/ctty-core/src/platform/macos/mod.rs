//! macOS `kinfo_proc` layout.
//!
//! Darwin's `kinfo_proc` is two embedded structs, `kp_proc` (`extern_proc`)
//! and `kp_eproc` (`eproc`). The controlling terminal is `kp_eproc.e_tdev`, a
//! signed 32-bit `dev_t`. `libc` does not bind these structs for Apple
//! targets; [`ffi`] declares them.

pub mod ffi;

use std::mem;

use super::KernelRecordLayout;
use crate::types::DeviceId;

/// `NODEV` from `<sys/param.h>`
const NODEV: libc::dev_t = -1;

/// `struct kinfo_proc` from `<sys/sysctl.h>`
#[derive(Debug, Clone, Copy, Default)]
pub struct DarwinLayout;

impl KernelRecordLayout for DarwinLayout
{
    type Record = ffi::KinfoProc;

    const NAME: &'static str = "darwin kinfo_proc.kp_eproc.e_tdev";

    fn empty_record() -> Self::Record
    {
        // SAFETY: KinfoProc is plain C data (integers, arrays, raw pointers);
        // all-zero is a valid value.
        unsafe { mem::zeroed() }
    }

    #[allow(clippy::cast_sign_loss)] // dev_t is an opaque bit pattern
    fn ctty_device(record: &Self::Record) -> Option<DeviceId>
    {
        let tdev = record.kp_eproc.e_tdev;
        if tdev == NODEV {
            return None;
        }
        Some(DeviceId(u64::from(tdev as u32)))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_reads_nested_e_tdev()
    {
        let mut record = DarwinLayout::empty_record();
        // major 16, minor 3 (ttys003)
        record.kp_eproc.e_tdev = (16 << 24) | 3;
        assert_eq!(DarwinLayout::ctty_device(&record), Some(DeviceId(0x1000003)));
    }

    #[test]
    fn test_nodev_is_none()
    {
        let mut record = DarwinLayout::empty_record();
        record.kp_eproc.e_tdev = NODEV;
        assert_eq!(DarwinLayout::ctty_device(&record), None);
    }

    #[test]
    fn test_high_bit_is_not_sign_extended()
    {
        let mut record = DarwinLayout::empty_record();
        record.kp_eproc.e_tdev = i32::MIN;
        assert_eq!(DarwinLayout::ctty_device(&record), Some(DeviceId(0x8000_0000)));
    }

    #[test]
    fn test_record_size_matches_kinfo_proc()
    {
        assert_eq!(DarwinLayout::RECORD_SIZE, mem::size_of::<ffi::KinfoProc>());
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn test_record_size_is_648_bytes()
    {
        assert_eq!(DarwinLayout::RECORD_SIZE, 648);
    }
}
