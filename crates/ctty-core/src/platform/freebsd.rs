//! FreeBSD `kinfo_proc` layout.
//!
//! FreeBSD stores the controlling terminal directly in the record as
//! `ki_tdev`. Since FreeBSD 12 that field is 64 bits wide; older ABIs keep a
//! 32-bit `dev_t`, which `u64::from` widens without loss.

use std::mem;

use super::KernelRecordLayout;
use crate::types::DeviceId;

/// `struct kinfo_proc` from `<sys/user.h>`
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeBsdLayout;

impl KernelRecordLayout for FreeBsdLayout
{
    type Record = libc::kinfo_proc;

    const NAME: &'static str = "freebsd kinfo_proc.ki_tdev";

    fn empty_record() -> Self::Record
    {
        // SAFETY: kinfo_proc is plain C data; all-zero is a valid value.
        unsafe { mem::zeroed() }
    }

    fn ctty_device(record: &Self::Record) -> Option<DeviceId>
    {
        let tdev = record.ki_tdev;
        // NODEV is ((dev_t)-1)
        if tdev == libc::dev_t::MAX {
            return None;
        }
        Some(DeviceId(u64::from(tdev)))
    }
}
