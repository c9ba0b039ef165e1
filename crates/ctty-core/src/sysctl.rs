//! # Process Table Access
//!
//! The resolver never calls `sysctl` directly. It talks to a [`ProcessTable`],
//! which lets tests swap the kernel for a fake that fails or returns canned
//! records.
//!
//! ## sysctl(3)
//!
//! ```c
//! int sysctl(
//!     const int *name,   // MIB: CTL_KERN, KERN_PROC, KERN_PROC_PID, pid
//!     u_int namelen,     // 4
//!     void *oldp,        // Output: one struct kinfo_proc
//!     size_t *oldlenp,   // In: buffer size. Out: bytes written
//!     const void *newp,  // NULL (read only)
//!     size_t newlen      // 0
//! );
//! ```
//!
//! See: [sysctl(3) man page](https://man.freebsd.org/cgi/man.cgi?query=sysctl&sektion=3)

use std::io;

use crate::platform::KernelRecordLayout;
use crate::types::ProcessQuery;

/// A source of kernel process records for layout `L`
pub trait ProcessTable<L: KernelRecordLayout>
{
    /// Fill `record` with the entry selected by `query`
    ///
    /// Returns the number of bytes the kernel wrote. The caller must not read
    /// `record` unless this returns `Ok(L::RECORD_SIZE)`.
    ///
    /// ## Errors
    ///
    /// The OS error reported by the query.
    fn query(&self, query: &ProcessQuery, record: &mut L::Record) -> io::Result<usize>;
}

/// The kernel's process table, read through `sysctl(3)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Sysctl;

#[cfg(any(target_os = "freebsd", target_os = "macos"))]
impl ProcessTable<crate::platform::NativeLayout> for Sysctl
{
    fn query(
        &self,
        query: &ProcessQuery,
        record: &mut <crate::platform::NativeLayout as KernelRecordLayout>::Record,
    ) -> io::Result<usize>
    {
        use std::ptr;

        use crate::platform::NativeLayout;

        let mut mib = query
            .mib()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        let mut size: libc::size_t = NativeLayout::RECORD_SIZE;

        tracing::trace!(?mib, size, "sysctl KERN_PROC_PID");

        // SAFETY: `record` is a live, exclusively borrowed kinfo_proc of exactly
        // `size` bytes. The kernel writes at most `size` bytes and updates
        // `size` with the count. `mib` outlives the call.
        #[allow(clippy::cast_possible_truncation)] // MIB length is 4
        let rc = unsafe {
            libc::sysctl(
                mib.as_mut_ptr(),
                mib.len() as libc::c_uint,
                ptr::from_mut(record).cast::<libc::c_void>(),
                &mut size,
                ptr::null_mut::<libc::c_void>(),
                0,
            )
        };

        if rc == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(size)
    }
}

#[cfg(all(test, any(target_os = "freebsd", target_os = "macos")))]
mod tests
{
    use super::*;
    use crate::platform::NativeLayout;

    #[test]
    fn test_own_record_is_full_size()
    {
        let mut record = NativeLayout::empty_record();
        let written = <Sysctl as ProcessTable<NativeLayout>>::query(&Sysctl, &ProcessQuery::current(), &mut record).unwrap();
        assert_eq!(written, NativeLayout::RECORD_SIZE);
    }
}
