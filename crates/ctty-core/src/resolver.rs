//! # Controlling Terminal Resolver
//!
//! One kernel query, one field read:
//!
//! 1. Build a [`ProcessQuery`] for our own pid
//! 2. Ask the [`ProcessTable`] for exactly one `L::Record` (`L::RECORD_SIZE` bytes)
//! 3. On failure, or if the kernel wrote anything other than one full record,
//!    stop without touching the record
//! 4. Otherwise hand the record to `L::ctty_device`
//!
//! Nothing is cached and nothing is retried. Every call owns its own query and
//! record, so the resolver can be used from any number of threads at once.

use std::marker::PhantomData;

use tracing::{debug, warn};

use crate::error::{CttyError, CttyResult};
use crate::platform::KernelRecordLayout;
use crate::sysctl::ProcessTable;
use crate::types::{DeviceId, ProcessQuery};

/// Reads the controlling terminal through a process table with layout `L`
///
/// Most callers want [`controlling_tty_device`], which uses the kernel and the
/// compiled-in layout. Constructing a resolver directly is for plugging in a
/// different [`ProcessTable`].
#[derive(Debug, Clone, Copy)]
pub struct CttyResolver<T, L>
{
    table: T,
    layout: PhantomData<fn() -> L>,
}

impl<T, L> CttyResolver<T, L>
where
    T: ProcessTable<L>,
    L: KernelRecordLayout,
{
    /// Create a resolver over `table`
    pub const fn new(table: T) -> Self
    {
        CttyResolver { table, layout: PhantomData }
    }

    /// Controlling terminal of the calling process
    ///
    /// ## Errors
    ///
    /// - [`CttyError::ProcessNotFound`]: the kernel has no entry for our pid
    /// - [`CttyError::PermissionDenied`]: the query was refused
    /// - [`CttyError::SizeMismatch`]: the kernel did not write exactly one record
    /// - [`CttyError::QueryFailed`]: any other OS error
    pub fn resolve(&self) -> CttyResult<Option<DeviceId>>
    {
        self.resolve_query(&ProcessQuery::current())
    }

    pub(crate) fn resolve_query(&self, query: &ProcessQuery) -> CttyResult<Option<DeviceId>>
    {
        let pid = query.pid().0;
        let mut record = L::empty_record();

        let written = self
            .table
            .query(query, &mut record)
            .map_err(|e| CttyError::from_query_error(pid, L::RECORD_SIZE, e))?;

        if written == 0 {
            return Err(CttyError::ProcessNotFound(pid));
        }
        if written != L::RECORD_SIZE {
            return Err(CttyError::SizeMismatch { expected: L::RECORD_SIZE, actual: written });
        }

        let device = L::ctty_device(&record);
        debug!(pid, layout = L::NAME, device = ?device, "resolved controlling terminal");
        Ok(device)
    }
}

/// Controlling terminal device of the calling process
///
/// Returns `Ok(None)` when the process has no controlling terminal.
///
/// ## Errors
///
/// [`CttyError::UnsupportedPlatform`] on targets other than FreeBSD and
/// macOS, otherwise see [`CttyResolver::resolve`].
pub fn controlling_tty_device() -> CttyResult<Option<DeviceId>>
{
    #[cfg(any(target_os = "freebsd", target_os = "macos"))]
    {
        CttyResolver::<_, crate::platform::NativeLayout>::new(crate::sysctl::Sysctl).resolve()
    }

    #[cfg(not(any(target_os = "freebsd", target_os = "macos")))]
    {
        Err(CttyError::UnsupportedPlatform(std::env::consts::OS))
    }
}

/// Controlling terminal device of the calling process, `0` if unknown
///
/// This is the sentinel form of [`controlling_tty_device`]: no controlling
/// terminal, any query failure and an unsupported platform all return `0`.
/// Callers cannot tell these apart, and a genuine device id of `0` would look
/// the same. Prefer [`controlling_tty_device`] when that matters.
#[must_use]
pub fn resolve_controlling_tty_device() -> u64
{
    let result = controlling_tty_device();
    match &result {
        Ok(None) => debug!("no controlling terminal"),
        Err(e) => warn!(error = %e, "controlling terminal lookup failed"),
        Ok(Some(_)) => {}
    }
    DeviceId::to_legacy(&result)
}

#[cfg(test)]
mod tests
{
    use std::cell::Cell;
    use std::io;

    use super::*;

    /// Stand-in record: only the field we care about
    #[derive(Debug, Clone, Copy, Default)]
    struct FakeRecord
    {
        tdev: u64,
    }

    thread_local! {
        static EXTRACTIONS: Cell<usize> = const { Cell::new(0) };
    }

    struct FakeLayout;

    impl KernelRecordLayout for FakeLayout
    {
        type Record = FakeRecord;

        const NAME: &'static str = "fake";

        fn empty_record() -> FakeRecord
        {
            FakeRecord::default()
        }

        fn ctty_device(record: &FakeRecord) -> Option<DeviceId>
        {
            EXTRACTIONS.with(|n| n.set(n.get() + 1));
            (record.tdev != u64::MAX).then_some(DeviceId(record.tdev))
        }
    }

    enum FakeTable
    {
        Record(u64),
        Short(usize),
        Fail(i32),
    }

    impl ProcessTable<FakeLayout> for FakeTable
    {
        fn query(&self, _query: &ProcessQuery, record: &mut FakeRecord) -> io::Result<usize>
        {
            match *self {
                FakeTable::Record(tdev) => {
                    record.tdev = tdev;
                    Ok(FakeLayout::RECORD_SIZE)
                }
                FakeTable::Short(n) => {
                    record.tdev = 0xdead;
                    Ok(n)
                }
                FakeTable::Fail(errno) => Err(io::Error::from_raw_os_error(errno)),
            }
        }
    }

    fn extractions() -> usize
    {
        EXTRACTIONS.with(Cell::get)
    }

    fn fake_resolver(table: FakeTable) -> CttyResolver<FakeTable, FakeLayout>
    {
        CttyResolver::new(table)
    }

    #[test]
    fn test_resolves_device()
    {
        let resolver = fake_resolver(FakeTable::Record(0x1000003));
        assert_eq!(resolver.resolve().unwrap(), Some(DeviceId(0x1000003)));
    }

    #[test]
    fn test_no_controlling_terminal()
    {
        let resolver = fake_resolver(FakeTable::Record(u64::MAX));
        let result = resolver.resolve();
        assert_eq!(result.as_ref().unwrap(), &None);
        assert_eq!(DeviceId::to_legacy(&result), 0);
    }

    #[test]
    fn test_failure_never_reads_record()
    {
        let before = extractions();
        let resolver = fake_resolver(FakeTable::Fail(libc::EINVAL));
        let result = resolver.resolve();
        assert!(matches!(result, Err(CttyError::QueryFailed { .. })));
        assert_eq!(DeviceId::to_legacy(&result), 0);
        assert_eq!(extractions(), before);
    }

    #[test]
    fn test_zero_bytes_is_process_not_found()
    {
        let before = extractions();
        let resolver = fake_resolver(FakeTable::Short(0));
        let result = resolver.resolve_query(&ProcessQuery::for_pid(99_999));
        assert!(matches!(result, Err(CttyError::ProcessNotFound(99_999))));
        assert_eq!(extractions(), before);
    }

    #[test]
    fn test_short_record_is_size_mismatch()
    {
        let before = extractions();
        let resolver = fake_resolver(FakeTable::Short(FakeLayout::RECORD_SIZE - 1));
        match resolver.resolve() {
            Err(CttyError::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, std::mem::size_of::<FakeRecord>());
                assert_eq!(actual, expected - 1);
            }
            other => panic!("Expected SizeMismatch, got {other:?}"),
        }
        assert_eq!(extractions(), before);
    }

    #[test]
    fn test_esrch_is_process_not_found()
    {
        let resolver = fake_resolver(FakeTable::Fail(libc::ESRCH));
        let query = ProcessQuery::for_pid(4242);
        assert!(matches!(resolver.resolve_query(&query), Err(CttyError::ProcessNotFound(4242))));
    }

    #[test]
    fn test_repeated_calls_agree()
    {
        let resolver = fake_resolver(FakeTable::Record(0x5c));
        let first = resolver.resolve().unwrap();
        let second = resolver.resolve().unwrap();
        assert_eq!(first, second);
    }

    #[cfg(not(any(target_os = "freebsd", target_os = "macos")))]
    #[test]
    fn test_unsupported_platform()
    {
        assert!(matches!(controlling_tty_device(), Err(CttyError::UnsupportedPlatform(_))));
        assert_eq!(resolve_controlling_tty_device(), 0);
    }
}
