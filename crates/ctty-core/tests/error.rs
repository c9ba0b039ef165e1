//! Tests for error handling

use std::io;

use ctty_core::error::{CttyError, CttyResult};
use ctty_core::DeviceId;

#[test]
fn test_unsupported_platform_names_os()
{
    let error = CttyError::UnsupportedPlatform("plan9");
    let message = format!("{}", error);
    assert!(message.contains("plan9"));
    assert!(message.contains("FreeBSD"));
}

#[test]
fn test_process_not_found_display()
{
    let error = CttyError::ProcessNotFound(12345);
    let message = format!("{}", error);
    assert!(message.contains("12345"));
    assert!(message.contains("not found"));
}

#[test]
fn test_size_mismatch_display()
{
    let error = CttyError::SizeMismatch { expected: 648, actual: 492 };
    let message = format!("{}", error);
    assert!(message.contains("648"));
    assert!(message.contains("492"));
}

#[test]
fn test_query_failed_has_source()
{
    use std::error::Error;

    let error = CttyError::QueryFailed {
        pid: 1,
        source: io::Error::from_raw_os_error(libc::EINVAL),
    };
    assert!(error.source().is_some());
    assert!(format!("{}", error).contains("PID 1"));
}

#[test]
fn test_device_name_unavailable_display()
{
    let error = CttyError::DeviceNameUnavailable(DeviceId(0x5c));
    assert!(format!("{}", error).contains("92"));
}

#[test]
fn test_io_error_converts()
{
    let error: CttyError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, CttyError::Io(_)));
}

#[test]
fn test_legacy_collapses_every_error()
{
    let errors = [
        CttyError::UnsupportedPlatform("plan9"),
        CttyError::ProcessNotFound(1),
        CttyError::PermissionDenied("test reason".to_string()),
        CttyError::SizeMismatch { expected: 1, actual: 0 },
        CttyError::InvalidArgument("test arg".to_string()),
    ];
    for error in errors {
        let result: CttyResult<Option<DeviceId>> = Err(error);
        assert_eq!(DeviceId::to_legacy(&result), 0);
    }
}

