//! # Darwin `kinfo_proc` Declarations
//!
//! `libc` has no `kinfo_proc` for Apple targets, so the record that
//! `sysctl(KERN_PROC_PID)` writes is declared here, matching the 64-bit
//! user-space view of `<sys/sysctl.h>` and `<sys/proc.h>`.
//!
//! Only `kp_eproc.e_tdev` is ever read. The other fields exist to put it at
//! the right offset and to make the record exactly as large as the kernel's
//! (648 bytes on x86_64 and arm64). Kernel pointers are kept as opaque
//! `*mut c_void` and never dereferenced.
//!
//! ## References
//!
//! - [bsd/sys/sysctl.h](https://github.com/apple-oss-distributions/xnu/blob/main/bsd/sys/sysctl.h) (`struct kinfo_proc`, `struct eproc`)
//! - [bsd/sys/proc.h](https://github.com/apple-oss-distributions/xnu/blob/main/bsd/sys/proc.h) (`struct extern_proc`)

use libc::{c_char, c_int, c_short, c_uchar, c_uint, c_ushort, c_void, dev_t, gid_t, pid_t, timeval, uid_t};

/// `MAXCOMLEN + 1`
const COMM_LEN: usize = 17;
/// `WMESGLEN + 1`
const WMESG_LEN: usize = 8;
/// `COMAPT_MAXLOGNAME`
const LOGIN_LEN: usize = 12;
/// `NGROUPS`
const NGROUPS: usize = 16;

/// First member of `extern_proc`: run-queue links or start time
#[repr(C)]
#[derive(Clone, Copy)]
pub union ExternProcRunQueue
{
    pub p_st1: [*mut c_void; 2],
    pub p_starttime: timeval,
}

/// `struct itimerval`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ITimerVal
{
    pub it_interval: timeval,
    pub it_value: timeval,
}

/// `struct extern_proc`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ExternProc
{
    pub p_un: ExternProcRunQueue,
    pub p_vmspace: *mut c_void,
    pub p_sigacts: *mut c_void,
    pub p_flag: c_int,
    pub p_stat: c_char,
    pub p_pid: pid_t,
    pub p_oppid: pid_t,
    pub p_dupfd: c_int,
    pub user_stack: *mut c_char,
    pub exit_thread: *mut c_void,
    pub p_debugger: c_int,
    pub sigwait: c_int,
    pub p_estcpu: c_uint,
    pub p_cpticks: c_int,
    pub p_pctcpu: u32,
    pub p_wchan: *mut c_void,
    pub p_wmesg: *mut c_char,
    pub p_swtime: c_uint,
    pub p_slptime: c_uint,
    pub p_realtimer: ITimerVal,
    pub p_rtime: timeval,
    pub p_uticks: u64,
    pub p_sticks: u64,
    pub p_iticks: u64,
    pub p_traceflag: c_int,
    pub p_tracep: *mut c_void,
    pub p_siglist: c_int,
    pub p_textvp: *mut c_void,
    pub p_holdcnt: c_int,
    pub p_sigmask: u32,
    pub p_sigignore: u32,
    pub p_sigcatch: u32,
    pub p_priority: c_uchar,
    pub p_usrpri: c_uchar,
    pub p_nice: c_char,
    pub p_comm: [c_char; COMM_LEN],
    pub p_pgrp: *mut c_void,
    pub p_addr: *mut c_void,
    pub p_xstat: c_ushort,
    pub p_acflag: c_ushort,
    pub p_ru: *mut c_void,
}

/// `struct _pcred`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PCred
{
    pub pc_lock: [c_char; 72],
    pub pc_ucred: *mut c_void,
    pub p_ruid: uid_t,
    pub p_svuid: uid_t,
    pub p_rgid: gid_t,
    pub p_svgid: gid_t,
    pub p_refcnt: c_int,
}

/// `struct _ucred`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct UCred
{
    pub cr_ref: i32,
    pub cr_uid: uid_t,
    pub cr_ngroups: c_short,
    pub cr_groups: [gid_t; NGROUPS],
}

/// `struct vmspace` as exported to user space (placeholder fields only)
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VmSpace
{
    pub dummy: i32,
    pub dummy2: *mut c_char,
    pub dummy3: [i32; 5],
    pub dummy4: [*mut c_char; 3],
}

/// `struct eproc`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EProc
{
    pub e_paddr: *mut c_void,
    pub e_sess: *mut c_void,
    pub e_pcred: PCred,
    pub e_ucred: UCred,
    pub e_vm: VmSpace,
    pub e_ppid: pid_t,
    pub e_pgid: pid_t,
    pub e_jobc: c_short,
    /// Controlling terminal device, `NODEV` if none
    pub e_tdev: dev_t,
    pub e_tpgid: pid_t,
    pub e_tsess: *mut c_void,
    pub e_wmesg: [c_char; WMESG_LEN],
    pub e_xsize: i32,
    pub e_xrssize: c_short,
    pub e_xccount: c_short,
    pub e_xswrss: c_short,
    pub e_flag: i32,
    pub e_login: [c_char; LOGIN_LEN],
    pub e_spare: [i32; 4],
}

/// `struct kinfo_proc`
#[repr(C)]
#[derive(Clone, Copy)]
pub struct KinfoProc
{
    pub kp_proc: ExternProc,
    pub kp_eproc: EProc,
}

#[cfg(test)]
mod tests
{
    use std::mem::{offset_of, size_of};

    use super::*;

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn test_sizes_match_xnu_headers()
    {
        assert_eq!(size_of::<ExternProc>(), 296);
        assert_eq!(size_of::<EProc>(), 352);
        assert_eq!(size_of::<KinfoProc>(), 648);
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn test_e_tdev_offset()
    {
        assert_eq!(offset_of!(EProc, e_tdev), 276);
        assert_eq!(offset_of!(KinfoProc, kp_eproc) + offset_of!(EProc, e_tdev), 572);
    }
}
