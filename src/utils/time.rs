//! Utilities related to measuring how long things take.

use std::mem::MaybeUninit;
use std::time::Duration;

fn from_timeval(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec as u64) + Duration::from_micros(tv.tv_usec as u64)
}

/// Gets the user plus system CPU time spent by this process so far, or `None`
/// if the operating system won't say.
pub fn process_cpu_time() -> Option<Duration> {
    let mut usage = MaybeUninit::<libc::rusage>::uninit();

    // SAFETY: `getrusage` fills in the struct it is handed and nothing else,
    // and it is only read after a successful return.
    let usage = unsafe {
        if libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) != 0 {
            return None;
        }
        usage.assume_init()
    };

    Some(from_timeval(usage.ru_utime) + from_timeval(usage.ru_stime))
}
