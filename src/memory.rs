//! Allocator-reported memory accounting.
//!
//! Index memory footprints are measured as the delta of jemalloc's
//! `stats.allocated` counter around the timed operation. Every sample runs
//! three facility operations in order: flush the calling thread's
//! allocation cache, bump the statistics epoch, read `stats.allocated`.
//! jemalloc caches its statistics, so the epoch must be bumped immediately
//! before every read to avoid stale values; the tcache flush returns bytes
//! the thread holds but no longer uses, so they do not show up as
//! application allocation. The facility is process-global and not reentrant
//! across concurrent callers; the single-threaded execution model is what
//! makes it safe.
//!
//! Without the `jemalloc` feature there is no statistics facility and
//! sampling is a hard configuration error, never a silent zero.

use crate::error::BenchError;

/// Returns the calling thread's allocation cache to the arenas.
///
/// `thread.tcache.flush` is a void mallctl node: it must be invoked with no
/// value buffers at all, which the typed `tikv_jemalloc_ctl` wrappers cannot
/// express, hence the raw `mallctl` call. jemalloc reports `EFAULT` for a
/// thread that never built a cache; there is nothing to flush then.
#[cfg(feature = "jemalloc")]
fn flush_thread_cache() -> Result<(), BenchError> {
    const EFAULT: std::os::raw::c_int = 14;

    let code = unsafe {
        tikv_jemalloc_sys::mallctl(
            c"thread.tcache.flush".as_ptr(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            0,
        )
    };
    if code == 0 || code == EFAULT {
        Ok(())
    } else {
        Err(BenchError::Configuration(format!(
            "failed to flush the jemalloc thread cache (mallctl error {code})"
        )))
    }
}

/// Flushes the thread's allocation cache, refreshes the allocator
/// statistics and returns the total number of bytes currently allocated by
/// the application.
///
/// # Errors
///
/// [`BenchError::Configuration`] if any of the three facility operations
/// rejects the query.
#[cfg(feature = "jemalloc")]
pub fn allocated_bytes() -> Result<u64, BenchError> {
    flush_thread_cache()?;
    tikv_jemalloc_ctl::epoch::advance().map_err(|error| {
        BenchError::Configuration(format!("failed to advance the jemalloc epoch: {error}"))
    })?;
    let bytes = tikv_jemalloc_ctl::stats::allocated::read().map_err(|error| {
        BenchError::Configuration(format!("failed to read jemalloc stats.allocated: {error}"))
    })?;
    Ok(bytes as u64)
}

/// Refreshes the allocator statistics and returns the total number of bytes
/// currently allocated by the application.
///
/// # Errors
///
/// Always [`BenchError::Configuration`]: this build has no allocator
/// statistics facility.
#[cfg(not(feature = "jemalloc"))]
pub fn allocated_bytes() -> Result<u64, BenchError> {
    Err(BenchError::Configuration(
        "jemalloc is required for memory tracking (enable the `jemalloc` feature)".into(),
    ))
}
