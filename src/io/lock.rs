use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory file lock serializing writers to the shared list document.
///
/// Every mutation is one lock-load-mutate-save cycle; concurrent `lar`
/// processes (or a watch session) queue behind the flock.
pub struct ListLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not lock {path}: another lar process may be writing")]
    Timeout { path: PathBuf },
}

impl ListLock {
    /// Acquire the lock for the list root, waiting up to `timeout`.
    pub fn acquire(root: &Path, timeout: Duration) -> Result<ListLock, LockError> {
        let lock_path = root.join(".larder.lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::Create {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    return Ok(ListLock {
                        _file: file,
                        path: lock_path,
                    });
                }
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => return Err(LockError::Timeout { path: lock_path }),
            }
        }
    }

    /// Acquire with the default timeout (5 seconds).
    pub fn acquire_default(root: &Path) -> Result<ListLock, LockError> {
        ListLock::acquire(root, Duration::from_secs(5))
    }
}

impl Drop for ListLock {
    fn drop(&mut self) {
        // flock releases with the fd; the file itself is just litter
        let _ = fs::remove_file(&self.path);
    }
}

/// Try to take an exclusive flock (non-blocking).
#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    // Advisory only; on non-Unix platforms just proceed
    Ok(())
}
