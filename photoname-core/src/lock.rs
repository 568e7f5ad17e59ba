use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

const LOCK_FILE_NAME: &str = "photoname.lock";
const STALE_LOCK_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Guards the state directory while a batch is renamed or undone, so two
/// processes never append to the same undo log at once.
#[derive(Debug)]
pub struct StateLock {
    path: PathBuf,
    owner: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Parse `pid:timestamp`
fn parse_owner(content: &str) -> Option<(u32, u64)> {
    let (pid, timestamp) = content.trim().split_once(':')?;
    Some((pid.parse().ok()?, timestamp.parse().ok()?))
}

impl StateLock {
    /// Take the lock in `state_dir`, clearing it first if its holder is gone
    /// or it is older than five minutes.
    pub fn acquire(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(LOCK_FILE_NAME);

        if path.exists() {
            let content = fs::read_to_string(&path).context("Failed to read lock file")?;
            match parse_owner(&content) {
                Some((pid, timestamp))
                    if now_secs().saturating_sub(timestamp) <= STALE_LOCK_TIMEOUT_SECS
                        && is_process_running(pid) =>
                {
                    return Err(anyhow!(
                        "Another photoname process is already running (PID: {}). \
                        If this is incorrect, remove the lock file at: {}",
                        pid,
                        path.display()
                    ));
                },
                _ => {
                    tracing::debug!(path = %path.display(), "removing stale lock file");
                    fs::remove_file(&path).context("Failed to remove stale lock file")?;
                },
            }
        }

        fs::create_dir_all(state_dir).context("Failed to create state directory")?;

        let owner = format!("{}:{}", process::id(), now_secs());
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true) // Fail if another process won the race
            .open(&path)
            .context("Failed to create lock file")?;
        file.write_all(owner.as_bytes())
            .context("Failed to write lock file")?;

        Ok(Self { path, owner })
    }

    /// Release the lock, leaving it alone if someone else now owns it
    pub fn release(self) -> Result<()> {
        self.remove_if_owned()
    }

    fn remove_if_owned(&self) -> Result<()> {
        if let Ok(content) = fs::read_to_string(&self.path) {
            if content.trim() == self.owner {
                fs::remove_file(&self.path).context("Failed to remove lock file")?;
            }
        }
        Ok(())
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = self.remove_if_owned();
    }
}

/// Check if a process with the given PID is running
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    #[allow(clippy::cast_possible_wrap)]
    unsafe {
        libc::kill(pid as libc::pid_t, 0) == 0
    }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::OpenProcess;
    use winapi::um::winnt::PROCESS_QUERY_INFORMATION;

    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid);
        if handle.is_null() {
            false
        } else {
            CloseHandle(handle);
            true
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn is_process_running(_pid: u32) -> bool {
    false
}
