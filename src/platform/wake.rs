//! Screen wake lock
//!
//! Best-effort: a failure to acquire is logged and the session proceeds
//! without the lock. Released on reset and on drop.

use log::{info, warn};

/// Keeps the screen awake for the duration of a practice session
pub trait WakeLock {
    /// Acquire the lock. Never fails the caller; problems are logged.
    fn request(&mut self);
    /// Release the lock if held. Safe to call when not held.
    fn release(&mut self);
}

/// Platforms without an inhibitor service
#[allow(dead_code)]
pub struct NoopWakeLock;

impl WakeLock for NoopWakeLock {
    fn request(&mut self) {}
    fn release(&mut self) {}
}

/// Holds an idle inhibitor through a `systemd-inhibit` child process
#[cfg(target_os = "linux")]
pub struct InhibitWakeLock {
    child: Option<std::process::Child>,
}

#[cfg(target_os = "linux")]
impl InhibitWakeLock {
    pub fn new() -> Self {
        InhibitWakeLock { child: None }
    }
}

#[cfg(target_os = "linux")]
impl Default for InhibitWakeLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "linux")]
impl WakeLock for InhibitWakeLock {
    fn request(&mut self) {
        if self.child.is_some() {
            return;
        }
        let spawned = std::process::Command::new("systemd-inhibit")
            .args([
                "--what=idle",
                "--who=koto-trainer",
                "--why=practice session in progress",
                "sleep",
                "infinity",
            ])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                info!("screen wake lock active");
                self.child = Some(child);
            }
            Err(err) => {
                warn!("could not acquire wake lock: {}", err);
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            info!("screen wake lock released");
        }
    }
}

#[cfg(target_os = "linux")]
impl Drop for InhibitWakeLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// Wake lock for the current platform
pub fn platform_wake_lock() -> Box<dyn WakeLock> {
    #[cfg(target_os = "linux")]
    {
        Box::new(InhibitWakeLock::new())
    }
    #[cfg(not(target_os = "linux"))]
    {
        Box::new(NoopWakeLock)
    }
}
