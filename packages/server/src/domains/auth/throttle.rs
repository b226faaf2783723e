//! Per-IP login lockout.
//!
//! Five failed logins from one address lock it out for fifteen minutes. Each
//! failure restarts the window, and a successful login clears the counter.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const MAX_LOGIN_ATTEMPTS: u32 = 5;
pub const LOCKOUT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Copy)]
struct Attempts {
    count: u32,
    expires_at: Instant,
}

pub struct LoginThrottle {
    max_attempts: u32,
    window: Duration,
    attempts: Mutex<HashMap<IpAddr, Attempts>>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::with_policy(MAX_LOGIN_ATTEMPTS, LOCKOUT_WINDOW)
    }

    pub fn with_policy(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// True while the address has used up its attempts inside the window.
    pub fn is_locked(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut attempts = self.lock();
        match attempts.get(&ip) {
            Some(entry) if entry.expires_at > now => entry.count >= self.max_attempts,
            Some(_) => {
                attempts.remove(&ip);
                false
            }
            None => false,
        }
    }

    /// Count a failed login and return the running total.
    pub fn record_failure(&self, ip: IpAddr) -> u32 {
        let now = Instant::now();
        let mut attempts = self.lock();
        attempts.retain(|_, entry| entry.expires_at > now);

        let entry = attempts.entry(ip).or_insert(Attempts {
            count: 0,
            expires_at: now,
        });
        entry.count += 1;
        entry.expires_at = now + self.window;
        entry.count
    }

    pub fn clear(&self, ip: IpAddr) {
        self.lock().remove(&ip);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<IpAddr, Attempts>> {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[test]
    fn locks_after_max_failures() {
        let throttle = LoginThrottle::new();
        for _ in 0..4 {
            throttle.record_failure(ip(1));
            assert!(!throttle.is_locked(ip(1)));
        }
        assert_eq!(throttle.record_failure(ip(1)), 5);
        assert!(throttle.is_locked(ip(1)));
        assert!(!throttle.is_locked(ip(2)));
    }

    #[test]
    fn clear_resets_counter() {
        let throttle = LoginThrottle::new();
        for _ in 0..5 {
            throttle.record_failure(ip(1));
        }
        throttle.clear(ip(1));
        assert!(!throttle.is_locked(ip(1)));
        assert_eq!(throttle.record_failure(ip(1)), 1);
    }

    #[test]
    fn lock_expires_after_window() {
        let throttle = LoginThrottle::with_policy(2, Duration::from_millis(20));
        throttle.record_failure(ip(1));
        throttle.record_failure(ip(1));
        assert!(throttle.is_locked(ip(1)));

        std::thread::sleep(Duration::from_millis(40));
        assert!(!throttle.is_locked(ip(1)));
    }
}
