use std::cell::Cell;
use std::rc::Rc;

/// Time source for a host
pub trait Environment {
    /// Milliseconds
    fn now(&self) -> u64;
}

/// Wall clock
pub struct SystemEnv;

impl Environment for SystemEnv {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Hand-advanced clock shared between its clones
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) -> u64 {
        let now = self.now.get() + ms;
        self.now.set(now);
        now
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Environment for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(1_000);
        let view = clock.clone();
        clock.advance(16);
        assert_eq!(view.now(), 1_016);
        view.set(5);
        assert_eq!(clock.now(), 5);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let env = SystemEnv;
        let a = env.now();
        let b = env.now();
        assert!(b >= a);
        assert!(a > 0);
    }
}
