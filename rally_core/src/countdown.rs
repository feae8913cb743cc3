use crate::config::Config;

/// Pre-serve countdown: 3, 2, 1 then "Go" (reported as 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at: u64,
    step_ms: u64,
    go_ms: u64,
    last_step: Option<u8>,
}

impl Countdown {
    pub const STEPS: u8 = 3;

    pub fn new(started_at: u64, step_ms: u64, go_ms: u64) -> Self {
        Self {
            started_at,
            step_ms,
            go_ms,
            last_step: None,
        }
    }

    pub fn from_config(started_at: u64, config: &Config) -> Self {
        Self::new(started_at, config.countdown_step_ms, config.countdown_go_ms)
    }

    pub fn total_ms(&self) -> u64 {
        self.step_ms * u64::from(Self::STEPS) + self.go_ms
    }

    /// Step showing at `now`, `None` once the countdown has finished
    pub fn step_at(&self, now: u64) -> Option<u8> {
        let elapsed = now.saturating_sub(self.started_at);
        let numbered = self.step_ms * u64::from(Self::STEPS);
        if elapsed < numbered {
            let index = (elapsed / self.step_ms.max(1)) as u8;
            Some(Self::STEPS - index)
        } else if elapsed < numbered + self.go_ms {
            Some(0)
        } else {
            None
        }
    }

    pub fn is_done(&self, now: u64) -> bool {
        self.step_at(now).is_none()
    }

    /// The step that began since the previous poll, if any
    pub fn poll(&mut self, now: u64) -> Option<u8> {
        let step = self.step_at(now)?;
        if self.last_step == Some(step) {
            return None;
        }
        self.last_step = Some(step);
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_boundaries() {
        let countdown = Countdown::new(1_000, 900, 500);
        assert_eq!(countdown.step_at(1_000), Some(3));
        assert_eq!(countdown.step_at(1_899), Some(3));
        assert_eq!(countdown.step_at(1_900), Some(2));
        assert_eq!(countdown.step_at(2_800), Some(1));
        assert_eq!(countdown.step_at(3_700), Some(0));
        assert_eq!(countdown.step_at(4_199), Some(0));
        assert_eq!(countdown.step_at(4_200), None);
        assert_eq!(countdown.total_ms(), 3_200);
    }

    #[test]
    fn test_poll_reports_each_step_once() {
        let mut countdown = Countdown::new(0, 900, 500);
        let mut seen = Vec::new();
        let mut now = 0;
        while !countdown.is_done(now) {
            if let Some(step) = countdown.poll(now) {
                seen.push(step);
            }
            now += 16;
        }
        assert_eq!(seen, vec![3, 2, 1, 0]);
        assert_eq!(countdown.poll(now), None);
    }

    #[test]
    fn test_clock_before_start_shows_first_step() {
        let countdown = Countdown::new(5_000, 900, 500);
        assert_eq!(countdown.step_at(10), Some(3));
    }
}
