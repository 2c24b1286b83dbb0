//! # Quiz countdown
//!
//! [`QuizClock`] is the whole of the timed-quiz state: an integer of
//! remaining seconds moved by an external one-second tick. The clock never
//! reads wall time itself, so the component that owns the timer decides
//! when a tick happens and tests can drive it directly.
//!
//! [`SubmitGate`] guards the submit call. The manual button and the expiry
//! tick both go through [`SubmitGate::try_acquire`]; only the first caller
//! gets to submit.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Seconds left after this tick.
    Running(u32),
    /// This tick reached zero. Returned once.
    Expired,
    /// The clock is stopped or already expired.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizClock {
    remaining: u32,
    stopped: bool,
}

impl QuizClock {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            stopped: false,
        }
    }

    /// `None` for untimed quizzes (no limit, or a zero limit).
    pub fn from_minutes(time_limit: Option<u32>) -> Option<Self> {
        time_limit
            .filter(|&m| m > 0)
            .map(|m| Self::new(m.saturating_mul(60)))
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn tick(&mut self) -> Tick {
        if self.stopped || self.remaining == 0 {
            return Tick::Idle;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.stopped = true;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_warning(&self, threshold_secs: u32) -> bool {
        self.remaining < threshold_secs
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One-shot latch shared by the manual and automatic submit paths.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    taken: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` for exactly one caller until [`release`](Self::release).
    pub fn try_acquire(&self) -> bool {
        self.taken
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Re-open after a failed submit so the student can retry.
    pub fn release(&self) {
        self.taken.store(false, Ordering::Release);
    }

    pub fn is_taken(&self) -> bool {
        self.taken.load(Ordering::Acquire)
    }

    /// Acquire the gate now and hand back the submit future, or `None` if
    /// another submit already holds it. The gate stays taken after a
    /// success and re-opens after a failure.
    pub fn begin<F, Fut, T, E>(&self, call: F) -> Option<impl Future<Output = Result<T, E>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.try_acquire() {
            return None;
        }
        let gate = self.clone();
        let pending = call();
        Some(async move {
            let result = pending.await;
            if result.is_err() {
                gate.release();
            }
            result
        })
    }
}

impl PartialEq for SubmitGate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.taken, &other.taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minutes() {
        assert_eq!(QuizClock::from_minutes(None), None);
        assert_eq!(QuizClock::from_minutes(Some(0)), None);
        assert_eq!(QuizClock::from_minutes(Some(2)).unwrap().remaining(), 120);
    }

    #[test]
    fn test_decrements_once_per_tick() {
        let mut clock = QuizClock::new(3);
        assert_eq!(clock.tick(), Tick::Running(2));
        assert_eq!(clock.remaining(), 2);
        assert_eq!(clock.tick(), Tick::Running(1));
        assert_eq!(clock.remaining(), 1);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut clock = QuizClock::new(2);
        let ticks: Vec<Tick> = (0..5).map(|_| clock.tick()).collect();
        assert_eq!(
            ticks,
            vec![
                Tick::Running(1),
                Tick::Expired,
                Tick::Idle,
                Tick::Idle,
                Tick::Idle
            ]
        );
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_stop_freezes() {
        let mut clock = QuizClock::new(10);
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), Tick::Idle);
        assert_eq!(clock.remaining(), 9);
        assert!(clock.is_stopped());
    }

    #[test]
    fn test_zero_clock_never_expires() {
        let mut clock = QuizClock::new(0);
        assert_eq!(clock.tick(), Tick::Idle);
    }

    #[test]
    fn test_warning_and_format() {
        let clock = QuizClock::new(299);
        assert!(clock.is_warning(300));
        assert!(!QuizClock::new(300).is_warning(300));
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(clock.display(), "4:59");
    }

    #[test]
    fn test_gate_single_winner() {
        let gate = SubmitGate::new();
        let auto = gate.clone();
        assert!(gate.try_acquire());
        assert!(!auto.try_acquire());
        assert!(auto.is_taken());
        gate.release();
        assert!(auto.try_acquire());
    }

    #[test]
    fn test_gate_races_across_threads() {
        let gate = SubmitGate::new();
        let winners: usize = (0..8)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.try_acquire())
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_manual_and_expiry_submit_once() {
        let gate = SubmitGate::new();
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let send = || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(7)
            }
        };

        let manual = gate.begin(send).expect("first submit wins");
        let expiry = gate.begin(send);
        assert!(expiry.is_none());

        assert_eq!(manual.await, Ok(7));
        assert!(gate.is_taken());
        assert!(gate.begin(send).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_submit_allows_retry() {
        let gate = SubmitGate::new();

        let first = gate
            .begin(|| async { Err::<i64, _>("offline".to_string()) })
            .expect("gate open");
        assert_eq!(first.await, Err("offline".to_string()));
        assert!(!gate.is_taken());

        let retry = gate
            .begin(|| async { Ok::<_, String>(42) })
            .expect("gate re-opened");
        assert_eq!(retry.await, Ok(42));
        assert!(gate.is_taken());
    }

    #[tokio::test]
    async fn test_held_gate_skips_the_call() {
        let gate = SubmitGate::new();
        assert!(gate.try_acquire());
        let mut called = false;
        let skipped = gate
            .begin(|| {
                called = true;
                async { Ok::<_, String>(()) }
            })
            .is_none();
        assert!(skipped);
        assert!(!called);
    }
}
