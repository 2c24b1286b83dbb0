//! Component-scoped driver for [`QuizClock`].

use std::future::Future;
use std::time::Duration;

use api::{QuizClock, Tick};
use dioxus::core::Task;
use dioxus::prelude::*;

use crate::platform;

const TICK: Duration = Duration::from_secs(1);

/// Wait one interval, then tick, until the clock stops ticking.
/// Returns `true` when the run ended by expiring.
pub(crate) async fn drive<W, F>(mut tick: impl FnMut() -> Tick, mut wait: W) -> bool
where
    W: FnMut(Duration) -> F,
    F: Future<Output = ()>,
{
    loop {
        wait(TICK).await;
        match tick() {
            Tick::Running(_) => continue,
            Tick::Expired => return true,
            Tick::Idle => return false,
        }
    }
}

/// Handle returned by [`use_quiz_countdown`].
#[derive(Clone, Copy, PartialEq)]
pub struct Countdown {
    clock: Signal<Option<QuizClock>>,
    task: Signal<Option<Task>>,
    on_expire: EventHandler<()>,
}

impl Countdown {
    /// Start counting down from `time_limit` minutes. Untimed quizzes never
    /// start a task.
    pub fn start(&mut self, time_limit: Option<u32>) {
        self.cancel_task();
        let Some(clock) = QuizClock::from_minutes(time_limit) else {
            self.clock.set(None);
            return;
        };
        self.clock.set(Some(clock));

        let mut clock_signal = self.clock;
        let on_expire = self.on_expire;
        let task = spawn(async move {
            let tick = move || match clock_signal.write().as_mut() {
                Some(clock) => clock.tick(),
                None => Tick::Idle,
            };
            if drive(tick, platform::sleep).await {
                tracing::info!("Quiz time expired");
                on_expire.call(());
            }
        });
        self.task.set(Some(task));
    }

    /// Freeze the clock and cancel the timer, e.g. after a manual submit.
    pub fn stop(&mut self) {
        if let Some(clock) = self.clock.write().as_mut() {
            clock.stop();
        }
        self.cancel_task();
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.write().take() {
            task.cancel();
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        self.clock.cloned().map(|c| c.remaining())
    }

    pub fn display(&self) -> Option<String> {
        self.clock.cloned().map(|c| c.display())
    }

    pub fn is_warning(&self, threshold_secs: u32) -> bool {
        self.clock
            .cloned()
            .is_some_and(|c| c.is_warning(threshold_secs))
    }
}

/// A per-second quiz countdown owned by the calling component.
///
/// The timer task is spawned in the component's scope, so unmounting the
/// page drops it. `on_expire` fires once, on the tick that reaches zero.
pub fn use_quiz_countdown(on_expire: EventHandler<()>) -> Countdown {
    let clock = use_signal(|| None::<QuizClock>);
    let task = use_signal(|| None::<Task>);
    Countdown {
        clock,
        task,
        on_expire,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_drive_waits_one_second_per_tick() {
        let mut clock = QuizClock::new(3);
        let waits = RefCell::new(Vec::new());

        let expired = drive(
            || clock.tick(),
            |d| {
                waits.borrow_mut().push(d);
                async {}
            },
        )
        .await;

        assert!(expired);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(*waits.borrow(), vec![Duration::from_secs(1); 3]);
    }

    #[tokio::test]
    async fn test_drive_stops_without_expiring() {
        let mut clock = QuizClock::new(5);
        clock.stop();
        let expired = drive(|| clock.tick(), |_| async {}).await;
        assert!(!expired);
        assert_eq!(clock.remaining(), 5);
    }
}
