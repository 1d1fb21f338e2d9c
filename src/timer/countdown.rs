//! Generation-tagged countdown timer
//!
//! A single countdown is active at a time. Each `start` bumps the
//! generation and aborts the previous ticking task, and every event carries
//! the generation it was produced under so a consumer can drop anything
//! that belongs to an older countdown.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{
    sync::mpsc,
    task::AbortHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::error::FocusError;

/// Period of the ticking trigger
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Lifecycle of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Event delivered by the ticking task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; carries the post-decrement value
    Tick { generation: u64, remaining_seconds: u64 },
    /// The count reached zero. Delivered once, after the last tick.
    Finished { generation: u64 },
}

impl TimerEvent {
    /// Generation of the countdown that produced this event
    pub fn generation(&self) -> u64 {
        match self {
            TimerEvent::Tick { generation, .. } | TimerEvent::Finished { generation } => *generation,
        }
    }
}

#[derive(Debug)]
struct TimerHandle {
    status: TimerStatus,
    remaining_seconds: u64,
    generation: u64,
    task: Option<AbortHandle>,
}

/// Outcome of one firing of the periodic trigger
enum Firing {
    Continue,
    Done,
}

/// Countdown timer reused across phases.
///
/// `start` spawns onto the current tokio runtime, so it must be called from
/// within one.
#[derive(Debug)]
pub struct CountdownTimer {
    handle: Arc<Mutex<TimerHandle>>,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl CountdownTimer {
    /// Create an idle timer and the receiver its events are delivered on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let timer = Self {
            handle: Arc::new(Mutex::new(TimerHandle {
                status: TimerStatus::Idle,
                remaining_seconds: 0,
                generation: 0,
                task: None,
            })),
            events_tx,
        };
        (timer, events_rx)
    }

    /// Arm a new countdown of `duration_secs`, invalidating any previous one.
    ///
    /// Returns the generation of the new countdown.
    pub fn start(&self, duration_secs: u64) -> Result<u64, FocusError> {
        if duration_secs == 0 {
            return Err(FocusError::configuration("countdown duration must be positive"));
        }

        let mut handle = self.lock();
        if let Some(task) = handle.task.take() {
            task.abort();
        }
        handle.generation += 1;
        handle.remaining_seconds = duration_secs;
        handle.status = TimerStatus::Running;

        let generation = handle.generation;
        let task = tokio::spawn(run_countdown(
            Arc::clone(&self.handle),
            generation,
            self.events_tx.clone(),
        ));
        handle.task = Some(task.abort_handle());

        debug!("Countdown armed: generation={}, duration={}s", generation, duration_secs);
        Ok(generation)
    }

    /// Suspend ticking. No-op unless running.
    pub fn pause(&self) {
        let mut handle = self.lock();
        if handle.status == TimerStatus::Running {
            handle.status = TimerStatus::Paused;
            debug!("Countdown paused at {}s", handle.remaining_seconds);
        }
    }

    /// Continue ticking from where it was paused. No-op unless paused.
    pub fn resume(&self) {
        let mut handle = self.lock();
        if handle.status == TimerStatus::Paused {
            handle.status = TimerStatus::Running;
            debug!("Countdown resumed at {}s", handle.remaining_seconds);
        }
    }

    /// Cancel any countdown and return to idle. Idempotent.
    pub fn stop(&self) {
        let mut handle = self.lock();
        if let Some(task) = handle.task.take() {
            task.abort();
        }
        // Events already queued from the cancelled countdown become stale.
        handle.generation += 1;
        handle.remaining_seconds = 0;
        handle.status = TimerStatus::Idle;
    }

    /// Seconds left as of the last firing
    pub fn remaining_seconds(&self) -> u64 {
        self.lock().remaining_seconds
    }

    /// True while a countdown is armed, paused or not
    pub fn is_running(&self) -> bool {
        matches!(self.lock().status, TimerStatus::Running | TimerStatus::Paused)
    }

    /// True while the countdown is paused
    pub fn is_paused(&self) -> bool {
        self.lock().status == TimerStatus::Paused
    }

    /// Current lifecycle state
    pub fn status(&self) -> TimerStatus {
        self.lock().status
    }

    /// Whether an event tagged with `generation` belongs to the live countdown
    pub fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    fn lock(&self) -> MutexGuard<'_, TimerHandle> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ticking task for one generation
async fn run_countdown(
    handle: Arc<Mutex<TimerHandle>>,
    generation: u64,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if let Firing::Done = fire(&handle, generation, &events_tx) {
            break;
        }
    }
}

/// Handle one firing. Runs entirely under the handle lock so a concurrent
/// `start` or `stop` either happens before the generation check or after
/// the event has been queued.
fn fire(
    handle: &Mutex<TimerHandle>,
    generation: u64,
    events_tx: &mpsc::UnboundedSender<TimerEvent>,
) -> Firing {
    let mut handle = handle.lock().unwrap_or_else(PoisonError::into_inner);
    if handle.generation != generation {
        debug!("Dropping firing from stale countdown generation {}", generation);
        return Firing::Done;
    }

    match handle.status {
        TimerStatus::Paused => return Firing::Continue,
        TimerStatus::Running => {}
        TimerStatus::Idle | TimerStatus::Finished => return Firing::Done,
    }

    handle.remaining_seconds = handle.remaining_seconds.saturating_sub(1);
    let remaining_seconds = handle.remaining_seconds;
    if events_tx
        .send(TimerEvent::Tick { generation, remaining_seconds })
        .is_err()
    {
        debug!("Timer event receiver dropped, abandoning countdown generation {}", generation);
        handle.status = TimerStatus::Idle;
        handle.task = None;
        return Firing::Done;
    }

    if remaining_seconds > 0 {
        return Firing::Continue;
    }

    handle.status = TimerStatus::Finished;
    handle.task = None;
    let _ = events_tx.send(TimerEvent::Finished { generation });
    Firing::Done
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    async fn collect_until_finished(
        rx: &mut mpsc::UnboundedReceiver<TimerEvent>,
    ) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
            if let TimerEvent::Finished { .. } = event {
                break;
            }
        }
        events
    }

    fn tick_values(events: &[TimerEvent]) -> Vec<u64> {
        events
            .iter()
            .filter_map(|event| match event {
                TimerEvent::Tick { remaining_seconds, .. } => Some(*remaining_seconds),
                TimerEvent::Finished { .. } => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivers_one_tick_per_second_then_finish() {
        let (timer, mut rx) = CountdownTimer::new();
        let generation = timer.start(4).unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.remaining_seconds(), 4);

        let events = collect_until_finished(&mut rx).await;
        assert_eq!(tick_values(&events), vec![3, 2, 1, 0]);
        assert_eq!(events.last(), Some(&TimerEvent::Finished { generation }));
        assert!(events.iter().all(|event| event.generation() == generation));

        assert_eq!(timer.status(), TimerStatus::Finished);
        assert!(!timer.is_running());

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_second_countdown_still_ticks() {
        let (timer, mut rx) = CountdownTimer::new();
        let generation = timer.start(1).unwrap();

        let events = collect_until_finished(&mut rx).await;
        assert_eq!(
            events,
            vec![
                TimerEvent::Tick { generation, remaining_seconds: 0 },
                TimerEvent::Finished { generation },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_arrives_after_one_period() {
        let (timer, mut rx) = CountdownTimer::new();
        timer.start(3).unwrap();

        time::sleep(Duration::from_millis(900)).await;
        assert!(rx.try_recv().is_err());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, TimerEvent::Tick { remaining_seconds: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_rejected_without_state_change() {
        let (timer, _rx) = CountdownTimer::new();
        assert!(matches!(timer.start(0), Err(FocusError::Configuration(_))));
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert!(timer.is_current(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume_lose_no_seconds() {
        let (timer, mut rx) = CountdownTimer::new();
        timer.start(5).unwrap();

        for expected in [4, 3] {
            let event = rx.recv().await.unwrap();
            assert!(matches!(event, TimerEvent::Tick { remaining_seconds, .. } if remaining_seconds == expected));
        }

        timer.pause();
        assert!(timer.is_paused());
        assert!(timer.is_running());

        time::sleep(Duration::from_secs(30)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(timer.remaining_seconds(), 3);

        timer.resume();
        assert!(!timer.is_paused());

        let events = collect_until_finished(&mut rx).await;
        assert_eq!(tick_values(&events), vec![2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_and_resume_are_noops_in_wrong_state() {
        let (timer, _rx) = CountdownTimer::new();
        timer.pause();
        assert_eq!(timer.status(), TimerStatus::Idle);

        timer.start(10).unwrap();
        timer.resume();
        assert_eq!(timer.status(), TimerStatus::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_silences_previous_countdown() {
        let (timer, mut rx) = CountdownTimer::new();
        let first = timer.start(3).unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.generation(), first);

        let second = timer.start(2).unwrap();
        assert!(second > first);
        assert!(!timer.is_current(first));

        let events = collect_until_finished(&mut rx).await;
        assert!(events.iter().all(|event| event.generation() == second));
        assert_eq!(tick_values(&events), vec![1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_and_is_idempotent() {
        let (timer, mut rx) = CountdownTimer::new();
        let generation = timer.start(3).unwrap();
        rx.recv().await.unwrap();

        timer.stop();
        timer.stop();
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_current(generation));

        time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_receiver_leaves_timer_idle() {
        let (timer, rx) = CountdownTimer::new();
        drop(rx);
        timer.start(5).unwrap();
        assert!(timer.is_running());

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_seconds(), 4);
    }
}
