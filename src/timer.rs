//! The elapsed-time counter.
//!
//! [`ElapsedDurationTimer`] measures time since a fixed reference instant and
//! emits a fresh [`DurationReading`] once per second while running.
//!
//! ```ignore
//! let mut timer = ElapsedDurationTimer::new("2023-10-27T00:00:00Z")?;
//! timer.set_running(true)?;          // emits a reading for "now" right away
//! println!("{}", timer.display());
//!
//! while let Some(reading) = timer.next().await {
//!     println!("{}", reading);
//! }
//! ```
//!
//! Ticks run on a Tokio task that publishes into a `watch` channel. Stopping
//! cancels the task, and a cancelled subscription hands out nothing more, so
//! no reading is delivered after `stop()` even if a tick was in flight.

use crate::error::TimerError;
use crate::time::{parse_reference, Clock, DurationReading, SystemClock};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Interval between readings.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A live stream of readings. Dropping it stops the stream.
///
/// Only the newest reading is kept; an owner that falls behind skips
/// straight to the current value.
#[derive(Debug)]
pub struct TimerSubscription {
    receiver: watch::Receiver<DurationReading>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TimerSubscription {
    /// Wait for the next reading. Returns `None` once stopped.
    pub async fn next(&mut self) -> Option<DurationReading> {
        if self.token.is_cancelled() {
            return None;
        }
        let changed = tokio::select! {
            biased;
            _ = self.token.cancelled() => return None,
            changed = self.receiver.changed() => changed,
        };
        changed.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    /// Take the newest unseen reading without waiting.
    pub fn try_next(&mut self) -> Option<DurationReading> {
        if self.token.is_cancelled() || !self.receiver.has_changed().unwrap_or(false) {
            return None;
        }
        Some(*self.receiver.borrow_and_update())
    }

    /// Stop emitting. Calling this more than once has no further effect.
    pub fn stop(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        log::info!("Elapsed-time counter stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Token cancelled when this subscription stops.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for TimerSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Counts time since a fixed reference instant.
///
/// The reference is parsed once in [`new`](Self::new) and reused for every
/// reading.
pub struct ElapsedDurationTimer {
    reference: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    subscription: Option<TimerSubscription>,
    latest: Option<DurationReading>,
}

impl ElapsedDurationTimer {
    /// Parse `reference` (RFC 3339 / ISO-8601). Fails fast on malformed input.
    pub fn new(reference: &str) -> Result<Self, TimerError> {
        Ok(Self::from_reference(parse_reference(reference)?))
    }

    /// Build from an already parsed instant.
    pub fn from_reference(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            clock: Arc::new(SystemClock),
            subscription: None,
            latest: None,
        }
    }

    /// Read "now" from `clock` instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Reading for the clock's current time.
    pub fn read_now(&self) -> DurationReading {
        DurationReading::between(self.reference, self.clock.now())
    }

    /// Start an independent subscription.
    ///
    /// The first reading is published before this returns; later readings
    /// follow every [`TICK_PERIOD`]. Requires a Tokio runtime.
    pub fn start(&self) -> Result<TimerSubscription, TimerError> {
        let handle = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;

        let (sender, receiver) = watch::channel(DurationReading::default());
        let token = CancellationToken::new();

        let first = self.read_now();
        sender.send_replace(first);
        log::info!("Elapsed-time counter started at {}", first);

        let task = handle.spawn(run_ticks(
            self.reference,
            Arc::clone(&self.clock),
            sender,
            token.clone(),
        ));

        Ok(TimerSubscription {
            receiver,
            token,
            task: Some(task),
        })
    }

    /// Follow the external running signal.
    ///
    /// false → true starts ticking and records the first reading
    /// immediately; true → false stops. Repeating the current state is a
    /// no-op.
    pub fn set_running(&mut self, running: bool) -> Result<(), TimerError> {
        match (running, self.is_running()) {
            (true, false) => {
                self.subscription = Some(self.start()?);
                self.poll();
            }
            (false, true) => self.stop(),
            _ => {}
        }
        Ok(())
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(TimerSubscription::is_running)
    }

    /// Take the newest unseen reading without waiting, if any.
    pub fn poll(&mut self) -> Option<DurationReading> {
        let newest = self.subscription.as_mut()?.try_next();
        if newest.is_some() {
            self.latest = newest;
        }
        newest
    }

    /// Token of the running subscription, if any.
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.subscription.as_ref().map(TimerSubscription::cancellation_token)
    }

    /// Wait for the next reading. Returns `None` when not running.
    pub async fn next(&mut self) -> Option<DurationReading> {
        let reading = self.subscription.as_mut()?.next().await;
        if reading.is_some() {
            self.latest = reading;
        }
        reading
    }

    /// Most recent reading delivered to this timer.
    pub fn latest(&self) -> Option<DurationReading> {
        self.latest
    }

    /// Text for the counter: the latest reading, or all zeros before the
    /// first one.
    pub fn display(&self) -> String {
        self.latest.unwrap_or_default().to_string()
    }
}

impl std::fmt::Debug for ElapsedDurationTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElapsedDurationTimer")
            .field("reference", &self.reference)
            .field("running", &self.is_running())
            .field("latest", &self.latest)
            .finish()
    }
}

/// Parse `reference` and start a subscription against the system clock.
pub fn start(reference: &str) -> Result<TimerSubscription, TimerError> {
    ElapsedDurationTimer::new(reference)?.start()
}

async fn run_ticks(
    reference: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    sender: watch::Sender<DurationReading>,
    token: CancellationToken,
) {
    let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                let reading = DurationReading::between(reference, clock.now());
                log::trace!("Elapsed-time tick: {}", reading);
                if sender.send(reading).is_err() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    /// Wall clock pinned to Tokio's (pausable) clock.
    struct TokioClock {
        base: DateTime<Utc>,
        origin: Instant,
    }

    impl TokioClock {
        fn new(base: DateTime<Utc>) -> Self {
            Self {
                base,
                origin: Instant::now(),
            }
        }
    }

    impl Clock for TokioClock {
        fn now(&self) -> DateTime<Utc> {
            let elapsed = Instant::now() - self.origin;
            self.base + chrono::Duration::from_std(elapsed).unwrap()
        }
    }

    fn instant(s: &str) -> DateTime<Utc> {
        parse_reference(s).unwrap()
    }

    const REFERENCE: &str = "2023-10-27T00:00:00Z";

    fn timer_at(now: &str) -> ElapsedDurationTimer {
        ElapsedDurationTimer::new(REFERENCE)
            .unwrap()
            .with_clock(Arc::new(TokioClock::new(instant(now))))
    }

    #[test]
    fn test_invalid_reference_fails_fast() {
        let err = ElapsedDurationTimer::new("27/10/2023").unwrap_err();
        assert!(matches!(err, TimerError::InvalidReference { .. }));
    }

    #[test]
    fn test_start_without_runtime() {
        let timer = ElapsedDurationTimer::new(REFERENCE).unwrap();
        assert!(matches!(timer.start(), Err(TimerError::NoRuntime)));
    }

    #[test]
    fn test_display_before_running() {
        let timer = ElapsedDurationTimer::new(REFERENCE).unwrap();
        assert_eq!(timer.display(), "0 days 00:00:00");
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_reading_is_immediate() {
        let timer = timer_at("2023-10-28T01:01:01Z");
        let mut sub = timer.start().unwrap();
        let first = sub.try_next().expect("reading queued on start");
        assert_eq!(first.to_string(), "1 days 01:01:01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let timer = timer_at("2023-10-27T00:00:10Z");
        let mut sub = timer.start().unwrap();
        assert_eq!(sub.next().await.unwrap().total_seconds(), 10);

        let start = Instant::now();
        assert_eq!(sub.next().await.unwrap().total_seconds(), 11);
        assert_eq!(sub.next().await.unwrap().total_seconds(), 12);
        assert_eq!(sub.next().await.unwrap().total_seconds(), 13);
        assert_eq!(Instant::now() - start, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_emission_after_stop() {
        let timer = timer_at("2023-10-27T00:00:10Z");
        let mut sub = timer.start().unwrap();
        sub.next().await.unwrap();

        // Let a tick land in the queue, then stop before reading it
        time::sleep(Duration::from_millis(1500)).await;
        sub.stop();
        assert!(sub.try_next().is_none());

        time::sleep(Duration::from_secs(5)).await;
        assert!(sub.try_next().is_none());
        assert!(sub.next().await.is_none());
        assert!(!sub.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_twice() {
        let timer = timer_at("2023-10-27T00:00:10Z");
        let mut sub = timer.start().unwrap();
        sub.stop();
        sub.stop();
        assert!(!sub.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_future_reference_reads_zero() {
        let timer = timer_at("2020-01-01T00:00:00Z");
        let mut sub = timer.start().unwrap();
        assert!(sub.next().await.unwrap().is_zero());
        assert!(sub.next().await.unwrap().is_zero());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_running_transitions() {
        let mut timer = timer_at("2023-10-27T00:01:00Z");

        timer.set_running(true).unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.display(), "0 days 00:01:00");

        // Repeating the state is a no-op
        timer.set_running(true).unwrap();
        assert!(timer.is_running());

        assert_eq!(timer.next().await.unwrap().total_seconds(), 61);
        assert_eq!(timer.display(), "0 days 00:01:01");

        timer.set_running(false).unwrap();
        assert!(!timer.is_running());
        time::sleep(Duration::from_secs(3)).await;
        assert!(timer.poll().is_none());
        assert!(timer.next().await.is_none());
        // The last value stays on display
        assert_eq!(timer.display(), "0 days 00:01:01");

        timer.set_running(false).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_reads_fresh_value() {
        let mut timer = timer_at("2023-10-27T00:00:00Z");
        timer.set_running(true).unwrap();
        timer.set_running(false).unwrap();

        time::sleep(Duration::from_secs(30)).await;
        timer.set_running(true).unwrap();
        assert_eq!(timer.latest().unwrap().total_seconds(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let timer = timer_at("2023-10-27T00:00:00Z");
        let sub = timer.start().unwrap();
        let token = sub.cancellation_token();
        drop(sub);
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_reader_gets_latest_only() {
        let timer = timer_at("2023-10-27T00:00:10Z");
        let mut sub = timer.start().unwrap();
        assert_eq!(sub.try_next().unwrap().total_seconds(), 10);

        // Five ticks land while nobody reads; only the newest is kept
        time::sleep(Duration::from_millis(5500)).await;
        assert_eq!(sub.try_next().unwrap().total_seconds(), 15);
        assert!(sub.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reference_parsed_once() {
        let clock = Arc::new(ManualClock::new(instant("2023-10-27T00:00:05Z")));
        let mut timer = ElapsedDurationTimer::new(REFERENCE)
            .unwrap()
            .with_clock(clock.clone());
        let reference = timer.reference();

        timer.set_running(true).unwrap();
        clock.advance(Duration::from_secs(2));
        assert_eq!(timer.next().await.unwrap().total_seconds(), 7);
        assert_eq!(timer.reference(), reference);
    }
}
