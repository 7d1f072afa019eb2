//! # Value Interpolator
//!
//! Animates the displayed total toward the latest computed total.
//!
//! ```text
//!  retarget(x) ──► abort running task ──► Transition { from: value now, to: x }
//!                                              │
//!                        tokio task, one tick per frame
//!                                              │
//!                  watch::Sender<i64> ◄── round(sample(now))
//! ```
//!
//! A retarget mid-flight starts the new transition from wherever the old one
//! is at that instant, so rapid option changes never make the number jump or
//! restart from zero. The last frame of an undisturbed transition publishes
//! the target exactly.
//!
//! Every animation runs as its own task and is owned through an
//! `AnimationHandle`. Retargeting, `cancel()` and dropping the interpolator
//! all cancel it, so nothing keeps ticking once the view is gone. A cancelled
//! task never publishes again, even if it was mid-frame on another worker.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(800);
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Cubic ease-out: fast start, velocity falls to zero at `t = 1`.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One animation leg from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: f64,
    pub to: f64,
    pub started_at: Instant,
    pub duration: Duration,
}

impl Transition {
    /// Linear time progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value at `now`. Exactly `to` once the duration has elapsed.
    pub fn sample(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * ease_out(progress)
        }
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Owner's grip on one running animation.
///
/// Cloning shares the token. `cancel()` may be called any number of times.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    token: CancellationToken,
    task: Option<AbortHandle>,
}

impl AnimationHandle {
    fn spawned(token: CancellationToken, task: AbortHandle) -> Self {
        Self {
            token,
            task: Some(task),
        }
    }

    /// A handle for an animation that settled without running.
    fn settled() -> Self {
        Self {
            token: CancellationToken::new(),
            task: None,
        }
    }

    /// Stop the animation where it is. No-op if it already stopped.
    pub fn cancel(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        // Backstop for a task parked outside the select below
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once `cancel()` has been called on any clone.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// True once the animation completed or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.is_cancelled() || self.task.as_ref().is_none_or(|task| task.is_finished())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    Animating,
}

/// Owns the displayed number and the animation that moves it.
pub struct ValueInterpolator {
    duration: Duration,
    frame_interval: Duration,
    display: Arc<watch::Sender<i64>>,
    /// Unrounded value of the last emitted frame.
    precise: Arc<Mutex<f64>>,
    active: Option<(Transition, AnimationHandle)>,
}

impl Default for ValueInterpolator {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_DURATION, DEFAULT_FRAME_RATE)
    }
}

impl ValueInterpolator {
    /// Starts idle at 0.
    pub fn new(duration: Duration, frame_rate: u32) -> Self {
        let (display, _) = watch::channel(0);
        Self {
            duration,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1))),
            display: Arc::new(display),
            precise: Arc::new(Mutex::new(0.0)),
            active: None,
        }
    }

    /// Begin or redirect the animation toward `target`.
    ///
    /// Without a tokio runtime there is nothing to drive frames, so the value
    /// settles on `target` immediately and the returned handle is already finished.
    pub fn retarget(&mut self, target: f64) -> AnimationHandle {
        let now = Instant::now();
        let from = self.value_at(now);

        if let Some((_, previous)) = self.active.take() {
            previous.cancel();
        }
        store(&self.precise, from);

        let transition = Transition {
            from,
            to: target,
            started_at: now,
            duration: self.duration,
        };

        let handle = match Handle::try_current() {
            Ok(runtime) => {
                let token = CancellationToken::new();
                let task = runtime.spawn(run_transition(
                    transition,
                    self.frame_interval,
                    token.clone(),
                    self.precise.clone(),
                    self.display.clone(),
                ));
                AnimationHandle::spawned(token, task.abort_handle())
            }
            Err(_) => {
                debug!("No runtime to drive frames, settling at {target}");
                let handle = AnimationHandle::settled();
                publish(&handle.token, &self.precise, &self.display, target);
                handle
            }
        };

        debug!("Retarget {from:.2} -> {target}");
        self.active = Some((transition, handle.clone()));
        handle
    }

    /// Abort the running animation, leaving the display where it is.
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = &self.active {
            handle.cancel();
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        match &self.active {
            Some((_, handle)) if !handle.is_finished() => AnimationPhase::Animating,
            _ => AnimationPhase::Idle,
        }
    }

    /// The most recent transition, running or not.
    pub fn transition(&self) -> Option<Transition> {
        self.active.as_ref().map(|(transition, _)| *transition)
    }

    /// Unrounded value right now.
    pub fn current_value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    fn value_at(&self, now: Instant) -> f64 {
        match &self.active {
            Some((transition, handle)) if !handle.is_finished() => transition.sample(now),
            _ => load(&self.precise),
        }
    }

    /// The rounded number currently on screen.
    pub fn displayed(&self) -> i64 {
        *self.display.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.display.subscribe()
    }
}

impl Drop for ValueInterpolator {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_transition(
    transition: Transition,
    frame_interval: Duration,
    token: CancellationToken,
    precise: Arc<Mutex<f64>>,
    display: Arc<watch::Sender<i64>>,
) {
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Animation toward {} cancelled", transition.to);
                return;
            }
            _ = frames.tick() => {}
        }
        let now = Instant::now();
        if !publish(&token, &precise, &display, transition.sample(now)) {
            return;
        }
        if transition.is_complete(now) {
            debug!("Animation settled at {}", transition.to);
            return;
        }
    }
}

/// Emit one frame unless `token` was cancelled. Returns false if it was.
///
/// The token is checked under the value lock; `retarget` cancels before it
/// stores the next starting point under that lock.
fn publish(
    token: &CancellationToken,
    precise: &Mutex<f64>,
    display: &watch::Sender<i64>,
    value: f64,
) -> bool {
    let mut guard = lock(precise);
    if token.is_cancelled() {
        return false;
    }
    *guard = value;
    let rounded = value.round() as i64;
    display.send_if_modified(|shown| {
        if *shown == rounded {
            false
        } else {
            *shown = rounded;
            true
        }
    });
    true
}

fn lock(precise: &Mutex<f64>) -> std::sync::MutexGuard<'_, f64> {
    match precise.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn store(precise: &Mutex<f64>, value: f64) {
    *lock(precise) = value;
}

fn load(precise: &Mutex<f64>) -> f64 {
    *lock(precise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(-1.0), 0.0);
        assert_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn test_ease_out_slows_down() {
        let steps: Vec<f64> = (0..=100).map(|i| ease_out(i as f64 / 100.0)).collect();
        let deltas: Vec<f64> = steps.windows(2).map(|w| w[1] - w[0]).collect();
        for pair in deltas.windows(2) {
            assert!(pair[1] <= pair[0], "rate of change must not increase");
        }
        // Velocity vanishes at the end
        assert!(deltas[deltas.len() - 1] < 1e-4);
    }

    #[test]
    fn test_transition_sample_is_exact_at_end() {
        let start = Instant::now();
        let transition = Transition {
            from: 0.0,
            to: 1310.0,
            started_at: start,
            duration: Duration::from_millis(800),
        };
        assert_eq!(transition.sample(start), 0.0);
        assert_eq!(transition.sample(start + Duration::from_millis(800)), 1310.0);
        assert_eq!(transition.sample(start + Duration::from_secs(5)), 1310.0);
        let mid = transition.sample(start + Duration::from_millis(400));
        // Ease-out covers more than half the distance by half time
        assert!(mid > 655.0 && mid < 1310.0);
    }

    #[test]
    fn test_zero_duration_transition_is_complete() {
        let start = Instant::now();
        let transition = Transition {
            from: 10.0,
            to: 20.0,
            started_at: start,
            duration: Duration::ZERO,
        };
        assert!(transition.is_complete(start));
        assert_eq!(transition.sample(start), 20.0);
    }

    #[test]
    fn test_retarget_without_runtime_settles_immediately() {
        let mut interpolator = ValueInterpolator::default();
        let handle = interpolator.retarget(1310.0);
        assert!(handle.is_finished());
        assert_eq!(interpolator.displayed(), 1310);
        assert_eq!(interpolator.phase(), AnimationPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animation_converges_exactly() {
        let mut interpolator = ValueInterpolator::default();
        interpolator.retarget(1310.0);
        assert_eq!(interpolator.phase(), AnimationPhase::Animating);

        sleep(Duration::from_millis(900)).await;

        assert_eq!(interpolator.displayed(), 1310);
        assert_eq!(interpolator.current_value(), 1310.0);
        assert_eq!(interpolator.phase(), AnimationPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_intermediate_frames_are_rounded_and_in_range() {
        let mut interpolator = ValueInterpolator::default();
        interpolator.retarget(999.0);

        sleep(Duration::from_millis(200)).await;
        let shown = interpolator.displayed();
        assert!(shown > 0 && shown < 999, "shown={shown}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retarget_continues_from_interpolated_value() {
        let mut interpolator = ValueInterpolator::default();
        interpolator.retarget(1000.0);
        sleep(Duration::from_millis(400)).await;

        let at_cancel = interpolator.current_value();
        assert!(at_cancel > 0.0 && at_cancel < 1000.0);

        interpolator.retarget(2000.0);
        let next = interpolator.transition().unwrap();
        assert_eq!(next.from, at_cancel);
        assert_eq!(next.to, 2000.0);

        // The new task's first frame shows the same number as before the retarget
        sleep(Duration::from_millis(1)).await;
        assert_eq!(interpolator.displayed(), at_cancel.round() as i64);

        sleep(Duration::from_millis(900)).await;
        assert_eq!(interpolator.displayed(), 2000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_retargets_never_jump() {
        let mut interpolator = ValueInterpolator::default();
        let mut rx = interpolator.subscribe();
        let seen = Arc::new(Mutex::new(vec![0i64]));
        let collector = {
            let seen = seen.clone();
            tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    let value = *rx.borrow_and_update();
                    seen.lock().unwrap().push(value);
                }
            })
        };

        for target in [1000.0, 1500.0, 2200.0, 2600.0] {
            interpolator.retarget(target);
            sleep(Duration::from_millis(250)).await;
        }
        sleep(Duration::from_secs(1)).await;
        assert_eq!(interpolator.displayed(), 2600);

        drop(interpolator);
        collector.await.unwrap();

        let seen = seen.lock().unwrap();
        for pair in seen.windows(2) {
            assert!(pair[1] >= pair[0], "upward retargets must stay monotone");
            assert!(pair[1] - pair[0] < 150, "jump from {} to {}", pair[0], pair[1]);
        }
        assert_eq!(*seen.last().unwrap(), 2600);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent_and_freezes_display() {
        let mut interpolator = ValueInterpolator::default();
        let handle = interpolator.retarget(500.0);
        sleep(Duration::from_millis(100)).await;

        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(handle.is_finished());
        assert_eq!(interpolator.phase(), AnimationPhase::Idle);

        let frozen = interpolator.displayed();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(interpolator.displayed(), frozen);
        assert!(frozen < 500);

        // Cancelling again after the fact changes nothing
        interpolator.cancel();
        assert_eq!(interpolator.displayed(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_noop() {
        let mut interpolator = ValueInterpolator::default();
        let handle = interpolator.retarget(50.0);
        sleep(Duration::from_secs(1)).await;
        assert!(handle.is_finished());
        handle.cancel();
        assert_eq!(interpolator.displayed(), 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retarget_after_cancel_starts_from_frozen_value() {
        let mut interpolator = ValueInterpolator::default();
        let handle = interpolator.retarget(800.0);
        sleep(Duration::from_millis(300)).await;
        handle.cancel();
        let frozen = interpolator.current_value();

        sleep(Duration::from_millis(500)).await;
        interpolator.retarget(100.0);
        assert_eq!(interpolator.transition().unwrap().from, frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_transition_never_publishes() {
        let (display, rx) = watch::channel(7i64);
        let display = Arc::new(display);
        let precise = Arc::new(Mutex::new(7.0));
        let token = CancellationToken::new();
        token.cancel();

        let transition = Transition {
            from: 7.0,
            to: 900.0,
            started_at: Instant::now(),
            duration: Duration::from_millis(800),
        };
        run_transition(
            transition,
            Duration::from_millis(16),
            token,
            precise.clone(),
            display.clone(),
        )
        .await;

        assert_eq!(*rx.borrow(), 7);
        assert_eq!(load(&precise), 7.0);
    }

    #[test]
    fn test_publish_refuses_after_cancel() {
        let (display, rx) = watch::channel(0i64);
        let precise = Mutex::new(0.0);
        let token = CancellationToken::new();

        assert!(publish(&token, &precise, &display, 41.6));
        assert_eq!(*rx.borrow(), 42);

        token.cancel();
        assert!(!publish(&token, &precise, &display, 99.0));
        assert_eq!(*rx.borrow(), 42);
        assert_eq!(load(&precise), 41.6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_cancelled_resolves_for_clones() {
        let mut interpolator = ValueInterpolator::default();
        let handle = interpolator.retarget(300.0);
        let watcher = handle.clone();
        let waiter = tokio::spawn(async move { watcher.cancelled().await });

        interpolator.cancel();
        waiter.await.unwrap();
        assert!(handle.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_the_animation_task() {
        let mut interpolator = ValueInterpolator::default();
        let rx = interpolator.subscribe();
        let handle = interpolator.retarget(1000.0);
        sleep(Duration::from_millis(100)).await;

        drop(interpolator);
        assert!(handle.is_finished());

        let frozen = *rx.borrow();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(*rx.borrow(), frozen);
        assert!(frozen < 1000);
    }
}
