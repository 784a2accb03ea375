#![forbid(unsafe_code)]

//! Background event sources for the navigator.
//!
//! Subscriptions run on their own threads and only send messages over an
//! `mpsc` channel; the navigator thread applies those messages in order.
//! The geometry refresh ticker is an [`Every`] subscription.
//!
//! # How it works
//!
//! 1. The navigator declares the subscriptions it wants on `start`
//! 2. [`SubscriptionManager::reconcile`] starts new ids and stops missing ones
//! 3. Messages are drained by the navigator and handled one at a time

use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex, PoisonError, mpsc};
use std::thread;
use std::time::{Duration, Instant};

/// A unique identifier for a subscription.
pub type SubId = u64;

/// A subscription produces messages from an external event source.
///
/// `run` is called on a background thread and should loop until the stop
/// signal fires or the channel disconnects.
pub trait Subscription<M: Send + 'static>: Send {
    /// Unique identifier for deduplication.
    fn id(&self) -> SubId;

    /// Send messages through `sender` until stopped.
    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal);
}

/// Signal for stopping a background loop.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been triggered.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if timed out. Spurious wakeups are
    /// absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Trigger to stop a background loop from the navigator side.
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

/// A running subscription handle.
struct RunningSubscription {
    id: SubId,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl RunningSubscription {
    /// Stop the subscription and join its thread.
    fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RunningSubscription {
    fn drop(&mut self) {
        // Don't join in drop to avoid blocking.
        self.trigger.stop();
    }
}

/// Owns the message channel and the running subscriptions.
pub struct SubscriptionManager<M: Send + 'static> {
    active: Vec<RunningSubscription>,
    sender: mpsc::Sender<M>,
    receiver: mpsc::Receiver<M>,
}

impl<M: Send + 'static> SubscriptionManager<M> {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            active: Vec::new(),
            sender,
            receiver,
        }
    }

    /// A sender feeding the same channel, for sources not managed here.
    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<M> {
        self.sender.clone()
    }

    /// Start subscriptions with new ids and stop those no longer declared.
    pub fn reconcile(&mut self, subscriptions: Vec<Box<dyn Subscription<M>>>) {
        let new_ids: HashSet<SubId> = subscriptions.iter().map(|s| s.id()).collect();
        let active_before = self.active.len();

        let mut remaining = Vec::new();
        for running in self.active.drain(..) {
            if new_ids.contains(&running.id) {
                remaining.push(running);
            } else {
                tracing::debug!(sub_id = running.id, "stopping subscription");
                running.stop();
            }
        }
        self.active = remaining;

        let mut active_ids: HashSet<SubId> = self.active.iter().map(|r| r.id).collect();
        for sub in subscriptions {
            let id = sub.id();
            if !active_ids.insert(id) {
                continue;
            }

            tracing::debug!(sub_id = id, "starting subscription");
            let (signal, trigger) = StopSignal::new();
            let sender = self.sender.clone();
            let thread = thread::spawn(move || {
                sub.run(sender, signal);
            });
            self.active.push(RunningSubscription {
                id,
                trigger,
                thread: Some(thread),
            });
        }

        tracing::trace!(
            active_before,
            active_after = self.active.len(),
            "subscription reconcile complete"
        );
    }

    /// Drain pending messages without blocking.
    pub fn drain_messages(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for one message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<M> {
        self.receiver.recv_timeout(timeout).ok()
    }

    #[inline]
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Stop all running subscriptions.
    pub fn stop_all(&mut self) {
        for running in self.active.drain(..) {
            running.stop();
        }
    }
}

impl<M: Send + 'static> Default for SubscriptionManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Send + 'static> Drop for SubscriptionManager<M> {
    fn drop(&mut self) {
        self.stop_all();
    }
}

// --- Built-in subscriptions ---

/// A subscription that fires at a fixed interval.
///
/// # Example
///
/// ```ignore
/// manager.reconcile(vec![Box::new(Every::new(Duration::from_secs(1), || Event::Tick))]);
/// ```
pub struct Every<M: Send + 'static> {
    id: SubId,
    interval: Duration,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
}

impl<M: Send + 'static> Every<M> {
    /// Create a ticker; the id is derived from the interval.
    pub fn new(interval: Duration, make_msg: impl Fn() -> M + Send + Sync + 'static) -> Self {
        let id = interval.as_nanos() as u64 ^ 0x5449_434B;
        Self::with_id(id, interval, make_msg)
    }

    /// Create a ticker with an explicit id.
    pub fn with_id(
        id: SubId,
        interval: Duration,
        make_msg: impl Fn() -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            interval,
            make_msg: Box::new(make_msg),
        }
    }
}

impl<M: Send + 'static> Subscription<M> for Every<M> {
    fn id(&self) -> SubId {
        self.id
    }

    fn run(&self, sender: mpsc::Sender<M>, stop: StopSignal) {
        let mut ticks: u64 = 0;
        while !stop.wait_timeout(self.interval) {
            ticks += 1;
            if sender.send((self.make_msg)()).is_err() {
                break;
            }
        }
        tracing::trace!(sub_id = self.id, ticks, "ticker exited");
    }
}
