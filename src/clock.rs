use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{abortable, AbortHandle, FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;

/// Source of delays for the paced UI flows (CTA scroll/focus, simulated send, debounce).
pub trait Clock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        (**self).sleep(duration)
    }
}

/// `setTimeout`-backed clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(millis(duration)).boxed_local()
    }
}

pub fn millis(duration: Duration) -> u32 {
    duration.as_millis().min(u128::from(u32::MAX)) as u32
}

/// Trailing-edge debounce: each call aborts the pending one and restarts the wait.
pub struct Debouncer<C: Clock> {
    clock: C,
    wait: Duration,
    pending: RefCell<Option<AbortHandle>>,
}

impl<C: Clock> Debouncer<C> {
    pub fn new(clock: C, wait: Duration) -> Self {
        Self {
            clock,
            wait,
            pending: RefCell::new(None),
        }
    }

    /// Returns the task that runs `f` after the wait, unless a later call supersedes it.
    /// The caller spawns it.
    pub fn schedule<F>(&self, f: F) -> LocalBoxFuture<'static, ()>
    where
        F: FnOnce() + 'static,
    {
        let (task, handle) = abortable(self.clock.sleep(self.wait).map(move |_| f()));
        if let Some(previous) = self.pending.borrow_mut().replace(handle) {
            previous.abort();
        }
        task.map(|_| ()).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{self, join_all};

    #[derive(Default)]
    struct Instant {
        sleeps: RefCell<Vec<Duration>>,
    }

    impl Clock for Instant {
        fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
            self.sleeps.borrow_mut().push(duration);
            future::ready(()).boxed_local()
        }
    }

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }

    #[test]
    fn burst_runs_only_the_last_call() {
        let debouncer = Debouncer::new(Instant::default(), Duration::from_millis(10));
        let ran = Rc::new(RefCell::new(Vec::new()));

        let tasks: Vec<_> = (0..5)
            .map(|i| {
                let ran = ran.clone();
                debouncer.schedule(move || ran.borrow_mut().push(i))
            })
            .collect();
        block_on(join_all(tasks));

        assert_eq!(*ran.borrow(), vec![4]);
        assert_eq!(debouncer.clock.sleeps.borrow().len(), 5);
        assert!(debouncer
            .clock
            .sleeps
            .borrow()
            .iter()
            .all(|d| *d == Duration::from_millis(10)));
    }

    #[test]
    fn a_settled_call_does_not_block_the_next_burst() {
        let debouncer = Debouncer::new(Instant::default(), Duration::from_millis(10));
        let ran = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let ran = ran.clone();
            debouncer.schedule(move || ran.borrow_mut().push("first"))
        };
        block_on(first);

        let second = {
            let ran = ran.clone();
            debouncer.schedule(move || ran.borrow_mut().push("second"))
        };
        block_on(second);

        assert_eq!(*ran.borrow(), vec!["first", "second"]);
    }
}
