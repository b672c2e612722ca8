use std::{
    collections::HashMap,
    sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError},
    thread,
};

use log::{debug, warn};

use crate::errors::errors::RenderError;

use super::{markup, RenderOptions, Rendered, Renderer, RetryPolicy};

type Outcome = Result<Rendered, RenderError>;

/// One in-flight render: the leader publishes, everyone else waits.
#[derive(Default)]
struct Pending {
    outcome: Mutex<Option<Outcome>>,
    ready: Condvar,
    waiters: Mutex<usize>,
}

impl Pending {
    fn publish(&self, outcome: Outcome) {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(outcome);
        self.ready.notify_all();
    }

    fn wait(&self) -> Outcome {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(outcome) = slot.as_ref() {
                return outcome.clone();
            }
            slot = self.ready.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn waiters(&self) -> usize {
        *self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Deduplicating front for a `Renderer`.
///
/// Requests are keyed by exact source text. While a render of some source
/// is running, further requests for the same source wait for it instead of
/// calling the engine again, and all of them get the same outcome. The
/// entry is dropped once the outcome is published, so a later request
/// renders afresh.
pub struct Dispatcher<R: Renderer> {
    renderer: R,
    policy: RetryPolicy,
    in_flight: Mutex<HashMap<String, Arc<Pending>>>,
}

impl<R: Renderer> Dispatcher<R> {
    pub fn new(renderer: R) -> Self {
        Dispatcher::with_policy(renderer, RetryPolicy::default())
    }

    pub fn with_policy(renderer: R, policy: RetryPolicy) -> Self {
        Dispatcher {
            renderer,
            policy,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<String, Arc<Pending>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of distinct sources currently rendering.
    pub fn in_flight(&self) -> usize {
        self.lock_in_flight().len()
    }

    /// Number of callers waiting on the render of `source` besides its leader.
    pub fn waiters(&self, source: &str) -> usize {
        self.lock_in_flight().get(source).map_or(0, |pending| pending.waiters())
    }

    /// Renders `source` and shapes the result for `options.tag`.
    pub fn render(&self, source: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let rendered = self.render_raw(source, options)?;
        Ok(markup::shape(&rendered, options))
    }

    /// Renders `source`, sharing any render of the same source already running.
    ///
    /// Only the leader's options reach the engine; followers reuse its result.
    pub fn render_raw(&self, source: &str, options: &RenderOptions) -> Outcome {
        let (pending, leader) = {
            let mut in_flight = self.lock_in_flight();
            match in_flight.get(source) {
                Some(pending) => {
                    *pending.waiters.lock().unwrap_or_else(PoisonError::into_inner) += 1;
                    (Arc::clone(pending), false)
                }
                None => {
                    let pending = Arc::new(Pending::default());
                    in_flight.insert(source.to_string(), Arc::clone(&pending));
                    (pending, true)
                }
            }
        };

        if !leader {
            debug!("joining in-flight render ({} bytes of source)", source.len());
            return pending.wait();
        }

        let lead = Lead {
            dispatcher: self,
            source,
            pending,
            settled: false,
        };
        let outcome = self.render_with_retries(source, options);
        lead.settle(outcome.clone());
        outcome
    }

    fn render_with_retries(&self, source: &str, options: &RenderOptions) -> Outcome {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.renderer.render(source, options) {
                Ok(rendered) => return Ok(rendered),
                Err(error) if attempts < self.policy.attempts() => {
                    debug!("render attempt {} failed: {}", attempts, error);
                    thread::sleep(self.policy.delay);
                }
                Err(error) => {
                    warn!("failed to render after {} attempts: {}", attempts, error);
                    return Err(RenderError::Exhausted {
                        attempts,
                        last: error.to_string(),
                    });
                }
            }
        }
    }
}

/// The leader's obligation to publish. Dropping it unsettled (the engine
/// panicked) releases waiters with `RenderError::Abandoned`.
struct Lead<'a, R: Renderer> {
    dispatcher: &'a Dispatcher<R>,
    source: &'a str,
    pending: Arc<Pending>,
    settled: bool,
}

impl<R: Renderer> Lead<'_, R> {
    fn settle(mut self, outcome: Outcome) {
        self.publish(outcome);
    }

    fn publish(&mut self, outcome: Outcome) {
        self.dispatcher.lock_in_flight().remove(self.source);
        self.pending.publish(outcome);
        self.settled = true;
    }
}

impl<R: Renderer> Drop for Lead<'_, R> {
    fn drop(&mut self) {
        if !self.settled {
            self.publish(Err(RenderError::Abandoned));
        }
    }
}
