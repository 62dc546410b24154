use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding-window request limiter for the manual trigger endpoint.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: VecDeque::new(),
        }
    }

    /// Admits the request when fewer than `max_requests` were admitted in
    /// the trailing window, recording it. Rejected requests are not
    /// recorded.
    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    fn try_acquire_at(&mut self, now: Instant) -> bool {
        while let Some(&first) = self.hits.front() {
            if now.duration_since(first) >= self.window {
                self.hits.pop_front();
            } else {
                break;
            }
        }

        if self.hits.len() >= self.max_requests {
            return false;
        }
        self.hits.push_back(now);
        true
    }
}
