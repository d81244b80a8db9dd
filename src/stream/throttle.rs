//! Latest-value throttling for display streams

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Extension trait to add throttling to any Stream
pub trait ThrottleExt: Stream {
    /// Emit at most one item per `period`, always the most recent one.
    ///
    /// Intermediate items are dropped. When the source ends, the last held
    /// item is flushed immediately rather than waiting for the next slot.
    fn throttle(self, period: Duration) -> Throttle<Self>
    where
        Self: Sized,
    {
        Throttle::new(self, period)
    }
}

impl<T: Stream> ThrottleExt for T {}

pin_project! {
    /// A stream combinator that rate-limits emission to the latest item
    pub struct Throttle<S: Stream> {
        #[pin]
        stream: S,
        interval: Interval,
        latest: Option<S::Item>,
        exhausted: bool,
    }
}

impl<S: Stream> Throttle<S> {
    /// Create a new throttled stream. Must be called within a tokio runtime.
    pub fn new(stream: S, period: Duration) -> Self {
        let mut interval = interval(period.max(Duration::from_millis(1)));
        // After an idle gap emit right away, then resume regular spacing
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { stream, interval, latest: None, exhausted: false }
    }
}

impl<S: Stream> Stream for Throttle<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Keep only the newest available item
        while !*this.exhausted {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => *this.latest = Some(item),
                Poll::Ready(None) => *this.exhausted = true,
                Poll::Pending => break,
            }
        }

        if this.latest.is_none() {
            return if *this.exhausted { Poll::Ready(None) } else { Poll::Pending };
        }

        if !*this.exhausted {
            ready!(this.interval.poll_tick(cx));
        }

        Poll::Ready(this.latest.take())
    }
}
