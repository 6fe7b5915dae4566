use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use futures::Stream;

use crate::control::{CameraEvent, CameraEvents, Subscription};

/// Camera events of one subscription as an async stream.
///
/// The stream is infinite while the channel is open. It ends when the channel is closed, or
/// after [`CameraEventStream::cancel`] once the already received events are consumed.
pub struct CameraEventStream {
    receiver: UnboundedReceiver<CameraEvent>,
    subscription: Subscription,
}

impl CameraEventStream {
    pub(super) fn new(events: &CameraEvents) -> Self {
        let (sender, receiver) = unbounded();
        let subscription = events.subscribe(move |event: &CameraEvent| {
            // The receiver is only gone when the stream is dropped, which also drops the
            // subscription.
            let _ = sender.unbounded_send(*event);
        });

        Self {
            receiver,
            subscription,
        }
    }

    /// Stops receiving new events.
    pub fn cancel(&mut self) {
        self.subscription.cancel();
        self.receiver.close();
    }
}

impl Stream for CameraEventStream {
    type Item = CameraEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().receiver).poll_next(cx)
    }
}

impl CameraEvents {
    /// Subscribes to the channel and returns the events as a stream. Every call creates a new
    /// independent subscription.
    pub fn stream(&self) -> CameraEventStream {
        CameraEventStream::new(self)
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;
    use crate::control::MoveReason;
    use crate::view::MapView;

    #[test]
    fn stream_ends_when_channel_is_closed() {
        let events = CameraEvents::new();
        let stream = events.stream();

        events.emit(CameraEvent::MoveStarted(MoveReason::Gesture));
        events.emit(CameraEvent::Move(MapView::default()));
        events.close();

        let received: Vec<_> = tokio_test::block_on(stream.collect());
        assert_eq!(
            received,
            vec![
                CameraEvent::MoveStarted(MoveReason::Gesture),
                CameraEvent::Move(MapView::default()),
            ]
        );
    }

    #[test]
    fn streams_are_independent() {
        let events = CameraEvents::new();
        let mut first = events.stream();
        let second = events.stream();

        events.emit(CameraEvent::MoveCanceled);
        first.cancel();
        events.emit(CameraEvent::Idle(MapView::default()));
        events.close();

        tokio_test::block_on(async {
            assert_eq!(first.next().await, Some(CameraEvent::MoveCanceled));
            assert_eq!(first.next().await, None);

            let received: Vec<_> = second.collect().await;
            assert_eq!(received.len(), 2);
        });
    }

    #[test]
    fn stream_of_closed_channel_is_empty() {
        let events = CameraEvents::new();
        events.close();

        let received: Vec<_> = tokio_test::block_on(events.stream().collect());
        assert!(received.is_empty());
    }
}
