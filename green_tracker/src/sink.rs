use crossbeam::channel::{Receiver, Sender, TrySendError, bounded, unbounded};

use crate::{ActivityEvent, SinkError};

/// Consumer of finished activities, e.g. persistence plus profile totals.
///
/// Called once per event and never retried. Implementations must hand the
/// event off and return, the tracker processes the next sensor update only
/// after `accept` returns. Slow work (network, disk, retries) belongs on the
/// consumer side of a queue such as [`ChannelSink`].
///
/// Closures are sinks too and carry the same obligation: a closure that
/// blocks stalls every sensor callback of the session.
pub trait ActivitySink {
    fn accept(&mut self, event: ActivityEvent) -> Result<(), SinkError>;
}

impl<F> ActivitySink for F
where
    F: FnMut(ActivityEvent) -> Result<(), SinkError>,
{
    fn accept(&mut self, event: ActivityEvent) -> Result<(), SinkError> {
        self(event)
    }
}

/// Enqueue-and-return sink backed by a channel.
///
/// The consumer drains the paired [`Receiver`] on its own schedule. Clones share
/// the queue, so a tracking session and a manual logger can feed one consumer.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<ActivityEvent>,
}

impl ChannelSink {
    /// Queue holding at most `capacity` pending events, further events fail with [`SinkError::Full`]
    pub fn bounded(capacity: usize) -> (Self, Receiver<ActivityEvent>) {
        let (sender, receiver) = bounded(capacity);

        (Self { sender }, receiver)
    }

    pub fn unbounded() -> (Self, Receiver<ActivityEvent>) {
        let (sender, receiver) = unbounded();

        (Self { sender }, receiver)
    }
}

impl ActivitySink for ChannelSink {
    fn accept(&mut self, event: ActivityEvent) -> Result<(), SinkError> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => SinkError::Full,
            TrySendError::Disconnected(_) => SinkError::Disconnected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use time::OffsetDateTime;

    fn event() -> ActivityEvent {
        ActivityEvent::manual("plank".to_owned(), 5, 0.0, OffsetDateTime::UNIX_EPOCH)
    }

    #[test]
    fn channel_sink_delivers() {
        let (mut sink, receiver) = ChannelSink::unbounded();

        assert_eq!(sink.accept(event()), Ok(()));
        assert_eq!(receiver.try_recv().ok(), Some(event()));
    }

    #[test]
    fn channel_sink_full() {
        let (mut sink, _receiver) = ChannelSink::bounded(1);

        assert_eq!(sink.accept(event()), Ok(()));
        assert_eq!(sink.accept(event()), Err(SinkError::Full));
    }

    #[test]
    fn channel_sink_disconnected() {
        let (mut sink, receiver) = ChannelSink::unbounded();
        drop(receiver);

        assert_eq!(sink.accept(event()), Err(SinkError::Disconnected));
    }

    #[test]
    fn closure_sink_can_forward_to_a_queue() {
        let (sender, receiver) = unbounded();

        let mut sink = move |event: ActivityEvent| -> Result<(), SinkError> {
            sender.try_send(event).map_err(|_| SinkError::Full)
        };

        assert_eq!(sink.accept(event()), Ok(()));
        assert_eq!(receiver.try_recv().ok(), Some(event()));
    }

    #[test]
    fn closure_sink() {
        let mut accepted = 0;

        {
            let mut sink = |_event: ActivityEvent| -> Result<(), SinkError> {
                accepted += 1;
                Ok(())
            };

            sink.accept(event()).unwrap();
            sink.accept(event()).unwrap();
        }

        assert_eq!(accepted, 2);
    }
}
