use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};

pub trait NamedChannelSender {
    type Msg;

    /// Sends the given message if the channel still has space and the receiver is still
    /// connected, otherwise does nothing.
    fn send_if_space(&self, msg: Self::Msg);

    /// Sends the given message if the channel still has space, otherwise logs a warning (once).
    ///
    /// If the receiver is disconnected, does nothing.
    fn send_complaining(&self, msg: Self::Msg);
}

/// A bounded channel sender which carries a name for diagnostics.
///
/// Sending never blocks. Whoever consumes the receiver (e.g. a thread writing to a MIDI port) is
/// decoupled from the sender, so a slow consumer can't stall the game loop. If the consumer falls
/// too far behind, messages are dropped.
pub struct BoundedNamedSender<T> {
    channel_name: &'static str,
    sender: Sender<T>,
    complained_already: AtomicBool,
}

impl<T> Debug for BoundedNamedSender<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedNamedSender")
            .field("channel_name", &self.channel_name)
            .field("sender", &self.sender)
            .finish()
    }
}

impl<T> NamedChannelSender for BoundedNamedSender<T> {
    type Msg = T;

    fn send_if_space(&self, msg: T) {
        let _ = self.send_internal(msg);
    }

    fn send_complaining(&self, msg: T) {
        let result = self.send_internal(msg);
        if let Err(e) = result {
            if !receiver_is_disconnected(&e)
                && !self.complained_already.swap(true, Ordering::Relaxed)
            {
                tracing::warn!(msg = "Dropping message", %e);
            }
        }
    }
}

impl<T> BoundedNamedSender<T> {
    pub fn new_channel(name: &'static str, capacity: usize) -> (Self, Receiver<T>) {
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        (Self::from_sender(name, sender), receiver)
    }

    /// Wraps an existing sender, e.g. one created by the consumer.
    pub fn from_sender(name: &'static str, sender: Sender<T>) -> Self {
        Self {
            channel_name: name,
            sender,
            complained_already: AtomicBool::new(false),
        }
    }

    pub fn channel_name(&self) -> &'static str {
        self.channel_name
    }

    fn send_internal(&self, msg: T) -> Result<(), NamedChannelTrySendError<T>> {
        try_send_on_named_channel(&self.sender, self.channel_name, msg)
    }
}

impl<T> Clone for BoundedNamedSender<T> {
    fn clone(&self) -> Self {
        Self {
            channel_name: self.channel_name,
            sender: self.sender.clone(),
            complained_already: AtomicBool::new(false),
        }
    }
}

fn receiver_is_disconnected<T>(e: &NamedChannelTrySendError<T>) -> bool {
    matches!(e.try_send_error, TrySendError::Disconnected(_))
}

fn try_send_on_named_channel<T>(
    sender: &Sender<T>,
    channel_name: &'static str,
    msg: T,
) -> Result<(), NamedChannelTrySendError<T>> {
    sender.try_send(msg).map_err(|e| NamedChannelTrySendError {
        channel_name,
        try_send_error: e,
    })
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct NamedChannelTrySendError<T> {
    channel_name: &'static str,
    try_send_error: TrySendError<T>,
}

impl<T> Debug for NamedChannelTrySendError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Channel [{}]: {:?}",
            self.channel_name, self.try_send_error
        )
    }
}

impl<T> Display for NamedChannelTrySendError<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Channel [{}]: {}",
            self.channel_name, self.try_send_error
        )
    }
}

impl<T: Send> Error for NamedChannelTrySendError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_messages_when_full() {
        // Given
        let (sender, receiver) = BoundedNamedSender::new_channel("test", 2);
        // When
        sender.send_if_space(1);
        sender.send_if_space(2);
        sender.send_complaining(3);
        // Then
        let received: Vec<_> = receiver.try_iter().collect();
        assert_eq!(received, vec![1, 2]);
    }

    #[test]
    fn ignores_disconnected_receiver() {
        // Given
        let (sender, receiver) = BoundedNamedSender::new_channel("test", 2);
        drop(receiver);
        // When
        sender.send_complaining(1);
        // Then
        assert_eq!(sender.channel_name(), "test");
    }
}
