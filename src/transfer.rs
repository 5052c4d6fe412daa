//! Hand-off of decoded packets between two processing stages of the same endpoint.
//!
//! The network stage decodes wire bytes into [`EncapsulatedPacket`]s and pushes them to the
//! consumer stage through a channel, re-encoded in the transfer format so the consumer never
//! touches reliability-dependent field widths again. The channel is the only synchronization
//! involved; both ends own their packets outright.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::error;

use crate::error::{ErrorKind, Result};
use crate::packet::{EncapsulatedPacket, PacketReader};

/// Creates a connected sender/receiver pair for moving packets between two stages.
pub fn channel() -> (TransferSender, TransferReceiver) {
    let (sender, receiver) = unbounded();
    (TransferSender { sender }, TransferReceiver { receiver })
}

#[derive(Clone, Debug)]
/// Producing end of a stage hand-off; encodes packets into transfer frames.
pub struct TransferSender {
    sender: Sender<Box<[u8]>>,
}

impl TransferSender {
    /// Encodes the packet in the transfer format and queues it for the consuming stage.
    pub fn send(&self, packet: &EncapsulatedPacket) -> Result<()> {
        let mut frame = Vec::with_capacity(packet.internal_size());
        packet.to_internal(&mut frame)?;

        self.sender
            .send(frame.into_boxed_slice())
            .map_err(|_| ErrorKind::TransferDisconnected)
    }
}

#[derive(Debug)]
/// Consuming end of a stage hand-off; decodes transfer frames back into packets.
pub struct TransferReceiver {
    receiver: Receiver<Box<[u8]>>,
}

impl TransferReceiver {
    /// Blocks until the next packet arrives from the producing stage.
    pub fn recv(&self) -> Result<EncapsulatedPacket> {
        let frame = self
            .receiver
            .recv()
            .map_err(|_| ErrorKind::TransferDisconnected)?;
        Self::decode(&frame)
    }

    /// Returns the next packet if one is already queued, `None` otherwise.
    pub fn try_recv(&self) -> Result<Option<EncapsulatedPacket>> {
        match self.receiver.try_recv() {
            Ok(frame) => Self::decode(&frame).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ErrorKind::TransferDisconnected),
        }
    }

    fn decode(frame: &[u8]) -> Result<EncapsulatedPacket> {
        let mut reader = PacketReader::new(frame);
        EncapsulatedPacket::from_internal(&mut reader).map_err(|err| {
            // frames never leave the process, so a corrupt one is a bug in the producing stage
            error!("Error occured decoding transfer frame: {}", err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::packet::EncapsulatedPacket;

    #[test]
    fn delivers_packets_across_a_thread_boundary() {
        let (sender, receiver) = super::channel();

        let handle = thread::spawn(move || {
            let packet =
                EncapsulatedPacket::reliable_ordered(b"state update".to_vec(), 1, 2, 3)
                    .with_ack_receipt(42);
            sender.send(&packet).unwrap();
        });

        let received = receiver.recv().unwrap();
        handle.join().unwrap();

        assert_eq!(received.payload(), b"state update");
        assert_eq!(received.order_channel(), Some(3));
        assert_eq!(received.ack_identifier(), Some(42));
    }

    #[test]
    fn try_recv_on_an_empty_channel_is_not_an_error() {
        let (_sender, receiver) = super::channel();

        assert!(matches!(receiver.try_recv(), Ok(None)));
    }

    #[test]
    fn hung_up_stage_is_reported() {
        let (sender, receiver) = super::channel();

        drop(receiver);
        assert!(sender.send(&EncapsulatedPacket::unreliable(Vec::new())).is_err());

        let (sender, receiver) = super::channel();
        drop(sender);
        assert!(receiver.recv().is_err());
    }
}
