use std::convert::TryFrom;

use crate::error::ErrorKind;
use crate::packet::EnumConverter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The eight RakNet delivery guarantees an encapsulated packet can be sent with.
///
/// The code decides which index fields travel with the packet on the wire:
/// reliable packets carry a message index, sequenced packets a sequence index,
/// and sequenced or ordered packets an order index plus an order channel.
///
/// | Code | Guarantee                       | Reliable | Sequenced | Ordered |
/// | :--: | :--                             | :--:     | :--:      | :--:    |
/// | 0    | Unreliable                      | no       | no        | no      |
/// | 1    | Unreliable sequenced            | no       | yes       | no      |
/// | 2    | Reliable                        | yes      | no        | no      |
/// | 3    | Reliable ordered                | yes      | no        | yes     |
/// | 4    | Reliable sequenced              | yes      | yes       | no      |
/// | 5    | Unreliable with ack receipt     | no       | no        | no      |
/// | 6    | Reliable with ack receipt       | yes      | no        | no      |
/// | 7    | Reliable ordered with ack receipt | yes    | no        | yes     |
pub enum Reliability {
    /// Fire and forget; the packet may be dropped, duplicated, or arrive out of order.
    Unreliable,
    /// Unreliable, but packets older than the newest one seen on the channel are discarded.
    UnreliableSequenced,
    /// Resent until acknowledged; arrival order is not restored.
    Reliable,
    /// Resent until acknowledged and delivered in sender order, buffering to wait for gaps.
    ReliableOrdered,
    /// Resent until acknowledged; stale packets are discarded in favor of newer ones.
    ReliableSequenced,
    /// Unreliable, with an application-level receipt once the datagram leaves the socket.
    UnreliableWithAckReceipt,
    /// Reliable, with an application-level receipt once the remote end acknowledges.
    ReliableWithAckReceipt,
    /// Reliable ordered, with an application-level receipt once the remote end acknowledges.
    ReliableOrderedWithAckReceipt,
}

impl Reliability {
    /// Returns whether this packet is retransmitted until acknowledged.
    pub fn is_reliable(self) -> bool {
        matches!(
            self,
            Reliability::Reliable
                | Reliability::ReliableOrdered
                | Reliability::ReliableSequenced
                | Reliability::ReliableWithAckReceipt
                | Reliability::ReliableOrderedWithAckReceipt
        )
    }

    /// Returns whether stale packets on the same channel are discarded in favor of newer ones.
    pub fn is_sequenced(self) -> bool {
        matches!(
            self,
            Reliability::UnreliableSequenced | Reliability::ReliableSequenced
        )
    }

    /// Returns whether packets are delivered in sender-assigned order.
    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            Reliability::ReliableOrdered | Reliability::ReliableOrderedWithAckReceipt
        )
    }

    /// Returns whether this packet travels with an order index and an order channel.
    pub fn is_sequenced_or_ordered(self) -> bool {
        self.is_sequenced() || self.is_ordered()
    }
}

impl EnumConverter for Reliability {
    type Enum = Reliability;

    /// Returns the wire code of the reliability.
    fn to_u8(&self) -> u8 {
        match self {
            Reliability::Unreliable => 0,
            Reliability::UnreliableSequenced => 1,
            Reliability::Reliable => 2,
            Reliability::ReliableOrdered => 3,
            Reliability::ReliableSequenced => 4,
            Reliability::UnreliableWithAckReceipt => 5,
            Reliability::ReliableWithAckReceipt => 6,
            Reliability::ReliableOrderedWithAckReceipt => 7,
        }
    }
}

impl TryFrom<u8> for Reliability {
    type Error = ErrorKind;

    /// Decodes a wire code; anything above 7 is rejected as malformed.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Reliability::Unreliable),
            1 => Ok(Reliability::UnreliableSequenced),
            2 => Ok(Reliability::Reliable),
            3 => Ok(Reliability::ReliableOrdered),
            4 => Ok(Reliability::ReliableSequenced),
            5 => Ok(Reliability::UnreliableWithAckReceipt),
            6 => Ok(Reliability::ReliableWithAckReceipt),
            7 => Ok(Reliability::ReliableOrderedWithAckReceipt),
            _ => Err(ErrorKind::MalformedPacket(format!(
                "unknown reliability code: {}",
                code
            ))),
        }
    }
}
