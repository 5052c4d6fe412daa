//! This module provides all the logic around the encapsulated packet, such as reading, writing, and constructing headers.

pub use self::encapsulated::EncapsulatedPacket;
pub use self::header::SplitHeader;
pub use self::packet_reader::PacketReader;
pub use self::reliability::Reliability;

pub mod constants;
pub mod header;

mod encapsulated;
mod packet_reader;
mod reliability;

/// Identifier used for acknowledgment and duplicate detection of reliable packets; 24 bits on the wire.
pub type MessageIndex = u32;
/// Identifier used to discard stale sequenced packets; 24 bits on the wire.
pub type SequenceIndex = u32;
/// Identifier that defines the delivery order within an ordering channel; 24 bits on the wire.
pub type OrderIndex = u32;
/// One of the independent ordering/sequencing streams multiplexed over a connection.
pub type OrderChannel = u8;
/// Total number of fragments the original message was split into.
pub type SplitCount = i32;
/// Identifier shared by all fragments of one split message.
pub type SplitId = u16;
/// Zero-based position of a fragment within its split group.
pub type SplitIndex = i32;
/// Correlation identifier for application-level delivery receipts; carried by the transfer format only.
pub type AckIdentifier = i32;

/// Trait for enums whose variants map onto a wire code byte.
pub trait EnumConverter {
    /// The enum being converted.
    type Enum;

    /// Returns the wire code of this variant.
    fn to_u8(&self) -> u8;
}
