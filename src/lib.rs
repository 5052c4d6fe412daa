//! rakframe is the packet fragment codec of a RakNet-style reliable-UDP stack.
//!
//! It converts in-memory encapsulated packets to and from two binary representations: the
//! over-the-wire datagram payload layout shared with remote endpoints, and a simpler
//! full-width transfer layout used to hand a decoded packet from the network I/O stage to the
//! consumer stage of the same process.
//!
//! The wire layout is frozen by the RakNet protocol: a flag byte carrying the delivery
//! guarantee and the split marker, a payload length counted in *bits*, 24-bit little-endian
//! index fields gated on the guarantee, big-endian fragmentation metadata. The transfer layout
//! is private to one process and uses full-width integers instead, because its only cost is
//! CPU, not bytes on the wire.
//!
//! The codec is pure data transformation: no sockets, no retransmission, no reassembly, no
//! shared state. Those belong to the surrounding stack, which talks to the codec through the
//! [`MessageReassembler`] and [`DatagramAssembler`] traits and moves packets between its
//! stages with [`transfer`].

#![warn(missing_docs)]

mod error;
mod infrastructure;
mod packet;

pub mod transfer;

pub use self::error::{ErrorKind, Result};
pub use self::infrastructure::{DatagramAssembler, MessageReassembler};
pub use self::packet::header::{HeaderReader, HeaderWriter, SplitHeader};
pub use self::packet::{
    constants, AckIdentifier, EncapsulatedPacket, EnumConverter, MessageIndex, OrderChannel,
    OrderIndex, PacketReader, Reliability, SequenceIndex, SplitCount, SplitId, SplitIndex,
};
