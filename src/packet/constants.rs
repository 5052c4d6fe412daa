//! Field widths, flag masks, and limits of the two packet encodings.

use crate::packet::{AckIdentifier, OrderChannel, SplitCount, SplitId, SplitIndex};

/// Number of bits the reliability code is shifted up inside the wire flag byte.
pub const RELIABILITY_SHIFT: u8 = 5;
/// Mask selecting the reliability bits of the wire flag byte.
pub const RELIABILITY_FLAGS: u8 = 0b111 << RELIABILITY_SHIFT;
/// Bit of the wire flag byte marking a fragment of a split message.
pub const SPLIT_FLAG: u8 = 0b0001_0000;
/// The size of the wire flag byte plus the bit-length field.
pub const WIRE_PROLOGUE_SIZE: usize = 3;
/// The size of a message/sequence/order index on the wire.
pub const INDEX_FIELD_SIZE: usize = 3;
/// The size of the split header.
pub const SPLIT_HEADER_SIZE: usize =
    size_of::<SplitCount>() + size_of::<SplitId>() + size_of::<SplitIndex>();
/// The size of the transfer-format header before the optional order channel.
pub const TRANSFER_PROLOGUE_SIZE: usize = 1 + 4 + 4;
/// The size of an order channel field, both formats.
pub const ORDER_CHANNEL_SIZE: usize = size_of::<OrderChannel>();
/// Sentinel written in the transfer format when no ack receipt was requested.
pub const ACK_RECEIPT_ABSENT: AckIdentifier = -1;
/// Largest payload the 16-bit bit-length field can describe.
///
/// Fragmentation caps payloads to an MTU long before this limit; a larger
/// payload here is an upstream programming error.
pub const MAX_WIRE_PAYLOAD_BYTES: usize = u16::MAX as usize / 8;
/// Maximum transmission unit of the payload.
///
/// Derived from ethernet_mtu - ipv6_header_size - udp_header_size
///       1452 = 1500         - 40               - 8
///
/// This is not strictly guaranteed -- there may be less room in an ethernet frame than this due to
/// variability in ipv6 header size.
pub const DEFAULT_MTU: u16 = 1452;
