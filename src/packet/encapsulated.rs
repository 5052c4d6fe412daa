use std::convert::TryFrom;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::error::{ErrorKind, Result};
use crate::packet::constants::{
    ACK_RECEIPT_ABSENT, INDEX_FIELD_SIZE, MAX_WIRE_PAYLOAD_BYTES, ORDER_CHANNEL_SIZE,
    RELIABILITY_FLAGS, RELIABILITY_SHIFT, SPLIT_FLAG, SPLIT_HEADER_SIZE, TRANSFER_PROLOGUE_SIZE,
    WIRE_PROLOGUE_SIZE,
};
use crate::packet::header::{HeaderReader, HeaderWriter, SplitHeader};
use crate::packet::{
    AckIdentifier, EnumConverter, MessageIndex, OrderChannel, OrderIndex, PacketReader,
    Reliability, SequenceIndex,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One network-layer fragment or whole message, together with the index fields its
/// [`Reliability`] travels with.
///
/// A packet is constructed through one of the per-guarantee constructors, which accept exactly
/// the index fields that guarantee uses, or by decoding. Fields cannot be changed afterwards;
/// a packet is a write-once value handed from the stage that built it to the stage that
/// consumes it.
///
/// Two encodings are supported:
/// - the **wire** format ([`to_wire`](Self::to_wire) / [`from_wire`](Self::from_wire)), the
///   byte layout exchanged with remote endpoints, which must stay byte-for-byte compatible
///   with the RakNet protocol;
/// - the **transfer** format ([`to_internal`](Self::to_internal) /
///   [`from_internal`](Self::from_internal)), a simpler full-width layout used to move a
///   decoded packet between two stages of the same process. It carries no index or split
///   fields, only what the consumer stage still needs.
pub struct EncapsulatedPacket {
    reliability: Reliability,
    message_index: Option<MessageIndex>,
    sequence_index: Option<SequenceIndex>,
    order_index: Option<OrderIndex>,
    order_channel: Option<OrderChannel>,
    split: Option<SplitHeader>,
    payload: Box<[u8]>,
    ack_identifier: Option<AckIdentifier>,
}

impl EncapsulatedPacket {
    fn from_parts(
        reliability: Reliability,
        message_index: Option<MessageIndex>,
        sequence_index: Option<SequenceIndex>,
        order_index: Option<OrderIndex>,
        order_channel: Option<OrderChannel>,
        payload: Vec<u8>,
    ) -> EncapsulatedPacket {
        EncapsulatedPacket {
            reliability,
            message_index,
            sequence_index,
            order_index,
            order_channel,
            split: None,
            payload: payload.into_boxed_slice(),
            ack_identifier: None,
        }
    }

    /// Creates a new unreliable packet carrying the given payload.
    ///
    /// Bare UDP semantics: the packet may be dropped, duplicated, or arrive out of order, and
    /// no index fields travel with it.
    pub fn unreliable(payload: Vec<u8>) -> EncapsulatedPacket {
        Self::from_parts(Reliability::Unreliable, None, None, None, None, payload)
    }

    /// Creates a new unreliable sequenced packet.
    ///
    /// Carries a sequence index so that the receiver can toss packets older than the newest one
    /// seen on `order_channel`, plus the order index of that channel.
    pub fn unreliable_sequenced(
        payload: Vec<u8>,
        sequence_index: SequenceIndex,
        order_index: OrderIndex,
        order_channel: OrderChannel,
    ) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::UnreliableSequenced,
            None,
            Some(sequence_index),
            Some(order_index),
            Some(order_channel),
            payload,
        )
    }

    /// Creates a new reliable packet.
    ///
    /// Carries a message index for acknowledgment and duplicate detection; arrival order is not
    /// restored.
    pub fn reliable(payload: Vec<u8>, message_index: MessageIndex) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::Reliable,
            Some(message_index),
            None,
            None,
            None,
            payload,
        )
    }

    /// Creates a new reliable ordered packet.
    ///
    /// Carries a message index plus the order index and channel used to deliver packets in
    /// sender-assigned order.
    pub fn reliable_ordered(
        payload: Vec<u8>,
        message_index: MessageIndex,
        order_index: OrderIndex,
        order_channel: OrderChannel,
    ) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::ReliableOrdered,
            Some(message_index),
            None,
            Some(order_index),
            Some(order_channel),
            payload,
        )
    }

    /// Creates a new reliable sequenced packet.
    ///
    /// Carries every index field: a message index for acknowledgment, and the sequence/order
    /// indices used to keep only the newest packet on the channel.
    pub fn reliable_sequenced(
        payload: Vec<u8>,
        message_index: MessageIndex,
        sequence_index: SequenceIndex,
        order_index: OrderIndex,
        order_channel: OrderChannel,
    ) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::ReliableSequenced,
            Some(message_index),
            Some(sequence_index),
            Some(order_index),
            Some(order_channel),
            payload,
        )
    }

    /// Creates a new unreliable packet whose delivery is reported back to the application.
    pub fn unreliable_with_ack_receipt(payload: Vec<u8>) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::UnreliableWithAckReceipt,
            None,
            None,
            None,
            None,
            payload,
        )
    }

    /// Creates a new reliable packet whose delivery is reported back to the application.
    pub fn reliable_with_ack_receipt(
        payload: Vec<u8>,
        message_index: MessageIndex,
    ) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::ReliableWithAckReceipt,
            Some(message_index),
            None,
            None,
            None,
            payload,
        )
    }

    /// Creates a new reliable ordered packet whose delivery is reported back to the application.
    pub fn reliable_ordered_with_ack_receipt(
        payload: Vec<u8>,
        message_index: MessageIndex,
        order_index: OrderIndex,
        order_channel: OrderChannel,
    ) -> EncapsulatedPacket {
        Self::from_parts(
            Reliability::ReliableOrderedWithAckReceipt,
            Some(message_index),
            None,
            Some(order_index),
            Some(order_channel),
            payload,
        )
    }

    /// Marks this packet as one fragment of a split message.
    pub fn with_split(mut self, split: SplitHeader) -> EncapsulatedPacket {
        self.split = Some(split);
        self
    }

    /// Attaches the correlation identifier under which the application wants a delivery receipt.
    ///
    /// The identifier only travels in the transfer format; the wire format never carries it.
    pub fn with_ack_receipt(mut self, identifier: AckIdentifier) -> EncapsulatedPacket {
        self.ack_identifier = Some(identifier);
        self
    }

    /// Returns the delivery guarantee this packet is sent with.
    pub fn reliability(&self) -> Reliability {
        self.reliability
    }

    /// Returns the message index, present on reliable packets.
    pub fn message_index(&self) -> Option<MessageIndex> {
        self.message_index
    }

    /// Returns the sequence index, present on sequenced packets.
    pub fn sequence_index(&self) -> Option<SequenceIndex> {
        self.sequence_index
    }

    /// Returns the order index, present on sequenced or ordered packets.
    pub fn order_index(&self) -> Option<OrderIndex> {
        self.order_index
    }

    /// Returns the order channel, present on sequenced or ordered packets.
    pub fn order_channel(&self) -> Option<OrderChannel> {
        self.order_channel
    }

    /// Returns the fragmentation metadata if this packet is part of a split message.
    pub fn split(&self) -> Option<&SplitHeader> {
        self.split.as_ref()
    }

    /// Returns true if this packet is one fragment of a split message.
    pub fn has_split(&self) -> bool {
        self.split.is_some()
    }

    /// Returns the payload of this packet.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the payload of this packet.
    pub fn into_payload(self) -> Box<[u8]> {
        self.payload
    }

    /// Returns the correlation identifier of the requested delivery receipt.
    pub fn ack_identifier(&self) -> Option<AckIdentifier> {
        self.ack_identifier
    }

    /// Returns true if the application asked to be told when this packet was delivered.
    pub fn needs_ack_receipt(&self) -> bool {
        self.ack_identifier.is_some()
    }

    /// Returns the exact number of bytes [`to_wire`](Self::to_wire) will produce.
    ///
    /// Computed arithmetically, never by encoding: datagram assembly calls this at high
    /// frequency to decide whether one more packet still fits under the MTU.
    pub fn wire_size(&self) -> usize {
        let mut size = WIRE_PROLOGUE_SIZE;
        if self.reliability.is_reliable() {
            size += INDEX_FIELD_SIZE;
        }
        if self.reliability.is_sequenced() {
            size += INDEX_FIELD_SIZE;
        }
        if self.reliability.is_sequenced_or_ordered() {
            size += INDEX_FIELD_SIZE + ORDER_CHANNEL_SIZE;
        }
        if self.split.is_some() {
            size += SPLIT_HEADER_SIZE;
        }
        size + self.payload.len()
    }

    /// Writes this packet in the wire format to the given buffer.
    ///
    /// Layout: one flag byte (reliability code in bits 5-7, split flag in bit 4), the payload
    /// length in *bits* as u16 big-endian, the index fields the reliability calls for as 3-byte
    /// little-endian integers, the split header if present, then the payload.
    pub fn to_wire(&self, buffer: &mut Vec<u8>) -> Result<()> {
        debug_assert!(
            self.indices_match_reliability(),
            "index fields out of sync with the reliability; this packet did not come from a constructor"
        );
        debug_assert!(
            self.payload.len() <= MAX_WIRE_PAYLOAD_BYTES,
            "payload does not fit the 16-bit bit-length field; fragment before encoding"
        );

        let mut flags = self.reliability.to_u8() << RELIABILITY_SHIFT;
        if self.split.is_some() {
            flags |= SPLIT_FLAG;
        }
        buffer.write_u8(flags)?;
        buffer.write_u16::<BigEndian>((self.payload.len() << 3) as u16)?;

        // Index fields are the low 3 bytes of a 4-byte little-endian encoding; the high byte is
        // discarded on the wire.
        if let Some(message_index) = self.message_index {
            buffer.write_u24::<LittleEndian>(message_index & 0x00ff_ffff)?;
        }
        if let Some(sequence_index) = self.sequence_index {
            buffer.write_u24::<LittleEndian>(sequence_index & 0x00ff_ffff)?;
        }
        if let Some(order_index) = self.order_index {
            buffer.write_u24::<LittleEndian>(order_index & 0x00ff_ffff)?;
        }
        if let Some(order_channel) = self.order_channel {
            buffer.write_u8(order_channel)?;
        }
        if let Some(split) = &self.split {
            split.write(buffer)?;
        }
        buffer.extend_from_slice(&self.payload);

        Ok(())
    }

    /// Reads one packet in the wire format from the given reader.
    ///
    /// The reader is left positioned on the byte after this packet, so a datagram holding
    /// several encapsulated packets can be decoded by calling this in a loop.
    pub fn from_wire(rdr: &mut PacketReader<'_>) -> Result<EncapsulatedPacket> {
        let flags = rdr.read_u8("flag byte")?;
        // the mask keeps the code within 0..=7, so the conversion cannot fail here
        let reliability = Reliability::try_from((flags & RELIABILITY_FLAGS) >> RELIABILITY_SHIFT)?;
        let has_split = flags & SPLIT_FLAG != 0;

        // The length field counts bits, with the low three bits reserved as a sub-byte
        // remainder. Senders only ever emit whole bytes, but the receiver still rounds up.
        let bit_length = rdr.read_u16("payload bit length")?;
        let byte_length = (usize::from(bit_length) + 7) / 8;

        let message_index = if reliability.is_reliable() {
            Some(rdr.read_u24("message index")?)
        } else {
            None
        };
        let sequence_index = if reliability.is_sequenced() {
            Some(rdr.read_u24("sequence index")?)
        } else {
            None
        };
        let (order_index, order_channel) = if reliability.is_sequenced_or_ordered() {
            (
                Some(rdr.read_u24("order index")?),
                Some(rdr.read_u8("order channel")?),
            )
        } else {
            (None, None)
        };

        let split = if has_split {
            Some(SplitHeader::read(rdr)?)
        } else {
            None
        };

        let payload = rdr.read_bytes(byte_length, "payload")?;

        Ok(EncapsulatedPacket {
            reliability,
            message_index,
            sequence_index,
            order_index,
            order_channel,
            split,
            payload,
            ack_identifier: None,
        })
    }

    /// Writes this packet in the transfer format to the given buffer.
    ///
    /// Layout: reliability code byte, payload length in *bytes* as i32 big-endian, the ack
    /// receipt identifier (-1 when absent) as i32 big-endian, the order channel byte for
    /// sequenced or ordered packets, then the payload. Everything is full-width; this encoding
    /// never leaves the process, so its only cost is CPU, not bytes on the wire.
    pub fn to_internal(&self, buffer: &mut Vec<u8>) -> Result<()> {
        debug_assert!(
            self.order_channel.is_some() == self.reliability.is_sequenced_or_ordered(),
            "order channel out of sync with the reliability"
        );

        buffer.write_u8(self.reliability.to_u8())?;
        buffer.write_i32::<BigEndian>(self.payload.len() as i32)?;
        buffer.write_i32::<BigEndian>(self.ack_identifier.unwrap_or(ACK_RECEIPT_ABSENT))?;
        if let Some(order_channel) = self.order_channel {
            buffer.write_u8(order_channel)?;
        }
        buffer.extend_from_slice(&self.payload);

        Ok(())
    }

    /// Reads one packet in the transfer format from the given reader.
    ///
    /// The transfer format carries no message/sequence/order indices and no split metadata;
    /// those fields come back unset. An ack identifier of -1 comes back as absent.
    pub fn from_internal(rdr: &mut PacketReader<'_>) -> Result<EncapsulatedPacket> {
        let reliability = Reliability::try_from(rdr.read_u8("reliability code")?)?;

        let length = rdr.read_i32("payload length")?;
        let byte_length = usize::try_from(length).map_err(|_| {
            ErrorKind::MalformedPacket(format!("negative payload length: {}", length))
        })?;

        let ack_identifier = match rdr.read_i32("ack identifier")? {
            ACK_RECEIPT_ABSENT => None,
            identifier => Some(identifier),
        };

        let order_channel = if reliability.is_sequenced_or_ordered() {
            Some(rdr.read_u8("order channel")?)
        } else {
            None
        };

        let payload = rdr.read_bytes(byte_length, "payload")?;

        Ok(EncapsulatedPacket {
            reliability,
            message_index: None,
            sequence_index: None,
            order_index: None,
            order_channel,
            split: None,
            payload,
            ack_identifier,
        })
    }

    /// Number of bytes [`to_internal`](Self::to_internal) will produce.
    pub(crate) fn internal_size(&self) -> usize {
        TRANSFER_PROLOGUE_SIZE
            + if self.reliability.is_sequenced_or_ordered() {
                ORDER_CHANNEL_SIZE
            } else {
                0
            }
            + self.payload.len()
    }

    // Exactly the index fields the reliability calls for are present; constructors and the wire
    // decoder uphold this, the transfer decoder intentionally does not.
    fn indices_match_reliability(&self) -> bool {
        self.message_index.is_some() == self.reliability.is_reliable()
            && self.sequence_index.is_some() == self.reliability.is_sequenced()
            && self.order_index.is_some() == self.reliability.is_sequenced_or_ordered()
            && self.order_channel.is_some() == self.reliability.is_sequenced_or_ordered()
    }
}
