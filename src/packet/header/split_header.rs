use byteorder::{BigEndian, WriteBytesExt};

use crate::error::Result;
use crate::packet::constants::SPLIT_HEADER_SIZE;
use crate::packet::{PacketReader, SplitCount, SplitId, SplitIndex};

use super::{HeaderReader, HeaderWriter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// This header carries the fragmentation metadata of one fragment of a split message.
pub struct SplitHeader {
    count: SplitCount,
    id: SplitId,
    index: SplitIndex,
}

impl SplitHeader {
    /// Create a new split header with the given fragmentation metadata.
    pub fn new(count: SplitCount, id: SplitId, index: SplitIndex) -> Self {
        SplitHeader { count, id, index }
    }

    /// Returns the total number of fragments in the message this fragment is part of.
    pub fn count(&self) -> SplitCount {
        self.count
    }

    /// Returns the identifier of the split group this fragment belongs to.
    pub fn id(&self) -> SplitId {
        self.id
    }

    /// Returns the zero-based position of this fragment within its split group.
    pub fn index(&self) -> SplitIndex {
        self.index
    }
}

impl HeaderWriter for SplitHeader {
    type Output = Result<()>;

    fn write(&self, buffer: &mut Vec<u8>) -> Self::Output {
        buffer.write_i32::<BigEndian>(self.count)?;
        buffer.write_u16::<BigEndian>(self.id)?;
        buffer.write_i32::<BigEndian>(self.index)?;

        Ok(())
    }
}

impl HeaderReader for SplitHeader {
    type Header = Result<SplitHeader>;

    fn read(rdr: &mut PacketReader<'_>) -> Self::Header {
        let count = rdr.read_i32("split count")?;
        let id = rdr.read_u16("split id")?;
        let index = rdr.read_i32("split index")?;

        let header = SplitHeader { count, id, index };

        Ok(header)
    }

    /// Returns the size of this header.
    fn size() -> usize {
        SPLIT_HEADER_SIZE
    }
}

#[cfg(test)]
mod tests {
    use crate::packet::constants::SPLIT_HEADER_SIZE;
    use crate::packet::header::{HeaderReader, HeaderWriter, SplitHeader};
    use crate::packet::PacketReader;

    #[test]
    fn serialize() {
        let mut buffer = Vec::new();
        let header = SplitHeader::new(4, 7, 2);
        assert![header.write(&mut buffer).is_ok()];

        assert_eq!(buffer[..4], 4i32.to_be_bytes());
        assert_eq!(buffer[4..6], 7u16.to_be_bytes());
        assert_eq!(buffer[6..10], 2i32.to_be_bytes());
    }

    #[test]
    fn deserialize() {
        let buffer = vec![0, 0, 0, 4, 0, 7, 0, 0, 0, 2];

        let mut reader = PacketReader::new(buffer.as_slice());

        let header = SplitHeader::read(&mut reader).unwrap();

        assert_eq!(header.count(), 4);
        assert_eq!(header.id(), 7);
        assert_eq!(header.index(), 2);
    }

    #[test]
    fn deserialize_rejects_short_buffer() {
        let buffer = vec![0, 0, 0, 4, 0, 7];

        let mut reader = PacketReader::new(buffer.as_slice());

        assert!(SplitHeader::read(&mut reader).is_err());
    }

    #[test]
    fn size() {
        assert_eq!(SplitHeader::size(), SPLIT_HEADER_SIZE);
    }
}
