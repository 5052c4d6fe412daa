use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{ErrorKind, Result};

/// Can be used to read the contents of a received buffer holding one or more encapsulated packets.
///
/// # Remarks
/// - `PacketReader` is using an underlying `Cursor` to manage the reading of the bytes.
/// - Each read is checked against the remaining bytes first; a field that does not fit is a
///   `MalformedPacket` error rather than a silent truncation.
pub struct PacketReader<'s> {
    buffer: &'s [u8],
    cursor: Cursor<&'s [u8]>,
}

impl<'s> PacketReader<'s> {
    /// Construct a new instance of `PacketReader`, the given `buffer` will be used to read information from.
    pub fn new(buffer: &'s [u8]) -> PacketReader<'s> {
        PacketReader {
            buffer,
            cursor: Cursor::new(buffer),
        }
    }

    /// Returns the number of bytes consumed so far.
    ///
    /// After a successful decode this is the offset of the next packet in the buffer.
    pub fn bytes_read(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Returns true as long as there are unread bytes left in the buffer.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.check(1, field)?;
        Ok(self.cursor.read_u8()?)
    }

    /// Reads a 16-bit big-endian unsigned integer.
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.check(2, field)?;
        Ok(self.cursor.read_u16::<BigEndian>()?)
    }

    /// Reads a 24-bit little-endian unsigned integer, zero-extended to 32 bits.
    pub fn read_u24(&mut self, field: &'static str) -> Result<u32> {
        self.check(3, field)?;
        Ok(self.cursor.read_u24::<LittleEndian>()?)
    }

    /// Reads a 32-bit big-endian signed integer.
    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        self.check(4, field)?;
        Ok(self.cursor.read_i32::<BigEndian>()?)
    }

    /// Reads `length` raw bytes.
    pub fn read_bytes(&mut self, length: usize, field: &'static str) -> Result<Box<[u8]>> {
        self.check(length, field)?;
        let start = self.cursor.position() as usize;
        let bytes = self.buffer[start..start + length].to_vec().into_boxed_slice();
        self.cursor.set_position((start + length) as u64);
        Ok(bytes)
    }

    fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor.position() as usize
    }

    // Checks if a given length of bytes could be read with the buffer.
    fn can_read(&self, length: usize) -> bool {
        self.remaining() >= length
    }

    fn check(&self, length: usize, field: &'static str) -> Result<()> {
        if self.can_read(length) {
            Ok(())
        } else {
            Err(ErrorKind::MalformedPacket(format!(
                "{} requires {} bytes, {} remaining",
                field,
                length,
                self.remaining()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::packet::PacketReader;

    #[test]
    fn can_read_bytes() {
        let buffer = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        let reader = PacketReader::new(buffer.as_slice());
        assert!(reader.can_read(buffer.len()));
        assert!(!reader.can_read(buffer.len() + 1));
    }

    #[test]
    fn reads_advance_the_offset() {
        let buffer = vec![1, 0, 2, 0, 0, 3, 0, 0, 0, 4, 9, 9];

        let mut reader = PacketReader::new(buffer.as_slice());

        assert_eq!(reader.read_u8("first").unwrap(), 1);
        assert_eq!(reader.read_u16("second").unwrap(), 2);
        assert_eq!(reader.read_u24("third").unwrap(), 0x03_0000);
        assert_eq!(reader.bytes_read(), 6);
        assert_eq!(reader.read_i32("fourth").unwrap(), 4);
        assert_eq!(reader.read_bytes(2, "tail").unwrap().as_ref(), &[9, 9]);
        assert!(!reader.has_remaining());
    }

    #[test]
    fn reads_little_endian_index_fields() {
        let buffer = vec![0x01, 0x02, 0x03];

        let mut reader = PacketReader::new(buffer.as_slice());

        assert_eq!(reader.read_u24("index").unwrap(), 0x03_0201);
    }

    #[test]
    fn expect_read_error() {
        let buffer = vec![0, 1];

        let mut reader = PacketReader::new(buffer.as_slice());

        assert!(reader.read_i32("field that does not fit").is_err());
        // a failed check consumes nothing
        assert_eq!(reader.bytes_read(), 0);
        assert_eq!(reader.read_u16("field that fits").unwrap(), 1);
    }
}
