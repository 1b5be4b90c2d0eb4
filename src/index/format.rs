//! Binary index file header.
//!
//! Layout (little-endian, 32 bytes at offset 0):
//!
//! | offset | size | field           |
//! |-------:|-----:|-----------------|
//! |      0 |    4 | magic ("IDX1")  |
//! |      4 |    2 | version_major   |
//! |      6 |    2 | version_minor   |
//! |      8 |    4 | flags           |
//! |     12 |    4 | num_documents   |
//! |     16 |    4 | num_terms       |
//! |     20 |    4 | reserved        |
//! |     24 |    8 | forward_offset  |

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;

/// File magic: "IDX1".
pub const MAGIC: u32 = 0x4944_5831;

/// Major format version. Readers reject files with a different major.
pub const VERSION_MAJOR: u16 = 1;

/// Minor format version.
pub const VERSION_MINOR: u16 = 0;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: u64 = 32;

/// The fixed header at the start of every index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub magic: u32,
    pub version_major: u16,
    pub version_minor: u16,
    pub flags: u32,
    pub num_documents: u32,
    pub num_terms: u32,
    pub reserved: u32,
    /// Absolute byte offset of the forward region.
    pub forward_offset: u64,
}

impl Default for IndexHeader {
    fn default() -> Self {
        IndexHeader {
            magic: MAGIC,
            version_major: VERSION_MAJOR,
            version_minor: VERSION_MINOR,
            flags: 0,
            num_documents: 0,
            num_terms: 0,
            reserved: 0,
            forward_offset: 0,
        }
    }
}

impl IndexHeader {
    /// Write the header to `out`.
    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_u32::<LittleEndian>(self.magic)?;
        out.write_u16::<LittleEndian>(self.version_major)?;
        out.write_u16::<LittleEndian>(self.version_minor)?;
        out.write_u32::<LittleEndian>(self.flags)?;
        out.write_u32::<LittleEndian>(self.num_documents)?;
        out.write_u32::<LittleEndian>(self.num_terms)?;
        out.write_u32::<LittleEndian>(self.reserved)?;
        out.write_u64::<LittleEndian>(self.forward_offset)?;
        Ok(())
    }

    /// Read a header from `input`.
    pub fn read<R: Read>(input: &mut R) -> Result<Self> {
        Ok(IndexHeader {
            magic: input.read_u32::<LittleEndian>()?,
            version_major: input.read_u16::<LittleEndian>()?,
            version_minor: input.read_u16::<LittleEndian>()?,
            flags: input.read_u32::<LittleEndian>()?,
            num_documents: input.read_u32::<LittleEndian>()?,
            num_terms: input.read_u32::<LittleEndian>()?,
            reserved: input.read_u32::<LittleEndian>()?,
            forward_offset: input.read_u64::<LittleEndian>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_roundtrip() {
        let header = IndexHeader {
            num_documents: 42,
            num_terms: 1234,
            forward_offset: 9876,
            ..IndexHeader::default()
        };

        let mut buf = Vec::new();
        header.write(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, HEADER_SIZE);

        let read_back = IndexHeader::read(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(read_back, header);
    }

    #[test]
    fn test_header_layout() {
        let mut buf = Vec::new();
        IndexHeader::default().write(&mut buf).unwrap();

        // Magic is stored little-endian
        assert_eq!(&buf[0..4], &[0x31, 0x58, 0x44, 0x49]);
        // version_major = 1
        assert_eq!(&buf[4..6], &[1, 0]);
    }
}
