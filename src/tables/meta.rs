//! A [Metadata Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/meta) implementation.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::parser::{self, FromData, Offset32, Stream};
use crate::{Result, Tag};


#[derive(Clone, Copy)]
struct DataMap {
    tag: Tag,
    offset: Offset32,
    length: u32,
}

impl FromData for DataMap {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(DataMap {
            tag: s.read::<Tag>().ok()?,
            offset: s.read::<Offset32>().ok()?,
            length: s.read::<u32>().ok()?,
        })
    }
}


/// A [Metadata Table](https://docs.microsoft.com/en-us/typography/opentype/spec/meta).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Table {
    /// Table version.
    pub version: u32,
    /// Table flags.
    pub flags: u32,
    /// Metadata values by tag, like `dlng` or `slng`.
    pub data_maps: BTreeMap<Tag, String>,
}

impl Table {
    /// Parses a table from raw data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version: u32 = s.read()?;
        let flags: u32 = s.read()?;
        s.skip::<u32>(); // reserved
        let count: u32 = s.read()?;

        let available = s.remaining() / DataMap::SIZE;
        let count = if count as usize > available {
            warn!("meta declares {} data maps, but only {} fit into the table.", count, available);
            available
        } else {
            count as usize
        };

        let mut data_maps = BTreeMap::new();
        for _ in 0..count {
            let map: DataMap = s.read()?;
            // Data offsets are relative to the table start.
            let text = parser::read_ascii(data, map.offset.to_usize(), map.length as usize)?;
            data_maps.insert(map.tag, text);
        }

        Ok(Table {
            version,
            flags,
            data_maps,
        })
    }

    /// Returns a metadata value.
    #[inline]
    pub fn get(&self, tag: Tag) -> Option<&str> {
        self.data_maps.get(&tag).map(String::as_str)
    }
}
