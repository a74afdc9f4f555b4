//! A [Horizontal Header Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) implementation.

use crate::parser::{Fixed, Stream};
use crate::Result;


/// A [Horizontal Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea).
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Table {
    pub version: Fixed,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
}

impl Table {
    /// Parses a table from raw data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        Ok(Table {
            version: s.read()?,
            ascender: s.read()?,
            descender: s.read()?,
            line_gap: s.read()?,
            advance_width_max: s.read()?,
            min_left_side_bearing: s.read()?,
            min_right_side_bearing: s.read()?,
            x_max_extent: s.read()?,
        })
    }
}
