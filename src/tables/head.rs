//! A [Font Header Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/head) implementation.

#[cfg(not(feature = "std"))]
use core_maths::CoreFloat;

use crate::parser::{Fixed, Stream};
use crate::{Rect, Result};


/// A [Font Header Table](https://docs.microsoft.com/en-us/typography/opentype/spec/head).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Table {
    /// Table version.
    pub version: Fixed,
    /// Font revision, rounded to 3 decimal places.
    pub font_revision: f64,
    /// Header flags.
    pub flags: u16,
    /// Units per EM.
    pub units_per_em: u16,
    /// Creation time, in seconds since 1904-01-01.
    pub created: u64,
    /// Modification time, in seconds since 1904-01-01.
    pub modified: u64,
    /// A bounding box that is large enough to enclose any glyph from the face.
    pub global_bbox: Rect,
}

impl Table {
    /// Parses a table from raw data.
    ///
    /// Fields after the bounding box are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version: Fixed = s.read()?;
        let revision_integer: i16 = s.read()?;
        let revision_fraction: u16 = s.read()?;
        s.skip::<u32>(); // checksum adjustment
        s.skip::<u32>(); // magic number
        let flags: u16 = s.read()?;
        let units_per_em: u16 = s.read()?;
        let created: u64 = s.read()?;
        let modified: u64 = s.read()?;
        let x_min: i16 = s.read()?;
        let y_min: i16 = s.read()?;
        let x_max: i16 = s.read()?;
        let y_max: i16 = s.read()?;

        // Not an exact 16.16 conversion: the fraction is scaled by 65535
        // and rounded, so 0x0001_8000 is 1.5 and not 1.50001.
        let revision = f64::from(revision_integer) + f64::from(revision_fraction) / 65535.0;
        let font_revision = (revision * 1000.0).round() / 1000.0;

        Ok(Table {
            version,
            font_revision,
            flags,
            units_per_em,
            created,
            modified,
            global_bbox: Rect { x_min, y_min, x_max, y_max },
        })
    }
}
