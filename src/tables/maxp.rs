//! A [Maximum Profile Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) implementation.

use crate::parser::Stream;
use crate::Result;

/// Version 0.5, used by CFF-based fonts.
pub const VERSION_0_5: u32 = 0x00005000;
/// Version 1.0, used by TrueType-based fonts.
pub const VERSION_1_0: u32 = 0x00010000;


/// Version 1.0 fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct TrueTypeLimits {
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}


/// A [Maximum Profile Table](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Table {
    /// Raw 16.16 version.
    pub version: u32,
    /// The number of glyphs in the font.
    pub number_of_glyphs: u16,
    /// Present only in a complete version 1.0 table.
    pub limits: Option<TrueTypeLimits>,
}

impl Table {
    /// Parses a table from raw data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version: u32 = s.read()?;
        let number_of_glyphs: u16 = s.read()?;

        let limits = match version {
            VERSION_1_0 => parse_limits(&mut s).ok(),
            VERSION_0_5 => None,
            _ => {
                warn!("Unknown maxp version {:#010X}.", version);
                None
            }
        };

        Ok(Table {
            version,
            number_of_glyphs,
            limits,
        })
    }
}

fn parse_limits(s: &mut Stream) -> Result<TrueTypeLimits> {
    Ok(TrueTypeLimits {
        max_points: s.read()?,
        max_contours: s.read()?,
        max_composite_points: s.read()?,
        max_composite_contours: s.read()?,
        max_zones: s.read()?,
        max_twilight_points: s.read()?,
        max_storage: s.read()?,
        max_function_defs: s.read()?,
        max_instruction_defs: s.read()?,
        max_stack_elements: s.read()?,
        max_size_of_instructions: s.read()?,
        max_component_elements: s.read()?,
        max_component_depth: s.read()?,
    })
}
