//! An [OS/2 and Windows Metrics Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/os2) implementation.

use alloc::string::String;
use core::fmt;

use crate::parser::{self, FromData, Stream};
use crate::{Result, Tag};

const CODE_PAGE_RANGE_OFFSET: usize = 78;
const X_HEIGHT_OFFSET: usize = 86;
const OPTICAL_POINT_SIZE_OFFSET: usize = 96;


/// A font [weight](https://docs.microsoft.com/en-us/typography/opentype/spec/os2#usweightclass).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Weight {
    Thin,
    ExtraLight,
    Light,
    Normal,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
    Other(u16),
}

impl Weight {
    /// Returns a numeric representation of a weight.
    #[inline]
    pub fn to_number(self) -> u16 {
        match self {
            Weight::Thin        => 100,
            Weight::ExtraLight  => 200,
            Weight::Light       => 300,
            Weight::Normal      => 400,
            Weight::Medium      => 500,
            Weight::SemiBold    => 600,
            Weight::Bold        => 700,
            Weight::ExtraBold   => 800,
            Weight::Black       => 900,
            Weight::Other(n)    => n,
        }
    }
}

impl From<u16> for Weight {
    #[inline]
    fn from(value: u16) -> Self {
        match value {
            100 => Weight::Thin,
            200 => Weight::ExtraLight,
            300 => Weight::Light,
            400 => Weight::Normal,
            500 => Weight::Medium,
            600 => Weight::SemiBold,
            700 => Weight::Bold,
            800 => Weight::ExtraBold,
            900 => Weight::Black,
            _   => Weight::Other(value),
        }
    }
}


/// A font [width](https://docs.microsoft.com/en-us/typography/opentype/spec/os2#uswidthclass).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[allow(missing_docs)]
pub enum Width {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

impl Width {
    /// Returns a numeric representation of a width.
    #[inline]
    pub fn to_number(self) -> u16 {
        match self {
            Width::UltraCondensed   => 1,
            Width::ExtraCondensed   => 2,
            Width::Condensed        => 3,
            Width::SemiCondensed    => 4,
            Width::Normal           => 5,
            Width::SemiExpanded     => 6,
            Width::Expanded         => 7,
            Width::ExtraExpanded    => 8,
            Width::UltraExpanded    => 9,
        }
    }
}

impl From<u16> for Width {
    /// Out of range values are treated as `Normal`.
    #[inline]
    fn from(value: u16) -> Self {
        match value {
            1 => Width::UltraCondensed,
            2 => Width::ExtraCondensed,
            3 => Width::Condensed,
            4 => Width::SemiCondensed,
            6 => Width::SemiExpanded,
            7 => Width::Expanded,
            8 => Width::ExtraExpanded,
            9 => Width::UltraExpanded,
            _ => Width::Normal,
        }
    }
}


/// [Embedding permissions](https://docs.microsoft.com/en-us/typography/opentype/spec/os2#fstype).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Permissions(pub u16);

impl Permissions {
    /// Checks that the font must not be subsetted before embedding.
    #[inline]
    pub fn is_subsetting_forbidden(self) -> bool {
        self.0 & 0x0100 != 0
    }

    /// Checks that only bitmaps may be embedded.
    #[inline]
    pub fn is_bitmap_only(self) -> bool {
        self.0 & 0x0200 != 0
    }

    /// Returns a human-readable description, like `Installable-embedding no-subset `.
    ///
    /// Every word is followed by a space.
    /// An unknown usage value contributes no word.
    pub fn description(self) -> String {
        let mut text = String::new();
        match self.0 & 0x000F {
            0 => text.push_str("Installable-embedding "),
            2 => text.push_str("Restricted "),
            4 => text.push_str("Preview/print "),
            8 => text.push_str("Editable-embedding "),
            _ => {}
        }

        if self.is_subsetting_forbidden() {
            text.push_str("no-subset ");
        }

        if self.is_bitmap_only() {
            text.push_str("bitmap-embed ");
        }

        text
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}


// https://docs.microsoft.com/en-us/typography/opentype/spec/os2#fsselection
#[derive(Clone, Copy)]
struct SelectionFlags(u16);

impl SelectionFlags {
    #[inline] fn italic(self) -> bool { self.0 & (1 << 0) != 0 }
    #[inline] fn bold(self) -> bool { self.0 & (1 << 5) != 0 }
    #[inline] fn regular(self) -> bool { self.0 & (1 << 6) != 0 }
    #[inline] fn use_typo_metrics(self) -> bool { self.0 & (1 << 7) != 0 }
    #[inline] fn oblique(self) -> bool { self.0 & (1 << 9) != 0 }
}


/// A script metrics used by subscript and superscript.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScriptMetrics {
    /// Horizontal font size.
    pub x_size: i16,
    /// Vertical font size.
    pub y_size: i16,
    /// X offset.
    pub x_offset: i16,
    /// Y offset.
    pub y_offset: i16,
}

impl FromData for ScriptMetrics {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(ScriptMetrics {
            x_size: s.read::<i16>().ok()?,
            y_size: s.read::<i16>().ok()?,
            x_offset: s.read::<i16>().ok()?,
            y_offset: s.read::<i16>().ok()?,
        })
    }
}


/// Fields added in version 2.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Os2V2 {
    pub x_height: i16,
    pub cap_height: i16,
    pub default_char: u16,
    pub break_char: u16,
    pub max_context: u16,
}

impl FromData for Os2V2 {
    const SIZE: usize = 10;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(Os2V2 {
            x_height: s.read::<i16>().ok()?,
            cap_height: s.read::<i16>().ok()?,
            default_char: s.read::<u16>().ok()?,
            break_char: s.read::<u16>().ok()?,
            max_context: s.read::<u16>().ok()?,
        })
    }
}


/// An [OS/2 and Windows Metrics Table](https://docs.microsoft.com/en-us/typography/opentype/spec/os2).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Table {
    pub version: u16,
    pub x_avg_char_width: i16,
    pub weight_class: u16,
    pub width_class: u16,
    pub fs_type: Permissions,
    pub subscript: ScriptMetrics,
    pub superscript: ScriptMetrics,
    pub strikeout_size: i16,
    pub strikeout_position: i16,
    pub family_class: i16,
    pub vendor_id: Tag,
    pub fs_selection: u16,
    pub first_char_index: u16,
    pub last_char_index: u16,
    pub typo_ascender: i16,
    pub typo_descender: i16,
    pub typo_line_gap: i16,
    pub win_ascent: u16,
    pub win_descent: u16,
    /// Version 1 and later.
    pub code_page_range: Option<[u32; 2]>,
    /// Version 2 and later.
    pub v2: Option<Os2V2>,
    /// The lower and upper optical point sizes. Version 5 and later.
    pub optical_point_size: Option<(u16, u16)>,
}

impl Table {
    /// Parses a table from raw data.
    ///
    /// Requires at least the 78 bytes of a version 0 table.
    /// Later fields are read only when both the version and the length allow it.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        let version: u16 = s.read()?;
        let x_avg_char_width: i16 = s.read()?;
        let weight_class: u16 = s.read()?;
        let width_class: u16 = s.read()?;
        let fs_type = Permissions(s.read()?);
        let subscript: ScriptMetrics = s.read()?;
        let superscript: ScriptMetrics = s.read()?;
        let strikeout_size: i16 = s.read()?;
        let strikeout_position: i16 = s.read()?;
        let family_class: i16 = s.read()?;
        s.advance(10); // panose
        s.advance(16); // unicode ranges
        let vendor_id: Tag = s.read()?;
        let fs_selection: u16 = s.read()?;
        let first_char_index: u16 = s.read()?;
        let last_char_index: u16 = s.read()?;
        let typo_ascender: i16 = s.read()?;
        let typo_descender: i16 = s.read()?;
        let typo_line_gap: i16 = s.read()?;
        let win_ascent: u16 = s.read()?;
        let win_descent: u16 = s.read()?;

        let code_page_range = if version >= 1 {
            let mut s = Stream::new_at(data, CODE_PAGE_RANGE_OFFSET);
            match (s.read::<u32>(), s.read::<u32>()) {
                (Ok(a), Ok(b)) => Some([a, b]),
                _ => None,
            }
        } else {
            None
        };

        let v2 = if version >= 2 {
            parser::read_at(data, X_HEIGHT_OFFSET).ok()
        } else {
            None
        };

        let optical_point_size = if version >= 5 {
            let mut s = Stream::new_at(data, OPTICAL_POINT_SIZE_OFFSET);
            match (s.read::<u16>(), s.read::<u16>()) {
                (Ok(lower), Ok(upper)) => Some((lower, upper)),
                _ => None,
            }
        } else {
            None
        };

        Ok(Table {
            version,
            x_avg_char_width,
            weight_class,
            width_class,
            fs_type,
            subscript,
            superscript,
            strikeout_size,
            strikeout_position,
            family_class,
            vendor_id,
            fs_selection,
            first_char_index,
            last_char_index,
            typo_ascender,
            typo_descender,
            typo_line_gap,
            win_ascent,
            win_descent,
            code_page_range,
            v2,
            optical_point_size,
        })
    }

    /// Returns the font weight.
    #[inline]
    pub fn weight(&self) -> Weight {
        Weight::from(self.weight_class)
    }

    /// Returns the font width.
    #[inline]
    pub fn width(&self) -> Width {
        Width::from(self.width_class)
    }

    /// Checks that the font is marked as *Regular*.
    #[inline]
    pub fn is_regular(&self) -> bool {
        SelectionFlags(self.fs_selection).regular()
    }

    /// Checks that the font is marked as *Italic*.
    #[inline]
    pub fn is_italic(&self) -> bool {
        SelectionFlags(self.fs_selection).italic()
    }

    /// Checks that the font is marked as *Bold*.
    #[inline]
    pub fn is_bold(&self) -> bool {
        SelectionFlags(self.fs_selection).bold()
    }

    /// Checks that the font is marked as *Oblique*.
    ///
    /// The flag exists since version 4.
    #[inline]
    pub fn is_oblique(&self) -> bool {
        self.version >= 4 && SelectionFlags(self.fs_selection).oblique()
    }

    /// Checks that typographic metrics should be used for line spacing.
    ///
    /// The flag exists since version 4.
    #[inline]
    pub fn use_typo_metrics(&self) -> bool {
        self.version >= 4 && SelectionFlags(self.fs_selection).use_typo_metrics()
    }
}
