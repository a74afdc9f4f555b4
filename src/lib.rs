/*!
A safe metadata extractor for TrueType, OpenType and TrueType Collection files.

`sfnt-meta` walks the table directory of every font stored in a file and decodes
a small set of tables that describe a font rather than draw it:

- `name`: human-readable strings, grouped by platform and language,
  with a canonical group selected for you.
- `GSUB` and `GPOS`: which scripts, language systems and features are declared.
  The tags from both tables are collected into per-font sets.
- `head`, `hhea`, `maxp`, `OS/2` and `meta`: fixed-layout descriptive fields.

Tables without a decoder are skipped.

## Example

```no_run
let data = std::fs::read("font.ttc").unwrap();
for font in sfnt_meta::parse(&data).unwrap() {
    println!("{:?} {:?}", font.family_name(), font.features());
}
```

## Safety

- The library must not panic. Any panic is considered a critical bug and should be reported.
- The library forbids unsafe code.
- Every read is bounds-checked and fails with [`Error::UnexpectedEof`].
- Counts stored in a font are never trusted: every loop is bounded by the data length.

## Error handling

Errors that make a font unreadable are reported via [`Error`].
Recoverable oddities are reported as `log` warnings when the `logging` feature is enabled.
*/

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]

extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(not(any(feature = "std", feature = "no-std-float")))]
compile_error!("You have to activate either the `std` or the `no-std-float` feature.");

#[cfg(feature = "logging")]
macro_rules! warn {
    ($($arg:tt)+) => (
        log::log!(log::Level::Warn, $($arg)+);
    )
}

#[cfg(not(feature = "logging"))]
macro_rules! warn {
    ($($arg:tt)+) => {
        if false {
            let _ = format_args!($($arg)+);
        }
    }
}

pub mod parser;
pub mod tables;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use parser::{FromData, Offset32, Stream};
use tables::{ggg, head, hhea, maxp, meta, name, os2, Table};


/// A list of errors that can occur during font parsing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// A read went past the end of the data.
    ///
    /// `offset` is relative to the data being read:
    /// the whole file for headers and directories, the table otherwise.
    UnexpectedEof {
        /// Where the read started.
        offset: usize,
        /// How many bytes were requested.
        size: usize,
    },

    /// A TrueType Collection header points outside the file.
    MalformedCollection,

    /// A table record points outside the file.
    TableOutOfBounds(Tag),

    /// A name record uses a platform/encoding pair we cannot decode.
    UnknownEncoding {
        /// Platform ID.
        platform_id: u16,
        /// Platform-specific encoding ID.
        encoding_id: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof { offset, size } => {
                write!(f, "unexpected end of data while reading {} bytes at offset {}", size, offset)
            }
            Error::MalformedCollection => {
                write!(f, "malformed font collection")
            }
            Error::TableOutOfBounds(tag) => {
                write!(f, "table '{}' is out of bounds", tag)
            }
            Error::UnknownEncoding { platform_id, encoding_id } => {
                write!(f, "unknown encoding {}, platformID: {}", encoding_id, platform_id)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A type alias for `Result<T, sfnt_meta::Error>`.
pub type Result<T> = core::result::Result<T, Error>;


/// A 4-byte OpenType tag.
///
/// Used for tables, scripts, language systems and features.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag(pub u32);

impl Tag {
    /// Creates a `Tag` from bytes.
    #[inline]
    pub const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Tag(((bytes[0] as u32) << 24) | ((bytes[1] as u32) << 16) |
            ((bytes[2] as u32) << 8) | (bytes[3] as u32))
    }

    /// Returns tag as 4-element byte array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Returns tag as 4-element char array.
    #[inline]
    pub fn to_chars(self) -> [char; 4] {
        let b = self.to_bytes();
        [char::from(b[0]), char::from(b[1]), char::from(b[2]), char::from(b[3])]
    }

    /// Returns a tag with every `/` replaced by `_`.
    ///
    /// Table tags are stored in this form, so `OS/2` becomes `OS_2`.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut bytes = self.to_bytes();
        for b in bytes.iter_mut() {
            if *b == b'/' {
                *b = b'_';
            }
        }

        Tag::from_bytes(&bytes)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.to_chars();
        write!(f, "{}{}{}{}", c[0], c[1], c[2], c[3])
    }
}


/// A rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}


/// Script, language system and feature tags collected from a font's layout tables.
///
/// `GSUB` and `GPOS` write into the same sets.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct LayoutTags {
    /// Script tags, like `latn`.
    pub scripts: BTreeSet<Tag>,
    /// Language system tags, like `TRK `.
    pub languages: BTreeSet<Tag>,
    /// Feature tags, like `liga`.
    pub features: BTreeSet<Tag>,
}


// https://docs.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Clone, Copy)]
struct TableRecord {
    tag: Tag,
    offset: Offset32,
    length: u32,
}

impl FromData for TableRecord {
    const SIZE: usize = 16;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        let tag = s.read::<Tag>().ok()?;
        s.skip::<u32>(); // checksum
        Some(TableRecord {
            tag,
            offset: s.read::<Offset32>().ok()?,
            length: s.read::<u32>().ok()?,
        })
    }
}


/// Decoded metadata of a single font.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct FontDescriptor {
    tables: BTreeMap<Tag, Table>,
    tags: LayoutTags,
}

impl FontDescriptor {
    /// Parses a font that starts at `offset`.
    ///
    /// Only tables with a registered decoder (see [`tables::decoder`]) are decoded.
    /// Table offsets are absolute, so `data` must be the whole file.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        // https://docs.microsoft.com/en-us/typography/opentype/spec/otff#organization-of-an-opentype-font
        const SFNT_VERSION_TRUE_TYPE: u32 = 0x00010000;
        const SFNT_VERSION_OPEN_TYPE: u32 = 0x4F54544F; // OTTO
        const SFNT_VERSION_APPLE: u32 = 0x74727565; // true

        let mut s = Stream::new_at(data, offset);
        let sfnt_version: u32 = s.read()?;
        if !matches!(sfnt_version, SFNT_VERSION_TRUE_TYPE | SFNT_VERSION_OPEN_TYPE | SFNT_VERSION_APPLE) {
            warn!("Unknown sfnt version {:#010X} at offset {}.", sfnt_version, offset);
        }

        let num_tables: u16 = s.read()?;
        s.advance(6); // searchRange (u16) + entrySelector (u16) + rangeShift (u16)
        let records = s.read_bytes(usize::from(num_tables) * TableRecord::SIZE)?;

        let mut font = FontDescriptor::default();
        for i in 0..usize::from(num_tables) {
            let record: TableRecord = parser::read_at(records, i * TableRecord::SIZE)?;
            let tag = record.tag.normalized();
            let decode = match tables::decoder(tag) {
                Some(decode) => decode,
                None => continue,
            };

            let table_data = parser::slice_at(data, record.offset.to_usize(), record.length as usize)
                .map_err(|_| Error::TableOutOfBounds(tag))?;
            let table = decode(table_data, &mut font.tags)?;
            font.tables.insert(tag, table);
        }

        Ok(font)
    }

    /// Returns all decoded tables, keyed by a normalized tag.
    #[inline]
    pub fn tables(&self) -> &BTreeMap<Tag, Table> {
        &self.tables
    }

    /// Returns a decoded table by a normalized tag, like `OS_2`.
    #[inline]
    pub fn table(&self, tag: Tag) -> Option<&Table> {
        self.tables.get(&tag)
    }

    /// Returns the decoded `name` table.
    pub fn names(&self) -> Option<&name::Table> {
        match self.table(Tag::from_bytes(b"name"))? {
            Table::Name(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `GSUB` table.
    pub fn gsub(&self) -> Option<&ggg::LayoutTable> {
        match self.table(Tag::from_bytes(b"GSUB"))? {
            Table::Gsub(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `GPOS` table.
    pub fn gpos(&self) -> Option<&ggg::LayoutTable> {
        match self.table(Tag::from_bytes(b"GPOS"))? {
            Table::Gpos(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `head` table.
    pub fn head(&self) -> Option<&head::Table> {
        match self.table(Tag::from_bytes(b"head"))? {
            Table::Head(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `hhea` table.
    pub fn hhea(&self) -> Option<&hhea::Table> {
        match self.table(Tag::from_bytes(b"hhea"))? {
            Table::Hhea(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `maxp` table.
    pub fn maxp(&self) -> Option<&maxp::Table> {
        match self.table(Tag::from_bytes(b"maxp"))? {
            Table::Maxp(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `OS/2` table.
    pub fn os2(&self) -> Option<&os2::Table> {
        match self.table(Tag::from_bytes(b"OS_2"))? {
            Table::Os2(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the decoded `meta` table.
    pub fn meta(&self) -> Option<&meta::Table> {
        match self.table(Tag::from_bytes(b"meta"))? {
            Table::Meta(table) => Some(table),
            _ => None,
        }
    }

    /// Returns script tags declared by `GSUB` and `GPOS`.
    #[inline]
    pub fn scripts(&self) -> &BTreeSet<Tag> {
        &self.tags.scripts
    }

    /// Returns language system tags declared by `GSUB` and `GPOS`.
    #[inline]
    pub fn languages(&self) -> &BTreeSet<Tag> {
        &self.tags.languages
    }

    /// Returns feature tags declared by `GSUB` and `GPOS`.
    #[inline]
    pub fn features(&self) -> &BTreeSet<Tag> {
        &self.tags.features
    }

    /// Returns all layout tags at once.
    #[inline]
    pub fn layout_tags(&self) -> &LayoutTags {
        &self.tags
    }

    /// Returns font's family name from the canonical name group.
    ///
    /// Note that font can have multiple names. Use [`names()`](Self::names) to list them all.
    pub fn family_name(&self) -> Option<&str> {
        self.names()?.get(name::NameField::FontFamily)
    }

    /// Returns font's PostScript name from the canonical name group.
    pub fn post_script_name(&self) -> Option<&str> {
        self.names()?.get(name::NameField::PostScriptName)
    }
}


// https://docs.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header
const TTC_HEADER_SIZE: usize = 12;
const TTC_NUM_FONTS_OFFSET: usize = 8;

/// Font start offsets of a file.
///
/// A plain font file has a single font at offset 0.
#[derive(Clone, Debug)]
pub struct Collection<'a> {
    data: &'a [u8],
    offsets: Vec<u32>,
    is_collection: bool,
}

impl<'a> Collection<'a> {
    /// Resolves fonts stored in `data`.
    ///
    /// Returns [`Error::MalformedCollection`] when a TrueType Collection header
    /// doesn't fit into the data or points outside of it.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if !data.starts_with(b"ttcf") {
            return Ok(Collection {
                data,
                offsets: alloc::vec![0],
                is_collection: false,
            });
        }

        let num_fonts: u32 = parser::read_at(data, TTC_NUM_FONTS_OFFSET)
            .map_err(|_| Error::MalformedCollection)?;
        let len = (num_fonts as usize).checked_mul(Offset32::SIZE)
            .ok_or(Error::MalformedCollection)?;
        let offsets_data = parser::slice_at(data, TTC_HEADER_SIZE, len)
            .map_err(|_| Error::MalformedCollection)?;

        let mut offsets = Vec::with_capacity(num_fonts as usize);
        for i in 0..num_fonts as usize {
            let offset: Offset32 = parser::read_at(offsets_data, i * Offset32::SIZE)?;
            if offset.to_usize() >= data.len() {
                return Err(Error::MalformedCollection);
            }

            offsets.push(offset.0);
        }

        Ok(Collection {
            data,
            offsets,
            is_collection: true,
        })
    }

    /// Checks that the data is a TrueType Collection.
    #[inline]
    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    /// Returns the number of fonts.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Checks that there are no fonts.
    ///
    /// Only a collection can be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns font start offsets in file order.
    #[inline]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Returns an iterator that parses fonts one by one.
    ///
    /// Unlike [`parse`], a broken font doesn't affect the others.
    #[inline]
    pub fn fonts(&self) -> Fonts<'_> {
        Fonts {
            data: self.data,
            offsets: self.offsets.iter(),
        }
    }
}


/// An iterator over fonts in a [`Collection`].
#[derive(Clone, Debug)]
pub struct Fonts<'a> {
    data: &'a [u8],
    offsets: core::slice::Iter<'a, u32>,
}

impl Iterator for Fonts<'_> {
    type Item = Result<FontDescriptor>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next()?;
        Some(FontDescriptor::parse(self.data, *offset as usize))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for Fonts<'_> {}


/// Parses all fonts stored in `data`.
///
/// Returns one descriptor for a plain font file and one per font for a TrueType Collection,
/// in file order.
///
/// Stops at the first font that fails to parse.
/// Use [`Collection::fonts`] to parse fonts independently.
pub fn parse(data: &[u8]) -> Result<Vec<FontDescriptor>> {
    Collection::new(data)?.fonts().collect()
}

/// Returns the number of fonts stored in a TrueType Collection.
///
/// Returns `None` if provided data is not a TrueType Collection.
#[inline]
pub fn fonts_in_collection(data: &[u8]) -> Option<u32> {
    if !data.starts_with(b"ttcf") {
        return None;
    }

    parser::read_at(data, TTC_NUM_FONTS_OFFSET).ok()
}
