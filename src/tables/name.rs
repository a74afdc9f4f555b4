//! A [Naming Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/name) implementation.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::parser::{self, FromData, Offset16, Stream};
use crate::{Error, Result};


/// A list of [platform ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#platform-ids)'s.
pub mod platform_id {
    #![allow(missing_docs)]

    pub const UNICODE: u16      = 0;
    pub const MACINTOSH: u16    = 1;
    pub const ISO: u16          = 2;
    pub const WINDOWS: u16      = 3;
    pub const CUSTOM: u16       = 4;
}


/// A name field, derived from a
/// [name ID](https://docs.microsoft.com/en-us/typography/opentype/spec/name#name-ids).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[allow(missing_docs)]
pub enum NameField {
    Copyright,
    FontFamily,
    FontSubfamily,
    UniqueId,
    FullName,
    Version,
    PostScriptName,
    Trademark,
    Manufacturer,
    Designer,
    Description,
    VendorUrl,
    DesignerUrl,
    License,
    LicenseUrl,
    Reserved,
    TypographicFamily,
    TypographicSubfamily,
    CompatibleFull,
    SampleText,
    PostScriptCid,
    WwsFamily,
    WwsSubfamily,
    LightPalette,
    DarkPalette,
    PreferredFamily,
    PreferredSubfamily,
    /// A name ID without a known meaning.
    Other(u16),
}

// Indexed by name ID.
const FIELDS: [(NameField, &str); 27] = [
    (NameField::Copyright,              "copyright"),
    (NameField::FontFamily,             "fontFamily"),
    (NameField::FontSubfamily,          "fontSubfamily"),
    (NameField::UniqueId,               "ID"),
    (NameField::FullName,               "fullName"),
    (NameField::Version,                "version"),
    (NameField::PostScriptName,         "postScriptName"),
    (NameField::Trademark,              "trademark"),
    (NameField::Manufacturer,           "manufacturer"),
    (NameField::Designer,               "designer"),
    (NameField::Description,            "description"),
    (NameField::VendorUrl,              "urlVendor"),
    (NameField::DesignerUrl,            "urlDesigner"),
    (NameField::License,                "licence"),
    (NameField::LicenseUrl,             "licenceURL"),
    (NameField::Reserved,               "---"),
    (NameField::TypographicFamily,      "typoFamilyName"),
    (NameField::TypographicSubfamily,   "typoSubfamilyName"),
    (NameField::CompatibleFull,         "compatibleFull"),
    (NameField::SampleText,             "sampleText"),
    (NameField::PostScriptCid,          "postScriptCID"),
    (NameField::WwsFamily,              "wwsFamilyName"),
    (NameField::WwsSubfamily,           "wwsSubfamilyName"),
    (NameField::LightPalette,           "lightPalette"),
    (NameField::DarkPalette,            "darkPalette"),
    (NameField::PreferredFamily,        "preferredFamily"),
    (NameField::PreferredSubfamily,     "preferredSubfamily"),
];

impl NameField {
    /// Maps a name ID to a field.
    ///
    /// IDs past the known list become `Other`.
    #[inline]
    pub fn from_id(id: u16) -> Self {
        FIELDS.get(usize::from(id)).map(|(field, _)| *field).unwrap_or(NameField::Other(id))
    }

    /// Returns the name ID.
    pub fn id(self) -> u16 {
        match self {
            NameField::Other(id) => id,
            field => FIELDS.iter().position(|(f, _)| *f == field).unwrap_or(0) as u16,
        }
    }

    /// Returns a short label, like `postScriptName`.
    ///
    /// `None` for `Other`, which is displayed as `#<id>` instead.
    pub fn label(self) -> Option<&'static str> {
        match self {
            NameField::Other(_) => None,
            field => FIELDS.get(usize::from(field.id())).map(|(_, label)| *label),
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "#{}", self.id()),
        }
    }
}


/// A string encoding used to decode a name record.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Encoding {
    /// UTF-16BE, two bytes per character.
    Utf16Be,
    /// One byte per character.
    Ascii,
    /// A Macintosh encoding we don't support, read as `Ascii`.
    MacintoshApproximation,
}

impl Encoding {
    /// Selects an encoding for a platform/encoding pair.
    ///
    /// The first matching rule wins:
    ///
    /// - Unicode platform: UTF-16BE
    /// - Windows platform, Symbol encoding: UTF-16BE
    /// - encoding 0: ASCII
    /// - encoding 1 or 3: UTF-16BE
    /// - Macintosh platform: ASCII approximation
    pub fn select(platform_id: u16, encoding_id: u16) -> Result<Self> {
        match (platform_id, encoding_id) {
            (platform_id::UNICODE, _) => Ok(Encoding::Utf16Be),
            (platform_id::WINDOWS, 0) => Ok(Encoding::Utf16Be),
            (_, 0) => Ok(Encoding::Ascii),
            (_, 1) | (_, 3) => Ok(Encoding::Utf16Be),
            (platform_id::MACINTOSH, _) => Ok(Encoding::MacintoshApproximation),
            _ => Err(Error::UnknownEncoding { platform_id, encoding_id }),
        }
    }
}


#[derive(Clone, Copy)]
struct NameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    length: u16,
    offset: Offset16,
}

impl FromData for NameRecord {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(NameRecord {
            platform_id: s.read::<u16>().ok()?,
            encoding_id: s.read::<u16>().ok()?,
            language_id: s.read::<u16>().ok()?,
            name_id: s.read::<u16>().ok()?,
            length: s.read::<u16>().ok()?,
            offset: s.read::<Offset16>().ok()?,
        })
    }
}

impl NameRecord {
    fn decode(&self, data: &[u8], storage: usize) -> Result<String> {
        let offset = storage + self.offset.to_usize();
        let length = usize::from(self.length);
        match Encoding::select(self.platform_id, self.encoding_id)? {
            Encoding::Utf16Be => parser::read_utf16_be(data, offset, length / 2),
            Encoding::Ascii => parser::read_ascii(data, offset, length),
            Encoding::MacintoshApproximation => {
                warn!("Reading unknown Macintosh encoding {} as ASCII.", self.encoding_id);
                parser::read_ascii(data, offset, length)
            }
        }
    }
}


/// Names that share a platform and a language.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameGroup {
    /// Platform ID.
    pub platform_id: u16,
    /// Language ID.
    pub language_id: u16,
    /// Decoded strings.
    pub fields: BTreeMap<NameField, String>,
}

impl NameGroup {
    /// Returns a decoded string.
    #[inline]
    pub fn get(&self, field: NameField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}


/// A [Naming Table](https://docs.microsoft.com/en-us/typography/opentype/spec/name).
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Table {
    groups: Vec<NameGroup>,
    canonical: Option<usize>,
}

impl Table {
    /// Parses a table from raw data.
    ///
    /// Both table formats are handled the same way:
    /// the string storage is expected right after the name records.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut s = Stream::new(data);
        s.skip::<u16>(); // format
        let count: u16 = s.read()?;
        s.skip::<Offset16>(); // storage offset
        let records = s.read_bytes(usize::from(count) * NameRecord::SIZE)?;
        let storage = s.offset();

        let mut groups: Vec<NameGroup> = Vec::new();
        for i in 0..usize::from(count) {
            let record: NameRecord = parser::read_at(records, i * NameRecord::SIZE)?;
            let text = record.decode(data, storage)?;

            let idx = match groups.iter().position(|g| {
                g.platform_id == record.platform_id && g.language_id == record.language_id
            }) {
                Some(idx) => idx,
                None => {
                    groups.push(NameGroup {
                        platform_id: record.platform_id,
                        language_id: record.language_id,
                        fields: BTreeMap::new(),
                    });
                    groups.len() - 1
                }
            };

            groups[idx].fields.insert(NameField::from_id(record.name_id), text);
        }

        let canonical = select_canonical(&groups);
        Ok(Table { groups, canonical })
    }

    /// Returns all name groups in the order of their first record.
    #[inline]
    pub fn groups(&self) -> &[NameGroup] {
        &self.groups
    }

    /// Returns the canonical name group.
    ///
    /// `None` only when the table has no records.
    #[inline]
    pub fn canonical(&self) -> Option<&NameGroup> {
        self.groups.get(self.canonical?)
    }

    /// Returns a string from the canonical name group.
    #[inline]
    pub fn get(&self, field: NameField) -> Option<&str> {
        self.canonical()?.get(field)
    }
}

// There is no right answer to which group holds "the" name.
// Take the first group with a PostScript name, otherwise the first group.
fn select_canonical(groups: &[NameGroup]) -> Option<usize> {
    if let Some(idx) = groups.iter().position(|g| g.fields.contains_key(&NameField::PostScriptName)) {
        return Some(idx);
    }

    match groups.first() {
        Some(group) => {
            warn!("Returning name table with languageID {}.", group.language_id);
            Some(0)
        }
        None => {
            warn!("Name table has no records.");
            None
        }
    }
}
