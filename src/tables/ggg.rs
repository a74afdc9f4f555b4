//! Common parts of the [Glyph Substitution Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gsub) and the [Glyph Positioning Table](
//! https://docs.microsoft.com/en-us/typography/opentype/spec/gpos).
//!
//! Only the script list and the feature list are read.
//! Lookups, feature indices and the default language system are not resolved.

use alloc::collections::{BTreeMap, BTreeSet};

use crate::parser::{self, FromData, Offset16, Stream};
use crate::{LayoutTags, Result, Tag};

/// Maximum number of scripts per script list and language systems per script.
///
/// Real fonts have a few dozen at most.
pub const MAX_RECORDS: usize = 256;


// A ScriptRecord, LangSysRecord or FeatureRecord.
#[derive(Clone, Copy)]
struct TagRecord {
    tag: Tag,
    offset: Offset16,
}

impl FromData for TagRecord {
    const SIZE: usize = 6;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        let mut s = Stream::new(data);
        Some(TagRecord {
            tag: s.read::<Tag>().ok()?,
            offset: s.read::<Offset16>().ok()?,
        })
    }
}

// Reads a u16 count followed by tag records.
//
// The iteration is limited by `limit` and by the data left.
fn tag_records<'a>(
    data: &'a [u8],
    offset: usize,
    limit: usize,
    kind: &str,
) -> Result<impl Iterator<Item = TagRecord> + 'a> {
    let mut s = Stream::new_at(data, offset);
    let count = usize::from(s.read::<u16>()?).min(limit);
    let available = s.remaining() / TagRecord::SIZE;
    if count > available {
        warn!("{} declares {} records, but only {} fit into the table.", kind, count, available);
    }

    let records = s.read_bytes(count.min(available) * TagRecord::SIZE)?;
    Ok(records.chunks_exact(TagRecord::SIZE).filter_map(TagRecord::parse))
}


/// A [Script Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#script-table-and-language-system-record).
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Script {
    /// Checks that the script has a default language system.
    pub has_default_language_system: bool,
    /// Language system tags.
    pub languages: BTreeSet<Tag>,
}

impl Script {
    fn parse(data: &[u8], offset: usize, tags: &mut LayoutTags) -> Result<Self> {
        let default_lang_sys: Offset16 = parser::read_at(data, offset)?;

        let mut languages = BTreeSet::new();
        for record in tag_records(data, offset + Offset16::SIZE, MAX_RECORDS, "Script table")? {
            tags.languages.insert(record.tag);
            languages.insert(record.tag);
        }

        Ok(Script {
            has_default_language_system: !default_lang_sys.is_null(),
            languages,
        })
    }
}


/// A `GSUB` or `GPOS` table.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct LayoutTable {
    /// Major version.
    pub major_version: u16,
    /// Minor version.
    pub minor_version: u16,
    /// Scripts by tag.
    pub scripts: BTreeMap<Tag, Script>,
    /// Feature tags.
    pub features: BTreeSet<Tag>,
}

impl LayoutTable {
    /// Parses a table from raw data.
    ///
    /// Discovered tags are also added to `tags`.
    pub fn parse(data: &[u8], tags: &mut LayoutTags) -> Result<Self> {
        let mut s = Stream::new(data);
        let major_version: u16 = s.read()?;
        let minor_version: u16 = s.read()?;
        let script_list_offset: Offset16 = s.read()?;
        let feature_list_offset: Offset16 = s.read()?;

        let mut table = LayoutTable {
            major_version,
            minor_version,
            ..LayoutTable::default()
        };

        if !script_list_offset.is_null() {
            table.parse_script_list(data, script_list_offset.to_usize(), tags)?;
        }

        if !feature_list_offset.is_null() {
            table.parse_feature_list(data, feature_list_offset.to_usize(), tags)?;
        }

        Ok(table)
    }

    fn parse_script_list(&mut self, data: &[u8], offset: usize, tags: &mut LayoutTags) -> Result<()> {
        for record in tag_records(data, offset, MAX_RECORDS, "Script list")? {
            tags.scripts.insert(record.tag);
            // Script offsets are relative to the script list.
            let script = Script::parse(data, offset + record.offset.to_usize(), tags)?;
            // A repeated script tag extends the earlier entry instead of replacing it.
            let entry = self.scripts.entry(record.tag).or_default();
            entry.has_default_language_system |= script.has_default_language_system;
            entry.languages.extend(script.languages);
        }

        Ok(())
    }

    fn parse_feature_list(&mut self, data: &[u8], offset: usize, tags: &mut LayoutTags) -> Result<()> {
        // Not limited by MAX_RECORDS, only by the data.
        for record in tag_records(data, offset, usize::MAX, "Feature list")? {
            tags.features.insert(record.tag);
            self.features.insert(record.tag);
        }

        Ok(())
    }
}
