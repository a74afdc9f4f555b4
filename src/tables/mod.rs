//! Table decoders and the tag-to-decoder registry.

pub mod ggg;
pub mod head;
pub mod hhea;
pub mod maxp;
pub mod meta;
pub mod name;
pub mod os2;

use crate::{LayoutTags, Result, Tag};


/// A decoded table.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Table {
    Name(name::Table),
    Gsub(ggg::LayoutTable),
    Gpos(ggg::LayoutTable),
    Head(head::Table),
    Hhea(hhea::Table),
    Maxp(maxp::Table),
    Os2(os2::Table),
    Meta(meta::Table),
}

/// A table decoder.
///
/// Receives exactly the table's bytes and the font-wide layout tags.
/// Only the layout decoders write into the tags.
pub type Decoder = fn(&[u8], &mut LayoutTags) -> Result<Table>;

/// Returns a decoder for a normalized table tag.
///
/// Tags without a decoder are not an error, the table is simply skipped.
pub fn decoder(tag: Tag) -> Option<Decoder> {
    let decode: Decoder = match &tag.to_bytes() {
        b"name" => decode_name,
        b"GSUB" => decode_gsub,
        b"GPOS" => decode_gpos,
        b"head" => decode_head,
        b"hhea" => decode_hhea,
        b"maxp" => decode_maxp,
        b"OS_2" => decode_os2,
        b"meta" => decode_meta,
        _ => return None,
    };

    Some(decode)
}

fn decode_name(data: &[u8], _: &mut LayoutTags) -> Result<Table> {
    name::Table::parse(data).map(Table::Name)
}

fn decode_gsub(data: &[u8], tags: &mut LayoutTags) -> Result<Table> {
    ggg::LayoutTable::parse(data, tags).map(Table::Gsub)
}

fn decode_gpos(data: &[u8], tags: &mut LayoutTags) -> Result<Table> {
    ggg::LayoutTable::parse(data, tags).map(Table::Gpos)
}

fn decode_head(data: &[u8], _: &mut LayoutTags) -> Result<Table> {
    head::Table::parse(data).map(Table::Head)
}

fn decode_hhea(data: &[u8], _: &mut LayoutTags) -> Result<Table> {
    hhea::Table::parse(data).map(Table::Hhea)
}

fn decode_maxp(data: &[u8], _: &mut LayoutTags) -> Result<Table> {
    maxp::Table::parse(data).map(Table::Maxp)
}

fn decode_os2(data: &[u8], _: &mut LayoutTags) -> Result<Table> {
    os2::Table::parse(data).map(Table::Os2)
}

fn decode_meta(data: &[u8], _: &mut LayoutTags) -> Result<Table> {
    meta::Table::parse(data).map(Table::Meta)
}
