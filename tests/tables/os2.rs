use sfnt_meta::Error;
use sfnt_meta::tables::os2::{Os2V2, Permissions, ScriptMetrics, Table, Weight, Width};
use crate::{convert, tag, Unit::*};

fn version_0_units(version: u16) -> Vec<u8> {
    convert(&[
        UInt16(version), // version
        Int16(520), // average char width
        UInt16(700), // weight class: bold
        UInt16(3), // width class: condensed
        UInt16(0x0108), // fs type: editable, no subsetting
        Int16(650), Int16(600), Int16(0), Int16(75), // subscript
        Int16(650), Int16(600), Int16(0), Int16(350), // superscript
        Int16(50), // strikeout size
        Int16(300), // strikeout position
        Int16(0x0801), // family class
        Raw(&[2, 11, 8, 3, 5, 4, 2, 2, 2, 4]), // panose
        UInt32(0xE0000AFF), UInt32(0x4000207B), UInt32(0), UInt32(0), // unicode ranges
        Tag(b"ADBO"), // vendor ID
        UInt16(0x00A1), // fs selection: italic, bold, use typo metrics
        UInt16(0x0020), // first char index
        UInt16(0xFFFC), // last char index
        Int16(750), // typo ascender
        Int16(-250), // typo descender
        Int16(200), // typo line gap
        UInt16(950), // win ascent
        UInt16(300), // win descent
    ])
}

pub fn version_0() -> Vec<u8> {
    version_0_units(0)
}

fn version_5() -> Vec<u8> {
    let mut data = version_0_units(5);
    data.extend(convert(&[
        UInt32(0x2000019F), UInt32(0xDFD70000), // code page ranges
        Int16(480), // x height
        Int16(680), // cap height
        UInt16(0), // default char
        UInt16(0x0020), // break char
        UInt16(3), // max context
        UInt16(0), // lower optical point size
        UInt16(0xFFFF), // upper optical point size
    ]));
    data
}

#[test]
fn version_0_fields() {
    let data = version_0();
    assert_eq!(data.len(), 78);

    let table = Table::parse(&data).unwrap();
    assert_eq!(table.version, 0);
    assert_eq!(table.x_avg_char_width, 520);
    assert_eq!(table.weight(), Weight::Bold);
    assert_eq!(table.width(), Width::Condensed);
    assert_eq!(table.fs_type, Permissions(0x0108));
    assert_eq!(table.fs_type.description(), "Editable-embedding no-subset ");
    assert_eq!(table.subscript, ScriptMetrics { x_size: 650, y_size: 600, x_offset: 0, y_offset: 75 });
    assert_eq!(table.superscript.y_offset, 350);
    assert_eq!(table.strikeout_size, 50);
    assert_eq!(table.strikeout_position, 300);
    assert_eq!(table.family_class, 0x0801);
    assert_eq!(table.vendor_id, tag(b"ADBO"));
    assert_eq!(table.first_char_index, 0x0020);
    assert_eq!(table.last_char_index, 0xFFFC);
    assert_eq!(table.typo_ascender, 750);
    assert_eq!(table.typo_descender, -250);
    assert_eq!(table.typo_line_gap, 200);
    assert_eq!(table.win_ascent, 950);
    assert_eq!(table.win_descent, 300);
    assert_eq!(table.code_page_range, None);
    assert_eq!(table.v2, None);
    assert_eq!(table.optical_point_size, None);
}

#[test]
fn selection_flags() {
    let table = Table::parse(&version_0()).unwrap();
    assert!(table.is_italic());
    assert!(table.is_bold());
    assert!(!table.is_regular());
    // Version 4 flags are ignored in older tables.
    assert!(!table.use_typo_metrics());

    let table = Table::parse(&version_5()).unwrap();
    assert!(table.use_typo_metrics());
    assert!(!table.is_oblique());
}

#[test]
fn version_5_fields() {
    let data = version_5();
    assert_eq!(data.len(), 100);

    let table = Table::parse(&data).unwrap();
    assert_eq!(table.version, 5);
    assert_eq!(table.code_page_range, Some([0x2000019F, 0xDFD70000]));
    assert_eq!(table.v2, Some(Os2V2 {
        x_height: 480,
        cap_height: 680,
        default_char: 0,
        break_char: 0x0020,
        max_context: 3,
    }));
    assert_eq!(table.optical_point_size, Some((0, 0xFFFF)));
}

#[test]
fn version_gated_fields() {
    // A version 1 table doesn't have version 2 fields, even when the data is there.
    let mut data = version_5();
    data[0..2].copy_from_slice(&[0x00, 0x01]);

    let table = Table::parse(&data).unwrap();
    assert!(table.code_page_range.is_some());
    assert_eq!(table.v2, None);
    assert_eq!(table.optical_point_size, None);
}

#[test]
fn short_version_5() {
    // Some fonts declare a newer version than the data they have.
    let data = version_5();
    let table = Table::parse(&data[..86]).unwrap();
    assert!(table.code_page_range.is_some());
    assert_eq!(table.v2, None);
    assert_eq!(table.optical_point_size, None);
}

#[test]
fn truncated_version_0() {
    let data = version_0();
    assert_eq!(Table::parse(&data[..77]).unwrap_err(), Error::UnexpectedEof { offset: 76, size: 2 });
}
