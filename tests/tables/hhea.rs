use sfnt_meta::Error;
use sfnt_meta::tables::hhea::Table;
use crate::{convert, Unit::*};

#[test]
fn basic() {
    let data = convert(&[
        Fixed(1.0), // version: 1
        Int16(800), // ascender
        Int16(-200), // descender
        Int16(90), // line gap
        UInt16(1200), // advance width max
        Int16(-50), // min left side bearing
        Int16(-60), // min right side bearing
        Int16(1150), // x max extent
        Int16(1), // caret slope rise
        Int16(0), // caret slope run
        Int16(0), // caret offset
        Int16(0), Int16(0), Int16(0), Int16(0), // reserved
        Int16(0), // metric data format
        UInt16(250), // number of h metrics
    ]);

    let table = Table::parse(&data).unwrap();
    assert_eq!(table.version.0, 1.0);
    assert_eq!(table.ascender, 800);
    assert_eq!(table.descender, -200);
    assert_eq!(table.line_gap, 90);
    assert_eq!(table.advance_width_max, 1200);
    assert_eq!(table.min_left_side_bearing, -50);
    assert_eq!(table.min_right_side_bearing, -60);
    assert_eq!(table.x_max_extent, 1150);
}

#[test]
fn truncated() {
    let data = convert(&[
        Fixed(1.0), // version: 1
        Int16(800), // ascender
        Int16(-200), // descender
        Int16(90), // line gap
        UInt16(1200), // advance width max
        Int16(-50), // min left side bearing
        Int16(-60), // min right side bearing
    ]);

    assert_eq!(Table::parse(&data).unwrap_err(), Error::UnexpectedEof { offset: 16, size: 2 });
}
