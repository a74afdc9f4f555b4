use sfnt_meta::{Error, LayoutTags};
use sfnt_meta::tables::ggg::{LayoutTable, MAX_RECORDS};
use crate::{convert, layout_table, logger, tag, Unit::*};

fn parse(data: &[u8]) -> (LayoutTable, LayoutTags) {
    let mut tags = LayoutTags::default();
    let table = LayoutTable::parse(data, &mut tags).unwrap();
    (table, tags)
}

#[test]
fn basic() {
    let data = layout_table(
        &[(b"DFLT", &[]), (b"latn", &[b"DEU ", b"TRK "])],
        &[b"kern", b"liga"],
    );

    let (table, tags) = parse(&data);
    assert_eq!(table.major_version, 1);
    assert_eq!(table.minor_version, 0);
    assert_eq!(table.scripts.len(), 2);
    assert!(table.scripts[&tag(b"DFLT")].languages.is_empty());
    assert_eq!(table.scripts[&tag(b"latn")].languages.len(), 2);
    assert!(!table.scripts[&tag(b"latn")].has_default_language_system);
    assert_eq!(table.features.len(), 2);

    assert!(tags.scripts.contains(&tag(b"latn")));
    assert!(tags.languages.contains(&tag(b"TRK ")));
    assert!(tags.features.contains(&tag(b"liga")));
}

#[test]
fn null_offsets() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(0), // script list offset: none
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none
    ]);

    let (table, tags) = parse(&data);
    assert!(table.scripts.is_empty());
    assert!(table.features.is_empty());
    assert_eq!(tags, LayoutTags::default());
}

#[test]
fn default_language_system() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none

        // Script List
        UInt16(1), // count: 1
        Tag(b"latn"), UInt16(8), // script record [0]

        // Script Table
        UInt16(4), // default language system offset: 4
        UInt16(0), // language system count: 0
        UInt16(0), // feature indices
    ]);

    let (table, _) = parse(&data);
    assert!(table.scripts[&tag(b"latn")].has_default_language_system);
}

#[test]
fn duplicated_scripts_are_merged() {
    let data = layout_table(
        &[(b"latn", &[b"DEU "]), (b"latn", &[b"TRK "])],
        &[],
    );

    let (table, tags) = parse(&data);
    assert_eq!(table.scripts.len(), 1);
    assert_eq!(table.scripts[&tag(b"latn")].languages.len(), 2);
    assert_eq!(tags.scripts.len(), 1);
    assert_eq!(tags.languages.len(), 2);
}

#[test]
fn huge_script_count() {
    // Claims 65535 scripts, while only 3 records are present.
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none

        // Script List
        UInt16(0xFFFF), // count: 65535
        Tag(b"arab"), UInt16(20), // script record [0]
        Tag(b"cyrl"), UInt16(20), // script record [1]
        Tag(b"latn"), UInt16(20), // script record [2]

        // Script Table
        UInt16(0), // default language system offset: none
        UInt16(0), // language system count: 0
    ]);

    let (result, messages) = logger::capture(|| parse(&data));
    let (table, tags) = result;
    // The script table itself is 4 bytes, so the fourth record is never read.
    assert_eq!(table.scripts.len(), 3);
    assert_eq!(tags.scripts.len(), 3);
    if cfg!(feature = "logging") {
        assert_eq!(messages, vec!["Script list declares 256 records, but only 3 fit into the table.".to_string()]);
    }
}

#[test]
fn script_count_is_clamped() {
    let mut units = vec![
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none

        UInt16(300), // count: 300
    ];

    // All records point to a single script table right after the records.
    let script_offset = 2 + 300 * 6;
    for _ in 0..300 {
        units.push(Raw(b"latn"));
        units.push(UInt16(script_offset as u16));
    }
    units.push(UInt16(0)); // default language system offset: none
    units.push(UInt16(0)); // language system count: 0

    let mut data = convert(&units);
    // Make script tags unique.
    for i in 0..300 {
        let pos = 12 + i * 6;
        data[pos + 2] = (i >> 8) as u8 + b'A';
        data[pos + 3] = (i & 0xFF) as u8;
    }

    let (result, messages) = logger::capture(|| parse(&data));
    let (table, _) = result;
    assert_eq!(table.scripts.len(), MAX_RECORDS);
    // The clamp itself is silent.
    assert!(messages.is_empty());
}

#[test]
fn language_count_is_clamped() {
    let mut units = vec![
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none

        // Script List
        UInt16(1), // count: 1
        Tag(b"latn"), UInt16(8), // script record [0]

        // Script Table
        UInt16(0), // default language system offset: none
        UInt16(1000), // language system count: 1000
    ];

    for _ in 0..1000 {
        units.push(Raw(b"lang"));
        units.push(UInt16(0));
    }

    let mut data = convert(&units);
    for i in 0..1000 {
        let pos = 22 + i * 6;
        data[pos + 2] = (i >> 8) as u8 + b'A';
        data[pos + 3] = (i & 0xFF) as u8;
    }

    let (table, tags) = parse(&data);
    assert_eq!(table.scripts[&tag(b"latn")].languages.len(), MAX_RECORDS);
    assert_eq!(tags.languages.len(), MAX_RECORDS);
}

#[test]
fn feature_count_is_not_clamped() {
    let mut units = vec![
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(0), // script list offset: none
        UInt16(10), // feature list offset: 10
        UInt16(0), // lookup list offset: none

        UInt16(300), // count: 300
    ];

    for _ in 0..300 {
        units.push(Raw(b"ss00"));
        units.push(UInt16(0));
    }

    let mut data = convert(&units);
    for i in 0..300 {
        let pos = 12 + i * 6;
        data[pos + 2] = (i >> 8) as u8 + b'A';
        data[pos + 3] = (i & 0xFF) as u8;
    }

    let (table, tags) = parse(&data);
    assert_eq!(table.features.len(), 300);
    assert_eq!(tags.features.len(), 300);
}

#[test]
fn feature_count_truncated_by_data() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(0), // script list offset: none
        UInt16(10), // feature list offset: 10
        UInt16(0), // lookup list offset: none

        // Feature List
        UInt16(0xFFFF), // count: 65535
        Tag(b"kern"), UInt16(0), // feature record [0]
        Tag(b"liga"), UInt16(0), // feature record [1]
    ]);

    let (result, messages) = logger::capture(|| parse(&data));
    let (table, tags) = result;
    let features: Vec<_> = table.features.iter().map(|t| t.to_string()).collect();
    assert_eq!(features, vec!["kern", "liga"]);
    assert_eq!(tags.features, table.features);
    if cfg!(feature = "logging") {
        assert_eq!(messages, vec!["Feature list declares 65535 records, but only 2 fit into the table.".to_string()]);
    }
}

#[test]
fn language_count_truncated_by_data() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none

        // Script List
        UInt16(1), // count: 1
        Tag(b"latn"), UInt16(8), // script record [0]

        // Script Table
        UInt16(0), // default language system offset: none
        UInt16(0xFFFF), // language system count: 65535
        Tag(b"DEU "), UInt16(0), // language system record [0]
    ]);

    let (result, messages) = logger::capture(|| parse(&data));
    let (table, tags) = result;
    let languages: Vec<_> = table.scripts[&tag(b"latn")].languages.iter().map(|t| t.to_string()).collect();
    assert_eq!(languages, vec!["DEU "]);
    assert_eq!(tags.languages.len(), 1);
    if cfg!(feature = "logging") {
        assert_eq!(messages, vec!["Script table declares 256 records, but only 1 fit into the table.".to_string()]);
    }
}

#[test]
fn script_list_out_of_bounds() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(100), // script list offset: 100
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none
    ]);

    let mut tags = LayoutTags::default();
    assert_eq!(LayoutTable::parse(&data, &mut tags).unwrap_err(),
               Error::UnexpectedEof { offset: 100, size: 2 });
}

#[test]
fn script_table_out_of_bounds() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
        UInt16(0), // feature list offset: none
        UInt16(0), // lookup list offset: none

        // Script List
        UInt16(1), // count: 1
        Tag(b"latn"), UInt16(200), // script record [0]
    ]);

    let mut tags = LayoutTags::default();
    assert_eq!(LayoutTable::parse(&data, &mut tags).unwrap_err(),
               Error::UnexpectedEof { offset: 210, size: 2 });
}

#[test]
fn truncated_header() {
    let data = convert(&[
        UInt16(1), // major version
        UInt16(0), // minor version
        UInt16(10), // script list offset: 10
    ]);

    let mut tags = LayoutTags::default();
    assert_eq!(LayoutTable::parse(&data, &mut tags).unwrap_err(),
               Error::UnexpectedEof { offset: 6, size: 2 });
}
