#[macro_use]
extern crate afl;

fn main() {
    afl::fuzz!(|data: &[u8]| {
        let _ = sfnt_meta::fonts_in_collection(data);

        if let Ok(collection) = sfnt_meta::Collection::new(data) {
            for font in collection.fonts().flatten() {
                let _ = font.family_name();
                let _ = font.post_script_name();
                let _ = font.features().len();
                if let Some(names) = font.names() {
                    let _ = names.groups().iter().map(|g| g.fields.len()).sum::<usize>();
                }
            }
        }
    });
}
