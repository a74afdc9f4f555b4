use std::path::PathBuf;

const HELP: &str = "\
USAGE:
    font-info [OPTIONS] <FONT-FILE>

OPTIONS:
    -h, --help                          Show help options
        --face-index INDEX              Print only a single font of a collection
        --all-names                     Print every name group, not only the canonical one

ARGS:
    <FONT-FILE>                         A TrueType, OpenType or TrueType Collection file

Set RUST_LOG=warn to see parsing warnings.
";

struct Args {
    help: bool,
    face_index: Option<usize>,
    all_names: bool,
    font_file: Option<PathBuf>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let args = Args {
        help: args.contains(["-h", "--help"]),
        face_index: args.opt_value_from_str("--face-index")?,
        all_names: args.contains("--all-names"),
        font_file: args.opt_free_from_str()?,
    };

    Ok(args)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    if args.help {
        print!("{}", HELP);
        return;
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = match args.font_file {
        Some(ref path) => path,
        None => {
            print!("{}", HELP);
            std::process::exit(1);
        }
    };

    let data = std::fs::read(path)?;

    let now = std::time::Instant::now();
    let collection = sfnt_meta::Collection::new(&data)?;
    if collection.is_collection() {
        println!("Collection with {} fonts", collection.len());
    }

    for (index, font) in collection.fonts().enumerate() {
        if args.face_index.map_or(false, |i| i != index) {
            continue;
        }

        println!("Font {} at offset {}:", index, collection.offsets()[index]);
        match font {
            Ok(font) => print_font(&font, args.all_names),
            Err(e) => println!("  Error: {}.", e),
        }
    }

    println!("Elapsed: {:.6}s", now.elapsed().as_secs_f64());

    Ok(())
}

fn print_font(font: &sfnt_meta::FontDescriptor, all_names: bool) {
    let tags: Vec<_> = font.tables().keys().map(|t| t.to_string()).collect();
    println!("  Tables: {}", tags.join(", "));
    println!("  Family name: {:?}", font.family_name());
    println!("  PostScript name: {:?}", font.post_script_name());

    if let Some(names) = font.names() {
        for group in names.groups() {
            let is_canonical = names.canonical() == Some(group);
            if !all_names && !is_canonical {
                continue;
            }

            println!("  Names (platform {}, language {:#06X}){}:",
                     group.platform_id, group.language_id,
                     if is_canonical { ", canonical" } else { "" });
            for (field, text) in &group.fields {
                println!("    {}: {:?}", field, text);
            }
        }
    }

    if let Some(head) = font.head() {
        println!("  Revision: {}", head.font_revision);
        println!("  Units per EM: {}", head.units_per_em);
        println!("  Bounding box: {:?}", head.global_bbox);
    }

    if let Some(hhea) = font.hhea() {
        println!("  Ascender: {}", hhea.ascender);
        println!("  Descender: {}", hhea.descender);
        println!("  Line gap: {}", hhea.line_gap);
    }

    if let Some(maxp) = font.maxp() {
        println!("  Number of glyphs: {}", maxp.number_of_glyphs);
    }

    if let Some(os2) = font.os2() {
        println!("  Vendor: {}", os2.vendor_id);
        println!("  Weight: {:?}", os2.weight());
        println!("  Width: {:?}", os2.width());
        println!("  Embedding: {}", os2.fs_type.description().trim_end());
        if let Some(v2) = os2.v2 {
            println!("  X height: {}", v2.x_height);
            println!("  Cap height: {}", v2.cap_height);
        }
    }

    if let Some(meta) = font.meta() {
        for (tag, text) in &meta.data_maps {
            println!("  Meta {}: {:?}", tag, text);
        }
    }

    println!("  Scripts: {}", join(font.scripts()));
    println!("  Languages: {}", join(font.languages()));
    println!("  Features: {}", join(font.features()));
}

fn join(tags: &std::collections::BTreeSet<sfnt_meta::Tag>) -> String {
    tags.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
}
