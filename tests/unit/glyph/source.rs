use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "kakijun_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn file_names_cover_padding_variants() {
    assert_eq!(
        glyph_file_names('水'),
        vec!["u06c34.svg", "u6c34.svg", "06c34.svg", "6c34.svg"]
    );
    assert_eq!(
        glyph_file_names('A'),
        vec!["u00041.svg", "u0041.svg", "u41.svg", "00041.svg", "0041.svg", "41.svg"]
    );
}

#[test]
fn dir_source_searches_roots_in_order() {
    let tmp = temp_dir("dir_source_roots");
    let first = tmp.join("svg");
    let second = tmp.join("kanjivg");
    std::fs::create_dir_all(&first).unwrap();
    std::fs::create_dir_all(&second).unwrap();
    std::fs::write(second.join("06c34.svg"), "second").unwrap();
    std::fs::write(second.join("05c71.svg"), "second-yama").unwrap();
    std::fs::write(first.join("u05c71.svg"), "first-yama").unwrap();

    let source = DirGlyphSource::new(&first).with_root(&second);
    assert_eq!(source.roots().len(), 2);
    assert_eq!(source.fetch_glyph('水').unwrap(), "second");
    assert_eq!(source.fetch_glyph('山').unwrap(), "first-yama");
    assert_eq!(source.fetch_glyph('火'), Err(FetchError::NotFound('火')));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn memory_source_returns_registered_docs() {
    let mut source = MemoryGlyphSource::new();
    source.insert('一', "<svg/>");
    assert_eq!(source.fetch_glyph('一').unwrap(), "<svg/>");
    assert_eq!(source.fetch_glyph('二'), Err(FetchError::NotFound('二')));

    let boxed: Box<dyn GlyphSource> = Box::new(source.clone().with('二', "two"));
    assert_eq!(boxed.fetch_glyph('二').unwrap(), "two");
    assert_eq!((&source).fetch_glyph('一').unwrap(), "<svg/>");
}
