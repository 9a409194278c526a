//! Zip fixtures.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write a zip archive at `path` holding `entries` as `(name, content)`.
///
/// Names ending in `/` become directory entries. Names are written verbatim,
/// so hostile entries such as `../evil.vim` can be produced on purpose.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path)
        .unwrap_or_else(|e| panic!("write_zip: cannot create {}: {e}", path.display()));
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap();
}
