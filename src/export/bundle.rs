//! Zip packaging for decomposed projects

use std::io::{Cursor, Write};

use zip::write::FileOptions;

use crate::export::decompose::{ProjectBundle, SCRIPT_PATH, STYLESHEET_PATH};

const INDEX_HTML: &str = "index.html";
const ASSETS_DIR: &str = "assets";
const README_MD: &str = "README.md";

/// Suggested download filename for a project archive
pub fn zip_filename(slug: &str) -> String {
    format!("{}-project.zip", slug)
}

/// Serialize a [`ProjectBundle`] into an in-memory zip archive.
///
/// All entries live under a top-level directory named after the slug, so the
/// archive expands into a self-contained project folder.
pub fn write_project_zip(bundle: &ProjectBundle) -> anyhow::Result<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let root = &bundle.slug;

    zip.start_file(format!("{root}/{INDEX_HTML}"), options)?;
    zip.write_all(bundle.index_html.as_bytes())?;

    zip.start_file(format!("{root}/{STYLESHEET_PATH}"), options)?;
    zip.write_all(bundle.stylesheet.as_bytes())?;

    zip.start_file(format!("{root}/{SCRIPT_PATH}"), options)?;
    zip.write_all(bundle.script.as_bytes())?;

    // Empty placeholder so the expanded project has somewhere for images
    zip.add_directory(format!("{root}/{ASSETS_DIR}"), options)?;

    zip.start_file(format!("{root}/{README_MD}"), options)?;
    zip.write_all(bundle.readme.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
