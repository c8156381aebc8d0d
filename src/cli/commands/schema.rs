//! Schema command handler

use crate::args::SchemaFormat;
use logger::error;
use unihub::core::schema::Schema;
use std::path::Path;

/// Print the schema catalogue, or write it to `output`
pub fn run(format: SchemaFormat, output: Option<&Path>) {
    let schema = Schema::unihub();
    let rendered = match format {
        SchemaFormat::Text => schema.render_text(),
        SchemaFormat::Markdown => schema.render_markdown(),
    };

    match output {
        None => print!("{rendered}"),
        Some(path) => match std::fs::write(path, rendered) {
            Ok(()) => println!("✓ Schema written: {}", path.display()),
            Err(e) => {
                error!("Failed to write {}: {e}", path.display());
                eprintln!("✗ Failed to write {}: {e}", path.display());
            }
        },
    }
}
