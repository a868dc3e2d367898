use console::style;

use crate::metadata::MetadataMap;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print the registered metadata as an aligned key/value listing
pub fn display_metadata(metadata: &MetadataMap) {
    let width = metadata
        .iter()
        .map(|(key, _)| key.key().len())
        .max()
        .unwrap_or(0);

    for (key, value) in metadata.iter() {
        let padded = format!("{:<width$}", key.key(), width = width);
        println!("  {}  {}", style(padded).bold(), value);
    }
}
