use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Save data to a file using JSON serialization
pub fn save_to_file<T: Serialize>(data: &T, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}
