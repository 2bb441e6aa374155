use std::io;
use std::path::Path;

/// Read a text file and return its trimmed contents, or `None` if the
/// file does not exist. An empty (or whitespace-only) file reads as `None`.
pub fn read_trimmed_if_exists(path: &Path) -> Result<Option<String>, io::Error> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

/// Write text to a file atomically: write to a sibling temp file, then
/// rename over the target. Readers always see either the previous
/// complete contents or the new complete contents, never a partial write.
pub fn write_text_atomic(path: &Path, contents: &str) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Append a single line to a log file, creating it (and its parent
/// directory) if needed.
pub fn append_line(path: &Path, line: &str) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
