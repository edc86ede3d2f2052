//! Writing the downloaded image to disk.
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything after the last `/` of the URL. No URL parsing is done, so a
/// query string or fragment stays part of the name.
pub fn file_name_from_url(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}

/// Writes `bytes` to `dir/<final segment of url>`, replacing any existing file.
pub fn save_image(dir: &Path, url: &str, bytes: &[u8]) -> Result<PathBuf> {
    let file_name = file_name_from_url(url);
    if file_name.is_empty() {
        return Err(anyhow!("Image URL has no file name: {}", url));
    }
    let dst = dir.join(file_name);

    let mut file =
        File::create(&dst).with_context(|| format!("Unable to create {}", dst.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Unable to write {}", dst.display()))?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), dst.display());

    Ok(dst)
}
