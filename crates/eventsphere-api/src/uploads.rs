use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::error::ApiError;

/// Name under which an uploaded file is stored: `<unix-millis>-<name>`,
/// with directory parts stripped and anything outside `[A-Za-z0-9._-]`
/// replaced by `_`.
pub fn stored_name(original: &str, timestamp_ms: i64) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut clean: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if clean.trim_matches('.').is_empty() {
        clean = "upload".to_string();
    }

    format!("{}-{}", timestamp_ms, clean)
}

/// Write an uploaded file into `dir` and return the stored name.
pub async fn save(dir: &Path, original: &str, data: &[u8]) -> Result<String, ApiError> {
    let name = stored_name(original, chrono::Utc::now().timestamp_millis());
    let path = dir.join(&name);

    fs::create_dir_all(dir).await.map_err(|source| ApiError::Upload {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, data)
        .await
        .map_err(|source| ApiError::Upload { path, source })?;

    info!("Saved upload {} ({} bytes)", name, data.len());
    Ok(name)
}

/// Remove a stored upload whose account was never created.
pub async fn discard(dir: &Path, name: &str) {
    let path = dir.join(name);
    if let Err(e) = fs::remove_file(&path).await {
        warn!("Failed to remove orphaned upload {}: {}", path.display(), e);
    }
}
