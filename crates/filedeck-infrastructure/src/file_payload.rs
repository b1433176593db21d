//! Upload payloads built from local files.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use filedeck_core::error::{FileDeckError, Result};
use filedeck_core::files::NewFileRecord;

/// Reads `path` and describes it as a [`NewFileRecord`].
///
/// The payload carries `name`, `size`, `type` (guessed from the extension)
/// and `lastModified` in epoch milliseconds. With `include_content` the
/// bytes are embedded as a base64 `data:` URL under `content`.
pub async fn payload_from_path(path: &Path, include_content: bool) -> Result<NewFileRecord> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        FileDeckError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(FileDeckError::io(format!(
            "{} is not a regular file",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| FileDeckError::io(format!("{} has no file name", path.display())))?;
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let mut record = NewFileRecord::new(name, metadata.len()).with_field("type", mime.clone());

    if let Ok(modified) = metadata.modified() {
        let modified: DateTime<Utc> = modified.into();
        record = record.with_field("lastModified", modified.timestamp_millis());
    }

    if include_content {
        let bytes = tokio::fs::read(path).await?;
        record = record.with_field("content", data_url(&mime, &bytes));
    }

    tracing::debug!(
        "[Payload] {} ({}, {} bytes, content: {})",
        record.name,
        mime,
        record.size,
        include_content
    );
    Ok(record)
}

fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
