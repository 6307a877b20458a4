use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;

const ALLOWED_EXTS: [&str; 5] = ["pdf", "doc", "docx", "txt", "rtf"];

/// Persists an uploaded document under `<uploads_dir>/<kind>/` with a
/// fresh UUID name, keeping only the (allow-listed) extension from the
/// client filename. Returns the stored path.
pub async fn save_upload(kind: &str, filename: &str, data: &bytes::Bytes) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    if !ALLOWED_EXTS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }

    let upload_dir = format!("{}/{}", crate::config::get_config().uploads_dir, kind);
    fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    let file_id = uuid::Uuid::new_v4();
    let file_path = format!("{}/{}.{}", upload_dir, file_id, ext);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write upload {}: {}", file_path, e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok(file_path)
}
