use crate::errors::AppError;
use crate::models::SessionRecord;
use crate::session::Session;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_session_path() -> PathBuf {
    if let Ok(path) = env::var("ARCHIVE_SESSION_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/session.json")
}

/// Reads the cookie jar. Anything unreadable counts as a guest session.
pub async fn load_session(path: &Path) -> Session {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<SessionRecord>(&bytes) {
            Ok(record) => Session::from_record(record),
            Err(err) => {
                error!("failed to parse session file: {err}");
                Session::guest()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Session::guest(),
        Err(err) => {
            error!("failed to read session file: {err}");
            Session::guest()
        }
    }
}

pub async fn persist_session(path: &Path, session: &Session) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(session.record()).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}
