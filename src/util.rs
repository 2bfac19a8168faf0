use crate::error::{ChatError, ChatResult};
use std::path::Path;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).try_init();
    });
}

/// Read an export from disk as raw bytes; decoding happens in the dataset layer.
pub fn read_export(path: &Path) -> ChatResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| ChatError::Io { path: path.to_path_buf(), source })
}
