use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Opens `path` for appending. Later calls replace the target file.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    if let Ok(mut logger) = LOGGER.lock() {
        *logger = Some(file);
    }
    Ok(())
}

/// Writes one timestamped line. Silently does nothing before [`init`].
pub fn log(message: &str) {
    if let Ok(mut logger) = LOGGER.lock() {
        if let Some(file) = logger.as_mut() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {}", timestamp, message);
        }
    }
}
