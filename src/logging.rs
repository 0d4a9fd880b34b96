// =============================================================================
// logging.rs - Journal fichier de l'application
// logging.rs - Application file logger
// =============================================================================

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

use crate::config;
use crate::error::{Result, RgbaError};

struct FileLogger {
    file: Mutex<fs::File>,
}

impl FileLogger {
    fn new(file_path: &Path) -> io::Result<Self> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Le journal précédent est écrasé à chaque lancement
        // The previous log is overwritten on every launch
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path)?;

        Ok(FileLogger {
            file: Mutex::new(file),
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{}] [{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
            let _ = file.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Chemin du journal dans les données locales de l'application
/// Log path inside the application's local data
pub fn log_file_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir().ok_or(RgbaError::NoConfigDir)?;
    Ok(data_dir.join(config::APP_NAME).join(config::LOG_FILE))
}

/// Installe le journal fichier au niveau `Info`
/// Installs the file logger at `Info` level
pub fn init_logger() -> Result<PathBuf> {
    let path = log_file_path()?;
    init_logger_at(&path)?;
    Ok(path)
}

/// Installe le journal dans un fichier donné (tests, emplacement personnalisé)
/// Installs the logger on a given file (tests, custom location)
///
/// The file is truncated. Only the first logger installed in the process
/// takes effect; later calls still open the file but are otherwise ignored.
pub fn init_logger_at(path: &Path) -> Result<()> {
    let logger = FileLogger::new(path)
        .map_err(|e| RgbaError::io(format!("Failed to open log file {}", path.display()), e))?;

    // Un seul logger par processus; un second appel est ignoré
    // One logger per process; a second call is ignored
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
    Ok(())
}
