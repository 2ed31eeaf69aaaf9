use std::path::{Component, Path, PathBuf};

use chrono::Local;
use models::animal;
use tokio::fs;
use tracing::{error, info, warn};

use super::{content_type_for, render, ExportFormat};
use crate::errors::ServiceError;

/// A previously generated export read back from disk.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export files kept under a single directory.
///
/// Files are named `animals_<yyyyMMdd_HHmmss>.<ext>` and never removed.
/// Two exports of the same format within one second share a name and the
/// later one overwrites the earlier.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the export directory, creating it if missing.
    pub async fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, ServiceError> {
        let dir = dir.into();
        let storage = Self { dir };
        storage.ensure_dir().await?;
        Ok(storage)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn ensure_dir(&self) -> Result<(), ServiceError> {
        if fs::metadata(&self.dir).await.is_err() {
            fs::create_dir_all(&self.dir).await.map_err(|e| {
                error!(dir = %self.dir.display(), err = %e, "cannot create storage directory");
                ServiceError::Io(e.to_string())
            })?;
            info!(dir = %self.dir.display(), "created storage directory");
        }
        Ok(())
    }

    /// Render `animals` and write them to a new timestamped file; returns its path.
    pub async fn export(&self, format: ExportFormat, animals: &[animal::Model]) -> Result<String, ServiceError> {
        self.ensure_dir().await?;
        let now = Local::now();
        let filename = format!("animals_{}.{}", now.format("%Y%m%d_%H%M%S"), format.extension());
        let path = self.dir.join(&filename);

        let bytes = render::render(format, animals, now)?;
        fs::write(&path, bytes).await.map_err(|e| {
            error!(path = %path.display(), err = %e, "export write failed");
            ServiceError::Io(e.to_string())
        })?;
        info!(count = animals.len(), path = %path.display(), format = format.extension(), "animals exported");
        Ok(path.to_string_lossy().into_owned())
    }

    /// Bare names of the regular files in the directory, in enumeration order.
    pub async fn list_files(&self) -> Vec<String> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(rd) => rd,
            Err(e) => {
                warn!(dir = %self.dir.display(), err = %e, "cannot list storage directory");
                return Vec::new();
            }
        };
        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
                    if is_file {
                        names.push(entry.file_name().to_string_lossy().into_owned());
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %self.dir.display(), err = %e, "error while listing storage directory");
                    break;
                }
            }
        }
        names
    }

    /// Map a requested name to a path inside the directory.
    ///
    /// Only a single plain path component is accepted, so `..`, separators
    /// and absolute paths never leave the storage directory.
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let mut parts = Path::new(filename).components();
        match (parts.next(), parts.next()) {
            (Some(Component::Normal(name)), None) => Some(self.dir.join(name)),
            _ => None,
        }
    }

    /// Resolved path of an existing regular file that really lives in the directory.
    async fn locate(&self, filename: &str) -> Option<PathBuf> {
        let path = self.resolve(filename)?;
        let meta = fs::metadata(&path).await.ok()?;
        if !meta.is_file() {
            return None;
        }
        // symlinks could still point elsewhere
        let root = fs::canonicalize(&self.dir).await.ok()?;
        let real = fs::canonicalize(&path).await.ok()?;
        real.starts_with(&root).then_some(real)
    }

    pub async fn exists(&self, filename: &str) -> bool {
        self.locate(filename).await.is_some()
    }

    /// Read a stored file back; NotFound for unknown or out-of-directory names.
    pub async fn load(&self, filename: &str) -> Result<ExportedFile, ServiceError> {
        let Some(path) = self.locate(filename).await else {
            warn!(%filename, "export file not found");
            return Err(ServiceError::NotFound(format!("file {} not found", filename)));
        };
        let bytes = fs::read(&path).await?;
        Ok(ExportedFile {
            filename: filename.to_string(),
            content_type: content_type_for(filename),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_storage_dir;

    fn sample() -> Vec<animal::Model> {
        vec![
            animal::Model { id: 1, name: "Leo".into(), species: "Lion".into(), age: 5, created_at: None, updated_at: None, name_lc: String::new(), species_lc: String::new() },
            animal::Model { id: 2, name: "Dumbo".into(), species: "Elephant".into(), age: 12, created_at: None, updated_at: None, name_lc: String::new(), species_lc: String::new() },
            animal::Model { id: 3, name: "Marty".into(), species: "Zebra".into(), age: 7, created_at: None, updated_at: None, name_lc: String::new(), species_lc: String::new() },
        ]
    }

    #[tokio::test]
    async fn new_creates_missing_directory() -> Result<(), anyhow::Error> {
        let dir = temp_storage_dir();
        assert!(fs::metadata(&dir).await.is_err());
        let storage = FileStorage::new(&dir).await?;
        assert!(fs::metadata(storage.dir()).await?.is_dir());
        assert!(storage.list_files().await.is_empty());
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn export_writes_timestamped_files() -> Result<(), anyhow::Error> {
        let dir = temp_storage_dir();
        let storage = FileStorage::new(&dir).await?;
        let animals = sample();

        for format in ExportFormat::ALL {
            let path = storage.export(format, &animals).await?;
            let path = PathBuf::from(path);
            assert_eq!(path.parent(), Some(dir.as_path()));
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.starts_with("animals_"));
            assert!(name.ends_with(&format!(".{}", format.extension())));
            // animals_ + yyyyMMdd_HHmmss + . + ext
            assert_eq!(name.len(), "animals_".len() + 15 + 1 + format.extension().len());

            let text = fs::read_to_string(&path).await?;
            match format {
                ExportFormat::Json => {
                    let rows: Vec<serde_json::Value> = serde_json::from_str(&text)?;
                    assert_eq!(rows.len(), animals.len());
                }
                ExportFormat::Csv => assert_eq!(text.lines().count(), animals.len() + 1),
                ExportFormat::Txt => {
                    let entries = text.lines().filter(|l| l.ends_with(" лет")).count();
                    assert_eq!(entries, animals.len());
                }
            }
        }

        let mut files = storage.list_files().await;
        files.sort();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| !f.contains('/')));
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn export_recreates_deleted_directory() -> Result<(), anyhow::Error> {
        let dir = temp_storage_dir();
        let storage = FileStorage::new(&dir).await?;
        fs::remove_dir_all(&dir).await?;
        storage.export(ExportFormat::Txt, &sample()).await?;
        assert_eq!(storage.list_files().await.len(), 1);
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn load_returns_bytes_and_content_type() -> Result<(), anyhow::Error> {
        let dir = temp_storage_dir();
        let storage = FileStorage::new(&dir).await?;
        let path = storage.export(ExportFormat::Csv, &sample()).await?;
        let name = PathBuf::from(&path).file_name().unwrap().to_string_lossy().into_owned();

        assert!(storage.exists(&name).await);
        let file = storage.load(&name).await?;
        assert_eq!(file.content_type, "text/csv");
        assert_eq!(file.bytes, fs::read(&path).await?);
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn load_rejects_traversal_and_missing_files() -> Result<(), anyhow::Error> {
        let base = temp_storage_dir();
        let dir = base.join("exports");
        let storage = FileStorage::new(&dir).await?;
        fs::write(base.join("secret.txt"), b"top secret").await?;
        fs::create_dir_all(dir.join("sub")).await?;

        for name in ["../secret.txt", "sub/../../secret.txt", "/etc/passwd", "", ".", "..", "sub", "missing.json"] {
            assert!(!storage.exists(name).await, "{name} should not resolve");
            assert!(matches!(storage.load(name).await, Err(ServiceError::NotFound(_))), "{name} should be not found");
        }
        let _ = fs::remove_dir_all(&base).await;
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn load_rejects_symlink_escaping_directory() -> Result<(), anyhow::Error> {
        let base = temp_storage_dir();
        let dir = base.join("exports");
        let storage = FileStorage::new(&dir).await?;
        fs::write(base.join("secret.txt"), b"top secret").await?;
        fs::symlink(base.join("secret.txt"), dir.join("link.txt")).await?;

        assert!(matches!(storage.load("link.txt").await, Err(ServiceError::NotFound(_))));
        let _ = fs::remove_dir_all(&base).await;
        Ok(())
    }
}
