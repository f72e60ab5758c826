// src/sheets/database/mod.rs

pub mod checkpoint;
pub mod connection;
pub mod error;
pub mod reader;
pub mod schema;
pub mod workbook;
pub mod writer;

pub use connection::DbConnection;
pub use error::{DbError, DbResult};
pub use reader::DbReader;
pub use workbook::{Sheet, Workbook};
pub use writer::DbWriter;

use std::path::{Path, PathBuf};

const WORKBOOK_EXTENSION: &str = "db";

/// Directory of workbook files, one `<id>.db` per workbook.
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    root: PathBuf,
}

impl WorkbookStore {
    pub fn default_path() -> PathBuf {
        let documents = directories_next::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        documents.join("SheetSync")
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// File backing a workbook id. Ids are used as file names, so only
    /// `[A-Za-z0-9_-]` is accepted.
    pub fn workbook_path(&self, id: &str) -> DbResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DbError::Other(format!("'{}' is not a valid workbook id", id)));
        }
        Ok(self.root.join(format!("{}.{}", id, WORKBOOK_EXTENSION)))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.workbook_path(id).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Open an existing workbook. Never creates one.
    pub fn open_by_id(&self, id: &str) -> DbResult<Workbook> {
        let path = self.workbook_path(id)?;
        if !path.is_file() {
            return Err(DbError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("workbook file {} does not exist", path.display()),
            )));
        }
        let conn = DbConnection::open_existing(&path)?;
        Ok(Workbook::new(id, Some(path), conn))
    }

    /// Create a new, empty workbook file.
    pub fn create(&self, id: &str) -> DbResult<Workbook> {
        let path = self.workbook_path(id)?;
        if path.exists() {
            return Err(DbError::Other(format!("workbook '{}' already exists", id)));
        }
        self.ensure_directories()?;
        let conn = DbConnection::create_new(&path)?;
        tracing::info!("Created workbook '{}' at {}", id, path.display());
        Ok(Workbook::new(id, Some(path), conn))
    }

    pub fn open_or_create(&self, id: &str) -> DbResult<Workbook> {
        if self.exists(id) {
            self.open_by_id(id)
        } else {
            self.create(id)
        }
    }
}

impl Default for WorkbookStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
