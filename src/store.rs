use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::error::StoreError;
use crate::models::location_record::LocationRecord;

const HEADER: [&str; 5] = ["Unique ID", "Name", "Longitude", "Latitude", "Floor"];
const DEFAULT_FILE_NAME: &str = "data.csv";

/// Append-only table of location records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Name offered to clients downloading the whole table.
    fn file_name(&self) -> String;

    async fn append(&self, record: &LocationRecord) -> Result<(), StoreError>;

    async fn read_all(&self) -> Result<Vec<u8>, StoreError>;

    /// Last row by physical append order.
    async fn read_latest(&self) -> Result<LocationRecord, StoreError>;
}

/// Column layout of the CSV file. Order here is the on-disk column order.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Unique ID")]
    unique_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Floor")]
    floor: i64,
}

impl From<&LocationRecord> for CsvRow {
    fn from(record: &LocationRecord) -> Self {
        Self {
            unique_id: record.unique_id.clone(),
            name: record.name.clone(),
            longitude: record.longitude,
            latitude: record.latitude,
            floor: record.floor,
        }
    }
}

impl From<CsvRow> for LocationRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            unique_id: row.unique_id,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            floor: row.floor,
        }
    }
}

#[derive(Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    /// Opens the store at `path`, creating it with only the header row if no
    /// file exists yet. An existing file is never truncated or rewritten.
    pub async fn ensure_initialized(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(mut file) => {
                file.write_all(&encode_header()?).await?;
                file.flush().await?;
                info!("Created location store at {}", path.display());
            }
            Err(e) if e.kind() == IoErrorKind::AlreadyExists => {
                info!("Using existing location store at {}", path.display());
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string()
    }

    async fn append(&self, record: &LocationRecord) -> Result<(), StoreError> {
        let row = encode_row(record)?;

        // Whole rows only; two writers never interleave inside a line.
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(&row).await?;
        file.flush().await?;

        debug!(unique_id = %record.unique_id, "Appended location record");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<u8>, StoreError> {
        fs::read(&self.path).await.map_err(|e| match e.kind() {
            IoErrorKind::NotFound => {
                warn!("Location store missing at {}", self.path.display());
                StoreError::Missing
            }
            _ => StoreError::Io(e),
        })
    }

    async fn read_latest(&self) -> Result<LocationRecord, StoreError> {
        let contents = self.read_all().await?;
        let mut reader = csv::Reader::from_reader(contents.as_slice());

        let mut latest = None;
        for row in reader.deserialize::<CsvRow>() {
            latest = Some(row?);
        }

        latest.map(LocationRecord::from).ok_or(StoreError::Empty)
    }
}

fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

fn encode_header() -> Result<Vec<u8>, StoreError> {
    let mut writer = writer();
    writer.write_record(HEADER)?;
    writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))
}

fn encode_row(record: &LocationRecord) -> Result<Vec<u8>, StoreError> {
    let mut writer = writer();
    writer.serialize(CsvRow::from(record))?;
    writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))
}
