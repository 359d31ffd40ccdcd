//! File-backed order store.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use super::record::{format_record, header_line, parse_record};
use super::{check_storable, OrderStore};
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::Order;

/// Order store over a comma-separated text file.
///
/// See [`record`](super::record) for the line format. Appends within one
/// process are serialized; coordination between processes is not handled.
#[derive(Debug)]
pub struct CsvOrderStore {
    path: PathBuf,
    skip_malformed: bool,
    write_lock: Mutex<()>,
}

impl CsvOrderStore {
    /// Creates a store over `path`. The file need not exist until the
    /// first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skip_malformed: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store from the configured path and skip setting.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(&config.orders_path).with_skip_malformed(config.skip_malformed)
    }

    /// Skip malformed rows (logging a warning) instead of failing the load.
    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> SchedulerError {
        SchedulerError::store(&self.path, source)
    }
}

impl OrderStore for CsvOrderStore {
    fn load_orders(&self) -> SchedulerResult<Vec<Order>> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.unavailable(e))?;

        let mut orders = Vec::new();
        let mut skipped = 0usize;
        for (idx, line) in text.lines().enumerate() {
            match parse_record(idx + 1, line) {
                Ok(Some(order)) => orders.push(order),
                Ok(None) => {}
                Err(err) if self.skip_malformed => {
                    warn!(path = %self.path.display(), error = %err, "skipping malformed order record");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = orders.len(),
            skipped,
            "loaded orders"
        );
        Ok(orders)
    }

    fn append_order(&self, order: &Order) -> SchedulerResult<()> {
        check_storable(order)?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let mut buf = String::new();
        match last_byte(&mut file).map_err(|e| self.unavailable(e))? {
            None => {
                buf.push_str(&header_line());
                buf.push('\n');
            }
            Some(b'\n') => {}
            Some(_) => buf.push('\n'),
        }
        buf.push_str(&format_record(order));
        buf.push('\n');

        file.write_all(buf.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| self.unavailable(e))?;

        info!(
            path = %self.path.display(),
            customer = %order.customer_name,
            dish = %order.dish_name,
            "order appended"
        );
        Ok(())
    }
}

/// Last byte of the file, or `None` if it is empty.
fn last_byte(file: &mut File) -> std::io::Result<Option<u8>> {
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut byte = [0u8; 1];
    file.read_exact(&mut byte)?;
    Ok(Some(byte[0]))
}
