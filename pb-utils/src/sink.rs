use crate::json::jsonify;
use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::Value;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    sync::Mutex,
};

/// Destination for result records. Implementations synchronize internally,
/// so a sink can be shared between threads.
pub trait DataSink<T: Serialize> {
    fn write_record(&self, record: &T) -> Result<()>;
}

/// Prints one canonical JSON object per line on stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    lock: Mutex<()>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Serialize> DataSink<T> for ConsoleSink {
    fn write_record(&self, record: &T) -> Result<()> {
        let line = jsonify(record)?;
        let _guard = self.lock.lock().map_err(|_| anyhow!("console sink poisoned"))?;
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

struct CsvState<W> {
    writer: W,
    header: Option<Vec<String>>,
}

/// Writes records as comma-separated rows. The header is taken from the
/// field names of the first record, sorted; later records must have the same
/// fields. Every row is flushed as soon as it is written.
pub struct CsvSink<W: Write = BufWriter<File>> {
    state: Mutex<CsvState<W>>,
}

impl CsvSink {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| anyhow!("Failed to create csv file {}: {}", path.display(), e))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            state: Mutex::new(CsvState {
                writer,
                header: None,
            }),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.state
            .into_inner()
            .map(|state| state.writer)
            .map_err(|_| anyhow!("csv sink poisoned"))
    }
}

fn csv_field(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

impl<T: Serialize, W: Write> DataSink<T> for CsvSink<W> {
    fn write_record(&self, record: &T) -> Result<()> {
        let value = serde_json::to_value(record)?;
        let Value::Object(fields) = value else {
            return Err(anyhow!("csv records must serialize to an object"));
        };
        let mut guard = self.state.lock().map_err(|_| anyhow!("csv sink poisoned"))?;
        let state = &mut *guard;

        if state.header.is_none() {
            let mut header: Vec<String> = fields.keys().cloned().collect();
            header.sort();
            writeln!(state.writer, "{}", header.join(","))?;
            state.header = Some(header);
        }
        let header = state.header.as_deref().unwrap_or_default();
        if header.len() != fields.len() {
            return Err(anyhow!(
                "record has {} fields, header has {}",
                fields.len(),
                header.len()
            ));
        }

        let row = header
            .iter()
            .map(|key| {
                fields
                    .get(key)
                    .map(csv_field)
                    .ok_or_else(|| anyhow!("record is missing field '{}'", key))
            })
            .collect::<Result<Vec<_>>>()?;
        writeln!(state.writer, "{}", row.join(","))?;
        state.writer.flush()?;
        Ok(())
    }
}
