use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::info;
use serde::Serialize;

use crate::PaddockError;

/// Writes `value` as pretty JSON to `output`, or to stdout when no file is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), PaddockError> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| PaddockError::WriterError { source: e })?;
            write_to(value, BufWriter::new(file))?;
            info!("Wrote report to {:?}", path);
            Ok(())
        }
        None => write_to(value, io::stdout().lock()),
    }
}

fn write_to<T: Serialize, W: Write>(value: &T, mut writer: W) -> Result<(), PaddockError> {
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| PaddockError::ReportSerializeError { source: e })?;
    writeln!(writer).map_err(|e| PaddockError::WriterError { source: e })?;
    writer
        .flush()
        .map_err(|e| PaddockError::WriterError { source: e })
}
