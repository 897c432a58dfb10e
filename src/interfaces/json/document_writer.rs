use crate::error::{PaymentError, Result};
use serde::Serialize;
use std::io::Write;

/// Writes documents as pretty-printed JSON, one per call.
pub struct DocumentWriter<W: Write> {
    writer: W,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_document<T: Serialize + ?Sized>(&mut self, document: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, document).map_err(|e| {
            if e.is_io() {
                PaymentError::Io(e.into())
            } else {
                PaymentError::Serialization(e)
            }
        })?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
