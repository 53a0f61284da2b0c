// src/output/json.rs
use super::document::Document;
use super::Renderer;
use crate::error::AppError;
use std::io::Write;

/// Renders each document as one compact JSON line.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, document: &Document) -> Result<(), AppError> {
        serde_json::to_writer(&mut self.out, document)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
