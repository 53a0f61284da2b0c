// src/output/mod.rs
//! Presentation of report documents.
//!
//! Commands build [`Document`] trees; a [`Renderer`] turns each one into text
//! or JSON on a writer.

mod document;
mod json;
mod text;

pub use document::{keyed_section, record_document, single, Document, Node};
pub use json::JsonRenderer;
pub use text::TextRenderer;

use crate::error::AppError;
use std::io::Write;

/// Where report documents go.
pub trait Renderer {
    fn render(&mut self, document: &Document) -> Result<(), AppError>;
}

/// Output formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Stdout,
    Json,
}

impl OutputFormat {
    /// A renderer of this format writing to `out`.
    pub fn renderer<'w>(&self, out: impl Write + 'w) -> Box<dyn Renderer + 'w> {
        match self {
            OutputFormat::Stdout => Box::new(TextRenderer::new(out)),
            OutputFormat::Json => Box::new(JsonRenderer::new(out)),
        }
    }
}
