// src/output/text.rs
//! Indented plain-text rendering.

use super::document::{Document, Node};
use super::Renderer;
use crate::constants::INDENT_SPACES;
use crate::error::AppError;
use std::io::Write;

/// Renders documents as `Key: value` lines, nesting sections by indentation.
///
/// Every section is preceded by a blank line, except the very first top-level
/// section of the whole run.
pub struct TextRenderer<W: Write> {
    out: W,
    first_section: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            first_section: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_document(&mut self, document: &Document, depth: usize) -> std::io::Result<()> {
        let pad = " ".repeat(depth);
        for (index, (key, node)) in document.iter().enumerate() {
            match node {
                Node::Section(children) => {
                    if depth == 0 && index == 0 && self.first_section {
                        self.first_section = false;
                    } else {
                        writeln!(self.out)?;
                    }
                    writeln!(self.out, "{}{}:", pad, key)?;
                    self.write_document(children, depth + INDENT_SPACES)?;
                }
                Node::List(items) => {
                    writeln!(self.out, "{}{}:", pad, key)?;
                    let item_pad = " ".repeat(depth + INDENT_SPACES);
                    for item in items {
                        writeln!(self.out, "{}{}", item_pad, item)?;
                    }
                }
                Node::Value(value) => {
                    let value = value.to_string();
                    if value.is_empty() {
                        writeln!(self.out, "{}{}:", pad, key)?;
                    } else {
                        writeln!(self.out, "{}{}: {}", pad, key, value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, document: &Document) -> Result<(), AppError> {
        self.write_document(document, 0)?;
        self.out.flush()?;
        Ok(())
    }
}
