//! Assembly of resolved waivers into one document.
//!
//! Combining PDFs is left to an [`Assembler`] implementation. The shipped
//! [`ListingAssembler`] only lists what it was given.

use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Combines resolved waiver files into a single output.
pub trait Assembler {
    /// Assemble `pdfs`, in order.
    ///
    /// # Errors
    /// Returns an error if the output cannot be produced.
    fn assemble(&mut self, pdfs: &[PathBuf]) -> Result<()>;
}

/// Writes the list of files it would combine.
pub struct ListingAssembler<W> {
    out: W,
}

impl<W: Write> ListingAssembler<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Assembler for ListingAssembler<W> {
    fn assemble(&mut self, pdfs: &[PathBuf]) -> Result<()> {
        writeln!(self.out, "PDFs to combine:")?;
        for pdf in pdfs {
            writeln!(self.out, "  {}", pdf.display())?;
        }
        tracing::info!(count = pdfs.len(), "listed PDFs to combine");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_in_order() {
        let mut out = Vec::new();
        ListingAssembler::new(&mut out)
            .assemble(&[PathBuf::from("b.pdf"), PathBuf::from("a.pdf")])
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "PDFs to combine:\n  b.pdf\n  a.pdf\n"
        );
    }

    #[test]
    fn empty_input_prints_header_only() {
        let mut out = Vec::new();
        ListingAssembler::new(&mut out).assemble(&[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "PDFs to combine:\n");
    }
}
