use crate::engines::generation::genome::Genome;
use crate::error::Result;
use std::io::{self, Write};

/// Streaming JSON log with one array element per generation.
///
/// The opening bracket is written on creation. `finish` writes the closing
/// bracket; if the log is dropped without being finished (a failed run), the
/// bracket is written on drop so the file still parses.
pub struct GenerationLog<W: Write> {
    writer: Option<W>,
    generations: usize,
}

impl<W: Write> GenerationLog<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writer.write_all(b"[")?;
        Ok(Self {
            writer: Some(writer),
            generations: 0,
        })
    }

    pub fn append(&mut self, generation: &[Genome]) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let mut chunk = Vec::new();
        if self.generations > 0 {
            chunk.push(b',');
        }
        chunk.extend(serde_json::to_vec(generation)?);
        writer.write_all(&chunk)?;
        writer.flush()?;
        self.generations += 1;
        Ok(())
    }

    /// Number of generations written so far
    pub fn len(&self) -> usize {
        self.generations
    }

    pub fn is_empty(&self) -> bool {
        self.generations == 0
    }

    pub fn finish(mut self) -> Result<W> {
        let Some(mut writer) = self.writer.take() else {
            return Err(io::Error::other("generation log already closed").into());
        };
        writer.write_all(b"]")?;
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write> Drop for GenerationLog<W> {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            log::warn!(
                "generation log dropped after {} generations without finish, closing it",
                self.generations
            );
            let _ = writer.write_all(b"]");
            let _ = writer.flush();
        }
    }
}
