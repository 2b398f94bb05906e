//! Reader-to-writer conversion
//!
//! Conversion is not incremental. A [`StreamAdapter`] reads the whole source
//! in `chunk_size` pieces, converts the buffered text once, and writes the
//! result once. Memory use is proportional to the input.
//!
//! Cancellation is cooperative: the flag is checked before every read and
//! once more before converting. A conversion that has started runs to
//! completion. Input that is not valid UTF-8 is decoded lossily.

use crate::error::FormatError;
use crate::format::Converter;
use std::collections::HashMap;
use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Read size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Drives one [`Converter`] from a reader to a writer.
pub struct StreamAdapter<'a> {
    converter: &'a dyn Converter,
    options: HashMap<String, String>,
    chunk_size: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> StreamAdapter<'a> {
    pub fn new(converter: &'a dyn Converter) -> Self {
        StreamAdapter {
            converter,
            options: HashMap::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            cancel: None,
        }
    }

    /// Size of each read; zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Per-call options passed to [`Converter::convert_with_options`].
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options = options;
        self
    }

    /// Abort with [`FormatError::Cancelled`] once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read everything from `reader`, convert, and write to `writer`.
    ///
    /// Returns the number of bytes written.
    pub fn run<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<usize, FormatError> {
        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];
        let mut reads = 0usize;

        loop {
            self.check_cancelled()?;
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            reads += 1;
            buffer.extend_from_slice(&chunk[..n]);
        }

        let output = self.convert_buffer(&buffer, reads)?;
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(output.len())
    }

    /// Async variant of [`StreamAdapter::run`] over tokio I/O.
    #[cfg(feature = "async")]
    pub async fn run_async<R, W>(&self, mut reader: R, mut writer: W) -> Result<usize, FormatError>
    where
        R: tokio::io::AsyncRead + Unpin,
        W: tokio::io::AsyncWrite + Unpin,
    {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; self.chunk_size];
        let mut reads = 0usize;

        loop {
            self.check_cancelled()?;
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            reads += 1;
            buffer.extend_from_slice(&chunk[..n]);
        }

        let output = self.convert_buffer(&buffer, reads)?;
        writer.write_all(output.as_bytes()).await?;
        writer.flush().await?;
        Ok(output.len())
    }

    fn check_cancelled(&self) -> Result<(), FormatError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(FormatError::Cancelled),
            _ => Ok(()),
        }
    }

    fn convert_buffer(&self, buffer: &[u8], reads: usize) -> Result<String, FormatError> {
        self.check_cancelled()?;
        log::debug!(
            "{}: buffered {} bytes in {} reads",
            self.converter.name(),
            buffer.len(),
            reads
        );
        let source = String::from_utf8_lossy(buffer);
        if self.options.is_empty() {
            Ok(self.converter.convert(&source))
        } else {
            self.converter.convert_with_options(&source, &self.options)
        }
    }
}
