//! Byte sinks a serialization session writes to

use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// How a [`Sink`] was constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Caller-supplied writer
    Writer,
    /// File opened by the sink from a filename
    File,
    /// In-memory buffer
    Buffer,
    /// Duplicate of a caller-owned file handle
    Handle,
}

/// Growable byte buffer shared between a sink and its creator
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    /// Copy of the bytes written so far
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.lock().clone()
    }

    /// Bytes written so far, as (lossy) UTF-8
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Take the accumulated bytes, leaving the buffer empty
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.bytes.lock())
    }

    fn append(&self, buf: &[u8]) {
        self.bytes.lock().extend_from_slice(buf);
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

enum Target {
    Writer(Box<dyn Write + Send>),
    File(BufWriter<File>),
    Buffer(SharedBuffer),
    Handle(File),
}

/// Output target owned by a serializer for the duration of one session
pub struct Sink {
    target: Target,
    bytes_written: u64,
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink")
            .field("kind", &self.kind())
            .field("bytes_written", &self.bytes_written)
            .finish()
    }
}

impl Sink {
    fn new(target: Target) -> Self {
        Self {
            target,
            bytes_written: 0,
        }
    }

    /// Sink over any writer; the writer is dropped when the sink is closed
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self::new(Target::Writer(Box::new(writer)))
    }

    /// Create (or truncate) a file and write to it through a buffer
    pub fn to_filename(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(Target::File(BufWriter::new(file))))
    }

    /// Sink accumulating into a fresh in-memory buffer
    pub fn to_buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::new();
        (Self::to_shared_buffer(buffer.clone()), buffer)
    }

    /// Sink appending to an existing shared buffer
    pub fn to_shared_buffer(buffer: SharedBuffer) -> Self {
        Self::new(Target::Buffer(buffer))
    }

    /// Sink writing to an already open file.
    ///
    /// The sink writes through a duplicate of the handle, so closing the
    /// sink never closes the caller's `file`.
    pub fn to_file_handle(file: &File) -> io::Result<Self> {
        Ok(Self::new(Target::Handle(file.try_clone()?)))
    }

    pub fn kind(&self) -> SinkKind {
        match self.target {
            Target::Writer(_) => SinkKind::Writer,
            Target::File(_) => SinkKind::File,
            Target::Buffer(_) => SinkKind::Buffer,
            Target::Handle(_) => SinkKind::Handle,
        }
    }

    /// Total bytes accepted by this sink
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Write a string slice
    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_all(s.as_bytes())
    }

    /// Flush and release the target
    pub fn close(mut self) -> io::Result<()> {
        self.flush()?;
        match self.target {
            Target::File(writer) => {
                let file = writer.into_inner().map_err(|e| e.into_error())?;
                file.sync_all()
            }
            _ => Ok(()),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = match &mut self.target {
            Target::Writer(writer) => writer.write(buf)?,
            Target::File(writer) => writer.write(buf)?,
            Target::Buffer(buffer) => {
                buffer.append(buf);
                buf.len()
            }
            Target::Handle(file) => file.write(buf)?,
        };
        self.bytes_written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.target {
            Target::Writer(writer) => writer.flush(),
            Target::File(writer) => writer.flush(),
            Target::Buffer(_) => Ok(()),
            Target::Handle(file) => file.flush(),
        }
    }
}
