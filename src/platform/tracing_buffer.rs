//! Holds log output in memory while the terminal is taken over by the game.
//!
//! Writing to stderr while the alternate screen is active would scribble over the board, so lines are kept
//! in a buffer and written out once the terminal has been restored.

use std::io;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use tracing_subscriber::fmt::MakeWriter;

/// A thread-safe in-memory log sink.
#[derive(Clone, Default)]
pub struct BufferedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl BufferedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes everything held so far to `writer` and empties the buffer.
    pub fn flush_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let mut buffer = self.buffer.lock();
        if !buffer.is_empty() {
            writer.write_all(&buffer)?;
            writer.flush()?;
            buffer.clear();
        }
        Ok(())
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }
}

impl Write for BufferedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that buffers until released, then writes straight to stderr.
#[derive(Clone, Default)]
pub struct SwitchableWriter {
    buffered_writer: BufferedWriter,
    direct_mode: Arc<Mutex<bool>>,
}

impl SwitchableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_direct(&self) -> bool {
        *self.direct_mode.lock()
    }

    /// Flushes held lines to `writer` and sends everything after that directly to stderr.
    pub fn release_to<W: Write>(&self, writer: W) -> io::Result<()> {
        let buffer_size = {
            let mut mode = self.direct_mode.lock();
            let buffer_size = self.buffered_writer.buffer_size();
            self.buffered_writer.flush_to(writer)?;
            *mode = true;
            buffer_size
        };

        debug!("Flushed {buffer_size:?} bytes of buffered logs");
        Ok(())
    }

    pub fn release(&self) -> io::Result<()> {
        self.release_to(io::stderr())
    }

    pub fn buffered(&self) -> &BufferedWriter {
        &self.buffered_writer
    }
}

impl Write for SwitchableWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if *self.direct_mode.lock() {
            io::stderr().write(buf)
        } else {
            self.buffered_writer.clone().write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if *self.direct_mode.lock() {
            io::stderr().flush()
        } else {
            Ok(())
        }
    }
}

#[derive(Clone)]
pub struct SwitchableMakeWriter {
    writer: SwitchableWriter,
}

impl SwitchableMakeWriter {
    pub fn new(writer: SwitchableWriter) -> Self {
        Self { writer }
    }
}

impl<'a> MakeWriter<'a> for SwitchableMakeWriter {
    type Writer = SwitchableWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer.clone()
    }
}
