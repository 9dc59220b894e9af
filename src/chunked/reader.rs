use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::ring::RingBuffer;

/// Streams one file at a time through a fixed-size [`RingBuffer`].
///
/// The ring is allocated once and reused when the reader is pointed at the
/// next file with [`ChunkedReader::swap_file`].
#[derive(Debug)]
pub struct ChunkedReader {
    ring: RingBuffer,
    file: File,
    path: PathBuf,
}

impl ChunkedReader {
    /// Allocate the ring, open `path` and perform the initial fill.
    pub fn open<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self> {
        if capacity == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "chunk buffer capacity must be greater than zero",
            ));
        }

        let ring = RingBuffer::try_with_capacity(capacity)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;

        let mut reader = Self { ring, file, path };
        reader.fill()?;

        Ok(reader)
    }

    /// Number of buffered, unread bytes.
    pub fn size(&self) -> usize {
        self.ring.len()
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Path of the file currently being streamed.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read from the file into the free space of the buffer.
    ///
    /// Returns zero once the file is exhausted or the buffer is already full.
    pub fn fill(&mut self) -> io::Result<usize> {
        self.ring.fill_from(&mut self.file)
    }

    /// Copy out every buffered byte. Does not touch the file.
    pub fn drain_all(&mut self, out: &mut Vec<u8>) -> usize {
        self.ring.drain_all(out)
    }

    /// Copy out bytes until at least `min_size` were copied and the last one
    /// is `delimiter`, or until the buffer runs dry.
    pub fn drain_until(&mut self, min_size: usize, delimiter: u8, out: &mut Vec<u8>) -> usize {
        self.ring.drain_until(min_size, delimiter, out)
    }

    /// Close the current file and start streaming `path` through the same
    /// buffer.
    ///
    /// If `path` cannot be opened the reader is left untouched.
    pub fn swap_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        let file = File::open(path)?;

        // Dropping the previous handle closes it
        self.file = file;
        self.path = path.to_path_buf();
        self.ring.clear();
        self.fill()?;

        Ok(())
    }

    /// Close the file and release the buffer.
    pub fn close(self) {
        tracing::trace!("Closing chunked reader for {}", self.path.display());
    }
}
