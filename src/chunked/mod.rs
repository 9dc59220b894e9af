//! Bounded, delimiter-aware streaming of file contents
//!
//! A [`ChunkedReader`] owns one [`RingBuffer`] and one open file. Callers
//! pull byte ranges out of it with `drain_all` or `drain_until`, which only
//! cuts after a chosen delimiter byte while the buffer holds enough data.
//! Memory stays bounded by the ring capacity regardless of file size.

pub mod reader;
pub mod ring;

pub use reader::ChunkedReader;
pub use ring::RingBuffer;
