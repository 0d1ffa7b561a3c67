//! RIFF/WAVE container handling
//!
//! A WAV file is a `RIFF` chunk of form type `WAVE`, containing a flat list of chunks. Every chunk
//! is an ID, a little endian size, and the data. Chunks with an odd size are followed by a single
//! pad byte that is not included in the size.
//!
//! Nothing besides the chunk boundaries is interpreted, so any chunk (including ones unknown to
//! wavtag) survives a read and write untouched.

mod chunk;
mod read;
mod write;

pub use chunk::Chunk;
pub use read::read_chunks;
pub use write::write_riff;

pub(crate) const RIFF_CHUNK_HEADER_SIZE: u64 = 8;

/// The chunk holding the stream format, required in every WAV file
pub const FMT_CHUNK_ID: [u8; 4] = *b"fmt ";
/// The chunk holding the samples, required in every WAV file
pub const DATA_CHUNK_ID: [u8; 4] = *b"data";

/// The chunk IDs an ID3v2 tag can be stored under
pub const ID3_CHUNK_IDS: [[u8; 4]; 2] = [*b"ID3 ", *b"id3 "];
