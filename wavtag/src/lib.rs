//! Embed ID3v2.3 metadata into WAV files.
//!
//! wavtag reads a RIFF/WAVE file as a flat list of chunks, builds an ID3v2.3 tag from a
//! [`Metadata`], and writes the file back out with the tag appended as an `ID3 ` chunk. Every
//! other chunk is carried over byte for byte.
//!
//! # Examples
//!
//! ## Tagging a file on disk
//!
//! ```rust,no_run
//! # fn main() -> wavtag::error::Result<()> {
//! use wavtag::config::{ParseOptions, WriteOptions};
//! use wavtag::{Metadata, WavFile};
//!
//! let wav = WavFile::read_from_path("test.wav", ParseOptions::new())?;
//!
//! let mut metadata = Metadata::new();
//! metadata.set_title("Title");
//! metadata.set_artist("Artist");
//! metadata.set_picture(std::path::PathBuf::from("cover.jpg"));
//! metadata.set_name("01 - Title");
//!
//! // Writes "01 - Title.wav", next to "test.wav"
//! let output = wav.apply(&metadata, WriteOptions::new())?;
//! if let Some(path) = output.path {
//! 	std::fs::write(path, output.contents)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Metadata from string keys
//!
//! Keys are the ID3v2 frame IDs of [`id3::TEXT_FRAMES`], `APIC`, `COMM`, and the file controls
//! `name`, `syncFilename` and `removeUnnecessaryChunks`.
//!
//! ```rust
//! # fn main() -> wavtag::error::Result<()> {
//! use wavtag::config::{ParseOptions, ParsingMode};
//! use wavtag::{Metadata, MetadataValue};
//!
//! let entries: Vec<(&str, MetadataValue)> = vec![
//! 	("TIT2", "Title".into()),
//! 	("TPE1", "Artist".into()),
//! 	("removeUnnecessaryChunks", true.into()),
//! ];
//!
//! let metadata = Metadata::from_entries(
//! 	entries,
//! 	ParseOptions::new().parsing_mode(ParsingMode::Strict),
//! )?;
//! assert_eq!(metadata.artist(), Some("Artist"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Tagging many files
//!
//! See the [`pipeline`] module.

pub mod config;
pub mod error;
pub mod id3;
pub(crate) mod macros;
pub mod metadata;
pub mod picture;
pub mod pipeline;
pub mod riff;
pub mod transcode;
mod util;

pub use crate::metadata::{Metadata, MetadataKey, MetadataValue};
pub use crate::pipeline::Tagger;
pub use crate::transcode::{TaggedOutput, WavFile};

pub use util::text::TextEncoding;
pub use util::writer::ByteWriter;
