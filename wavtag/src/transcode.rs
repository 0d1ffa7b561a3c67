//! Embedding a tag into a WAV file
//!
//! A [`WavFile`] keeps every chunk of the source in order. Applying [`Metadata`] drops any
//! existing ID3v2 chunk (or every optional chunk, if requested), appends a newly built tag, and
//! re-serializes the container.

use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::id3::build_tag_block;
use crate::macros::err;
use crate::metadata::Metadata;
use crate::riff::{Chunk, DATA_CHUNK_ID, FMT_CHUNK_ID, ID3_CHUNK_IDS, read_chunks, write_riff};

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// A WAV file, read as a list of chunks
///
/// # Examples
///
/// ```rust,no_run
/// use wavtag::config::{ParseOptions, WriteOptions};
/// use wavtag::{Metadata, WavFile};
///
/// # fn main() -> wavtag::error::Result<()> {
/// let wav = WavFile::read_from_path("white_noise.wav", ParseOptions::new())?;
///
/// let mut metadata = Metadata::new();
/// metadata.set_title("White Noise");
/// metadata.set_sync_filename(false);
///
/// let output = wav.apply(&metadata, WriteOptions::new())?;
/// std::fs::write(output.path.unwrap(), output.contents)?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WavFile {
	path: Option<PathBuf>,
	chunks: Vec<Chunk>,
}

/// The result of [`WavFile::apply`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedOutput {
	/// Where the file should be written
	///
	/// This is only `None` if the source had no path.
	pub path: Option<PathBuf>,
	/// The complete tagged file
	pub contents: Vec<u8>,
}

impl WavFile {
	/// Read a `WavFile` from a reader
	///
	/// The file will have no path, see [`WavFile::with_path`].
	///
	/// # Errors
	///
	/// See [`read_chunks`]
	pub fn read_from<R>(reader: &mut R, parse_options: ParseOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		Ok(Self {
			path: None,
			chunks: read_chunks(reader, parse_options)?,
		})
	}

	/// Read a `WavFile` from a path
	///
	/// # Errors
	///
	/// * The file can't be opened
	/// * See [`read_chunks`]
	pub fn read_from_path<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::debug!("Reading WAV file from {}", path.display());

		let mut reader = BufReader::new(File::open(path)?);
		Ok(Self::read_from(&mut reader, parse_options)?.with_path(path))
	}

	/// Read a `WavFile` from an in-memory buffer
	///
	/// # Errors
	///
	/// * `bytes` is empty
	/// * See [`read_chunks`]
	pub fn from_bytes(bytes: &[u8], parse_options: ParseOptions) -> Result<Self> {
		if bytes.is_empty() {
			err!(EmptyInput);
		}

		Self::read_from(&mut Cursor::new(bytes), parse_options)
	}

	/// Set the path the file was read from
	///
	/// This is used to determine the default output name.
	#[must_use]
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	/// The path the file was read from
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// The chunks of the file, in order
	pub fn chunks(&self) -> &[Chunk] {
		&self.chunks
	}

	/// Consume the file, returning its chunks
	pub fn into_chunks(self) -> Vec<Chunk> {
		self.chunks
	}

	/// Embed `metadata` into the file
	///
	/// The source is left untouched, the tagged file is returned in full. The output:
	///
	/// * Keeps every chunk of the source, in order, except existing `ID3 `/`id3 ` chunks.
	///   If [`Metadata::remove_unnecessary_chunks`] is set, only the `fmt ` and `data` chunks are
	///   kept.
	/// * Ends with a single new ID3v2.3 chunk (see [`build_tag_block`])
	/// * Is renamed to [`Metadata::name`] if [`Metadata::sync_filename`] is set (the default),
	///   keeping the source's directory and extension. Without a name, the source's file stem is
	///   used.
	///
	/// # Errors
	///
	/// * The tag can't be built, see [`build_tag_block`]
	/// * The output is too large for a RIFF file
	pub fn apply(&self, metadata: &Metadata, write_options: WriteOptions) -> Result<TaggedOutput> {
		let tag = build_tag_block(metadata, write_options)?;
		let tag_chunk = Chunk::new(write_options.chunk_id(), tag);

		let remove_unnecessary_chunks = metadata.remove_unnecessary_chunks().unwrap_or(false);
		let kept = self.chunks.iter().filter(|chunk| {
			let keep = if remove_unnecessary_chunks {
				chunk.id == FMT_CHUNK_ID || chunk.id == DATA_CHUNK_ID
			} else {
				!ID3_CHUNK_IDS.contains(&chunk.id)
			};

			if !keep {
				log::debug!("Dropping chunk {}", chunk.id_str());
			}

			keep
		});

		let contents = write_riff(kept.chain(std::iter::once(&tag_chunk)))?;

		Ok(TaggedOutput {
			path: self.output_path(metadata),
			contents,
		})
	}

	fn output_path(&self, metadata: &Metadata) -> Option<PathBuf> {
		let path = self.path.as_deref()?;

		if !metadata.sync_filename().unwrap_or(true) {
			return Some(path.to_path_buf());
		}

		let Some(name) = metadata.name() else {
			// The default name is the current stem, nothing changes
			return Some(path.to_path_buf());
		};

		let file_name = match path.extension() {
			Some(extension) => format!("{name}.{}", extension.to_string_lossy()),
			None => name.to_owned(),
		};

		log::debug!("Renaming {} to {file_name}", path.display());
		Some(path.with_file_name(file_name))
	}
}
