//! Tagging files one at a time
//!
//! A [`Tagger`] takes [`SourceFile`]s, obtains the [`Metadata`] for each one, and replaces their
//! contents (and possibly path) with the tagged output.
//!
//! Metadata can be provided three ways:
//!
//! * [`Tagger::new`] - The same metadata for every file
//! * [`Tagger::derive_with`] - Computed from each file
//! * [`Tagger::derive_deferred`] - Computed from each file, signaled through a [`Completion`]
//!
//! # Examples
//!
//! ```rust
//! use wavtag::Metadata;
//! use wavtag::pipeline::{Contents, SourceFile, Tagger};
//! use wavtag::riff::{Chunk, write_riff};
//!
//! # fn main() -> wavtag::error::Result<()> {
//! # let wav = write_riff(&[Chunk::new(*b"fmt ", vec![0; 16]), Chunk::new(*b"data", Vec::new())])?;
//! let tagger = Tagger::derive_with(|wav| {
//! 	let mut metadata = Metadata::new();
//! 	metadata.set_title(format!("{} chunks", wav.chunks().len()));
//! 	Ok(Some(metadata))
//! });
//!
//! let file = SourceFile::new("song.wav", Contents::Buffer(wav));
//! let tagged = tagger.process(file)?;
//! assert_eq!(tagged.path.to_str(), Some("song.wav"));
//! # Ok(()) }
//! ```

use crate::config::{ParseOptions, WriteOptions};
use crate::error::{ErrorKind, Result, WavTagError};
use crate::macros::err;
use crate::metadata::Metadata;
use crate::transcode::WavFile;

use std::borrow::Cow;
use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc;

/// Where the contents of a [`SourceFile`] come from
pub enum Contents {
	/// The file has been read into memory
	Buffer(Vec<u8>),
	/// The file will be read from [`SourceFile::path`]
	Path,
	/// The file can only be streamed, which isn't supported
	Stream(Box<dyn Read + Send>),
}

impl Debug for Contents {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Contents::Buffer(buffer) => write!(f, "Buffer({} bytes)", buffer.len()),
			Contents::Path => f.write_str("Path"),
			Contents::Stream(_) => f.write_str("Stream"),
		}
	}
}

/// A file passing through a [`Tagger`]
#[derive(Debug)]
pub struct SourceFile {
	/// The path of the file
	///
	/// After tagging, this may have been renamed (see [`Metadata::set_name`]).
	pub path: PathBuf,
	/// The file contents
	pub contents: Contents,
}

impl SourceFile {
	/// Create a new `SourceFile`
	pub fn new(path: impl Into<PathBuf>, contents: Contents) -> Self {
		Self {
			path: path.into(),
			contents,
		}
	}

	/// Create a `SourceFile` that will be read from disk
	pub fn from_path(path: impl Into<PathBuf>) -> Self {
		Self::new(path, Contents::Path)
	}

	/// The contents, if they are in memory
	pub fn buffer(&self) -> Option<&[u8]> {
		match &self.contents {
			Contents::Buffer(buffer) => Some(buffer),
			_ => None,
		}
	}
}

type MetadataResult = Result<Option<Metadata>>;

/// A single-use token to deliver the metadata of a deferred derivation
///
/// The token is consumed when used, so a derivation can only ever complete once. It may be sent
/// to another thread. Dropping it without completing fails the file with
/// [`ErrorKind::CompletionDropped`].
#[derive(Debug)]
pub struct Completion {
	sender: mpsc::SyncSender<MetadataResult>,
}

impl Completion {
	fn channel() -> (Self, mpsc::Receiver<MetadataResult>) {
		let (sender, receiver) = mpsc::sync_channel(1);
		(Self { sender }, receiver)
	}

	fn send(self, result: MetadataResult) {
		// The receiver only disappears once the file is no longer being processed
		if self.sender.send(result).is_err() {
			log::warn!("Completion signaled after the file was abandoned");
		}
	}

	/// Tag the file with `metadata`
	pub fn complete(self, metadata: Metadata) {
		self.send(Ok(Some(metadata)));
	}

	/// Pass the file through untouched
	pub fn skip(self) {
		self.send(Ok(None));
	}

	/// Fail the file
	pub fn fail(self, message: impl Into<String>) {
		self.send(Err(WavTagError::new(ErrorKind::Metadata(message.into()))));
	}
}

type DeriveFn = dyn Fn(&WavFile) -> MetadataResult;
type DeferredFn = dyn Fn(&WavFile, Completion);

enum MetadataSource {
	Fixed(Metadata),
	Derived(Box<DeriveFn>),
	Deferred(Box<DeferredFn>),
}

impl Debug for MetadataSource {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			MetadataSource::Fixed(metadata) => f.debug_tuple("Fixed").field(metadata).finish(),
			MetadataSource::Derived(_) => f.write_str("Derived"),
			MetadataSource::Deferred(_) => f.write_str("Deferred"),
		}
	}
}

/// Tags [`SourceFile`]s
#[derive(Debug)]
pub struct Tagger {
	source: MetadataSource,
	parse_options: ParseOptions,
	write_options: WriteOptions,
}

/// The result of processing a single file with [`Tagger::process_all`]
#[derive(Debug)]
pub struct Outcome {
	/// The path of the file before processing
	pub path: PathBuf,
	/// The processed file, or the reason it failed
	pub result: Result<SourceFile>,
}

impl Tagger {
	fn with_source(source: MetadataSource) -> Self {
		Self {
			source,
			parse_options: ParseOptions::new(),
			write_options: WriteOptions::new(),
		}
	}

	/// Tag every file with the same metadata
	pub fn new(metadata: Metadata) -> Self {
		Self::with_source(MetadataSource::Fixed(metadata))
	}

	/// Derive the metadata from each file
	///
	/// Returning `Ok(None)` passes the file through untouched.
	pub fn derive_with<F>(derive: F) -> Self
	where
		F: Fn(&WavFile) -> Result<Option<Metadata>> + 'static,
	{
		Self::with_source(MetadataSource::Derived(Box::new(derive)))
	}

	/// Derive the metadata from each file, delivering it through a [`Completion`]
	///
	/// Processing blocks until the completion is used or dropped, so it may be moved to another
	/// thread.
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::Metadata;
	/// use wavtag::pipeline::Tagger;
	///
	/// let tagger = Tagger::derive_deferred(|_wav, completion| {
	/// 	std::thread::spawn(move || {
	/// 		let mut metadata = Metadata::new();
	/// 		metadata.set_title("From another thread");
	/// 		completion.complete(metadata);
	/// 	});
	/// });
	/// ```
	pub fn derive_deferred<F>(derive: F) -> Self
	where
		F: Fn(&WavFile, Completion) + 'static,
	{
		Self::with_source(MetadataSource::Deferred(Box::new(derive)))
	}

	/// Set the [`ParseOptions`] used to read each file
	#[must_use]
	pub fn parse_options(mut self, parse_options: ParseOptions) -> Self {
		self.parse_options = parse_options;
		self
	}

	/// Set the [`WriteOptions`] used to write each file
	#[must_use]
	pub fn write_options(mut self, write_options: WriteOptions) -> Self {
		self.write_options = write_options;
		self
	}

	/// Tag a single file
	///
	/// If the metadata is `None`, the file is returned untouched.
	///
	/// # Errors
	///
	/// * The file is a stream
	/// * The file is empty
	/// * The file can't be read, or isn't a valid WAV file
	/// * The metadata derivation fails, or drops its [`Completion`]
	/// * The tag can't be built or written
	pub fn process(&self, mut file: SourceFile) -> Result<SourceFile> {
		let wav = match &file.contents {
			Contents::Stream(_) => err!(StreamingUnsupported),
			Contents::Buffer(buffer) => WavFile::from_bytes(buffer, self.parse_options)?,
			Contents::Path => {
				let buffer = std::fs::read(&file.path)?;
				WavFile::from_bytes(&buffer, self.parse_options)?
			},
		}
		.with_path(&file.path);

		let Some(metadata) = self.metadata_for(&wav)? else {
			log::debug!("No metadata for {}, passing through", file.path.display());
			return Ok(file);
		};

		let output = wav.apply(&metadata, self.write_options)?;
		if let Some(path) = output.path {
			file.path = path;
		}
		file.contents = Contents::Buffer(output.contents);

		Ok(file)
	}

	fn metadata_for(&self, wav: &WavFile) -> Result<Option<Cow<'_, Metadata>>> {
		match &self.source {
			MetadataSource::Fixed(metadata) => Ok(Some(Cow::Borrowed(metadata))),
			MetadataSource::Derived(derive) => Ok(derive(wav)?.map(Cow::Owned)),
			MetadataSource::Deferred(derive) => {
				let (completion, receiver) = Completion::channel();
				derive(wav, completion);

				match receiver.recv() {
					Ok(result) => Ok(result?.map(Cow::Owned)),
					Err(_) => err!(CompletionDropped),
				}
			},
		}
	}

	/// Tag many files, one after the other
	///
	/// A failure only affects its own file, and is logged.
	pub fn process_all<I>(&self, files: I) -> Vec<Outcome>
	where
		I: IntoIterator<Item = SourceFile>,
	{
		files
			.into_iter()
			.map(|file| {
				let path = file.path.clone();
				let result = self.process(file);
				if let Err(err) = &result {
					log::error!("Failed to tag {}: {err}", path.display());
				}

				Outcome { path, result }
			})
			.collect()
	}
}
