//! Contains the errors that can arise within wavtag
//!
//! The primary error is [`WavTagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, WavTagError>`
pub type Result<T> = std::result::Result<T, WavTagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Input related errors
	/// The source file has no contents to work with
	EmptyInput,
	/// The source file only provides its contents as a stream
	StreamingUnsupported,

	// File data related errors
	/// Attempting to read/write an abnormally large amount of data
	///
	/// This also arises when a value doesn't fit in a synchsafe integer (>= 2^28).
	TooMuchData,
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of a chunk is written as one value, but that size is
	/// too big to be valid within the bounds of the file.
	SizeMismatch,
	/// Errors that occur while decoding a file
	FileDecoding(FileDecodingError),
	/// A chunk that every WAV file must contain is missing
	MissingChunk([u8; 4]),

	// Tag related errors
	/// A metadata key outside of the recognized set, only raised under strict validation
	UnknownMetadataKey(String),
	/// A metadata key was given a value of the wrong type
	BadMetadataValue(String),
	/// Attempted to write a comment frame with a language that isn't 3 ASCII letters
	InvalidLanguage([u8; 3]),
	/// A metadata callback reported a failure
	Metadata(String),

	// Pipeline related errors
	/// A deferred metadata derivation dropped its completion token without completing
	CompletionDropped,

	// Conversions for external errors
	/// Unable to decode a hex string
	BadHex(data_encoding::DecodeError),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
}

/// An error that arises while decoding a file
pub struct FileDecodingError {
	description: &'static str,
}

impl FileDecodingError {
	/// Create a `FileDecodingError` from a description
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::error::FileDecodingError;
	///
	/// let error = FileDecodingError::new("WAV file doesn't contain a RIFF chunk");
	/// assert_eq!(error.description(), "WAV file doesn't contain a RIFF chunk");
	/// ```
	#[must_use]
	pub const fn new(description: &'static str) -> Self {
		Self { description }
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Wav: {:?}", self.description)
	}
}

impl Display for FileDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Wav: {}", self.description)
	}
}

/// Errors that could occur within wavtag
pub struct WavTagError {
	pub(crate) kind: ErrorKind,
}

impl WavTagError {
	/// Create a `WavTagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::error::{ErrorKind, WavTagError};
	///
	/// let empty_input = WavTagError::new(ErrorKind::EmptyInput);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::error::{ErrorKind, WavTagError};
	///
	/// let missing_data = WavTagError::new(ErrorKind::MissingChunk(*b"data"));
	/// if let ErrorKind::MissingChunk(id) = missing_data.kind() {
	/// 	assert_eq!(id, b"data");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for WavTagError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::BadHex(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for WavTagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<FileDecodingError> for WavTagError {
	fn from(input: FileDecodingError) -> Self {
		Self {
			kind: ErrorKind::FileDecoding(input),
		}
	}
}

impl From<data_encoding::DecodeError> for WavTagError {
	fn from(input: data_encoding::DecodeError) -> Self {
		Self {
			kind: ErrorKind::BadHex(input),
		}
	}
}

impl From<std::io::Error> for WavTagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl Display for WavTagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::BadHex(ref err) => write!(f, "Hex: {err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::EmptyInput => write!(f, "File can not be empty"),
			ErrorKind::StreamingUnsupported => write!(f, "Streaming not supported"),
			ErrorKind::MissingChunk(id) => write!(
				f,
				"[{}] chunk is not contained in file",
				String::from_utf8_lossy(&id)
			),
			ErrorKind::UnknownMetadataKey(ref key) => {
				write!(f, "Unknown metadata key: [{key}]")
			},
			ErrorKind::BadMetadataValue(ref key) => {
				write!(f, "Metadata value for [{key}] has the wrong type")
			},
			ErrorKind::InvalidLanguage(lang) => write!(
				f,
				"Invalid comment language found: {lang:?} (expected 3 ascii letters)"
			),
			ErrorKind::Metadata(ref message) => write!(f, "Metadata: {message}"),
			ErrorKind::CompletionDropped => write!(
				f,
				"Metadata derivation finished without signaling completion"
			),

			// Files
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid chunk size, either too big or too small to be valid"
			),
			ErrorKind::FileDecoding(ref file_decode_err) => write!(f, "{file_decode_err}"),
		}
	}
}
