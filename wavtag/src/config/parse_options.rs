/// Options to control how wavtag reads files and metadata
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		self
	}
}

/// The parsing strictness mode
///
/// This applies both to the RIFF container and to string-keyed metadata.
///
/// # Examples
///
/// ```rust
/// use wavtag::config::{ParseOptions, ParsingMode};
///
/// // Reject any metadata key that isn't recognized
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// ## Examples of behavior
	///
	/// * Unknown metadata key - The metadata is rejected
	/// * RIFF size doesn't match the file length - The file is rejected
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// ## Examples of behavior
	///
	/// * Unknown metadata key - A warning is logged and the key is ignored
	/// * RIFF size doesn't match the file length - A warning is logged and the actual length is used
	#[default]
	BestAttempt,
	/// Least eager to error
	///
	/// ## Examples of behavior
	///
	/// * Unknown metadata key - The key is silently ignored
	/// * RIFF size doesn't match the file length - The actual length is used
	Relaxed,
}
