use std::fmt::{Display, Formatter};

/// Every text frame ID that can be written
///
/// Membership in this list is what makes a metadata key a valid text frame. Any other key is
/// either one of the special keys (see [`Metadata`](crate::Metadata)) or unknown.
pub const TEXT_FRAMES: [&str; 38] = [
	"TALB", "TBPM", "TCOM", "TCON", "TCOP", "TDAT", "TDLY", "TENC", "TEXT", "TFLT", "TIME", "TIT1",
	"TIT2", "TIT3", "TKEY", "TLAN", "TLEN", "TMED", "TOAL", "TOFN", "TOLY", "TOPE", "TORY", "TOWN",
	"TPE1", "TPE2", "TPE3", "TPE4", "TPOS", "TPUB", "TRCK", "TRDA", "TRSN", "TRSO", "TSIZ", "TSRC",
	"TSSE", "TYER",
];

pub(crate) const PICTURE_FRAME_ID: [u8; 4] = *b"APIC";
pub(crate) const COMMENT_FRAME_ID: [u8; 4] = *b"COMM";

/// The ID of a text information frame
///
/// A `FrameId` can only be created from one of the IDs in [`TEXT_FRAMES`].
///
/// # Examples
///
/// ```rust
/// use wavtag::id3::FrameId;
///
/// let title = FrameId::new("TIT2").unwrap();
/// assert_eq!(title.as_str(), "TIT2");
///
/// // Not a text frame
/// assert!(FrameId::new("APIC").is_none());
/// assert!(FrameId::new("TXXX").is_none());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId([u8; 4]);

impl FrameId {
	/// Create a `FrameId` if `id` is a recognized text frame
	pub fn new(id: &str) -> Option<Self> {
		if !TEXT_FRAMES.contains(&id) {
			return None;
		}

		let mut bytes = [0; 4];
		bytes.copy_from_slice(id.as_bytes());
		Some(Self(bytes))
	}

	// Callers must only pass entries of `TEXT_FRAMES`
	pub(crate) const fn from_known(id: [u8; 4]) -> Self {
		Self(id)
	}

	/// The ID as a string
	pub fn as_str(&self) -> &str {
		// Only ever constructed from the ASCII entries of `TEXT_FRAMES`
		std::str::from_utf8(&self.0).unwrap_or_default()
	}

	/// The raw ID bytes
	pub fn as_bytes(&self) -> [u8; 4] {
		self.0
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
