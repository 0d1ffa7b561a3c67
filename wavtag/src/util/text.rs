/// The text encoding for use in ID3v2.3 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-1 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			_ => None,
		}
	}

	/// Encode `text`, optionally appending a null terminator of the appropriate width
	///
	/// UTF-16 is always written little endian, preceded by a byte order mark.
	/// Characters that can't be represented in Latin-1 are replaced with `?`.
	pub(crate) fn encode(self, text: &str, terminated: bool) -> Vec<u8> {
		match self {
			TextEncoding::Latin1 => {
				let mut out = latin1_encode_lossy(text).collect::<Vec<u8>>();
				if terminated {
					out.push(0)
				}

				out
			},
			TextEncoding::UTF16 => utf16_encode(text, u16::to_le_bytes, true, terminated),
		}
	}
}

fn latin1_encode_lossy(s: &str) -> impl Iterator<Item = u8> + '_ {
	s.chars().map(|c| {
		if (c as u32) <= 255 {
			c as u8
		} else {
			log::warn!("Character {c:?} can't be represented in Latin-1, replacing");
			b'?'
		}
	})
}

pub(crate) fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}

#[cfg(test)]
pub(crate) fn utf16_decode_bytes(bytes: &[u8]) -> String {
	let words = bytes
		.chunks_exact(2)
		.filter_map(|c| match c {
			[0xFF, 0xFE] => None,
			_ => Some(u16::from_le_bytes([c[0], c[1]])),
		})
		.collect::<Vec<_>>();

	String::from_utf16(&words).unwrap()
}
