//! Utilities for working with synchsafe integers
//!
//! A synchsafe integer only uses the lower 7 bits of each byte, so that no byte of an encoded
//! size can be mistaken for the start of an MPEG frame sync (`0xFF`).

use crate::error::Result;

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::id3::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use wavtag::id3::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> wavtag::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// assert_eq!(synch_number.unsynch(), unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		// 7 bits are available per byte, shave off 1 bit per byte
		const MAXIMUM_INTEGER: u32 = u32::MAX >> 4;

		if self > MAXIMUM_INTEGER {
			log::error!("{self} doesn't fit in a synchsafe integer");
			crate::macros::err!(TooMuchData);
		}

		let n = self;
		Ok((n & 0x7F)
			| ((n & (0x7F << 7)) << 1)
			| ((n & (0x7F << 14)) << 2)
			| ((n & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		let u = self;
		((u & 0x7F00_0000) >> 3) | ((u & 0x7F_0000) >> 2) | ((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}
