// Shorthand for return Err(WavTagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(WavTagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(WavTagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::WavTagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::WavTagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FileDecodingError::new("Message")
//
// Usage:
//
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($reason:literal) => {
		Into::<crate::error::WavTagError>::into(crate::error::FileDecodingError::new($reason))
	};
	(@BAIL $reason:literal) => {
		return Err(decode_err!($reason))
	};
}

pub(crate) use {decode_err, err};
