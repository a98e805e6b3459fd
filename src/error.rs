//! The dense error enum shared by every codec in this crate.
//!
//! Each variant corresponds 1:1 to a distinct failure mode of this
//! crate's codecs. Builders and parsers never collapse
//! distinct failures into a generic "parse error" — callers match on the
//! variant to decide whether a retry, a truncated buffer, or a caller bug
//! is to blame.

use thiserror::Error as ThisError;

/// Any failure a codec or dispatcher operation in this crate can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Error {
	// --- size / alignment ---
	#[error("size is not a multiple of four bytes")]
	SizeNotMultipleOfFour,
	#[error("destination buffer is too small")]
	DestTooSmall,
	#[error("packet exceeds the transport size limit")]
	PacketSizeTooLarge,
	#[error("bundle is smaller than the minimum legal size")]
	BundleSizeTooSmall,
	#[error("bundle exceeds the transport size limit")]
	BundleSizeTooLarge,
	#[error("message is smaller than the minimum legal size")]
	MessageSizeTooSmall,
	#[error("message exceeds the transport size limit")]
	MessageSizeTooLarge,
	#[error("argument payload exceeds the configured limit")]
	ArgumentsSizeTooLarge,

	// --- structural ---
	#[error("message does not start with '/'")]
	NoSlashAtStartOfMessage,
	#[error("bundle does not start with '#bundle\\0'")]
	NoHashAtStartOfBundle,
	#[error("bundle element declares a negative size")]
	NegativeBundleElementSize,
	#[error("bundle element size is invalid")]
	InvalidElementSize,
	#[error("contents are neither a message nor a bundle")]
	InvalidContents,
	#[error("packet has no contents")]
	ContentsEmpty,
	#[error("bundle has no remaining capacity for another element")]
	BundleFull,

	// --- truncation ---
	#[error("source ends before the end of the address pattern")]
	SourceEndsBeforeEndOfAddress,
	#[error("source ends before the start of the type-tag string")]
	SourceEndsBeforeStartOfTypeTag,
	#[error("source ends before the end of the type-tag string")]
	SourceEndsBeforeEndOfTypeTag,
	#[error("source ends unexpectedly")]
	UnexpectedEndOfSource,
	#[error("message is too short for the declared argument type")]
	MessageTooShortForArgumentType,
	#[error("no bundle element is available to read")]
	BundleElementNotAvailable,

	// --- parser ---
	#[error("address pattern exceeds the configured length limit")]
	AddressPatternTooLong,
	#[error("type-tag string exceeds the configured length limit")]
	TypeTagStringTooLong,
	#[error("message declares more arguments than the configured limit")]
	TooManyArguments,
	#[error("address pattern was never set")]
	UndefinedAddressPattern,
	#[error("argument accessor does not match the declared type tag")]
	UnexpectedArgumentType,
	#[error("no arguments are available to read")]
	NoArgumentsAvailable,

	// --- SLIP ---
	#[error("encoded SLIP frame exceeds the transport size limit")]
	EncodedSlipPacketTooLong,
	#[error("unexpected byte following a SLIP escape byte")]
	UnexpectedByteAfterSlipEsc,
	#[error("decoded SLIP packet exceeds the transport size limit")]
	DecodedSlipPacketTooLong,

	// --- dispatch ---
	#[error("no message handler has been installed")]
	CallbackUndefined,
	#[error("address pattern does not have enough parts")]
	NotEnoughPartsInAddressPattern,

	// --- I/O sink ---
	#[error("writing to an I/O output sink failed")]
	IoWriteFailed
}

impl Error {
	/// A fixed, testable human-readable message for this error.
	///
	/// With the `error-messages` feature (on by default) this is the same
	/// text as the [`std::fmt::Display`] impl. With the feature disabled,
	/// only the bare variant name is returned, trimming the static string
	/// table on size-constrained targets.
	pub const fn message(&self) -> &'static str {
		#[cfg(feature = "error-messages")]
		{
			self.long_message()
		}
		#[cfg(not(feature = "error-messages"))]
		{
			self.short_name()
		}
	}

	#[cfg(feature = "error-messages")]
	const fn long_message(&self) -> &'static str {
		match self {
			Error::SizeNotMultipleOfFour => "size is not a multiple of four bytes",
			Error::DestTooSmall => "destination buffer is too small",
			Error::PacketSizeTooLarge => "packet exceeds the transport size limit",
			Error::BundleSizeTooSmall => "bundle is smaller than the minimum legal size",
			Error::BundleSizeTooLarge => "bundle exceeds the transport size limit",
			Error::MessageSizeTooSmall => "message is smaller than the minimum legal size",
			Error::MessageSizeTooLarge => "message exceeds the transport size limit",
			Error::ArgumentsSizeTooLarge => "argument payload exceeds the configured limit",
			Error::NoSlashAtStartOfMessage => "message does not start with '/'",
			Error::NoHashAtStartOfBundle => "bundle does not start with '#bundle\\0'",
			Error::NegativeBundleElementSize => "bundle element declares a negative size",
			Error::InvalidElementSize => "bundle element size is invalid",
			Error::InvalidContents => "contents are neither a message nor a bundle",
			Error::ContentsEmpty => "packet has no contents",
			Error::BundleFull => "bundle has no remaining capacity for another element",
			Error::SourceEndsBeforeEndOfAddress => "source ends before the end of the address pattern",
			Error::SourceEndsBeforeStartOfTypeTag => "source ends before the start of the type-tag string",
			Error::SourceEndsBeforeEndOfTypeTag => "source ends before the end of the type-tag string",
			Error::UnexpectedEndOfSource => "source ends unexpectedly",
			Error::MessageTooShortForArgumentType => "message is too short for the declared argument type",
			Error::BundleElementNotAvailable => "no bundle element is available to read",
			Error::AddressPatternTooLong => "address pattern exceeds the configured length limit",
			Error::TypeTagStringTooLong => "type-tag string exceeds the configured length limit",
			Error::TooManyArguments => "message declares more arguments than the configured limit",
			Error::UndefinedAddressPattern => "address pattern was never set",
			Error::UnexpectedArgumentType => "argument accessor does not match the declared type tag",
			Error::NoArgumentsAvailable => "no arguments are available to read",
			Error::EncodedSlipPacketTooLong => "encoded SLIP frame exceeds the transport size limit",
			Error::UnexpectedByteAfterSlipEsc => "unexpected byte following a SLIP escape byte",
			Error::DecodedSlipPacketTooLong => "decoded SLIP packet exceeds the transport size limit",
			Error::CallbackUndefined => "no message handler has been installed",
			Error::NotEnoughPartsInAddressPattern => "address pattern does not have enough parts",
			Error::IoWriteFailed => "writing to an I/O output sink failed"
		}
	}

	const fn short_name(&self) -> &'static str {
		match self {
			Error::SizeNotMultipleOfFour => "SizeNotMultipleOfFour",
			Error::DestTooSmall => "DestTooSmall",
			Error::PacketSizeTooLarge => "PacketSizeTooLarge",
			Error::BundleSizeTooSmall => "BundleSizeTooSmall",
			Error::BundleSizeTooLarge => "BundleSizeTooLarge",
			Error::MessageSizeTooSmall => "MessageSizeTooSmall",
			Error::MessageSizeTooLarge => "MessageSizeTooLarge",
			Error::ArgumentsSizeTooLarge => "ArgumentsSizeTooLarge",
			Error::NoSlashAtStartOfMessage => "NoSlashAtStartOfMessage",
			Error::NoHashAtStartOfBundle => "NoHashAtStartOfBundle",
			Error::NegativeBundleElementSize => "NegativeBundleElementSize",
			Error::InvalidElementSize => "InvalidElementSize",
			Error::InvalidContents => "InvalidContents",
			Error::ContentsEmpty => "ContentsEmpty",
			Error::BundleFull => "BundleFull",
			Error::SourceEndsBeforeEndOfAddress => "SourceEndsBeforeEndOfAddress",
			Error::SourceEndsBeforeStartOfTypeTag => "SourceEndsBeforeStartOfTypeTag",
			Error::SourceEndsBeforeEndOfTypeTag => "SourceEndsBeforeEndOfTypeTag",
			Error::UnexpectedEndOfSource => "UnexpectedEndOfSource",
			Error::MessageTooShortForArgumentType => "MessageTooShortForArgumentType",
			Error::BundleElementNotAvailable => "BundleElementNotAvailable",
			Error::AddressPatternTooLong => "AddressPatternTooLong",
			Error::TypeTagStringTooLong => "TypeTagStringTooLong",
			Error::TooManyArguments => "TooManyArguments",
			Error::UndefinedAddressPattern => "UndefinedAddressPattern",
			Error::UnexpectedArgumentType => "UnexpectedArgumentType",
			Error::NoArgumentsAvailable => "NoArgumentsAvailable",
			Error::EncodedSlipPacketTooLong => "EncodedSlipPacketTooLong",
			Error::UnexpectedByteAfterSlipEsc => "UnexpectedByteAfterSlipEsc",
			Error::DecodedSlipPacketTooLong => "DecodedSlipPacketTooLong",
			Error::CallbackUndefined => "CallbackUndefined",
			Error::NotEnoughPartsInAddressPattern => "NotEnoughPartsInAddressPattern",
			Error::IoWriteFailed => "IoWriteFailed"
		}
	}
}

/// Shorthand for `Result<T, Error>`.
pub type OscResult<T> = Result<T, Error>;
