//! Tuning parameters shared by every codec in this crate.
//!
//! Fixed-size embedded implementations of this protocol often bake these in
//! as compile-time constants so every buffer can live in static storage.
//! Here they're a value a caller can build per-transport: a larger
//! [`Limits::max_transport_size`] for a TCP/WebSocket session, a small one
//! for a constrained serial link.

/// Bounds applied while building, serializing and parsing OSC entities.
///
/// `Limits::default()` uses conservative defaults: a 1472-byte
/// transport budget (common Ethernet MTU minus headers), 64-byte addresses,
/// 16 arguments per message, and an argument payload capped at the
/// transport budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
	max_transport_size: usize,
	max_address_len: usize,
	max_args: usize,
	max_args_size: usize,
	big_endian_platform: bool
}

impl Limits {
	/// The default tunables: `max_transport_size = 1472`, `max_address_len = 64`,
	/// `max_args = 16`, `max_args_size = 1472`.
	pub const DEFAULT: Limits = Limits {
		max_transport_size: 1472,
		max_address_len: 64,
		max_args: 16,
		max_args_size: 1472,
		big_endian_platform: false
	};

	/// Caps packet, bundle, message and SLIP buffer sizes.
	pub const fn max_transport_size(&self) -> usize {
		self.max_transport_size
	}

	/// Max bytes of an address pattern, excluding the null terminator.
	pub const fn max_address_len(&self) -> usize {
		self.max_address_len
	}

	/// Max type-tag characters excluding the leading comma.
	pub const fn max_args(&self) -> usize {
		self.max_args
	}

	/// Max cumulative size, in bytes, of a message's encoded argument
	/// payload — distinct from [`Limits::max_transport_size`], which bounds
	/// the whole serialized packet (address + type tags + payload). Defaults
	/// to the transport budget but can be tightened independently, e.g. to
	/// reserve headroom for the address and type-tag string.
	pub const fn max_args_size(&self) -> usize {
		self.max_args_size
	}

	/// Max type-tag string length including the leading comma.
	pub const fn max_type_tag_len(&self) -> usize {
		self.max_args + 1
	}

	/// Whether the host is documented as big-endian.
	///
	/// This implementation never relies on host byte order — every wire
	/// value is assembled with explicit `to_be_bytes`/`from_be_bytes` calls
	/// — so this flag has no behavioral effect. It exists only so callers
	/// migrating a fixed-endianness configuration have somewhere to put
	/// the value.
	pub const fn big_endian_platform(&self) -> bool {
		self.big_endian_platform
	}

	/// Returns a copy of `self` with `max_transport_size` set to `size`.
	pub const fn with_max_transport_size(mut self, size: usize) -> Self {
		self.max_transport_size = size;
		self
	}

	/// Returns a copy of `self` with `max_address_len` set to `len`.
	pub const fn with_max_address_len(mut self, len: usize) -> Self {
		self.max_address_len = len;
		self
	}

	/// Returns a copy of `self` with `max_args` set to `n`.
	pub const fn with_max_args(mut self, n: usize) -> Self {
		self.max_args = n;
		self
	}

	/// Returns a copy of `self` with `max_args_size` set to `size`.
	pub const fn with_max_args_size(mut self, size: usize) -> Self {
		self.max_args_size = size;
		self
	}

	/// Returns a copy of `self` with `big_endian_platform` set to `v`.
	pub const fn with_big_endian_platform(mut self, v: bool) -> Self {
		self.big_endian_platform = v;
		self
	}

	/// Minimum legal size of a serialized message: a one-character address
	/// (`/` padded to 4) plus an empty type-tag string (`,` padded to 4).
	pub const fn min_message_size(&self) -> usize {
		8
	}

	/// Max legal size of a serialized message under these limits.
	pub const fn max_message_size(&self) -> usize {
		self.max_transport_size
	}
}

impl Default for Limits {
	fn default() -> Self {
		Limits::DEFAULT
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_documented_tunables() {
		let l = Limits::default();
		assert_eq!(l.max_transport_size(), 1472);
		assert_eq!(l.max_address_len(), 64);
		assert_eq!(l.max_args(), 16);
		assert_eq!(l.max_args_size(), 1472);
		assert_eq!(l.max_type_tag_len(), 17);
	}

	#[test]
	fn builder_overrides_fields() {
		let l = Limits::default().with_max_transport_size(512).with_max_args(4).with_max_args_size(128);
		assert_eq!(l.max_transport_size(), 512);
		assert_eq!(l.max_args(), 4);
		assert_eq!(l.max_args_size(), 128);
		assert_eq!(l.max_address_len(), 64);
	}
}
