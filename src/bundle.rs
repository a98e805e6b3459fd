//! The OSC bundle codec: a time-tagged, recursively nestable container of
//! messages and/or other bundles.
//!
//! On the wire a bundle is the literal header `#bundle\0`, an 8-byte
//! time-tag, then zero or more *elements* — each a 4-byte big-endian size
//! followed by that many bytes of element content (a message or a nested
//! bundle, dispatched on the leading `/` or `#` byte).

use crate::{
	error::{Error, OscResult},
	limits::Limits,
	time_tag::TimeTag,
	types::align4
};

const HEADER: &[u8; 8] = b"#bundle\0";

/// A bundle: a time-tag plus a flat byte run of size-prefixed elements.
#[derive(Debug, Clone)]
pub struct OscBundle {
	time_tag: TimeTag,
	elements: Vec<u8>,
	limits: Limits,
	read_cursor: usize
}

impl OscBundle {
	/// Creates an empty bundle carrying `time_tag`, under the default
	/// [`Limits`].
	pub fn new(time_tag: TimeTag) -> Self {
		Self::with_limits(time_tag, Limits::default())
	}

	/// Creates an empty bundle carrying `time_tag`, under custom `limits`.
	pub fn with_limits(time_tag: TimeTag, limits: Limits) -> Self {
		OscBundle { time_tag, elements: Vec::new(), limits, read_cursor: 0 }
	}

	/// Resets this bundle back to the state `new(time_tag)` would produce,
	/// but reusing the same `time_tag` that was already set — i.e. clears
	/// elements without the caller having to resupply the time-tag.
	pub fn init(&mut self, time_tag: TimeTag) {
		self.time_tag = time_tag;
		self.elements.clear();
		self.read_cursor = 0;
	}

	pub fn time_tag(&self) -> TimeTag {
		self.time_tag
	}

	/// The maximum size the element area may grow to under these limits:
	/// the transport budget minus the fixed 16-byte header + time-tag.
	fn elements_capacity(&self) -> usize {
		self.limits.max_transport_size().saturating_sub(HEADER.len() + 8)
	}

	/// Bytes still available for another `add_contents` call, after
	/// reserving 4 bytes for that element's own size prefix.
	pub fn remaining_capacity(&self) -> usize {
		self.elements_capacity().saturating_sub(self.elements.len()).saturating_sub(4)
	}

	/// `true` iff this bundle holds no elements.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Clears the element area; the time-tag is preserved.
	pub fn empty(&mut self) {
		self.elements.clear();
		self.read_cursor = 0;
	}

	/// Appends an already-serialized message or bundle as a new element,
	/// preceded by its 4-byte big-endian size.
	pub fn add_contents(&mut self, contents: &[u8]) -> OscResult<()> {
		match contents.first() {
			Some(b'/') | Some(b'#') => {}
			_ => return Err(Error::InvalidContents)
		}
		if contents.len() > self.remaining_capacity() {
			return Err(Error::BundleFull);
		}
		self.elements.extend_from_slice(&(contents.len() as u32).to_be_bytes());
		self.elements.extend_from_slice(contents);
		Ok(())
	}

	/// The serialized size of this bundle: 8-byte header, 8-byte time-tag,
	/// and the raw element bytes.
	pub fn size(&self) -> usize {
		HEADER.len() + 8 + self.elements.len()
	}

	/// Serializes this bundle into `dst`, returning the number of bytes
	/// written. If `dst` is too small, an error is returned but `dst` may
	/// have been partially written.
	pub fn serialize(&self, dst: &mut [u8]) -> OscResult<usize> {
		let mut out = crate::output::SliceOutput::new(dst);
		self.serialize_to(&mut out)
	}

	/// Serializes this bundle into any [`Output`](crate::output::Output)
	/// sink, returning the number of bytes written.
	pub fn serialize_to<O: crate::output::Output>(&self, out: &mut O) -> OscResult<usize> {
		let mut w = 0;
		w += out.write(HEADER)?;
		let mut tt_buf = [0u8; 8];
		self.time_tag.write_be(&mut tt_buf);
		w += out.write(&tt_buf)?;
		w += out.write(&self.elements)?;
		Ok(w)
	}

	/// Parses a bundle from `src` under the default [`Limits`].
	pub fn parse(src: &[u8]) -> OscResult<Self> {
		Self::parse_with_limits(src, Limits::default())
	}

	/// Parses a bundle from `src` under custom `limits`.
	pub fn parse_with_limits(src: &[u8], limits: Limits) -> OscResult<Self> {
		if src.len() % 4 != 0 {
			return Err(Error::SizeNotMultipleOfFour);
		}
		if src.len() < HEADER.len() + 8 {
			return Err(Error::BundleSizeTooSmall);
		}
		if src.len() > limits.max_transport_size() {
			return Err(Error::BundleSizeTooLarge);
		}
		if &src[..HEADER.len()] != HEADER {
			return Err(Error::NoHashAtStartOfBundle);
		}
		let time_tag = TimeTag::read_be(&src[HEADER.len()..HEADER.len() + 8]);
		let elements = src[HEADER.len() + 8..].to_vec();
		Ok(OscBundle { time_tag, elements, limits, read_cursor: 0 })
	}

	/// `true` iff another element remains to be read.
	pub fn is_element_available(&self) -> bool {
		self.read_cursor < self.elements.len()
	}

	/// Reads the next element's raw content bytes (the message or nested
	/// bundle, without the size prefix).
	pub fn next_element(&mut self) -> OscResult<&[u8]> {
		if !self.is_element_available() {
			return Err(Error::BundleElementNotAvailable);
		}
		if self.read_cursor + 4 > self.elements.len() {
			return Err(Error::InvalidElementSize);
		}
		let size_bytes: [u8; 4] = self.elements[self.read_cursor..self.read_cursor + 4].try_into().unwrap();
		let signed_size = i32::from_be_bytes(size_bytes);
		if signed_size < 0 {
			return Err(Error::NegativeBundleElementSize);
		}
		let size = signed_size as usize;
		if size % 4 != 0 {
			return Err(Error::SizeNotMultipleOfFour);
		}
		let content_start = self.read_cursor + 4;
		if size > self.elements.len() - content_start {
			return Err(Error::InvalidElementSize);
		}
		self.read_cursor = content_start + size;
		Ok(&self.elements[content_start..content_start + size])
	}
}
