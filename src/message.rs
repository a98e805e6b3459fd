//! The OSC message codec: building, serializing and parsing a single
//! address + type-tag string + argument payload.
//!
//! A message holds two parse cursors — a type-tag index and a payload
//! offset — used only while deconstructing a parsed message. Construction
//! only ever appends; deconstruction only ever reads forward. A failed
//! typed accessor leaves both cursors untouched so the caller can retry
//! with a different accessor.

use crate::{
	error::{Error, OscResult},
	limits::Limits,
	time_tag::TimeTag,
	types::{align4, OscColor, OscMidiMessage, OscType}
};

/// An OSC message: an address pattern, a type-tag string, and an argument
/// payload encoded in type-tag order.
#[derive(Debug, Clone)]
pub struct OscMessage {
	address: String,
	/// Type-tag characters, *excluding* the leading comma (which is
	/// implicit — re-added on serialization, stripped on parse — so that
	/// round-tripping a parsed message reproduces the original bytes).
	type_tags: Vec<u8>,
	payload: Vec<u8>,
	limits: Limits,
	tag_cursor: usize,
	payload_cursor: usize
}

impl OscMessage {
	/// Creates an empty message under the default [`Limits`].
	pub fn new() -> Self {
		Self::with_limits(Limits::default())
	}

	/// Creates an empty message under custom `limits`.
	pub fn with_limits(limits: Limits) -> Self {
		OscMessage {
			address: String::new(),
			type_tags: Vec::new(),
			payload: Vec::new(),
			limits,
			tag_cursor: 0,
			payload_cursor: 0
		}
	}

	/// Clears the message back to empty and, if `pattern` is non-empty,
	/// sets it as the address.
	pub fn init(&mut self, pattern: &str) -> OscResult<()> {
		self.address.clear();
		self.type_tags.clear();
		self.payload.clear();
		self.tag_cursor = 0;
		self.payload_cursor = 0;
		if !pattern.is_empty() {
			self.set_address(pattern)?;
		}
		Ok(())
	}

	/// Replaces the address pattern outright.
	pub fn set_address(&mut self, pattern: &str) -> OscResult<()> {
		if pattern.len() > self.limits.max_address_len() {
			return Err(Error::AddressPatternTooLong);
		}
		self.address.clear();
		self.address.push_str(pattern);
		Ok(())
	}

	/// Appends characters to the address. The very first call's first
	/// character must be `/`.
	pub fn append_address(&mut self, more: &str) -> OscResult<()> {
		if self.address.is_empty() && !more.starts_with('/') {
			return Err(Error::NoSlashAtStartOfMessage);
		}
		if self.address.len() + more.len() > self.limits.max_address_len() {
			return Err(Error::AddressPatternTooLong);
		}
		self.address.push_str(more);
		Ok(())
	}

	/// The address pattern as currently set.
	pub fn address(&self) -> &str {
		&self.address
	}

	/// The type-tag characters, excluding the leading comma.
	pub fn type_tags(&self) -> &[u8] {
		&self.type_tags
	}

	fn push_tag(&mut self, tag: u8) -> OscResult<()> {
		if self.type_tags.len() >= self.limits.max_args() {
			return Err(Error::TooManyArguments);
		}
		self.type_tags.push(tag);
		Ok(())
	}

	fn push_payload(&mut self, bytes: &[u8]) -> OscResult<()> {
		if self.payload.len() + bytes.len() > self.limits.max_args_size() {
			return Err(Error::ArgumentsSizeTooLarge);
		}
		self.payload.extend_from_slice(bytes);
		Ok(())
	}

	fn push_padded_string(&mut self, s: &str) -> OscResult<()> {
		let padded_len = align4(s.len() + 1);
		let mut buf = Vec::with_capacity(padded_len);
		buf.extend_from_slice(s.as_bytes());
		buf.resize(padded_len, 0);
		self.push_payload(&buf)
	}

	pub fn add_int(&mut self, v: i32) -> OscResult<()> {
		self.push_tag(crate::types::TAG_INT)?;
		self.push_payload(&v.to_be_bytes())
	}

	pub fn add_long(&mut self, v: i64) -> OscResult<()> {
		self.push_tag(crate::types::TAG_LONG)?;
		self.push_payload(&v.to_be_bytes())
	}

	pub fn add_float(&mut self, v: f32) -> OscResult<()> {
		self.push_tag(crate::types::TAG_FLOAT)?;
		self.push_payload(&v.to_be_bytes())
	}

	pub fn add_double(&mut self, v: f64) -> OscResult<()> {
		self.push_tag(crate::types::TAG_DOUBLE)?;
		self.push_payload(&v.to_be_bytes())
	}

	pub fn add_char(&mut self, v: char) -> OscResult<()> {
		self.push_tag(crate::types::TAG_CHAR)?;
		self.push_payload(&(v as u32).to_be_bytes())
	}

	pub fn add_time(&mut self, v: TimeTag) -> OscResult<()> {
		self.push_tag(crate::types::TAG_TIME)?;
		let mut buf = [0u8; 8];
		v.write_be(&mut buf);
		self.push_payload(&buf)
	}

	pub fn add_color(&mut self, v: OscColor) -> OscResult<()> {
		self.push_tag(crate::types::TAG_COLOR)?;
		self.push_payload(&v.to_be_bytes())
	}

	pub fn add_midi(&mut self, v: OscMidiMessage) -> OscResult<()> {
		self.push_tag(crate::types::TAG_MIDI)?;
		self.push_payload(&v.to_be_bytes())
	}

	pub fn add_string(&mut self, s: &str) -> OscResult<()> {
		self.push_tag(crate::types::TAG_STRING)?;
		self.push_padded_string(s)
	}

	/// Appends a second-string (`S`) argument. Carries the same payload
	/// encoding as [`OscMessage::add_string`] — it differs only in its wire
	/// tag character.
	pub fn add_alt_string(&mut self, s: &str) -> OscResult<()> {
		self.push_tag(crate::types::TAG_ALT_STRING)?;
		self.push_padded_string(s)
	}

	pub fn add_blob(&mut self, bytes: &[u8]) -> OscResult<()> {
		self.push_tag(crate::types::TAG_BLOB)?;
		let padded_len = align4(bytes.len());
		let mut buf = Vec::with_capacity(4 + padded_len);
		buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
		buf.extend_from_slice(bytes);
		buf.resize(4 + padded_len, 0);
		self.push_payload(&buf)
	}

	pub fn add_bool(&mut self, v: bool) -> OscResult<()> {
		self.push_tag(if v { crate::types::TAG_TRUE } else { crate::types::TAG_FALSE })
	}

	pub fn add_nil(&mut self) -> OscResult<()> {
		self.push_tag(crate::types::TAG_NIL)
	}

	pub fn add_infinitum(&mut self) -> OscResult<()> {
		self.push_tag(crate::types::TAG_INFINITUM)
	}

	pub fn add_begin_array(&mut self) -> OscResult<()> {
		self.push_tag(crate::types::TAG_ARRAY_BEGIN)
	}

	pub fn add_end_array(&mut self) -> OscResult<()> {
		self.push_tag(crate::types::TAG_ARRAY_END)
	}

	/// The serialized size of this message: address + type-tag string
	/// (each padded to a 4-byte boundary) plus the raw argument payload.
	pub fn size(&self) -> usize {
		align4(self.address.len() + 1) + align4(self.type_tags.len() + 2) + self.payload.len()
	}

	/// Serializes this message into `dst`, returning the number of bytes
	/// written. If `dst` is too small, an error is returned but `dst` may
	/// have been partially written.
	pub fn serialize(&self, dst: &mut [u8]) -> OscResult<usize> {
		let mut out = crate::output::SliceOutput::new(dst);
		self.serialize_to(&mut out)
	}

	/// Serializes this message into any [`Output`](crate::output::Output)
	/// sink, returning the number of bytes written.
	pub fn serialize_to<O: crate::output::Output>(&self, out: &mut O) -> OscResult<usize> {
		if self.address.is_empty() {
			return Err(Error::UndefinedAddressPattern);
		}
		if !self.address.starts_with('/') {
			return Err(Error::NoSlashAtStartOfMessage);
		}

		let mut w = 0;
		let addr_field = align4(self.address.len() + 1);
		let mut addr_buf = vec![0u8; addr_field];
		addr_buf[..self.address.len()].copy_from_slice(self.address.as_bytes());
		w += out.write(&addr_buf)?;

		let tag_field = align4(self.type_tags.len() + 2);
		let mut tag_buf = vec![0u8; tag_field];
		tag_buf[0] = b',';
		tag_buf[1..1 + self.type_tags.len()].copy_from_slice(&self.type_tags);
		w += out.write(&tag_buf)?;

		w += out.write(&self.payload)?;

		Ok(w)
	}

	/// Parses a message from `src` under the default [`Limits`].
	pub fn parse(src: &[u8]) -> OscResult<Self> {
		Self::parse_with_limits(src, Limits::default())
	}

	/// Parses a message from `src` under custom `limits`.
	pub fn parse_with_limits(src: &[u8], limits: Limits) -> OscResult<Self> {
		if src.len() % 4 != 0 {
			return Err(Error::SizeNotMultipleOfFour);
		}
		if src.len() < limits.min_message_size() {
			return Err(Error::MessageSizeTooSmall);
		}
		if src.len() > limits.max_message_size() {
			return Err(Error::MessageSizeTooLarge);
		}
		if src[0] != b'/' {
			return Err(Error::NoSlashAtStartOfMessage);
		}

		let addr_end = src.iter().position(|&b| b == 0).ok_or(Error::SourceEndsBeforeEndOfAddress)?;
		let address = std::str::from_utf8(&src[..addr_end]).map_err(|_| Error::SourceEndsBeforeEndOfAddress)?.to_string();
		if address.len() > limits.max_address_len() {
			return Err(Error::AddressPatternTooLong);
		}
		let mut cursor = align4(addr_end + 1);
		if cursor > src.len() {
			return Err(Error::SourceEndsBeforeStartOfTypeTag);
		}

		let tag_end = src[cursor..].iter().position(|&b| b == 0).ok_or(Error::SourceEndsBeforeEndOfTypeTag)? + cursor;
		let mut raw_tags = &src[cursor..tag_end];
		if raw_tags.first() == Some(&b',') {
			raw_tags = &raw_tags[1..];
		}
		if raw_tags.len() > limits.max_args() {
			return Err(Error::TypeTagStringTooLong);
		}
		let type_tags = raw_tags.to_vec();
		cursor = align4(tag_end + 1);
		if cursor > src.len() {
			return Err(Error::UnexpectedEndOfSource);
		}

		let payload = src[cursor..].to_vec();

		Ok(OscMessage {
			address,
			type_tags,
			payload,
			limits,
			tag_cursor: 0,
			payload_cursor: 0
		})
	}

	/// `true` iff another argument is available to read at the cursor.
	///
	/// Reaches every declared argument, including the last one: comparing
	/// the cursor to `type_tags.len() - 1` (tempting, but wrong on some
	/// paths) would silently drop the final argument of every message.
	pub fn is_arg_available(&self) -> bool {
		self.tag_cursor < self.type_tags.len()
	}

	/// The type-tag character at the cursor, if any.
	pub fn arg_type(&self) -> Option<u8> {
		self.type_tags.get(self.tag_cursor).copied()
	}

	/// Advances past the current argument's type tag *without* advancing
	/// the payload cursor.
	///
	/// This preserves a deliberate quirk: skipping
	/// an argument desynchronizes the payload cursor from the type-tag
	/// cursor, so a subsequent typed read will consume bytes belonging to
	/// an earlier argument. Preserved for source fidelity; prefer
	/// [`OscMessage::skip_arg_realign`] for correct behavior.
	pub fn skip_arg(&mut self) -> OscResult<()> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		self.tag_cursor += 1;
		Ok(())
	}

	/// Like [`OscMessage::skip_arg`], but also advances the payload cursor
	/// by the size the skipped tag implies, keeping the two cursors in
	/// sync. This is the corrected alternative to that quirk.
	pub fn skip_arg_realign(&mut self) -> OscResult<()> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		let tag = self.type_tags[self.tag_cursor];
		let consumed = self.arg_payload_len(tag)?;
		if self.payload_cursor + consumed > self.payload.len() {
			return Err(Error::MessageTooShortForArgumentType);
		}
		self.tag_cursor += 1;
		self.payload_cursor += consumed;
		Ok(())
	}

	/// The number of payload bytes the given tag's value occupies at the
	/// current payload cursor (0 for non-value tags).
	fn arg_payload_len(&self, tag: u8) -> OscResult<usize> {
		use crate::types::*;
		Ok(match tag {
			TAG_INT | TAG_FLOAT | TAG_COLOR | TAG_MIDI | TAG_CHAR => 4,
			TAG_LONG | TAG_DOUBLE | TAG_TIME => 8,
			TAG_STRING | TAG_ALT_STRING => {
				let start = self.payload_cursor;
				let end = self.payload[start..].iter().position(|&b| b == 0).ok_or(Error::MessageTooShortForArgumentType)? + start;
				align4(end - start + 1)
			}
			TAG_BLOB => {
				if self.payload_cursor + 4 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				let n = u32::from_be_bytes(self.payload[self.payload_cursor..self.payload_cursor + 4].try_into().unwrap()) as usize;
				4 + align4(n)
			}
			TAG_TRUE | TAG_FALSE | TAG_NIL | TAG_INFINITUM | TAG_ARRAY_BEGIN | TAG_ARRAY_END => 0,
			_ => return Err(Error::UnexpectedArgumentType)
		})
	}

	fn take_fixed<const N: usize>(&mut self, tag: u8) -> OscResult<[u8; N]> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		if self.type_tags[self.tag_cursor] != tag {
			return Err(Error::UnexpectedArgumentType);
		}
		if self.payload_cursor + N > self.payload.len() {
			return Err(Error::MessageTooShortForArgumentType);
		}
		let mut buf = [0u8; N];
		buf.copy_from_slice(&self.payload[self.payload_cursor..self.payload_cursor + N]);
		self.tag_cursor += 1;
		self.payload_cursor += N;
		Ok(buf)
	}

	pub fn get_int(&mut self) -> OscResult<i32> {
		self.take_fixed::<4>(crate::types::TAG_INT).map(i32::from_be_bytes)
	}

	pub fn get_long(&mut self) -> OscResult<i64> {
		self.take_fixed::<8>(crate::types::TAG_LONG).map(i64::from_be_bytes)
	}

	pub fn get_float(&mut self) -> OscResult<f32> {
		self.take_fixed::<4>(crate::types::TAG_FLOAT).map(f32::from_be_bytes)
	}

	pub fn get_double(&mut self) -> OscResult<f64> {
		self.take_fixed::<8>(crate::types::TAG_DOUBLE).map(f64::from_be_bytes)
	}

	pub fn get_char(&mut self) -> OscResult<char> {
		self.take_fixed::<4>(crate::types::TAG_CHAR).map(|b| b[3] as char)
	}

	pub fn get_time(&mut self) -> OscResult<TimeTag> {
		self.take_fixed::<8>(crate::types::TAG_TIME).map(|b| TimeTag::read_be(&b))
	}

	pub fn get_color(&mut self) -> OscResult<OscColor> {
		self.take_fixed::<4>(crate::types::TAG_COLOR).map(OscColor::from_be_bytes)
	}

	pub fn get_midi(&mut self) -> OscResult<OscMidiMessage> {
		self.take_fixed::<4>(crate::types::TAG_MIDI).map(OscMidiMessage::from_be_bytes)
	}

	fn take_string(&mut self, tag: u8) -> OscResult<String> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		if self.type_tags[self.tag_cursor] != tag {
			return Err(Error::UnexpectedArgumentType);
		}
		let start = self.payload_cursor;
		let end = self.payload[start..].iter().position(|&b| b == 0).ok_or(Error::MessageTooShortForArgumentType)? + start;
		let consumed = align4(end - start + 1);
		if start + consumed > self.payload.len() {
			return Err(Error::MessageTooShortForArgumentType);
		}
		let s = std::str::from_utf8(&self.payload[start..end]).map_err(|_| Error::MessageTooShortForArgumentType)?.to_string();
		self.tag_cursor += 1;
		self.payload_cursor += consumed;
		Ok(s)
	}

	pub fn get_string(&mut self) -> OscResult<String> {
		self.take_string(crate::types::TAG_STRING)
	}

	pub fn get_alt_string(&mut self) -> OscResult<String> {
		self.take_string(crate::types::TAG_ALT_STRING)
	}

	pub fn get_blob(&mut self) -> OscResult<Vec<u8>> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		if self.type_tags[self.tag_cursor] != crate::types::TAG_BLOB {
			return Err(Error::UnexpectedArgumentType);
		}
		let start = self.payload_cursor;
		if start + 4 > self.payload.len() {
			return Err(Error::MessageTooShortForArgumentType);
		}
		let n = u32::from_be_bytes(self.payload[start..start + 4].try_into().unwrap()) as usize;
		let data_start = start + 4;
		let consumed = 4 + align4(n);
		if start + consumed > self.payload.len() {
			return Err(Error::MessageTooShortForArgumentType);
		}
		let blob = self.payload[data_start..data_start + n].to_vec();
		self.tag_cursor += 1;
		self.payload_cursor += consumed;
		Ok(blob)
	}

	fn take_marker(&mut self, tag: u8) -> OscResult<()> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		if self.type_tags[self.tag_cursor] != tag {
			return Err(Error::UnexpectedArgumentType);
		}
		self.tag_cursor += 1;
		Ok(())
	}

	pub fn get_bool(&mut self) -> OscResult<bool> {
		if !self.is_arg_available() {
			return Err(Error::NoArgumentsAvailable);
		}
		match self.type_tags[self.tag_cursor] {
			crate::types::TAG_TRUE => {
				self.tag_cursor += 1;
				Ok(true)
			}
			crate::types::TAG_FALSE => {
				self.tag_cursor += 1;
				Ok(false)
			}
			_ => Err(Error::UnexpectedArgumentType)
		}
	}

	pub fn get_nil(&mut self) -> OscResult<()> {
		self.take_marker(crate::types::TAG_NIL)
	}

	pub fn get_infinitum(&mut self) -> OscResult<()> {
		self.take_marker(crate::types::TAG_INFINITUM)
	}

	pub fn get_begin_array(&mut self) -> OscResult<()> {
		self.take_marker(crate::types::TAG_ARRAY_BEGIN)
	}

	pub fn get_end_array(&mut self) -> OscResult<()> {
		self.take_marker(crate::types::TAG_ARRAY_END)
	}

	// --- lossy coercion accessors ---
	//
	// Each peeks the current argument, converts it, and only then advances
	// the cursors — a failed conversion (wrong source tag) leaves the
	// message exactly as it was, same as the strict `get_*` accessors.

	/// Coerces the current argument to `i32`. `I` becomes `u32::MAX` as a
	/// signed bit pattern; `T`/`F`/`N` become `1`/`0`/`0`; a `c` argument is
	/// cast through its Unicode scalar value.
	pub fn get_as_i32(&mut self) -> OscResult<i32> {
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(n.to_i32())
	}

	pub fn get_as_i64(&mut self) -> OscResult<i64> {
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(n.to_i64())
	}

	pub fn get_as_f32(&mut self) -> OscResult<f32> {
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(n.to_f32())
	}

	pub fn get_as_f64(&mut self) -> OscResult<f64> {
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(n.to_f64())
	}

	pub fn get_as_bool(&mut self) -> OscResult<bool> {
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(n.to_bool())
	}

	pub fn get_as_char(&mut self) -> OscResult<char> {
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(n.to_char())
	}

	/// Coerces the current argument to a [`TimeTag`]. A native `t` argument
	/// is returned as-is; any other numeric-ish tag is reinterpreted as the
	/// 64-bit integer view of a time-tag.
	pub fn get_as_time(&mut self) -> OscResult<TimeTag> {
		if self.arg_type() == Some(crate::types::TAG_TIME) {
			return self.get_time();
		}
		let (n, tag) = self.peek_numeric()?;
		self.advance_numeric(tag);
		Ok(TimeTag::from_u64(n.to_bits_u64()))
	}

	/// Peeks the current argument as a [`Numeric`] without advancing any
	/// cursor; returns the tag too so the caller can advance afterwards.
	fn peek_numeric(&self) -> OscResult<(Numeric, u8)> {
		let tag = self.arg_type().ok_or(Error::NoArgumentsAvailable)?;
		let n = match tag {
			crate::types::TAG_INT => {
				if self.payload_cursor + 4 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				Numeric::I(i32::from_be_bytes(self.payload[self.payload_cursor..self.payload_cursor + 4].try_into().unwrap()) as i64)
			}
			crate::types::TAG_LONG => {
				if self.payload_cursor + 8 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				Numeric::I(i64::from_be_bytes(self.payload[self.payload_cursor..self.payload_cursor + 8].try_into().unwrap()))
			}
			crate::types::TAG_FLOAT => {
				if self.payload_cursor + 4 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				Numeric::F(f32::from_be_bytes(self.payload[self.payload_cursor..self.payload_cursor + 4].try_into().unwrap()) as f64)
			}
			crate::types::TAG_DOUBLE => {
				if self.payload_cursor + 8 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				Numeric::F(f64::from_be_bytes(self.payload[self.payload_cursor..self.payload_cursor + 8].try_into().unwrap()))
			}
			crate::types::TAG_CHAR => {
				if self.payload_cursor + 4 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				Numeric::Char(self.payload[self.payload_cursor + 3] as char)
			}
			crate::types::TAG_TRUE => Numeric::Bool(true),
			crate::types::TAG_FALSE => Numeric::Bool(false),
			crate::types::TAG_NIL => Numeric::Nil,
			crate::types::TAG_INFINITUM => Numeric::Inf,
			_ => return Err(Error::UnexpectedArgumentType)
		};
		Ok((n, tag))
	}

	fn advance_numeric(&mut self, tag: u8) {
		let consumed = match tag {
			crate::types::TAG_INT | crate::types::TAG_FLOAT | crate::types::TAG_CHAR => 4,
			crate::types::TAG_LONG | crate::types::TAG_DOUBLE => 8,
			_ => 0
		};
		self.tag_cursor += 1;
		self.payload_cursor += consumed;
	}

	pub fn get_as_string(&mut self) -> OscResult<String> {
		match self.arg_type() {
			Some(crate::types::TAG_STRING) => self.get_string(),
			Some(crate::types::TAG_ALT_STRING) => self.get_alt_string(),
			Some(crate::types::TAG_BLOB) => {
				let blob = self.get_blob()?;
				Ok(String::from_utf8_lossy(&blob).trim_end_matches('\0').to_string())
			}
			Some(crate::types::TAG_CHAR) => self.get_char().map(|c| c.to_string()),
			_ => Err(Error::UnexpectedArgumentType)
		}
	}

	pub fn get_as_blob(&mut self) -> OscResult<Vec<u8>> {
		match self.arg_type() {
			Some(crate::types::TAG_BLOB) => self.get_blob(),
			Some(crate::types::TAG_STRING) => self.get_string().map(|s| s.into_bytes()),
			Some(crate::types::TAG_ALT_STRING) => self.get_alt_string().map(|s| s.into_bytes()),
			Some(crate::types::TAG_CHAR) => self.get_char().map(|c| vec![c as u8]),
			_ => Err(Error::UnexpectedArgumentType)
		}
	}

	pub fn get_as_color(&mut self) -> OscResult<OscColor> {
		match self.arg_type() {
			Some(crate::types::TAG_COLOR) => self.get_color(),
			Some(crate::types::TAG_BLOB) => {
				let start = self.payload_cursor;
				if start + 4 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				let n = u32::from_be_bytes(self.payload[start..start + 4].try_into().unwrap()) as usize;
				if n != 4 {
					return Err(Error::UnexpectedArgumentType);
				}
				let blob = self.get_blob()?;
				Ok(OscColor::from_be_bytes(blob.try_into().unwrap()))
			}
			_ => Err(Error::UnexpectedArgumentType)
		}
	}

	pub fn get_as_midi(&mut self) -> OscResult<OscMidiMessage> {
		match self.arg_type() {
			Some(crate::types::TAG_MIDI) => self.get_midi(),
			Some(crate::types::TAG_BLOB) => {
				let start = self.payload_cursor;
				if start + 4 > self.payload.len() {
					return Err(Error::MessageTooShortForArgumentType);
				}
				let n = u32::from_be_bytes(self.payload[start..start + 4].try_into().unwrap()) as usize;
				if n != 4 {
					return Err(Error::UnexpectedArgumentType);
				}
				let blob = self.get_blob()?;
				Ok(OscMidiMessage::from_be_bytes(blob.try_into().unwrap()))
			}
			_ => Err(Error::UnexpectedArgumentType)
		}
	}

	/// Decodes every remaining argument into owned [`OscType`] values
	/// without disturbing this message's own parse cursors. Nested arrays
	/// (`[` / `]` markers) are reconstructed into `OscType::Array` values.
	///
	/// Convenience sugar over the cursor API for callers who would rather
	/// pattern-match a decoded argument list than drive the cursor by hand.
	pub fn args(&self) -> OscResult<Vec<OscType>> {
		let mut reader = OscMessage {
			address: String::new(),
			type_tags: self.type_tags.clone(),
			payload: self.payload.clone(),
			limits: self.limits,
			tag_cursor: 0,
			payload_cursor: 0
		};
		decode_args(&mut reader)
	}

	/// A `(address, args)` view, for callers who'd rather pattern-match an
	/// address than drive the cursor API by hand.
	pub fn as_tuple(&self) -> OscResult<(&str, Vec<OscType>)> {
		Ok((self.address(), self.args()?))
	}
}

impl Default for OscMessage {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug, Clone, Copy)]
enum Numeric {
	I(i64),
	F(f64),
	Bool(bool),
	Nil,
	Inf,
	Char(char)
}

impl Numeric {
	fn to_i32(self) -> i32 {
		match self {
			Numeric::I(v) => v as i32,
			Numeric::F(v) => v as i32,
			Numeric::Bool(true) => 1,
			Numeric::Bool(false) => 0,
			Numeric::Nil => 0,
			Numeric::Inf => u32::MAX as i32,
			Numeric::Char(c) => c as i32
		}
	}

	fn to_i64(self) -> i64 {
		match self {
			Numeric::I(v) => v,
			Numeric::F(v) => v as i64,
			Numeric::Bool(true) => 1,
			Numeric::Bool(false) => 0,
			Numeric::Nil => 0,
			Numeric::Inf => u64::MAX as i64,
			Numeric::Char(c) => c as i64
		}
	}

	fn to_f32(self) -> f32 {
		match self {
			Numeric::I(v) => v as f32,
			Numeric::F(v) => v as f32,
			Numeric::Bool(true) => 1.0,
			Numeric::Bool(false) => 0.0,
			Numeric::Nil => 0.0,
			Numeric::Inf => f32::INFINITY,
			Numeric::Char(c) => (c as u32) as f32
		}
	}

	fn to_f64(self) -> f64 {
		match self {
			Numeric::I(v) => v as f64,
			Numeric::F(v) => v,
			Numeric::Bool(true) => 1.0,
			Numeric::Bool(false) => 0.0,
			Numeric::Nil => 0.0,
			Numeric::Inf => f64::INFINITY,
			Numeric::Char(c) => (c as u32) as f64
		}
	}

	fn to_bool(self) -> bool {
		match self {
			Numeric::I(v) => v != 0,
			Numeric::F(v) => v != 0.0,
			Numeric::Bool(b) => b,
			Numeric::Nil => false,
			Numeric::Inf => true,
			Numeric::Char(c) => c != '\0'
		}
	}

	fn to_char(self) -> char {
		let code = match self {
			Numeric::I(v) => v as u32,
			Numeric::F(v) => v as u32,
			Numeric::Bool(true) => 1,
			Numeric::Bool(false) => 0,
			Numeric::Nil => 0,
			Numeric::Inf => u32::MAX,
			Numeric::Char(c) => return c
		};
		char::from_u32(code).unwrap_or('\0')
	}

	fn to_bits_u64(self) -> u64 {
		match self {
			Numeric::I(v) => v as u64,
			Numeric::F(v) => v as u64,
			Numeric::Bool(true) => 1,
			Numeric::Bool(false) => 0,
			Numeric::Nil => 0,
			Numeric::Inf => u64::MAX,
			Numeric::Char(c) => c as u64
		}
	}
}

/// Shared with [`OscMessage::args`]: walks the type-tag string, tracking a
/// stack of in-progress array frames across `[`/`]` markers.
fn decode_args(msg: &mut OscMessage) -> OscResult<Vec<OscType>> {
	let mut args = Vec::new();
	let mut stack: Vec<Vec<OscType>> = Vec::new();

	while msg.is_arg_available() {
		match msg.arg_type().unwrap() {
			crate::types::TAG_ARRAY_BEGIN => {
				msg.get_begin_array()?;
				stack.push(std::mem::take(&mut args));
			}
			crate::types::TAG_ARRAY_END => {
				msg.get_end_array()?;
				let finished = OscType::Array(std::mem::take(&mut args));
				args = stack.pop().ok_or(Error::UnexpectedArgumentType)?;
				args.push(finished);
			}
			crate::types::TAG_INT => args.push(OscType::Int(msg.get_int()?)),
			crate::types::TAG_LONG => args.push(OscType::Long(msg.get_long()?)),
			crate::types::TAG_FLOAT => args.push(OscType::Float(msg.get_float()?)),
			crate::types::TAG_DOUBLE => args.push(OscType::Double(msg.get_double()?)),
			crate::types::TAG_CHAR => args.push(OscType::Char(msg.get_char()?)),
			crate::types::TAG_TIME => args.push(OscType::Time(msg.get_time()?)),
			crate::types::TAG_COLOR => args.push(OscType::Color(msg.get_color()?)),
			crate::types::TAG_MIDI => args.push(OscType::Midi(msg.get_midi()?)),
			crate::types::TAG_STRING => args.push(OscType::String(msg.get_string()?)),
			crate::types::TAG_ALT_STRING => args.push(OscType::AltString(msg.get_alt_string()?)),
			crate::types::TAG_BLOB => args.push(OscType::Blob(msg.get_blob()?)),
			crate::types::TAG_TRUE | crate::types::TAG_FALSE => args.push(OscType::Bool(msg.get_bool()?)),
			crate::types::TAG_NIL => {
				msg.get_nil()?;
				args.push(OscType::Nil);
			}
			crate::types::TAG_INFINITUM => {
				msg.get_infinitum()?;
				args.push(OscType::Infinitum);
			}
			_ => return Err(Error::UnexpectedArgumentType)
		}
	}

	if !stack.is_empty() {
		return Err(Error::UnexpectedEndOfSource);
	}

	Ok(args)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn minimal_message_byte_layout_is_exact() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		assert_eq!(msg.size(), 8);
		let mut buf = [0u8; 8];
		let n = msg.serialize(&mut buf).unwrap();
		assert_eq!(n, 8);
		assert_eq!(buf, [0x2f, 0x61, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00]);
	}

	#[test]
	fn argument_payload_is_bounded_by_max_args_size_not_transport_size() {
		// A transport budget with plenty of headroom, but a tight argument
		// payload cap: the string below fits well within max_transport_size
		// but exceeds max_args_size, so it must be rejected on that bound.
		let limits = Limits::default().with_max_transport_size(1472).with_max_args_size(4);
		let mut msg = OscMessage::with_limits(limits);
		msg.init("/a").unwrap();
		assert!(matches!(msg.add_string("hello"), Err(Error::ArgumentsSizeTooLarge)));
	}

	#[test]
	fn typed_arguments_round_trip_and_byte_layout_is_exact() {
		let mut msg = OscMessage::new();
		msg.init("/t").unwrap();
		msg.add_int(1).unwrap();
		msg.add_float(2.5).unwrap();
		msg.add_string("hi").unwrap();
		msg.add_blob(&[0xAA, 0xBB, 0xCC]).unwrap();

		let mut buf = vec![0u8; msg.size()];
		let n = msg.serialize(&mut buf).unwrap();
		buf.truncate(n);
		let expected = [
			0x2f, 0x74, 0x00, 0x00, 0x2c, 0x69, 0x66, 0x73, 0x62, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x40, 0x20, 0x00, 0x00, 0x68, 0x69, 0x00, 0x00,
			0x00, 0x00, 0x00, 0x03, 0xAA, 0xBB, 0xCC, 0x00
		];
		assert_eq!(buf, expected);

		let mut parsed = OscMessage::parse(&buf).unwrap();
		assert_eq!(parsed.address(), "/t");
		assert_eq!(parsed.get_int().unwrap(), 1);
		assert_eq!(parsed.get_float().unwrap(), 2.5);
		assert_eq!(parsed.get_string().unwrap(), "hi");
		assert_eq!(parsed.get_blob().unwrap(), vec![0xAA, 0xBB, 0xCC]);
		assert!(!parsed.is_arg_available());
	}

	#[test]
	fn round_trip_is_byte_identical_for_arbitrary_valid_message() {
		let mut msg = OscMessage::new();
		msg.init("/foo/bar").unwrap();
		msg.add_bool(true).unwrap();
		msg.add_nil().unwrap();
		msg.add_long(-5).unwrap();
		msg.add_double(1.25).unwrap();

		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();
		assert_eq!(buf.len() % 4, 0);

		let mut reparsed = OscMessage::parse(&buf).unwrap();
		let mut buf2 = vec![0u8; reparsed.size()];
		reparsed.serialize(&mut buf2).unwrap();
		assert_eq!(buf, buf2);
	}

	#[test]
	fn parse_errors_on_truncated_argument_payload() {
		// type tag declares `i` (4 bytes) but only 2 payload bytes follow the
		// null-terminated, padded type-tag string.
		let mut src = Vec::new();
		src.extend_from_slice(b"/a\0\0"); // address, padded
		src.extend_from_slice(b",i\0\0"); // type tags, padded
		src.extend_from_slice(&[0x00, 0x01]); // only 2 of the 4 payload bytes
		src.resize(align4(src.len()), 0);

		let mut msg = OscMessage::parse(&src).unwrap();
		assert_eq!(msg.get_int(), Err(Error::MessageTooShortForArgumentType));
	}

	#[test]
	fn skip_arg_default_preserves_cursor_desync_quirk() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_int(1).unwrap();
		msg.add_int(2).unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		let mut parsed = OscMessage::parse(&buf).unwrap();
		parsed.skip_arg().unwrap();
		// Payload cursor wasn't advanced, so the "second" int actually reads
		// the first 4 bytes of the payload again.
		assert_eq!(parsed.get_int().unwrap(), 1);
	}

	#[test]
	fn skip_arg_realign_advances_both_cursors() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_int(1).unwrap();
		msg.add_int(2).unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		let mut parsed = OscMessage::parse(&buf).unwrap();
		parsed.skip_arg_realign().unwrap();
		assert_eq!(parsed.get_int().unwrap(), 2);
	}

	#[test]
	fn is_arg_available_reaches_the_final_argument() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_int(1).unwrap();
		msg.add_int(2).unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		let mut parsed = OscMessage::parse(&buf).unwrap();
		assert!(parsed.is_arg_available());
		parsed.get_int().unwrap();
		assert!(parsed.is_arg_available());
		parsed.get_int().unwrap();
		assert!(!parsed.is_arg_available());
	}

	#[test]
	fn coercion_table_numeric_and_infinitum() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_infinitum().unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		assert_eq!(OscMessage::parse(&buf).unwrap().get_as_i32().unwrap(), u32::MAX as i32);
		assert_eq!(OscMessage::parse(&buf).unwrap().get_as_f32().unwrap(), f32::INFINITY);
		assert!(OscMessage::parse(&buf).unwrap().get_as_bool().unwrap());
	}

	#[test]
	fn coercion_blob_to_color_requires_four_bytes() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_blob(&[1, 2, 3, 4]).unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		let mut parsed = OscMessage::parse(&buf).unwrap();
		let color = parsed.get_as_color().unwrap();
		assert_eq!(color, OscColor { red: 1, green: 2, blue: 3, alpha: 4 });
	}

	#[test]
	fn unexpected_type_leaves_cursors_untouched() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_int(42).unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		let mut parsed = OscMessage::parse(&buf).unwrap();
		assert_eq!(parsed.get_float(), Err(Error::UnexpectedArgumentType));
		// Retry with the correct accessor succeeds, proving cursors didn't move.
		assert_eq!(parsed.get_int().unwrap(), 42);
	}

	#[test]
	fn args_decodes_nested_array() {
		let mut msg = OscMessage::new();
		msg.init("/a").unwrap();
		msg.add_begin_array().unwrap();
		msg.add_int(1).unwrap();
		msg.add_int(2).unwrap();
		msg.add_end_array().unwrap();
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();

		let parsed = OscMessage::parse(&buf).unwrap();
		let args = parsed.args().unwrap();
		assert_eq!(args, vec![OscType::Array(vec![OscType::Int(1), OscType::Int(2)])]);
	}
}
