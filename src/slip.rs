//! SLIP (Serial Line Internet Protocol) framing: the byte-stream wrapper
//! that lets an OSC packet travel over a transport with no message
//! boundaries of its own (a raw serial link, or any other stream socket).
//!
//! `END` terminates a frame; `END`/`ESC` bytes occurring in the payload are
//! escaped as two-byte sequences so the decoder can always find the next
//! frame boundary unambiguously.

use crate::{
	error::{Error, OscResult},
	limits::Limits
};

pub const END: u8 = 0xC0;
pub const ESC: u8 = 0xDB;
pub const ESC_END: u8 = 0xDC;
pub const ESC_ESC: u8 = 0xDD;

/// Encodes `packet` as a SLIP frame into `dst`, returning the number of
/// bytes written (including the trailing `END`).
pub fn encode(packet: &[u8], dst: &mut [u8]) -> OscResult<usize> {
	let mut w = 0;
	for &b in packet {
		let emitted: &[u8] = match b {
			END => &[ESC, ESC_END],
			ESC => &[ESC, ESC_ESC],
			_ => std::slice::from_ref(&b)
		};
		if w + emitted.len() > dst.len() {
			return Err(Error::DestTooSmall);
		}
		dst[w..w + emitted.len()].copy_from_slice(emitted);
		w += emitted.len();
	}
	if w + 1 > dst.len() {
		return Err(Error::DestTooSmall);
	}
	dst[w] = END;
	w += 1;
	Ok(w)
}

/// Encodes `packet` as a SLIP frame, allocating the output buffer.
pub fn encode_to_vec(packet: &[u8]) -> Vec<u8> {
	// Worst case every byte escapes to two, plus the trailing END.
	let mut out = vec![0u8; packet.len() * 2 + 1];
	let n = encode(packet, &mut out).expect("buffer sized for worst case");
	out.truncate(n);
	out
}

/// A receive-side SLIP decoder: accumulates raw framed bytes and, each time
/// an `END` completes a frame, decodes it into a packet and hands it to an
/// installed handler.
pub struct SlipDecoder<'h> {
	buf: Vec<u8>,
	limits: Limits,
	handler: Option<&'h mut dyn FnMut(&[u8]) -> OscResult<()>>
}

impl<'h> SlipDecoder<'h> {
	pub fn new() -> Self {
		Self::with_limits(Limits::default())
	}

	pub fn with_limits(limits: Limits) -> Self {
		SlipDecoder { buf: Vec::new(), limits, handler: None }
	}

	/// Installs the handler invoked with each decoded packet's bytes.
	pub fn set_handler(&mut self, handler: &'h mut dyn FnMut(&[u8]) -> OscResult<()>) {
		self.handler = Some(handler);
	}

	/// Resets the internal accumulation buffer, discarding any in-progress
	/// frame. The installed handler is unaffected.
	pub fn clear(&mut self) {
		self.buf.clear();
	}

	/// Feeds one raw transport byte into the decoder.
	///
	/// Returns `Ok(())` for every byte that doesn't complete a frame. When
	/// `byte` is `END`, the accumulated frame is decoded and the installed
	/// handler is invoked with the resulting packet bytes; the handler's
	/// error (if any) is returned here.
	pub fn feed(&mut self, byte: u8) -> OscResult<()> {
		self.buf.push(byte);
		if self.buf.len() >= self.limits.max_transport_size() {
			self.buf.clear();
			#[cfg(feature = "tracing")]
			tracing::warn!("encoded SLIP frame exceeded the transport size limit, discarding");
			return Err(Error::EncodedSlipPacketTooLong);
		}
		if byte != END {
			return Ok(());
		}

		let frame = std::mem::take(&mut self.buf);
		let decoded = match decode_frame(&frame, self.limits) {
			Ok(decoded) => decoded,
			Err(err) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(?err, "failed to decode SLIP frame");
				return Err(err);
			}
		};
		#[cfg(feature = "tracing")]
		tracing::trace!(bytes = decoded.len(), "decoded SLIP frame");
		let handler = self.handler.as_deref_mut().ok_or(Error::CallbackUndefined)?;
		handler(&decoded)
	}
}

impl<'h> Default for SlipDecoder<'h> {
	fn default() -> Self {
		Self::new()
	}
}

/// Decodes one complete SLIP frame (including its trailing `END`) into raw
/// packet bytes.
fn decode_frame(frame: &[u8], limits: Limits) -> OscResult<Vec<u8>> {
	let mut out = Vec::with_capacity(frame.len());
	let mut i = 0;
	while i < frame.len() {
		let b = frame[i];
		if b == END {
			break;
		}
		if b == ESC {
			i += 1;
			match frame.get(i) {
				Some(&ESC_END) => out.push(END),
				Some(&ESC_ESC) => out.push(ESC),
				_ => return Err(Error::UnexpectedByteAfterSlipEsc)
			}
		} else {
			out.push(b);
		}
		if out.len() > limits.max_transport_size() {
			return Err(Error::DecodedSlipPacketTooLong);
		}
		i += 1;
	}
	Ok(out)
}
