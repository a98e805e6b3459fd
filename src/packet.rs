//! The OSC packet wrapper and recursive dispatcher.
//!
//! A packet is nothing more than a transport-sized byte buffer whose first
//! byte names its own shape (`/` for a message, `#` for a bundle). Dispatch
//! walks that shape recursively, depth-first, handing every contained
//! message to an installed handler together with the innermost enclosing
//! time-tag.

use crate::{
	bundle::OscBundle,
	error::{Error, OscResult},
	limits::Limits,
	message::OscMessage,
	time_tag::TimeTag
};

/// A message handler: invoked once per message a packet's contents
/// dispatch to, with the innermost enclosing bundle time-tag (if any).
pub trait MessageHandler {
	fn handle(&mut self, time_tag: Option<TimeTag>, message: &mut OscMessage) -> OscResult<()>;
}

impl<F> MessageHandler for F
where F: FnMut(Option<TimeTag>, &mut OscMessage) -> OscResult<()>
{
	fn handle(&mut self, time_tag: Option<TimeTag>, message: &mut OscMessage) -> OscResult<()> {
		self(time_tag, message)
	}
}

/// A transport-sized buffer holding one serialized message or bundle, plus
/// the handler that `process_messages` dispatches to.
pub struct OscPacket<'h> {
	contents: Vec<u8>,
	limits: Limits,
	handler: Option<&'h mut dyn MessageHandler>
}

impl<'h> OscPacket<'h> {
	/// An empty, handler-less packet under the default [`Limits`].
	pub fn new() -> Self {
		Self::with_limits(Limits::default())
	}

	pub fn with_limits(limits: Limits) -> Self {
		OscPacket { contents: Vec::new(), limits, handler: None }
	}

	/// Clears this packet's contents; the installed handler is unaffected.
	pub fn init(&mut self) {
		self.contents.clear();
	}

	/// Installs (or replaces) the handler `process_messages` dispatches to.
	pub fn set_handler(&mut self, handler: &'h mut dyn MessageHandler) {
		self.handler = Some(handler);
	}

	/// Fills this packet with the serialized form of a message.
	pub fn init_from_message(&mut self, msg: &OscMessage) -> OscResult<()> {
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf)?;
		self.init_from_bytes(&buf)
	}

	/// Fills this packet with the serialized form of a bundle.
	pub fn init_from_bundle(&mut self, bundle: &OscBundle) -> OscResult<()> {
		let mut buf = vec![0u8; bundle.size()];
		bundle.serialize(&mut buf)?;
		self.init_from_bytes(&buf)
	}

	/// Fills this packet from raw already-serialized bytes.
	pub fn init_from_bytes(&mut self, src: &[u8]) -> OscResult<()> {
		if src.len() > self.limits.max_transport_size() {
			return Err(Error::PacketSizeTooLarge);
		}
		match src.first() {
			Some(b'/') | Some(b'#') => {}
			_ => return Err(Error::InvalidContents)
		}
		self.contents.clear();
		self.contents.extend_from_slice(src);
		Ok(())
	}

	pub fn contents(&self) -> &[u8] {
		&self.contents
	}

	/// Walks this packet's contents depth-first, invoking the installed
	/// handler once per contained message with the innermost enclosing
	/// time-tag (or `None` if the message is not inside any bundle).
	///
	/// Recursion follows the wire structure directly rather than an
	/// explicit work-stack — bundle depth is bounded by the transport size,
	/// so this never threatens to overflow the native call stack.
	pub fn process_messages(&mut self) -> OscResult<()> {
		if self.contents.is_empty() {
			return Err(Error::ContentsEmpty);
		}
		let handler = self.handler.as_deref_mut().ok_or(Error::CallbackUndefined)?;
		dispatch(&self.contents, None, self.limits, handler)
	}
}

impl<'h> Default for OscPacket<'h> {
	fn default() -> Self {
		Self::new()
	}
}

fn dispatch(contents: &[u8], time_tag: Option<TimeTag>, limits: Limits, handler: &mut dyn MessageHandler) -> OscResult<()> {
	match contents.first() {
		Some(b'/') => {
			let mut msg = match OscMessage::parse_with_limits(contents, limits) {
				Ok(msg) => msg,
				Err(err) => {
					#[cfg(feature = "tracing")]
					tracing::warn!(?err, "failed to parse message during dispatch");
					return Err(err);
				}
			};
			#[cfg(feature = "tracing")]
			tracing::trace!(address = msg.address(), ?time_tag, "dispatching message");
			handler.handle(time_tag, &mut msg)
		}
		Some(b'#') => {
			let mut bundle = match OscBundle::parse_with_limits(contents, limits) {
				Ok(bundle) => bundle,
				Err(err) => {
					#[cfg(feature = "tracing")]
					tracing::warn!(?err, "failed to parse bundle during dispatch");
					return Err(err);
				}
			};
			let inner_time_tag = Some(bundle.time_tag());
			#[cfg(feature = "tracing")]
			tracing::trace!(?inner_time_tag, "descending into bundle");
			while bundle.is_element_available() {
				let element = bundle.next_element()?;
				dispatch(element, inner_time_tag, limits, handler)?;
			}
			Ok(())
		}
		_ => Err(Error::InvalidContents)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn serialized_message(address: &str, build: impl FnOnce(&mut OscMessage)) -> Vec<u8> {
		let mut msg = OscMessage::new();
		msg.init(address).unwrap();
		build(&mut msg);
		let mut buf = vec![0u8; msg.size()];
		msg.serialize(&mut buf).unwrap();
		buf
	}

	#[test]
	fn dispatch_visits_bundle_tree_depth_first_with_innermost_time_tag() {
		let a = serialized_message("/a", |_| {});
		let b = serialized_message("/b", |m| {
			m.add_int(7).unwrap();
		});
		let c = serialized_message("/c", |m| {
			m.add_string("x").unwrap();
		});

		let mut inner = OscBundle::new(TimeTag::IMMEDIATE);
		inner.add_contents(&c).unwrap();
		let mut inner_buf = vec![0u8; inner.size()];
		inner.serialize(&mut inner_buf).unwrap();

		let mut outer = OscBundle::new(TimeTag::new(1, 0));
		outer.add_contents(&a).unwrap();
		outer.add_contents(&b).unwrap();
		outer.add_contents(&inner_buf).unwrap();
		let mut outer_buf = vec![0u8; outer.size()];
		outer.serialize(&mut outer_buf).unwrap();

		let mut seen = Vec::new();
		let mut handler = |tt: Option<TimeTag>, msg: &mut OscMessage| -> OscResult<()> {
			seen.push((tt, msg.address().to_string()));
			Ok(())
		};

		let mut packet = OscPacket::new();
		packet.init_from_bytes(&outer_buf).unwrap();
		packet.set_handler(&mut handler);
		packet.process_messages().unwrap();

		drop(packet);
		assert_eq!(seen, vec![(Some(TimeTag::new(1, 0)), "/a".to_string()), (Some(TimeTag::new(1, 0)), "/b".to_string()), (Some(TimeTag::IMMEDIATE), "/c".to_string())]);
	}

	#[test]
	fn bare_message_packet_dispatches_with_no_time_tag() {
		let a = serialized_message("/solo", |_| {});

		let mut seen = Vec::new();
		let mut handler = |tt: Option<TimeTag>, msg: &mut OscMessage| -> OscResult<()> {
			seen.push((tt, msg.address().to_string()));
			Ok(())
		};

		let mut packet = OscPacket::new();
		packet.init_from_bytes(&a).unwrap();
		packet.set_handler(&mut handler);
		packet.process_messages().unwrap();

		drop(packet);
		assert_eq!(seen, vec![(None, "/solo".to_string())]);
	}

	#[test]
	fn empty_packet_reports_contents_empty() {
		let mut handler = |_: Option<TimeTag>, _: &mut OscMessage| -> OscResult<()> { Ok(()) };
		let mut packet = OscPacket::new();
		packet.set_handler(&mut handler);
		assert_eq!(packet.process_messages(), Err(Error::ContentsEmpty));
	}

	#[test]
	fn missing_handler_reports_callback_undefined() {
		let a = serialized_message("/a", |_| {});
		let mut packet = OscPacket::new();
		packet.init_from_bytes(&a).unwrap();
		assert_eq!(packet.process_messages(), Err(Error::CallbackUndefined));
	}

	#[test]
	fn bytes_not_starting_with_slash_or_hash_are_rejected() {
		let mut packet = OscPacket::new();
		assert_eq!(packet.init_from_bytes(b"xxxx"), Err(Error::InvalidContents));
	}

	#[test]
	fn handler_error_propagates_and_stops_iteration() {
		let a = serialized_message("/a", |_| {});
		let b = serialized_message("/b", |_| {});
		let mut bundle = OscBundle::new(TimeTag::IMMEDIATE);
		bundle.add_contents(&a).unwrap();
		bundle.add_contents(&b).unwrap();
		let mut buf = vec![0u8; bundle.size()];
		bundle.serialize(&mut buf).unwrap();

		let mut seen = 0;
		let mut handler = |_: Option<TimeTag>, _: &mut OscMessage| -> OscResult<()> {
			seen += 1;
			Err(Error::CallbackUndefined)
		};

		let mut packet = OscPacket::new();
		packet.init_from_bytes(&buf).unwrap();
		packet.set_handler(&mut handler);
		let result = packet.process_messages();

		assert_eq!(result, Err(Error::CallbackUndefined));
		drop(packet);
		assert_eq!(seen, 1);
	}
}
