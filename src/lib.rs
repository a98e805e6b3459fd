//! # `oscore`
//! A portable codec for [Open Sound Control](https://opensoundcontrol.stanford.edu/) 1.0:
//! message and bundle encode/decode, the address pattern matcher, a packet
//! dispatcher, and [SLIP](https://datatracker.ietf.org/doc/html/rfc1055)
//! framing for transports with no message boundaries of their own.
//!
//! This crate does no I/O. It hands you codecs and a dispatcher; you supply
//! the bytes (from a UDP socket, a serial port, a file, wherever) and a
//! handler.
//!
//! ## Examples
//!
//! ### Building and sending a message
//! ```
//! use oscore::{OscMessage, OscPacket};
//!
//! let mut msg = OscMessage::new();
//! msg.init("/synth/freq").unwrap();
//! msg.add_float(440.0).unwrap();
//!
//! let mut packet = OscPacket::new();
//! packet.init_from_message(&msg).unwrap();
//! // packet.contents() now holds the wire bytes; hand them to a transport.
//! ```
//!
//! ### Dispatching received bytes
//! ```
//! use oscore::{OscMessage, OscPacket, TimeTag};
//!
//! let mut seen = Vec::new();
//! let mut handler = |time_tag: Option<TimeTag>, msg: &mut OscMessage| -> oscore::OscResult<()> {
//! 	seen.push((time_tag, msg.address().to_string()));
//! 	Ok(())
//! };
//!
//! # let mut msg = OscMessage::new();
//! # msg.init("/ping").unwrap();
//! # let mut buf = vec![0u8; msg.size()];
//! # msg.serialize(&mut buf).unwrap();
//! let mut packet = OscPacket::new();
//! packet.init_from_bytes(&buf).unwrap();
//! packet.set_handler(&mut handler);
//! packet.process_messages().unwrap();
//! ```
//!
//! ## License
//! Licensed under MIT License or Apache-2.0.

#![allow(clippy::tabs_in_doc_comments)]

mod address;
mod bundle;
mod error;
mod limits;
mod message;
mod output;
mod packet;
mod slip;
mod time_tag;
mod types;

pub use self::{
	address::{is_literal, matches, matches_partial, part_at, part_count},
	bundle::OscBundle,
	error::{Error, OscResult},
	limits::Limits,
	message::OscMessage,
	output::Output,
	packet::{MessageHandler, OscPacket},
	slip::{self as slip_codec, SlipDecoder},
	time_tag::TimeTag,
	types::{OscColor, OscMidiMessage, OscType}
};

#[cfg(feature = "std")]
pub use self::output::IoOutput;
pub use self::output::SliceOutput;
