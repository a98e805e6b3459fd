//! Cross-module scenarios that exercise the codec, matcher, dispatcher and
//! SLIP framer together end to end, each pinned to an exact expected byte
//! layout or dispatch order.

use oscore::{is_literal, matches, matches_partial, slip_codec, Error, OscBundle, OscMessage, OscPacket, TimeTag};

#[test]
fn scenario_1_minimal_message() {
	let mut msg = OscMessage::new();
	msg.init("/a").unwrap();
	assert_eq!(msg.size(), 8);

	let mut buf = [0u8; 8];
	let n = msg.serialize(&mut buf).unwrap();
	assert_eq!(n, 8);
	assert_eq!(buf, [0x2f, 0x61, 0x00, 0x00, 0x2c, 0x00, 0x00, 0x00]);
}

#[test]
fn scenario_2_typed_arguments_round_trip() {
	let mut msg = OscMessage::new();
	msg.init("/t").unwrap();
	msg.add_int(1).unwrap();
	msg.add_float(2.5).unwrap();
	msg.add_string("hi").unwrap();
	msg.add_blob(&[0xAA, 0xBB, 0xCC]).unwrap();

	let mut buf = vec![0u8; msg.size()];
	msg.serialize(&mut buf).unwrap();
	let expected = [
		0x2f, 0x74, 0x00, 0x00, 0x2c, 0x69, 0x66, 0x73, 0x62, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x40, 0x20, 0x00, 0x00, 0x68, 0x69, 0x00, 0x00, 0x00,
		0x00, 0x00, 0x03, 0xAA, 0xBB, 0xCC, 0x00
	];
	assert_eq!(buf, expected);

	let mut parsed = OscMessage::parse(&buf).unwrap();
	assert_eq!(parsed.get_int().unwrap(), 1);
	assert_eq!(parsed.get_float().unwrap(), 2.5);
	assert_eq!(parsed.get_string().unwrap(), "hi");
	assert_eq!(parsed.get_blob().unwrap(), vec![0xAA, 0xBB, 0xCC]);
}

#[test]
fn scenario_3_address_matching() {
	assert!(matches("/colour/b*", "/colour/blue"));
	assert!(!matches("/colour/b*", "/colour/red"));

	assert!(matches("/abc[!d-h]qrst", "/abcXqrst"));
	assert!(!matches("/abc[!d-h]qrst", "/abcdqrst"));

	assert!(matches("/{in,out,,}puts", "/inputs"));
	assert!(matches("/{in,out,,}puts", "/puts"));
	assert!(!matches("/{in,out,,}puts", "/midputs"));
}

fn serialized_message(address: &str, build: impl FnOnce(&mut OscMessage)) -> Vec<u8> {
	let mut msg = OscMessage::new();
	msg.init(address).unwrap();
	build(&mut msg);
	let mut buf = vec![0u8; msg.size()];
	msg.serialize(&mut buf).unwrap();
	buf
}

#[test]
fn scenario_4_bundle_recursion_visits_depth_first_with_innermost_time_tag() {
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
	let mut handler = |tt: Option<TimeTag>, msg: &mut OscMessage| -> oscore::OscResult<()> {
		seen.push((tt, msg.address().to_string()));
		Ok(())
	};

	let mut packet = OscPacket::new();
	packet.init_from_bytes(&outer_buf).unwrap();
	packet.set_handler(&mut handler);
	packet.process_messages().unwrap();
	drop(packet);

	assert_eq!(
		seen,
		vec![
			(Some(TimeTag::new(1, 0)), "/a".to_string()),
			(Some(TimeTag::new(1, 0)), "/b".to_string()),
			(Some(TimeTag::IMMEDIATE), "/c".to_string())
		]
	);
}

#[test]
fn scenario_5_slip_escaping_round_trip() {
	let contents = [0xC0u8, 0x00, 0xDB, 0xFF];
	let encoded = slip_codec::encode_to_vec(&contents);
	assert_eq!(encoded, vec![0xDB, 0xDC, 0x00, 0xDB, 0xDD, 0xFF, 0xC0]);

	let mut decoded = None;
	let mut handler = |bytes: &[u8]| -> oscore::OscResult<()> {
		decoded = Some(bytes.to_vec());
		Ok(())
	};
	let mut decoder = slip_codec::SlipDecoder::new();
	decoder.set_handler(&mut handler);
	for &b in &encoded {
		decoder.feed(b).unwrap();
	}
	drop(decoder);

	assert_eq!(decoded.unwrap(), contents.to_vec());
}

#[test]
fn scenario_6_error_surfacing() {
	let mut src = Vec::new();
	src.extend_from_slice(b"/a\0\0");
	src.extend_from_slice(b",i\0\0");
	src.extend_from_slice(&[0x00, 0x01]); // truncated: only 2 of 4 payload bytes
	src.resize((src.len() + 3) & !3, 0);
	let mut msg = OscMessage::parse(&src).unwrap();
	assert_eq!(msg.get_int(), Err(Error::MessageTooShortForArgumentType));

	let mut bundle_src = Vec::new();
	bundle_src.extend_from_slice(b"#bundle\0");
	bundle_src.extend_from_slice(&[0; 8]);
	bundle_src.extend_from_slice(&(-4i32).to_be_bytes());
	let mut bundle = OscBundle::parse(&bundle_src).unwrap();
	assert_eq!(bundle.next_element(), Err(Error::NegativeBundleElementSize));
}

#[test]
fn universal_round_trip_alignment_and_capacity_monotonicity() {
	let mut msg = OscMessage::new();
	msg.init("/foo/bar").unwrap();
	msg.add_bool(true).unwrap();
	msg.add_long(-5).unwrap();
	let mut buf = vec![0u8; msg.size()];
	msg.serialize(&mut buf).unwrap();
	assert_eq!(buf.len() % 4, 0);

	let reparsed = OscMessage::parse(&buf).unwrap();
	let mut buf2 = vec![0u8; reparsed.size()];
	reparsed.serialize(&mut buf2).unwrap();
	assert_eq!(buf, buf2);

	let mut bundle = OscBundle::new(TimeTag::IMMEDIATE);
	let before = bundle.remaining_capacity();
	bundle.add_contents(&buf).unwrap();
	assert_eq!(before - bundle.remaining_capacity(), buf.len() + 4);
}

#[test]
fn matcher_totality_and_literal_equivalence() {
	// Every well-formed address pattern starts with '/', so an empty prefix
	// is always a valid (trivial) prefix of whatever it would match.
	assert!(matches_partial("/a", ""));
	assert!(matches_partial("/", ""));
	for (p, a) in [("/colour/b*", "/colour/blue"), ("/{in,out}puts", "/inputs")] {
		assert!(matches(p, a));
		assert!(matches_partial(p, a));
	}
	assert!(is_literal("/a/b"));
	assert!(matches("/a/b", "/a/b"));
	assert!(!matches("/a/b", "/a/c"));
}
