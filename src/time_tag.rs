//! The OSC time-tag: an opaque 64-bit NTP-style timestamp.
//!
//! On the wire this is 8 bytes: seconds first (big-endian), then fraction
//! (big-endian). The value `0` is the sentinel "immediately / irrelevant".

#[cfg(feature = "std")]
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A time-tag: a 32-bit seconds half and a 32-bit fractional-seconds half.
///
/// `TimeTag::IMMEDIATE` (all zero bits) means "apply this bundle as soon as
/// it's received"; the core never interprets any other value, it only
/// carries it through to the dispatch handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeTag {
	pub seconds: u32,
	pub fraction: u32
}

impl TimeTag {
	/// The sentinel value meaning "now", i.e. apply immediately.
	pub const IMMEDIATE: TimeTag = TimeTag { seconds: 0, fraction: 0 };

	/// Builds a time-tag from its (seconds, fraction) halves.
	pub const fn new(seconds: u32, fraction: u32) -> Self {
		TimeTag { seconds, fraction }
	}

	/// Builds a time-tag from its full 64-bit integer view.
	pub const fn from_u64(bits: u64) -> Self {
		TimeTag {
			seconds: (bits >> 32) as u32,
			fraction: bits as u32
		}
	}

	/// Returns the full 64-bit integer view.
	pub const fn as_u64(&self) -> u64 {
		((self.seconds as u64) << 32) | (self.fraction as u64)
	}

	/// True for [`TimeTag::IMMEDIATE`].
	pub const fn is_immediate(&self) -> bool {
		self.seconds == 0 && self.fraction == 0
	}

	pub(crate) fn write_be(&self, dst: &mut [u8; 8]) {
		dst[0..4].copy_from_slice(&self.seconds.to_be_bytes());
		dst[4..8].copy_from_slice(&self.fraction.to_be_bytes());
	}

	pub(crate) fn read_be(src: &[u8]) -> Self {
		let seconds = u32::from_be_bytes([src[0], src[1], src[2], src[3]]);
		let fraction = u32::from_be_bytes([src[4], src[5], src[6], src[7]]);
		TimeTag { seconds, fraction }
	}
}

impl From<u64> for TimeTag {
	fn from(bits: u64) -> Self {
		TimeTag::from_u64(bits)
	}
}

impl From<TimeTag> for u64 {
	fn from(tt: TimeTag) -> Self {
		tt.as_u64()
	}
}

impl From<(u32, u32)> for TimeTag {
	fn from((seconds, fraction): (u32, u32)) -> Self {
		TimeTag { seconds, fraction }
	}
}

impl From<TimeTag> for (u32, u32) {
	fn from(tt: TimeTag) -> Self {
		(tt.seconds, tt.fraction)
	}
}

#[cfg(feature = "std")]
const NTP_UNIX_OFFSET: u64 = 2_208_988_800; // RFC 5905
#[cfg(feature = "std")]
const TWO_POW_32: f64 = 4_294_967_296.0;

#[cfg(feature = "std")]
impl TryFrom<SystemTime> for TimeTag {
	type Error = TimeTagError;

	/// Converts a wall-clock time into an NTP-style time-tag.
	///
	/// Lossy: the fractional half loses precision past about 5ns. Only
	/// times at or after the Unix epoch can be represented, which keeps the
	/// arithmetic within `u32` range.
	fn try_from(time: SystemTime) -> Result<TimeTag, TimeTagError> {
		let since_osc_epoch = time.duration_since(UNIX_EPOCH).map_err(|_| TimeTagError::BeforeEpoch)? + Duration::new(NTP_UNIX_OFFSET, 0);
		let seconds = u32::try_from(since_osc_epoch.as_secs()).map_err(|_| TimeTagError::Overflow)?;
		let fraction = (since_osc_epoch.subsec_nanos() as f64 / 1.0e9 * TWO_POW_32).round() as u32;
		Ok(TimeTag { seconds, fraction })
	}
}

#[cfg(feature = "std")]
impl From<TimeTag> for SystemTime {
	fn from(tt: TimeTag) -> SystemTime {
		let nanos = (tt.fraction as f64 / TWO_POW_32 * 1.0e9).round() as u32;
		let since_osc_epoch = Duration::new(tt.seconds as u64, nanos);
		UNIX_EPOCH + since_osc_epoch - Duration::new(NTP_UNIX_OFFSET, 0)
	}
}

/// An error converting a [`std::time::SystemTime`] into a [`TimeTag`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeTagError {
	#[error("time is before the Unix epoch and cannot be represented as a time-tag")]
	BeforeEpoch,
	#[error("time overflows what a time-tag can store")]
	Overflow
}
