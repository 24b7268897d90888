use std::{
	sync::{
		atomic::{AtomicI64, Ordering},
		Arc,
	},
	time::{Duration, SystemTime, UNIX_EPOCH},
};

// === IntoMillis === //

/// A duration that can be expressed as a (possibly negative) number of milliseconds.
///
/// Negative values are representable so that factories can reject them with a proper argument
/// error instead of silently wrapping.
pub trait IntoMillis {
	fn into_millis(self) -> i64;
}

impl IntoMillis for i64 {
	fn into_millis(self) -> i64 {
		self
	}
}

impl IntoMillis for Duration {
	fn into_millis(self) -> i64 {
		i64::try_from(self.as_millis()).unwrap_or(i64::MAX)
	}
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum TimeUnit {
	Nanoseconds,
	Microseconds,
	Milliseconds,
	Seconds,
	Minutes,
	Hours,
	Days,
}

impl TimeUnit {
	pub fn to_millis(self, time: i64) -> i64 {
		match self {
			TimeUnit::Nanoseconds => time / 1_000_000,
			TimeUnit::Microseconds => time / 1_000,
			TimeUnit::Milliseconds => time,
			TimeUnit::Seconds => time.saturating_mul(1_000),
			TimeUnit::Minutes => time.saturating_mul(60_000),
			TimeUnit::Hours => time.saturating_mul(3_600_000),
			TimeUnit::Days => time.saturating_mul(86_400_000),
		}
	}
}

// === Clock === //

pub trait Clock {
	/// Milliseconds since the unix epoch.
	fn now_millis(&self) -> i64;
}

#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_millis(&self) -> i64 {
		// A wall clock set before 1970 is treated as the epoch itself.
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, IntoMillis::into_millis)
	}
}

/// A clock that only moves when told to. Clones share the same time source.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
	now: Arc<AtomicI64>,
}

impl ManualClock {
	pub fn new(now_millis: i64) -> Self {
		Self {
			now: Arc::new(AtomicI64::new(now_millis)),
		}
	}

	pub fn set(&self, now_millis: i64) {
		self.now.store(now_millis, Ordering::Relaxed);
	}

	pub fn advance(&self, millis: i64) {
		self.now.fetch_add(millis, Ordering::Relaxed);
	}
}

impl Clock for ManualClock {
	fn now_millis(&self) -> i64 {
		self.now.load(Ordering::Relaxed)
	}
}
