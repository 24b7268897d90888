use std::{fmt, hash::Hash, time::Duration};

use derive_where::derive_where;
use socketmc_util::mem::hash::FxHashMap;
use thiserror::Error;

use crate::{
	identifier::Identifier,
	time::{Clock, IntoMillis, SystemClock, TimeUnit},
	validate::{non_negative, ArgumentError, Constraint},
};

// === Errors === //

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LifecycleError {
	#[error("no lifecycle entry is stored for this key")]
	NotFound,
}

// === LifecycleMap === //

/// The schedule of a single stored key.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LifecycleEntry {
	identifier: Identifier,
	start: i64,
	duration: i64,
}

impl LifecycleEntry {
	pub fn identifier(&self) -> &Identifier {
		&self.identifier
	}

	pub fn start(&self) -> i64 {
		self.start
	}

	pub fn duration(&self) -> i64 {
		self.duration
	}

	pub fn remaining_time(&self, now: i64) -> i64 {
		if self.duration == INFINITE {
			i64::MAX
		} else {
			self.start.saturating_add(self.duration).saturating_sub(now)
		}
	}
}

/// Entry duration that never expires.
pub const INFINITE: i64 = -1;

/// A registry of keys that are only valid for a window of time.
///
/// Every key is scheduled with a start time, a duration and an [`Identifier`] correlating it with
/// whoever asked for it. Entries are never updated in place: storing a key again replaces its whole
/// schedule. Expired entries linger until the owner calls [`LifecycleMap::run`], which is expected
/// to happen once per tick before the surviving keys are iterated.
#[derive(Clone)]
#[derive_where(Default; C)]
pub struct LifecycleMap<T, C: Clock = SystemClock> {
	entries: FxHashMap<T, LifecycleEntry>,
	clock: C,
}

impl<T: fmt::Debug, C: Clock> fmt::Debug for LifecycleMap<T, C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map()
			.entries(self.entries.iter().map(|(key, entry)| (key, &entry.identifier)))
			.finish()
	}
}

impl<T: Hash + Eq> LifecycleMap<T> {
	pub fn new() -> Self {
		Self::with_clock(SystemClock)
	}
}

impl<T: Hash + Eq, C: Clock> LifecycleMap<T, C> {
	pub fn with_clock(clock: C) -> Self {
		Self {
			entries: FxHashMap::default(),
			clock,
		}
	}

	pub fn clock(&self) -> &C {
		&self.clock
	}

	// === Insertion === //

	/// Schedules `key` from `start` for `duration` milliseconds under an explicit identifier.
	pub fn put(&mut self, identifier: Identifier, key: T, start: i64, duration: i64) -> Result<(), ArgumentError> {
		non_negative("start", start)?;
		if duration < INFINITE {
			return Err(ArgumentError::new(
				"duration",
				Constraint::OutOfRange {
					min: INFINITE,
					max: i64::MAX,
				},
			));
		}

		self.entries.insert(
			key,
			LifecycleEntry {
				identifier,
				start,
				duration,
			},
		);
		Ok(())
	}

	pub fn put_random(&mut self, key: T, start: i64, duration: i64) -> Result<Identifier, ArgumentError> {
		let identifier = Identifier::random();
		self.put(identifier.clone(), key, start, duration)?;
		Ok(identifier)
	}

	/// Schedules `key` for `duration` starting now, returning the identifier it was given.
	pub fn store(&mut self, key: T, duration: impl IntoMillis) -> Result<Identifier, ArgumentError> {
		self.put_random(key, self.clock.now_millis(), duration.into_millis())
	}

	pub fn store_with_id(
		&mut self,
		identifier: Identifier,
		key: T,
		duration: impl IntoMillis,
	) -> Result<(), ArgumentError> {
		self.put(identifier, key, self.clock.now_millis(), duration.into_millis())
	}

	pub fn store_for(&mut self, key: T, duration: Duration) -> Result<Identifier, ArgumentError> {
		self.store(key, duration)
	}

	pub fn store_in(&mut self, key: T, time: i64, unit: TimeUnit) -> Result<Identifier, ArgumentError> {
		non_negative("time", time)?;
		self.store(key, unit.to_millis(time))
	}

	pub fn store_infinite(&mut self, key: T) -> Identifier {
		let identifier = Identifier::random();
		self.entries.insert(
			key,
			LifecycleEntry {
				identifier: identifier.clone(),
				start: self.clock.now_millis(),
				duration: INFINITE,
			},
		);
		identifier
	}

	// === Sweeping === //

	/// Drops every expired entry, returning how many were removed.
	pub fn run(&mut self) -> usize {
		let now = self.clock.now_millis();
		let before = self.entries.len();

		self.entries.retain(|_, entry| entry.remaining_time(now) > 0);

		let removed = before - self.entries.len();
		if removed > 0 {
			log::trace!("Swept {removed} expired lifecycle entries.");
		}
		removed
	}

	// === Queries === //

	/// Milliseconds left before `key` expires, or `-1` if it is not stored.
	pub fn remaining_time(&self, key: &T) -> i64 {
		self.entries
			.get(key)
			.map_or(-1, |entry| entry.remaining_time(self.clock.now_millis()))
	}

	pub fn entry(&self, key: &T) -> Result<&LifecycleEntry, LifecycleError> {
		self.entries.get(key).ok_or(LifecycleError::NotFound)
	}

	pub fn identifier(&self, key: &T) -> Result<&Identifier, LifecycleError> {
		self.entry(key).map(|entry| &entry.identifier)
	}

	pub fn start(&self, key: &T) -> Result<i64, LifecycleError> {
		self.entry(key).map(|entry| entry.start)
	}

	pub fn duration(&self, key: &T) -> Result<i64, LifecycleError> {
		self.entry(key).map(|entry| entry.duration)
	}

	pub fn is_infinite(&self, key: &T) -> Result<bool, LifecycleError> {
		self.entry(key).map(|entry| entry.duration == INFINITE)
	}

	pub fn contains_key(&self, key: &T) -> bool {
		self.entries.contains_key(key)
	}

	pub fn contains_identifier(&self, identifier: &Identifier) -> bool {
		self.entries.values().any(|entry| &entry.identifier == identifier)
	}

	pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> + '_ {
		self.entries.values().map(|entry| &entry.identifier)
	}

	/// Every stored key alongside its identifier.
	pub fn contents(&self) -> impl Iterator<Item = (&T, &Identifier)> + '_ {
		self.entries.iter().map(|(key, entry)| (key, &entry.identifier))
	}

	pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.entries.keys()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	// === Removal === //

	pub fn remove(&mut self, key: &T) -> Option<Identifier> {
		self.entries.remove(key).map(|entry| entry.identifier)
	}

	pub fn remove_identifier(&mut self, identifier: &Identifier) -> Option<T>
	where
		T: Clone,
	{
		let key = self
			.entries
			.iter()
			.find(|(_, entry)| &entry.identifier == identifier)
			.map(|(key, _)| key.clone())?;

		self.entries.remove(&key);
		Some(key)
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}

/// Removes `identifier` from the first map that holds it.
pub fn remove_in<'a, T, C, I>(identifier: &Identifier, maps: I) -> Option<T>
where
	T: 'a + Hash + Eq + Clone,
	C: 'a + Clock,
	I: IntoIterator<Item = &'a mut LifecycleMap<T, C>>,
{
	maps.into_iter()
		.find_map(|map| map.remove_identifier(identifier))
}

impl<'a, T, C: Clock> IntoIterator for &'a LifecycleMap<T, C> {
	type Item = &'a T;
	type IntoIter = hashbrown::hash_map::Keys<'a, T, LifecycleEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.keys()
	}
}
