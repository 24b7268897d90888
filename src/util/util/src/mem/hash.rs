use std::{hash, marker::PhantomData};

// === ConstSafeBuildHasherDefault === //

/// A `BuildHasherDefault` that can be constructed in `const` contexts.
pub struct ConstSafeBuildHasherDefault<T>(PhantomData<fn() -> T>);

impl<T> ConstSafeBuildHasherDefault<T> {
	pub const fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T: Default + hash::Hasher> hash::BuildHasher for ConstSafeBuildHasherDefault<T> {
	type Hasher = T;

	fn build_hasher(&self) -> Self::Hasher {
		T::default()
	}
}

impl<T> Clone for ConstSafeBuildHasherDefault<T> {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl<T> Default for ConstSafeBuildHasherDefault<T> {
	fn default() -> Self {
		Self::new()
	}
}

// === Hash Maps === //

pub type FxHashBuilder = ConstSafeBuildHasherDefault<fxhash::FxHasher>;
pub type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxHashBuilder>;
pub type FxHashSet<T> = hashbrown::HashSet<T, FxHashBuilder>;
