pub mod debug {
	pub mod error;
}

pub mod mem {
	pub mod hash;
}
