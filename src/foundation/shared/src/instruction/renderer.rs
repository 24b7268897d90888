use glam::Mat4;

use crate::{
	param::{ParameterList, Parameterized},
	params,
	time::IntoMillis,
	validate::{non_negative, ArgumentError},
};

// === RenderInstruction === //

/// The renderer a [`RenderInstruction`] hooks into.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum RenderTarget {
	Game = 0,
}

impl RenderTarget {
	pub fn from_raw(raw: u8) -> Option<Self> {
		match raw {
			0 => Some(Self::Game),
			_ => None,
		}
	}
}

/// A single operation performed by one of the client's renderers.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RenderInstruction {
	target: RenderTarget,
	operation: u8,
	parameters: ParameterList,
}

impl RenderInstruction {
	pub fn game() -> GameRenderer {
		GameRenderer(())
	}

	/// Reassembles a render instruction from its wire parts without re-validating them.
	pub fn from_parts(target: RenderTarget, operation: u8, parameters: ParameterList) -> Self {
		Self {
			target,
			operation,
			parameters,
		}
	}

	pub fn target(&self) -> RenderTarget {
		self.target
	}

	pub fn operation(&self) -> u8 {
		self.operation
	}
}

impl Parameterized for RenderInstruction {
	fn parameters(&self) -> &ParameterList {
		&self.parameters
	}
}

/// Operations on the main game renderer.
#[derive(Debug)]
pub struct GameRenderer(());

impl GameRenderer {
	pub const TRANSFORM_ITEM_IN_HAND: u8 = 0;

	/// Applies `matrix` to the item held in the player's hand for `duration`.
	pub fn transform_item_in_hand(
		self,
		matrix: Mat4,
		duration: impl IntoMillis,
	) -> Result<RenderInstruction, ArgumentError> {
		let millis = non_negative("duration", duration.into_millis())?;

		Ok(RenderInstruction::from_parts(
			RenderTarget::Game,
			Self::TRANSFORM_ITEM_IN_HAND,
			params![matrix, millis],
		))
	}
}
