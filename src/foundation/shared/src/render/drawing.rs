use std::{
	hash::{Hash, Hasher},
	slice, vec,
};

use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::{
	identifier::Identifier,
	param::{ParameterList, Parameterized},
	params,
	validate::{non_negative, ordered, ArgumentError},
};

use super::{Color, Text};

// === Ids === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum CommandId {
	HLine = 0,
	VLine = 1,
	EnableScissor = 2,
	DisableScissor = 3,
	Fill = 4,
	FillGradient = 5,
	DrawCenteredString = 6,
	DrawString = 7,
	DrawWordWrap = 8,
	Outline = 9,
	Blit = 10,
}

impl CommandId {
	pub const ALL: [Self; 11] = [
		Self::HLine,
		Self::VLine,
		Self::EnableScissor,
		Self::DisableScissor,
		Self::Fill,
		Self::FillGradient,
		Self::DrawCenteredString,
		Self::DrawString,
		Self::DrawWordWrap,
		Self::Outline,
		Self::Blit,
	];

	pub const fn raw(self) -> u8 {
		self as u8
	}

	pub fn from_raw(raw: u8) -> Option<Self> {
		Self::ALL.get(usize::from(raw)).copied()
	}
}

/// The render layer a command is drawn into.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
pub enum RenderMode {
	#[default]
	Default = 0,
	Overlay = 1,
	TextHighlight = 2,
	GhostRecipeOverlay = 3,
}

impl RenderMode {
	pub const ALL: [Self; 4] = [
		Self::Default,
		Self::Overlay,
		Self::TextHighlight,
		Self::GhostRecipeOverlay,
	];

	pub const fn raw(self) -> u8 {
		self as u8
	}

	pub fn from_raw(raw: u8) -> Option<Self> {
		Self::ALL.get(usize::from(raw)).copied()
	}
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ModifierId {
	Scale = 0,
	Translate = 1,
	Rotate = 2,
	RotateAround = 3,
}

impl ModifierId {
	pub const ALL: [Self; 4] = [Self::Scale, Self::Translate, Self::Rotate, Self::RotateAround];

	pub const fn raw(self) -> u8 {
		self as u8
	}

	pub fn from_raw(raw: u8) -> Option<Self> {
		Self::ALL.get(usize::from(raw)).copied()
	}
}

// === Axis === //

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Axis(Vec3);

impl Axis {
	pub const X_POSITIVE: Self = Self(Vec3::X);
	pub const X_NEGATIVE: Self = Self(Vec3::NEG_X);
	pub const Y_POSITIVE: Self = Self(Vec3::Y);
	pub const Y_NEGATIVE: Self = Self(Vec3::NEG_Y);
	pub const Z_POSITIVE: Self = Self(Vec3::Z);
	pub const Z_NEGATIVE: Self = Self(Vec3::NEG_Z);

	/// An arbitrary rotation axis. The vector is normalized.
	pub fn of(axis: Vec3) -> Result<Self, ArgumentError> {
		axis.try_normalize()
			.map(Self)
			.ok_or_else(|| ArgumentError::invalid("axis", "must be a finite, non-zero vector"))
	}

	pub fn rotation(self, radians: f32) -> Quat {
		Quat::from_axis_angle(self.0, radians)
	}
}

// === Modifier === //

/// A transformation applied to the pose stack before a command is drawn.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Modifier {
	id: ModifierId,
	parameters: ParameterList,
}

impl Modifier {
	pub fn scale(x: f32, y: f32, z: f32) -> Result<Self, ArgumentError> {
		non_negative("x", x)?;
		non_negative("y", y)?;
		non_negative("z", z)?;

		Ok(Self::from_parts(ModifierId::Scale, params![x, y, z]))
	}

	pub fn translate(x: f32, y: f32, z: f32) -> Self {
		Self::from_parts(ModifierId::Translate, params![x, y, z])
	}

	pub fn rotate(rotation: Quat) -> Self {
		Self::from_parts(ModifierId::Rotate, params![rotation])
	}

	pub fn rotate_axis(axis: Axis, radians: f32) -> Self {
		Self::rotate(axis.rotation(radians))
	}

	pub fn rotate_around(rotation: Quat, x: f32, y: f32, z: f32) -> Self {
		Self::from_parts(ModifierId::RotateAround, params![rotation, x, y, z])
	}

	pub fn rotate_axis_around(axis: Axis, radians: f32, x: f32, y: f32, z: f32) -> Self {
		Self::rotate_around(axis.rotation(radians), x, y, z)
	}

	/// Reassembles a modifier from its wire parts without re-validating them.
	pub fn from_parts(id: ModifierId, parameters: ParameterList) -> Self {
		Self { id, parameters }
	}

	pub fn id(&self) -> ModifierId {
		self.id
	}
}

impl Parameterized for Modifier {
	fn parameters(&self) -> &ParameterList {
		&self.parameters
	}
}

// === Command === //

pub type Modifiers = SmallVec<[Modifier; 2]>;

/// A single drawing operation. Equality ignores attached modifiers.
#[derive(Debug, Clone)]
pub struct Command {
	id: CommandId,
	mode: RenderMode,
	parameters: ParameterList,
	modifiers: Modifiers,
}

impl PartialEq for Command {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && self.mode == other.mode && self.parameters == other.parameters
	}
}

impl Eq for Command {}

impl Hash for Command {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
		self.mode.hash(state);
		self.parameters.hash(state);
	}
}

fn check_bounds(
	min_x: i32,
	min_y: i32,
	max_x: i32,
	max_y: i32,
) -> Result<(), ArgumentError> {
	non_negative("min_x", min_x)?;
	non_negative("min_y", min_y)?;
	non_negative("max_x", max_x)?;
	non_negative("max_y", max_y)?;
	ordered("min_x", min_x, "max_x", max_x)?;
	ordered("min_y", min_y, "max_y", max_y)
}

fn check_point(x: i32, y: i32) -> Result<(), ArgumentError> {
	non_negative("x", x)?;
	non_negative("y", y)?;
	Ok(())
}

impl Command {
	pub const DEFAULT_BLIT_SIZE: i32 = 16;
	pub const DEFAULT_TEXTURE_SIZE: i32 = 256;

	/// Reassembles a command from its wire parts without re-validating them.
	pub fn from_parts(
		id: CommandId,
		mode: RenderMode,
		parameters: ParameterList,
		modifiers: impl IntoIterator<Item = Modifier>,
	) -> Self {
		Self {
			id,
			mode,
			parameters,
			modifiers: modifiers.into_iter().collect(),
		}
	}

	fn new(id: CommandId, mode: RenderMode, parameters: ParameterList) -> Self {
		Self::from_parts(id, mode, parameters, Modifiers::new())
	}

	pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
		self.modifiers.extend(modifiers);
		self
	}

	pub fn id(&self) -> CommandId {
		self.id
	}

	pub fn mode(&self) -> RenderMode {
		self.mode
	}

	pub fn modifiers(&self) -> &[Modifier] {
		&self.modifiers
	}

	// === Lines === //

	pub fn h_line(min_x: i32, max_x: i32, y: i32, color: Color) -> Result<Self, ArgumentError> {
		Self::h_line_with(RenderMode::Default, min_x, max_x, y, color)
	}

	pub fn h_line_with(
		mode: RenderMode,
		min_x: i32,
		max_x: i32,
		y: i32,
		color: Color,
	) -> Result<Self, ArgumentError> {
		non_negative("min_x", min_x)?;
		non_negative("max_x", max_x)?;
		ordered("min_x", min_x, "max_x", max_x)?;
		non_negative("y", y)?;

		Ok(Self::new(CommandId::HLine, mode, params![min_x, max_x, y, color]))
	}

	pub fn v_line(x: i32, min_y: i32, max_y: i32, color: Color) -> Result<Self, ArgumentError> {
		Self::v_line_with(RenderMode::Default, x, min_y, max_y, color)
	}

	pub fn v_line_with(
		mode: RenderMode,
		x: i32,
		min_y: i32,
		max_y: i32,
		color: Color,
	) -> Result<Self, ArgumentError> {
		non_negative("x", x)?;
		non_negative("min_y", min_y)?;
		non_negative("max_y", max_y)?;
		ordered("min_y", min_y, "max_y", max_y)?;

		Ok(Self::new(CommandId::VLine, mode, params![x, min_y, max_y, color]))
	}

	// === Scissor === //

	pub fn enable_scissor(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Self, ArgumentError> {
		check_bounds(min_x, min_y, max_x, max_y)?;

		Ok(Self::new(
			CommandId::EnableScissor,
			RenderMode::Default,
			params![min_x, min_y, max_x, max_y],
		))
	}

	pub fn disable_scissor() -> Self {
		Self::new(CommandId::DisableScissor, RenderMode::Default, ParameterList::new())
	}

	// === Fills === //

	pub fn fill(min_x: i32, min_y: i32, max_x: i32, max_y: i32, color: Color) -> Result<Self, ArgumentError> {
		Self::fill_with(RenderMode::Default, min_x, min_y, max_x, max_y, 0, color)
	}

	pub fn fill_with(
		mode: RenderMode,
		min_x: i32,
		min_y: i32,
		max_x: i32,
		max_y: i32,
		z: i32,
		color: Color,
	) -> Result<Self, ArgumentError> {
		check_bounds(min_x, min_y, max_x, max_y)?;

		Ok(Self::new(
			CommandId::Fill,
			mode,
			params![min_x, min_y, max_x, max_y, z, color],
		))
	}

	pub fn fill_gradient(
		min_x: i32,
		min_y: i32,
		max_x: i32,
		max_y: i32,
		from: Color,
		to: Color,
	) -> Result<Self, ArgumentError> {
		Self::fill_gradient_with(RenderMode::Default, min_x, min_y, max_x, max_y, 0, from, to)
	}

	pub fn fill_gradient_with(
		mode: RenderMode,
		min_x: i32,
		min_y: i32,
		max_x: i32,
		max_y: i32,
		z: i32,
		from: Color,
		to: Color,
	) -> Result<Self, ArgumentError> {
		check_bounds(min_x, min_y, max_x, max_y)?;

		Ok(Self::new(
			CommandId::FillGradient,
			mode,
			params![min_x, min_y, max_x, max_y, z, from, to],
		))
	}

	pub fn outline(min_x: i32, min_y: i32, max_x: i32, max_y: i32, color: Color) -> Result<Self, ArgumentError> {
		check_bounds(min_x, min_y, max_x, max_y)?;

		Ok(Self::new(
			CommandId::Outline,
			RenderMode::Default,
			params![min_x, min_y, max_x, max_y, color],
		))
	}

	// === Text === //

	pub fn draw_centered_string(x: i32, y: i32, text: &impl Text, color: Color) -> Result<Self, ArgumentError> {
		check_point(x, y)?;

		Ok(Self::new(
			CommandId::DrawCenteredString,
			RenderMode::Default,
			params![x, y, text.to_json(), color],
		))
	}

	pub fn draw_string(
		x: i32,
		y: i32,
		text: &impl Text,
		color: Color,
		drop_shadow: bool,
	) -> Result<Self, ArgumentError> {
		check_point(x, y)?;

		Ok(Self::new(
			CommandId::DrawString,
			RenderMode::Default,
			params![x, y, text.to_json(), color, drop_shadow],
		))
	}

	pub fn draw_word_wrap(
		x: i32,
		y: i32,
		width: i32,
		text: &impl Text,
		color: Color,
	) -> Result<Self, ArgumentError> {
		check_point(x, y)?;
		non_negative("width", width)?;

		Ok(Self::new(
			CommandId::DrawWordWrap,
			RenderMode::Default,
			params![x, y, width, text.to_json(), color],
		))
	}

	// === Textures === //

	pub fn blit(texture: Identifier, x: i32, y: i32) -> Result<Self, ArgumentError> {
		Self::blit_sized(texture, x, y, Self::DEFAULT_BLIT_SIZE, Self::DEFAULT_BLIT_SIZE)
	}

	pub fn blit_sized(
		texture: Identifier,
		x: i32,
		y: i32,
		width: i32,
		height: i32,
	) -> Result<Self, ArgumentError> {
		Self::blit_region(texture, x, y, 0.0, 0.0, width, height)
	}

	pub fn blit_region(
		texture: Identifier,
		x: i32,
		y: i32,
		x_offset: f32,
		y_offset: f32,
		width: i32,
		height: i32,
	) -> Result<Self, ArgumentError> {
		Self::blit_full(
			texture,
			x,
			y,
			x_offset,
			y_offset,
			width,
			height,
			Self::DEFAULT_TEXTURE_SIZE,
			Self::DEFAULT_TEXTURE_SIZE,
		)
	}

	pub fn blit_full(
		texture: Identifier,
		x: i32,
		y: i32,
		x_offset: f32,
		y_offset: f32,
		width: i32,
		height: i32,
		texture_width: i32,
		texture_height: i32,
	) -> Result<Self, ArgumentError> {
		check_point(x, y)?;
		non_negative("width", width)?;
		non_negative("height", height)?;
		non_negative("texture_width", texture_width)?;
		non_negative("texture_height", texture_height)?;

		Ok(Self::new(
			CommandId::Blit,
			RenderMode::Default,
			params![
				texture,
				x,
				y,
				x_offset,
				y_offset,
				width,
				height,
				texture_width,
				texture_height
			],
		))
	}
}

impl Parameterized for Command {
	fn parameters(&self) -> &ParameterList {
		&self.parameters
	}
}

// === DrawingContextBuilder === //

/// A mutable, ordered list of commands. Freeze it with [`build`](Self::build) or
/// [`snapshot`](Self::snapshot) before handing it off.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq)]
pub struct DrawingContextBuilder {
	commands: Vec<Command>,
}

impl DrawingContextBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, command: Command) -> &mut Self {
		self.commands.push(command);
		self
	}

	pub fn with(mut self, command: Command) -> Self {
		self.commands.push(command);
		self
	}

	/// Inserts a command, shifting later ones back. `index` may equal the length.
	pub fn insert(&mut self, index: usize, command: Command) -> Result<&mut Self, ArgumentError> {
		if index > self.commands.len() {
			return Err(ArgumentError::invalid("index", "is past the end of the command list"));
		}

		self.commands.insert(index, command);
		Ok(self)
	}

	pub fn remove(&mut self, index: usize) -> Option<Command> {
		(index < self.commands.len()).then(|| self.commands.remove(index))
	}

	pub fn clear(&mut self) {
		self.commands.clear();
	}

	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// An immutable copy of the current commands. Later edits to the builder are not observed.
	pub fn snapshot(&self) -> DrawingContext {
		self.clone().build()
	}

	pub fn build(self) -> DrawingContext {
		DrawingContext {
			commands: self.commands.into(),
		}
	}
}

impl Extend<Command> for DrawingContextBuilder {
	fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
		self.commands.extend(iter);
	}
}

// === DrawingContext === //

#[derive(Debug, Clone, Default, Hash, Eq, PartialEq)]
pub struct DrawingContext {
	commands: Box<[Command]>,
}

impl DrawingContext {
	pub fn of(commands: impl IntoIterator<Item = Command>) -> Self {
		Self {
			commands: commands.into_iter().collect(),
		}
	}

	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	pub fn iter(&self) -> slice::Iter<'_, Command> {
		self.commands.iter()
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub fn to_builder(&self) -> DrawingContextBuilder {
		DrawingContextBuilder {
			commands: self.commands.to_vec(),
		}
	}
}

impl From<&DrawingContextBuilder> for DrawingContext {
	fn from(builder: &DrawingContextBuilder) -> Self {
		builder.snapshot()
	}
}

impl From<DrawingContextBuilder> for DrawingContext {
	fn from(builder: DrawingContextBuilder) -> Self {
		builder.build()
	}
}

impl FromIterator<Command> for DrawingContext {
	fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
		Self::of(iter)
	}
}

impl<'a> IntoIterator for &'a DrawingContext {
	type Item = &'a Command;
	type IntoIter = slice::Iter<'a, Command>;

	fn into_iter(self) -> Self::IntoIter {
		self.commands.iter()
	}
}

impl IntoIterator for DrawingContext {
	type Item = Command;
	type IntoIter = vec::IntoIter<Command>;

	fn into_iter(self) -> Self::IntoIter {
		self.commands.into_vec().into_iter()
	}
}
