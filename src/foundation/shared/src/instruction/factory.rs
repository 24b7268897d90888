use std::io::{self, Read};

use thiserror::Error;
use uuid::Uuid;

use crate::{
	identifier::Identifier,
	param::{ParamValue, ParameterList, Uri},
	params,
	render::{raw_text_json, Color, DrawingContext, RenderBuffer, Text},
	screen::{DefaultScreen, Overlay, Toast},
	time::IntoMillis,
	validate::{alpha, in_range, non_negative, not_empty, ArgumentError, Constraint},
	window::{WindowDialogue, WindowIcon},
};

use super::{Instruction, InstructionId, RenderInstruction};

// === Errors === //

#[derive(Debug, Error)]
pub enum InstructionError {
	#[error(transparent)]
	Argument(#[from] ArgumentError),
	#[error("failed to read instruction payload")]
	Io(#[from] io::Error),
}

// === Validation helpers === //

const OPAQUE: u32 = 0xFF000000;

fn duration(millis: impl IntoMillis) -> Result<i64, ArgumentError> {
	non_negative("duration", millis.into_millis())
}

fn point(x: i32, y: i32) -> Result<(), ArgumentError> {
	non_negative("x", x)?;
	non_negative("y", y)?;
	Ok(())
}

fn rect(x: i32, y: i32, width: i32, height: i32) -> Result<(), ArgumentError> {
	point(x, y)?;
	non_negative("width", width)?;
	non_negative("height", height)?;
	Ok(())
}

fn with_alpha(argument: &'static str, color: Color, value: i32) -> Result<Color, ArgumentError> {
	let value = alpha(argument, value)?;
	Ok(Color::from_argb(color.rgb_bits() | (u32::from(value) << 24)))
}

fn opaque(color: Color) -> Color {
	Color::from_argb(color.argb() | OPAQUE)
}

/// Checks an address against `local@domain`, using the character sets mail clients accept.
pub fn is_email_address(email: &str) -> bool {
	let Some((local, domain)) = email.split_once('@') else {
		return false;
	};

	let local_ok = !local.is_empty()
		&& local
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || "_!#$%&'*+/=?`{|}~^.-".contains(c));

	let domain_ok = !domain.is_empty()
		&& domain
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

	local_ok && domain_ok
}

fn build(id: InstructionId, parameters: ParameterList) -> Instruction {
	Instruction::from_parts(id, parameters)
}

// === Factories === //

impl Instruction {
	pub const DEFAULT_TEXT_COLOR: Color = Color::WHITE;
	pub const DEFAULT_BEAM_COLOR: u32 = 0xF9FFFE;
	pub const DEFAULT_BEAM_RADIUS: f32 = 0.2;
	pub const DEFAULT_GLOW_RADIUS: f32 = 0.25;

	/// A no-op used to check that a client is listening.
	pub fn ping() -> Self {
		build(InstructionId::Ping, ParameterList::new())
	}

	// === Text === //

	pub fn draw_text(x: i32, y: i32, text: &str, millis: impl IntoMillis) -> Result<Self, ArgumentError> {
		Self::draw_text_argb(x, y, text, Self::DEFAULT_TEXT_COLOR, true, millis)
	}

	pub fn draw_text_colored(
		x: i32,
		y: i32,
		text: &str,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::draw_text_argb(x, y, text, opaque(color), true, millis)
	}

	pub fn draw_text_alpha(
		x: i32,
		y: i32,
		text: &str,
		color: Color,
		alpha: i32,
		drop_shadow: bool,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		not_empty("text", text)?;
		let color = with_alpha("alpha", color, alpha)?;

		Self::draw_text_argb(x, y, text, color, drop_shadow, millis)
	}

	pub fn draw_text_argb(
		x: i32,
		y: i32,
		text: &str,
		color: Color,
		drop_shadow: bool,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		not_empty("text", text)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawText,
			params![x, y, raw_text_json(text), color, drop_shadow, millis],
		))
	}

	pub fn draw_rich_text(
		x: i32,
		y: i32,
		text: &impl Text,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawText,
			params![x, y, text.to_json(), text.color(), text.drop_shadow(), millis],
		))
	}

	// === Shapes === //

	fn shape(
		kind: &str,
		x: i32,
		y: i32,
		extent: i32,
		extent_name: &'static str,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		non_negative(extent_name, extent)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawShape,
			params![kind, x, y, extent, color, millis],
		))
	}

	pub fn draw_rect(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::fill_rect(x, y, width, height, Color::WHITE, millis)
	}

	pub fn draw_rect_colored(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::fill_rect(x, y, width, height, opaque(color), millis)
	}

	pub fn draw_rect_alpha(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		color: Color,
		alpha: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		let color = with_alpha("alpha", color, alpha)?;

		Self::fill_rect(x, y, width, height, color, millis)
	}

	fn fill_rect(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawShape,
			params!["fill", x, y, width, height, color, millis],
		))
	}

	pub fn draw_gradient_rect(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		from: Color,
		to: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::gradient_rect(x, y, width, height, opaque(from), opaque(to), 0, millis)
	}

	pub fn draw_gradient_rect_alpha(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		from: Color,
		from_alpha: i32,
		to: Color,
		to_alpha: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::draw_gradient_rect_alpha_z(x, y, width, height, from, from_alpha, to, to_alpha, 0, millis)
	}

	pub fn draw_gradient_rect_alpha_z(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		from: Color,
		from_alpha: i32,
		to: Color,
		to_alpha: i32,
		z: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		let from = with_alpha("from_alpha", from, from_alpha)?;
		let to = with_alpha("to_alpha", to, to_alpha)?;

		Self::gradient_rect(x, y, width, height, from, to, z, millis)
	}

	fn gradient_rect(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		from: Color,
		to: Color,
		z: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawShape,
			params!["gradient", x, y, width, height, from, to, z, millis],
		))
	}

	pub fn draw_vertical_line(x: i32, y: i32, height: i32, millis: impl IntoMillis) -> Result<Self, ArgumentError> {
		Self::shape("line_v", x, y, height, "height", Color::WHITE, millis)
	}

	pub fn draw_vertical_line_colored(
		x: i32,
		y: i32,
		height: i32,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::shape("line_v", x, y, height, "height", opaque(color), millis)
	}

	pub fn draw_vertical_line_alpha(
		x: i32,
		y: i32,
		height: i32,
		color: Color,
		alpha: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		non_negative("height", height)?;
		let color = with_alpha("alpha", color, alpha)?;

		Self::shape("line_v", x, y, height, "height", color, millis)
	}

	pub fn draw_horizontal_line(x: i32, y: i32, width: i32, millis: impl IntoMillis) -> Result<Self, ArgumentError> {
		Self::shape("line_h", x, y, width, "width", Color::WHITE, millis)
	}

	pub fn draw_horizontal_line_colored(
		x: i32,
		y: i32,
		width: i32,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::shape("line_h", x, y, width, "width", opaque(color), millis)
	}

	pub fn draw_horizontal_line_alpha(
		x: i32,
		y: i32,
		width: i32,
		color: Color,
		alpha: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		non_negative("width", width)?;
		let color = with_alpha("alpha", color, alpha)?;

		Self::shape("line_h", x, y, width, "width", color, millis)
	}

	pub fn draw_buffer(buffer: RenderBuffer, millis: impl IntoMillis) -> Result<Self, ArgumentError> {
		let millis = duration(millis)?;
		Ok(build(InstructionId::DrawBuffer, params![buffer, millis]))
	}

	pub fn draw_context(context: impl Into<DrawingContext>, millis: impl IntoMillis) -> Result<Self, ArgumentError> {
		let millis = duration(millis)?;
		Ok(build(InstructionId::DrawContext, params![context.into(), millis]))
	}

	// === Textures and items === //

	pub fn draw_texture(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		texture: Identifier,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawTexture,
			params![x, y, width, height, texture, 0, 0, -1, -1, millis],
		))
	}

	pub fn draw_texture_from(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		texture: Identifier,
		start_left: i32,
		start_top: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		non_negative("start_left", start_left)?;
		non_negative("start_top", start_top)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawTexture,
			params![x, y, width, height, texture, start_left, start_top, -1, -1, millis],
		))
	}

	/// Draws part of a texture. `-1` region sizes stand for the full draw size.
	pub fn draw_texture_region(
		x: i32,
		y: i32,
		width: i32,
		height: i32,
		texture: Identifier,
		start_left: i32,
		start_top: i32,
		region_width: i32,
		region_height: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		rect(x, y, width, height)?;
		non_negative("start_left", start_left)?;
		non_negative("start_top", start_top)?;
		if region_width != -1 {
			non_negative("region_width", region_width)?;
		}
		if region_height != -1 {
			non_negative("region_height", region_height)?;
		}
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawTexture,
			params![
				x,
				y,
				width,
				height,
				texture,
				start_left,
				start_top,
				region_width,
				region_height,
				millis
			],
		))
	}

	pub fn draw_itemstack(
		x: i32,
		y: i32,
		item: Identifier,
		count: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		in_range("count", count, 1, 64)?;
		let millis = duration(millis)?;

		Ok(build(InstructionId::DrawItemStack, params![x, y, item, count, millis]))
	}

	// === Beacon beams === //

	pub fn draw_beacon_beam(
		x: i32,
		y: i32,
		z: i32,
		height: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::beacon_beam(
			x,
			y,
			z,
			height,
			Color::from_argb(Self::DEFAULT_BEAM_COLOR),
			0,
			Self::DEFAULT_BEAM_RADIUS,
			Self::DEFAULT_GLOW_RADIUS,
			millis,
		)
	}

	pub fn draw_beacon_beam_colored(
		x: i32,
		y: i32,
		z: i32,
		height: i32,
		color: Color,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::draw_beacon_beam_offset(x, y, z, height, color, 0, millis)
	}

	pub fn draw_beacon_beam_offset(
		x: i32,
		y: i32,
		z: i32,
		height: i32,
		color: Color,
		y_offset: i32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::draw_beacon_beam_full(
			x,
			y,
			z,
			height,
			color,
			y_offset,
			Self::DEFAULT_BEAM_RADIUS,
			Self::DEFAULT_GLOW_RADIUS,
			millis,
		)
	}

	pub fn draw_beacon_beam_full(
		x: i32,
		y: i32,
		z: i32,
		height: i32,
		color: Color,
		y_offset: i32,
		beam_radius: f32,
		glow_radius: f32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		Self::beacon_beam(x, y, z, height, opaque(color), y_offset, beam_radius, glow_radius, millis)
	}

	fn beacon_beam(
		x: i32,
		y: i32,
		z: i32,
		height: i32,
		color: Color,
		y_offset: i32,
		beam_radius: f32,
		glow_radius: f32,
		millis: impl IntoMillis,
	) -> Result<Self, ArgumentError> {
		point(x, y)?;
		non_negative("z", z)?;
		non_negative("height", height)?;
		non_negative("y_offset", y_offset)?;
		non_negative("beam_radius", beam_radius)?;
		non_negative("glow_radius", glow_radius)?;
		let millis = duration(millis)?;

		Ok(build(
			InstructionId::DrawBeaconBeam,
			params![x, y, z, height, color, y_offset, beam_radius, glow_radius, millis],
		))
	}

	// === Audio === //

	pub fn play_audio(audio: impl Into<Vec<u8>>) -> Result<Self, ArgumentError> {
		let audio = audio.into();
		if audio.is_empty() {
			return Err(ArgumentError::new("audio", Constraint::Empty));
		}

		Ok(build(InstructionId::PlayAudio, params![audio]))
	}

	pub fn play_audio_from(mut reader: impl Read) -> Result<Self, InstructionError> {
		let mut audio = Vec::new();
		reader.read_to_end(&mut audio)?;

		Ok(Self::play_audio(audio)?)
	}

	pub fn narrate(text: &str, interrupt: bool) -> Result<Self, ArgumentError> {
		not_empty("text", text)?;
		Ok(build(InstructionId::Narrate, params![text, interrupt]))
	}

	pub fn os_beep() -> Self {
		build(InstructionId::OsBeep, ParameterList::new())
	}

	// === Screens === //

	pub fn log_message(message: &str) -> Result<Self, ArgumentError> {
		not_empty("message", message)?;
		Ok(build(InstructionId::LogMessage, params![message]))
	}

	pub fn open_book_and_quill() -> Self {
		build(InstructionId::OpenBookAndQuill, ParameterList::new())
	}

	pub fn open_screen(screen: DefaultScreen) -> Self {
		build(InstructionId::OpenScreen, params![screen.name()])
	}

	pub fn close_screen() -> Self {
		build(InstructionId::CloseScreen, ParameterList::new())
	}

	pub fn renderer(instruction: RenderInstruction) -> Self {
		build(InstructionId::Renderer, params![instruction])
	}

	pub fn display_toast(toast: Toast) -> Self {
		build(InstructionId::DisplayToast, params![toast])
	}

	/// Replaces the current overlay, or removes it when `overlay` is `None`.
	pub fn set_overlay(overlay: Option<Overlay>) -> Self {
		build(InstructionId::SetOverlay, params![overlay])
	}

	// === Window === //

	pub fn set_window_icon(png: impl Into<Vec<u8>>) -> Result<Self, ArgumentError> {
		const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

		let png = png.into();
		if png.is_empty() {
			return Err(ArgumentError::new("icon", Constraint::Empty));
		}
		if !png.starts_with(PNG_SIGNATURE) {
			return Err(ArgumentError::invalid("icon", "must be a PNG image"));
		}

		Ok(build(InstructionId::SetWindowIcon, params![png]))
	}

	pub fn set_window_title(title: &str) -> Result<Self, ArgumentError> {
		not_empty("title", title)?;
		Ok(build(InstructionId::SetWindowTitle, params![title]))
	}

	pub fn show_players(players: impl IntoIterator<Item = Uuid>) -> Result<Self, ArgumentError> {
		Self::player_list(InstructionId::ShowPlayers, players)
	}

	pub fn hide_players(players: impl IntoIterator<Item = Uuid>) -> Result<Self, ArgumentError> {
		Self::player_list(InstructionId::HidePlayers, players)
	}

	fn player_list(id: InstructionId, players: impl IntoIterator<Item = Uuid>) -> Result<Self, ArgumentError> {
		let players = players.into_iter().map(ParamValue::Uuid).collect::<ParameterList>();
		if players.is_empty() {
			return Err(ArgumentError::new("players", Constraint::Empty));
		}

		Ok(build(id, players))
	}

	// === Desktop === //

	pub fn open_link(uri: Uri) -> Self {
		build(InstructionId::OpenLink, params![uri])
	}

	pub fn mailto(email: &str) -> Result<Self, ArgumentError> {
		if !is_email_address(email) {
			return Err(ArgumentError::invalid("email", "must be a valid email address"));
		}

		Self::mailto_uri(Uri::parse(format!("mailto:{email}"))?)
	}

	pub fn mailto_uri(uri: Uri) -> Result<Self, ArgumentError> {
		if uri.scheme() != "mailto" {
			return Err(ArgumentError::invalid("uri", "must be a mailto: URI"));
		}

		Ok(build(InstructionId::Mailto, params![uri]))
	}

	pub fn external_window_popup(title: &str, message: &str, icon: WindowIcon) -> Result<Self, ArgumentError> {
		not_empty("title", title)?;
		not_empty("message", message)?;

		Ok(build(
			InstructionId::ExternalWindowPopup,
			params![title, message, icon.name()],
		))
	}

	pub fn external_window_message_box(
		title: &str,
		message: &str,
		dialogue: WindowDialogue,
		icon: WindowIcon,
		default_button: bool,
	) -> Result<Self, ArgumentError> {
		not_empty("title", title)?;
		not_empty("message", message)?;

		Ok(build(
			InstructionId::ExternalWindowMessageBox,
			params![title, message, dialogue.name(), icon.name(), default_button],
		))
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;
	use crate::{
		param::Parameterized,
		permission::ModPermission,
		render::{Command, DrawingContextBuilder, PlainText},
	};

	#[test]
	fn draw_text_scenario() {
		let instruction = Instruction::draw_text(10, 20, "Hi", Duration::from_millis(250)).unwrap();

		assert_eq!(instruction.id(), "draw_text");
		assert_eq!(instruction.permission(), ModPermission::UseGui);
		assert_eq!(
			instruction.parameters(),
			&params![10, 20, "{\"text\": \"Hi\"}", Color::WHITE, true, 250i64]
		);
		assert_eq!(instruction.int_parameter(3), Ok(0xFFFFFFFFu32 as i32));
	}

	#[test]
	fn draw_rect_positional_order() {
		let instruction = Instruction::draw_rect_colored(1, 2, 3, 4, Color::RED, 500).unwrap();

		assert_eq!(
			instruction.parameters(),
			&params!["fill", 1, 2, 3, 4, Color::RED, 500i64]
		);
		assert_eq!(instruction.first_string_parameter(), Ok("fill"));
		assert_eq!(instruction.last_long_parameter(), Ok(500));
	}

	#[test]
	fn rejects_invalid_domains() {
		let err = Instruction::draw_text(-1, 0, "a", 100).unwrap_err();
		assert_eq!(err.argument, "x");
		assert_eq!(err.constraint, Constraint::Negative);

		assert!(Instruction::draw_rect_alpha(0, 0, 5, 5, Color::RED, 256, 100).is_err());
		assert!(Instruction::draw_text(0, 0, "", 100).is_err());
		assert!(Instruction::draw_rect(0, 0, 5, 5, -1).is_err());
		assert!(Instruction::draw_horizontal_line_alpha(0, 0, 5, Color::RED, 10, -3).is_err());
		assert!(Instruction::draw_itemstack(0, 0, Identifier::minecraft("stone").unwrap(), 65, 10).is_err());
		assert!(Instruction::show_players([]).is_err());
	}

	#[test]
	fn colors_are_normalized() {
		let translucent = Color::from_argb(0x10336699);

		let line = Instruction::draw_vertical_line_colored(0, 0, 5, translucent, 10).unwrap();
		assert_eq!(line.int_parameter(4), Ok(0xFF336699u32 as i32));

		let alpha = Instruction::draw_text_alpha(0, 0, "a", translucent, 0x80, false, 10).unwrap();
		assert_eq!(alpha.int_parameter(3), Ok(0x80336699u32 as i32));
		assert_eq!(alpha.bool_parameter(4), Ok(false));

		let gradient = Instruction::draw_gradient_rect_alpha_z(
			0,
			0,
			1,
			1,
			Color::RED,
			0x10,
			Color::BLUE,
			0x20,
			7,
			10,
		)
		.unwrap();
		assert_eq!(gradient.int_parameter(5), Ok(0x10FF0000));
		assert_eq!(gradient.int_parameter(6), Ok(0x200000FF));
		assert_eq!(gradient.int_parameter(7), Ok(7));

		let flat = Instruction::draw_gradient_rect_alpha(0, 0, 1, 1, Color::RED, 0x10, Color::BLUE, 0x20, 10).unwrap();
		assert_eq!(flat.int_parameter(5), Ok(0x10FF0000));
		assert_eq!(flat.int_parameter(7), Ok(0));
		assert!(Instruction::draw_gradient_rect_alpha(0, 0, 1, 1, Color::RED, 256, Color::BLUE, 0, 10).is_err());

		let solid = Instruction::draw_gradient_rect(0, 0, 1, 1, translucent, Color::BLUE, 10).unwrap();
		assert_eq!(solid.int_parameter(5), Ok(0xFF336699u32 as i32));

		let beam = Instruction::draw_beacon_beam_colored(0, 0, 0, 8, translucent, 10).unwrap();
		assert_eq!(beam.int_parameter(4), Ok(0xFF336699u32 as i32));
		let beam = Instruction::draw_beacon_beam_full(0, 0, 0, 8, translucent, 2, 0.2, 0.25, 10).unwrap();
		assert_eq!(beam.int_parameter(4), Ok(0xFF336699u32 as i32));
	}

	#[test]
	fn texture_regions() {
		let texture = Identifier::minecraft("textures/gui/icons.png").unwrap();

		let full = Instruction::draw_texture(1, 2, 16, 16, texture.clone(), 10).unwrap();
		assert_eq!(full.int_parameter(7), Ok(-1));
		assert_eq!(full.parameters().len(), 10);

		let region =
			Instruction::draw_texture_region(1, 2, 16, 16, texture.clone(), 4, 4, 8, 8, 10).unwrap();
		assert_eq!(region.int_parameter(8), Ok(8));

		assert!(Instruction::draw_texture_region(1, 2, 16, 16, texture, 4, 4, -2, 8, 10).is_err());
	}

	#[test]
	fn beacon_defaults() {
		let beam = Instruction::draw_beacon_beam(1, 2, 3, 64, 1_000).unwrap();

		assert_eq!(
			beam.parameters(),
			&params![1, 2, 3, 64, 0xF9FFFE, 0, 0.2f32, 0.25f32, 1_000i64]
		);
		assert!(Instruction::draw_beacon_beam_full(0, 0, 0, 1, Color::RED, 0, -0.1, 0.2, 5).is_err());
	}

	#[test]
	fn mail_addresses() {
		assert!(is_email_address("steve@example.com"));
		assert!(is_email_address("first.last+tag@mail-host.org"));
		assert!(!is_email_address("steve"));
		assert!(!is_email_address("@example.com"));
		assert!(!is_email_address("a@b@c"));

		let mail = Instruction::mailto("steve@example.com").unwrap();
		assert_eq!(mail.parameter_as::<&Uri>(0).unwrap().as_str(), "mailto:steve@example.com");

		let https = Uri::parse("https://example.com").unwrap();
		assert!(Instruction::mailto_uri(https.clone()).is_err());
		assert_eq!(Instruction::open_link(https).permission(), ModPermission::OpenLinks);
	}

	#[test]
	fn audio_and_window_payloads() {
		let audio = Instruction::play_audio_from(&[1u8, 2, 3][..]).unwrap();
		assert_eq!(audio.parameter_as::<&[u8]>(0), Ok(&[1u8, 2, 3][..]));
		assert!(matches!(
			Instruction::play_audio_from(io::empty()),
			Err(InstructionError::Argument(_))
		));

		assert!(Instruction::set_window_icon(b"\x89PNG\r\n\x1a\n....".to_vec()).is_ok());
		assert!(Instruction::set_window_icon(b"GIF89a".to_vec()).is_err());

		let players = Instruction::hide_players([Uuid::nil(), Uuid::from_u128(7)]).unwrap();
		assert_eq!(players.parameters().len(), 2);
		assert_eq!(players.last_parameter_as::<Uuid>(), Ok(Uuid::from_u128(7)));
	}

	#[test]
	fn overlays_and_contexts() {
		let mut builder = DrawingContextBuilder::new();
		builder.push(Command::fill(0, 0, 4, 4, Color::WHITE).unwrap());

		let draw = Instruction::draw_context(&builder, 100).unwrap();
		builder.clear();
		assert_eq!(draw.parameter_as::<&DrawingContext>(0).unwrap().len(), 1);

		let clear = Instruction::set_overlay(None);
		assert!(clear.parameter(0).unwrap().is_null());

		let text = Instruction::draw_rich_text(0, 0, &PlainText::new("x").with_drop_shadow(true), 5).unwrap();
		assert_eq!(text.bool_parameter(4), Ok(true));
	}
}
