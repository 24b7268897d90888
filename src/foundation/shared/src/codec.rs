//! The binary wire format shared by servers and clients.
//!
//! Everything is CBOR with definite lengths only. A parameter is always a two-item array holding
//! its kind tag and payload, so frames are self-describing and can be decoded without knowing the
//! instruction's parameter layout up front.

mod value;

use std::convert::Infallible;

use minicbor::{data::Type, Decoder, Encoder};
use semver::Version;
use thiserror::Error;

use crate::{
	instruction::{Instruction, InstructionId, UnknownInstructionError},
	param::Parameterized,
	render::DrawingContext,
	validate::ArgumentError,
};

use self::value::{decode_context, decode_params, decode_text, encode_context, encode_params, expect_array};

// === Errors === //

#[derive(Debug, Error)]
pub enum EncodeError {
	#[error("cbor encode: {0}")]
	Cbor(#[from] minicbor::encode::Error<Infallible>),
}

#[derive(Debug, Error)]
pub enum DecodeError {
	#[error("frame does not start with the protocol magic")]
	BadMagic,
	#[error("protocol version {found} is incompatible with {expected}")]
	UnsupportedVersion { found: Version, expected: Version },
	#[error(transparent)]
	UnknownInstruction(#[from] UnknownInstructionError),
	#[error("unknown {what} tag {tag}")]
	UnknownTag { what: &'static str, tag: u8 },
	#[error("{what} expects {expected} item(s) but has {found}")]
	Arity {
		what: &'static str,
		expected: u64,
		found: u64,
	},
	#[error("indefinite-length CBOR not allowed")]
	IndefiniteLength,
	#[error("trailing bytes after frame")]
	TrailingBytes,
	#[error("decode limit exceeded: {0}")]
	DecodeLimit(&'static str),
	#[error("invalid field {field}: {reason}")]
	InvalidField { field: &'static str, reason: String },
	#[error("decoded value is out of its domain")]
	Argument(#[from] ArgumentError),
	#[error("cbor decode: {0}")]
	Cbor(#[from] minicbor::decode::Error),
}

// === Framing === //

/// The version of the instruction format produced by this crate. Frames from another major
/// version are refused.
pub const PROTOCOL_VERSION: Version = Version::new(1, 0, 0);

const MAGIC: &str = "smc";

fn encode_version(enc: &mut Encoder<&mut Vec<u8>>, version: &Version) -> Result<(), EncodeError> {
	enc.array(3)?
		.u64(version.major)?
		.u64(version.minor)?
		.u64(version.patch)?;
	Ok(())
}

fn decode_version(dec: &mut Decoder<'_>) -> Result<Version, DecodeError> {
	expect_array(dec, 3, "version")?;
	let major = dec.u64()?;
	let minor = dec.u64()?;
	let patch = dec.u64()?;
	Ok(Version::new(major, minor, patch))
}

fn ensure_consumed(dec: &Decoder<'_>, bytes: &[u8]) -> Result<(), DecodeError> {
	if dec.position() != bytes.len() {
		return Err(DecodeError::TrailingBytes);
	}
	Ok(())
}

impl Instruction {
	/// Encodes the instruction as `["smc", [major, minor, patch], id, [parameters…]]`.
	pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
		let mut buf = Vec::new();
		let mut enc = Encoder::new(&mut buf);

		enc.array(4)?.str(MAGIC)?;
		encode_version(&mut enc, &PROTOCOL_VERSION)?;
		enc.str(self.id())?;
		encode_params(&mut enc, self.parameters())?;

		Ok(buf)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
		let mut dec = Decoder::new(bytes);

		expect_array(&mut dec, 4, "instruction frame")?;
		if !matches!(dec.datatype()?, Type::String) || dec.str()? != MAGIC {
			return Err(DecodeError::BadMagic);
		}

		let version = decode_version(&mut dec)?;
		if version.major != PROTOCOL_VERSION.major {
			return Err(DecodeError::UnsupportedVersion {
				found: version,
				expected: PROTOCOL_VERSION,
			});
		}

		let id = decode_text(&mut dec)?.parse::<InstructionId>()?;
		let parameters = decode_params(&mut dec, 0)?;
		ensure_consumed(&dec, bytes)?;

		Ok(Self::from_parts(id, parameters))
	}
}

impl DrawingContext {
	/// Encodes the context on its own as an array of `[id, mode, [parameters…], [modifiers…]]`
	/// commands.
	pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
		let mut buf = Vec::new();
		encode_context(&mut Encoder::new(&mut buf), self)?;
		Ok(buf)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
		let mut dec = Decoder::new(bytes);
		let context = decode_context(&mut dec, 0)?;
		ensure_consumed(&dec, bytes)?;
		Ok(context)
	}
}

#[cfg(test)]
mod tests {
	use glam::{Mat4, Quat, Vec3};
	use uuid::Uuid;

	use super::*;
	use crate::{
		identifier::Identifier,
		instruction::RenderInstruction,
		param::{ParamValue, Uri},
		params,
		render::{
			Axis, Color, Command, CommandId, DrawingContextBuilder, DrawingMode, Modifier, PlainText,
			RenderBuffer, RenderMode, Vertex,
		},
		screen::{DefaultScreen, Overlay, SystemToast, Toast, TutorialToast},
		window::{WindowDialogue, WindowIcon},
	};

	fn sample_context() -> DrawingContext {
		let mut builder = DrawingContextBuilder::new();
		builder
			.push(Command::fill(0, 0, 20, 10, Color::RED).unwrap())
			.push(
				Command::draw_string(4, 4, &PlainText::new("hud"), Color::WHITE, true)
					.unwrap()
					.with_modifiers([
						Modifier::scale(2.0, 2.0, 1.0).unwrap(),
						Modifier::rotate_axis(Axis::Z_POSITIVE, 0.5),
					]),
			)
			.push(
				Command::blit_region(
					Identifier::minecraft("textures/gui/icons.png").unwrap(),
					0,
					0,
					16.0,
					32.0,
					8,
					8,
				)
				.unwrap(),
			)
			.push(Command::disable_scissor());
		builder.build()
	}

	fn every_instruction() -> Vec<Instruction> {
		let texture = Identifier::minecraft("textures/block/stone.png").unwrap();
		let buffer = RenderBuffer::builder(DrawingMode::Quadrilaterals)
			.vertex(Vertex::new(0, 64, 0), Color::RED)
			.opaque_vertex(Vertex::new(1, 64, 0), Color::GREEN)
			.vertex(Vertex::ZERO_BACK, Color::TRANSPARENT)
			.build();

		vec![
			Instruction::ping(),
			Instruction::draw_text(10, 20, "Hi", 250).unwrap(),
			Instruction::draw_rich_text(1, 1, &PlainText::new("rich").with_color(Color::BLUE), 5).unwrap(),
			Instruction::draw_rect_colored(1, 2, 3, 4, Color::RED, 500).unwrap(),
			Instruction::draw_gradient_rect(0, 0, 8, 8, Color::RED, Color::BLUE, 100).unwrap(),
			Instruction::draw_vertical_line(3, 3, 30, 10).unwrap(),
			Instruction::draw_buffer(buffer, 1_000).unwrap(),
			Instruction::play_audio(vec![0u8, 1, 2, 255]).unwrap(),
			Instruction::log_message("hello").unwrap(),
			Instruction::draw_texture_region(0, 0, 16, 16, texture.clone(), 2, 2, 4, 4, 60).unwrap(),
			Instruction::open_book_and_quill(),
			Instruction::open_screen(DefaultScreen::Advancements),
			Instruction::close_screen(),
			Instruction::renderer(
				RenderInstruction::game()
					.transform_item_in_hand(
						Mat4::from_rotation_translation(Quat::from_rotation_y(1.0), Vec3::ONE),
						20,
					)
					.unwrap(),
			),
			Instruction::draw_beacon_beam_full(1, 2, 3, 100, Color::GREEN, 4, 0.5, 0.75, 1_000).unwrap(),
			Instruction::open_link(Uri::parse("https://example.com/a?b=c").unwrap()),
			Instruction::mailto("steve@example.com").unwrap(),
			Instruction::draw_context(sample_context(), 300).unwrap(),
			Instruction::display_toast(Toast::custom(sample_context(), 2_000).unwrap()),
			Instruction::display_toast(Toast::system(SystemToast::WorldBackup, &PlainText::new("Saved"))),
			Instruction::display_toast(Toast::tutorial(
				TutorialToast::Mouse,
				&PlainText::new("Look"),
				&PlainText::new("around"),
				true,
			)),
			Instruction::set_overlay(Some(Overlay::new(sample_context(), true))),
			Instruction::set_overlay(None),
			Instruction::draw_itemstack(5, 5, Identifier::minecraft("diamond").unwrap(), 64, 40).unwrap(),
			Instruction::set_window_icon(b"\x89PNG\r\n\x1a\n\0\0".to_vec()).unwrap(),
			Instruction::set_window_title("Custom").unwrap(),
			Instruction::show_players([Uuid::from_u128(1), Uuid::from_u128(2)]).unwrap(),
			Instruction::hide_players([Uuid::from_u128(3)]).unwrap(),
			Instruction::narrate("welcome", true).unwrap(),
			Instruction::os_beep(),
			Instruction::external_window_popup("Title", "Body", WindowIcon::Warning).unwrap(),
			Instruction::external_window_message_box(
				"Title",
				"Body",
				WindowDialogue::YesNoCancel,
				WindowIcon::Question,
				false,
			)
			.unwrap(),
		]
	}

	#[test]
	fn instructions_survive_the_wire() {
		for instruction in every_instruction() {
			let bytes = instruction.to_bytes().unwrap();
			let decoded = Instruction::from_bytes(&bytes).unwrap();

			assert_eq!(decoded, instruction, "{instruction} changed on the wire");
			assert_eq!(decoded.permission(), instruction.permission());
		}
	}

	#[test]
	fn numeric_kinds_are_preserved() {
		let bytes = Instruction::draw_text(10, 20, "Hi", 250).unwrap().to_bytes().unwrap();
		let decoded = Instruction::from_bytes(&bytes).unwrap();

		assert!(matches!(decoded.parameter(0), Ok(ParamValue::Int(10))));
		assert!(matches!(decoded.parameter(3), Ok(ParamValue::Int(-1))));
		assert!(matches!(decoded.parameter(5), Ok(ParamValue::Long(250))));
		assert_eq!(decoded.string_parameter(2), Ok("{\"text\": \"Hi\"}"));
	}

	#[test]
	fn contexts_keep_their_modifiers() {
		let context = sample_context();
		let decoded = DrawingContext::from_bytes(&context.to_bytes().unwrap()).unwrap();

		assert_eq!(decoded, context);
		for (ours, theirs) in decoded.iter().zip(context.iter()) {
			assert_eq!(ours.modifiers(), theirs.modifiers());
		}
		assert_eq!(decoded.commands()[1].modifiers().len(), 2);
	}

	fn frame(build: impl FnOnce(&mut Encoder<&mut Vec<u8>>)) -> Vec<u8> {
		let mut buf = Vec::new();
		build(&mut Encoder::new(&mut buf));
		buf
	}

	fn header<'a, 'b>(enc: &'a mut Encoder<&'b mut Vec<u8>>, id: &str) -> &'a mut Encoder<&'b mut Vec<u8>> {
		enc.array(4)
			.unwrap()
			.str(MAGIC)
			.unwrap()
			.array(3)
			.unwrap()
			.u64(PROTOCOL_VERSION.major)
			.unwrap()
			.u64(0)
			.unwrap()
			.u64(0)
			.unwrap()
			.str(id)
			.unwrap()
	}

	#[test]
	fn rejects_foreign_frames() {
		let bad_magic = frame(|enc| {
			enc.array(4).unwrap().str("mcs").unwrap();
		});
		assert!(matches!(Instruction::from_bytes(&bad_magic), Err(DecodeError::BadMagic)));

		let future = frame(|enc| {
			enc.array(4)
				.unwrap()
				.str(MAGIC)
				.unwrap()
				.array(3)
				.unwrap()
				.u64(PROTOCOL_VERSION.major + 1)
				.unwrap()
				.u64(0)
				.unwrap()
				.u64(0)
				.unwrap()
				.str("ping")
				.unwrap()
				.array(0)
				.unwrap();
		});
		assert!(matches!(
			Instruction::from_bytes(&future),
			Err(DecodeError::UnsupportedVersion { .. })
		));

		let unknown = frame(|enc| {
			header(enc, "draw_textt").array(0).unwrap();
		});
		assert!(matches!(
			Instruction::from_bytes(&unknown),
			Err(DecodeError::UnknownInstruction(_))
		));
	}

	#[test]
	fn rejects_malformed_parameters() {
		let unknown_tag = frame(|enc| {
			header(enc, "ping").array(1).unwrap().array(2).unwrap().u8(99).unwrap().null().unwrap();
		});
		assert!(matches!(
			Instruction::from_bytes(&unknown_tag),
			Err(DecodeError::UnknownTag { tag: 99, .. })
		));

		let short_value = frame(|enc| {
			header(enc, "ping").array(1).unwrap().array(1).unwrap().u8(1).unwrap();
		});
		assert!(matches!(
			Instruction::from_bytes(&short_value),
			Err(DecodeError::Arity { expected: 2, found: 1, .. })
		));

		let bad_identifier = frame(|enc| {
			header(enc, "draw_itemstack")
				.array(1)
				.unwrap()
				.array(2)
				.unwrap()
				.u8(8)
				.unwrap()
				.array(2)
				.unwrap()
				.str("Bad Namespace")
				.unwrap()
				.str("stone")
				.unwrap();
		});
		assert!(matches!(
			Instruction::from_bytes(&bad_identifier),
			Err(DecodeError::Argument(_))
		));

		let indefinite = frame(|enc| {
			header(enc, "ping").begin_array().unwrap().end().unwrap();
		});
		assert!(matches!(
			Instruction::from_bytes(&indefinite),
			Err(DecodeError::IndefiniteLength)
		));
	}

	#[test]
	fn large_buffers_merge_duplicate_vertices() {
		const DISTINCT: i32 = 1 << 15;

		let bytes = frame(|enc| {
			header(enc, "draw_buffer").array(2).unwrap();
			enc.array(2)
				.unwrap()
				.u8(16)
				.unwrap()
				.array(2)
				.unwrap()
				.u8(DrawingMode::Triangles.raw())
				.unwrap()
				.array(DISTINCT as u64 + 1)
				.unwrap();
			for i in 0..DISTINCT {
				enc.array(4).unwrap().i32(i).unwrap().i32(64).unwrap().i32(-i).unwrap();
				enc.u32(Color::RED.argb()).unwrap();
			}
			enc.array(4).unwrap().i32(0).unwrap().i32(64).unwrap().i32(0).unwrap();
			enc.u32(Color::BLUE.argb()).unwrap();
			enc.array(2).unwrap().u8(2).unwrap().i64(500).unwrap();
		});

		let decoded = Instruction::from_bytes(&bytes).unwrap();
		let buffer = decoded.parameter_as::<&RenderBuffer>(0).unwrap();

		assert_eq!(buffer.len(), DISTINCT as usize);
		assert_eq!(buffer.entries()[0], (Vertex::new(0, 64, 0), Color::BLUE));
		assert_eq!(buffer.color(Vertex::new(1, 64, -1)), Some(Color::RED));
		assert_eq!(buffer.vertices().last(), Some(Vertex::new(DISTINCT - 1, 64, 1 - DISTINCT)));
	}

	#[test]
	fn rejects_partial_and_padded_frames() {
		let bytes = Instruction::log_message("hello").unwrap().to_bytes().unwrap();

		let mut padded = bytes.clone();
		padded.push(0);
		assert!(matches!(Instruction::from_bytes(&padded), Err(DecodeError::TrailingBytes)));

		assert!(Instruction::from_bytes(&bytes[..bytes.len() - 1]).is_err());
		assert!(Instruction::from_bytes(&[]).is_err());
		assert!(DrawingContext::from_bytes(&[0x80, 0x80]).is_err());
	}

	#[test]
	fn deeply_nested_contexts_are_refused() {
		let mut context = DrawingContext::default();
		for _ in 0..8 {
			let toast = Toast::custom(context, 1).unwrap();
			context = DrawingContext::of([Command::from_parts(
				CommandId::Fill,
				RenderMode::Default,
				params![toast],
				Vec::<Modifier>::new(),
			)]);
		}

		let bytes = context.to_bytes().unwrap();
		assert!(matches!(
			DrawingContext::from_bytes(&bytes),
			Err(DecodeError::DecodeLimit(_))
		));
	}
}
