use glam::{Mat4, Quat};
use minicbor::{data::Type, Decoder, Encoder};
use uuid::Uuid;

use crate::{
	identifier::Identifier,
	instruction::{RenderInstruction, RenderTarget},
	param::{ParamKind, ParamValue, ParameterList, Parameterized, Uri},
	render::{
		Color, Command, CommandId, DrawingContext, DrawingMode, Modifier, ModifierId, RenderBuffer,
		RenderMode, Vertex,
	},
	screen::{Overlay, Toast, ToastKind},
};

use super::{DecodeError, EncodeError};

// === Limits === //

/// Nested parameter lists and drawing contexts beyond this depth are rejected.
const MAX_DEPTH: usize = 32;

const MAX_ENTRIES: u64 = 1 << 16;

// Caps the up-front allocation an attacker-controlled length can cause.
const PREALLOC: usize = 64;

const KINDS: [ParamKind; 18] = [
	ParamKind::Null,
	ParamKind::Int,
	ParamKind::Long,
	ParamKind::Float,
	ParamKind::Double,
	ParamKind::Bool,
	ParamKind::Str,
	ParamKind::Bytes,
	ParamKind::Identifier,
	ParamKind::Uri,
	ParamKind::Uuid,
	ParamKind::Quat,
	ParamKind::Mat4,
	ParamKind::Context,
	ParamKind::Overlay,
	ParamKind::Toast,
	ParamKind::Buffer,
	ParamKind::Renderer,
];

fn tag_of(kind: ParamKind) -> u8 {
	kind as u8
}

// === Primitive helpers === //

pub(super) fn expect_array(dec: &mut Decoder<'_>, expected: u64, what: &'static str) -> Result<(), DecodeError> {
	let found = array_len(dec)?;
	if found != expected {
		return Err(DecodeError::Arity {
			what,
			expected,
			found,
		});
	}
	Ok(())
}

fn array_len(dec: &mut Decoder<'_>) -> Result<u64, DecodeError> {
	let Some(len) = dec.array()? else {
		return Err(DecodeError::IndefiniteLength);
	};
	if len > MAX_ENTRIES {
		return Err(DecodeError::DecodeLimit("max array entries"));
	}
	Ok(len)
}

pub(super) fn decode_text<'b>(dec: &mut Decoder<'b>) -> Result<&'b str, DecodeError> {
	if matches!(dec.datatype()?, Type::StringIndef) {
		return Err(DecodeError::IndefiniteLength);
	}
	Ok(dec.str()?)
}

fn decode_bytes<'b>(dec: &mut Decoder<'b>) -> Result<&'b [u8], DecodeError> {
	if matches!(dec.datatype()?, Type::BytesIndef) {
		return Err(DecodeError::IndefiniteLength);
	}
	Ok(dec.bytes()?)
}

fn decode_floats<const N: usize>(dec: &mut Decoder<'_>, what: &'static str) -> Result<[f32; N], DecodeError> {
	expect_array(dec, N as u64, what)?;

	let mut out = [0.0; N];
	for slot in &mut out {
		*slot = dec.f32()?;
	}
	Ok(out)
}

fn ensure_depth(depth: usize) -> Result<(), DecodeError> {
	if depth > MAX_DEPTH {
		return Err(DecodeError::DecodeLimit("max nesting depth"));
	}
	Ok(())
}

// === Values === //

pub(super) fn encode_params(enc: &mut Encoder<&mut Vec<u8>>, params: &ParameterList) -> Result<(), EncodeError> {
	enc.array(params.len() as u64)?;
	for value in params {
		encode_value(enc, value)?;
	}
	Ok(())
}

pub(super) fn decode_params(dec: &mut Decoder<'_>, depth: usize) -> Result<ParameterList, DecodeError> {
	ensure_depth(depth)?;
	let len = array_len(dec)?;

	let mut values = Vec::with_capacity((len as usize).min(PREALLOC));
	for _ in 0..len {
		values.push(decode_value(dec, depth + 1)?);
	}
	Ok(ParameterList::from(values))
}

fn encode_value(enc: &mut Encoder<&mut Vec<u8>>, value: &ParamValue) -> Result<(), EncodeError> {
	enc.array(2)?;
	enc.u8(tag_of(value.kind()))?;

	match value {
		ParamValue::Null => {
			enc.null()?;
		}
		ParamValue::Int(v) => {
			enc.i32(*v)?;
		}
		ParamValue::Long(v) => {
			enc.i64(*v)?;
		}
		ParamValue::Float(v) => {
			enc.f32(*v)?;
		}
		ParamValue::Double(v) => {
			enc.f64(*v)?;
		}
		ParamValue::Bool(v) => {
			enc.bool(*v)?;
		}
		ParamValue::Str(v) => {
			enc.str(v)?;
		}
		ParamValue::Bytes(v) => {
			enc.bytes(v)?;
		}
		ParamValue::Identifier(id) => {
			enc.array(2)?.str(id.namespace())?.str(id.path())?;
		}
		ParamValue::Uri(uri) => {
			enc.str(uri.as_str())?;
		}
		ParamValue::Uuid(uuid) => {
			enc.bytes(uuid.as_bytes())?;
		}
		ParamValue::Quat(quat) => {
			enc.array(4)?;
			for component in quat.to_array() {
				enc.f32(component)?;
			}
		}
		ParamValue::Mat4(matrix) => {
			enc.array(16)?;
			for component in matrix.to_cols_array() {
				enc.f32(component)?;
			}
		}
		ParamValue::Context(context) => {
			encode_context(enc, context)?;
		}
		ParamValue::Overlay(overlay) => {
			enc.array(2)?;
			encode_context(enc, overlay.context())?;
			enc.bool(overlay.is_pause_screen())?;
		}
		ParamValue::Toast(toast) => {
			enc.array(5)?
				.u8(toast.kind() as u8)?
				.i32(toast.width())?
				.i32(toast.height())?;
			encode_params(enc, toast.parameters())?;
			enc.i64(toast.duration())?;
		}
		ParamValue::Buffer(buffer) => {
			enc.array(2)?.u8(buffer.mode().raw())?;
			enc.array(buffer.len() as u64)?;
			for (vertex, color) in buffer.entries() {
				enc.array(4)?
					.i32(vertex.x)?
					.i32(vertex.y)?
					.i32(vertex.z)?
					.u32(color.argb())?;
			}
		}
		ParamValue::Renderer(render) => {
			enc.array(3)?
				.u8(render.target() as u8)?
				.u8(render.operation())?;
			encode_params(enc, render.parameters())?;
		}
	}

	Ok(())
}

fn decode_value(dec: &mut Decoder<'_>, depth: usize) -> Result<ParamValue, DecodeError> {
	ensure_depth(depth)?;
	expect_array(dec, 2, "parameter")?;

	let tag = dec.u8()?;
	let kind = KINDS
		.get(usize::from(tag))
		.copied()
		.ok_or(DecodeError::UnknownTag {
			what: "parameter",
			tag,
		})?;

	let value = match kind {
		ParamKind::Null => {
			dec.null()?;
			ParamValue::Null
		}
		ParamKind::Int => ParamValue::Int(dec.i32()?),
		ParamKind::Long => ParamValue::Long(dec.i64()?),
		ParamKind::Float => ParamValue::Float(dec.f32()?),
		ParamKind::Double => ParamValue::Double(dec.f64()?),
		ParamKind::Bool => ParamValue::Bool(dec.bool()?),
		ParamKind::Str => ParamValue::Str(decode_text(dec)?.to_string()),
		ParamKind::Bytes => ParamValue::Bytes(decode_bytes(dec)?.to_vec()),
		ParamKind::Identifier => {
			expect_array(dec, 2, "identifier")?;
			let namespace = decode_text(dec)?;
			let path = decode_text(dec)?;
			ParamValue::Identifier(Identifier::new(namespace, path)?)
		}
		ParamKind::Uri => ParamValue::Uri(Uri::parse(decode_text(dec)?)?),
		ParamKind::Uuid => {
			let uuid = Uuid::from_slice(decode_bytes(dec)?).map_err(|err| DecodeError::InvalidField {
				field: "uuid",
				reason: err.to_string(),
			})?;
			ParamValue::Uuid(uuid)
		}
		ParamKind::Quat => {
			let [x, y, z, w] = decode_floats::<4>(dec, "quaternion")?;
			ParamValue::Quat(Quat::from_xyzw(x, y, z, w))
		}
		ParamKind::Mat4 => ParamValue::Mat4(Mat4::from_cols_array(&decode_floats::<16>(dec, "matrix")?)),
		ParamKind::Context => ParamValue::Context(decode_context(dec, depth + 1)?),
		ParamKind::Overlay => {
			expect_array(dec, 2, "overlay")?;
			let context = decode_context(dec, depth + 1)?;
			let pause_screen = dec.bool()?;
			ParamValue::Overlay(Overlay::new(context, pause_screen))
		}
		ParamKind::Toast => {
			expect_array(dec, 5, "toast")?;
			let raw = dec.u8()?;
			let kind = ToastKind::from_raw(raw).ok_or(DecodeError::UnknownTag {
				what: "toast kind",
				tag: raw,
			})?;
			let width = dec.i32()?;
			let height = dec.i32()?;
			let parameters = decode_params(dec, depth + 1)?;
			let duration = dec.i64()?;

			ParamValue::Toast(Toast::from_parts(kind, width, height, parameters, duration))
		}
		ParamKind::Buffer => {
			expect_array(dec, 2, "render buffer")?;
			let raw = dec.u8()?;
			let mode = DrawingMode::from_raw(raw).ok_or(DecodeError::UnknownTag {
				what: "drawing mode",
				tag: raw,
			})?;

			let mut builder = RenderBuffer::builder(mode);
			for _ in 0..array_len(dec)? {
				expect_array(dec, 4, "vertex")?;
				let x = dec.i32()?;
				let y = dec.i32()?;
				let z = dec.i32()?;
				let color = Color::from_argb(dec.u32()?);
				builder = builder.vertex(Vertex::new(x, y, z), color);
			}
			ParamValue::Buffer(builder.build())
		}
		ParamKind::Renderer => {
			expect_array(dec, 3, "render instruction")?;
			let raw = dec.u8()?;
			let target = RenderTarget::from_raw(raw).ok_or(DecodeError::UnknownTag {
				what: "render target",
				tag: raw,
			})?;
			let operation = dec.u8()?;
			let parameters = decode_params(dec, depth + 1)?;

			ParamValue::Renderer(RenderInstruction::from_parts(target, operation, parameters))
		}
	};

	Ok(value)
}

// === Drawing contexts === //

pub(super) fn encode_context(enc: &mut Encoder<&mut Vec<u8>>, context: &DrawingContext) -> Result<(), EncodeError> {
	enc.array(context.len() as u64)?;
	for command in context {
		encode_command(enc, command)?;
	}
	Ok(())
}

fn encode_command(enc: &mut Encoder<&mut Vec<u8>>, command: &Command) -> Result<(), EncodeError> {
	enc.array(4)?
		.u8(command.id().raw())?
		.u8(command.mode().raw())?;
	encode_params(enc, command.parameters())?;

	enc.array(command.modifiers().len() as u64)?;
	for modifier in command.modifiers() {
		enc.array(2)?.u8(modifier.id().raw())?;
		encode_params(enc, modifier.parameters())?;
	}
	Ok(())
}

pub(super) fn decode_context(dec: &mut Decoder<'_>, depth: usize) -> Result<DrawingContext, DecodeError> {
	ensure_depth(depth)?;
	let len = array_len(dec)?;

	let mut commands = Vec::with_capacity((len as usize).min(PREALLOC));
	for _ in 0..len {
		commands.push(decode_command(dec, depth + 1)?);
	}
	Ok(DrawingContext::of(commands))
}

fn decode_command(dec: &mut Decoder<'_>, depth: usize) -> Result<Command, DecodeError> {
	expect_array(dec, 4, "command")?;

	let raw = dec.u8()?;
	let id = CommandId::from_raw(raw).ok_or(DecodeError::UnknownTag {
		what: "command",
		tag: raw,
	})?;
	let raw = dec.u8()?;
	let mode = RenderMode::from_raw(raw).ok_or(DecodeError::UnknownTag {
		what: "render mode",
		tag: raw,
	})?;
	let parameters = decode_params(dec, depth + 1)?;

	let len = array_len(dec)?;
	let mut modifiers = Vec::with_capacity((len as usize).min(PREALLOC));
	for _ in 0..len {
		expect_array(dec, 2, "modifier")?;
		let raw = dec.u8()?;
		let id = ModifierId::from_raw(raw).ok_or(DecodeError::UnknownTag {
			what: "modifier",
			tag: raw,
		})?;
		modifiers.push(Modifier::from_parts(id, decode_params(dec, depth + 1)?));
	}

	Ok(Command::from_parts(id, mode, parameters, modifiers))
}
