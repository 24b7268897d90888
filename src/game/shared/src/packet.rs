use std::{
	borrow::Cow,
	io::{self, Read, Write},
};

use minicbor::{data::Type, Decoder, Encoder};
use semver::Version;
use smallvec::SmallVec;
use socketmc_foundation_shared::{
	codec::{DecodeError, EncodeError},
	instruction::Instruction,
};

use crate::plugin::{PluginMeta, SocketPlugin};

// === InstructionPacket === //

/// An instruction together with the plugin that sent it.
///
/// Encoded as `[plugin, instruction]` where the plugin is
/// `[id, api version, name, version, description, website, [authors…]]` with absent metadata as
/// `null` and the instruction is its own frame embedded as a byte string.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InstructionPacket {
	pub instruction: Instruction,
	pub plugin: SocketPlugin,
}

impl InstructionPacket {
	pub fn new(instruction: Instruction, plugin: SocketPlugin) -> Self {
		Self { instruction, plugin }
	}

	pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
		let instruction = self.instruction.to_bytes()?;

		let mut buf = Vec::new();
		let mut enc = Encoder::new(&mut buf);
		enc.array(2)?;
		encode_plugin(&mut enc, &self.plugin)?;
		enc.bytes(&instruction)?;

		Ok(buf)
	}

	pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
		let mut dec = Decoder::new(bytes);
		expect_array(&mut dec, 2, "packet")?;

		let plugin = decode_plugin(&mut dec)?;
		if matches!(dec.datatype()?, Type::BytesIndef) {
			return Err(DecodeError::IndefiniteLength);
		}
		let instruction = Instruction::from_bytes(dec.bytes()?)?;

		if dec.position() != bytes.len() {
			return Err(DecodeError::TrailingBytes);
		}

		Ok(Self { instruction, plugin })
	}
}

fn encode_opt(enc: &mut Encoder<&mut Vec<u8>>, value: Option<&str>) -> Result<(), EncodeError> {
	match value {
		Some(value) => enc.str(value)?,
		None => enc.null()?,
	};
	Ok(())
}

fn encode_plugin(enc: &mut Encoder<&mut Vec<u8>>, plugin: &SocketPlugin) -> Result<(), EncodeError> {
	let meta = &plugin.meta;

	enc.array(7)?
		.str(&plugin.id)?
		.str(&plugin.api_version.to_string())?;
	encode_opt(enc, meta.name.as_deref())?;
	encode_opt(enc, meta.version.as_deref())?;
	encode_opt(enc, meta.description.as_deref())?;
	encode_opt(enc, meta.website.as_deref())?;

	let authors = meta.authors.as_deref().unwrap_or_default();
	enc.array(authors.len() as u64)?;
	for author in authors {
		enc.str(author)?;
	}

	Ok(())
}

fn expect_array(dec: &mut Decoder<'_>, expected: u64, what: &'static str) -> Result<(), DecodeError> {
	match dec.array()? {
		Some(found) if found == expected => Ok(()),
		Some(found) => Err(DecodeError::Arity {
			what,
			expected,
			found,
		}),
		None => Err(DecodeError::IndefiniteLength),
	}
}

fn decode_string(dec: &mut Decoder<'_>) -> Result<Cow<'static, str>, DecodeError> {
	if matches!(dec.datatype()?, Type::StringIndef) {
		return Err(DecodeError::IndefiniteLength);
	}
	Ok(Cow::Owned(dec.str()?.to_string()))
}

fn decode_opt(dec: &mut Decoder<'_>) -> Result<Option<Cow<'static, str>>, DecodeError> {
	if matches!(dec.datatype()?, Type::Null) {
		dec.null()?;
		return Ok(None);
	}
	decode_string(dec).map(Some)
}

fn decode_plugin(dec: &mut Decoder<'_>) -> Result<SocketPlugin, DecodeError> {
	expect_array(dec, 7, "plugin")?;

	let id = decode_string(dec)?;
	let api_version = Version::parse(&decode_string(dec)?).map_err(|err| DecodeError::InvalidField {
		field: "api_version",
		reason: err.to_string(),
	})?;

	let mut meta = PluginMeta::default();
	meta.name = decode_opt(dec)?;
	meta.version = decode_opt(dec)?;
	meta.description = decode_opt(dec)?;
	meta.website = decode_opt(dec)?;

	let Some(len) = dec.array()? else {
		return Err(DecodeError::IndefiniteLength);
	};
	if len > 0 {
		let authors = (0..len)
			.map(|_| decode_string(dec))
			.collect::<Result<SmallVec<_>, _>>()?;
		meta.authors = Some(authors);
	}

	Ok(SocketPlugin {
		id,
		api_version,
		meta,
	})
}

// === Stream framing === //

/// Upper bound on a single framed payload. Audio clips are the largest instruction payloads.
pub const MAX_FRAME_LEN: usize = 16 * 1024 * 1024;

/// Writes `payload` prefixed with its length as a big-endian `u32`.
pub fn write_frame(writer: &mut impl Write, payload: &[u8]) -> io::Result<()> {
	if payload.len() > MAX_FRAME_LEN {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("frame of {} bytes exceeds the {MAX_FRAME_LEN} byte limit", payload.len()),
		));
	}

	writer.write_all(&(payload.len() as u32).to_be_bytes())?;
	writer.write_all(payload)?;
	Ok(())
}

/// Reads one length-prefixed frame, returning `None` on a clean end of stream.
pub fn read_frame(reader: &mut impl Read) -> io::Result<Option<Vec<u8>>> {
	let mut header = [0u8; 4];
	let mut filled = 0;

	while filled < header.len() {
		match reader.read(&mut header[filled..]) {
			Ok(0) if filled == 0 => return Ok(None),
			Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
			Ok(n) => filled += n,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return Err(err),
		}
	}

	let len = u32::from_be_bytes(header) as usize;
	if len > MAX_FRAME_LEN {
		return Err(io::Error::new(
			io::ErrorKind::InvalidData,
			format!("frame of {len} bytes exceeds the {MAX_FRAME_LEN} byte limit"),
		));
	}

	let mut payload = vec![0; len];
	reader.read_exact(&mut payload)?;
	Ok(Some(payload))
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use socketmc_foundation_shared::render::Color;

	use super::*;

	fn plugin() -> SocketPlugin {
		SocketPlugin::new("scoreboard", Version::new(1, 2, 0)).with_meta(
			PluginMeta::default()
				.with_name("Scoreboard")
				.with_website("https://example.com")
				.with_authors(["alex"]),
		)
	}

	#[test]
	fn packets_carry_their_plugin() {
		let packet = InstructionPacket::new(
			Instruction::draw_rect_colored(1, 2, 3, 4, Color::RED, 500).unwrap(),
			plugin(),
		);

		let decoded = InstructionPacket::decode(&packet.encode().unwrap()).unwrap();
		assert_eq!(decoded, packet);

		let anonymous = InstructionPacket::new(Instruction::ping(), SocketPlugin::UNKNOWN);
		assert_eq!(InstructionPacket::decode(&anonymous.encode().unwrap()).unwrap(), anonymous);
	}

	#[test]
	fn packets_reject_bad_plugins() {
		let mut buf = Vec::new();
		let mut enc = Encoder::new(&mut buf);
		enc.array(2)
			.unwrap()
			.array(7)
			.unwrap()
			.str("broken")
			.unwrap()
			.str("one.two")
			.unwrap();

		assert!(matches!(
			InstructionPacket::decode(&buf),
			Err(DecodeError::InvalidField { field: "api_version", .. })
		));
	}

	#[test]
	fn frames_split_a_stream() {
		let mut stream = Vec::new();
		write_frame(&mut stream, b"first").unwrap();
		write_frame(&mut stream, b"").unwrap();
		write_frame(&mut stream, b"third").unwrap();

		let mut reader = Cursor::new(stream);
		assert_eq!(read_frame(&mut reader).unwrap().as_deref(), Some(&b"first"[..]));
		assert_eq!(read_frame(&mut reader).unwrap().as_deref(), Some(&b""[..]));
		assert_eq!(read_frame(&mut reader).unwrap().as_deref(), Some(&b"third"[..]));
		assert_eq!(read_frame(&mut reader).unwrap(), None);
	}

	#[test]
	fn truncated_frames_fail() {
		let mut reader = Cursor::new(vec![0, 0]);
		assert_eq!(
			read_frame(&mut reader).unwrap_err().kind(),
			io::ErrorKind::UnexpectedEof
		);

		let mut reader = Cursor::new(vec![0, 0, 0, 9, 1, 2]);
		assert_eq!(
			read_frame(&mut reader).unwrap_err().kind(),
			io::ErrorKind::UnexpectedEof
		);

		let mut reader = Cursor::new(u32::MAX.to_be_bytes().to_vec());
		assert_eq!(
			read_frame(&mut reader).unwrap_err().kind(),
			io::ErrorKind::InvalidData
		);
	}
}
