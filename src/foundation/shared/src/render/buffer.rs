use std::{fmt, hash};

use glam::IVec3;
use socketmc_util::mem::hash::FxHashMap;

use crate::validate::ArgumentError;

use super::Color;

// === DrawingMode === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum DrawingMode {
	Lines = 0,
	LineStrip = 1,
	Triangles = 2,
	TriangleStrip = 3,
	TriangleFan = 4,
	Quadrilaterals = 5,
}

impl DrawingMode {
	pub const ALL: [Self; 6] = [
		Self::Lines,
		Self::LineStrip,
		Self::Triangles,
		Self::TriangleStrip,
		Self::TriangleFan,
		Self::Quadrilaterals,
	];

	pub const fn raw(self) -> u8 {
		self as u8
	}

	pub fn from_raw(raw: u8) -> Option<Self> {
		Self::ALL.get(usize::from(raw)).copied()
	}
}

// === Vertex === //

#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct Vertex {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

impl Vertex {
	pub const ZERO: Self = Self::new(0, 0, 0);
	pub const ZERO_BACK: Self = Self::new(0, 0, i32::MIN);

	pub const fn new(x: i32, y: i32, z: i32) -> Self {
		Self { x, y, z }
	}

	pub fn position(self) -> IVec3 {
		IVec3::new(self.x, self.y, self.z)
	}
}

impl From<IVec3> for Vertex {
	fn from(pos: IVec3) -> Self {
		Self::new(pos.x, pos.y, pos.z)
	}
}

// === RenderBuffer === //

/// A colored vertex list drawn directly into the world with a single primitive mode.
///
/// Each vertex appears at most once; adding a vertex twice replaces its color but keeps its
/// original position in the draw order.
#[derive(Clone)]
pub struct RenderBuffer {
	mode: DrawingMode,
	vertices: Vec<(Vertex, Color)>,
	// Position of each vertex in `vertices`.
	index: FxHashMap<Vertex, usize>,
}

impl fmt::Debug for RenderBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderBuffer")
			.field("mode", &self.mode)
			.field("vertices", &self.vertices)
			.finish()
	}
}

impl Eq for RenderBuffer {}

impl PartialEq for RenderBuffer {
	fn eq(&self, other: &Self) -> bool {
		self.mode == other.mode && self.vertices == other.vertices
	}
}

impl hash::Hash for RenderBuffer {
	fn hash<H: hash::Hasher>(&self, state: &mut H) {
		self.mode.hash(state);
		self.vertices.hash(state);
	}
}

impl RenderBuffer {
	pub fn builder(mode: DrawingMode) -> RenderBufferBuilder {
		RenderBufferBuilder {
			buffer: Self {
				mode,
				vertices: Vec::new(),
				index: FxHashMap::default(),
			},
		}
	}

	pub fn mode(&self) -> DrawingMode {
		self.mode
	}

	pub fn vertices(&self) -> impl ExactSizeIterator<Item = Vertex> + '_ {
		self.vertices.iter().map(|&(vertex, _)| vertex)
	}

	pub fn entries(&self) -> &[(Vertex, Color)] {
		&self.vertices
	}

	pub fn color(&self, vertex: Vertex) -> Option<Color> {
		self.index.get(&vertex).map(|&slot| self.vertices[slot].1)
	}

	pub fn len(&self) -> usize {
		self.vertices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}
}

#[derive(Debug, Clone)]
pub struct RenderBufferBuilder {
	buffer: RenderBuffer,
}

impl RenderBufferBuilder {
	/// Adds a vertex with an explicit `0xAARRGGBB` color.
	pub fn vertex(mut self, vertex: impl Into<Vertex>, color: Color) -> Self {
		let vertex = vertex.into();
		let buffer = &mut self.buffer;

		match buffer.index.get(&vertex) {
			Some(&slot) => buffer.vertices[slot].1 = color,
			None => {
				buffer.index.insert(vertex, buffer.vertices.len());
				buffer.vertices.push((vertex, color));
			}
		}

		self
	}

	pub fn opaque_vertex(self, vertex: impl Into<Vertex>, color: Color) -> Self {
		self.vertex(vertex, Color::from_rgb_u32(color.rgb_bits()))
	}

	pub fn alpha_vertex(
		self,
		vertex: impl Into<Vertex>,
		color: Color,
		alpha: i32,
	) -> Result<Self, ArgumentError> {
		let color = color.with_alpha(alpha)?;
		Ok(self.vertex(vertex, color))
	}

	pub fn build(self) -> RenderBuffer {
		self.buffer
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn duplicate_vertices_replace_color() {
		let buffer = RenderBuffer::builder(DrawingMode::Triangles)
			.vertex(Vertex::new(0, 0, 0), Color::RED)
			.vertex(IVec3::new(4, 0, 0), Color::GREEN)
			.opaque_vertex(Vertex::ZERO, Color::from_argb(0x000000FF))
			.build();

		assert_eq!(buffer.len(), 2);
		assert_eq!(buffer.color(Vertex::ZERO), Some(Color::BLUE));
		assert_eq!(buffer.vertices().next(), Some(Vertex::ZERO));
		assert_eq!(buffer.mode(), DrawingMode::Triangles);
	}

	#[test]
	fn alpha_vertices_are_validated() {
		let builder = RenderBuffer::builder(DrawingMode::Lines);
		assert!(builder.clone().alpha_vertex(Vertex::ZERO, Color::RED, 256).is_err());

		let buffer = builder.alpha_vertex(Vertex::ZERO, Color::RED, 0x40).unwrap().build();
		assert_eq!(buffer.color(Vertex::ZERO), Some(Color::from_argb(0x40FF0000)));
	}
}
