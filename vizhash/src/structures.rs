#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Ellipse,
    Rectangle,
    Triangle,
    Ring,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Ellipse,
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Ring,
    ];

    pub fn from_byte(byte: u8) -> Self {
        Self::ALL[byte as usize % Self::ALL.len()]
    }
}

/// A single shape to paint. Position and extent are relative to the canvas so
/// the same instruction can be drawn at any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawInstruction {
    pub kind: ShapeKind,
    /// Center, as a fraction of the canvas width in 1/65535 steps
    pub x: u16,
    /// Center, as a fraction of the canvas height in 1/65535 steps
    pub y: u16,
    pub width_percent: u8,
    pub height_percent: u8,
    pub color: [u8; 3],
    pub alpha: u8,
    pub rotation_degrees: u16,
}

/// Vertical gradient painted before any shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub top: [u8; 3],
    pub bottom: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualParameters {
    background: Background,
    instructions: Vec<DrawInstruction>,
}

impl VisualParameters {
    pub fn new(background: Background, instructions: Vec<DrawInstruction>) -> Self {
        Self {
            background,
            instructions,
        }
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Instructions in painting order.
    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
