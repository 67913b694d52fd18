use colors_transform::{Color, Hsl};
use sha2::{Digest, Sha256};

use crate::{
    constants::{
        BACKGROUND_BYTES, INSTRUCTION_BYTES, MAX_LIGHTNESS, MAX_SATURATION, MAX_SHAPE_ALPHA,
        MAX_SHAPE_PERCENT, MIN_LIGHTNESS, MIN_SATURATION, MIN_SHAPE_ALPHA, MIN_SHAPE_PERCENT,
        PARAMETER_STREAM_DOMAIN,
    },
    structures::{Background, DrawInstruction, ShapeKind, VisualParameters},
};

/// Endless pseudo-random byte stream seeded by an input string.
///
/// Block `i` is `SHA256(domain || u64_be(len) || input || u32_be(i))`, so the
/// stream only depends on the input bytes and is identical on every platform.
pub struct HashStream<'a> {
    input: &'a [u8],
    counter: u32,
    block: [u8; 32],
    offset: usize,
}

impl<'a> HashStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            counter: 0,
            block: [0; 32],
            offset: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(PARAMETER_STREAM_DOMAIN);
        hasher.update((self.input.len() as u64).to_be_bytes());
        hasher.update(self.input);
        hasher.update(self.counter.to_be_bytes());
        self.block = hasher.finalize().into();
        self.counter = self.counter.wrapping_add(1);
        self.offset = 0;
    }

    pub fn next_byte(&mut self) -> u8 {
        if self.offset == self.block.len() {
            self.refill();
        }

        let byte = self.block[self.offset];
        self.offset += 1;
        byte
    }

    pub fn fill(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.next_byte();
        }
    }
}

impl Iterator for HashStream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_byte())
    }
}

/// Derives `count` drawing instructions (plus a background) from `input`.
pub fn derive_parameters(input: &str, count: usize) -> VisualParameters {
    let mut stream = HashStream::new(input);

    let mut background = [0u8; BACKGROUND_BYTES];
    stream.fill(&mut background);

    let mut instructions = Vec::with_capacity(count);
    let mut chunk = [0u8; INSTRUCTION_BYTES];
    for _ in 0..count {
        stream.fill(&mut chunk);
        instructions.push(decode_instruction(&chunk));
    }

    VisualParameters::new(
        Background {
            top: [background[0], background[1], background[2]],
            bottom: [background[3], background[4], background[5]],
        },
        instructions,
    )
}

fn decode_instruction(chunk: &[u8; INSTRUCTION_BYTES]) -> DrawInstruction {
    let hue = u16::from_be_bytes([chunk[7], chunk[8]]);

    DrawInstruction {
        kind: ShapeKind::from_byte(chunk[0]),
        x: u16::from_be_bytes([chunk[1], chunk[2]]),
        y: u16::from_be_bytes([chunk[3], chunk[4]]),
        width_percent: scale_byte(chunk[5], MIN_SHAPE_PERCENT, MAX_SHAPE_PERCENT),
        height_percent: scale_byte(chunk[6], MIN_SHAPE_PERCENT, MAX_SHAPE_PERCENT),
        color: hsl_to_rgb(
            hue as u32 * 360 / 65536,
            scale_byte(chunk[9], MIN_SATURATION, MAX_SATURATION),
            scale_byte(chunk[10], MIN_LIGHTNESS, MAX_LIGHTNESS),
        ),
        alpha: scale_byte(chunk[11], MIN_SHAPE_ALPHA, MAX_SHAPE_ALPHA),
        rotation_degrees: u16::from_be_bytes([chunk[12], chunk[13]]) % 360,
    }
}

/// Maps a full-range byte onto `min..=max`.
fn scale_byte(byte: u8, min: u8, max: u8) -> u8 {
    let span = (max - min) as u16;
    min + ((byte as u16 * span + 127) / 255) as u8
}

fn hsl_to_rgb(hue: u32, saturation: u8, lightness: u8) -> [u8; 3] {
    let rgb = Hsl::from(hue as f32, saturation as f32, lightness as f32).to_rgb();

    [
        channel(rgb.get_red()),
        channel(rgb.get_green()),
        channel(rgb.get_blue()),
    ]
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
