//! Geração e emissão de frames hexadecimais.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use record_core::input::END_COMMAND;
use record_core::protocol::{LAYOUT, PackedRecord};
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

/// Origem dos frames enviados pelo microcontrolador simulado.
pub enum FrameSource {
    /// Sempre o mesmo registro
    Fixed(PackedRecord),
    /// Cada campo sorteado uniformemente sobre sua largura de bits
    Random(StdRng),
}

impl FrameSource {
    /// Fonte aleatória; com `seed` a sequência é reprodutível.
    pub fn random(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FrameSource::Random(rng)
    }

    pub fn next_frame(&mut self) -> PackedRecord {
        match self {
            FrameSource::Fixed(record) => *record,
            FrameSource::Random(rng) => random_record(rng),
        }
    }
}

/// Sorteia um registro campo a campo.
pub fn random_record<R: Rng>(rng: &mut R) -> PackedRecord {
    let raw = LAYOUT.iter().fold(0u32, |raw, (_, layout)| {
        layout.insert(raw, rng.gen_range(0..=layout.mask()))
    });
    PackedRecord(raw)
}

/// Escreve `count` frames, um por linha, e opcionalmente `END` no final.
pub fn emit<W: Write>(
    out: &mut W,
    source: &mut FrameSource,
    count: u32,
    interval: Duration,
    append_end: bool,
) -> io::Result<()> {
    for i in 0..count {
        let frame = source.next_frame();
        writeln!(out, "{frame}")?;
        out.flush()?;
        debug!("Frame {}/{count}: {frame} → {:?}", i + 1, frame.decode());

        if !interval.is_zero() && i + 1 < count {
            std::thread::sleep(interval);
        }
    }

    if append_end {
        writeln!(out, "{END_COMMAND}")?;
    }
    out.flush()
}
