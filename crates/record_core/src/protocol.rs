//! Protocolo do registro empacotado de 32 bits.
//!
//! O microcontrolador envia um `u32` como texto hexadecimal. Layout dos bits
//! (bit 0 = menos significativo):
//!
//! ```text
//! ┌──────────────────────┬──────────┬─────────────┬────────────────┐
//! │ Nível fluido (19–31) │ Umid.    │ Pressão     │ Temperatura    │
//! │ 13 bits, litros      │ (15–18)  │ (8–14)      │ (0–7)          │
//! │                      │ 4 bits   │ 7 bits      │ 8 bits         │
//! └──────────────────────┴──────────┴─────────────┴────────────────┘
//! ```
//!
//! - Temperatura: `bruto - 20` °C (-20..=235)
//! - Pressão: `bruto + 1010` hPa (1010..=1137)
//! - Umidade: máscara de 4 indicadores, sem unidade
//! - Nível do fluido: litros, valor bruto (0..=8191)
//!
//! A extração sempre desloca primeiro e aplica a máscara da largura do campo
//! depois. Tudo é sem sinal até a conversão final da temperatura.

use crate::types::{DecodedReading, SensorField};
use std::fmt;
use std::ops::RangeInclusive;

/// Quantidade máxima de dígitos hexadecimais de um registro.
pub const MAX_HEX_DIGITS: usize = 8;

/// Deslocamento aplicado ao valor bruto da temperatura (°C).
pub const TEMPERATURE_OFFSET: i16 = 20;

/// Deslocamento aplicado ao valor bruto da pressão (hPa).
pub const PRESSURE_OFFSET: u16 = 1010;

// ──────────────────────────────────────────────
// Layout
// ──────────────────────────────────────────────

/// Faixa contígua de bits ocupada por um campo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub shift: u32,
    pub width: u32,
}

impl FieldLayout {
    /// Máscara com `width` bits, alinhada no bit 0.
    pub const fn mask(self) -> u32 {
        (1u32 << self.width) - 1
    }

    /// Máscara na posição real do campo dentro do registro.
    pub const fn bits(self) -> u32 {
        self.mask() << self.shift
    }

    /// Extrai o valor bruto do campo.
    pub const fn extract(self, raw: u32) -> u32 {
        (raw >> self.shift) & self.mask()
    }

    /// Grava `value` (truncado à largura) no campo, preservando o resto.
    pub const fn insert(self, raw: u32, value: u32) -> u32 {
        (raw & !self.bits()) | ((value & self.mask()) << self.shift)
    }
}

pub const TEMPERATURE: FieldLayout = FieldLayout { shift: 0, width: 8 };
pub const PRESSURE: FieldLayout = FieldLayout { shift: 8, width: 7 };
pub const HUMIDITY: FieldLayout = FieldLayout { shift: 15, width: 4 };
pub const FLUID_LEVEL: FieldLayout = FieldLayout { shift: 19, width: 13 };

/// Layout completo, do bit menos significativo para o mais significativo.
pub const LAYOUT: [(SensorField, FieldLayout); 4] = [
    (SensorField::Temperature, TEMPERATURE),
    (SensorField::Pressure, PRESSURE),
    (SensorField::Humidity, HUMIDITY),
    (SensorField::FluidLevel, FLUID_LEVEL),
];

/// Layout de um campo.
pub fn layout_of(field: SensorField) -> FieldLayout {
    match field {
        SensorField::Temperature => TEMPERATURE,
        SensorField::Pressure => PRESSURE,
        SensorField::Humidity => HUMIDITY,
        SensorField::FluidLevel => FLUID_LEVEL,
    }
}

/// Domínio decodificado de um campo (valor físico mínimo e máximo).
pub fn domain(field: SensorField) -> RangeInclusive<i32> {
    let max_raw = layout_of(field).mask() as i32;
    match field {
        SensorField::Temperature => {
            let offset = i32::from(TEMPERATURE_OFFSET);
            -offset..=max_raw - offset
        }
        SensorField::Pressure => {
            let offset = i32::from(PRESSURE_OFFSET);
            offset..=max_raw + offset
        }
        SensorField::Humidity | SensorField::FluidLevel => 0..=max_raw,
    }
}

// ──────────────────────────────────────────────
// Erros
// ──────────────────────────────────────────────

/// Erros do protocolo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Registro vazio")]
    Empty,

    #[error("Registro com {0} dígitos (máximo {MAX_HEX_DIGITS})")]
    TooManyDigits(usize),

    #[error("Caractere inválido '{ch}' na coluna {column} (use apenas 0-9 e A-F)")]
    InvalidDigit { ch: char, column: usize },

    #[error("{field} = {value} fora do domínio ({min}..={max})")]
    OutOfRange {
        field: SensorField,
        value: i32,
        min: i32,
        max: i32,
    },
}

// ──────────────────────────────────────────────
// Registro
// ──────────────────────────────────────────────

/// Registro empacotado recebido do microcontrolador.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackedRecord(pub u32);

impl PackedRecord {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn decode(self) -> DecodedReading {
        decode(self.0)
    }
}

impl From<u32> for PackedRecord {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<PackedRecord> for u32 {
    fn from(record: PackedRecord) -> Self {
        record.0
    }
}

/// Formato de transmissão: 8 dígitos hexadecimais maiúsculos.
impl fmt::Display for PackedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

// ──────────────────────────────────────────────
// Codec
// ──────────────────────────────────────────────

/// Decodifica os quatro campos de um registro. Total: todo `u32` é válido.
pub fn decode(raw: u32) -> DecodedReading {
    DecodedReading {
        temperature: TEMPERATURE.extract(raw) as i16 - TEMPERATURE_OFFSET,
        pressure: PRESSURE.extract(raw) as u16 + PRESSURE_OFFSET,
        humidity: HUMIDITY.extract(raw) as u8,
        fluid_level: FLUID_LEVEL.extract(raw) as u16,
    }
}

/// Empacota uma leitura. Cada campo é truncado à sua largura, então valores
/// fora do domínio voltam diferentes no decode (módulo 2^largura).
pub fn encode(reading: &DecodedReading) -> PackedRecord {
    let temperature = (i32::from(reading.temperature) + i32::from(TEMPERATURE_OFFSET)) as u32;
    let pressure = u32::from(reading.pressure).wrapping_sub(u32::from(PRESSURE_OFFSET));

    let mut raw = 0;
    raw = TEMPERATURE.insert(raw, temperature);
    raw = PRESSURE.insert(raw, pressure);
    raw = HUMIDITY.insert(raw, u32::from(reading.humidity));
    raw = FLUID_LEVEL.insert(raw, u32::from(reading.fluid_level));
    PackedRecord(raw)
}

/// Como [`encode`], mas rejeita campos fora do domínio em vez de truncar.
pub fn encode_checked(reading: &DecodedReading) -> Result<PackedRecord, ProtocolError> {
    for field in SensorField::ALL {
        let value = reading.value_of(field);
        let range = domain(field);
        if !range.contains(&value) {
            return Err(ProtocolError::OutOfRange {
                field,
                value,
                min: *range.start(),
                max: *range.end(),
            });
        }
    }
    Ok(encode(reading))
}

/// Converte 1 a 8 dígitos hexadecimais (sem prefixo `0x`) em registro.
/// Aceita maiúsculas e minúsculas.
pub fn parse_hex(text: &str) -> Result<PackedRecord, ProtocolError> {
    let digits = text.chars().count();
    if digits == 0 {
        return Err(ProtocolError::Empty);
    }
    if digits > MAX_HEX_DIGITS {
        return Err(ProtocolError::TooManyDigits(digits));
    }

    text.chars()
        .enumerate()
        .try_fold(0u32, |acc, (i, ch)| {
            ch.to_digit(16)
                .map(|d| (acc << 4) | d)
                .ok_or(ProtocolError::InvalidDigit { ch, column: i + 1 })
        })
        .map(PackedRecord)
}

/// Representação binária agrupada por campo, do mais significativo
/// (nível do fluido) ao menos significativo (temperatura).
pub fn format_binary(record: PackedRecord) -> String {
    LAYOUT
        .iter()
        .rev()
        .map(|(_, layout)| {
            format!(
                "{:0width$b}",
                layout.extract(record.0),
                width = layout.width as usize
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
