//! Definição dos campos de sensor e da leitura decodificada.
//!
//! Os valores já estão em unidades físicas (°C, hPa, litros), exceto a
//! umidade, que permanece como a máscara de 4 bits recebida.

use serde::{Deserialize, Serialize};
use std::fmt;

// ──────────────────────────────────────────────
// Campos
// ──────────────────────────────────────────────

/// Campo de sensor transportado no registro empacotado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorField {
    Temperature,
    Pressure,
    Humidity,
    FluidLevel,
}

impl SensorField {
    /// Todos os campos na ordem de relatório.
    pub const ALL: [SensorField; 4] = [
        SensorField::Temperature,
        SensorField::Pressure,
        SensorField::Humidity,
        SensorField::FluidLevel,
    ];

    /// Rótulo legível.
    pub fn label(self) -> &'static str {
        match self {
            SensorField::Temperature => "Temperatura",
            SensorField::Pressure => "Pressão",
            SensorField::Humidity => "Umidade",
            SensorField::FluidLevel => "Nível do fluido",
        }
    }

    /// Unidade física (vazia para a umidade, que é uma máscara).
    pub fn unit(self) -> &'static str {
        match self {
            SensorField::Temperature => "°C",
            SensorField::Pressure => "hPa",
            SensorField::Humidity => "",
            SensorField::FluidLevel => "l",
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ──────────────────────────────────────────────
// Leitura decodificada
// ──────────────────────────────────────────────

/// Leitura completa extraída de um registro de 32 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedReading {
    /// Temperatura do fluido (°C, -20..=235)
    pub temperature: i16,
    /// Pressão no tanque (hPa, 1010..=1137)
    pub pressure: u16,
    /// Máscara bruta de 4 bits; cada bit ligado é um indicador de umidade
    pub humidity: u8,
    /// Nível do fluido no tanque (litros, 0..=8191)
    pub fluid_level: u16,
}

impl DecodedReading {
    /// Valor do campo convertido para `i32` (comum a todos os campos).
    pub fn value_of(&self, field: SensorField) -> i32 {
        match field {
            SensorField::Temperature => i32::from(self.temperature),
            SensorField::Pressure => i32::from(self.pressure),
            SensorField::Humidity => i32::from(self.humidity),
            SensorField::FluidLevel => i32::from(self.fluid_level),
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
