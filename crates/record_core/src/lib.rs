//! # Record Core
//!
//! Crate compartilhada que define o layout de bits do registro de sensores
//! de 32 bits, o codec (decode/encode), a validação da entrada hexadecimal,
//! a política de alarmes e a configuração TOML.
//!
//! ## Módulos
//! - [`types`] – Campos de sensor e leitura decodificada
//! - [`protocol`] – Layout de bits, decode/encode e parse hexadecimal
//! - [`input`] – Validação de uma linha digitada (hex ou `END`)
//! - [`alerts`] – Thresholds e avaliação de alarmes
//! - [`config`] – Configuração unificada via TOML

pub mod types;
pub mod protocol;
pub mod input;
pub mod alerts;
pub mod config;

// Re-exports convenientes
pub use types::{DecodedReading, SensorField};
pub use protocol::{PackedRecord, decode, encode, encode_checked, MAX_HEX_DIGITS};
pub use input::{InputCommand, InputError, read_command};
pub use alerts::{Alarm, AlarmKind, evaluate, evaluate_alarms};
pub use config::{AlarmThresholds, AppConfig, DecoderConfig, SimulatorConfig};
