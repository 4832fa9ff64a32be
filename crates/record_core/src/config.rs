//! Configuração unificada via TOML.
//!
//! Um único `config.toml` com as seções `[decoder]`, `[decoder.alarms]` e
//! `[simulator]`. Campos ausentes usam os valores padrão.

use crate::alerts;
use crate::protocol::{FLUID_LEVEL, HUMIDITY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Thresholds de alarme. Os padrões são as constantes de [`alerts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmThresholds {
    /// Alarme se temperatura <= valor (°C)
    pub temperature_low: i16,
    /// Alarme se temperatura > valor (°C)
    pub temperature_high: i16,
    /// Alarme se pressão < valor (hPa)
    pub pressure_low: u16,
    /// Alarme se pressão > valor (hPa)
    pub pressure_high: u16,
    /// Alarme se indicadores de umidade ligados > valor
    pub humidity_max_indicators: u32,
    /// Alarme se nível <= valor (l)
    pub fluid_empty: u16,
    /// Alarme se nível > valor (l)
    pub fluid_overflow: u16,
}

impl Default for AlarmThresholds {
    fn default() -> Self {
        Self {
            temperature_low: alerts::TEMPERATURE_LOW,
            temperature_high: alerts::TEMPERATURE_HIGH,
            pressure_low: alerts::PRESSURE_LOW,
            pressure_high: alerts::PRESSURE_HIGH,
            humidity_max_indicators: alerts::HUMIDITY_MAX_INDICATORS,
            fluid_empty: alerts::FLUID_EMPTY,
            fluid_overflow: alerts::FLUID_OVERFLOW,
        }
    }
}

/// Configuração do Decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Mostra o registro em binário, agrupado por campo
    pub show_binary: bool,
    /// Thresholds de alarme
    pub alarms: AlarmThresholds,
}

/// Configuração do Simulator (microcontrolador simulado).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Quantidade de frames gerados por execução
    pub frames: u32,
    /// Intervalo entre frames em segundos (0 = sem espera)
    pub interval_secs: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            frames: 1,
            interval_secs: 0.0,
        }
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub simulator: SimulatorConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let alarms = &self.decoder.alarms;

        if alarms.temperature_low >= alarms.temperature_high {
            errors.push(format!(
                "Temperatura: limite baixo {} deve ser menor que o alto {}",
                alarms.temperature_low, alarms.temperature_high
            ));
        }
        if alarms.pressure_low >= alarms.pressure_high {
            errors.push(format!(
                "Pressão: limite baixo {} deve ser menor que o alto {}",
                alarms.pressure_low, alarms.pressure_high
            ));
        }
        if alarms.humidity_max_indicators > HUMIDITY.width {
            errors.push(format!(
                "Umidade: máximo de indicadores {} excede os {} bits do campo",
                alarms.humidity_max_indicators, HUMIDITY.width
            ));
        }
        if u32::from(alarms.fluid_overflow) > FLUID_LEVEL.mask() {
            errors.push(format!(
                "Nível do fluido: limite {} acima do máximo representável ({})",
                alarms.fluid_overflow,
                FLUID_LEVEL.mask()
            ));
        }
        if alarms.fluid_empty >= alarms.fluid_overflow {
            errors.push(format!(
                "Nível do fluido: limite de vazio {} deve ser menor que o de transbordo {}",
                alarms.fluid_empty, alarms.fluid_overflow
            ));
        }
        if !(0.0..=60.0).contains(&self.simulator.interval_secs) {
            errors.push(format!(
                "Intervalo do simulator inválido: {} (0.0–60.0)",
                self.simulator.interval_secs
            ));
        }

        errors
    }
}
