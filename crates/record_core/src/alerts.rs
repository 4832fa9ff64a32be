//! Sistema de alarmes – avaliação de thresholds por campo.
//!
//! Todos os campos são avaliados (não é first-match): vários alarmes podem
//! ocorrer juntos e saem sempre na ordem temperatura, pressão, umidade,
//! nível do fluido.

use crate::config::AlarmThresholds;
use crate::types::{DecodedReading, SensorField};
use std::fmt;

/// Alarme se temperatura <= este valor (°C).
pub const TEMPERATURE_LOW: i16 = 4;
/// Alarme se temperatura > este valor (°C).
pub const TEMPERATURE_HIGH: i16 = 100;
/// Alarme se pressão < este valor (hPa).
pub const PRESSURE_LOW: u16 = 1013;
/// Alarme se pressão > este valor (hPa).
pub const PRESSURE_HIGH: u16 = 1135;
/// Alarme se mais indicadores de umidade que isso estiverem ligados.
pub const HUMIDITY_MAX_INDICATORS: u32 = 2;
/// Alarme se nível <= este valor (l).
pub const FLUID_EMPTY: u16 = 0;
/// Alarme se nível > este valor (l).
pub const FLUID_OVERFLOW: u16 = 8000;

/// Bits considerados na máscara de umidade.
const HUMIDITY_MASK: u8 = 0x0F;

/// Tipo de alarme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmKind {
    TemperatureTooLow,
    TemperatureTooHigh,
    PressureTooLow,
    PressureTooHigh,
    HumidityOutOfRange,
    TankEmpty,
    TankOverflowRisk,
}

impl AlarmKind {
    /// Campo que originou o alarme.
    pub fn field(self) -> SensorField {
        match self {
            AlarmKind::TemperatureTooLow | AlarmKind::TemperatureTooHigh => SensorField::Temperature,
            AlarmKind::PressureTooLow | AlarmKind::PressureTooHigh => SensorField::Pressure,
            AlarmKind::HumidityOutOfRange => SensorField::Humidity,
            AlarmKind::TankEmpty | AlarmKind::TankOverflowRisk => SensorField::FluidLevel,
        }
    }

    /// Código curto, estável, para logs.
    pub fn code(self) -> &'static str {
        match self {
            AlarmKind::TemperatureTooLow => "temperature_low",
            AlarmKind::TemperatureTooHigh => "temperature_high",
            AlarmKind::PressureTooLow => "pressure_low",
            AlarmKind::PressureTooHigh => "pressure_high",
            AlarmKind::HumidityOutOfRange => "humidity_out_of_range",
            AlarmKind::TankEmpty => "tank_empty",
            AlarmKind::TankOverflowRisk => "tank_overflow_risk",
        }
    }
}

/// Um alarme disparado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alarm {
    pub kind: AlarmKind,
    /// Valor medido (para umidade: quantidade de indicadores ligados)
    pub value: i32,
    /// Threshold que foi violado
    pub limit: i32,
}

impl Alarm {
    pub fn field(&self) -> SensorField {
        self.kind.field()
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Alarm { kind, value, limit } = *self;
        match kind {
            AlarmKind::TemperatureTooLow => write!(
                f,
                "Alarme! Temperatura do fluido = {value} °C é menor ou igual a {limit} °C!"
            ),
            AlarmKind::TemperatureTooHigh => write!(
                f,
                "Alarme! Temperatura do fluido = {value} °C é maior que {limit} °C!"
            ),
            AlarmKind::PressureTooLow => write!(
                f,
                "Alarme! Pressão no tanque = {value} hPa está abaixo da pressão normal ({limit} hPa)"
            ),
            AlarmKind::PressureTooHigh => write!(
                f,
                "Alarme! Pressão no tanque = {value} hPa está acima da máxima ({limit} hPa)"
            ),
            AlarmKind::HumidityOutOfRange => write!(
                f,
                "Alarme! A umidade medida excede a faixa aceitável ({value} indicadores ligados, máximo {limit})"
            ),
            AlarmKind::TankEmpty => write!(f, "Alarme! Tanque vazio!"),
            AlarmKind::TankOverflowRisk => write!(
                f,
                "Alarme! Nível do fluido = {value} l. O nível máximo é {limit} l!"
            ),
        }
    }
}

/// Quantidade de indicadores de umidade ligados (bits 0–3).
pub fn humidity_indicators(humidity: u8) -> u32 {
    (humidity & HUMIDITY_MASK).count_ones()
}

/// Avalia uma leitura contra os thresholds e retorna os alarmes.
pub fn evaluate_alarms(reading: &DecodedReading, thresholds: &AlarmThresholds) -> Vec<Alarm> {
    let mut alarms = Vec::new();

    // Temperatura
    let temperature = i32::from(reading.temperature);
    check_low(
        &mut alarms,
        AlarmKind::TemperatureTooLow,
        temperature,
        i32::from(thresholds.temperature_low),
        true,
    );
    check_high(
        &mut alarms,
        AlarmKind::TemperatureTooHigh,
        temperature,
        i32::from(thresholds.temperature_high),
    );

    // Pressão
    let pressure = i32::from(reading.pressure);
    check_low(
        &mut alarms,
        AlarmKind::PressureTooLow,
        pressure,
        i32::from(thresholds.pressure_low),
        false,
    );
    check_high(
        &mut alarms,
        AlarmKind::PressureTooHigh,
        pressure,
        i32::from(thresholds.pressure_high),
    );

    // Umidade
    check_high(
        &mut alarms,
        AlarmKind::HumidityOutOfRange,
        humidity_indicators(reading.humidity) as i32,
        thresholds.humidity_max_indicators as i32,
    );

    // Nível do fluido
    let fluid_level = i32::from(reading.fluid_level);
    check_low(
        &mut alarms,
        AlarmKind::TankEmpty,
        fluid_level,
        i32::from(thresholds.fluid_empty),
        true,
    );
    check_high(
        &mut alarms,
        AlarmKind::TankOverflowRisk,
        fluid_level,
        i32::from(thresholds.fluid_overflow),
    );

    alarms
}

/// Avalia com a política padrão.
pub fn evaluate(reading: &DecodedReading) -> Vec<Alarm> {
    evaluate_alarms(reading, &AlarmThresholds::default())
}

fn check_low(alarms: &mut Vec<Alarm>, kind: AlarmKind, value: i32, limit: i32, inclusive: bool) {
    let triggered = if inclusive { value <= limit } else { value < limit };
    if triggered {
        alarms.push(Alarm { kind, value, limit });
    }
}

fn check_high(alarms: &mut Vec<Alarm>, kind: AlarmKind, value: i32, limit: i32) {
    if value > limit {
        alarms.push(Alarm { kind, value, limit });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;

    fn nominal() -> DecodedReading {
        DecodedReading {
            temperature: 25,
            pressure: 1020,
            humidity: 0b0001,
            fluid_level: 4000,
        }
    }

    fn kinds(reading: &DecodedReading) -> Vec<AlarmKind> {
        evaluate(reading).iter().map(|a| a.kind).collect()
    }

    #[test]
    fn no_alarms_for_nominal_reading() {
        assert!(evaluate(&nominal()).is_empty());
    }

    #[test]
    fn zero_record_raises_three_alarms_in_field_order() {
        let alarms = evaluate(&decode(0));
        assert_eq!(
            alarms,
            vec![
                Alarm { kind: AlarmKind::TemperatureTooLow, value: -20, limit: 4 },
                Alarm { kind: AlarmKind::PressureTooLow, value: 1010, limit: 1013 },
                Alarm { kind: AlarmKind::TankEmpty, value: 0, limit: 0 },
            ]
        );
    }

    #[test]
    fn temperature_low_bound_is_inclusive() {
        // byte 0x18 = 24 → 4 °C
        let at_bound = decode(0x18);
        assert_eq!(at_bound.temperature, 4);
        assert!(kinds(&at_bound).contains(&AlarmKind::TemperatureTooLow));

        let above = DecodedReading { temperature: 5, ..nominal() };
        assert!(kinds(&above).is_empty());
    }

    #[test]
    fn temperature_high_bound_is_exclusive() {
        assert!(kinds(&DecodedReading { temperature: 100, ..nominal() }).is_empty());
        assert_eq!(
            kinds(&DecodedReading { temperature: 101, ..nominal() }),
            vec![AlarmKind::TemperatureTooHigh]
        );
    }

    #[test]
    fn pressure_bounds() {
        assert!(kinds(&DecodedReading { pressure: 1013, ..nominal() }).is_empty());
        assert_eq!(
            kinds(&DecodedReading { pressure: 1012, ..nominal() }),
            vec![AlarmKind::PressureTooLow]
        );
        assert!(kinds(&DecodedReading { pressure: 1135, ..nominal() }).is_empty());
        assert_eq!(
            kinds(&DecodedReading { pressure: 1136, ..nominal() }),
            vec![AlarmKind::PressureTooHigh]
        );
    }

    #[test]
    fn humidity_alarm_needs_more_than_two_indicators() {
        assert!(kinds(&DecodedReading { humidity: 0b0011, ..nominal() }).is_empty());
        assert!(kinds(&DecodedReading { humidity: 0b1001, ..nominal() }).is_empty());
        assert_eq!(
            kinds(&DecodedReading { humidity: 0b0111, ..nominal() }),
            vec![AlarmKind::HumidityOutOfRange]
        );
        assert_eq!(
            kinds(&DecodedReading { humidity: 0b1111, ..nominal() }),
            vec![AlarmKind::HumidityOutOfRange]
        );
    }

    #[test]
    fn humidity_counts_only_low_nibble() {
        assert_eq!(humidity_indicators(0b0111), 3);
        assert_eq!(humidity_indicators(0b1111_0011), 2);
    }

    #[test]
    fn fluid_level_bounds() {
        assert_eq!(
            kinds(&DecodedReading { fluid_level: 0, ..nominal() }),
            vec![AlarmKind::TankEmpty]
        );
        assert!(kinds(&DecodedReading { fluid_level: 1, ..nominal() }).is_empty());
        assert!(kinds(&DecodedReading { fluid_level: 8000, ..nominal() }).is_empty());

        let overflow = evaluate(&DecodedReading { fluid_level: 8001, ..nominal() });
        assert_eq!(overflow.len(), 1);
        assert_eq!(overflow[0].kind, AlarmKind::TankOverflowRisk);
        assert_eq!(overflow[0].field(), SensorField::FluidLevel);
        assert_eq!(overflow[0].value, 8001);
        assert_eq!(overflow[0].limit, 8000);
    }

    #[test]
    fn all_fields_are_checked_independently() {
        let reading = decode(u32::MAX);
        assert_eq!(
            kinds(&reading),
            vec![
                AlarmKind::TemperatureTooHigh,
                AlarmKind::PressureTooHigh,
                AlarmKind::HumidityOutOfRange,
                AlarmKind::TankOverflowRisk,
            ]
        );
    }

    #[test]
    fn overlapping_custom_thresholds_report_both_alarms() {
        let thresholds = AlarmThresholds {
            temperature_low: 50,
            temperature_high: 10,
            ..AlarmThresholds::default()
        };
        let kinds: Vec<_> = evaluate_alarms(&nominal(), &thresholds)
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![AlarmKind::TemperatureTooLow, AlarmKind::TemperatureTooHigh]
        );
    }

    #[test]
    fn evaluate_is_pure() {
        let reading = decode(0xDEAD_BEEF);
        assert_eq!(evaluate(&reading), evaluate(&reading));
    }

    #[test]
    fn messages_name_value_and_limit() {
        let alarm = Alarm { kind: AlarmKind::TankOverflowRisk, value: 8001, limit: 8000 };
        assert_eq!(
            alarm.to_string(),
            "Alarme! Nível do fluido = 8001 l. O nível máximo é 8000 l!"
        );
        let alarm = Alarm { kind: AlarmKind::TemperatureTooLow, value: -20, limit: 4 };
        assert_eq!(
            alarm.to_string(),
            "Alarme! Temperatura do fluido = -20 °C é menor ou igual a 4 °C!"
        );
    }
}
