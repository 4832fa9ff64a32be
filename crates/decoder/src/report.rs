//! Relatório legível de um registro decodificado.

use record_core::alerts::Alarm;
use record_core::protocol::{PackedRecord, format_binary};
use record_core::types::{DecodedReading, SensorField};
use std::io::{self, Write};

/// Tudo que é impresso para um registro aceito.
pub struct Report<'a> {
    /// Texto normalizado digitado pelo usuário
    pub text: &'a str,
    pub record: PackedRecord,
    pub reading: DecodedReading,
    pub alarms: &'a [Alarm],
    pub show_binary: bool,
}

impl Report<'_> {
    /// Escreve o relatório: valor bruto, campos (hex e decimal), alarmes.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let raw = self.record.value();
        let r = &self.reading;

        writeln!(out, "Dado recebido = {}", self.text)?;
        writeln!(out, "Dado após conversão = {raw:x} = {raw}")?;
        if self.show_binary {
            writeln!(out, "Dado em binário = {}", format_binary(self.record))?;
        }

        // Temperatura em hex sai como complemento de dois de 16 bits
        writeln!(out, "{} = {:x} = {}", SensorField::Temperature, r.temperature, r.temperature)?;
        writeln!(out, "{} = {:x} = {}", SensorField::Pressure, r.pressure, r.pressure)?;
        writeln!(out, "{} = {:x} = {}", SensorField::Humidity, r.humidity, r.humidity)?;
        writeln!(out, "{} = {:x} = {}", SensorField::FluidLevel, r.fluid_level, r.fluid_level)?;

        for alarm in self.alarms {
            writeln!(out, "{alarm}")?;
        }
        Ok(())
    }
}
