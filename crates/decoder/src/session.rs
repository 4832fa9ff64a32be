//! Loop de leitura → decode → avaliação → relatório.
//!
//! Cada linha é processada por completo antes da próxima. Nenhum buffer
//! sobrevive entre iterações.

use crate::report::Report;
use record_core::alerts::evaluate_alarms;
use record_core::config::DecoderConfig;
use record_core::input::{InputCommand, read_command};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

pub const PROMPT: &str =
    "Digite um número hexadecimal que simula o dado recebido do microcontrolador:";

const CLOSING: &str = "Encerrando o programa...";

/// Motivo do fim da sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Usuário digitou `END`
    EndCommand,
    /// Fim da entrada (EOF)
    EndOfInput,
}

/// Resumo de uma sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    pub records: u64,
    pub rejected: u64,
    pub alarms: u64,
}

/// Executa a sessão até `END` ou EOF. Entrada inválida é reportada e a
/// leitura recomeça; só erros de I/O interrompem.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &DecoderConfig,
) -> io::Result<SessionSummary> {
    let mut records = 0;
    let mut rejected = 0;
    let mut alarm_count = 0;

    let end = loop {
        writeln!(out, "{PROMPT}")?;
        out.flush()?;

        let mut raw_line = Vec::new();
        if input.read_until(b'\n', &mut raw_line)? == 0 {
            break SessionEnd::EndOfInput;
        }
        // Bytes não UTF-8 viram U+FFFD e são rejeitados como dígito inválido
        let line = String::from_utf8_lossy(&raw_line);

        match read_command(&line) {
            Err(e) => {
                debug!("Entrada rejeitada: {e}");
                rejected += 1;
                writeln!(out, "{e}")?;
            }
            Ok(InputCommand::End) => {
                writeln!(out, "{CLOSING}")?;
                break SessionEnd::EndCommand;
            }
            Ok(InputCommand::Record {
                text,
                record,
                truncated,
            }) => {
                let reading = record.decode();
                let alarms = evaluate_alarms(&reading, &config.alarms);
                debug!(
                    "Registro {record} (truncado: {truncated}) → {:?} | {} alarme(s)",
                    reading,
                    alarms.len()
                );
                for alarm in &alarms {
                    debug!("  {} = {} (limite {})", alarm.kind.code(), alarm.value, alarm.limit);
                }

                Report {
                    text: &text,
                    record,
                    reading,
                    alarms: &alarms,
                    show_binary: config.show_binary,
                }
                .write_to(out)?;

                records += 1;
                alarm_count += alarms.len() as u64;
            }
        }
    };

    out.flush()?;
    info!("Sessão encerrada ({end:?}): {records} registros, {rejected} rejeitados, {alarm_count} alarmes");

    Ok(SessionSummary {
        end,
        records,
        rejected,
        alarms: alarm_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_lines(input: &[u8], config: &DecoderConfig) -> (SessionSummary, String) {
        let mut reader = Cursor::new(input.to_vec());
        let mut out = Vec::new();
        let summary = run(&mut reader, &mut out, config).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn zero_record_then_end() {
        let (summary, out) = run_lines(b"00000000\nEND\n", &DecoderConfig::default());
        assert_eq!(
            summary,
            SessionSummary {
                end: SessionEnd::EndCommand,
                records: 1,
                rejected: 0,
                alarms: 3,
            }
        );
        assert!(out.contains("Temperatura = ffec = -20\n"));
        assert!(out.contains("Pressão = 3f2 = 1010\n"));
        assert!(out.contains("Alarme! Tanque vazio!\n"));
        assert!(!out.contains("umidade medida"));
        assert!(out.ends_with("Encerrando o programa...\n"));
        assert_eq!(out.matches(PROMPT).count(), 2);
    }

    #[test]
    fn invalid_lines_are_retried() {
        let (summary, out) = run_lines(b"\nxyz\nff\n", &DecoderConfig::default());
        assert_eq!(summary.end, SessionEnd::EndOfInput);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.rejected, 2);
        assert!(out.contains("Você digitou um dado vazio! Tente novamente\n"));
        assert!(out.contains("Você digitou um dado inválido!"));
        assert!(out.contains("Dado recebido = FF\n"));
        assert_eq!(out.matches(PROMPT).count(), 4);
    }

    #[test]
    fn stops_at_end_and_ignores_the_rest() {
        let (summary, out) = run_lines(b"END\n00000000\n", &DecoderConfig::default());
        assert_eq!(summary.end, SessionEnd::EndCommand);
        assert_eq!(summary.records, 0);
        assert!(!out.contains("Dado recebido"));
    }

    #[test]
    fn long_line_is_truncated_not_rejected() {
        let (summary, out) = run_lines(b"7d028a2dFFFF\n", &DecoderConfig::default());
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.alarms, 0);
        assert!(out.contains("Dado recebido = 7D028A2D\n"));
    }

    #[test]
    fn non_utf8_input_is_rejected_not_fatal() {
        let (summary, _) = run_lines(b"\xff\xfe\n1\n", &DecoderConfig::default());
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.records, 1);
    }

    #[test]
    fn config_drives_thresholds_and_binary_view() {
        let mut config = DecoderConfig::default();
        config.show_binary = true;
        config.alarms.fluid_overflow = 3000;
        let (summary, out) = run_lines(b"7D028A2D\n", &config);
        assert_eq!(summary.alarms, 1);
        assert!(out.contains("Dado em binário = "));
        assert!(out.contains("O nível máximo é 3000 l!"));
    }
}
