//! Validação de uma linha digitada pelo usuário.
//!
//! A linha é considerada até [`MAX_HEX_DIGITS`] caracteres; o excedente é
//! descartado. `END` (exato, maiúsculo) encerra a sessão. Qualquer outra
//! entrada precisa ser hexadecimal e é normalizada para maiúsculas.

use crate::protocol::{PackedRecord, ProtocolError, MAX_HEX_DIGITS, parse_hex};
use tracing::debug;

/// Palavra que encerra a sessão.
pub const END_COMMAND: &str = "END";

/// Resultado de uma linha válida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Registro hexadecimal aceito.
    Record {
        /// Texto normalizado (maiúsculo, no máximo 8 dígitos)
        text: String,
        record: PackedRecord,
        /// A linha original tinha mais de 8 caracteres
        truncated: bool,
    },
    /// Pedido de encerramento.
    End,
}

/// Entrada rejeitada; o chamador deve pedir outra linha.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Você digitou um dado vazio! Tente novamente")]
    Empty,

    #[error("Você digitou um dado inválido! {0}")]
    Malformed(#[from] ProtocolError),
}

/// Interpreta uma linha (com ou sem terminador `\n`/`\r\n`).
pub fn read_command(line: &str) -> Result<InputCommand, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(InputError::Empty);
    }

    let text: String = line.chars().take(MAX_HEX_DIGITS).collect();
    let truncated = text.len() < line.len();
    if truncated {
        debug!("Entrada truncada para {MAX_HEX_DIGITS} caracteres: {line:?} → {text:?}");
    }

    if text == END_COMMAND {
        return Ok(InputCommand::End);
    }

    let text = text.to_ascii_uppercase();
    let record = parse_hex(&text)?;

    Ok(InputCommand::Record {
        text,
        record,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: &str) -> (String, u32, bool) {
        match read_command(line) {
            Ok(InputCommand::Record {
                text,
                record,
                truncated,
            }) => (text, record.value(), truncated),
            other => panic!("esperado registro para {line:?}, obtido {other:?}"),
        }
    }

    #[test]
    fn accepts_hex_and_normalizes_case() {
        assert_eq!(record("7d028a2d\n"), ("7D028A2D".into(), 0x7D02_8A2D, false));
        assert_eq!(record("ff\r\n"), ("FF".into(), 0xFF, false));
        assert_eq!(record("00000000"), ("00000000".into(), 0, false));
    }

    #[test]
    fn truncates_after_eight_characters() {
        assert_eq!(record("123456789ABC\n"), ("12345678".into(), 0x1234_5678, true));
        // O excedente é descartado antes da validação
        assert_eq!(record("ABCDEF01zz"), ("ABCDEF01".into(), 0xABCD_EF01, true));
    }

    #[test]
    fn end_is_exact_and_case_sensitive() {
        assert_eq!(read_command("END\n"), Ok(InputCommand::End));
        assert!(matches!(
            read_command("end\n"),
            Err(InputError::Malformed(ProtocolError::InvalidDigit { ch: 'N', column: 2 }))
        ));
        assert!(read_command("END1").is_err());
    }

    #[test]
    fn empty_line_is_rejected() {
        assert_eq!(read_command("\n"), Err(InputError::Empty));
        assert_eq!(read_command(""), Err(InputError::Empty));
        assert_eq!(read_command("\r\n"), Err(InputError::Empty));
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert_eq!(
            read_command("12 4\n"),
            Err(InputError::Malformed(ProtocolError::InvalidDigit { ch: ' ', column: 3 }))
        );
        assert!(matches!(
            read_command("0x1F"),
            Err(InputError::Malformed(ProtocolError::InvalidDigit { ch: 'X', .. }))
        ));
    }
}
