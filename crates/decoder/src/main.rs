//! # Record Decoder
//!
//! Lê registros de 32 bits digitados em hexadecimal, decodifica os campos de
//! sensor e reporta os alarmes. `END` encerra.
//!
//! ## Uso
//! ```bash
//! record_decoder                         # Interativo
//! record_decoder --binary                # Mostra o registro em binário
//! record_simulator --random --count 5 --end | record_decoder
//! ```

mod report;
mod session;

use clap::Parser;
use record_core::config::AppConfig;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Decodifica registros de sensores empacotados em 32 bits")]
struct Args {
    /// Caminho do config.toml (padrão: ao lado do executável)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mostra o registro em binário, agrupado por campo
    #[arg(long)]
    binary: bool,
}

fn main() -> io::Result<()> {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // ── Config ──
    let config_path = args.config.unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Configuração inválida: {e}");
        }
        std::process::exit(2);
    }

    let mut decoder_cfg = config.decoder;
    decoder_cfg.show_binary |= args.binary;

    info!(
        "Decoder pronto | alarmes: temp <= {} ou > {} °C | pressão < {} ou > {} hPa | umidade > {} | nível <= {} ou > {} l",
        decoder_cfg.alarms.temperature_low,
        decoder_cfg.alarms.temperature_high,
        decoder_cfg.alarms.pressure_low,
        decoder_cfg.alarms.pressure_high,
        decoder_cfg.alarms.humidity_max_indicators,
        decoder_cfg.alarms.fluid_empty,
        decoder_cfg.alarms.fluid_overflow
    );

    // ── Loop principal ──
    let stdin = io::stdin();
    let stdout = io::stdout();
    session::run(&mut stdin.lock(), &mut stdout.lock(), &decoder_cfg)?;

    Ok(())
}
