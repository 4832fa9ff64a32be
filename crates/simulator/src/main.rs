//! # Record Simulator
//!
//! Simula o microcontrolador: empacota leituras de sensores em registros de
//! 32 bits e escreve cada um como 8 dígitos hexadecimais no stdout.
//!
//! ## Uso
//! ```bash
//! record_simulator --temperature 25 --pressure 1020 --humidity 1 --fluid-level 4000
//! record_simulator --random --count 10 --seed 42 --end | record_decoder
//! ```

mod frames;

use clap::Parser;
use frames::FrameSource;
use record_core::config::AppConfig;
use record_core::protocol::encode_checked;
use record_core::types::DecodedReading;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Gera registros de sensores empacotados em 32 bits")]
struct Args {
    /// Temperatura do fluido (°C, -20..=235)
    #[arg(long, default_value_t = 25, allow_negative_numbers = true)]
    temperature: i16,

    /// Pressão no tanque (hPa, 1010..=1137)
    #[arg(long, default_value_t = 1020)]
    pressure: u16,

    /// Máscara de indicadores de umidade (0..=15)
    #[arg(long, default_value_t = 0b0001)]
    humidity: u8,

    /// Nível do fluido (litros, 0..=8191)
    #[arg(long, default_value_t = 4000)]
    fluid_level: u16,

    /// Sorteia cada frame em vez de usar os valores acima
    #[arg(long)]
    random: bool,

    /// Quantidade de frames (padrão: simulator.frames do config)
    #[arg(long)]
    count: Option<u32>,

    /// Semente para frames aleatórios reprodutíveis
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Escreve `END` após o último frame
    #[arg(long)]
    end: bool,

    /// Caminho do config.toml (padrão: ao lado do executável)
    #[arg(long)]
    config: Option<PathBuf>,
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
    let config_path = args.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("Configuração inválida: {e}");
        }
        std::process::exit(2);
    }

    // ── Origem dos frames ──
    let mut source = if args.random {
        FrameSource::random(args.seed)
    } else {
        let reading = DecodedReading {
            temperature: args.temperature,
            pressure: args.pressure,
            humidity: args.humidity,
            fluid_level: args.fluid_level,
        };
        match encode_checked(&reading) {
            Ok(record) => FrameSource::Fixed(record),
            Err(e) => {
                error!("Leitura não representável: {e}");
                std::process::exit(2);
            }
        }
    };

    let count = args.count.unwrap_or(config.simulator.frames);
    let interval = Duration::from_secs_f64(config.simulator.interval_secs);
    info!(
        "Simulator: {count} frame(s), intervalo {:.1}s, modo {}",
        config.simulator.interval_secs,
        if args.random { "aleatório" } else { "fixo" }
    );

    let stdout = io::stdout();
    frames::emit(&mut stdout.lock(), &mut source, count, interval, args.end)
}
