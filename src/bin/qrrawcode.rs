use clap::{Parser, Subcommand};
use log::error;
use rust_qr_rawcode::encoder::tables::{block_spec, remainder_bits};
use rust_qr_rawcode::{ECLevel, RawCode};

#[derive(Parser)]
#[command(name = "qrrawcode", version, about = "QR RS block and codeword interleave tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the RS block partition of a version/level
    Spec {
        #[arg(long = "symbol-version")]
        symbol_version: u8,
        #[arg(long)]
        level: ECLevel,
    },
    /// Print the interleaved codeword stream for some data codewords
    Interleave {
        #[arg(long = "symbol-version")]
        symbol_version: u8,
        #[arg(long)]
        level: ECLevel,
        /// Data codewords as hex
        #[arg(long, conflicts_with = "fill")]
        hex: Option<String>,
        /// Fill every data codeword with this byte
        #[arg(long)]
        fill: Option<u8>,
        /// Extra reads past the end of the stream
        #[arg(long, default_value_t = 0)]
        pad: usize,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Spec {
            symbol_version,
            level,
        } => spec_cmd(symbol_version, level),
        Command::Interleave {
            symbol_version,
            level,
            hex,
            fill,
            pad,
        } => interleave_cmd(symbol_version, level, hex.as_deref(), fill, pad),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn spec_cmd(version: u8, level: ECLevel) -> bool {
    let spec = match block_spec(version, level) {
        Ok(spec) => spec,
        Err(err) => {
            error!("{}", err);
            return false;
        }
    };

    println!("Symbol: version {} level {:?}", version, level);
    println!(
        "  group 1: {} blocks x {} data + {} ecc",
        spec.n1, spec.dl1, spec.el1
    );
    if spec.n2 > 0 {
        println!(
            "  group 2: {} blocks x {} data + {} ecc",
            spec.n2, spec.dl2, spec.el2
        );
    }
    println!(
        "  data={} ecc={} total={} remainder_bits={}",
        spec.data_length(),
        spec.ecc_length(),
        spec.total_codewords(),
        remainder_bits(version)
    );
    true
}

fn interleave_cmd(
    version: u8,
    level: ECLevel,
    hex_data: Option<&str>,
    fill: Option<u8>,
    pad: usize,
) -> bool {
    let data = match (hex_data, fill) {
        (Some(text), _) => match hex::decode(text.trim()) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                error!("invalid hex data: {}", err);
                return false;
            }
        },
        (None, Some(byte)) => match block_spec(version, level) {
            Ok(spec) => Some(vec![byte; spec.data_length()]),
            Err(err) => {
                error!("{}", err);
                return false;
            }
        },
        (None, None) => None,
    };

    let raw = match RawCode::new(data.as_deref(), version, level) {
        Ok(raw) => raw,
        Err(err) => {
            error!("{}", err);
            return false;
        }
    };

    let stream = raw.stream();
    let total = stream.total_len();
    let codewords: Vec<u8> = stream.take(total + pad).collect();
    println!("{}", hex::encode(&codewords));
    true
}
