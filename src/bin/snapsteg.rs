// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Command-line front end: hide, reveal, and size messages in images.
//!
//! ```bash
//! snapsteg capacity photo.png
//! snapsteg encode photo.png -m "meet at noon" -p 'correct horse' -o out.png
//! snapsteg decode out.png -p 'correct horse' -k <key>
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use snapsteg_core::{capacity_bytes, decode, encode, message_budget, Raster, SaveOptions};

/// Hide encrypted text messages in lossless images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how many message bytes an image can hold
    Capacity {
        image: PathBuf,
    },
    /// Hide a message and print the key needed to recover it
    Encode {
        image: PathBuf,

        /// Message to hide
        #[arg(short, long)]
        message: String,

        /// Password (also required to decode)
        #[arg(short, long)]
        password: String,

        /// Output path; defaults to <image>_steg.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Allow saving as JPEG/WebP (destroys the message)
        #[arg(long)]
        allow_lossy: bool,
    },
    /// Recover a hidden message
    Decode {
        image: PathBuf,

        /// Password used at encode time
        #[arg(short, long)]
        password: String,

        /// Key printed at encode time
        #[arg(short, long)]
        key: String,
    },
}

/// `[HH:MM:SS] [LEVEL] message` on stderr.
fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .init();
}

fn default_output(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{stem}_steg.png"))
}

fn load(path: &Path) -> Result<Raster> {
    Raster::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Trimmed password and key, refusing blanks before any image work.
fn decode_credentials<'a>(password: &'a str, key: &'a str) -> Result<(&'a str, &'a str)> {
    let (password, key) = (password.trim(), key.trim());
    if password.is_empty() || key.is_empty() {
        bail!("password and key required");
    }
    Ok((password, key))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Command::Capacity { image } => {
            let raster = load(&image)?;
            println!("{}", capacity_bytes(&raster)?);
        }
        Command::Encode { image, message, password, output, allow_lossy } => {
            let message = message.trim();
            let password = password.trim();
            if message.is_empty() || password.is_empty() {
                bail!("please enter both message and password");
            }

            let raster = load(&image)?;
            let budget = message_budget(&raster, message)?;
            if !budget.fits() {
                bail!(
                    "message too long! max: {} bytes, your message: {} bytes",
                    budget.limit,
                    budget.used
                );
            }

            let encoded = encode(&raster, message, password)?;
            let target = output.unwrap_or_else(|| default_output(&image));
            let written = encoded
                .raster
                .save(&target, SaveOptions { allow_lossy })
                .with_context(|| format!("failed to save {}", target.display()))?;

            log::info!("saved stego image to {}", written.display());
            println!("Encoded! Key:\n{}", encoded.key);
            println!("Used: {}/{} bytes", budget.used, budget.limit);
            println!("Saved to: {}", written.display());
        }
        Command::Decode { image, password, key } => {
            let (password, key) = decode_credentials(&password, &key)?;
            let raster = load(&image)?;
            let message = decode(&raster, password, key)?;
            println!("{message}");
        }
    }
    Ok(())
}
