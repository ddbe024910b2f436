use clap::Parser;

use crate::predictor::DEFAULT_PREDICT_URL;
use crate::selector::DEFAULT_THRESHOLD;
use crate::validation::{
    Limits, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_TEXT_BYTES, DEFAULT_MIN_WORDS,
};

#[derive(Parser, Debug)]
#[command(name = "skin-diagnosis")]
#[command(about = "Skin disease diagnosis front service", long_about = None)]
#[command(version)]
pub struct Config {
    #[arg(long, env = "SKIN_DX_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    #[arg(long, env = "SKIN_DX_PREDICT_URL", default_value = DEFAULT_PREDICT_URL)]
    pub predict_url: String,

    #[arg(
        long,
        env = "SKIN_DX_THRESHOLD",
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = parse_threshold
    )]
    pub threshold: f64,

    #[arg(long, env = "SKIN_DX_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    #[arg(long, env = "SKIN_DX_MAX_IMAGE_BYTES", default_value_t = DEFAULT_MAX_IMAGE_BYTES)]
    pub max_image_bytes: usize,

    #[arg(long, env = "SKIN_DX_MAX_TEXT_BYTES", default_value_t = DEFAULT_MAX_TEXT_BYTES)]
    pub max_text_bytes: usize,

    #[arg(long, env = "SKIN_DX_MIN_WORDS", default_value_t = DEFAULT_MIN_WORDS)]
    pub min_words: usize,

    /// Tracing filter; RUST_LOG takes precedence when set.
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn limits(&self) -> Limits {
        Limits {
            max_image_bytes: self.max_image_bytes,
            max_text_bytes: self.max_text_bytes,
            min_words: self.min_words,
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("invalid threshold {raw:?}: {e}"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("threshold must be within [0, 1], got {value}"));
    }
    Ok(value)
}
