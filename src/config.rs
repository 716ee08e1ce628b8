use std::sync::OnceLock;

/// Default binarization block edge in pixels
pub const DEFAULT_BLOCK_SIZE: usize = 8;
/// Default luminance spread below which a block is treated as flat
pub const DEFAULT_MIN_DYNAMIC_RANGE: u8 = 24;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

/// Tuning knobs for the decode pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Edge length of the square blocks used by the adaptive binarizer
    pub block_size: usize,
    /// Blocks whose max-min luminance spread is at or below this are flat
    pub min_dynamic_range: u8,
    /// Worker threads for [`crate::worker::RecognitionWorker`]; 0 means one per core
    pub worker_threads: usize,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            min_dynamic_range: DEFAULT_MIN_DYNAMIC_RANGE,
            worker_threads: 0,
        }
    }
}

impl RecognizerConfig {
    /// Defaults overridden by `RECOGNIZER_BLOCK_SIZE`,
    /// `RECOGNIZER_MIN_DYNAMIC_RANGE` and `RECOGNIZER_WORKERS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            block_size: parse_env_usize("RECOGNIZER_BLOCK_SIZE", defaults.block_size).clamp(2, 64),
            min_dynamic_range: parse_env_u8(
                "RECOGNIZER_MIN_DYNAMIC_RANGE",
                defaults.min_dynamic_range,
            ),
            worker_threads: parse_env_usize("RECOGNIZER_WORKERS", defaults.worker_threads),
        }
    }

    /// Process-wide configuration, read from the environment once
    pub fn global() -> &'static RecognizerConfig {
        static GLOBAL: OnceLock<RecognizerConfig> = OnceLock::new();
        GLOBAL.get_or_init(RecognizerConfig::from_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecognizerConfig::default();
        assert_eq!(config.block_size, 8);
        assert_eq!(config.min_dynamic_range, 24);
        assert_eq!(config.worker_threads, 0);
    }
}
