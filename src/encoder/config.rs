use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static PAR_MIN_BLOCKS: OnceLock<usize> = OnceLock::new();

/// Block count at or above which parity is computed with rayon
pub(crate) fn par_min_blocks() -> usize {
    *PAR_MIN_BLOCKS.get_or_init(|| parse_env_usize("QR_RAWCODE_PAR_MIN_BLOCKS", 16).clamp(1, 256))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_usize_default() {
        assert_eq!(parse_env_usize("QR_RAWCODE_TEST_UNSET_VARIABLE", 7), 7);
    }

    #[test]
    fn test_par_min_blocks_in_range() {
        let value = par_min_blocks();
        assert!((1..=256).contains(&value));
    }
}
