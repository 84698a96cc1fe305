//! Shared CLI utilities for the strata-dump tool.

use std::path::Path;

use crate::permute::PermutationVector;
use crate::tensor::DataType;

/// Initialize tracing/logging to stderr.
///
/// If `disable` is true, no output is produced.
/// Otherwise respects `RUST_LOG` env var, defaulting to WARN.
pub fn init_logging(disable: bool) {
    use tracing_subscriber::EnvFilter;

    if disable {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a comma-separated list of unsigned integers, e.g. `1,224,224,3`.
pub fn parse_dims(s: &str) -> Result<Vec<usize>, String> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<usize>()
                .map_err(|_| format!("Invalid dimension '{}' in '{}'", part, s))
        })
        .collect()
}

/// Accepts `f32`, `qasymm8`/`u8` and `i32`.
pub fn parse_data_type(s: &str) -> Result<DataType, String> {
    match s {
        "f32" | "float32" => Ok(DataType::Float32),
        "qasymm8" | "u8" => Ok(DataType::QuantisedAsymm8),
        "i32" | "int32" => Ok(DataType::Signed32),
        _ => Err(format!(
            "Unknown data type '{}'. Options: f32, qasymm8, i32",
            s
        )),
    }
}

/// Parse a permutation such as `0,2,3,1`, or one of the named layouts
/// `nhwc-to-nchw` and `nchw-to-nhwc`.
pub fn parse_permutation(s: &str) -> Result<PermutationVector, String> {
    match s {
        "nhwc-to-nchw" => Ok(PermutationVector::nhwc_to_nchw()),
        "nchw-to-nhwc" => Ok(PermutationVector::nchw_to_nhwc()),
        _ => {
            let mappings = parse_dims(s)?;
            PermutationVector::new(&mappings).map_err(|e| e.to_string())
        }
    }
}

/// Read a raw tensor buffer from disk.
pub fn read_buffer(path: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(path).map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dims() {
        assert_eq!(parse_dims("1,2,2,3").unwrap(), vec![1, 2, 2, 3]);
        assert_eq!(parse_dims(" 4 , 5 ").unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_parse_dims_invalid() {
        let err = parse_dims("1,x,3").unwrap_err();
        assert!(err.contains("Invalid dimension 'x'"));
        assert!(parse_dims("").is_err());
    }

    #[test]
    fn test_parse_data_type() {
        assert_eq!(parse_data_type("f32").unwrap(), DataType::Float32);
        assert_eq!(parse_data_type("qasymm8").unwrap(), DataType::QuantisedAsymm8);
        assert_eq!(parse_data_type("i32").unwrap(), DataType::Signed32);
        assert!(parse_data_type("f16").is_err());
    }

    #[test]
    fn test_parse_permutation_named() {
        assert_eq!(
            parse_permutation("nhwc-to-nchw").unwrap(),
            PermutationVector::nhwc_to_nchw()
        );
        assert_eq!(
            parse_permutation("nchw-to-nhwc").unwrap(),
            PermutationVector::nchw_to_nhwc()
        );
    }

    #[test]
    fn test_parse_permutation_explicit() {
        assert_eq!(parse_permutation("0,2,1,3").unwrap().as_slice(), &[0, 2, 1, 3]);
        let err = parse_permutation("0,0,1,2").unwrap_err();
        assert!(err.contains("Invalid permutation"));
    }

    #[test]
    fn test_read_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tensor.bin");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        assert_eq!(read_buffer(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_buffer_not_found() {
        let err = read_buffer(Path::new("/nonexistent/tensor.bin")).unwrap_err();
        assert!(err.contains("Failed to read file"));
    }

    #[test]
    fn test_init_logging_disabled_does_not_panic() {
        init_logging(true);
    }
}
