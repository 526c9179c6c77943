//! Sample file loading with format dispatch by extension

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading an empirical sample file
#[derive(Error, Debug)]
pub enum LoadError {
    /// File does not exist
    #[error("Sample file not found: {path}")]
    NotFound { path: PathBuf },

    /// Extension is not one of the supported formats
    #[error("Unsupported sample file format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },

    /// Underlying I/O failure
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON body was not an array of numbers
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    /// CSV record could not be read or parsed as a float
    #[error("Invalid CSV in {path} at record {record}: {message}")]
    InvalidCsv {
        path: PathBuf,
        record: usize,
        message: String,
    },

    /// File parsed but contained no values
    #[error("Sample file is empty: {path}")]
    Empty { path: PathBuf },
}

/// Result type alias for loading operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Load an empirical sample list from a JSON or CSV file
///
/// Dispatches on the file extension. The returned list is non-empty;
/// an empty file is an error.
pub fn load_samples(path: &Path) -> LoadResult<Vec<f64>> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let values = match ext.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    if values.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(values)
}

fn load_json(path: &Path) -> LoadResult<Vec<f64>> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn load_csv(path: &Path) -> LoadResult<Vec<f64>> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(BufReader::new(file));

    let mut values = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::InvalidCsv {
            path: path.to_path_buf(),
            record: i,
            message: e.to_string(),
        })?;
        let field = record.get(0).ok_or_else(|| LoadError::InvalidCsv {
            path: path.to_path_buf(),
            record: i,
            message: "empty record".to_string(),
        })?;
        let value: f64 = field.trim().parse().map_err(|e: std::num::ParseFloatError| {
            LoadError::InvalidCsv {
                path: path.to_path_buf(),
                record: i,
                message: e.to_string(),
            }
        })?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cea_io_test_{}_{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_json_array() {
        let path = temp_file("weights.json", "[0.1, 0.5, 2.25]");
        let values = load_samples(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(values, vec![0.1, 0.5, 2.25]);
    }

    #[test]
    fn test_load_csv_column() {
        let path = temp_file("weights.csv", "0.1\n0.5\n2.25\n");
        let values = load_samples(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(values, vec![0.1, 0.5, 2.25]);
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/definitely/not/here.json");
        assert!(matches!(
            load_samples(path),
            Err(LoadError::NotFound { .. })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let path = temp_file("weights.p", "whatever");
        let result = load_samples(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_empty_json_list() {
        let path = temp_file("empty.json", "[]");
        let result = load_samples(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_file("bad.json", "{\"not\": \"a list\"}");
        let result = load_samples(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn test_invalid_csv_value() {
        let path = temp_file("bad.csv", "0.1\nnot_a_number\n");
        let result = load_samples(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(LoadError::InvalidCsv { record: 1, .. })
        ));
    }
}
