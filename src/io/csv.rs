//! CSV export of the correlation matrix

use std::path::Path;

use ndarray::Array2;

use crate::error::{MetaError, Result};

/// Write a labeled square matrix as CSV: header row of labels, one row per
/// label with values to 6 decimals. NaN entries export as empty fields,
/// matching how spreadsheet tools import missing values.
pub fn write_matrix_csv<P: AsRef<Path>>(
    path: P,
    labels: &[String],
    matrix: &Array2<f64>,
) -> Result<()> {
    let (n_rows, n_cols) = matrix.dim();
    if n_rows != labels.len() || n_cols != labels.len() {
        return Err(MetaError::InvalidMatrix {
            reason: format!(
                "matrix is {}x{} but there are {} labels",
                n_rows,
                n_cols,
                labels.len()
            ),
        });
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header = Vec::with_capacity(labels.len() + 1);
    header.push(String::new());
    header.extend(labels.iter().cloned());
    writer.write_record(&header)?;

    for (i, label) in labels.iter().enumerate() {
        let mut record = Vec::with_capacity(labels.len() + 1);
        record.push(label.clone());
        for j in 0..n_cols {
            let v = matrix[[i, j]];
            if v.is_nan() {
                record.push(String::new());
            } else {
                record.push(format!("{:.6}", v));
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_matrix_csv() {
        let labels = vec!["A".to_string(), "B".to_string()];
        let matrix = array![[1.0, 0.5], [0.5, 1.0]];

        let file = NamedTempFile::new().unwrap();
        write_matrix_csv(file.path(), &labels, &matrix).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], ",A,B");
        assert_eq!(lines[1], "A,1.000000,0.500000");
        assert_eq!(lines[2], "B,0.500000,1.000000");
    }

    #[test]
    fn test_nan_exports_empty() {
        let labels = vec!["A".to_string(), "B".to_string()];
        let matrix = array![[1.0, f64::NAN], [f64::NAN, 1.0]];

        let file = NamedTempFile::new().unwrap();
        write_matrix_csv(file.path(), &labels, &matrix).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert!(contents.lines().nth(1).unwrap().ends_with("1.000000,"));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let labels = vec!["A".to_string()];
        let matrix = array![[1.0, 0.5], [0.5, 1.0]];
        let file = NamedTempFile::new().unwrap();
        assert!(write_matrix_csv(file.path(), &labels, &matrix).is_err());
    }
}
