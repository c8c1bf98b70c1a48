//! File classification by extension.

use std::path::Path;

use crate::error::LoaderError;

/// Supported input formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// Comma-separated text
    Csv,
    /// Excel workbook (`.xls` or `.xlsx`)
    Spreadsheet,
}

impl FileKind {
    /// Classify a path by its (case-insensitive) extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use adapter_loader::FileKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(FileKind::from_path(Path::new("gmi.CSV")).unwrap(), FileKind::Csv);
    /// assert_eq!(FileKind::from_path(Path::new("a.xlsx")).unwrap(), FileKind::Spreadsheet);
    /// assert!(FileKind::from_path(Path::new("a.txt")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(FileKind::Csv),
            Some("xls") | Some("xlsx") => Ok(FileKind::Spreadsheet),
            _ => Err(LoaderError::UnsupportedFileType {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::Csv => "csv",
            FileKind::Spreadsheet => "spreadsheet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(FileKind::from_path(Path::new("x.csv")).unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_path(Path::new("x.XLS")).unwrap(), FileKind::Spreadsheet);
        assert_eq!(FileKind::from_path(Path::new("dir.v2/x.xlsx")).unwrap(), FileKind::Spreadsheet);
    }

    #[test]
    fn test_unsupported() {
        for name in ["x", "x.txt", "x.xlsm", "x.csv.gz"] {
            let err = FileKind::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, LoaderError::UnsupportedFileType { .. }), "{}", name);
        }
    }
}
