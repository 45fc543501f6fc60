use crate::error::{EvolveError, Result};
use polars::prelude::*;
use std::path::Path;
use super::{types::MarketData, validator::DataValidator};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| EvolveError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load the close series from a CSV file.
    ///
    /// Files stored newest-first are flipped with `reverse` so the series
    /// always runs oldest to newest.
    pub fn load<P: AsRef<Path>>(path: P, reverse: bool) -> Result<MarketData> {
        let df = Self::load_frame(&path)?;
        let data = Self::from_frame(&df, reverse)?;
        log::info!(
            "Loaded {} bars from {}",
            data.len(),
            path.as_ref().display()
        );
        Ok(data)
    }

    pub fn from_frame(df: &DataFrame, reverse: bool) -> Result<MarketData> {
        let close_name = DataValidator::find_close_column(df)?;
        DataValidator::validate_numeric(df, close_name)?;

        let close = df.column(close_name)?.cast(&DataType::Float64)?;
        let close_f64 = close.f64()?;

        let null_count = close_f64.null_count();
        if null_count > 0 {
            // Warn about nulls but don't fail
            log::warn!("Dropping {} null values from column '{}'", null_count, close_name);
        }

        let mut close: Vec<f64> = close_f64.into_iter().flatten().collect();
        if reverse {
            close.reverse();
        }

        DataValidator::validate_minimum_rows(close.len(), 2)?;
        Ok(MarketData::new(close))
    }
}
