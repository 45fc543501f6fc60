use crate::error::{EvolveError, Result};
use polars::prelude::*;
use super::types::CLOSE_ALIASES;

pub struct DataValidator;

impl DataValidator {
    /// Find the close column by checking aliases
    pub fn find_close_column(df: &DataFrame) -> Result<&'static str> {
        let columns = df.get_column_names();
        CLOSE_ALIASES
            .into_iter()
            .find(|alias| columns.iter().any(|col| col.as_str() == *alias))
            .ok_or_else(|| {
                EvolveError::DataLoading(format!(
                    "Missing close column (tried aliases: {:?})",
                    CLOSE_ALIASES
                ))
            })
    }

    /// Close prices must be numeric
    pub fn validate_numeric(df: &DataFrame, column: &str) -> Result<()> {
        let dtype = df.column(column)?.dtype().clone();
        if !matches!(dtype, DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32) {
            return Err(EvolveError::DataLoading(format!(
                "Column '{}' must be numeric, found {:?}",
                column, dtype
            )));
        }
        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(rows: usize, min_rows: usize) -> Result<()> {
        if rows < min_rows {
            return Err(EvolveError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                rows, min_rows
            )));
        }
        Ok(())
    }
}
