//! Streaming per-type statistics
//!
//! Each [`DataType`] gets one [`StatsRecord`]. Records start empty and are
//! updated once per classified line; min/max stay `None` until the first
//! value arrives so an empty record never reports bogus extremes.

use crate::classifier::{parse_float, parse_integer, ClassifiedLine, DataType};
use crate::error::{FilterError, Result};

/// Running aggregate for one data type.
///
/// Integer sums wrap on `i64` overflow; float sums are plain IEEE-754
/// accumulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecord {
    count: u64,
    sum: i64,
    double_sum: f64,
    min_integer: Option<i64>,
    max_integer: Option<i64>,
    min_double: Option<f64>,
    max_double: Option<f64>,
    min_string_length: Option<usize>,
    max_string_length: Option<usize>,
}

impl StatsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_integer(&mut self, value: i64) {
        self.count += 1;
        self.sum = self.sum.wrapping_add(value);
        self.min_integer = Some(self.min_integer.map_or(value, |min| min.min(value)));
        self.max_integer = Some(self.max_integer.map_or(value, |max| max.max(value)));
    }

    pub fn add_float(&mut self, value: f64) {
        self.count += 1;
        self.double_sum += value;
        self.min_double = Some(self.min_double.map_or(value, |min| min.min(value)));
        self.max_double = Some(self.max_double.map_or(value, |max| max.max(value)));
    }

    /// Tracks length in characters, not bytes.
    pub fn add_string(&mut self, value: &str) {
        let length = value.chars().count();
        self.count += 1;
        self.min_string_length = Some(self.min_string_length.map_or(length, |min| min.min(length)));
        self.max_string_length = Some(self.max_string_length.map_or(length, |max| max.max(length)));
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn has_data(&self) -> bool {
        self.count > 0
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    pub fn double_sum(&self) -> f64 {
        self.double_sum
    }

    pub fn min_integer(&self) -> Option<i64> {
        self.min_integer
    }

    pub fn max_integer(&self) -> Option<i64> {
        self.max_integer
    }

    pub fn min_double(&self) -> Option<f64> {
        self.min_double
    }

    pub fn max_double(&self) -> Option<f64> {
        self.max_double
    }

    pub fn min_string_length(&self) -> Option<usize> {
        self.min_string_length
    }

    pub fn max_string_length(&self) -> Option<usize> {
        self.max_string_length
    }

    pub fn average_integer(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    pub fn average_float(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.double_sum / self.count as f64
        }
    }
}

/// The full set of records for one run, one per [`DataType`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    integers: StatsRecord,
    floats: StatsRecord,
    strings: StatsRecord,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, data_type: DataType) -> &StatsRecord {
        match data_type {
            DataType::Integer => &self.integers,
            DataType::Float => &self.floats,
            DataType::String => &self.strings,
        }
    }

    fn record_mut(&mut self, data_type: DataType) -> &mut StatsRecord {
        match data_type {
            DataType::Integer => &mut self.integers,
            DataType::Float => &mut self.floats,
            DataType::String => &mut self.strings,
        }
    }

    /// Folds one classified line into the matching record.
    ///
    /// Numeric text is parsed again here; if that fails the value is left
    /// out of the record and `UnexpectedParse` is returned for the caller
    /// to report.
    pub fn observe(&mut self, line: &ClassifiedLine<'_>) -> Result<()> {
        let record = self.record_mut(line.data_type);
        match line.data_type {
            DataType::Integer => {
                let value = parse_integer(line.text).ok_or_else(|| unexpected(line))?;
                record.add_integer(value);
            }
            DataType::Float => {
                let value = parse_float(line.text).ok_or_else(|| unexpected(line))?;
                record.add_float(value);
            }
            DataType::String => record.add_string(line.text),
        }
        Ok(())
    }

    /// Records in report order.
    pub fn iter(&self) -> impl Iterator<Item = (DataType, &StatsRecord)> + '_ {
        DataType::ALL.into_iter().map(move |data_type| (data_type, self.record(data_type)))
    }

    pub fn total_count(&self) -> u64 {
        self.iter().map(|(_, record)| record.count()).sum()
    }
}

fn unexpected(line: &ClassifiedLine<'_>) -> FilterError {
    FilterError::UnexpectedParse {
        data_type: line.data_type,
        value: line.text.to_string(),
    }
}
