use super::RowError;
use serde::Deserialize;
use std::{collections::HashMap, fmt::Display, str::FromStr};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// a record of a GTFS file keyed by column name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GtfsRow(HashMap<String, String>);

impl GtfsRow {
    /// strips the byte order mark some feeds leave on their first column name.
    pub fn normalized(self) -> Self {
        GtfsRow(
            self.0
                .into_iter()
                .map(|(k, v)| (k.trim_start_matches(BYTE_ORDER_MARK).to_string(), v))
                .collect(),
        )
    }

    /// value of a column that has to be set.
    pub fn get(&self, column: &str) -> Result<&str, RowError> {
        self.get_optional(column)
            .ok_or_else(|| RowError::MissingField(column.to_string()))
    }

    /// value of a column, None when the column is absent or empty.
    pub fn get_optional(&self, column: &str) -> Option<&str> {
        self.0
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn parse<T>(&self, column: &str) -> Result<T, RowError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.get(column)?;
        value.parse::<T>().map_err(|e| RowError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GtfsRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        GtfsRow(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
