use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use serde::de::DeserializeOwned;

use crate::error::DatasetError;

pub trait Record {
    fn token(&self) -> &str;
}

/// One metadata table, kept in file order and indexed by token.
#[derive(Debug, Clone)]
pub struct Table<T> {
    name: &'static str,
    rows: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Record + DeserializeOwned> Table<T> {
    /// Reads `<dir>/<name>.json`.
    pub fn load(dir: &Path, name: &'static str) -> Result<Self, DatasetError> {
        let path = dir.join(format!("{name}.json"));
        let file = File::open(&path).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;
        let rows: Vec<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| DatasetError::Json { path, source })?;
        Ok(Self::from_rows(name, rows))
    }
}

impl<T: Record> Table<T> {
    pub fn from_rows(name: &'static str, rows: Vec<T>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.token().to_string(), i))
            .collect();
        Self { name, rows, index }
    }

    pub fn get(&self, token: &str) -> Result<&T, DatasetError> {
        self.index
            .get(token)
            .map(|&i| &self.rows[i])
            .ok_or_else(|| DatasetError::UnknownToken {
                table: self.name,
                token: token.to_string(),
            })
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Sensor;

    fn sensors() -> Table<Sensor> {
        let rows: Vec<Sensor> = serde_json::from_str(
            r#"[
                {"token": "s0", "channel": "LIDAR_TOP", "modality": "lidar"},
                {"token": "s1", "channel": "CAM_FRONT", "modality": "camera"}
            ]"#,
        )
        .unwrap();
        Table::from_rows("sensor", rows)
    }

    #[test]
    fn lookup_by_token() {
        let table = sensors();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("s1").unwrap().channel, "CAM_FRONT");
    }

    #[test]
    fn rows_keep_file_order() {
        let table = sensors();
        let channels: Vec<_> = table.iter().map(|s| s.channel.as_str()).collect();
        assert_eq!(channels, ["LIDAR_TOP", "CAM_FRONT"]);
    }

    #[test]
    fn unknown_token_names_the_table() {
        let err = sensors().get("missing").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnknownToken { table: "sensor", ref token } if token == "missing"
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Table::<Sensor>::load(dir.path(), "sensor").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("sensor.json"));
    }

    #[test]
    fn load_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sensor.json"), "[{\"token\": 1}]").unwrap();
        let err = Table::<Sensor>::load(dir.path(), "sensor").unwrap_err();
        assert!(matches!(err, DatasetError::Json { .. }));
    }
}
