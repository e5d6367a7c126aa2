//! JSONL (JSON Lines) storage.
//!
//! JSONL files are the host persistence stand-in: each line is one
//! entity. The engine reads whole files into memory and works on the
//! loaded set; there is no locking and no uniqueness enforcement here.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for entity in entities {
            let json = serde_json::to_string(entity)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        debug!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. A missing file reads as empty;
    /// unparseable lines are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();
        let mut line_num = 0;

        for line in reader.lines() {
            line_num += 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        line_num, self.path, e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestEntity {
        name: String,
        value: u32,
    }

    fn entity(name: &str, value: u32) -> TestEntity {
        TestEntity {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_append_and_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.jsonl");

        let writer = JsonlWriter::new(path.clone());
        writer.append(&entity("one", 1)).unwrap();
        writer.append(&entity("two", 2)).unwrap();

        let reader = JsonlReader::<TestEntity>::new(path);
        let all = reader.read_all().unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0], entity("one", 1));
        assert_eq!(all[1], entity("two", 2));
    }

    #[test]
    fn test_write_all_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.jsonl");

        let writer = JsonlWriter::new(path.clone());
        writer.append(&entity("stale", 0)).unwrap();
        writer
            .write_all(&[entity("fresh", 1), entity("fresher", 2)])
            .unwrap();

        let all = JsonlReader::<TestEntity>::new(path).read_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "fresh");
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let reader = JsonlReader::<TestEntity>::new(dir.path().join("absent.jsonl"));

        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_bad_lines_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.jsonl");

        std::fs::write(
            &path,
            "{\"name\":\"good\",\"value\":1}\nnot json\n\n{\"name\":\"also good\",\"value\":2}\n",
        )
        .unwrap();

        let all = JsonlReader::<TestEntity>::new(path).read_all().unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_read_where() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entities.jsonl");

        let writer = JsonlWriter::new(path.clone());
        writer
            .write_all(&[entity("a", 1), entity("b", 2), entity("c", 3)])
            .unwrap();

        let reader = JsonlReader::<TestEntity>::new(path);
        let matched = reader.read_where(|e| e.value > 1).unwrap();
        assert_eq!(matched.len(), 2);
    }
}
