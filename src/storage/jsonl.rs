//! JSONL (JSON Lines) storage.
//!
//! JSONL is the source of truth for players and match results.
//! Each line is a valid JSON object representing one entity.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use super::StorageError;

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Player,
    Match,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Player => "players.jsonl",
            EntityType::Match => "matches.jsonl",
        }
    }
}

/// A file written to a sibling temp path, waiting to replace its target.
///
/// The temp file is removed on drop unless it was persisted.
pub struct StagedFile {
    tmp_path: PathBuf,
    target: PathBuf,
}

impl StagedFile {
    /// Write `contents` next to `target` without touching `target` itself.
    pub fn write(target: PathBuf, contents: &[u8]) -> Result<Self, StorageError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file_name = target.file_name().unwrap_or_default().to_os_string();
        file_name.push(".tmp");
        let staged = Self {
            tmp_path: target.with_file_name(file_name),
            target,
        };

        let mut writer = BufWriter::new(File::create(&staged.tmp_path)?);
        writer.write_all(contents)?;
        writer.flush()?;
        Ok(staged)
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // Already renamed away when persisted.
        let _ = fs::remove_file(&self.tmp_path);
    }
}

/// Move staged files over their targets as a group.
///
/// Each target's current contents are captured first. If any rename fails,
/// targets already replaced are put back, so either every file changes or
/// none does.
pub fn persist_all(files: Vec<StagedFile>) -> Result<(), StorageError> {
    let originals = files
        .iter()
        .map(|f| match fs::read(&f.target) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (idx, file) in files.iter().enumerate() {
        if let Err(e) = fs::rename(&file.tmp_path, &file.target) {
            for (done, original) in files[..idx].iter().zip(&originals) {
                if let Err(restore_err) = restore(&done.target, original.as_deref()) {
                    error!(
                        "Failed to restore {:?} after aborted commit: {}",
                        done.target, restore_err
                    );
                }
            }
            return Err(StorageError::Io(e));
        }
        debug!("Persisted {:?}", file.target);
    }

    Ok(())
}

fn restore(target: &Path, original: Option<&[u8]>) -> std::io::Result<()> {
    match original {
        Some(bytes) => fs::write(target, bytes),
        None => fs::remove_file(target),
    }
}

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

    /// Serialize entities into a staged file for this path.
    pub fn stage(&self, entities: &[T]) -> Result<StagedFile, StorageError> {
        let mut buf = String::new();
        for entity in entities {
            buf.push_str(&serde_json::to_string(entity)?);
            buf.push('\n');
        }

        debug!("Staged {} entities for {:?}", entities.len(), self.path);
        StagedFile::write(self.path.clone(), buf.as_bytes())
    }

    /// Write entities, replacing the entire file.
    ///
    /// Readers see either the old or the new contents.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        let staged = self.stage(entities)?;
        persist_all(vec![staged])?;
        Ok(entities.len())
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

    /// Read all entities from the file.
    ///
    /// Blank lines are ignored. A line that does not parse fails the whole
    /// read, since callers write the result back over the file.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let entity = serde_json::from_str(&line).map_err(|source| {
                warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, source);
                StorageError::CorruptLine {
                    path: self.path.clone(),
                    line: idx + 1,
                    source,
                }
            })?;
            entities.push(entity);
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestEntity {
        id: u32,
        name: String,
    }

    fn entity(id: u32, name: &str) -> TestEntity {
        TestEntity {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.jsonl");

        let entities = vec![entity(1, "First"), entity(2, "Second")];

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&entities).unwrap(), 2);

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), entities);
    }

    #[test]
    fn test_jsonl_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestEntity> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<TestEntity> = JsonlReader::new(path.clone());

        writer.write_all(&[entity(1, "Old")]).unwrap();
        writer
            .write_all(&[entity(2, "New1"), entity(3, "New2")])
            .unwrap();

        let read = reader.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].name, "New1");
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn test_write_all_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("x.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        writer.write_all(&[]).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_read_all_rejects_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad_lines.jsonl");

        std::fs::write(
            &path,
            r#"{"id":1,"name":"Good"}

not-valid-json
{"id":2,"name":"Also Good"}
"#,
        )
        .unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        let err = reader.read_all().unwrap_err();
        assert!(matches!(err, StorageError::CorruptLine { line: 3, .. }));
    }

    #[test]
    fn test_read_all_ignores_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank_lines.jsonl");

        std::fs::write(&path, "{\"id\":1,\"name\":\"A\"}\n\n  \n{\"id\":2,\"name\":\"B\"}\n").unwrap();

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_dropped_stage_leaves_target_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("staged.jsonl");

        let writer: JsonlWriter<TestEntity> = JsonlWriter::new(path.clone());
        writer.write_all(&[entity(1, "Old")]).unwrap();

        let staged = writer.stage(&[entity(2, "New")]).unwrap();
        assert_eq!(staged.target(), path.as_path());
        drop(staged);

        let reader: JsonlReader<TestEntity> = JsonlReader::new(path.clone());
        assert_eq!(reader.read_all().unwrap(), vec![entity(1, "Old")]);
        assert!(!temp_dir.path().join("staged.jsonl.tmp").exists());
    }

    #[test]
    fn test_persist_all_restores_earlier_files_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.jsonl");
        let second = temp_dir.path().join("second.jsonl");
        let fresh = temp_dir.path().join("fresh.jsonl");

        let first_writer: JsonlWriter<TestEntity> = JsonlWriter::new(first.clone());
        first_writer.write_all(&[entity(1, "Original")]).unwrap();

        let staged = vec![
            first_writer.stage(&[entity(2, "Replaced")]).unwrap(),
            JsonlWriter::<TestEntity>::new(fresh.clone())
                .stage(&[entity(3, "Fresh")])
                .unwrap(),
            JsonlWriter::<TestEntity>::new(second.clone())
                .stage(&[entity(4, "Blocked")])
                .unwrap(),
        ];
        // A directory in the way makes the last rename fail
        fs::create_dir_all(&second).unwrap();

        assert!(persist_all(staged).is_err());

        let reader: JsonlReader<TestEntity> = JsonlReader::new(first);
        assert_eq!(reader.read_all().unwrap(), vec![entity(1, "Original")]);
        assert!(!fresh.exists());
    }

    #[test]
    fn test_entity_type_filename() {
        assert_eq!(EntityType::Player.filename(), "players.jsonl");
        assert_eq!(EntityType::Match.filename(), "matches.jsonl");
    }
}
