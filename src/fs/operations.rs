//! Locked whole-document JSON I/O.
//!
//! Every persisted file is a single JSON document that is read and written
//! in full. Advisory file locks keep access exclusive to the running
//! instance; a save overwrites the previous contents with no undo.

use std::{io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use fs4::tokio::AsyncFileExt;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};

/// Reads and deserializes a JSON document under a shared lock.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let mut file = File::open(path)
        .await
        .with_context(|| format!("cannot open {}", path.display()))?;
    file.lock_shared()?;
    let result = read_with_file(&mut file).await;
    file.unlock_async().await?;
    let contents: String = result.with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid data file", path.display()))
}

/// Like [read_document], but a missing file yields `None`.
pub async fn try_read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match File::open(path).await {
        Ok(mut file) => {
            file.lock_shared()?;
            let result = read_with_file(&mut file).await;
            file.unlock_async().await?;
            let contents = result.with_context(|| format!("cannot read {}", path.display()))?;
            let value = serde_json::from_str(&contents)
                .with_context(|| format!("{} is not a valid data file", path.display()))?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("cannot open {}", path.display())),
    }
}

async fn read_with_file(file: &mut File) -> Result<String, std::io::Error> {
    let mut contents = String::new();
    file.read_to_string(&mut contents).await?;
    Ok(contents)
}

/// Serializes `value` and overwrites the document at `path` under an
/// exclusive lock, creating the file if needed.
pub async fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .await
        .with_context(|| format!("cannot open {} for writing", path.display()))?;
    // Semi-safe acquire-release for a file
    file.lock_exclusive()?;
    let result = write_with_file(&mut file, value).await;
    file.unlock_async().await?;
    result.with_context(|| format!("cannot write {}", path.display()))
}

async fn write_with_file<T: Serialize + ?Sized>(file: &mut File, value: &T) -> Result<()> {
    let buffer = serde_json::to_vec_pretty(value)?;
    file.set_len(0).await?;
    file.write_all(&buffer).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::Result;
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn document_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Settings.json");

        let data = BTreeMap::from([("alpha".to_string(), 1.0), ("beta".to_string(), 2.5)]);
        write_document(&path, &data).await?;

        let back: BTreeMap<String, f64> = read_document(&path).await?;
        assert_eq!(back, data);
        Ok(())
    }

    #[tokio::test]
    async fn overwrite_replaces_longer_contents() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Records.json");

        let long: Vec<u32> = (0..512).collect();
        write_document(&path, &long).await?;
        let short = vec![7u32];
        write_document(&path, &short).await?;

        let back: Vec<u32> = read_document(&path).await?;
        assert_eq!(back, short);
        Ok(())
    }

    #[tokio::test]
    async fn missing_and_corrupt_documents() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("absent.json");
        assert!(try_read_document::<Vec<u32>>(&path).await?.is_none());
        assert!(read_document::<Vec<u32>>(&path).await.is_err());

        tokio::fs::write(&path, b"{ not json").await?;
        assert!(try_read_document::<Vec<u32>>(&path).await.is_err());
        Ok(())
    }
}
