//! Installation of the distributed application folder.
//!
//! The distribution is a zip archive holding an `OnTrack` folder. Install
//! extracts it into the chosen directory, creates the `Users` directory the
//! application expects, and drops a desktop shortcut to the executable.

pub mod shortcut;

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use tracing::info;
use zip::ZipArchive;

/// Name of the folder the distribution archive unpacks to.
pub const APP_FOLDER: &str = "OnTrack";

pub struct InstallOptions {
    pub archive: PathBuf,
    pub dest: PathBuf,
    pub make_shortcut: bool,
}

pub struct InstallSummary {
    pub app_dir: PathBuf,
    pub extracted_files: usize,
    pub shortcut: Option<PathBuf>,
}

pub fn install(options: &InstallOptions) -> Result<InstallSummary> {
    let app_dir = options.dest.join(APP_FOLDER);
    if app_dir.exists() {
        bail!(
            "there is already an {APP_FOLDER} folder in {}",
            options.dest.display()
        );
    }

    let extracted_files = extract_archive(&options.archive, &options.dest)?;
    if !app_dir.is_dir() {
        bail!("the archive does not contain an {APP_FOLDER} folder");
    }
    info!(
        "extracted {extracted_files} files into {}",
        app_dir.display()
    );

    std::fs::create_dir_all(app_dir.join("Users"))?;

    let shortcut = if options.make_shortcut {
        let target = app_dir.join(executable_name());
        let link = shortcut::create_desktop_shortcut(&target, APP_FOLDER)?;
        info!("created desktop shortcut {}", link.display());
        Some(link)
    } else {
        None
    };

    Ok(InstallSummary {
        app_dir,
        extracted_files,
        shortcut,
    })
}

fn extract_archive(archive_path: &Path, dest: &Path) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("cannot open archive {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid zip archive", archive_path.display()))?;
    let count = archive.len();
    archive
        .extract(dest)
        .with_context(|| format!("cannot extract into {}", dest.display()))?;
    Ok(count)
}

pub fn executable_name() -> &'static str {
    if cfg!(windows) {
        "ontrack.exe"
    } else {
        "ontrack"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn write_distribution_archive(path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        writer.add_directory("OnTrack/", options)?;
        writer.start_file("OnTrack/ontrack", options)?;
        writer.write_all(b"#!/bin/sh\n")?;
        writer.start_file("OnTrack/ReferenceSource/ExerciseDetails.json", options)?;
        writer.write_all(b"{}")?;
        writer.finish()?;
        Ok(())
    }

    #[test]
    fn install_extracts_and_prepares_users_dir() -> Result<()> {
        let dir = tempdir()?;
        let archive = dir.path().join("OnTrack.zip");
        write_distribution_archive(&archive)?;
        let dest = dir.path().join("apps");
        std::fs::create_dir_all(&dest)?;

        let summary = install(&InstallOptions {
            archive,
            dest: dest.clone(),
            make_shortcut: false,
        })?;

        assert_eq!(summary.app_dir, dest.join("OnTrack"));
        assert!(summary.shortcut.is_none());
        assert!(dest.join("OnTrack/Users").is_dir());
        assert!(dest
            .join("OnTrack/ReferenceSource/ExerciseDetails.json")
            .is_file());
        Ok(())
    }

    #[test]
    fn install_refuses_an_existing_app_folder() -> Result<()> {
        let dir = tempdir()?;
        let archive = dir.path().join("OnTrack.zip");
        write_distribution_archive(&archive)?;
        std::fs::create_dir_all(dir.path().join("OnTrack"))?;

        let result = install(&InstallOptions {
            archive,
            dest: dir.path().to_owned(),
            make_shortcut: false,
        });
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn install_rejects_archives_without_the_app_folder() -> Result<()> {
        let dir = tempdir()?;
        let archive = dir.path().join("flat.zip");
        let file = File::create(&archive)?;
        let mut writer = ZipWriter::new(file);
        writer.start_file("loose-file.txt", SimpleFileOptions::default())?;
        writer.write_all(b"nope")?;
        writer.finish()?;

        let dest = dir.path().join("apps");
        std::fs::create_dir_all(&dest)?;
        let result = install(&InstallOptions {
            archive,
            dest,
            make_shortcut: false,
        });
        assert!(result.is_err());
        Ok(())
    }
}
