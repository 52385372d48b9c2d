//! The application state file and startup reconciliation.
//!
//! `AppState.json` tracks the active usernames, the default user and the
//! first-run date. On open the state is checked against what is actually on
//! disk: user folders dropped in by hand are adopted when complete, folders
//! missing required files are deleted, and state entries whose folders are
//! gone are dropped. Missing reference-source files are recreated from the
//! built-in seed catalog so a damaged installation can heal itself.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{bail, Result};
use tracing::{info, warn};

use crate::fs::operations::{try_read_document, write_document};
use crate::reference::{ExerciseDetail, FoodDetail, NutrientContent};
use crate::refdata;
use crate::storage::entities::AppStateData;
use crate::storage::{
    APP_STATE_FILE, EXERCISE_DETAILS_FILE, FOOD_DETAILS_FILE, FOOD_NUTRIENTS_FILE, REFERENCE_DIR,
    USERS_DIR, USER_REQUIRED_FILES,
};
use crate::utils::clock::Clock;

pub struct AppState {
    app_dir: PathBuf,
    data: AppStateData,
}

impl AppState {
    /// Opens (or initializes) the application directory and reconciles the
    /// recorded users with the directories present on disk.
    pub async fn open(app_dir: PathBuf, clock: &dyn Clock) -> Result<AppState> {
        let reference_dir = app_dir.join(REFERENCE_DIR);
        tokio::fs::create_dir_all(&reference_dir).await?;
        tokio::fs::create_dir_all(app_dir.join(USERS_DIR)).await?;
        ensure_reference_source(&reference_dir).await?;

        let state_path = reference_dir.join(APP_STATE_FILE);
        let mut data = match try_read_document::<AppStateData>(&state_path).await? {
            Some(data) => data,
            None => AppStateData::new(env!("CARGO_PKG_VERSION")),
        };
        if data.created.is_none() {
            data.created = Some(clock.today());
        }

        let mut state = AppState { app_dir, data };
        state.reconcile().await?;
        state.save().await?;
        Ok(state)
    }

    pub fn reference_dir(&self) -> PathBuf {
        self.app_dir.join(REFERENCE_DIR)
    }

    pub fn users_dir(&self) -> PathBuf {
        self.app_dir.join(USERS_DIR)
    }

    pub fn user_dir(&self, username: &str) -> PathBuf {
        self.users_dir().join(username)
    }

    pub fn users(&self) -> &[String] {
        &self.data.users
    }

    pub fn is_user(&self, username: &str) -> bool {
        self.data.users.iter().any(|u| u == username)
    }

    pub fn default_user(&self) -> Option<&str> {
        self.data.default_user.as_deref()
    }

    pub fn created(&self) -> Option<chrono::NaiveDate> {
        self.data.created
    }

    pub fn version(&self) -> &str {
        &self.data.version
    }

    pub async fn set_default_user(&mut self, username: Option<&str>) -> Result<()> {
        if let Some(name) = username {
            if !self.is_user(name) {
                bail!("{name} is not an active user");
            }
        }
        self.data.default_user = username.map(str::to_string);
        self.save().await
    }

    /// Records a newly created user. The caller has already created the
    /// user's directory and files.
    pub async fn register_user(&mut self, username: &str) -> Result<()> {
        if !self.is_user(username) {
            self.data.users.push(username.to_string());
            self.data.users.sort();
        }
        self.save().await
    }

    /// Drops a user from the state; clears the default user if it pointed at
    /// them.
    pub async fn unregister_user(&mut self, username: &str) -> Result<()> {
        self.data.users.retain(|u| u != username);
        if self.data.default_user.as_deref() == Some(username) {
            self.data.default_user = None;
        }
        self.save().await
    }

    async fn save(&self) -> Result<()> {
        let path = self.reference_dir().join(APP_STATE_FILE);
        write_document(&path, &self.data).await
    }

    async fn reconcile(&mut self) -> Result<()> {
        let users_dir = self.users_dir();
        let mut present = Vec::new();
        let mut entries = tokio::fs::read_dir(&users_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                present.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        let mut good_users = Vec::new();
        for username in &present {
            let user_dir = users_dir.join(username);
            if user_files_complete(&user_dir).await {
                if !self.is_user(username) {
                    info!("adopting user folder {username}");
                }
                good_users.push(username.clone());
            } else {
                warn!("user folder {username} is missing required files, removing it");
                tokio::fs::remove_dir_all(&user_dir).await?;
            }
        }

        for username in self.data.users.clone() {
            if !present.contains(&username) {
                warn!("folder for user {username} is gone, dropping the user");
            }
        }

        good_users.sort();
        self.data.users = good_users;
        if let Some(default) = self.data.default_user.clone() {
            if !self.is_user(&default) {
                self.data.default_user = None;
            }
        }
        Ok(())
    }
}

async fn user_files_complete(user_dir: &Path) -> bool {
    for file_name in USER_REQUIRED_FILES {
        match tokio::fs::metadata(user_dir.join(file_name)).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => return false,
        }
    }
    true
}

/// Recreates any missing reference-source file. Exercises come from the
/// built-in catalog with IDs from 10001; Foods start empty and grow through
/// user entry and capsule imports.
async fn ensure_reference_source(reference_dir: &Path) -> Result<()> {
    let exercise_path = reference_dir.join(EXERCISE_DETAILS_FILE);
    if tokio::fs::metadata(&exercise_path).await.is_err() {
        info!("creating seed exercise catalog");
        let exercises: BTreeMap<String, ExerciseDetail> = refdata::SEED_EXERCISES
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                (
                    (10001 + offset as u32).to_string(),
                    ExerciseDetail {
                        description: entry.description.to_string(),
                        focus_muscle: entry.focus_muscle.to_string(),
                        units: [entry.units[0].to_string(), entry.units[1].to_string()],
                        tags: Vec::new(),
                    },
                )
            })
            .collect();
        write_document(&exercise_path, &exercises).await?;
    }

    let food_path = reference_dir.join(FOOD_DETAILS_FILE);
    if tokio::fs::metadata(&food_path).await.is_err() {
        write_document(&food_path, &BTreeMap::<String, FoodDetail>::new()).await?;
    }
    let nutrients_path = reference_dir.join(FOOD_NUTRIENTS_FILE);
    if tokio::fs::metadata(&nutrients_path).await.is_err() {
        write_document(&nutrients_path, &BTreeMap::<String, NutrientContent>::new()).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::fs::operations::read_document;
    use crate::storage::PROFILE_FILE;
    use crate::utils::clock::MockClock;

    use super::*;

    fn clock_at(date: NaiveDate) -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_today().return_const(date);
        clock
    }

    fn fixed_clock() -> MockClock {
        clock_at(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap())
    }

    #[tokio::test]
    async fn open_initializes_directory_and_seeds() -> Result<()> {
        let dir = tempdir()?;
        let state = AppState::open(dir.path().to_owned(), &fixed_clock()).await?;

        assert!(state.users().is_empty());
        assert_eq!(
            state.created(),
            Some(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap())
        );
        assert!(dir.path().join(USERS_DIR).is_dir());

        let exercises: BTreeMap<String, ExerciseDetail> =
            read_document(&dir.path().join(REFERENCE_DIR).join(EXERCISE_DETAILS_FILE)).await?;
        assert_eq!(exercises.len(), refdata::SEED_EXERCISES.len());
        assert!(exercises.contains_key("10001"));

        let foods: BTreeMap<String, FoodDetail> =
            read_document(&dir.path().join(REFERENCE_DIR).join(FOOD_DETAILS_FILE)).await?;
        assert!(foods.is_empty());

        // created date survives a reopen
        let reopened = AppState::open(
            dir.path().to_owned(),
            &clock_at(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
        )
        .await?;
        assert_eq!(
            reopened.created(),
            Some(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap())
        );
        Ok(())
    }

    #[tokio::test]
    async fn reconcile_adopts_complete_and_removes_incomplete_folders() -> Result<()> {
        let dir = tempdir()?;
        AppState::open(dir.path().to_owned(), &fixed_clock()).await?;

        // A complete folder placed by hand.
        let adopted = dir.path().join(USERS_DIR).join("carla");
        tokio::fs::create_dir_all(&adopted).await?;
        for file_name in USER_REQUIRED_FILES {
            tokio::fs::write(adopted.join(file_name), b"{}").await?;
        }
        // An incomplete one.
        let broken = dir.path().join(USERS_DIR).join("broken");
        tokio::fs::create_dir_all(&broken).await?;
        tokio::fs::write(broken.join(PROFILE_FILE), b"{}").await?;

        let state = AppState::open(dir.path().to_owned(), &fixed_clock()).await?;
        assert_eq!(state.users(), ["carla"]);
        assert!(!broken.exists());
        Ok(())
    }

    #[tokio::test]
    async fn default_user_is_cleared_when_their_folder_vanishes() -> Result<()> {
        let dir = tempdir()?;
        {
            let mut state = AppState::open(dir.path().to_owned(), &fixed_clock()).await?;
            let user_dir = state.user_dir("dana");
            tokio::fs::create_dir_all(&user_dir).await?;
            for file_name in USER_REQUIRED_FILES {
                tokio::fs::write(user_dir.join(file_name), b"{}").await?;
            }
            state.register_user("dana").await?;
            state.set_default_user(Some("dana")).await?;
        }

        tokio::fs::remove_dir_all(dir.path().join(USERS_DIR).join("dana")).await?;
        let state = AppState::open(dir.path().to_owned(), &fixed_clock()).await?;
        assert!(state.users().is_empty());
        assert_eq!(state.default_user(), None);
        Ok(())
    }

    #[tokio::test]
    async fn set_default_requires_active_user() -> Result<()> {
        let dir = tempdir()?;
        let mut state = AppState::open(dir.path().to_owned(), &fixed_clock()).await?;
        assert!(state.set_default_user(Some("ghost")).await.is_err());
        assert!(state.set_default_user(None).await.is_ok());
        Ok(())
    }
}
