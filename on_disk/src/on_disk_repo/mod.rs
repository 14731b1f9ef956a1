//! A gitlet store kept in a `.gitlet` directory next to the working tree.
//!
//! Layout:
//!
//! ```text
//! .gitlet/
//!   config            TOML settings
//!   state             JSON root record (active branch, merge base)
//!   objects/<id>      zlib-compressed `path NUL content`
//!   commits/<id>      JSON commit record
//!   branches/<name>   JSON branch record (head and staging area)
//! ```
//!
//! Every file is written to a temporary file in `.gitlet` and renamed into
//! place, so an interrupted write leaves either the old record or the new one.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use gitlet_core::{
    branch::Branch,
    merge::MergeBaseStrategy,
    object::{Blob, Commit, Id},
    path::{self, METADATA_DIR},
    repo::{Error, Repo, Result, State},
};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::Config;

/// Implementation of `gitlet_core::repo::Repo` that stores content on the
/// local file system.
#[derive(Debug)]
pub struct OnDiskRepo {
    work_dir: PathBuf,
    gitlet_dir: PathBuf,
    config: Config,
}

impl OnDiskRepo {
    /// Open an existing store.
    ///
    /// `work_dir` should be the top-level working directory. A `.gitlet`
    /// directory should exist at this path. Use `init` to create one if
    /// necessary.
    pub fn new(work_dir: &Path) -> Result<Self> {
        let work_dir = work_dir.to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let gitlet_dir = work_dir.join(METADATA_DIR);
        if !gitlet_dir.is_dir() {
            return Err(Error::NotInitialized);
        }

        let config = Config::load(&gitlet_dir.join("config"))?;

        Ok(OnDiskRepo {
            work_dir,
            gitlet_dir,
            config,
        })
    }

    /// Create the `.gitlet` directory layout and a default config file.
    ///
    /// The result has no root record yet; see `gitlet_core::Repository::init`.
    pub fn init(work_dir: &Path) -> Result<Self> {
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir.to_path_buf()));
        }

        let gitlet_dir = work_dir.join(METADATA_DIR);
        if gitlet_dir.exists() {
            return Err(Error::AlreadyInitialized);
        }

        fs::create_dir_all(gitlet_dir.join("objects"))?;
        fs::create_dir_all(gitlet_dir.join("commits"))?;
        fs::create_dir_all(gitlet_dir.join("branches"))?;

        let config = Config::default();
        config.save(&gitlet_dir.join("config"))?;

        debug!(dir = %gitlet_dir.display(), "created store");

        Ok(OnDiskRepo {
            work_dir: work_dir.to_path_buf(),
            gitlet_dir,
            config,
        })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.gitlet` directory.
    pub fn gitlet_dir(&self) -> &Path {
        self.gitlet_dir.as_path()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn object_path(&self, id: &Id) -> PathBuf {
        self.gitlet_dir.join("objects").join(id.to_string())
    }

    fn commit_path(&self, id: &Id) -> PathBuf {
        self.gitlet_dir.join("commits").join(id.to_string())
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.gitlet_dir.join("branches").join(name)
    }

    fn work_path(&self, name: &str) -> Result<PathBuf> {
        path::check_name(name).map_err(|reason| Error::InvalidPath {
            name: name.to_string(),
            reason,
        })?;
        Ok(self.work_dir.join(name))
    }

    fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        let mut temp = NamedTempFile::new_in(&self.gitlet_dir)?;
        temp.write_all(content)?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn write_record<T: Serialize>(&self, path: &Path, record: &T) -> Result<()> {
        let json = serde_json::to_vec_pretty(record).map_err(|e| Error::OtherError(Box::new(e)))?;
        self.write_atomic(path, &json)
    }
}

fn read_record<T: DeserializeOwned>(path: &Path, record: &str) -> Result<Option<T>> {
    let json = match fs::read(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    serde_json::from_slice(&json)
        .map(Some)
        .map_err(|err| corrupt(record, err))
}

fn corrupt<S: ToString>(record: &str, reason: S) -> Error {
    Error::Corrupt {
        record: record.to_string(),
        reason: reason.to_string(),
    }
}

/// List the names of the regular files in `dir`.
fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = vec![];

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

impl Repo for OnDiskRepo {
    fn put_blob(&mut self, blob: &Blob) -> Result<()> {
        let path = self.object_path(&blob.id());
        if path.exists() {
            return Ok(());
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(blob.path().as_bytes())?;
        encoder.write_all(b"\0")?;
        encoder.write_all(blob.content())?;
        let compressed = encoder.finish()?;

        self.write_atomic(&path, &compressed)?;

        debug!(blob = %blob.id(), path = blob.path(), "wrote blob");
        Ok(())
    }

    fn blob(&self, id: &Id) -> Result<Blob> {
        let record = format!("objects/{}", id);

        let compressed = match fs::read(self.object_path(id)) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(corrupt(&record, "blob is missing"))
            }
            Err(err) => return Err(err.into()),
        };

        let mut raw = vec![];
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut raw)
            .map_err(|err| corrupt(&record, err))?;

        let nul = raw
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| corrupt(&record, "missing path separator"))?;

        let content = raw.split_off(nul + 1);
        raw.truncate(nul);
        let path = String::from_utf8(raw).map_err(|err| corrupt(&record, err))?;

        let blob = Blob::new(path, content);
        if blob.id() != *id {
            return Err(corrupt(&record, "content does not match ID"));
        }

        Ok(blob)
    }

    fn put_commit(&mut self, commit: &Commit) -> Result<()> {
        let path = self.commit_path(&commit.id());

        if let Some(existing) = read_record::<Commit>(&path, "commit")? {
            return if existing == *commit {
                Ok(())
            } else {
                Err(Error::ObjectCollision(commit.id()))
            };
        }

        self.write_record(&path, commit)?;

        debug!(commit = %commit.id(), "wrote commit");
        Ok(())
    }

    fn commit(&self, id: &Id) -> Result<Commit> {
        let record = format!("commits/{}", id);

        let commit: Commit = read_record(&self.commit_path(id), &record)?
            .ok_or_else(|| Error::NoSuchCommit(id.to_string()))?;

        if commit.id() != *id {
            return Err(corrupt(&record, "commit ID does not match file name"));
        }

        Ok(commit)
    }

    fn commit_ids(&self) -> Result<Vec<Id>> {
        Ok(file_names(&self.gitlet_dir.join("commits"))?
            .iter()
            .filter_map(|name| name.parse::<Id>().ok())
            .collect())
    }

    fn branches(&self) -> Result<Vec<Branch>> {
        let mut branches = vec![];

        for name in file_names(&self.gitlet_dir.join("branches"))? {
            let record = format!("branches/{}", name);
            if let Some(branch) = read_record::<Branch>(&self.branch_path(&name), &record)? {
                if branch.name() != name {
                    return Err(corrupt(&record, "branch name does not match file name"));
                }
                branches.push(branch);
            }
        }

        Ok(branches)
    }

    fn put_branch(&mut self, branch: &Branch) -> Result<()> {
        self.write_record(&self.branch_path(branch.name()), branch)?;

        debug!(branch = branch.name(), head = %branch.head(), "wrote branch");
        Ok(())
    }

    fn remove_branch(&mut self, name: &str) -> Result<()> {
        match fs::remove_file(self.branch_path(name)) {
            Ok(()) => {
                debug!(branch = name, "removed branch");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn state(&self) -> Result<State> {
        read_record(&self.gitlet_dir.join("state"), "state")?.ok_or(Error::NotInitialized)
    }

    fn put_state(&mut self, state: &State) -> Result<()> {
        self.write_record(&self.gitlet_dir.join("state"), state)?;

        debug!(active = %state.active, merge_base = %state.merge_base, "wrote state");
        Ok(())
    }

    fn work_files(&self) -> Result<Vec<String>> {
        Ok(file_names(&self.work_dir)?
            .into_iter()
            .filter(|name| path::check_name(name).is_ok())
            .collect())
    }

    fn read_work_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.work_path(name)?;
        if !path.is_file() {
            return Ok(None);
        }

        Ok(Some(fs::read(path)?))
    }

    fn write_work_file(&mut self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.work_path(name)?;
        fs::write(path, content).map_err(|e| e.into())
    }

    fn remove_work_file(&mut self, name: &str) -> Result<()> {
        let path = self.work_path(name)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn merge_base_strategy(&self) -> MergeBaseStrategy {
        self.config.merge.base
    }
}

#[cfg(test)]
mod tests;
