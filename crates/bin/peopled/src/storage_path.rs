//! Database file location.
//!
//! The path is decided once at startup from the signals captured in
//! [`StorageEnv`]. First match wins:
//!
//! 1. an explicit override path;
//! 2. on the hosting platform, the first persistent mount that exists
//!    (`<mount>/people/people.db`);
//! 3. on the hosting platform without a mount, the ephemeral path;
//! 4. otherwise `<working dir>/data/people.db`.
//!
//! Filesystem failures while preparing the location are logged and
//! swallowed; the process keeps starting with the chosen path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DatabaseConfig;

/// Persistent mount roots checked in priority order on the hosting platform.
pub const MOUNT_CANDIDATES: [&str; 2] = ["/var/data", "/data"];

/// Scratch location used on the hosting platform when no mount exists.
/// Older deployments kept their database here, so it doubles as the legacy path.
pub const EPHEMERAL_PATH: &str = "/tmp/people.db";

const DB_DIR: &str = "people";
const DB_FILE: &str = "people.db";
const LOCAL_DIR: &str = "data";

/// Which resolution rule produced the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Explicitly configured.
    Override,
    /// Under the given persistent mount root.
    PersistentMount(PathBuf),
    /// Platform scratch space; may be wiped between deployments.
    Ephemeral,
    /// Local development directory.
    Local,
}

/// A resolved database location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub source: PathSource,
}

/// Environment signals that decide where the database lives.
#[derive(Debug, Clone)]
pub struct StorageEnv {
    pub override_path: Option<PathBuf>,
    pub on_platform: bool,
    pub mount_candidates: Vec<PathBuf>,
    pub ephemeral_path: PathBuf,
    pub working_dir: PathBuf,
}

impl StorageEnv {
    /// Capture the signals from loaded configuration and the standard
    /// platform locations.
    #[must_use]
    pub fn new(database: &DatabaseConfig, working_dir: PathBuf) -> Self {
        Self {
            override_path: database.path.clone(),
            on_platform: database.hosted,
            mount_candidates: MOUNT_CANDIDATES.iter().map(PathBuf::from).collect(),
            ephemeral_path: PathBuf::from(EPHEMERAL_PATH),
            working_dir,
        }
    }

    /// Decide the database path without touching the filesystem beyond
    /// checking which mount roots exist.
    #[must_use]
    pub fn resolve(&self) -> ResolvedPath {
        if let Some(path) = &self.override_path {
            return ResolvedPath {
                path: path.clone(),
                source: PathSource::Override,
            };
        }

        if self.on_platform {
            if let Some(mount) = self.mount_candidates.iter().find(|root| root.is_dir()) {
                return ResolvedPath {
                    path: mount.join(DB_DIR).join(DB_FILE),
                    source: PathSource::PersistentMount(mount.clone()),
                };
            }
            return ResolvedPath {
                path: self.ephemeral_path.clone(),
                source: PathSource::Ephemeral,
            };
        }

        ResolvedPath {
            path: self.working_dir.join(LOCAL_DIR).join(DB_FILE),
            source: PathSource::Local,
        }
    }

    /// Resolve the path, create its parent directory, and carry a legacy
    /// database over to a persistent mount once. An override pointing inside
    /// a mount root counts as a persistent mount.
    #[must_use]
    pub fn prepare(&self) -> ResolvedPath {
        let resolved = self.resolve();

        if let Some(parent) = resolved.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(
                    dir = %parent.display(),
                    error = %err,
                    "could not create database directory"
                );
            }
        }

        if self.should_migrate_legacy(&resolved) {
            migrate_legacy(&self.ephemeral_path, &resolved.path);
        }

        resolved
    }

    fn should_migrate_legacy(&self, resolved: &ResolvedPath) -> bool {
        self.on_platform
            && self.is_under_mount(resolved)
            && self.ephemeral_path.is_file()
            && !resolved.path.exists()
    }

    /// Whether the path lives under a persistent mount, whichever rule chose it.
    fn is_under_mount(&self, resolved: &ResolvedPath) -> bool {
        match &resolved.source {
            PathSource::PersistentMount(_) => true,
            PathSource::Override => self
                .mount_candidates
                .iter()
                .any(|root| resolved.path.starts_with(root)),
            PathSource::Ephemeral | PathSource::Local => false,
        }
    }
}

fn migrate_legacy(legacy: &Path, target: &Path) {
    match fs::copy(legacy, target) {
        Ok(bytes) => tracing::info!(
            from = %legacy.display(),
            to = %target.display(),
            bytes,
            "copied legacy database to persistent mount"
        ),
        Err(err) => tracing::warn!(
            from = %legacy.display(),
            to = %target.display(),
            error = %err,
            "legacy database migration failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        root: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                root: tempfile::tempdir().unwrap(),
            }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.root.path().join(rel)
        }

        fn env(&self, on_platform: bool) -> StorageEnv {
            StorageEnv {
                override_path: None,
                on_platform,
                mount_candidates: vec![self.path("var-data"), self.path("data")],
                ephemeral_path: self.path("tmp/people.db"),
                working_dir: self.path("app"),
            }
        }
    }

    #[test]
    fn should_prefer_explicit_override() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("var-data")).unwrap();
        let mut env = fx.env(true);
        env.override_path = Some(fx.path("custom/db.sqlite"));

        let resolved = env.resolve();
        assert_eq!(resolved.path, fx.path("custom/db.sqlite"));
        assert_eq!(resolved.source, PathSource::Override);
    }

    #[test]
    fn should_use_first_existing_mount_in_priority_order() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("var-data")).unwrap();
        fs::create_dir_all(fx.path("data")).unwrap();

        let resolved = fx.env(true).resolve();
        assert_eq!(resolved.path, fx.path("var-data/people/people.db"));
        assert_eq!(
            resolved.source,
            PathSource::PersistentMount(fx.path("var-data"))
        );
    }

    #[test]
    fn should_fall_back_to_second_mount() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("data")).unwrap();

        let resolved = fx.env(true).resolve();
        assert_eq!(resolved.path, fx.path("data/people/people.db"));
    }

    #[test]
    fn should_use_ephemeral_path_on_platform_without_mount() {
        let fx = Fixture::new();
        let resolved = fx.env(true).resolve();
        assert_eq!(resolved.path, fx.path("tmp/people.db"));
        assert_eq!(resolved.source, PathSource::Ephemeral);
    }

    #[test]
    fn should_use_working_dir_locally_even_if_mount_exists() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("var-data")).unwrap();

        let resolved = fx.env(false).resolve();
        assert_eq!(resolved.path, fx.path("app/data/people.db"));
        assert_eq!(resolved.source, PathSource::Local);
    }

    #[test]
    fn should_create_parent_directory_when_preparing() {
        let fx = Fixture::new();
        let resolved = fx.env(false).prepare();
        assert!(resolved.path.parent().unwrap().is_dir());
    }

    #[test]
    fn should_copy_legacy_database_to_mount_once() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("data")).unwrap();
        fs::create_dir_all(fx.path("tmp")).unwrap();
        fs::write(fx.path("tmp/people.db"), b"legacy").unwrap();

        let env = fx.env(true);
        let resolved = env.prepare();
        assert_eq!(fs::read(&resolved.path).unwrap(), b"legacy");

        fs::write(fx.path("tmp/people.db"), b"newer legacy").unwrap();
        let _ = env.prepare();
        assert_eq!(fs::read(&resolved.path).unwrap(), b"legacy");
    }

    #[test]
    fn should_not_migrate_without_mount() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("tmp")).unwrap();
        fs::write(fx.path("tmp/people.db"), b"legacy").unwrap();

        let resolved = fx.env(true).prepare();
        assert_eq!(resolved.source, PathSource::Ephemeral);
        assert_eq!(fs::read(&resolved.path).unwrap(), b"legacy");
    }

    #[test]
    fn should_not_migrate_for_override() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("tmp")).unwrap();
        fs::write(fx.path("tmp/people.db"), b"legacy").unwrap();
        let mut env = fx.env(true);
        env.override_path = Some(fx.path("custom/people.db"));

        let resolved = env.prepare();
        assert!(resolved.path.parent().unwrap().is_dir());
        assert!(!resolved.path.exists());
    }

    #[test]
    fn should_migrate_for_override_under_mount() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("data")).unwrap();
        fs::create_dir_all(fx.path("tmp")).unwrap();
        fs::write(fx.path("tmp/people.db"), b"legacy").unwrap();
        let mut env = fx.env(true);
        env.override_path = Some(fx.path("data/app/people.db"));

        let resolved = env.prepare();
        assert_eq!(resolved.source, PathSource::Override);
        assert_eq!(fs::read(&resolved.path).unwrap(), b"legacy");
    }

    #[test]
    fn should_not_migrate_for_override_under_mount_off_platform() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.path("tmp")).unwrap();
        fs::write(fx.path("tmp/people.db"), b"legacy").unwrap();
        let mut env = fx.env(false);
        env.override_path = Some(fx.path("data/app/people.db"));

        let resolved = env.prepare();
        assert!(!resolved.path.exists());
    }

    #[test]
    fn should_swallow_directory_creation_failure() {
        let fx = Fixture::new();
        fs::write(fx.path("blocker"), b"not a directory").unwrap();
        let mut env = fx.env(false);
        env.override_path = Some(fx.path("blocker/people.db"));

        let resolved = env.prepare();
        assert_eq!(resolved.path, fx.path("blocker/people.db"));
    }

    #[test]
    fn should_capture_config_signals() {
        let database = DatabaseConfig {
            path: Some(PathBuf::from("/srv/people.db")),
            hosted: true,
        };
        let env = StorageEnv::new(&database, PathBuf::from("/app"));
        assert_eq!(env.override_path, Some(PathBuf::from("/srv/people.db")));
        assert!(env.on_platform);
        assert_eq!(
            env.mount_candidates,
            vec![PathBuf::from("/var/data"), PathBuf::from("/data")]
        );
        assert_eq!(env.ephemeral_path, PathBuf::from(EPHEMERAL_PATH));
    }
}
