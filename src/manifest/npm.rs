use semver::Version;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::manifest::ManifestStore;

/// npm-style manifest: `package.json` plus an optional `package-lock.json`.
///
/// Writes touch only the version fields; key order is preserved and output
/// is pretty-printed two-space JSON with a trailing newline, the way npm
/// itself writes these files, so a release commit stays a one-line diff.
#[derive(Debug)]
pub struct NpmManifest {
    package: PathBuf,
    lock: Option<PathBuf>,
}

impl NpmManifest {
    /// Open the manifest in a project directory.
    ///
    /// # Returns
    /// * `Ok(NpmManifest)` - `package.json` found (lock file optional)
    /// * `Err` - no `package.json` in the directory
    pub fn open(root: &Path) -> Result<Self> {
        let package = root.join("package.json");
        if !package.is_file() {
            return Err(ReleaseError::manifest(format!(
                "no package.json found in {}",
                root.display()
            )));
        }

        let lock_path = root.join("package-lock.json");
        let lock = lock_path.is_file().then_some(lock_path);

        Ok(NpmManifest { package, lock })
    }

    fn read_document(path: &Path) -> Result<Value> {
        let raw = fs::read_to_string(path)?;
        let doc: Value = serde_json::from_str(&raw)?;
        if !doc.is_object() {
            return Err(ReleaseError::manifest(format!(
                "{} is not a JSON object",
                path.display()
            )));
        }
        Ok(doc)
    }

    fn write_document(path: &Path, doc: &Value) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(doc)?;
        rendered.push('\n');
        fs::write(path, rendered)?;
        Ok(())
    }
}

impl ManifestStore for NpmManifest {
    fn version(&self) -> Result<Version> {
        let doc = Self::read_document(&self.package)?;
        let raw = doc
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ReleaseError::manifest(format!(
                    "{} has no \"version\" field",
                    self.package.display()
                ))
            })?;
        Version::parse(raw).map_err(|e| {
            ReleaseError::version(format!(
                "invalid version '{}' in {}: {}",
                raw,
                self.package.display(),
                e
            ))
        })
    }

    fn set_version(&mut self, version: &Version) -> Result<()> {
        let rendered = Value::String(version.to_string());

        let mut doc = Self::read_document(&self.package)?;
        doc["version"] = rendered.clone();
        Self::write_document(&self.package, &doc)?;

        if let Some(lock) = &self.lock {
            let mut doc = Self::read_document(lock)?;
            doc["version"] = rendered.clone();
            // npm lockfile v2/v3 repeats the version under packages.""
            if let Some(root_pkg) = doc
                .get_mut("packages")
                .and_then(|packages| packages.get_mut(""))
                .and_then(Value::as_object_mut)
            {
                root_pkg.insert("version".to_string(), rendered.clone());
            }
            Self::write_document(lock, &doc)?;
        }

        Ok(())
    }

    fn tracked_files(&self) -> Vec<PathBuf> {
        let mut files = vec![PathBuf::from("package.json")];
        if self.lock.is_some() {
            files.push(PathBuf::from("package-lock.json"));
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_package(dir: &Path, version: &str) {
        let body = format!(
            "{{\n  \"name\": \"widget\",\n  \"version\": \"{}\",\n  \"license\": \"MIT\"\n}}\n",
            version
        );
        fs::write(dir.join("package.json"), body).unwrap();
    }

    fn write_lock(dir: &Path, version: &str) {
        let body = format!(
            r#"{{
  "name": "widget",
  "version": "{v}",
  "lockfileVersion": 3,
  "packages": {{
    "": {{
      "name": "widget",
      "version": "{v}"
    }}
  }}
}}
"#,
            v = version
        );
        fs::write(dir.join("package-lock.json"), body).unwrap();
    }

    #[test]
    fn test_open_requires_package_json() {
        let dir = TempDir::new().unwrap();
        let result = NpmManifest::open(dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("package.json"));
    }

    #[test]
    fn test_read_version() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "1.2.3");

        let manifest = NpmManifest::open(dir.path()).unwrap();
        assert_eq!(manifest.version().unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_missing_version_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{\"name\": \"widget\"}\n").unwrap();

        let manifest = NpmManifest::open(dir.path()).unwrap();
        let err = manifest.version().unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "not json").unwrap();

        let manifest = NpmManifest::open(dir.path()).unwrap();
        assert!(manifest.version().is_err());
    }

    #[test]
    fn test_set_version_updates_package_json() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "1.2.3");

        let mut manifest = NpmManifest::open(dir.path()).unwrap();
        manifest.set_version(&Version::new(1, 2, 4)).unwrap();

        assert_eq!(manifest.version().unwrap(), Version::new(1, 2, 4));
        let raw = fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(raw.contains("\"version\": \"1.2.4\""));
        // the other fields survive the rewrite
        assert!(raw.contains("\"name\": \"widget\""));
        assert!(raw.contains("\"license\": \"MIT\""));
        assert!(raw.ends_with('\n'));
    }

    #[test]
    fn test_set_version_updates_lock_file_both_spots() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "1.2.3");
        write_lock(dir.path(), "1.2.3");

        let mut manifest = NpmManifest::open(dir.path()).unwrap();
        manifest.set_version(&Version::new(2, 0, 0)).unwrap();

        let raw = fs::read_to_string(dir.path().join("package-lock.json")).unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["version"], "2.0.0");
        assert_eq!(doc["packages"][""]["version"], "2.0.0");
    }

    #[test]
    fn test_tracked_files_without_lock() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "1.2.3");

        let manifest = NpmManifest::open(dir.path()).unwrap();
        assert_eq!(manifest.tracked_files(), vec![PathBuf::from("package.json")]);
    }

    #[test]
    fn test_tracked_files_with_lock() {
        let dir = TempDir::new().unwrap();
        write_package(dir.path(), "1.2.3");
        write_lock(dir.path(), "1.2.3");

        let manifest = NpmManifest::open(dir.path()).unwrap();
        assert_eq!(
            manifest.tracked_files(),
            vec![
                PathBuf::from("package.json"),
                PathBuf::from("package-lock.json")
            ]
        );
    }
}
