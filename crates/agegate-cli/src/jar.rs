//! Cookie jar persisted as a JSON object on disk.
//!
//! Stands in for the browser's cookie store between simulated page loads.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use agegate_core::{cookie, ChoiceStore, PersistedChoice, StoreError};
use tracing::{debug, warn};

pub struct FileCookieJar {
    path: PathBuf,
    cookies: BTreeMap<String, String>,
}

impl FileCookieJar {
    /// Open the jar at `path`. A missing file is an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let cookies = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), cookies = cookies.len(), "Cookie jar opened");
        Ok(Self { path, cookies })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `document.cookie`-style header of everything in the jar.
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn assign(&mut self, assignment: &str) -> Result<(), StoreError> {
        let Some((name, value, expired)) = cookie::parse_assignment(assignment) else {
            warn!(assignment, "Ignoring malformed cookie assignment");
            return Ok(());
        };
        if expired {
            self.cookies.remove(&name);
        } else {
            self.cookies.insert(name, value);
        }
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.cookies)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl ChoiceStore for FileCookieJar {
    fn read(&self) -> Option<PersistedChoice> {
        cookie::choice_from_header(&self.header())
    }

    fn write(&mut self, choice: &PersistedChoice) -> Result<(), StoreError> {
        self.assign(&cookie::encode_assignment(choice))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.assign(cookie::EXPIRE_ASSIGNMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agegate_core::EligibilityDecision;

    #[test]
    fn missing_file_is_empty_jar() {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileCookieJar::open(dir.path().join("jar.json")).unwrap();
        assert!(jar.read().is_none());
        assert_eq!(jar.header(), "");
    }

    #[test]
    fn decision_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");

        let mut jar = FileCookieJar::open(&path).unwrap();
        jar.write(&PersistedChoice::new(false)).unwrap();

        let reopened = FileCookieJar::open(&path).unwrap();
        assert_eq!(reopened.header(), "is_of_age=false");
        assert_eq!(
            reopened.read().map(|c| c.decision()),
            Some(EligibilityDecision::Ineligible)
        );
    }

    #[test]
    fn clear_removes_only_the_decision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");
        fs::write(&path, r#"{"theme": "dark", "is_of_age": "true"}"#).unwrap();

        let mut jar = FileCookieJar::open(&path).unwrap();
        assert!(jar.read().is_some());
        jar.clear().unwrap();

        let reopened = FileCookieJar::open(&path).unwrap();
        assert_eq!(reopened.header(), "theme=dark");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jar.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileCookieJar::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
