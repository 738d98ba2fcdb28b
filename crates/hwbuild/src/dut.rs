//! DUT discovery: every subdirectory of `verif/` names a legal DUT.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};
use crate::util::repo::RepoLayout;

/// Legal DUT names, ordered so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DutCatalog(BTreeSet<String>);

impl DutCatalog {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for DutCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DutCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none found)");
        }
        let names: Vec<&str> = self.iter().collect();
        f.write_str(&names.join(", "))
    }
}

pub struct DutResolver {
    verif_root: PathBuf,
}

impl DutResolver {
    pub fn new(layout: &RepoLayout) -> Self {
        Self {
            verif_root: layout.verif_root(),
        }
    }

    /// Recomputed on every call. A missing or unreadable root is an empty
    /// catalog, not an error.
    pub fn list_duts(&self) -> DutCatalog {
        list_subdirs(&self.verif_root)
    }
}

fn list_subdirs(root: &Path) -> DutCatalog {
    let Ok(entries) = fs::read_dir(root) else {
        return DutCatalog::default();
    };
    entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect()
}

pub fn validate(name: &str, catalog: &DutCatalog) -> Result<()> {
    if catalog.contains(name) {
        return Ok(());
    }
    Err(BuildError::InvalidDut {
        name: name.to_string(),
        catalog: catalog.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_directories() {
        let tmp = TempDir::new().unwrap();
        let verif = tmp.path().join("verif");
        fs::create_dir_all(verif.join("alu")).unwrap();
        fs::create_dir_all(verif.join("fifo")).unwrap();
        fs::write(verif.join("README.md"), "not a dut").unwrap();

        let catalog = DutResolver::new(&RepoLayout::new(tmp.path())).list_duts();
        assert_eq!(catalog.iter().collect::<Vec<_>>(), vec!["alu", "fifo"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = DutResolver::new(&RepoLayout::new(tmp.path())).list_duts();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_validate() {
        let catalog: DutCatalog = ["alu".to_string()].into_iter().collect();
        assert!(validate("alu", &catalog).is_ok());

        match validate("cpu", &catalog) {
            Err(BuildError::InvalidDut { name, catalog }) => {
                assert_eq!(name, "cpu");
                assert!(catalog.contains("alu"));
            }
            other => panic!("expected InvalidDut, got {other:?}"),
        }
    }
}
