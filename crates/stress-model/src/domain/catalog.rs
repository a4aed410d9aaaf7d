use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use crate::{ModelError, WorkItem};

/// Ordered, read-only list of work items loaded once before a run.
///
/// Never empty: every constructor rejects an empty list, so the dispatcher can cycle it forever.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Arc<[Arc<WorkItem>]>,
}

impl Catalog {
    /// Build a catalog from already-parsed items.
    pub fn new(items: Vec<WorkItem>) -> Result<Self, ModelError> {
        if items.is_empty() {
            return Err(ModelError::EmptyCatalog);
        }
        for (index, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(ModelError::InvalidItem {
                    index,
                    reason: "name is empty".into(),
                });
            }
        }
        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a JSON array of work items.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let items: Vec<WorkItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Open and parse a workload file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<WorkItem> = serde_json::from_reader(BufReader::new(file))?;
        Self::new(items)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<WorkItem>> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_array_is_rejected() {
        let err = Catalog::from_json_str("[]").unwrap_err();
        assert!(matches!(err, ModelError::EmptyCatalog));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Catalog::from_json_str(r#"[{"name":"alpine"},{"name":"  "}]"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidItem { index: 1, .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json_str(r#"{"name":"alpine"}"#).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn preserves_file_order() {
        let catalog =
            Catalog::from_json_str(r#"[{"name":"a"},{"name":"b"},{"name":"c"}]"#).unwrap();
        let names: Vec<_> = catalog.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name":"alpine","kill":true}}]"#).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.iter().all(|item| item.kill));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Catalog::load("/definitely/not/here/stress.json").unwrap_err();
        match err {
            ModelError::Open { path, .. } => {
                assert!(path.ends_with("stress.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
