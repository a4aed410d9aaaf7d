use serde::{Deserialize, Serialize};

/// One container launch description from the workload file.
///
/// Immutable after loading; workers share it through `Arc` and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Image (or other identifier) handed to `<runtime> run`.
    pub name: String,
    /// Arguments appended after the image name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Extra `run` flags placed before the image name.
    ///
    /// Flags the invoker owns (publish, rm) are filtered out before launch.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    /// Publish all exposed ports.
    #[serde(default)]
    pub publish: bool,
    /// Send a termination signal when the container outlives the kill delay.
    #[serde(default)]
    pub kill: bool,
}

impl WorkItem {
    /// Create an item with no arguments, no flags and both policies disabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            flags: Vec::new(),
            publish: false,
            kill: false,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    pub fn with_kill(mut self, kill: bool) -> Self {
        self.kill = kill;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_fields() {
        let item: WorkItem = serde_json::from_str(r#"{"name":"alpine"}"#).unwrap();
        assert_eq!(item, WorkItem::new("alpine"));
    }

    #[test]
    fn full_item_parses() {
        let json = r#"{
            "name": "busybox",
            "args": ["echo", "hi"],
            "flags": ["-v", "/a:/b"],
            "publish": true,
            "kill": true
        }"#;
        let item: WorkItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.name, "busybox");
        assert_eq!(item.args, vec!["echo", "hi"]);
        assert_eq!(item.flags, vec!["-v", "/a:/b"]);
        assert!(item.publish);
        assert!(item.kill);
    }

    #[test]
    fn name_is_required() {
        let res: Result<WorkItem, _> = serde_json::from_str(r#"{"args":["x"]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn empty_lists_are_not_serialized() {
        let json = serde_json::to_string(&WorkItem::new("alpine")).unwrap();
        assert!(!json.contains("args"));
        assert!(!json.contains("flags"));
        assert!(json.contains(r#""publish":false"#));
    }
}
