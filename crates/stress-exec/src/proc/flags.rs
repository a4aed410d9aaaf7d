//! Reserved `run` flags.
//!
//! The invoker always emits the publish flag itself (and `--rm` when it owns container cleanup).
//! Item flags are parsed and compared by exact name, so `--published-dir` or `-p` pass through
//! while `--publish=true`, `--publish-all`, `-P` and `--rm` are dropped.
//!
//! Short flags are read the way the runtime's flag parser reads them: `-Pd` is `-P -d`, and a
//! cluster stops at the first letter that is not a boolean shorthand (the rest is that letter's
//! value). Reserved letters are stripped from the boolean prefix and the remaining letters kept.
//! A reserved flag written without `=value` also owns the bare token after it.
use tracing::warn;

/// Name of a command-line flag, without dashes or `=value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagName<'a> {
    Long(&'a str),
    Short(char),
}

pub const PUBLISH_FLAGS: &[FlagName<'static>] = &[
    FlagName::Long("publish"),
    FlagName::Long("publish-all"),
    FlagName::Short('P'),
];
pub const REMOVE_FLAGS: &[FlagName<'static>] = &[FlagName::Long("rm")];

/// `docker run` shorthands that take no value and may be clustered (`-dit`).
const BOOL_SHORTHANDS: &[char] = &['d', 'i', 't', 'P'];

/// A parsed flag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag<'a> {
    /// `--name` or `--name=value`.
    Long { name: &'a str, value: Option<&'a str> },
    /// `-abc` or `-abc=value`; `cluster` holds the letters.
    Short { cluster: &'a str, value: Option<&'a str> },
}

/// Parse `--name`, `--name=value`, `-n`, `-abc` or `-n=value`.
///
/// Returns `None` for plain values (`/a:/b`, `alpine`), a lone `-`/`--`, and negative numbers.
pub fn parse_flag(raw: &str) -> Option<Flag<'_>> {
    if let Some(rest) = raw.strip_prefix("--") {
        let (name, value) = split_value(rest);
        return (!name.is_empty()).then_some(Flag::Long { name, value });
    }
    let rest = raw.strip_prefix('-')?;
    let (cluster, value) = split_value(rest);
    if cluster.is_empty() || cluster.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(Flag::Short { cluster, value })
}

fn split_value(s: &str) -> (&str, Option<&str>) {
    match s.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (s, None),
    }
}

/// What is left of a token that carried at least one reserved flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    /// Remaining flags of a short cluster, if any.
    pub rest: Option<String>,
    /// The last flag in the token was reserved and had no inline value.
    pub owns_next: bool,
}

/// Set of flags owned by the invoker.
#[derive(Debug, Clone)]
pub struct ReservedFlags {
    names: Vec<FlagName<'static>>,
}

impl ReservedFlags {
    /// Publish flags always; `--rm` only when the invoker adds it itself.
    pub fn new(owns_remove: bool) -> Self {
        let mut names = PUBLISH_FLAGS.to_vec();
        if owns_remove {
            names.extend_from_slice(REMOVE_FLAGS);
        }
        Self { names }
    }

    /// `None` when the token carries no reserved flag and passes verbatim.
    pub fn strip(&self, raw: &str) -> Option<Stripped> {
        match parse_flag(raw)? {
            Flag::Long { name, value } => {
                self.names.contains(&FlagName::Long(name)).then_some(Stripped {
                    rest: None,
                    owns_next: value.is_none(),
                })
            }
            Flag::Short { cluster, value } => self.strip_cluster(cluster, value),
        }
    }

    fn strip_cluster(&self, cluster: &str, value: Option<&str>) -> Option<Stripped> {
        let mut kept = String::new();
        let mut stripped = false;
        let mut last_reserved = false;

        for (i, c) in cluster.char_indices() {
            if !BOOL_SHORTHANDS.contains(&c) {
                // This letter takes a value; whatever follows is that value.
                kept.push_str(&cluster[i..]);
                last_reserved = false;
                break;
            }
            last_reserved = self.names.contains(&FlagName::Short(c));
            if last_reserved {
                stripped = true;
            } else {
                kept.push(c);
            }
        }
        if !stripped {
            return None;
        }

        let rest = (!kept.is_empty()).then(|| match value {
            Some(v) if !last_reserved => format!("-{kept}={v}"),
            _ => format!("-{kept}"),
        });
        Some(Stripped {
            rest,
            owns_next: last_reserved && value.is_none(),
        })
    }

    /// Keep every non-reserved entry, in order.
    pub fn filter<'a, I>(&self, item: &str, flags: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out = Vec::new();
        let mut flags = flags.into_iter().peekable();

        while let Some(flag) = flags.next() {
            let Some(stripped) = self.strip(flag) else {
                out.push(flag.clone());
                continue;
            };
            warn!(target: "stress.exec", item, flag = %flag, "dropping reserved flag from work item");
            out.extend(stripped.rest);

            if stripped.owns_next {
                if let Some(value) = flags.next_if(|next| parse_flag(next).is_none()) {
                    warn!(target: "stress.exec", item, flag = %flag, value = %value, "dropping value of reserved flag");
                }
            }
        }
        out
    }
}
