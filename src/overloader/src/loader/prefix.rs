use serde::{Deserialize, Serialize};

use crate::util::text;

/// Prefixes searched when nothing else is configured.
pub const DEFAULT_PREFIXES: [&str; 3] = ["Zalt", "Laminas", "Zend"];

/// Where a batch of newly added prefixes lands relative to the prefixes
/// already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixPriority {
    /// A later batch is searched before earlier prefixes.
    #[default]
    AddedFirst,
    /// A later batch is searched after earlier prefixes.
    AddedLast,
}

/// Whether the underscore-joined legacy spelling of a candidate is tried
/// before or after its namespaced spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyOrder {
    #[default]
    NamespacedFirst,
    LegacyFirst,
}

/// The ordered namespace prefixes an overloader searches, highest priority
/// first. A prefix never appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixList {
    prefixes: Vec<String>,
    priority: PrefixPriority,
}

impl PrefixList {
    /// A list holding [`DEFAULT_PREFIXES`].
    pub fn new(priority: PrefixPriority) -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| (*p).to_owned()).collect(),
            priority,
        }
    }

    pub fn priority(&self) -> PrefixPriority {
        self.priority
    }

    /// Adds a batch of prefixes. The batch keeps its own order; prefixes
    /// already present keep their place.
    pub fn add<I, S>(&mut self, batch: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = dedup(batch);
        match self.priority {
            PrefixPriority::AddedFirst => {
                let old = std::mem::take(&mut self.prefixes);
                self.prefixes = batch;
                self.extend_missing(old);
            }
            PrefixPriority::AddedLast => self.extend_missing(batch),
        }
    }

    /// Replaces every prefix. Returns `false`, leaving the list untouched,
    /// if the batch holds no usable prefix.
    pub fn replace<I, S>(&mut self, batch: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = dedup(batch);
        if batch.is_empty() {
            return false;
        }
        self.prefixes = batch;
        true
    }

    /// The prefixes in search order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.prefixes.clone()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Every prefix with `path` appended as a sub namespace.
    pub fn scoped(&self, path: &str) -> Self {
        let path = clean_namespace(path);
        let prefixes = if path.is_empty() {
            self.prefixes.clone()
        } else {
            self.prefixes
                .iter()
                .map(|prefix| format!("{prefix}\\{path}"))
                .collect()
        };
        Self {
            prefixes,
            priority: self.priority,
        }
    }

    fn extend_missing(&mut self, prefixes: Vec<String>) {
        for prefix in prefixes {
            if !self.prefixes.contains(&prefix) {
                self.prefixes.push(prefix);
            }
        }
    }
}

fn dedup<I, S>(batch: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut res: Vec<String> = Vec::new();
    for prefix in batch {
        let prefix = clean_namespace(prefix.as_ref());
        if !prefix.is_empty() && !res.contains(&prefix) {
            res.push(prefix);
        }
    }
    res
}

/// Turns path separators into namespace separators and drops separators at
/// either end.
fn clean_namespace(namespace: &str) -> String {
    namespace.replace('/', "\\").trim_matches('\\').to_owned()
}

/// Enables probing the underscore-joined class names of older code, and
/// names the prefix legacy targets are injected with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyNaming {
    prefix: String,
    order: LegacyOrder,
}

impl LegacyNaming {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            order: LegacyOrder::default(),
        }
    }

    pub fn with_order(mut self, order: LegacyOrder) -> Self {
        self.order = order;
        self
    }

    /// Prepended to capitalised resource names when a legacy target is
    /// injected.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn order(&self) -> LegacyOrder {
        self.order
    }

    /// The spellings of a namespaced candidate to try, in order.
    pub(crate) fn spellings(&self, candidate: &str) -> [String; 2] {
        let legacy = legacy_spelling(candidate);
        match self.order {
            LegacyOrder::NamespacedFirst => [candidate.to_owned(), legacy],
            LegacyOrder::LegacyFirst => [legacy, candidate.to_owned()],
        }
    }
}

/// `Zalt\Sub\Name` is spelled `Zalt_Sub_Name` by older code.
pub fn legacy_spelling(name: &str) -> String {
    name.trim_start_matches('\\').replace('\\', "_")
}

/// Brings a short class name into the namespaced form searched under each
/// prefix: `/` becomes `\`, as does `_` when legacy names are enabled, and
/// the first letter is uppercased.
pub fn normalize_name(name: &str, legacy: bool) -> String {
    let name: String = name
        .trim_start_matches('\\')
        .chars()
        .map(|c| match c {
            '/' => '\\',
            '_' if legacy => '\\',
            c => c,
        })
        .collect();
    text::upper_first(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &PrefixList) -> Vec<&str> {
        list.iter().collect()
    }

    #[test]
    fn prefix_list_added_first() {
        let mut list = PrefixList::new(PrefixPriority::AddedFirst);
        list.add(["XUtil", "YUtil", "Zend"]);
        assert_eq!(names(&list), ["XUtil", "YUtil", "Zend", "Zalt", "Laminas"]);

        list.add(["Laminas"]);
        assert_eq!(names(&list), ["Laminas", "XUtil", "YUtil", "Zend", "Zalt"]);
    }

    #[test]
    fn prefix_list_added_last() {
        let mut list = PrefixList::new(PrefixPriority::AddedLast);
        list.add(["XUtil", "Zalt", "\\YUtil\\"]);
        assert_eq!(names(&list), ["Zalt", "Laminas", "Zend", "XUtil", "YUtil"]);
    }

    #[test]
    fn prefix_list_replace_refuses_empty_batch() {
        let mut list = PrefixList::new(PrefixPriority::AddedFirst);
        assert!(!list.replace(["", "\\"]));
        assert_eq!(list.len(), 3);

        assert!(list.replace(["Test3", "Test1", "Test3"]));
        assert_eq!(names(&list), ["Test3", "Test1"]);
    }

    #[test]
    fn prefix_list_scoped() {
        let mut list = PrefixList::new(PrefixPriority::AddedFirst);
        list.replace(["Test3", "Test2"]);

        let scoped = list.scoped("/Sub/Model/");
        assert_eq!(names(&scoped), ["Test3\\Sub\\Model", "Test2\\Sub\\Model"]);
        assert_eq!(names(&list.scoped("")), ["Test3", "Test2"]);
    }

    #[test]
    fn normalize_name_converts_separators() {
        assert_eq!(normalize_name("sub/onlyIn3", false), "Sub\\onlyIn3");
        assert_eq!(normalize_name("\\Sub_Legacy", false), "Sub_Legacy");
        assert_eq!(normalize_name("Sub_Legacy", true), "Sub\\Legacy");
    }

    #[test]
    fn legacy_naming_spellings() {
        let naming = LegacyNaming::new("");
        assert_eq!(
            naming.spellings("Test3\\Sub\\Legacy"),
            ["Test3\\Sub\\Legacy".to_owned(), "Test3_Sub_Legacy".to_owned()]
        );

        let naming = naming.with_order(LegacyOrder::LegacyFirst);
        assert_eq!(naming.spellings("A\\B")[0], "A_B");
    }
}
