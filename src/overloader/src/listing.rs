use std::cmp::Ordering;

use crate::loader::{Instance, LoadError, Overloader};

/// A class found by [`ObjectList::list_objects`], with the label to show
/// for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedObject {
    pub class: String,
    pub label: String,
}

/// Lists and loads the pluggable parts living under
/// `<prefix>\<sub_dir>\<sub_type>\` for every prefix of an overloader.
#[derive(Debug, Clone)]
pub struct ObjectList {
    sub_dir: String,
    sub_loader: Overloader,
}

impl ObjectList {
    pub fn new(sub_dir: impl Into<String>, loader: &Overloader) -> Self {
        let sub_dir = sub_dir.into();
        let sub_loader = loader.create_sub_scope(&sub_dir);
        Self {
            sub_dir,
            sub_loader,
        }
    }

    pub fn sub_dir(&self) -> &str {
        &self.sub_dir
    }

    /// The overloader scoped to the sub directory, used to inject loaded
    /// parts.
    pub fn sub_loader(&self) -> &Overloader {
        &self.sub_loader
    }

    /// Creates every concrete `class_type` registered directly under
    /// `<prefix>\<sub_dir>\<sub_type>\` and labels it with `name_fn`.
    /// Parts that are only legacy targets get legacy injection even when
    /// legacy classes are disabled.
    ///
    /// A class is listed once even if several prefixes reach it. The result
    /// is sorted by label, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the listed classes can't be created.
    pub fn list_objects<F>(
        &self,
        sub_type: &str,
        class_type: &str,
        name_fn: F,
    ) -> Result<Vec<ListedObject>, LoadError>
    where
        F: Fn(&Instance) -> String,
    {
        let types = self.sub_loader.types();
        let sub_type = sub_type.replace('/', "\\");
        let mut res: Vec<ListedObject> = Vec::new();

        for prefix in self.sub_loader.prefixes() {
            let namespace = format!("{prefix}\\{sub_type}\\");
            let classes = types.names().filter(|name| {
                name.strip_prefix(namespace.as_str())
                    .is_some_and(|short| !short.is_empty() && !short.contains('\\'))
            });

            for class in classes {
                if res.iter().any(|listed| listed.class == class) {
                    continue;
                }
                let instantiable = types.get(class).is_some_and(|c| c.is_instantiable());
                if !instantiable || !types.is_a(class, class_type) {
                    continue;
                }

                let instance = self.sub_loader.create_part(class)?;
                let label = format!("{} ({class})", name_fn(&instance).trim());
                res.push(ListedObject {
                    class: class.to_owned(),
                    label,
                });
            }
        }

        res.sort_by(|a, b| compare_ignoring_case(&a.label, &b.label));
        Ok(res)
    }

    /// Creates the part `class_name`, which must be a `class_type`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotLoadable`] if the class isn't registered,
    /// [`LoadError::NotInstanceOf`] if it isn't a `class_type`, or any error
    /// from creating it.
    pub fn load_object(
        &self,
        class_name: &str,
        sub_type: &str,
        class_type: &str,
    ) -> Result<Instance, LoadError> {
        let types = self.sub_loader.types();
        let class_name = class_name.trim_start_matches('\\');
        if !types.exists(class_name) {
            return Err(LoadError::NotLoadable {
                name: class_name.to_owned(),
                sub_type: sub_type.to_owned(),
            });
        }
        if !types.is_a(class_name, class_type) {
            return Err(LoadError::NotInstanceOf {
                name: class_name.to_owned(),
                sub_type: sub_type.to_owned(),
                class_type: class_type.to_owned(),
            });
        }

        self.sub_loader.create_part(class_name)
    }
}

fn compare_ignoring_case(a: &str, b: &str) -> Ordering {
    let lower = |s: &str| s.to_lowercase();
    lower(a).cmp(&lower(b)).then_with(|| a.cmp(b))
}
