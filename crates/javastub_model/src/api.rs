// javastub_model/api - API root and packages
use serde::{Deserialize, Serialize};

use crate::types::JavaType;

/// Root of an imported API: an ordered set of packages, unique by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiRoot {
    pub packages: Vec<Package>,
}

impl ApiRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    pub fn package_mut(&mut self, name: &str) -> Option<&mut Package> {
        self.packages.iter_mut().find(|package| package.name == name)
    }

    /// Adds `package`, or appends its types to the package of the same name.
    pub fn merge_package(&mut self, package: Package) {
        match self.package_mut(&package.name) {
            Some(existing) => existing.types.extend(package.types),
            None => self.packages.push(package),
        }
    }

    pub fn type_count(&self) -> usize {
        self.packages.iter().map(|package| package.types.len()).sum()
    }

    /// Looks up a type by fully qualified, flattened name (`android.app.Notification.Builder`).
    pub fn find_type(&self, qualified_name: &str) -> Option<&JavaType> {
        self.packages.iter().find_map(|package| {
            let simple = if package.name.is_empty() {
                qualified_name
            } else {
                qualified_name
                    .strip_prefix(package.name.as_str())?
                    .strip_prefix('.')?
            };
            package.find_type(simple)
        })
    }
}

/// A Java package. The unnamed package has an empty `name`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub types: Vec<JavaType>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    pub fn find_type(&self, name: &str) -> Option<&JavaType> {
        self.types.iter().find(|ty| ty.name == name)
    }

    /// Package-qualified form of `type_name`; the unnamed package adds no prefix.
    pub fn qualify(&self, type_name: &str) -> String {
        if self.is_unnamed() {
            type_name.to_string()
        } else {
            format!("{}.{}", self.name, type_name)
        }
    }
}
