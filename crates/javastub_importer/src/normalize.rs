// javastub_importer/normalize - Package merge, nested type flattening, constructor binding
//! Post-parse normalization across every compile unit of an import.
//!
//! Each step is a pure function over owned data; [`normalize`] runs them in
//! order: merge, flatten, bind, sort.

use javastub_model::{ApiRoot, JavaType, Member, Package};

/// Merges `fragments` by package name, keeping first-seen package order and
/// concatenating type lists in fragment order.
pub fn merge_packages<I>(fragments: I) -> ApiRoot
where
    I: IntoIterator<Item = Package>,
{
    let mut api = ApiRoot::new();
    for fragment in fragments {
        api.merge_package(fragment);
    }
    api
}

/// Lifts every nested type into the returned list, parents first.
///
/// Nested types are renamed `parent.name` (transitively, so `Outer.Inner.Innermost`)
/// and their constructors take the new name. No `NestedType` member survives.
pub fn flatten_types(types: Vec<JavaType>) -> Vec<JavaType> {
    let mut flat = Vec::with_capacity(types.len());
    for ty in types {
        flatten_into(ty, &mut flat);
    }
    flat
}

fn flatten_into(mut ty: JavaType, flat: &mut Vec<JavaType>) {
    let mut nested = Vec::new();
    let mut members = Vec::with_capacity(ty.members.len());
    for member in ty.members {
        match member {
            Member::NestedType(inner) => nested.push(*inner),
            other => members.push(other),
        }
    }
    ty.members = members;

    let parent = ty.name.clone();
    flat.push(ty);

    for mut inner in nested {
        inner.name = format!("{parent}.{}", inner.name);
        rename_constructors(&mut inner);
        flatten_into(inner, flat);
    }
}

fn rename_constructors(ty: &mut JavaType) {
    for member in &mut ty.members {
        if let Member::Constructor(constructor) = member {
            constructor.base.name = ty.name.clone();
        }
    }
}

/// Sets every constructor's enclosing type name to the package-qualified type name.
pub fn bind_constructors(package: &mut Package) {
    let qualified_names: Vec<String> = package
        .types
        .iter()
        .map(|ty| package.qualify(&ty.name))
        .collect();
    for (ty, qualified) in package.types.iter_mut().zip(qualified_names) {
        for member in &mut ty.members {
            if let Member::Constructor(constructor) = member {
                constructor.enclosing_type_name = qualified.clone();
            }
        }
    }
}

/// Orders packages and the types within each package by name (ordinal comparison).
pub fn sort_api(api: &mut ApiRoot) {
    api.packages.sort_by(|left, right| left.name.cmp(&right.name));
    for package in &mut api.packages {
        package.types.sort_by(|left, right| left.name.cmp(&right.name));
    }
}

/// Runs the whole pipeline over the per-file package fragments of one import.
pub fn normalize<I>(fragments: I) -> ApiRoot
where
    I: IntoIterator<Item = Package>,
{
    let mut api = merge_packages(fragments);
    for package in &mut api.packages {
        package.types = flatten_types(std::mem::take(&mut package.types));
        bind_constructors(package);
    }
    sort_api(&mut api);
    api
}
