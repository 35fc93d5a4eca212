//! Type resolution: rewrites partial type references to qualified names.
//!
//! Message definitions refer to nested types by short names (`Point`,
//! `Header`) or package-qualified names (`geometry_msgs/Point`), while the
//! component table is keyed by the names given in `MSG:` directives.
//!
//! # Lookup strategy
//!
//! 1. **Exact match** on a table key.
//! 2. **Same package** - a bare `Name` inside `pkg/Outer` tries `pkg/Name`.
//! 3. **Header** - a bare `Header` tries `std_msgs/Header`.
//! 4. **Segment suffix** - a unique key whose `/`-separated segments end
//!    with the reference's segments (`Point` → `geometry_msgs/Point`).
//! 5. **Substring** - a unique key containing the reference.
//!
//! A step that finds several candidates stops the search and the reference
//! is reported as ambiguous. Unresolved references stay as written and are
//! recorded in [`ComponentTable::unresolved`].

use msgintro_core::PrimitiveKind;

use crate::{
    lex::split_qual,
    table::{ComponentTable, UnresolvedRef},
};

/// Outcome of resolving one type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Ambiguous(Vec<String>),
    Missing,
}

/// Resolve `reference` as written inside the component `enclosing`.
pub fn resolve_type_name(table: &ComponentTable, enclosing: &str, reference: &str) -> Resolution {
    if table.contains(reference) {
        return Resolution::Resolved(reference.to_string());
    }

    if !reference.contains('/')
        && let Some((package, _)) = enclosing.rsplit_once('/')
    {
        let candidate = format!("{package}/{reference}");
        if table.contains(&candidate) {
            return Resolution::Resolved(candidate);
        }
    }

    if reference == "Header" && table.contains("std_msgs/Header") {
        return Resolution::Resolved("std_msgs/Header".to_string());
    }

    let wanted = split_qual(reference);
    let by_suffix: Vec<&str> = table
        .type_names()
        .filter(|key| {
            let segments = split_qual(key);
            !wanted.is_empty()
                && segments.len() >= wanted.len()
                && segments[segments.len() - wanted.len()..] == wanted[..]
        })
        .collect();
    if let Some(resolution) = pick_unique(by_suffix) {
        return resolution;
    }

    let by_substring: Vec<&str> = table
        .type_names()
        .filter(|key| key.contains(reference))
        .collect();
    pick_unique(by_substring).unwrap_or(Resolution::Missing)
}

fn pick_unique(candidates: Vec<&str>) -> Option<Resolution> {
    match candidates.as_slice() {
        [] => None,
        [only] => Some(Resolution::Resolved(only.to_string())),
        many => Some(Resolution::Ambiguous(
            many.iter().map(|s| s.to_string()).collect(),
        )),
    }
}

/// Rewrite every non-primitive field type in `table` to its qualified name.
pub fn resolve_references(table: &mut ComponentTable) {
    let mut rewrites = Vec::new();
    let mut unresolved = Vec::new();

    for (component, comp) in table.iter() {
        for (idx, field) in comp.fields.iter().enumerate() {
            if PrimitiveKind::is_primitive_name(&field.type_name) {
                continue;
            }
            match resolve_type_name(table, component, &field.type_name) {
                Resolution::Resolved(name) => {
                    if name != field.type_name {
                        rewrites.push((component.to_string(), idx, name));
                    }
                }
                Resolution::Ambiguous(candidates) => {
                    log::warn!(
                        "ambiguous type '{}' for field '{}' in '{}': {}",
                        field.type_name,
                        field.name,
                        component,
                        candidates.join(", ")
                    );
                    unresolved.push(UnresolvedRef {
                        component: component.to_string(),
                        field: field.name.clone(),
                        type_name: field.type_name.clone(),
                        candidates,
                    });
                }
                Resolution::Missing => {
                    log::warn!(
                        "unresolved type '{}' for field '{}' in '{}'",
                        field.type_name,
                        field.name,
                        component
                    );
                    unresolved.push(UnresolvedRef {
                        component: component.to_string(),
                        field: field.name.clone(),
                        type_name: field.type_name.clone(),
                        candidates: Vec::new(),
                    });
                }
            }
        }
    }

    for (owner, idx, name) in rewrites {
        table.component_mut(&owner).fields[idx].type_name = name;
    }
    table.set_unresolved(unresolved);
}
