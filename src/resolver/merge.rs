//! Duplicate import merging and cross-list reference reconciliation.
//!
//! Recursive resolution discovers the same repository many times, once for
//! every nested import path that folds onto it. Before a lock file can be
//! built each list must be keyed by name again.

use std::collections::HashMap;

use crate::manifest::Import;

/// Merge imports that share a name, in place.
///
/// The first occurrence of each name keeps its position. Every later
/// occurrence contributes its subpackages (those not already listed, in
/// order) and, when non-empty, its reference, which replaces the earlier one.
/// Later occurrences are then dropped.
///
/// Names are compared exactly; `Foo` and `foo` are distinct dependencies.
///
/// Returns the number of entries removed.
pub fn dedupe_imports(imports: &mut Vec<Import>) -> usize {
    let original = std::mem::take(imports);
    let before = original.len();
    let mut index_by_name: HashMap<String, usize> = HashMap::with_capacity(before);

    for import in original {
        let existing = index_by_name.get(&import.name).copied();
        match existing {
            Some(index) => {
                let kept = &mut imports[index];
                for sub in import.subpackages {
                    kept.add_subpackage(sub);
                }
                if let Some(reference) = import.reference.filter(|r| !r.is_empty()) {
                    tracing::debug!(
                        target: "resolver",
                        "Merging duplicate '{}': reference {:?} -> {}",
                        kept.name,
                        kept.reference,
                        reference
                    );
                    kept.reference = Some(reference);
                }
            }
            None => {
                index_by_name.insert(import.name.clone(), imports.len());
                imports.push(import);
            }
        }
    }

    before - imports.len()
}

/// Share resolved references between primary and development imports.
///
/// For each primary import the first development import with the same name
/// is examined, and the search stops there. When both declare the same pin
/// and exactly one of them has a non-empty reference, that reference is
/// copied to the other.
pub fn reconcile_references(imports: &mut [Import], dev_imports: &mut [Import]) {
    for import in imports.iter_mut() {
        let Some(dev) = dev_imports.iter_mut().find(|d| d.name == import.name) else {
            continue;
        };
        if import.pin != dev.pin {
            continue;
        }

        match (import.has_reference(), dev.has_reference()) {
            (true, false) => dev.reference = import.reference.clone(),
            (false, true) => import.reference = dev.reference.clone(),
            _ => {}
        }
    }
}
