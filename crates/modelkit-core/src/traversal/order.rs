//! Inheritance-aware class ordering

use std::collections::HashMap;

use crate::errors::{ModelError, Result};
use crate::model::Class;
use crate::ops::store::{DomainModel, TypeEntry};

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Active,
    Done,
}

/// Every class of the model, parents before children
///
/// A reversed depth-first postorder over the child graph. The walk runs
/// in reverse creation order so the final, reversed result is
/// deterministic for a given construction sequence regardless of map
/// iteration order, and classes unrelated by inheritance keep their
/// relative creation order.
///
/// # Errors
///
/// Returns `CyclicGeneralization` if the generalization edges form a
/// cycle, or a lookup error if an edge references a missing class.
pub fn classes_sorted_by_inheritance<'a>(model: &'a DomainModel) -> Result<Vec<&'a Class>> {
    let mut classes: Vec<&Class> = model.types().filter_map(TypeEntry::as_class).collect();
    classes.sort_by_key(|class| std::cmp::Reverse(class.meta.order));

    let mut child_map: HashMap<&str, Vec<&Class>> = HashMap::new();
    for class in &classes {
        let mut children = Vec::new();
        for generalization_id in class.generalizations() {
            let edge = model.get_generalization(generalization_id)?;
            if edge.general() == class.meta.id {
                children.push(model.get_class(edge.specific())?);
            }
        }
        children.sort_by_key(|child| std::cmp::Reverse(child.meta.order));
        child_map.insert(class.meta.id.as_str(), children);
    }

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut postorder: Vec<&Class> = Vec::with_capacity(classes.len());
    for &class in &classes {
        visit(class, &child_map, &mut marks, &mut postorder)?;
    }
    postorder.reverse();
    Ok(postorder)
}

fn visit<'a>(
    class: &'a Class,
    child_map: &HashMap<&str, Vec<&'a Class>>,
    marks: &mut HashMap<&'a str, Mark>,
    postorder: &mut Vec<&'a Class>,
) -> Result<()> {
    match marks.get(class.meta.id.as_str()) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Active) => {
            return Err(ModelError::CyclicGeneralization {
                class: class.meta.name.clone(),
            })
        }
        None => {}
    }
    marks.insert(class.meta.id.as_str(), Mark::Active);
    if let Some(children) = child_map.get(class.meta.id.as_str()) {
        for &child in children {
            visit(child, child_map, marks, postorder)?;
        }
    }
    marks.insert(class.meta.id.as_str(), Mark::Done);
    postorder.push(class);
    Ok(())
}
