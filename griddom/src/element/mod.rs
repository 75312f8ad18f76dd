mod content;
mod node;

pub use content::Content;
pub(crate) use node::generate_id;
pub use node::{Element, TEXT_TAG};

use crate::selector::Selector;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Chain of elements from `root` down to the element with `id`, both inclusive.
pub fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    let mut path = Vec::new();
    if collect_path(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn collect_path<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);
    if element.id == id {
        return true;
    }

    if let Content::Children(children) = &element.content {
        for child in children {
            if collect_path(child, id, path) {
                return true;
            }
        }
    }

    path.pop();
    false
}

/// All elements under `root` (inclusive) matching `selector`, in document order.
pub fn find_all<'a>(root: &'a Element, selector: &Selector) -> Vec<&'a Element> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    walk(root, selector, &mut path, &mut found, false);
    found
}

/// First element under `root` (inclusive) matching `selector`, in document order.
pub fn find_first<'a>(root: &'a Element, selector: &Selector) -> Option<&'a Element> {
    let mut found = Vec::new();
    let mut path = Vec::new();
    walk(root, selector, &mut path, &mut found, true);
    found.into_iter().next()
}

fn walk<'a>(
    element: &'a Element,
    selector: &Selector,
    path: &mut Vec<&'a Element>,
    found: &mut Vec<&'a Element>,
    first_only: bool,
) {
    path.push(element);

    if !element.is_text() && selector.matches(path) {
        found.push(element);
    }

    if let Content::Children(children) = &element.content {
        for child in children {
            if first_only && !found.is_empty() {
                break;
            }
            walk(child, selector, path, found, first_only);
        }
    }

    path.pop();
}
