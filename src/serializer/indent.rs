//! In-place indentation for backends without pretty printing
//!
//! Only empty or whitespace-only `text`/`tail` values are replaced, so
//! character data in mixed content survives. Running the pass twice leaves
//! the tree unchanged.

use crate::documents::Element;

/// Indent a tree rooted at `root`, `width` spaces per level
pub fn indent_tree(root: &mut Element, width: usize) {
    indent(root, 0, width);
}

fn indent(elem: &mut Element, level: usize, width: usize) {
    let newline = line_break(level, width);
    if !elem.children.is_empty() {
        if is_blank(&elem.text) {
            elem.text = Some(line_break(level + 1, width));
        }
        if level > 0 && is_blank(&elem.tail) {
            elem.tail = Some(newline.clone());
        }
        for child in elem.children.iter_mut() {
            indent(child, level + 1, width);
        }
        // The last child closes back to this element's depth.
        if let Some(last) = elem.children.last_mut() {
            if is_blank(&last.tail) {
                last.tail = Some(newline);
            }
        }
    } else if level > 0 && is_blank(&elem.tail) {
        elem.tail = Some(newline);
    }
}

fn line_break(level: usize, width: usize) -> String {
    format!("\n{}", " ".repeat(level * width))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Element {
        let mut root = Element::new("root");
        let mut a = Element::new("a");
        a.append(Element::new("b"));
        root.append(a);
        root.append(Element::new("c"));
        root
    }

    #[test]
    fn test_indent_nested() {
        let mut root = tree();
        indent_tree(&mut root, 2);

        assert_eq!(root.text.as_deref(), Some("\n  "));
        assert_eq!(root.tail, None);
        let a = &root.children[0];
        assert_eq!(a.text.as_deref(), Some("\n    "));
        assert_eq!(a.tail.as_deref(), Some("\n  "));
        assert_eq!(a.children[0].tail.as_deref(), Some("\n  "));
        assert_eq!(root.children[1].tail.as_deref(), Some("\n"));
    }

    #[test]
    fn test_indent_keeps_character_data() {
        let mut root = Element::new("root");
        root.text = Some("hello".to_string());
        let mut child = Element::new("b");
        child.tail = Some("world".to_string());
        root.append(child);

        indent_tree(&mut root, 2);
        assert_eq!(root.text.as_deref(), Some("hello"));
        assert_eq!(root.children[0].tail.as_deref(), Some("world"));
    }

    #[test]
    fn test_indent_leaf_root_untouched() {
        let mut root = Element::new("root");
        indent_tree(&mut root, 2);
        assert_eq!(root, Element::new("root"));
    }

    #[test]
    fn test_indent_is_idempotent() {
        let mut once = tree();
        indent_tree(&mut once, 2);
        let mut twice = once.clone();
        indent_tree(&mut twice, 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_indent_replaces_stale_whitespace() {
        let mut root = tree();
        root.text = Some("\n\t\t".to_string());
        indent_tree(&mut root, 4);
        assert_eq!(root.text.as_deref(), Some("\n    "));
    }
}
