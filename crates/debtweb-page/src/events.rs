//! Click targets for delegated event handling

use debtweb_core::render::DELETE_CLASS;
use debtweb_core::DeleteControl;
use std::collections::BTreeMap;

/// An element a click landed on, with its ancestor chain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementRef {
    pub tag: String,
    pub classes: Vec<String>,
    /// `data-*` attributes without the `data-` prefix
    pub dataset: BTreeMap<String, String>,
    pub parent: Option<Box<ElementRef>>,
}

impl ElementRef {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    pub fn within(mut self, parent: ElementRef) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// Nearest element, starting with this one, that has `class`
    pub fn closest(&self, class: &str) -> Option<&ElementRef> {
        let mut current = Some(self);
        while let Some(element) = current {
            if element.has_class(class) {
                return Some(element);
            }
            current = element.parent.as_deref();
        }
        None
    }
}

/// The delete button of a rendered row, nested in its cell and row
pub fn delete_button(control: &DeleteControl) -> ElementRef {
    let row = ElementRef::new("tr");
    let cell = ElementRef::new("td").within(row);
    ElementRef::new("button")
        .with_class("link-button")
        .with_class(DELETE_CLASS)
        .with_data("type", control.record_type.as_str())
        .with_data("id", control.id.clone())
        .within(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use debtweb_core::RecordType;

    #[test]
    fn test_closest_finds_self_or_ancestor() {
        let button = delete_button(&DeleteControl {
            record_type: RecordType::Payment,
            id: "4".to_string(),
        });
        assert_eq!(button.closest(DELETE_CLASS).unwrap().data("id"), Some("4"));

        let icon = ElementRef::new("span").within(button);
        let found = icon.closest(DELETE_CLASS).unwrap();
        assert_eq!(found.data("type"), Some("payment"));
    }

    #[test]
    fn test_closest_none_outside_control() {
        let cell = ElementRef::new("td").within(ElementRef::new("tr"));
        assert!(cell.closest(DELETE_CLASS).is_none());
    }
}
