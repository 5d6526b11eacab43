//! Component tree types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A renderable component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum Component {
    Text { value: String },
    Link { text: String, reference: String },
    Graphviz { dot: String },
    Card(Card),
    FlexLayout(FlexLayout),
    Table(Table),
}

impl Component {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    pub fn link(text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            reference: reference.into(),
        }
    }

    pub fn graphviz(dot: impl Into<String>) -> Self {
        Self::Graphviz { dot: dot.into() }
    }
}

/// Titled card with a body and optional actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: Box<Component>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Card {
    /// New card with an empty text body
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Box::new(Component::text("")),
            actions: Vec::new(),
        }
    }

    pub fn set_body(&mut self, body: Component) {
        self.body = Box::new(body);
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }
}

/// A button that opens a form and posts it back as an action payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub title: String,
    pub form: Form,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormFieldKind {
    Text,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub kind: FormFieldKind,
    pub name: String,
    pub label: String,
    pub value: String,
}

impl FormField {
    /// Free text input; label and name are the same, value starts empty
    pub fn text(name: &str) -> Self {
        Self {
            kind: FormFieldKind::Text,
            name: name.to_string(),
            label: name.to_string(),
            value: String::new(),
        }
    }

    /// Fixed value sent with the form
    pub fn hidden(name: &str, value: &str) -> Self {
        Self {
            kind: FormFieldKind::Hidden,
            name: name.to_string(),
            label: String::new(),
            value: value.to_string(),
        }
    }
}

/// Relative width of a section member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Width {
    Full,
    Half,
}

/// Layout made of horizontal sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexLayout {
    pub title: String,
    pub sections: Vec<Section>,
}

impl FlexLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append an empty section and return it for filling
    pub fn add_section(&mut self) -> &mut Section {
        self.sections.push(Section::default());
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub members: Vec<SectionMember>,
}

impl Section {
    pub fn add(&mut self, view: Component, width: Width) {
        self.members.push(SectionMember { width, view });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMember {
    pub width: Width,
    pub view: Component,
}

/// A row keyed by column heading
pub type TableRow = BTreeMap<String, Component>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub title: String,
    /// Text shown when there are no rows
    pub placeholder: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            placeholder: String::new(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

/// Navigation entry shown in the host's side bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub title: String,
    pub path: String,
    pub icon_name: String,
}

/// Full page content for a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub title: String,
    pub components: Vec<Component>,
    pub icon_name: String,
    pub icon_source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_component_tagging() {
        let value = serde_json::to_value(Component::link("t1", "/traces/t1")).unwrap();
        assert_eq!(
            value,
            json!({ "type": "link", "config": { "text": "t1", "reference": "/traces/t1" } })
        );
    }

    #[test]
    fn test_card_defaults_to_empty_text() {
        let mut card = Card::new("Traces");
        assert_eq!(*card.body, Component::text(""));

        card.set_body(Component::graphviz("digraph {}"));
        assert_eq!(*card.body, Component::graphviz("digraph {}"));
    }

    #[test]
    fn test_layout_sections_are_appended() {
        let mut layout = FlexLayout::new("page");
        layout.add_section().add(Component::text("a"), Width::Full);
        layout.add_section().add(Component::text("b"), Width::Half);

        assert_eq!(layout.sections.len(), 2);
        assert_eq!(layout.sections[1].members[0].width, Width::Half);
    }

    #[test]
    fn test_hidden_field_serializes_type() {
        let value = serde_json::to_value(FormField::hidden("action", "x/y")).unwrap();
        assert_eq!(value["type"], "hidden");
        assert_eq!(value["value"], "x/y");
    }
}
