//! Serializable view components
//!
//! The host dashboard draws these; this crate only builds the tree.

mod component;

pub use component::{
    Action, Card, Component, ContentResponse, FlexLayout, Form, FormField, FormFieldKind,
    Navigation, Section, SectionMember, Table, TableRow, Width,
};
