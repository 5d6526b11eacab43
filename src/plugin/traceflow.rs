//! The Traceflow plugin module

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{ActionPayload, PluginMetadata, PluginModule, SessionState, payload_string};
use crate::constants::*;
use crate::error::{TraceflowError, TraceflowResult};
use crate::models::{NewTraceRequest, TraceRow};
use crate::trace::{GraphSnapshot, TraceRequestManager};
use crate::view::{
    Action, Card, Component, ContentResponse, FlexLayout, Form, FormField, Navigation, Table,
    Width,
};

const PAGE_TITLE: &str = "Antrea Traceflow";
const GRAPH_CARD_TITLE: &str = "Antrea Traceflow Graph";
const TABLE_TITLE: &str = "Trace List";
const NAV_TITLE: &str = "Trace Flow";
const NAV_ICON: &str = "cloud";
const CONTENT_ICON: &str = "overview";

/// Plugin serving the trace request page and its two actions
#[derive(Clone)]
pub struct TraceflowPlugin {
    manager: TraceRequestManager,
}

impl TraceflowPlugin {
    pub fn new(manager: TraceRequestManager) -> Self {
        Self { manager }
    }

    async fn add_traceflow(&self, payload: &ActionPayload) -> TraceflowResult<()> {
        let request = NewTraceRequest::new(
            payload_string(payload, "name"),
            payload_string(payload, "fromNamespace"),
            payload_string(payload, "fromPod"),
            payload_string(payload, "toNamespace"),
            payload_string(payload, "toPod"),
        );
        self.manager.submit(request).await.map(|_| ())
    }

    async fn show_graph(
        &self,
        session: &mut SessionState,
        payload: &ActionPayload,
    ) -> TraceflowResult<()> {
        let name = payload_string(payload, "name");
        if name.trim().is_empty() {
            return Err(TraceflowError::empty_field("name"));
        }

        let request = self.manager.get_by_name(&name).await?;
        tracing::debug!("Generated graph for Traceflow {}", name);
        session.last_graph = Some(GraphSnapshot::for_request(&request));
        Ok(())
    }

    fn actions_card() -> Card {
        let add_form = Form {
            fields: vec![
                FormField::text("name"),
                FormField::text("fromNamespace"),
                FormField::text("fromPod"),
                FormField::text("toNamespace"),
                FormField::text("toPod"),
                FormField::hidden("action", ADD_TRACEFLOW_ACTION),
            ],
        };
        let graph_form = Form {
            fields: vec![
                FormField::text("name"),
                FormField::hidden("action", SHOW_GRAPH_ACTION),
            ],
        };

        let mut card = Card::new(PAGE_TITLE);
        card.add_action(Action {
            name: "Start New Trace".to_string(),
            title: "Start New Trace".to_string(),
            form: add_form,
        });
        card.add_action(Action {
            name: "Generate Trace Graph".to_string(),
            title: "Generate Trace Graph".to_string(),
            form: graph_form,
        });
        card
    }

    /// Build the trace table; a failed listing yields an empty table with the error shown
    async fn trace_table(&self) -> Table {
        let mut table = Table::new(TABLE_TITLE, &TRACE_TABLE_COLUMNS);

        match self.manager.rows().await {
            Ok(rows) => {
                table.placeholder = "No Traceflows found".to_string();
                for row in &rows {
                    table.add_row(table_row(row));
                }
            }
            Err(e) => {
                tracing::warn!("Rendering empty trace table: {}", e);
                table.placeholder = format!("Unable to list Traceflows: {}", e);
            }
        }

        table
    }
}

fn table_row(row: &TraceRow) -> BTreeMap<String, Component> {
    BTreeMap::from([
        (TRACE_NAME_COL.to_string(), Component::text(&row.name)),
        (
            SRC_NAMESPACE_COL.to_string(),
            Component::text(&row.source_namespace),
        ),
        (SRC_POD_COL.to_string(), Component::text(&row.source_pod)),
        (
            DST_NAMESPACE_COL.to_string(),
            Component::text(&row.destination_namespace),
        ),
        (DST_POD_COL.to_string(), Component::text(&row.destination_pod)),
        (
            DETAIL_COL.to_string(),
            Component::link(&row.detail.text, &row.detail.reference),
        ),
    ])
}

#[async_trait]
impl PluginModule for TraceflowPlugin {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: PLUGIN_NAME.to_string(),
            description: PLUGIN_DESCRIPTION.to_string(),
            action_names: vec![
                ADD_TRACEFLOW_ACTION.to_string(),
                SHOW_GRAPH_ACTION.to_string(),
            ],
            is_module: true,
        }
    }

    fn navigation(&self, base_path: &str) -> Navigation {
        Navigation {
            title: NAV_TITLE.to_string(),
            path: format!(
                "{}{}",
                base_path.trim_end_matches('/'),
                COMPONENTS_ROUTE
            ),
            icon_name: NAV_ICON.to_string(),
        }
    }

    fn routes(&self) -> Vec<String> {
        vec![COMPONENTS_ROUTE.to_string()]
    }

    async fn handle_action(
        &self,
        session: &mut SessionState,
        payload: &ActionPayload,
    ) -> TraceflowResult<()> {
        let action = payload_string(payload, "action");
        tracing::debug!("Handling action {:?}", action);

        match action.as_str() {
            "" => Err(TraceflowError::empty_field("action")),
            ADD_TRACEFLOW_ACTION => self.add_traceflow(payload).await,
            SHOW_GRAPH_ACTION => self.show_graph(session, payload).await,
            other => Err(TraceflowError::UnsupportedAction {
                plugin: PLUGIN_NAME.to_string(),
                action: other.to_string(),
            }),
        }
    }

    async fn content(
        &self,
        path: &str,
        session: &SessionState,
    ) -> TraceflowResult<ContentResponse> {
        let route = path.trim_end_matches('/');
        if route != COMPONENTS_ROUTE {
            return Err(TraceflowError::NotFound(format!("route {}", path)));
        }

        let mut layout = FlexLayout::new(PAGE_TITLE);
        let section = layout.add_section();
        section.add(Component::Card(Self::actions_card()), Width::Full);

        if let Some(graph) = &session.last_graph {
            let mut graph_card = Card::new(GRAPH_CARD_TITLE);
            graph_card.set_body(Component::graphviz(graph.to_dot()));
            section.add(Component::Card(graph_card), Width::Full);
        }

        let table = self.trace_table().await;

        Ok(ContentResponse {
            title: PAGE_TITLE.to_string(),
            components: vec![Component::FlexLayout(layout), Component::Table(table)],
            icon_name: CONTENT_ICON.to_string(),
            icon_source: CONTENT_ICON.to_string(),
        })
    }
}
