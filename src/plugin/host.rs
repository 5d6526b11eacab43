//! Host bridge
//!
//! Serves a [`PluginModule`] over newline-delimited JSON: one request object
//! per input line, one response object per output line. The loop ends when
//! the host closes the input.
//!
//! ```text
//! -> {"type":"register"}
//! <- {"type":"register","metadata":{...},"routes":["/components"]}
//! -> {"type":"action","sessionId":"s1","payload":{"action":"traceflowPlugin/addTf",...}}
//! <- {"type":"action"}
//! -> {"type":"content","sessionId":"s1","path":"/components"}
//! <- {"type":"content","content":{...}}
//! ```

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::{ActionPayload, PluginMetadata, PluginModule, SessionState};
use crate::view::{ContentResponse, Navigation};

/// A request from the host dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostRequest {
    Register,
    Navigation {
        base_path: String,
    },
    Action {
        session_id: String,
        payload: ActionPayload,
    },
    Content {
        session_id: String,
        path: String,
    },
    /// Drop whatever state the host session accumulated
    CloseSession {
        session_id: String,
    },
}

/// A reply to the host dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostResponse {
    Register {
        metadata: PluginMetadata,
        routes: Vec<String>,
    },
    Navigation {
        navigation: Navigation,
    },
    Action {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Content {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<ContentResponse>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    CloseSession,
    /// The request line could not be understood
    Error {
        error: String,
    },
}

/// Dispatches host requests to a plugin module, keeping per-session state
pub struct HostBridge<P: PluginModule> {
    plugin: P,
    sessions: HashMap<String, SessionState>,
}

impl<P: PluginModule> HostBridge<P> {
    pub fn new(plugin: P) -> Self {
        Self {
            plugin,
            sessions: HashMap::new(),
        }
    }

    /// Number of sessions currently holding state
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Handle a single request
    pub async fn handle(&mut self, request: HostRequest) -> HostResponse {
        match request {
            HostRequest::Register => HostResponse::Register {
                metadata: self.plugin.metadata(),
                routes: self.plugin.routes(),
            },
            HostRequest::Navigation { base_path } => HostResponse::Navigation {
                navigation: self.plugin.navigation(&base_path),
            },
            HostRequest::Action {
                session_id,
                payload,
            } => {
                // Work on a copy so sessions that never hold state are not tracked
                let mut session = self.sessions.get(&session_id).cloned().unwrap_or_default();
                let error = self
                    .plugin
                    .handle_action(&mut session, &payload)
                    .await
                    .err()
                    .map(|e| e.to_string());

                if session == SessionState::default() {
                    self.sessions.remove(&session_id);
                } else {
                    self.sessions.insert(session_id, session);
                }
                HostResponse::Action { error }
            }
            HostRequest::Content { session_id, path } => {
                let session = self.sessions.get(&session_id).cloned().unwrap_or_default();
                match self.plugin.content(&path, &session).await {
                    Ok(content) => HostResponse::Content {
                        content: Some(content),
                        error: None,
                    },
                    Err(e) => HostResponse::Content {
                        content: None,
                        error: Some(e.to_string()),
                    },
                }
            }
            HostRequest::CloseSession { session_id } => {
                self.sessions.remove(&session_id);
                HostResponse::CloseSession
            }
        }
    }

    /// Handle one raw request line
    pub async fn handle_line(&mut self, line: &str) -> HostResponse {
        match serde_json::from_str::<HostRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                tracing::warn!("Ignoring malformed host request: {}", e);
                HostResponse::Error {
                    error: format!("malformed request: {}", e),
                }
            }
        }
    }

    /// Serve requests until the reader reaches end of input
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read host request")?
        {
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line).await;
            let mut encoded =
                serde_json::to_vec(&response).context("Failed to encode host response")?;
            encoded.push(b'\n');
            writer
                .write_all(&encoded)
                .await
                .context("Failed to write host response")?;
            writer.flush().await.context("Failed to flush host response")?;
        }

        tracing::info!("Host closed the connection");
        Ok(())
    }
}
