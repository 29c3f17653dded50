//! Remote mirror client for best-effort operation replication.
//!
//! Each queued operation is submitted as one independent document-creation
//! call against a configured collection endpoint. The mirror is an
//! eventually-consistent copy of the local history: there is no retry, no
//! acknowledgment wait, and no update or delete path for documents that were
//! already pushed.

use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::libs::operation::Operation;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Connection parameters for the remote document store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MirrorConfig {
    /// Base URL of the document store API.
    pub api_url: String,

    /// Bearer token sent with every request; may be empty for
    /// unauthenticated endpoints.
    #[serde(default)]
    pub auth_token: String,

    /// Collection the operation documents are created in.
    pub collection: String,
}

impl MirrorConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "mirror".to_string(),
            name: Message::ConfigModuleMirror.to_string(),
        }
    }

    pub fn init(current: &Option<MirrorConfig>) -> Result<Self> {
        let default = current.clone().unwrap_or(MirrorConfig {
            api_url: String::new(),
            auth_token: String::new(),
            collection: "operacoes".to_string(),
        });
        msg_print!(Message::ConfigModuleMirror);
        Ok(MirrorConfig {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMirrorApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
            auth_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMirrorAuthToken.to_string())
                .default(default.auth_token)
                .allow_empty(true)
                .interact_text()?,
            collection: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptMirrorCollection.to_string())
                .default(default.collection)
                .interact_text()?,
        })
    }
}

pub struct Mirror {
    client: Client,
    config: MirrorConfig,
}

impl Mirror {
    pub fn new(config: &MirrorConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// Creates one document for the operation. The caller decides what to do
    /// with a non-success status; this client never retries.
    pub async fn push(&self, operation: &Operation) -> Result<StatusCode> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), self.config.collection);
        let mut request = self.client.post(url).json(operation);
        if !self.config.auth_token.is_empty() {
            request = request.bearer_auth(&self.config.auth_token);
        }
        let response = request.send().await?;
        Ok(response.status())
    }
}
