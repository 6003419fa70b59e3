use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::lsp::document::DocumentState;
use crate::lsp::handlers::HandleDiagnostics;
use crate::validation::MessageTemplates;
use crate::Config;

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub templates: Arc<MessageTemplates>,
    pub config: Config,
}

impl Backend {
    pub fn new(client: Client, config: Config, templates: MessageTemplates) -> Self {
        Self {
            client,
            documents: Arc::new(Mutex::new(HashMap::new())),
            templates: Arc::new(templates),
            config,
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "markup-grader".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "markup-grader initialized")
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let doc_state = DocumentState {
            content: params.text_document.text,
            language_id: params.text_document.language_id,
        };

        let mut docs = self.documents.lock().await;
        docs.insert(uri.clone(), doc_state);
        drop(docs); // Release the lock before calling publish_diagnostics

        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            let language_id = docs
                .get(&uri)
                .map(|state| state.language_id.clone())
                .unwrap_or_default();
            docs.insert(
                uri.clone(),
                DocumentState {
                    content: change.text,
                    language_id,
                },
            );
            drop(docs);

            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.lock().await.remove(&uri);
        self.clear_diagnostics(uri).await;
    }
}
