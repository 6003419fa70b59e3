use anyhow::Result;
use std::thread;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::validation::MessageTemplates;
use crate::Config;

/// Start the LSP server
pub async fn serve(config: Config) -> Result<()> {
    // A broken translation file should not take the editor integration down
    let templates = config.message_templates().unwrap_or_else(|e| {
        log::warn!("Failed to load message templates: {:#}. Using defaults.", e);
        MessageTemplates::default()
    });

    // If running under the integration test, exit after a short delay so the test can read stdout to EOF.
    if std::env::var("MARKUP_GRADER_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    log::info!("starting markup-grader language server");

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config, templates)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
