use tower_lsp::lsp_types::Url;

/// State for each open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    pub language_id: String,
}

impl DocumentState {
    /// Only HTML documents get structural diagnostics
    pub fn is_html(&self, uri: &Url) -> bool {
        if self.language_id.eq_ignore_ascii_case("html") {
            return true;
        }
        let path = uri.path().to_ascii_lowercase();
        path.ends_with(".html") || path.ends_with(".htm")
    }
}
