use serde::{Deserialize, Serialize};

/// Template delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Opens an output tag, `<%=` by default.
    pub open: String,
    /// Closes any tag, `%>` by default.
    pub close: String,
    /// Opens a comment tag, `<%#` by default.
    pub comment: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            open: "<%=".into(),
            close: "%>".into(),
            comment: "<%#".into(),
        }
    }
}

impl TemplateOptions {
    pub fn with_open(mut self, open: impl Into<String>) -> Self {
        self.open = open.into();
        self
    }

    pub fn with_close(mut self, close: impl Into<String>) -> Self {
        self.close = close.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}
