use std::fmt;

pub const MIME_JAVASCRIPT: &str = "text/javascript";
pub const MIME_CSS: &str = "text/css";

/// The resolved form of a descriptor's `ContentType` alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    JavaScript,
    Css,
    Other(String),
}

/// How comments are written for a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// text`
    Line,
    /// `/* text */`
    Block,
}

impl ContentType {
    pub fn from_alias(alias: &str) -> Self {
        match alias.trim() {
            "js" | "javascript" | MIME_JAVASCRIPT => ContentType::JavaScript,
            "css" | "stylesheet" | MIME_CSS => ContentType::Css,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// The full MIME string as an HTTP response would carry it.
    pub fn mime(&self) -> &str {
        match self {
            ContentType::JavaScript => MIME_JAVASCRIPT,
            ContentType::Css => MIME_CSS,
            ContentType::Other(mime) => mime,
        }
    }

    // CSS has no line comments, and for unknown types a block comment is the
    // least likely to break the artifact.
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            ContentType::JavaScript => CommentStyle::Line,
            ContentType::Css | ContentType::Other(_) => CommentStyle::Block,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_full_types() {
        assert_eq!(ContentType::from_alias("js").mime(), "text/javascript");
        assert_eq!(ContentType::from_alias("javascript").mime(), "text/javascript");
        assert_eq!(ContentType::from_alias("css").mime(), "text/css");
        assert_eq!(ContentType::from_alias("stylesheet").mime(), "text/css");
        assert_eq!(ContentType::from_alias("text/css"), ContentType::Css);
    }

    #[test]
    fn unknown_types_pass_through() {
        let ct = ContentType::from_alias("application/json");
        assert_eq!(ct, ContentType::Other("application/json".to_string()));
        assert_eq!(ct.to_string(), "application/json");
        assert_eq!(ct.comment_style(), CommentStyle::Block);
    }
}
