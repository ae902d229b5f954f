use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for cogen operations (boxed to keep `Result` small on the stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source text of a rules file or target tree, kept for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a rules parse error from a toml error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ParseRules {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a serde_json error.
    ///
    /// `what` names the document being parsed ("rules", "target tree").
    pub fn json_error(&self, what: &'static str, source: serde_json::Error) -> Box<Error> {
        let span = self
            .offset_of(source.line(), source.column())
            .map(|offset| SourceSpan::from(offset..offset));
        Box::new(Error::ParseJson {
            what,
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Convert serde_json's 1-based line/column into a byte offset.
    fn offset_of(&self, line: usize, column: usize) -> Option<usize> {
        if line == 0 {
            return None;
        }
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(line - 1)
            .map(str::len)
            .sum();
        Some((line_start + column.saturating_sub(1)).min(self.src.len()))
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Dispatch found no transformer for a target's kind.
    #[error("unresolved transformer type \"{kind}\"")]
    #[diagnostic(
        code(cogen::unresolved_transformer),
        help("install the plugin that provides \"{kind}\" before rendering, or fix the target's kind")
    )]
    UnresolvedTransformer { kind: String },

    #[error("failed to parse rules")]
    #[diagnostic(code(cogen::rules_parse_error))]
    ParseRules {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse {what}")]
    #[diagnostic(code(cogen::json_parse_error))]
    ParseJson {
        what: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    /// Failure raised by a plugin's own validation.
    #[error("{0}")]
    #[diagnostic(code(cogen::plugin_error))]
    Plugin(eyre::Report),
}

impl Error {
    /// Create an unresolved transformer error.
    pub fn unresolved(kind: impl Into<String>) -> Box<Self> {
        Box::new(Self::UnresolvedTransformer { kind: kind.into() })
    }

    /// Wrap a plugin-level failure.
    pub fn plugin(report: eyre::Report) -> Box<Self> {
        Box::new(Self::Plugin(report))
    }

    /// The kind that failed to resolve, if this is a dispatch failure.
    pub fn unresolved_kind(&self) -> Option<&str> {
        match self {
            Self::UnresolvedTransformer { kind } => Some(kind),
            _ => None,
        }
    }
}

impl From<eyre::Report> for Box<Error> {
    fn from(report: eyre::Report) -> Self {
        Error::plugin(report)
    }
}
