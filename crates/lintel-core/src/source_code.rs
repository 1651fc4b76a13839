//! Source text paired with its parsed AST

use crate::ast::Ast;
use crate::Result;

/// A parsed file: its source text plus the AST produced for it
#[derive(Debug)]
pub struct SourceCode {
    text: String,
    ast: Ast,
    line_starts: Vec<usize>,
}

impl SourceCode {
    pub fn new(text: impl Into<String>, ast: Ast) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self {
            text,
            ast,
            line_starts,
        }
    }

    /// Build from source text and the JSON emitted by an ESTree parser
    pub fn from_json_str(text: impl Into<String>, ast_json: &str) -> Result<Self> {
        Ok(Self::new(text, Ast::from_json_str(ast_json)?))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }

    /// 1-based line and column of a byte offset
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let column = offset - self.line_starts[line] + 1;
        (line + 1, column)
    }
}
