use anyhow::{Result, anyhow};
use std::{fs, path::Path, sync::Arc};
use swc_common::{BytePos, FileName, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::error::PipelineError;

/// A parsed JSX/TSX file.
///
/// Keeps the original text next to the tree: the rewriter edits that text by
/// byte range instead of regenerating the whole file.
pub struct ParsedJSX {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source: Arc<str>,
    /// Position of the first byte of this file inside `source_map`.
    pub start_pos: BytePos,
}

impl ParsedJSX {
    /// Byte range of `span` relative to the start of `source`.
    pub fn range(&self, span: Span) -> (usize, usize) {
        (self.offset(span.lo), self.offset(span.hi))
    }

    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.start_pos.0) as usize
    }

    /// 1-based line of a position.
    pub fn line(&self, pos: BytePos) -> usize {
        self.source_map.lookup_char_pos(pos).line
    }
}

/// Parse JSX/TSX source code string into an AST.
///
/// Any syntax error, including ones the parser could recover from, fails the
/// parse: rewriting a file that does not parse cleanly is never safe.
pub fn parse_jsx_source(code: String, file_path: &str) -> Result<ParsedJSX> {
    use swc_common::GLOBALS;

    let source_map = Arc::new(SourceMap::default());
    let source: Arc<str> = Arc::from(code.as_str());

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!("line {}: {}", loc.line, e.kind().msg())
        })?;

        if let Some(e) = parser.take_errors().into_iter().next() {
            let loc = source_map.lookup_char_pos(e.span().lo);
            return Err(anyhow!("line {}: {}", loc.line, e.kind().msg()));
        }

        Ok(ParsedJSX {
            module,
            start_pos: source_file.start_pos,
            source_map: source_map.clone(),
            source,
        })
    })
}

/// Read and parse one source file, attributing failures to its path.
pub fn parse_file(path: &Path) -> Result<ParsedJSX, PipelineError> {
    let code = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    parse_jsx_source(code, &path.to_string_lossy()).map_err(|e| PipelineError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
