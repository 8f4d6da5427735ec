//! The registration surface handed to a host: languages, parsers, printers

use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::FormatEngine;
use crate::language::{self, LanguageDescriptor};
use crate::parser::{self, AST_FORMAT, ParserSpec};
use crate::printer::Printer;

/// Everything a host needs to route Prisma files through this formatter
#[derive(Debug, Clone)]
pub struct Plugin {
    printers: HashMap<&'static str, Printer>,
}

impl Plugin {
    /// Bundle the static registry with a printer backed by `engine`
    pub fn new(engine: Arc<dyn FormatEngine>) -> Self {
        let mut printers = HashMap::new();
        printers.insert(AST_FORMAT, Printer::new(engine));
        Self { printers }
    }

    pub fn languages(&self) -> &'static [LanguageDescriptor] {
        language::languages()
    }

    pub fn parser(&self, name: &str) -> Option<&'static ParserSpec> {
        parser::find_parser(name)
    }

    /// Printer for the given AST format tag
    pub fn printer(&self, ast_format: &str) -> Option<&Printer> {
        self.printers.get(ast_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn identity() -> Arc<dyn FormatEngine> {
        Arc::new(|text: &str, _: &str| -> Result<String, EngineError> { Ok(text.to_owned()) })
    }

    #[test]
    fn parser_output_routes_to_a_printer() {
        let plugin = Plugin::new(identity());
        for lang in plugin.languages() {
            for name in lang.parsers {
                let spec = plugin.parser(name).unwrap();
                assert!(plugin.printer(spec.ast_format).is_some());
            }
        }
    }

    #[test]
    fn unknown_ast_format_has_no_printer() {
        let plugin = Plugin::new(identity());
        assert!(plugin.printer("estree").is_none());
    }
}
