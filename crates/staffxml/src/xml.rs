//! Minimal XML layer: element model, parser and indenting writer

pub mod cursor;
pub mod model;
pub mod parser;
pub mod writer;

pub use model::{Content, Document, Element};
pub use parser::Parser;
pub use writer::Writer;
