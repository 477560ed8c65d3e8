//! A lazy WebAssembly binary module reader and writer.
//!
//! lasm decodes the Wasm binary format, including the standard `"name"`
//! custom section and the `"linking"`/`"reloc.*"` object-file sections,
//! without materializing the whole module up front. Sections are yielded
//! as undecoded frames and re-read on demand, so a disassembler, validator,
//! or linker can skip or stream. Malformed input never panics or aborts
//! the outer traversal: every diagnostic flows through a pluggable
//! [`ErrorSink`] with a byte offset and a nested trail of human-readable
//! locations.
//!
//! # Modules
//!
//! - [`read`] -- Decoders: primitives, entities, lazy sections, the module
//!   reader, and the custom-section readers.
//! - [`write`] -- Encoders: the symmetric output path.
//! - [`encoding`] -- Declarative wire tables shared by both.
//! - [`types`] -- Decoded entities; values borrow spans of the input.
//! - [`errors`] -- The sink trait, context guard, and bundled sinks.
//! - [`features`] -- Post-MVP proposal flags gating the tables.
//!
//! # Example
//!
//! Read a module's sections, then decode the type section's contents:
//!
//! ```
//! use lasm::read::lazy::read_type_section;
//! use lasm::{read_module, CollectingErrors, Features, Section};
//!
//! let bytes = b"\0asm\x01\0\0\0\x01\x04\x01\x60\x00\x00";
//! let features = Features::new();
//! let mut errors = CollectingErrors::new();
//!
//! let module = read_module(bytes, &features, &mut errors);
//! let sections: Vec<Section> = module.sections.collect();
//! assert_eq!(sections.len(), 1);
//!
//! let types = read_type_section(sections[0].data(), &features, &mut errors);
//! assert_eq!(types.count, Some(1));
//! assert_eq!(types.sequence.count(), 1);
//! assert!(errors.errors.is_empty());
//! ```

pub mod encoding;
pub mod errors;
pub mod features;
pub mod read;
pub mod span;
pub mod types;
pub mod write;

pub use crate::encoding::{
    Binding, BlockType, ComdatSymbolKind, ElementType, EventAttribute, ExternalKind,
    LinkingSubsectionId, Mutability, NameSubsectionId, Opcode, RelocationType, SectionId,
    SymbolInfoFlags, SymbolInfoKind, ValueType, Visibility,
};
pub use crate::errors::{
    CollectingErrors, DecodeError, ErrorFrame, ErrorSink, ErrorsContextGuard, NopErrors,
};
pub use crate::features::Features;
pub use crate::read::module::{read_module, Module, MAGIC, VERSION};
pub use crate::span::Span;
pub use crate::types::*;
