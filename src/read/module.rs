//! Top-level module reader.

use crate::errors::{ErrorSink, ErrorsContextGuard};
use crate::features::Features;
use crate::span::Span;
use crate::types::Section;

use super::lazy::LazySequence;
use super::read_bytes;

/// The module preamble magic, `\0asm`.
pub const MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

/// The binary format version, little-endian 1.
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// A lazily-read module: the header spans plus a forward sequence of
/// section frames. Each section's payload is re-read on demand with the
/// appropriate section reader.
pub struct Module<'a, 'e> {
    pub magic: Option<Span<'a>>,
    pub version: Option<Span<'a>>,
    pub sections: LazySequence<'a, 'e, Section<'a>>,
}

fn format_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("\\{byte:02x}")).collect()
}

fn read_header_field<'a>(
    span: &mut Span<'a>,
    errors: &mut dyn ErrorSink,
    desc: &str,
    expected: &[u8; 4],
) -> Option<Span<'a>> {
    let mut errors = ErrorsContextGuard::new(errors, span.pos(), desc);
    let bytes = read_bytes(span, 4, &mut errors)?;
    if bytes.bytes() != expected {
        errors.on_error(
            span.pos(),
            &format!(
                "Mismatch: expected \"{}\", got \"{}\"",
                format_bytes(expected),
                format_bytes(bytes.bytes())
            ),
        );
    }
    Some(bytes)
}

/// Reads the magic and version, then hands the remainder to a lazy
/// sequence of sections.
///
/// Header mismatches are reported but do not stop section iteration, and
/// a corrupt section payload cannot desynchronize later sections: every
/// payload occupies exactly its declared size, so the outer cursor
/// resynchronizes at the next frame.
pub fn read_module<'a, 'e>(
    data: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> Module<'a, 'e> {
    let mut span = data.into();
    let magic = read_header_field(&mut span, &mut *errors, "magic", &MAGIC);
    let version = read_header_field(&mut span, &mut *errors, "version", &VERSION);
    Module {
        magic,
        version,
        sections: LazySequence::new(span, features, errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectingErrors;

    #[test]
    fn test_read_module_header() {
        let mut errors = CollectingErrors::new();
        let features = Features::new();
        let module = read_module(b"\0asm\x01\0\0\0", &features, &mut errors);
        assert_eq!(module.magic, Some(Span::new(b"\0asm")));
        assert_eq!(module.version, Some(Span::new(&[1, 0, 0, 0])));
        let sections: Vec<Section> = module.sections.collect();
        assert!(sections.is_empty());
        assert!(errors.errors.is_empty());
        assert_eq!(errors.open_contexts(), 0);
    }

    #[test]
    fn test_read_module_bad_magic() {
        let mut errors = CollectingErrors::new();
        let features = Features::new();
        let module = read_module(b"wasm\x01\0\0\0", &features, &mut errors);
        drop(module);
        assert_eq!(
            errors.errors[0].trail(),
            vec![
                (0, "magic".to_string()),
                (
                    4,
                    "Mismatch: expected \"\\00\\61\\73\\6d\", got \"\\77\\61\\73\\6d\"".to_string()
                ),
            ]
        );
    }
}
