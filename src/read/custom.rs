//! Decoders for the "name", "linking", and "reloc.*" custom sections.
//!
//! Each custom section is a sequence of id/size framed subsections; the
//! frames decode lazily and each payload has its own reader. The linking
//! and relocation formats follow the tool conventions, version 2.

use crate::encoding::{
    ComdatSymbolKind, LinkingSubsectionId, NameSubsectionId, RelocationType, SymbolInfoFlags,
    SymbolInfoKind,
};
use crate::errors::{ErrorSink, ErrorsContextGuard};
use crate::features::Features;
use crate::span::Span;
use crate::types::{
    Comdat, ComdatSymbol, DefinedData, IndirectNameAssoc, InitFunction, LinkingSubsection,
    NameAssoc, NameSubsection, RelocationEntry, SegmentInfo, SymbolInfo, SymbolInfoDesc,
};

use super::entity::read_one_byte_enum;
use super::lazy::{LazySection, LazySequence};
use super::{
    backtrack, read_bytes, read_index, read_length, read_string, read_u32, read_u8, read_var_s32,
    read_var_u32, read_vector, Read,
};

/// The tool-conventions version this reader targets.
pub const LINKING_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// "name" section
// ---------------------------------------------------------------------------

pub type LazyNameSection<'a, 'e> = LazySequence<'a, 'e, NameSubsection<'a>>;

/// Reads the payload of a `"name"` custom section as a lazy sequence of
/// subsection frames.
pub fn read_name_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyNameSection<'a, 'e> {
    LazySequence::new(span.into(), features, errors)
}

pub fn read_name_subsection<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<NameSubsection<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "name subsection");
        let byte = read_u8(span, &mut errors)?;
        let id = match NameSubsectionId::decode(byte, features) {
            Some(id) => id,
            None => {
                errors.on_error(span.pos(), &format!("Unknown name subsection id: {byte}"));
                return None;
            }
        };
        let length = read_length(span, &mut errors)?;
        let data = read_bytes(span, length as usize, &mut errors)?;
        Some(NameSubsection { id, data })
    })
}

impl<'a> Read<'a> for NameSubsection<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_name_subsection(span, features, errors)
    }
}

/// Reads the payload of the module-name subsection (id 0).
pub fn read_module_name_subsection<'a>(
    span: impl Into<Span<'a>>,
    errors: &mut dyn ErrorSink,
) -> Option<&'a [u8]> {
    let mut span = span.into();
    read_string(&mut span, errors, "module name")
}

pub fn read_name_assoc<'a>(
    span: &mut Span<'a>,
    _features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<NameAssoc<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "name assoc");
        let index = read_index(span, &mut errors)?;
        let name = read_string(span, &mut errors, "name")?;
        Some(NameAssoc { index, name })
    })
}

impl<'a> Read<'a> for NameAssoc<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_name_assoc(span, features, errors)
    }
}

pub fn read_indirect_name_assoc<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<IndirectNameAssoc<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "indirect name assoc");
        let index = read_index(span, &mut errors)?;
        let name_map = read_vector(span, features, &mut errors, "name map", read_name_assoc)?;
        Some(IndirectNameAssoc { index, name_map })
    })
}

impl<'a> Read<'a> for IndirectNameAssoc<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_indirect_name_assoc(span, features, errors)
    }
}

pub type LazyNameMapSubsection<'a, 'e> = LazySection<'a, 'e, NameAssoc<'a>>;
pub type LazyIndirectNameMapSubsection<'a, 'e> = LazySection<'a, 'e, IndirectNameAssoc<'a>>;

/// Reads a name-map subsection payload (function, label, type, table,
/// memory, global, and segment names all share this shape).
pub fn read_name_map_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyNameMapSubsection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

/// Reads the function-names subsection payload (id 1).
pub fn read_function_names_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyNameMapSubsection<'a, 'e> {
    read_name_map_subsection(span, features, errors)
}

/// Reads the local-names subsection payload (id 2): a name map per
/// function.
pub fn read_local_names_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyIndirectNameMapSubsection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

// ---------------------------------------------------------------------------
// "linking" section
// ---------------------------------------------------------------------------

/// The decoded frame of a `"linking"` custom section: its version word
/// and a lazy sequence of subsections.
pub struct LinkingSection<'a, 'e> {
    pub version: Option<u32>,
    pub subsections: LazySequence<'a, 'e, LinkingSubsection<'a>>,
}

/// Reads the payload of a `"linking"` custom section. A version other
/// than 2 is reported but does not abort the read.
pub fn read_linking_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LinkingSection<'a, 'e> {
    let mut span = span.into();
    let version = read_u32(&mut span, &mut *errors);
    if let Some(version) = version {
        if version != LINKING_VERSION {
            errors.on_error(
                span.pos(),
                &format!("Expected linking section version: {LINKING_VERSION}, got {version}"),
            );
        }
    }
    LinkingSection {
        version,
        subsections: LazySequence::new(span, features, errors),
    }
}

pub fn read_linking_subsection<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<LinkingSubsection<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "linking subsection");
        let byte = read_u8(span, &mut errors)?;
        let id = match LinkingSubsectionId::decode(byte, features) {
            Some(id) => id,
            None => {
                errors.on_error(span.pos(), &format!("Unknown linking subsection id: {byte}"));
                return None;
            }
        };
        let length = read_length(span, &mut errors)?;
        let data = read_bytes(span, length as usize, &mut errors)?;
        Some(LinkingSubsection { id, data })
    })
}

impl<'a> Read<'a> for LinkingSubsection<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_linking_subsection(span, features, errors)
    }
}

pub fn read_segment_info<'a>(
    span: &mut Span<'a>,
    _features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<SegmentInfo<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "segment info");
        let name = read_string(span, &mut errors, "name")?;
        let align_log2 = read_var_u32(span, &mut errors, "align log2")?;
        let flags = read_var_u32(span, &mut errors, "flags")?;
        Some(SegmentInfo {
            name,
            align_log2,
            flags,
        })
    })
}

impl<'a> Read<'a> for SegmentInfo<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_segment_info(span, features, errors)
    }
}

pub fn read_init_function(
    span: &mut Span<'_>,
    _features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<InitFunction> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "init function");
        let priority = read_var_u32(span, &mut errors, "priority")?;
        let index = read_index(span, &mut errors)?;
        Some(InitFunction { priority, index })
    })
}

impl<'a> Read<'a> for InitFunction {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_init_function(span, features, errors)
    }
}

pub fn read_comdat_symbol(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ComdatSymbol> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "comdat symbol");
        let kind = read_one_byte_enum(
            span,
            features,
            &mut errors,
            "comdat symbol kind",
            ComdatSymbolKind::decode,
        )?;
        let index = read_index(span, &mut errors)?;
        Some(ComdatSymbol { kind, index })
    })
}

pub fn read_comdat<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Comdat<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "comdat");
        let name = read_string(span, &mut errors, "name")?;
        let flags = read_var_u32(span, &mut errors, "flags")?;
        let symbols = read_vector(span, features, &mut errors, "symbols", read_comdat_symbol)?;
        Some(Comdat {
            name,
            flags,
            symbols,
        })
    })
}

impl<'a> Read<'a> for Comdat<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_comdat(span, features, errors)
    }
}

pub fn read_symbol_info<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<SymbolInfo<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "symbol info");
        let kind = read_one_byte_enum(
            span,
            features,
            &mut errors,
            "symbol info kind",
            SymbolInfoKind::decode,
        )?;
        let raw_flags = read_var_u32(span, &mut errors, "flags")?;
        let flags = match SymbolInfoFlags::decode(raw_flags) {
            Some(flags) => flags,
            None => {
                errors.on_error(span.pos(), &format!("Unknown symbol info flags: {raw_flags}"));
                return None;
            }
        };
        let desc = match kind {
            SymbolInfoKind::Function | SymbolInfoKind::Global | SymbolInfoKind::Event => {
                let index = read_index(span, &mut errors)?;
                let name = if flags.has_name() {
                    Some(read_string(span, &mut errors, "name")?)
                } else {
                    None
                };
                SymbolInfoDesc::Base { kind, index, name }
            }
            SymbolInfoKind::Data => {
                let name = read_string(span, &mut errors, "name")?;
                let defined = if flags.undefined {
                    None
                } else {
                    let index = read_index(span, &mut errors)?;
                    let offset = read_var_u32(span, &mut errors, "offset")?;
                    let size = read_var_u32(span, &mut errors, "size")?;
                    Some(DefinedData {
                        index,
                        offset,
                        size,
                    })
                };
                SymbolInfoDesc::Data { name, defined }
            }
            SymbolInfoKind::Section => {
                let section = {
                    let mut errors =
                        ErrorsContextGuard::new(&mut errors, span.pos(), "section index");
                    read_index(span, &mut errors)?
                };
                SymbolInfoDesc::Section { section }
            }
        };
        Some(SymbolInfo { flags, desc })
    })
}

impl<'a> Read<'a> for SymbolInfo<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_symbol_info(span, features, errors)
    }
}

pub type LazySegmentInfoSubsection<'a, 'e> = LazySection<'a, 'e, SegmentInfo<'a>>;
pub type LazyInitFunctionsSubsection<'a, 'e> = LazySection<'a, 'e, InitFunction>;
pub type LazyComdatSubsection<'a, 'e> = LazySection<'a, 'e, Comdat<'a>>;
pub type LazySymbolTableSubsection<'a, 'e> = LazySection<'a, 'e, SymbolInfo<'a>>;

pub fn read_segment_info_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazySegmentInfoSubsection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_init_functions_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyInitFunctionsSubsection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_comdat_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyComdatSubsection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_symbol_table_subsection<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazySymbolTableSubsection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

// ---------------------------------------------------------------------------
// "reloc.*" sections
// ---------------------------------------------------------------------------

/// The decoded frame of a `"reloc.*"` custom section: the index of the
/// section the relocations target, then the counted entries.
pub struct RelocationSection<'a, 'e> {
    pub section_index: Option<u32>,
    pub entries: LazySection<'a, 'e, RelocationEntry>,
}

pub fn read_relocation_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> RelocationSection<'a, 'e> {
    let mut span = span.into();
    let section_index = {
        let mut errors = ErrorsContextGuard::new(&mut *errors, span.pos(), "section index");
        read_index(&mut span, &mut errors)
    };
    RelocationSection {
        section_index,
        entries: LazySection::new(span, features, errors),
    }
}

pub fn read_relocation_entry(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<RelocationEntry> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "relocation entry");
        let reloc_type = read_one_byte_enum(
            span,
            features,
            &mut errors,
            "relocation type",
            RelocationType::decode,
        )?;
        let offset = read_var_u32(span, &mut errors, "offset")?;
        let index = read_index(span, &mut errors)?;
        let addend = if reloc_type.has_addend() {
            Some(read_var_s32(span, &mut errors, "addend")?)
        } else {
            None
        };
        Some(RelocationEntry {
            reloc_type,
            offset,
            index,
            addend,
        })
    })
}

impl<'a> Read<'a> for RelocationEntry {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_relocation_entry(span, features, errors)
    }
}
