//! Decoders for the module-level entities.
//!
//! Each decoder pushes a short context description at entry, composes the
//! primitive readers, and returns `None` on the first sub-failure without
//! emitting a second diagnostic for the same fault.

use crate::encoding::{
    ElementType, EventAttribute, ExternalKind, Mutability, SectionId, ValueType,
};
use crate::errors::{ErrorSink, ErrorsContextGuard};
use crate::features::Features;
use crate::span::Span;
use crate::types::{
    Code, CustomSection, DataCount, DataSegment, ElementSegment, Event, EventType, Export,
    Function, FunctionType, Global, GlobalType, Import, ImportDesc, KnownSection, Limits, Locals,
    Memory, MemoryType, Section, Shared, Start, Table, TableType, TypeEntry,
};

use super::instr::{read_constant_expression, read_element_expression, read_expression};
use super::{
    backtrack, read_bytes, read_index, read_length, read_string, read_u32, read_u8, read_var_u32,
    read_vector, Read,
};

pub(super) fn read_one_byte_enum<T>(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
    desc: &str,
    decode: fn(u8, &Features) -> Option<T>,
) -> Option<T> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), desc);
        let byte = read_u8(span, &mut errors)?;
        match decode(byte, features) {
            Some(value) => Some(value),
            None => {
                errors.on_error(span.pos(), &format!("Unknown {desc}: {byte}"));
                None
            }
        }
    })
}

/// Reads a one-byte value type. Overlong encodings are rejected; the
/// excess byte stays in the cursor.
pub fn read_value_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ValueType> {
    read_one_byte_enum(span, features, errors, "value type", ValueType::decode)
}

pub fn read_element_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ElementType> {
    read_one_byte_enum(span, features, errors, "element type", ElementType::decode)
}

pub fn read_external_kind(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ExternalKind> {
    read_one_byte_enum(span, features, errors, "external kind", ExternalKind::decode)
}

pub fn read_mutability(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Mutability> {
    read_one_byte_enum(span, features, errors, "mutability", Mutability::decode)
}

/// Reads table or memory limits. The flags value selects between min-only,
/// min+max, and (with threads) the shared variants.
pub fn read_limits(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Limits> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "limits");
        let flags = read_var_u32(span, &mut errors, "flags")?;
        let (has_max, shared) = match flags {
            0 => (false, Shared::No),
            1 => (true, Shared::No),
            2 if features.threads => (true, Shared::Yes),
            3 if features.threads => (false, Shared::Yes),
            _ => {
                errors.on_error(span.pos(), &format!("Invalid flags value: {flags}"));
                return None;
            }
        };
        let min = {
            let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "min");
            read_u32(span, &mut errors)?
        };
        let max = if has_max {
            let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "max");
            Some(read_u32(span, &mut errors)?)
        } else {
            None
        };
        Some(Limits { min, max, shared })
    })
}

pub fn read_function_type<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<FunctionType> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "function type");
        let param_types = read_vector(span, features, &mut errors, "param types", read_value_type)?;
        let result_types =
            read_vector(span, features, &mut errors, "result types", read_value_type)?;
        Some(FunctionType {
            param_types,
            result_types,
        })
    })
}

/// Reads a type section entry: the 0x60 function form followed by the
/// function type.
pub fn read_type_entry<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<TypeEntry> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "type entry");
        let form = read_var_u32(span, &mut errors, "form")?;
        if form != 0x60 {
            errors.on_error(span.pos(), &format!("Unknown type form: {form}"));
            return None;
        }
        let func_type = read_function_type(span, features, &mut errors)?;
        Some(TypeEntry { func_type })
    })
}

pub fn read_table_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<TableType> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "table type");
        let element_type = read_element_type(span, features, &mut errors)?;
        let limits = read_limits(span, features, &mut errors)?;
        Some(TableType {
            limits,
            element_type,
        })
    })
}

pub fn read_memory_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<MemoryType> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "memory type");
        let limits = read_limits(span, features, &mut errors)?;
        Some(MemoryType { limits })
    })
}

pub fn read_global_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<GlobalType> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "global type");
        let value_type = read_value_type(span, features, &mut errors)?;
        let mutability = read_mutability(span, features, &mut errors)?;
        Some(GlobalType {
            value_type,
            mutability,
        })
    })
}

pub fn read_event_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<EventType> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "event type");
        let raw = read_var_u32(span, &mut errors, "event attribute")?;
        let attribute = match u8::try_from(raw)
            .ok()
            .and_then(|value| EventAttribute::decode(value, features))
        {
            Some(attribute) => attribute,
            None => {
                errors.on_error(span.pos(), &format!("Unknown event attribute: {raw}"));
                return None;
            }
        };
        let type_index = read_index(span, &mut errors)?;
        Some(EventType {
            attribute,
            type_index,
        })
    })
}

pub fn read_import<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Import<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "import");
        let module = read_string(span, &mut errors, "module name")?;
        let field = read_string(span, &mut errors, "field name")?;
        let kind = read_external_kind(span, features, &mut errors)?;
        let desc = match kind {
            ExternalKind::Function => ImportDesc::Function(read_index(span, &mut errors)?),
            ExternalKind::Table => ImportDesc::Table(read_table_type(span, features, &mut errors)?),
            ExternalKind::Memory => {
                ImportDesc::Memory(read_memory_type(span, features, &mut errors)?)
            }
            ExternalKind::Global => {
                ImportDesc::Global(read_global_type(span, features, &mut errors)?)
            }
            ExternalKind::Event => ImportDesc::Event(read_event_type(span, features, &mut errors)?),
        };
        Some(Import {
            module,
            field,
            desc,
        })
    })
}

pub fn read_export<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Export<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "export");
        let name = read_string(span, &mut errors, "name")?;
        let kind = read_external_kind(span, features, &mut errors)?;
        let index = read_index(span, &mut errors)?;
        Some(Export { kind, name, index })
    })
}

pub fn read_function(
    span: &mut Span<'_>,
    _features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Function> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "function");
        let type_index = read_index(span, &mut errors)?;
        Some(Function { type_index })
    })
}

pub fn read_table(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Table> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "table");
        let table_type = read_table_type(span, features, &mut errors)?;
        Some(Table { table_type })
    })
}

pub fn read_memory(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Memory> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "memory");
        let memory_type = read_memory_type(span, features, &mut errors)?;
        Some(Memory { memory_type })
    })
}

pub fn read_global<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Global<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "global");
        let global_type = read_global_type(span, features, &mut errors)?;
        let init = read_constant_expression(span, features, &mut errors)?;
        Some(Global { global_type, init })
    })
}

pub fn read_event(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Event> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "event");
        let event_type = read_event_type(span, features, &mut errors)?;
        Some(Event { event_type })
    })
}

pub fn read_start(
    span: &mut Span<'_>,
    _features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Start> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "start");
        let func_index = read_index(span, &mut errors)?;
        Some(Start { func_index })
    })
}

pub fn read_data_count(
    span: &mut Span<'_>,
    _features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<DataCount> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "data count");
        let count = read_index(span, &mut errors)?;
        Some(DataCount { count })
    })
}

/// Reads one run of locals from a code entry.
pub fn read_locals(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Locals> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "locals");
        let count = {
            let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "count");
            read_index(span, &mut errors)?
        };
        let value_type = {
            let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "type");
            read_value_type(span, features, &mut errors)?
        };
        Some(Locals { count, value_type })
    })
}

/// Reads a code entry: its size framing, then the locals vector and the
/// body expression from inside the frame.
pub fn read_code<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Code<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "code");
        let length = read_length(span, &mut errors)?;
        let mut body = read_bytes(span, length as usize, &mut errors)?;
        let locals = read_vector(&mut body, features, &mut errors, "locals vector", read_locals)?;
        let body = read_expression(&mut body, features, &mut errors)?;
        Some(Code { locals, body })
    })
}

pub fn read_element_segment<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ElementSegment<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "element segment");
        let flags = read_var_u32(span, &mut errors, "flags")?;
        match flags {
            0 => {
                let offset = {
                    let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "offset");
                    read_constant_expression(span, features, &mut errors)?
                };
                let init =
                    read_vector(span, features, &mut errors, "initializers", |s, _f, e| {
                        read_index(s, e)
                    })?;
                Some(ElementSegment::Active {
                    table_index: 0,
                    offset,
                    init,
                })
            }
            1 if features.bulk_memory => {
                let element_type = read_element_type(span, features, &mut errors)?;
                let init = read_vector(
                    span,
                    features,
                    &mut errors,
                    "initializers",
                    read_element_expression,
                )?;
                Some(ElementSegment::Passive { element_type, init })
            }
            2 if features.bulk_memory => {
                let table_index = {
                    let mut errors =
                        ErrorsContextGuard::new(&mut errors, span.pos(), "table index");
                    read_index(span, &mut errors)?
                };
                let offset = {
                    let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "offset");
                    read_constant_expression(span, features, &mut errors)?
                };
                let init =
                    read_vector(span, features, &mut errors, "initializers", |s, _f, e| {
                        read_index(s, e)
                    })?;
                Some(ElementSegment::Active {
                    table_index,
                    offset,
                    init,
                })
            }
            _ => {
                errors.on_error(
                    span.pos(),
                    &format!("Unknown element segment flags: {flags}"),
                );
                None
            }
        }
    })
}

pub fn read_data_segment<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<DataSegment<'a>> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "data segment");
        let flags = read_var_u32(span, &mut errors, "flags")?;
        let read_init = |span: &mut Span<'a>, errors: &mut dyn ErrorSink| -> Option<Span<'a>> {
            let mut errors = ErrorsContextGuard::new(errors, span.pos(), "data");
            let length = read_length(span, &mut errors)?;
            read_bytes(span, length as usize, &mut errors)
        };
        match flags {
            0 => {
                let offset = {
                    let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "offset");
                    read_constant_expression(span, features, &mut errors)?
                };
                let init = read_init(span, &mut errors)?;
                Some(DataSegment::Active {
                    memory_index: 0,
                    offset,
                    init,
                })
            }
            1 if features.bulk_memory => {
                let init = read_init(span, &mut errors)?;
                Some(DataSegment::Passive { init })
            }
            2 if features.bulk_memory => {
                let memory_index = {
                    let mut errors =
                        ErrorsContextGuard::new(&mut errors, span.pos(), "memory index");
                    read_index(span, &mut errors)?
                };
                let offset = {
                    let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "offset");
                    read_constant_expression(span, features, &mut errors)?
                };
                let init = read_init(span, &mut errors)?;
                Some(DataSegment::Active {
                    memory_index,
                    offset,
                    init,
                })
            }
            _ => {
                errors.on_error(span.pos(), &format!("Unknown data segment flags: {flags}"));
                None
            }
        }
    })
}

/// Reads a section id. The id is a LEB, so overlong encodings of known
/// ids are accepted.
pub fn read_section_id(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<SectionId> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "section");
        let value = read_u32(span, &mut errors)?;
        match u8::try_from(value)
            .ok()
            .and_then(|byte| SectionId::decode(byte, features))
        {
            Some(id) => Some(id),
            None => {
                errors.on_error(span.pos(), &format!("Unknown section: {value}"));
                None
            }
        }
    })
}

/// Reads one section frame: id, declared size, and exactly that many
/// payload bytes. Custom sections additionally split a leading name off
/// the payload.
pub fn read_section<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Section<'a>> {
    backtrack(span, |span| {
        let id = read_section_id(span, features, errors)?;
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "section");
        let length = read_length(span, &mut errors)?;
        let mut data = read_bytes(span, length as usize, &mut errors)?;
        if id == SectionId::Custom {
            let name = read_string(&mut data, &mut errors, "name")?;
            Some(Section::Custom(CustomSection { name, data }))
        } else {
            Some(Section::Known(KnownSection { id, data }))
        }
    })
}

impl<'a> Read<'a> for TypeEntry {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_type_entry(span, features, errors)
    }
}

impl<'a> Read<'a> for Import<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_import(span, features, errors)
    }
}

impl<'a> Read<'a> for Function {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_function(span, features, errors)
    }
}

impl<'a> Read<'a> for Table {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_table(span, features, errors)
    }
}

impl<'a> Read<'a> for Memory {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_memory(span, features, errors)
    }
}

impl<'a> Read<'a> for Global<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_global(span, features, errors)
    }
}

impl<'a> Read<'a> for Export<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_export(span, features, errors)
    }
}

impl<'a> Read<'a> for Event {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_event(span, features, errors)
    }
}

impl<'a> Read<'a> for ElementSegment<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_element_segment(span, features, errors)
    }
}

impl<'a> Read<'a> for Code<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_code(span, features, errors)
    }
}

impl<'a> Read<'a> for DataSegment<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_data_segment(span, features, errors)
    }
}

impl<'a> Read<'a> for Section<'a> {
    fn read(span: &mut Span<'a>, features: &Features, errors: &mut dyn ErrorSink) -> Option<Self> {
        read_section(span, features, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectingErrors;
    use crate::types::ConstantExpression;

    fn expect_read<'a, T: PartialEq + std::fmt::Debug>(
        read: impl Fn(&mut Span<'a>, &Features, &mut dyn ErrorSink) -> Option<T>,
        features: &Features,
        bytes: &'a [u8],
        expected: T,
    ) {
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(bytes);
        let result = read(&mut span, features, &mut errors);
        assert!(
            errors.errors.is_empty(),
            "unexpected errors: {:?}",
            errors.errors
        );
        assert_eq!(errors.open_contexts(), 0);
        assert_eq!(result, Some(expected));
        assert!(span.is_empty(), "leftover bytes: {span:?}");
    }

    fn expect_failure<'a, T: std::fmt::Debug>(
        read: impl Fn(&mut Span<'a>, &Features, &mut dyn ErrorSink) -> Option<T>,
        features: &Features,
        bytes: &'a [u8],
        expected_trail: &[(usize, &str)],
    ) {
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(bytes);
        let result = read(&mut span, features, &mut errors);
        assert!(result.is_none());
        assert_eq!(errors.open_contexts(), 0);
        let expected: Vec<(usize, String)> = expected_trail
            .iter()
            .map(|&(offset, desc)| (offset, desc.to_string()))
            .collect();
        assert_eq!(errors.errors.last().unwrap().trail(), expected);
        // Failure restores the cursor.
        assert_eq!(span.pos(), 0);
        assert_eq!(span.len(), bytes.len());
    }

    #[test]
    fn test_read_value_type() {
        let features = Features::new();
        expect_read(read_value_type, &features, &[0x7f], ValueType::I32);
        expect_read(read_value_type, &features, &[0x7c], ValueType::F64);
        expect_failure(
            read_value_type,
            &features,
            &[0x10],
            &[(0, "value type"), (1, "Unknown value type: 16")],
        );
    }

    #[test]
    fn test_read_value_type_rejects_overlong() {
        // An overlong LEB of a valid value type is not a valid one-byte
        // enumerator; the first byte alone is unknown.
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0xff, 0x7f]);
        assert_eq!(read_value_type(&mut span, &features, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![
                (0, "value type".to_string()),
                (1, "Unknown value type: 255".to_string()),
            ]
        );
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn test_read_external_kind() {
        let features = Features::new();
        expect_read(read_external_kind, &features, &[0x00], ExternalKind::Function);
        expect_read(read_external_kind, &features, &[0x03], ExternalKind::Global);
        expect_failure(
            read_external_kind,
            &features,
            &[0x04],
            &[(0, "external kind"), (1, "Unknown external kind: 4")],
        );
    }

    #[test]
    fn test_read_limits() {
        let features = Features::new();
        expect_read(read_limits, &features, &[0x00, 0x81, 0x01], Limits::new(129));
        expect_read(
            read_limits,
            &features,
            &[0x01, 0x02, 0xe8, 0x07],
            Limits::with_max(2, 1000),
        );
    }

    #[test]
    fn test_read_limits_bad_flags() {
        expect_failure(
            read_limits,
            &Features::new(),
            &[0x02, 0x01],
            &[(0, "limits"), (1, "Invalid flags value: 2")],
        );
    }

    #[test]
    fn test_read_limits_shared() {
        let features = Features::new().threads();
        expect_read(
            read_limits,
            &features,
            &[0x02, 0x01, 0x02],
            Limits {
                min: 1,
                max: Some(2),
                shared: Shared::Yes,
            },
        );
    }

    #[test]
    fn test_read_limits_past_end() {
        expect_failure(
            read_limits,
            &Features::new(),
            &[0x00],
            &[
                (0, "limits"),
                (1, "min"),
                (1, "u32"),
                (1, "Unable to read u8"),
            ],
        );
        expect_failure(
            read_limits,
            &Features::new(),
            &[0x01, 0x00],
            &[
                (0, "limits"),
                (2, "max"),
                (2, "u32"),
                (2, "Unable to read u8"),
            ],
        );
    }

    #[test]
    fn test_read_function_type() {
        let features = Features::new();
        expect_read(
            read_function_type,
            &features,
            &[0x00, 0x00],
            FunctionType {
                param_types: vec![],
                result_types: vec![],
            },
        );
        expect_read(
            read_function_type,
            &features,
            &[0x02, 0x7f, 0x7e, 0x01, 0x7c],
            FunctionType {
                param_types: vec![ValueType::I32, ValueType::I64],
                result_types: vec![ValueType::F64],
            },
        );
    }

    #[test]
    fn test_read_function_type_past_end() {
        expect_failure(
            read_function_type,
            &Features::new(),
            &[],
            &[
                (0, "function type"),
                (0, "param types"),
                (0, "index"),
                (0, "Unable to read u8"),
            ],
        );
        expect_failure(
            read_function_type,
            &Features::new(),
            &[0x00, 0x01],
            &[
                (0, "function type"),
                (1, "result types"),
                (2, "Count is longer than the data length: 1 > 0"),
            ],
        );
    }

    #[test]
    fn test_read_type_entry() {
        expect_read(
            read_type_entry,
            &Features::new(),
            &[0x60, 0x00, 0x01, 0x7f],
            TypeEntry {
                func_type: FunctionType {
                    param_types: vec![],
                    result_types: vec![ValueType::I32],
                },
            },
        );
        expect_failure(
            read_type_entry,
            &Features::new(),
            &[0x40],
            &[(0, "type entry"), (1, "Unknown type form: 64")],
        );
    }

    #[test]
    fn test_read_table_type() {
        let features = Features::new();
        expect_read(
            read_table_type,
            &features,
            &[0x70, 0x00, 0x01],
            TableType {
                limits: Limits::new(1),
                element_type: ElementType::Funcref,
            },
        );
        expect_failure(
            read_table_type,
            &features,
            &[0x00],
            &[
                (0, "table type"),
                (0, "element type"),
                (1, "Unknown element type: 0"),
            ],
        );
    }

    #[test]
    fn test_read_global_type() {
        let features = Features::new();
        expect_read(
            read_global_type,
            &features,
            &[0x7f, 0x00],
            GlobalType {
                value_type: ValueType::I32,
                mutability: Mutability::Const,
            },
        );
        expect_read(
            read_global_type,
            &features,
            &[0x7d, 0x01],
            GlobalType {
                value_type: ValueType::F32,
                mutability: Mutability::Var,
            },
        );
    }

    #[test]
    fn test_read_import() {
        let features = Features::new();
        expect_read(
            read_import,
            &features,
            b"\x01\x61\x04\x66unc\x00\x0b",
            Import {
                module: b"a",
                field: b"func",
                desc: ImportDesc::Function(11),
            },
        );
        expect_read(
            read_import,
            &features,
            b"\x01\x62\x05table\x01\x70\x00\x01",
            Import {
                module: b"b",
                field: b"table",
                desc: ImportDesc::Table(TableType {
                    limits: Limits::new(1),
                    element_type: ElementType::Funcref,
                }),
            },
        );
        expect_read(
            read_import,
            &features,
            b"\x01\x63\x06memory\x02\x01\x00\x02",
            Import {
                module: b"c",
                field: b"memory",
                desc: ImportDesc::Memory(MemoryType {
                    limits: Limits::with_max(0, 2),
                }),
            },
        );
        expect_read(
            read_import,
            &features,
            b"\x01\x64\x06global\x03\x7f\x00",
            Import {
                module: b"d",
                field: b"global",
                desc: ImportDesc::Global(GlobalType {
                    value_type: ValueType::I32,
                    mutability: Mutability::Const,
                }),
            },
        );
    }

    #[test]
    fn test_read_import_past_end() {
        let features = Features::new();
        expect_failure(
            read_import,
            &features,
            &[],
            &[
                (0, "import"),
                (0, "module name"),
                (0, "index"),
                (0, "Unable to read u8"),
            ],
        );
        expect_failure(
            read_import,
            &features,
            &[0x00, 0x00],
            &[(0, "import"), (2, "external kind"), (2, "Unable to read u8")],
        );
        expect_failure(
            read_import,
            &features,
            &[0x00, 0x00, 0x02],
            &[
                (0, "import"),
                (3, "memory type"),
                (3, "limits"),
                (3, "flags"),
                (3, "Unable to read u8"),
            ],
        );
    }

    #[test]
    fn test_read_export() {
        let features = Features::new();
        expect_read(
            read_export,
            &features,
            b"\x02hi\x00\x03",
            Export {
                kind: ExternalKind::Function,
                name: b"hi",
                index: 3,
            },
        );
        expect_read(
            read_export,
            &features,
            b"\x00\x01\xe8\x07",
            Export {
                kind: ExternalKind::Table,
                name: b"",
                index: 1000,
            },
        );
    }

    #[test]
    fn test_read_global() {
        // An i32 global with an i64.const initializer parses; the type
        // mismatch is a validation property.
        let features = Features::new();
        expect_read(
            read_global,
            &features,
            &[0x7f, 0x01, 0x42, 0x00, 0x0b],
            Global {
                global_type: GlobalType {
                    value_type: ValueType::I32,
                    mutability: Mutability::Var,
                },
                init: ConstantExpression::new(&[0x42u8, 0x00, 0x0b][..]),
            },
        );
        expect_failure(
            read_global,
            &features,
            &[0x7f, 0x00],
            &[(0, "global"), (2, "Unexpected end of constant expression")],
        );
    }

    #[test]
    fn test_read_locals() {
        let features = Features::new();
        expect_read(
            read_locals,
            &features,
            &[0x02, 0x7f],
            Locals {
                count: 2,
                value_type: ValueType::I32,
            },
        );
        expect_read(
            read_locals,
            &features,
            &[0xc0, 0x02, 0x7c],
            Locals {
                count: 320,
                value_type: ValueType::F64,
            },
        );
        expect_failure(
            read_locals,
            &features,
            &[0xc0, 0x02],
            &[
                (0, "locals"),
                (2, "type"),
                (2, "value type"),
                (2, "Unable to read u8"),
            ],
        );
    }

    #[test]
    fn test_read_code() {
        let features = Features::new();
        // Size 4: one empty locals vector, then local.get 0 / end... the
        // body is everything after the locals.
        expect_read(
            read_code,
            &features,
            &[0x04, 0x00, 0x20, 0x00, 0x0b],
            Code {
                locals: vec![],
                body: crate::types::Expression::new(&[0x20u8, 0x00, 0x0b][..]),
            },
        );
    }

    #[test]
    fn test_read_element_segment_mvp() {
        let features = Features::new();
        expect_read(
            read_element_segment,
            &features,
            &[0x00, 0x41, 0x00, 0x0b, 0x02, 0x01, 0x02],
            ElementSegment::Active {
                table_index: 0,
                offset: ConstantExpression::new(&[0x41u8, 0x00, 0x0b][..]),
                init: vec![1, 2],
            },
        );
    }

    #[test]
    fn test_read_element_segment_flags_gated() {
        expect_failure(
            read_element_segment,
            &Features::new(),
            &[0x01, 0x70, 0x00],
            &[(0, "element segment"), (1, "Unknown element segment flags: 1")],
        );
    }

    #[test]
    fn test_read_element_segment_passive() {
        let features = Features::new().bulk_memory().reference_types();
        expect_read(
            read_element_segment,
            &features,
            &[0x01, 0x70, 0x02, 0xd2, 0x00, 0x0b, 0xd2, 0x01, 0x0b],
            ElementSegment::Passive {
                element_type: ElementType::Funcref,
                init: vec![
                    crate::types::ElementExpression::new(&[0xd2u8, 0x00, 0x0b][..]),
                    crate::types::ElementExpression::new(&[0xd2u8, 0x01, 0x0b][..]),
                ],
            },
        );
    }

    #[test]
    fn test_read_data_segment_mvp() {
        let features = Features::new();
        expect_read(
            read_data_segment,
            &features,
            &[0x00, 0x41, 0x00, 0x0b, 0x03, 0x61, 0x62, 0x63],
            DataSegment::Active {
                memory_index: 0,
                offset: ConstantExpression::new(&[0x41u8, 0x00, 0x0b][..]),
                init: Span::new(b"abc"),
            },
        );
    }

    #[test]
    fn test_read_data_segment_passive() {
        let features = Features::new().bulk_memory();
        expect_read(
            read_data_segment,
            &features,
            &[0x01, 0x02, 0xaa, 0xbb],
            DataSegment::Passive {
                init: Span::new(&[0xaa, 0xbb]),
            },
        );
    }

    #[test]
    fn test_read_section_id() {
        let features = Features::new();
        expect_read(read_section_id, &features, &[0x01], SectionId::Type);
        expect_read(read_section_id, &features, &[0x0b], SectionId::Data);
        // Overlong LEB is fine for section ids.
        expect_read(read_section_id, &features, &[0x80, 0x00], SectionId::Custom);
        expect_failure(
            read_section_id,
            &features,
            &[0x0c],
            &[(0, "section"), (1, "Unknown section: 12")],
        );
    }

    #[test]
    fn test_read_section_known() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x01, 0x03, 0x00, 0x00, 0x00]);
        let section = read_section(&mut span, &features, &mut errors).unwrap();
        assert_eq!(
            section,
            Section::Known(KnownSection {
                id: SectionId::Type,
                data: Span::new(&[0x00, 0x00, 0x00]),
            })
        );
        assert!(span.is_empty());
        assert!(errors.errors.is_empty());
    }

    #[test]
    fn test_read_section_custom() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(b"\x00\x06\x03yup\x00\x00");
        let section = read_section(&mut span, &features, &mut errors).unwrap();
        assert_eq!(
            section,
            Section::Custom(CustomSection {
                name: b"yup",
                data: Span::new(&[0x00, 0x00]),
            })
        );
        // The payload span sits at its true offset in the input.
        match section {
            Section::Custom(custom) => assert_eq!(custom.data.pos(), 6),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_section_payload_has_declared_size() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        // Declared size 5 with only 3 payload bytes left.
        let mut span = Span::new(&[0x01, 0x05, 0x00, 0x00, 0x00]);
        assert_eq!(read_section(&mut span, &features, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![
                (1, "section".to_string()),
                (2, "Count is longer than the data length: 5 > 3".to_string()),
            ]
        );
    }
}
