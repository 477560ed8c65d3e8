//! Binary encoders, symmetric to the readers.
//!
//! All writers append the wire form to a caller-provided `&mut Vec<u8>`
//! and assume valid in-memory data; there is no error sink on this path.
//! Integers are emitted in minimal LEB128 form, so decode(encode(x)) = x
//! and encode(decode(b)) = b for canonical input.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::encoding::{
    BlockType, ElementType, ExternalKind, LinkingSubsectionId, Mutability, NameSubsectionId,
    Opcode, SectionId, ValueType,
};
use crate::types::{
    Code, CustomSection, DataSegment, ElementSegment, EventType, Export, FunctionType, Global,
    GlobalType, Immediate, Import, ImportDesc, IndirectNameAssoc, InitFunction, Instruction,
    KnownSection, Limits, Locals, MemArg, NameAssoc, RelocationEntry, Section, SegmentInfo,
    Shared, SymbolInfo, SymbolInfoDesc, TableType, TypeEntry,
};

pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

pub fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
}

/// Appends a raw little-endian u32 (4 bytes, not LEB128).
pub fn write_u32le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Appends the little-endian IEEE 754 encoding of an f32.
pub fn write_f32(out: &mut Vec<u8>, value: f32) {
    let mut bytes = [0u8; 4];
    let mut cursor = io::Cursor::new(&mut bytes[..]);
    cursor.write_f32::<LittleEndian>(value).unwrap();
    out.extend_from_slice(&bytes);
}

/// Appends the little-endian IEEE 754 encoding of an f64.
pub fn write_f64(out: &mut Vec<u8>, value: f64) {
    let mut bytes = [0u8; 8];
    let mut cursor = io::Cursor::new(&mut bytes[..]);
    cursor.write_f64::<LittleEndian>(value).unwrap();
    out.extend_from_slice(&bytes);
}

// ---------------------------------------------------------------------------
// LEB128
// ---------------------------------------------------------------------------

/// Appends the unsigned LEB128 encoding of a u64.
pub fn write_var_u64(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

/// Appends the unsigned LEB128 encoding of a u32.
pub fn write_var_u32(out: &mut Vec<u8>, value: u32) {
    write_var_u64(out, value as u64);
}

/// Appends the signed LEB128 encoding of an i64.
pub fn write_var_s64(out: &mut Vec<u8>, mut value: i64) {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0) {
            out.push(byte);
            break;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

/// Appends the signed LEB128 encoding of an i32.
pub fn write_var_s32(out: &mut Vec<u8>, value: i32) {
    write_var_s64(out, value as i64);
}

/// Appends a length-prefixed name.
pub fn write_string(out: &mut Vec<u8>, bytes: &[u8]) {
    write_var_u32(out, bytes.len() as u32);
    out.extend_from_slice(bytes);
}

/// Appends a counted vector.
pub fn write_vector<T>(out: &mut Vec<u8>, items: &[T], write_item: impl Fn(&mut Vec<u8>, &T)) {
    write_var_u32(out, items.len() as u32);
    for item in items {
        write_item(out, item);
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

pub fn write_value_type(out: &mut Vec<u8>, value_type: ValueType) {
    out.push(value_type.encode());
}

pub fn write_element_type(out: &mut Vec<u8>, element_type: ElementType) {
    out.push(element_type.encode());
}

pub fn write_external_kind(out: &mut Vec<u8>, kind: ExternalKind) {
    out.push(kind.encode());
}

pub fn write_mutability(out: &mut Vec<u8>, mutability: Mutability) {
    out.push(mutability.encode());
}

pub fn write_block_type(out: &mut Vec<u8>, block_type: BlockType) {
    block_type.encode(out);
}

pub fn write_limits(out: &mut Vec<u8>, limits: &Limits) {
    let flags = match (limits.max.is_some(), limits.shared) {
        (false, Shared::No) => 0,
        (true, Shared::No) => 1,
        (true, Shared::Yes) => 2,
        (false, Shared::Yes) => 3,
    };
    write_var_u32(out, flags);
    write_var_u32(out, limits.min);
    if let Some(max) = limits.max {
        write_var_u32(out, max);
    }
}

pub fn write_function_type(out: &mut Vec<u8>, func_type: &FunctionType) {
    write_vector(out, &func_type.param_types, |out, &vt| {
        write_value_type(out, vt)
    });
    write_vector(out, &func_type.result_types, |out, &vt| {
        write_value_type(out, vt)
    });
}

pub fn write_type_entry(out: &mut Vec<u8>, entry: &TypeEntry) {
    write_var_u32(out, 0x60);
    write_function_type(out, &entry.func_type);
}

pub fn write_table_type(out: &mut Vec<u8>, table_type: &TableType) {
    write_element_type(out, table_type.element_type);
    write_limits(out, &table_type.limits);
}

pub fn write_memory_type(out: &mut Vec<u8>, memory_type: &crate::types::MemoryType) {
    write_limits(out, &memory_type.limits);
}

pub fn write_global_type(out: &mut Vec<u8>, global_type: &GlobalType) {
    write_value_type(out, global_type.value_type);
    write_mutability(out, global_type.mutability);
}

pub fn write_event_type(out: &mut Vec<u8>, event_type: &EventType) {
    write_var_u32(out, event_type.attribute.encode() as u32);
    write_var_u32(out, event_type.type_index);
}

// ---------------------------------------------------------------------------
// Module entities
// ---------------------------------------------------------------------------

pub fn write_import(out: &mut Vec<u8>, import: &Import<'_>) {
    write_string(out, import.module);
    write_string(out, import.field);
    write_external_kind(out, import.desc.kind());
    match &import.desc {
        ImportDesc::Function(type_index) => write_var_u32(out, *type_index),
        ImportDesc::Table(table_type) => write_table_type(out, table_type),
        ImportDesc::Memory(memory_type) => write_memory_type(out, memory_type),
        ImportDesc::Global(global_type) => write_global_type(out, global_type),
        ImportDesc::Event(event_type) => write_event_type(out, event_type),
    }
}

pub fn write_export(out: &mut Vec<u8>, export: &Export<'_>) {
    write_string(out, export.name);
    write_external_kind(out, export.kind);
    write_var_u32(out, export.index);
}

pub fn write_function(out: &mut Vec<u8>, function: &crate::types::Function) {
    write_var_u32(out, function.type_index);
}

pub fn write_table(out: &mut Vec<u8>, table: &crate::types::Table) {
    write_table_type(out, &table.table_type);
}

pub fn write_memory(out: &mut Vec<u8>, memory: &crate::types::Memory) {
    write_memory_type(out, &memory.memory_type);
}

pub fn write_global(out: &mut Vec<u8>, global: &Global<'_>) {
    write_global_type(out, &global.global_type);
    write_constant_expression(out, &global.init);
}

pub fn write_event(out: &mut Vec<u8>, event: &crate::types::Event) {
    write_event_type(out, &event.event_type);
}

pub fn write_start(out: &mut Vec<u8>, start: &crate::types::Start) {
    write_var_u32(out, start.func_index);
}

pub fn write_data_count(out: &mut Vec<u8>, data_count: &crate::types::DataCount) {
    write_var_u32(out, data_count.count);
}

// ---------------------------------------------------------------------------
// Instructions and expressions
// ---------------------------------------------------------------------------

pub fn write_opcode(out: &mut Vec<u8>, opcode: Opcode) {
    opcode.encode(out);
}

pub fn write_mem_arg(out: &mut Vec<u8>, memarg: &MemArg) {
    write_var_u32(out, memarg.align_log2);
    write_var_u32(out, memarg.offset);
}

pub fn write_instruction(out: &mut Vec<u8>, instruction: &Instruction) {
    write_opcode(out, instruction.opcode);
    match &instruction.immediate {
        Immediate::None => {}
        Immediate::Block(block_type) => write_block_type(out, *block_type),
        Immediate::Index(index) => write_var_u32(out, *index),
        Immediate::BrTable(imm) => {
            write_vector(out, &imm.targets, |out, &target| write_var_u32(out, target));
            write_var_u32(out, imm.default_target);
        }
        Immediate::CallIndirect(imm) => {
            write_var_u32(out, imm.type_index);
            out.push(imm.reserved);
        }
        Immediate::BrOnExn(imm) => {
            write_var_u32(out, imm.target);
            write_var_u32(out, imm.event_index);
        }
        Immediate::Byte(byte) | Immediate::Lane(byte) => out.push(*byte),
        Immediate::MemArg(memarg) => write_mem_arg(out, memarg),
        Immediate::MemArgLane(memarg, lane) => {
            write_mem_arg(out, memarg);
            out.push(*lane);
        }
        Immediate::S32(value) => write_var_s32(out, *value),
        Immediate::S64(value) => write_var_s64(out, *value),
        Immediate::F32(value) => write_f32(out, *value),
        Immediate::F64(value) => write_f64(out, *value),
        Immediate::V128(bytes) | Immediate::Shuffle(bytes) => out.extend_from_slice(bytes),
        Immediate::Init(imm) => {
            write_var_u32(out, imm.segment_index);
            out.push(imm.reserved);
        }
        Immediate::Copy(imm) => {
            out.push(imm.src_reserved);
            out.push(imm.dst_reserved);
        }
    }
}

/// A constant expression already holds its wire bytes, terminator
/// included.
pub fn write_constant_expression(out: &mut Vec<u8>, expr: &crate::types::ConstantExpression<'_>) {
    out.extend_from_slice(expr.data.bytes());
}

pub fn write_element_expression(out: &mut Vec<u8>, expr: &crate::types::ElementExpression<'_>) {
    out.extend_from_slice(expr.data.bytes());
}

pub fn write_expression(out: &mut Vec<u8>, expr: &crate::types::Expression<'_>) {
    out.extend_from_slice(expr.data.bytes());
}

pub fn write_locals(out: &mut Vec<u8>, locals: &Locals) {
    write_var_u32(out, locals.count);
    write_value_type(out, locals.value_type);
}

/// Appends a code entry: its contents are built first so the size prefix
/// can be exact.
pub fn write_code(out: &mut Vec<u8>, code: &Code<'_>) {
    let mut contents = Vec::new();
    write_vector(&mut contents, &code.locals, |out, locals| {
        write_locals(out, locals)
    });
    write_expression(&mut contents, &code.body);
    write_var_u32(out, contents.len() as u32);
    out.extend_from_slice(&contents);
}

pub fn write_element_segment(out: &mut Vec<u8>, segment: &ElementSegment<'_>) {
    match segment {
        ElementSegment::Active {
            table_index,
            offset,
            init,
        } => {
            if *table_index == 0 {
                write_var_u32(out, 0);
            } else {
                write_var_u32(out, 2);
                write_var_u32(out, *table_index);
            }
            write_constant_expression(out, offset);
            write_vector(out, init, |out, &index| write_var_u32(out, index));
        }
        ElementSegment::Passive { element_type, init } => {
            write_var_u32(out, 1);
            write_element_type(out, *element_type);
            write_vector(out, init, |out, expr| write_element_expression(out, expr));
        }
    }
}

pub fn write_data_segment(out: &mut Vec<u8>, segment: &DataSegment<'_>) {
    match segment {
        DataSegment::Active {
            memory_index,
            offset,
            init,
        } => {
            if *memory_index == 0 {
                write_var_u32(out, 0);
            } else {
                write_var_u32(out, 2);
                write_var_u32(out, *memory_index);
            }
            write_constant_expression(out, offset);
            write_string(out, init.bytes());
        }
        DataSegment::Passive { init } => {
            write_var_u32(out, 1);
            write_string(out, init.bytes());
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Appends a section frame: id, size, contents.
pub fn write_section_frame(out: &mut Vec<u8>, id: SectionId, contents: &[u8]) {
    out.push(id.encode());
    write_var_u32(out, contents.len() as u32);
    out.extend_from_slice(contents);
}

pub fn write_known_section(out: &mut Vec<u8>, section: &KnownSection<'_>) {
    write_section_frame(out, section.id, section.data.bytes());
}

pub fn write_custom_section(out: &mut Vec<u8>, section: &CustomSection<'_>) {
    let mut contents = Vec::new();
    write_string(&mut contents, section.name);
    contents.extend_from_slice(section.data.bytes());
    write_section_frame(out, SectionId::Custom, &contents);
}

pub fn write_section(out: &mut Vec<u8>, section: &Section<'_>) {
    match section {
        Section::Known(known) => write_known_section(out, known),
        Section::Custom(custom) => write_custom_section(out, custom),
    }
}

// ---------------------------------------------------------------------------
// "name" / "linking" / "reloc.*" payloads
// ---------------------------------------------------------------------------

pub fn write_name_subsection_frame(out: &mut Vec<u8>, id: NameSubsectionId, contents: &[u8]) {
    out.push(id.encode());
    write_var_u32(out, contents.len() as u32);
    out.extend_from_slice(contents);
}

pub fn write_name_assoc(out: &mut Vec<u8>, assoc: &NameAssoc<'_>) {
    write_var_u32(out, assoc.index);
    write_string(out, assoc.name);
}

pub fn write_name_map(out: &mut Vec<u8>, name_map: &[NameAssoc<'_>]) {
    write_vector(out, name_map, |out, assoc| write_name_assoc(out, assoc));
}

pub fn write_indirect_name_assoc(out: &mut Vec<u8>, assoc: &IndirectNameAssoc<'_>) {
    write_var_u32(out, assoc.index);
    write_name_map(out, &assoc.name_map);
}

pub fn write_linking_subsection_frame(
    out: &mut Vec<u8>,
    id: LinkingSubsectionId,
    contents: &[u8],
) {
    out.push(id.encode());
    write_var_u32(out, contents.len() as u32);
    out.extend_from_slice(contents);
}

pub fn write_segment_info(out: &mut Vec<u8>, info: &SegmentInfo<'_>) {
    write_string(out, info.name);
    write_var_u32(out, info.align_log2);
    write_var_u32(out, info.flags);
}

pub fn write_init_function(out: &mut Vec<u8>, init: &InitFunction) {
    write_var_u32(out, init.priority);
    write_var_u32(out, init.index);
}

pub fn write_comdat(out: &mut Vec<u8>, comdat: &crate::types::Comdat<'_>) {
    write_string(out, comdat.name);
    write_var_u32(out, comdat.flags);
    write_vector(out, &comdat.symbols, |out, symbol| {
        out.push(symbol.kind.encode());
        write_var_u32(out, symbol.index);
    });
}

pub fn write_symbol_info(out: &mut Vec<u8>, symbol: &SymbolInfo<'_>) {
    match &symbol.desc {
        SymbolInfoDesc::Base { kind, index, name } => {
            out.push(kind.encode());
            write_var_u32(out, symbol.flags.encode());
            write_var_u32(out, *index);
            if let Some(name) = name {
                write_string(out, name);
            }
        }
        SymbolInfoDesc::Data { name, defined } => {
            out.push(crate::encoding::SymbolInfoKind::Data.encode());
            write_var_u32(out, symbol.flags.encode());
            write_string(out, name);
            if let Some(defined) = defined {
                write_var_u32(out, defined.index);
                write_var_u32(out, defined.offset);
                write_var_u32(out, defined.size);
            }
        }
        SymbolInfoDesc::Section { section } => {
            out.push(crate::encoding::SymbolInfoKind::Section.encode());
            write_var_u32(out, symbol.flags.encode());
            write_var_u32(out, *section);
        }
    }
}

pub fn write_relocation_entry(out: &mut Vec<u8>, entry: &RelocationEntry) {
    out.push(entry.reloc_type.encode());
    write_var_u32(out, entry.offset);
    write_var_u32(out, entry.index);
    if let Some(addend) = entry.addend {
        write_var_s32(out, addend);
    }
}
