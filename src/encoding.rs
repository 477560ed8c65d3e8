//! Wire encodings for every WebAssembly enumerator.
//!
//! Each mapping between raw bytes and a semantic enumerator is one
//! declarative table; the `wire_enum!` and `opcodes!` macros expand a table
//! into the enum itself plus `encode`, `decode`, and `text`. A row may be
//! gated on a [`Features`] flag, in which case `decode` treats the byte as
//! unknown while the flag is off. The tables are the single source of truth
//! for both the reader and the writer.

use std::fmt;

use crate::features::Features;

macro_rules! gate {
    ($features:ident) => {
        true
    };
    ($features:ident, $feat:ident) => {
        $features.$feat
    };
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $val:literal => $variant:ident, $text:literal $(, if $feat:ident)? ; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )*
        }

        impl $name {
            /// Decodes a wire value, honoring feature gates.
            pub fn decode(value: u8, _features: &Features) -> Option<Self> {
                match value {
                    $( $val if gate!(_features $(, $feat)?) => Some($name::$variant), )*
                    _ => None,
                }
            }

            /// The wire value. Total over the enumerator domain.
            pub fn encode(self) -> u8 {
                match self {
                    $( $name::$variant => $val, )*
                }
            }

            pub fn text(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

wire_enum! {
    /// One-byte value type encodings.
    ValueType {
        0x7f => I32, "i32";
        0x7e => I64, "i64";
        0x7d => F32, "f32";
        0x7c => F64, "f64";
        0x7b => V128, "v128", if simd;
        0x6f => Anyref, "anyref", if reference_types;
    }
}

wire_enum! {
    /// Element types for tables.
    ElementType {
        0x70 => Funcref, "funcref";
        0x6f => Anyref, "anyref", if reference_types;
    }
}

wire_enum! {
    /// Import/export descriptor kinds.
    ExternalKind {
        0x00 => Function, "func";
        0x01 => Table, "table";
        0x02 => Memory, "memory";
        0x03 => Global, "global";
        0x04 => Event, "event", if exceptions;
    }
}

wire_enum! {
    /// Global mutability.
    Mutability {
        0x00 => Const, "const";
        0x01 => Var, "var";
    }
}

wire_enum! {
    /// Module section ids. Read as a LEB, so overlong encodings of these
    /// values are accepted.
    SectionId {
        0 => Custom, "custom";
        1 => Type, "type";
        2 => Import, "import";
        3 => Function, "function";
        4 => Table, "table";
        5 => Memory, "memory";
        6 => Global, "global";
        7 => Export, "export";
        8 => Start, "start";
        9 => Element, "element";
        10 => Code, "code";
        11 => Data, "data";
        12 => DataCount, "data count", if bulk_memory;
        13 => Event, "event", if exceptions;
    }
}

wire_enum! {
    /// Subsection ids of the standard "name" custom section.
    NameSubsectionId {
        0 => Module, "module";
        1 => Function, "function";
        2 => Local, "local";
        4 => Label, "label";
        5 => Type, "type";
        6 => Table, "table";
        7 => Memory, "memory";
        8 => Global, "global";
        9 => ElementSegment, "element segment";
        10 => DataSegment, "data segment";
    }
}

wire_enum! {
    /// Subsection ids of the "linking" custom section (tool conventions,
    /// version 2).
    LinkingSubsectionId {
        5 => SegmentInfo, "segment info";
        6 => InitFunctions, "init functions";
        7 => ComdatInfo, "comdat info";
        8 => SymbolTable, "symbol table";
    }
}

wire_enum! {
    /// Kinds of entries in the linking symbol table.
    SymbolInfoKind {
        0 => Function, "function";
        1 => Data, "data";
        2 => Global, "global";
        3 => Section, "section";
        4 => Event, "event";
    }
}

wire_enum! {
    /// Relocation types from the "reloc.*" custom sections.
    RelocationType {
        0 => FunctionIndexLeb, "R_WASM_FUNCTION_INDEX_LEB";
        1 => TableIndexSleb, "R_WASM_TABLE_INDEX_SLEB";
        2 => TableIndexI32, "R_WASM_TABLE_INDEX_I32";
        3 => MemoryAddrLeb, "R_WASM_MEMORY_ADDR_LEB";
        4 => MemoryAddrSleb, "R_WASM_MEMORY_ADDR_SLEB";
        5 => MemoryAddrI32, "R_WASM_MEMORY_ADDR_I32";
        6 => TypeIndexLeb, "R_WASM_TYPE_INDEX_LEB";
        7 => GlobalIndexLeb, "R_WASM_GLOBAL_INDEX_LEB";
        8 => FunctionOffsetI32, "R_WASM_FUNCTION_OFFSET_I32";
        9 => SectionOffsetI32, "R_WASM_SECTION_OFFSET_I32";
        10 => EventIndexLeb, "R_WASM_EVENT_INDEX_LEB";
    }
}

impl RelocationType {
    /// Whether entries of this type carry a trailing addend.
    pub fn has_addend(self) -> bool {
        matches!(
            self,
            RelocationType::MemoryAddrLeb
                | RelocationType::MemoryAddrSleb
                | RelocationType::MemoryAddrI32
                | RelocationType::FunctionOffsetI32
                | RelocationType::SectionOffsetI32
        )
    }
}

wire_enum! {
    /// Event attributes. Only exceptions are defined.
    EventAttribute {
        0 => Exception, "exception";
    }
}

wire_enum! {
    /// Kinds of comdat symbols in the linking section.
    ComdatSymbolKind {
        0 => Data, "data";
        1 => Function, "function";
        2 => Global, "global";
        3 => Event, "event";
    }
}

// ---------------------------------------------------------------------------
// Block types
// ---------------------------------------------------------------------------

/// Result type of a `block`, `loop`, `if`, or `try`.
///
/// One byte on the wire for the MVP forms. With `multi_value`, a
/// non-negative LEB s33 selects a function type by index instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    I32,
    I64,
    F32,
    F64,
    V128,
    Anyref,
    Void,
    Index(u32),
}

impl BlockType {
    /// Decodes the one-byte forms, honoring feature gates. The `Index`
    /// form is handled by the instruction reader, which re-reads the bytes
    /// as a signed LEB when this returns `None` and `multi_value` is on.
    pub fn decode(value: u8, features: &Features) -> Option<Self> {
        match value {
            0x7f => Some(BlockType::I32),
            0x7e => Some(BlockType::I64),
            0x7d => Some(BlockType::F32),
            0x7c => Some(BlockType::F64),
            0x7b if features.simd => Some(BlockType::V128),
            0x6f if features.reference_types => Some(BlockType::Anyref),
            0x40 => Some(BlockType::Void),
            _ => None,
        }
    }

    /// Appends the wire encoding.
    pub fn encode(self, out: &mut Vec<u8>) {
        match self {
            BlockType::I32 => out.push(0x7f),
            BlockType::I64 => out.push(0x7e),
            BlockType::F32 => out.push(0x7d),
            BlockType::F64 => out.push(0x7c),
            BlockType::V128 => out.push(0x7b),
            BlockType::Anyref => out.push(0x6f),
            BlockType::Void => out.push(0x40),
            BlockType::Index(index) => crate::write::write_var_s64(out, index as i64),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::I32 => f.write_str("i32"),
            BlockType::I64 => f.write_str("i64"),
            BlockType::F32 => f.write_str("f32"),
            BlockType::F64 => f.write_str("f64"),
            BlockType::V128 => f.write_str("v128"),
            BlockType::Anyref => f.write_str("anyref"),
            BlockType::Void => f.write_str("void"),
            BlockType::Index(index) => write!(f, "type[{index}]"),
        }
    }
}

// ---------------------------------------------------------------------------
// Symbol info flags (linking section)
// ---------------------------------------------------------------------------

/// Symbol binding scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Global,
    Weak,
    Local,
}

/// Symbol visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Default,
    Hidden,
}

/// Decoded view of the symbol table flags word.
///
/// Bits not listed in the tool conventions are ignored on decode and
/// never produced on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolInfoFlags {
    pub binding: Binding,
    pub visibility: Visibility,
    pub undefined: bool,
    pub explicit_name: bool,
}

const WASM_SYM_BINDING_WEAK: u32 = 0x1;
const WASM_SYM_BINDING_LOCAL: u32 = 0x2;
const WASM_SYM_BINDING_MASK: u32 = 0x3;
const WASM_SYM_VISIBILITY_HIDDEN: u32 = 0x4;
const WASM_SYM_UNDEFINED: u32 = 0x10;
const WASM_SYM_EXPLICIT_NAME: u32 = 0x40;

impl SymbolInfoFlags {
    /// Decodes the flags word. Returns `None` when both binding bits are
    /// set, which the conventions leave undefined.
    pub fn decode(flags: u32) -> Option<Self> {
        let binding = match flags & WASM_SYM_BINDING_MASK {
            0 => Binding::Global,
            WASM_SYM_BINDING_WEAK => Binding::Weak,
            WASM_SYM_BINDING_LOCAL => Binding::Local,
            _ => return None,
        };
        let visibility = if flags & WASM_SYM_VISIBILITY_HIDDEN != 0 {
            Visibility::Hidden
        } else {
            Visibility::Default
        };
        Some(SymbolInfoFlags {
            binding,
            visibility,
            undefined: flags & WASM_SYM_UNDEFINED != 0,
            explicit_name: flags & WASM_SYM_EXPLICIT_NAME != 0,
        })
    }

    /// The flags word.
    pub fn encode(self) -> u32 {
        let mut flags = match self.binding {
            Binding::Global => 0,
            Binding::Weak => WASM_SYM_BINDING_WEAK,
            Binding::Local => WASM_SYM_BINDING_LOCAL,
        };
        if self.visibility == Visibility::Hidden {
            flags |= WASM_SYM_VISIBILITY_HIDDEN;
        }
        if self.undefined {
            flags |= WASM_SYM_UNDEFINED;
        }
        if self.explicit_name {
            flags |= WASM_SYM_EXPLICIT_NAME;
        }
        flags
    }

    /// Whether the symbol's name appears on the wire. Defined symbols
    /// always carry one; undefined symbols only with an explicit name.
    pub fn has_name(self) -> bool {
        !self.undefined || self.explicit_name
    }
}

// ---------------------------------------------------------------------------
// Opcodes
// ---------------------------------------------------------------------------

/// Shape of the immediate following an opcode on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImmediateKind {
    None,
    Block,
    Index,
    BrTable,
    CallIndirect,
    BrOnExn,
    Reserved,
    Lane,
    MemArg,
    MemArgLane,
    S32,
    S64,
    F32,
    F64,
    V128,
    Shuffle,
    Init,
    Copy,
}

macro_rules! imm {
    (none) => {
        ImmediateKind::None
    };
    (block) => {
        ImmediateKind::Block
    };
    (index) => {
        ImmediateKind::Index
    };
    (br_table) => {
        ImmediateKind::BrTable
    };
    (call_indirect) => {
        ImmediateKind::CallIndirect
    };
    (br_on_exn) => {
        ImmediateKind::BrOnExn
    };
    (reserved) => {
        ImmediateKind::Reserved
    };
    (lane) => {
        ImmediateKind::Lane
    };
    (memarg) => {
        ImmediateKind::MemArg
    };
    (memarg_lane) => {
        ImmediateKind::MemArgLane
    };
    (s32) => {
        ImmediateKind::S32
    };
    (s64) => {
        ImmediateKind::S64
    };
    (f32) => {
        ImmediateKind::F32
    };
    (f64) => {
        ImmediateKind::F64
    };
    (v128) => {
        ImmediateKind::V128
    };
    (shuffle) => {
        ImmediateKind::Shuffle
    };
    (init) => {
        ImmediateKind::Init
    };
    (copy) => {
        ImmediateKind::Copy
    };
}

macro_rules! opcodes {
    (
        plain {
            $( $pval:literal => $pname:ident, $ptext:literal, $pimm:ident $(, if $pfeat:ident)? ; )*
        }
        prefixed {
            $( $xprefix:literal $xval:literal => $xname:ident, $xtext:literal, $ximm:ident, if $xfeat:ident ; )*
        }
    ) => {
        /// Every recognized instruction opcode across the supported
        /// proposals.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $( $pname, )*
            $( $xname, )*
        }

        impl Opcode {
            /// Decodes a one-byte opcode, honoring feature gates.
            pub fn decode(value: u8, _features: &Features) -> Option<Self> {
                match value {
                    $( $pval if gate!(_features $(, $pfeat)?) => Some(Opcode::$pname), )*
                    _ => None,
                }
            }

            /// Decodes a prefixed opcode from its prefix byte and LEB
            /// selector.
            pub fn decode_prefixed(prefix: u8, value: u32, _features: &Features) -> Option<Self> {
                match (prefix, value) {
                    $( ($xprefix, $xval) if _features.$xfeat => Some(Opcode::$xname), )*
                    _ => None,
                }
            }

            /// Appends the wire encoding: one byte, or a prefix byte plus
            /// a LEB selector.
            pub fn encode(self, out: &mut Vec<u8>) {
                match self {
                    $( Opcode::$pname => out.push($pval), )*
                    $( Opcode::$xname => {
                        out.push($xprefix);
                        crate::write::write_var_u32(out, $xval);
                    } )*
                }
            }

            pub fn text(self) -> &'static str {
                match self {
                    $( Opcode::$pname => $ptext, )*
                    $( Opcode::$xname => $xtext, )*
                }
            }

            /// The immediate that follows this opcode on the wire.
            pub(crate) fn immediate_kind(self) -> ImmediateKind {
                match self {
                    $( Opcode::$pname => imm!($pimm), )*
                    $( Opcode::$xname => imm!($ximm), )*
                }
            }
        }

        impl fmt::Display for Opcode {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.text())
            }
        }
    };
}

/// True when `value` begins a two-byte opcode under the enabled features.
pub fn is_prefix_byte(value: u8, features: &Features) -> bool {
    match value {
        0xfc => {
            features.saturating_float_to_int || features.bulk_memory || features.reference_types
        }
        0xfd => features.simd,
        0xfe => features.threads,
        _ => false,
    }
}

opcodes! {
    plain {
        0x00 => Unreachable, "unreachable", none;
        0x01 => Nop, "nop", none;
        0x02 => Block, "block", block;
        0x03 => Loop, "loop", block;
        0x04 => If, "if", block;
        0x05 => Else, "else", none;
        0x06 => Try, "try", block, if exceptions;
        0x07 => Catch, "catch", none, if exceptions;
        0x08 => Throw, "throw", index, if exceptions;
        0x09 => Rethrow, "rethrow", none, if exceptions;
        0x0a => BrOnExn, "br_on_exn", br_on_exn, if exceptions;
        0x0b => End, "end", none;
        0x0c => Br, "br", index;
        0x0d => BrIf, "br_if", index;
        0x0e => BrTable, "br_table", br_table;
        0x0f => Return, "return", none;
        0x10 => Call, "call", index;
        0x11 => CallIndirect, "call_indirect", call_indirect;
        0x12 => ReturnCall, "return_call", index, if tail_call;
        0x13 => ReturnCallIndirect, "return_call_indirect", call_indirect, if tail_call;
        0x1a => Drop, "drop", none;
        0x1b => Select, "select", none;
        0x20 => LocalGet, "local.get", index;
        0x21 => LocalSet, "local.set", index;
        0x22 => LocalTee, "local.tee", index;
        0x23 => GlobalGet, "global.get", index;
        0x24 => GlobalSet, "global.set", index;
        0x25 => TableGet, "table.get", index, if reference_types;
        0x26 => TableSet, "table.set", index, if reference_types;
        0x28 => I32Load, "i32.load", memarg;
        0x29 => I64Load, "i64.load", memarg;
        0x2a => F32Load, "f32.load", memarg;
        0x2b => F64Load, "f64.load", memarg;
        0x2c => I32Load8S, "i32.load8_s", memarg;
        0x2d => I32Load8U, "i32.load8_u", memarg;
        0x2e => I32Load16S, "i32.load16_s", memarg;
        0x2f => I32Load16U, "i32.load16_u", memarg;
        0x30 => I64Load8S, "i64.load8_s", memarg;
        0x31 => I64Load8U, "i64.load8_u", memarg;
        0x32 => I64Load16S, "i64.load16_s", memarg;
        0x33 => I64Load16U, "i64.load16_u", memarg;
        0x34 => I64Load32S, "i64.load32_s", memarg;
        0x35 => I64Load32U, "i64.load32_u", memarg;
        0x36 => I32Store, "i32.store", memarg;
        0x37 => I64Store, "i64.store", memarg;
        0x38 => F32Store, "f32.store", memarg;
        0x39 => F64Store, "f64.store", memarg;
        0x3a => I32Store8, "i32.store8", memarg;
        0x3b => I32Store16, "i32.store16", memarg;
        0x3c => I64Store8, "i64.store8", memarg;
        0x3d => I64Store16, "i64.store16", memarg;
        0x3e => I64Store32, "i64.store32", memarg;
        0x3f => MemorySize, "memory.size", reserved;
        0x40 => MemoryGrow, "memory.grow", reserved;
        0x41 => I32Const, "i32.const", s32;
        0x42 => I64Const, "i64.const", s64;
        0x43 => F32Const, "f32.const", f32;
        0x44 => F64Const, "f64.const", f64;
        0x45 => I32Eqz, "i32.eqz", none;
        0x46 => I32Eq, "i32.eq", none;
        0x47 => I32Ne, "i32.ne", none;
        0x48 => I32LtS, "i32.lt_s", none;
        0x49 => I32LtU, "i32.lt_u", none;
        0x4a => I32GtS, "i32.gt_s", none;
        0x4b => I32GtU, "i32.gt_u", none;
        0x4c => I32LeS, "i32.le_s", none;
        0x4d => I32LeU, "i32.le_u", none;
        0x4e => I32GeS, "i32.ge_s", none;
        0x4f => I32GeU, "i32.ge_u", none;
        0x50 => I64Eqz, "i64.eqz", none;
        0x51 => I64Eq, "i64.eq", none;
        0x52 => I64Ne, "i64.ne", none;
        0x53 => I64LtS, "i64.lt_s", none;
        0x54 => I64LtU, "i64.lt_u", none;
        0x55 => I64GtS, "i64.gt_s", none;
        0x56 => I64GtU, "i64.gt_u", none;
        0x57 => I64LeS, "i64.le_s", none;
        0x58 => I64LeU, "i64.le_u", none;
        0x59 => I64GeS, "i64.ge_s", none;
        0x5a => I64GeU, "i64.ge_u", none;
        0x5b => F32Eq, "f32.eq", none;
        0x5c => F32Ne, "f32.ne", none;
        0x5d => F32Lt, "f32.lt", none;
        0x5e => F32Gt, "f32.gt", none;
        0x5f => F32Le, "f32.le", none;
        0x60 => F32Ge, "f32.ge", none;
        0x61 => F64Eq, "f64.eq", none;
        0x62 => F64Ne, "f64.ne", none;
        0x63 => F64Lt, "f64.lt", none;
        0x64 => F64Gt, "f64.gt", none;
        0x65 => F64Le, "f64.le", none;
        0x66 => F64Ge, "f64.ge", none;
        0x67 => I32Clz, "i32.clz", none;
        0x68 => I32Ctz, "i32.ctz", none;
        0x69 => I32Popcnt, "i32.popcnt", none;
        0x6a => I32Add, "i32.add", none;
        0x6b => I32Sub, "i32.sub", none;
        0x6c => I32Mul, "i32.mul", none;
        0x6d => I32DivS, "i32.div_s", none;
        0x6e => I32DivU, "i32.div_u", none;
        0x6f => I32RemS, "i32.rem_s", none;
        0x70 => I32RemU, "i32.rem_u", none;
        0x71 => I32And, "i32.and", none;
        0x72 => I32Or, "i32.or", none;
        0x73 => I32Xor, "i32.xor", none;
        0x74 => I32Shl, "i32.shl", none;
        0x75 => I32ShrS, "i32.shr_s", none;
        0x76 => I32ShrU, "i32.shr_u", none;
        0x77 => I32Rotl, "i32.rotl", none;
        0x78 => I32Rotr, "i32.rotr", none;
        0x79 => I64Clz, "i64.clz", none;
        0x7a => I64Ctz, "i64.ctz", none;
        0x7b => I64Popcnt, "i64.popcnt", none;
        0x7c => I64Add, "i64.add", none;
        0x7d => I64Sub, "i64.sub", none;
        0x7e => I64Mul, "i64.mul", none;
        0x7f => I64DivS, "i64.div_s", none;
        0x80 => I64DivU, "i64.div_u", none;
        0x81 => I64RemS, "i64.rem_s", none;
        0x82 => I64RemU, "i64.rem_u", none;
        0x83 => I64And, "i64.and", none;
        0x84 => I64Or, "i64.or", none;
        0x85 => I64Xor, "i64.xor", none;
        0x86 => I64Shl, "i64.shl", none;
        0x87 => I64ShrS, "i64.shr_s", none;
        0x88 => I64ShrU, "i64.shr_u", none;
        0x89 => I64Rotl, "i64.rotl", none;
        0x8a => I64Rotr, "i64.rotr", none;
        0x8b => F32Abs, "f32.abs", none;
        0x8c => F32Neg, "f32.neg", none;
        0x8d => F32Ceil, "f32.ceil", none;
        0x8e => F32Floor, "f32.floor", none;
        0x8f => F32Trunc, "f32.trunc", none;
        0x90 => F32Nearest, "f32.nearest", none;
        0x91 => F32Sqrt, "f32.sqrt", none;
        0x92 => F32Add, "f32.add", none;
        0x93 => F32Sub, "f32.sub", none;
        0x94 => F32Mul, "f32.mul", none;
        0x95 => F32Div, "f32.div", none;
        0x96 => F32Min, "f32.min", none;
        0x97 => F32Max, "f32.max", none;
        0x98 => F32Copysign, "f32.copysign", none;
        0x99 => F64Abs, "f64.abs", none;
        0x9a => F64Neg, "f64.neg", none;
        0x9b => F64Ceil, "f64.ceil", none;
        0x9c => F64Floor, "f64.floor", none;
        0x9d => F64Trunc, "f64.trunc", none;
        0x9e => F64Nearest, "f64.nearest", none;
        0x9f => F64Sqrt, "f64.sqrt", none;
        0xa0 => F64Add, "f64.add", none;
        0xa1 => F64Sub, "f64.sub", none;
        0xa2 => F64Mul, "f64.mul", none;
        0xa3 => F64Div, "f64.div", none;
        0xa4 => F64Min, "f64.min", none;
        0xa5 => F64Max, "f64.max", none;
        0xa6 => F64Copysign, "f64.copysign", none;
        0xa7 => I32WrapI64, "i32.wrap_i64", none;
        0xa8 => I32TruncF32S, "i32.trunc_f32_s", none;
        0xa9 => I32TruncF32U, "i32.trunc_f32_u", none;
        0xaa => I32TruncF64S, "i32.trunc_f64_s", none;
        0xab => I32TruncF64U, "i32.trunc_f64_u", none;
        0xac => I64ExtendI32S, "i64.extend_i32_s", none;
        0xad => I64ExtendI32U, "i64.extend_i32_u", none;
        0xae => I64TruncF32S, "i64.trunc_f32_s", none;
        0xaf => I64TruncF32U, "i64.trunc_f32_u", none;
        0xb0 => I64TruncF64S, "i64.trunc_f64_s", none;
        0xb1 => I64TruncF64U, "i64.trunc_f64_u", none;
        0xb2 => F32ConvertI32S, "f32.convert_i32_s", none;
        0xb3 => F32ConvertI32U, "f32.convert_i32_u", none;
        0xb4 => F32ConvertI64S, "f32.convert_i64_s", none;
        0xb5 => F32ConvertI64U, "f32.convert_i64_u", none;
        0xb6 => F32DemoteF64, "f32.demote_f64", none;
        0xb7 => F64ConvertI32S, "f64.convert_i32_s", none;
        0xb8 => F64ConvertI32U, "f64.convert_i32_u", none;
        0xb9 => F64ConvertI64S, "f64.convert_i64_s", none;
        0xba => F64ConvertI64U, "f64.convert_i64_u", none;
        0xbb => F64PromoteF32, "f64.promote_f32", none;
        0xbc => I32ReinterpretF32, "i32.reinterpret_f32", none;
        0xbd => I64ReinterpretF64, "i64.reinterpret_f64", none;
        0xbe => F32ReinterpretI32, "f32.reinterpret_i32", none;
        0xbf => F64ReinterpretI64, "f64.reinterpret_i64", none;
        0xc0 => I32Extend8S, "i32.extend8_s", none, if sign_extension;
        0xc1 => I32Extend16S, "i32.extend16_s", none, if sign_extension;
        0xc2 => I64Extend8S, "i64.extend8_s", none, if sign_extension;
        0xc3 => I64Extend16S, "i64.extend16_s", none, if sign_extension;
        0xc4 => I64Extend32S, "i64.extend32_s", none, if sign_extension;
        0xd0 => RefNull, "ref.null", none, if reference_types;
        0xd1 => RefIsNull, "ref.is_null", none, if reference_types;
        0xd2 => RefFunc, "ref.func", index, if reference_types;
    }
    prefixed {
        0xfc 0 => I32TruncSatF32S, "i32.trunc_sat_f32_s", none, if saturating_float_to_int;
        0xfc 1 => I32TruncSatF32U, "i32.trunc_sat_f32_u", none, if saturating_float_to_int;
        0xfc 2 => I32TruncSatF64S, "i32.trunc_sat_f64_s", none, if saturating_float_to_int;
        0xfc 3 => I32TruncSatF64U, "i32.trunc_sat_f64_u", none, if saturating_float_to_int;
        0xfc 4 => I64TruncSatF32S, "i64.trunc_sat_f32_s", none, if saturating_float_to_int;
        0xfc 5 => I64TruncSatF32U, "i64.trunc_sat_f32_u", none, if saturating_float_to_int;
        0xfc 6 => I64TruncSatF64S, "i64.trunc_sat_f64_s", none, if saturating_float_to_int;
        0xfc 7 => I64TruncSatF64U, "i64.trunc_sat_f64_u", none, if saturating_float_to_int;
        0xfc 8 => MemoryInit, "memory.init", init, if bulk_memory;
        0xfc 9 => DataDrop, "data.drop", index, if bulk_memory;
        0xfc 10 => MemoryCopy, "memory.copy", copy, if bulk_memory;
        0xfc 11 => MemoryFill, "memory.fill", reserved, if bulk_memory;
        0xfc 12 => TableInit, "table.init", init, if bulk_memory;
        0xfc 13 => ElemDrop, "elem.drop", index, if bulk_memory;
        0xfc 14 => TableCopy, "table.copy", copy, if bulk_memory;
        0xfc 15 => TableGrow, "table.grow", index, if reference_types;
        0xfc 16 => TableSize, "table.size", index, if reference_types;
        0xfc 17 => TableFill, "table.fill", index, if reference_types;
        0xfd 0 => V128Load, "v128.load", memarg, if simd;
        0xfd 1 => V128Load8X8S, "v128.load8x8_s", memarg, if simd;
        0xfd 2 => V128Load8X8U, "v128.load8x8_u", memarg, if simd;
        0xfd 3 => V128Load16X4S, "v128.load16x4_s", memarg, if simd;
        0xfd 4 => V128Load16X4U, "v128.load16x4_u", memarg, if simd;
        0xfd 5 => V128Load32X2S, "v128.load32x2_s", memarg, if simd;
        0xfd 6 => V128Load32X2U, "v128.load32x2_u", memarg, if simd;
        0xfd 7 => V128Load8Splat, "v128.load8_splat", memarg, if simd;
        0xfd 8 => V128Load16Splat, "v128.load16_splat", memarg, if simd;
        0xfd 9 => V128Load32Splat, "v128.load32_splat", memarg, if simd;
        0xfd 10 => V128Load64Splat, "v128.load64_splat", memarg, if simd;
        0xfd 11 => V128Store, "v128.store", memarg, if simd;
        0xfd 12 => V128Const, "v128.const", v128, if simd;
        0xfd 13 => I8X16Shuffle, "i8x16.shuffle", shuffle, if simd;
        0xfd 14 => I8X16Swizzle, "i8x16.swizzle", none, if simd;
        0xfd 15 => I8X16Splat, "i8x16.splat", none, if simd;
        0xfd 16 => I16X8Splat, "i16x8.splat", none, if simd;
        0xfd 17 => I32X4Splat, "i32x4.splat", none, if simd;
        0xfd 18 => I64X2Splat, "i64x2.splat", none, if simd;
        0xfd 19 => F32X4Splat, "f32x4.splat", none, if simd;
        0xfd 20 => F64X2Splat, "f64x2.splat", none, if simd;
        0xfd 21 => I8X16ExtractLaneS, "i8x16.extract_lane_s", lane, if simd;
        0xfd 22 => I8X16ExtractLaneU, "i8x16.extract_lane_u", lane, if simd;
        0xfd 23 => I8X16ReplaceLane, "i8x16.replace_lane", lane, if simd;
        0xfd 24 => I16X8ExtractLaneS, "i16x8.extract_lane_s", lane, if simd;
        0xfd 25 => I16X8ExtractLaneU, "i16x8.extract_lane_u", lane, if simd;
        0xfd 26 => I16X8ReplaceLane, "i16x8.replace_lane", lane, if simd;
        0xfd 27 => I32X4ExtractLane, "i32x4.extract_lane", lane, if simd;
        0xfd 28 => I32X4ReplaceLane, "i32x4.replace_lane", lane, if simd;
        0xfd 29 => I64X2ExtractLane, "i64x2.extract_lane", lane, if simd;
        0xfd 30 => I64X2ReplaceLane, "i64x2.replace_lane", lane, if simd;
        0xfd 31 => F32X4ExtractLane, "f32x4.extract_lane", lane, if simd;
        0xfd 32 => F32X4ReplaceLane, "f32x4.replace_lane", lane, if simd;
        0xfd 33 => F64X2ExtractLane, "f64x2.extract_lane", lane, if simd;
        0xfd 34 => F64X2ReplaceLane, "f64x2.replace_lane", lane, if simd;
        0xfd 35 => I8X16Eq, "i8x16.eq", none, if simd;
        0xfd 36 => I8X16Ne, "i8x16.ne", none, if simd;
        0xfd 37 => I8X16LtS, "i8x16.lt_s", none, if simd;
        0xfd 38 => I8X16LtU, "i8x16.lt_u", none, if simd;
        0xfd 39 => I8X16GtS, "i8x16.gt_s", none, if simd;
        0xfd 40 => I8X16GtU, "i8x16.gt_u", none, if simd;
        0xfd 41 => I8X16LeS, "i8x16.le_s", none, if simd;
        0xfd 42 => I8X16LeU, "i8x16.le_u", none, if simd;
        0xfd 43 => I8X16GeS, "i8x16.ge_s", none, if simd;
        0xfd 44 => I8X16GeU, "i8x16.ge_u", none, if simd;
        0xfd 45 => I16X8Eq, "i16x8.eq", none, if simd;
        0xfd 46 => I16X8Ne, "i16x8.ne", none, if simd;
        0xfd 47 => I16X8LtS, "i16x8.lt_s", none, if simd;
        0xfd 48 => I16X8LtU, "i16x8.lt_u", none, if simd;
        0xfd 49 => I16X8GtS, "i16x8.gt_s", none, if simd;
        0xfd 50 => I16X8GtU, "i16x8.gt_u", none, if simd;
        0xfd 51 => I16X8LeS, "i16x8.le_s", none, if simd;
        0xfd 52 => I16X8LeU, "i16x8.le_u", none, if simd;
        0xfd 53 => I16X8GeS, "i16x8.ge_s", none, if simd;
        0xfd 54 => I16X8GeU, "i16x8.ge_u", none, if simd;
        0xfd 55 => I32X4Eq, "i32x4.eq", none, if simd;
        0xfd 56 => I32X4Ne, "i32x4.ne", none, if simd;
        0xfd 57 => I32X4LtS, "i32x4.lt_s", none, if simd;
        0xfd 58 => I32X4LtU, "i32x4.lt_u", none, if simd;
        0xfd 59 => I32X4GtS, "i32x4.gt_s", none, if simd;
        0xfd 60 => I32X4GtU, "i32x4.gt_u", none, if simd;
        0xfd 61 => I32X4LeS, "i32x4.le_s", none, if simd;
        0xfd 62 => I32X4LeU, "i32x4.le_u", none, if simd;
        0xfd 63 => I32X4GeS, "i32x4.ge_s", none, if simd;
        0xfd 64 => I32X4GeU, "i32x4.ge_u", none, if simd;
        0xfd 65 => F32X4Eq, "f32x4.eq", none, if simd;
        0xfd 66 => F32X4Ne, "f32x4.ne", none, if simd;
        0xfd 67 => F32X4Lt, "f32x4.lt", none, if simd;
        0xfd 68 => F32X4Gt, "f32x4.gt", none, if simd;
        0xfd 69 => F32X4Le, "f32x4.le", none, if simd;
        0xfd 70 => F32X4Ge, "f32x4.ge", none, if simd;
        0xfd 71 => F64X2Eq, "f64x2.eq", none, if simd;
        0xfd 72 => F64X2Ne, "f64x2.ne", none, if simd;
        0xfd 73 => F64X2Lt, "f64x2.lt", none, if simd;
        0xfd 74 => F64X2Gt, "f64x2.gt", none, if simd;
        0xfd 75 => F64X2Le, "f64x2.le", none, if simd;
        0xfd 76 => F64X2Ge, "f64x2.ge", none, if simd;
        0xfd 77 => V128Not, "v128.not", none, if simd;
        0xfd 78 => V128And, "v128.and", none, if simd;
        0xfd 79 => V128Andnot, "v128.andnot", none, if simd;
        0xfd 80 => V128Or, "v128.or", none, if simd;
        0xfd 81 => V128Xor, "v128.xor", none, if simd;
        0xfd 82 => V128Bitselect, "v128.bitselect", none, if simd;
        0xfd 83 => V128AnyTrue, "v128.any_true", none, if simd;
        0xfd 84 => V128Load8Lane, "v128.load8_lane", memarg_lane, if simd;
        0xfd 85 => V128Load16Lane, "v128.load16_lane", memarg_lane, if simd;
        0xfd 86 => V128Load32Lane, "v128.load32_lane", memarg_lane, if simd;
        0xfd 87 => V128Load64Lane, "v128.load64_lane", memarg_lane, if simd;
        0xfd 88 => V128Store8Lane, "v128.store8_lane", memarg_lane, if simd;
        0xfd 89 => V128Store16Lane, "v128.store16_lane", memarg_lane, if simd;
        0xfd 90 => V128Store32Lane, "v128.store32_lane", memarg_lane, if simd;
        0xfd 91 => V128Store64Lane, "v128.store64_lane", memarg_lane, if simd;
        0xfd 92 => V128Load32Zero, "v128.load32_zero", memarg, if simd;
        0xfd 93 => V128Load64Zero, "v128.load64_zero", memarg, if simd;
        0xfd 94 => F32X4DemoteF64X2Zero, "f32x4.demote_f64x2_zero", none, if simd;
        0xfd 95 => F64X2PromoteLowF32X4, "f64x2.promote_low_f32x4", none, if simd;
        0xfd 96 => I8X16Abs, "i8x16.abs", none, if simd;
        0xfd 97 => I8X16Neg, "i8x16.neg", none, if simd;
        0xfd 98 => I8X16Popcnt, "i8x16.popcnt", none, if simd;
        0xfd 99 => I8X16AllTrue, "i8x16.all_true", none, if simd;
        0xfd 100 => I8X16Bitmask, "i8x16.bitmask", none, if simd;
        0xfd 101 => I8X16NarrowI16X8S, "i8x16.narrow_i16x8_s", none, if simd;
        0xfd 102 => I8X16NarrowI16X8U, "i8x16.narrow_i16x8_u", none, if simd;
        0xfd 103 => F32X4Ceil, "f32x4.ceil", none, if simd;
        0xfd 104 => F32X4Floor, "f32x4.floor", none, if simd;
        0xfd 105 => F32X4Trunc, "f32x4.trunc", none, if simd;
        0xfd 106 => F32X4Nearest, "f32x4.nearest", none, if simd;
        0xfd 107 => I8X16Shl, "i8x16.shl", none, if simd;
        0xfd 108 => I8X16ShrS, "i8x16.shr_s", none, if simd;
        0xfd 109 => I8X16ShrU, "i8x16.shr_u", none, if simd;
        0xfd 110 => I8X16Add, "i8x16.add", none, if simd;
        0xfd 111 => I8X16AddSatS, "i8x16.add_sat_s", none, if simd;
        0xfd 112 => I8X16AddSatU, "i8x16.add_sat_u", none, if simd;
        0xfd 113 => I8X16Sub, "i8x16.sub", none, if simd;
        0xfd 114 => I8X16SubSatS, "i8x16.sub_sat_s", none, if simd;
        0xfd 115 => I8X16SubSatU, "i8x16.sub_sat_u", none, if simd;
        0xfd 116 => F64X2Ceil, "f64x2.ceil", none, if simd;
        0xfd 117 => F64X2Floor, "f64x2.floor", none, if simd;
        0xfd 118 => I8X16MinS, "i8x16.min_s", none, if simd;
        0xfd 119 => I8X16MinU, "i8x16.min_u", none, if simd;
        0xfd 120 => I8X16MaxS, "i8x16.max_s", none, if simd;
        0xfd 121 => I8X16MaxU, "i8x16.max_u", none, if simd;
        0xfd 122 => F64X2Trunc, "f64x2.trunc", none, if simd;
        0xfd 123 => I8X16AvgrU, "i8x16.avgr_u", none, if simd;
        0xfd 124 => I16X8ExtaddPairwiseI8X16S, "i16x8.extadd_pairwise_i8x16_s", none, if simd;
        0xfd 125 => I16X8ExtaddPairwiseI8X16U, "i16x8.extadd_pairwise_i8x16_u", none, if simd;
        0xfd 126 => I32X4ExtaddPairwiseI16X8S, "i32x4.extadd_pairwise_i16x8_s", none, if simd;
        0xfd 127 => I32X4ExtaddPairwiseI16X8U, "i32x4.extadd_pairwise_i16x8_u", none, if simd;
        0xfd 128 => I16X8Abs, "i16x8.abs", none, if simd;
        0xfd 129 => I16X8Neg, "i16x8.neg", none, if simd;
        0xfd 130 => I16X8Q15MulrSatS, "i16x8.q15mulr_sat_s", none, if simd;
        0xfd 131 => I16X8AllTrue, "i16x8.all_true", none, if simd;
        0xfd 132 => I16X8Bitmask, "i16x8.bitmask", none, if simd;
        0xfd 133 => I16X8NarrowI32X4S, "i16x8.narrow_i32x4_s", none, if simd;
        0xfd 134 => I16X8NarrowI32X4U, "i16x8.narrow_i32x4_u", none, if simd;
        0xfd 135 => I16X8ExtendLowI8X16S, "i16x8.extend_low_i8x16_s", none, if simd;
        0xfd 136 => I16X8ExtendHighI8X16S, "i16x8.extend_high_i8x16_s", none, if simd;
        0xfd 137 => I16X8ExtendLowI8X16U, "i16x8.extend_low_i8x16_u", none, if simd;
        0xfd 138 => I16X8ExtendHighI8X16U, "i16x8.extend_high_i8x16_u", none, if simd;
        0xfd 139 => I16X8Shl, "i16x8.shl", none, if simd;
        0xfd 140 => I16X8ShrS, "i16x8.shr_s", none, if simd;
        0xfd 141 => I16X8ShrU, "i16x8.shr_u", none, if simd;
        0xfd 142 => I16X8Add, "i16x8.add", none, if simd;
        0xfd 143 => I16X8AddSatS, "i16x8.add_sat_s", none, if simd;
        0xfd 144 => I16X8AddSatU, "i16x8.add_sat_u", none, if simd;
        0xfd 145 => I16X8Sub, "i16x8.sub", none, if simd;
        0xfd 146 => I16X8SubSatS, "i16x8.sub_sat_s", none, if simd;
        0xfd 147 => I16X8SubSatU, "i16x8.sub_sat_u", none, if simd;
        0xfd 148 => F64X2Nearest, "f64x2.nearest", none, if simd;
        0xfd 149 => I16X8Mul, "i16x8.mul", none, if simd;
        0xfd 150 => I16X8MinS, "i16x8.min_s", none, if simd;
        0xfd 151 => I16X8MinU, "i16x8.min_u", none, if simd;
        0xfd 152 => I16X8MaxS, "i16x8.max_s", none, if simd;
        0xfd 153 => I16X8MaxU, "i16x8.max_u", none, if simd;
        0xfd 155 => I16X8AvgrU, "i16x8.avgr_u", none, if simd;
        0xfd 156 => I16X8ExtmulLowI8X16S, "i16x8.extmul_low_i8x16_s", none, if simd;
        0xfd 157 => I16X8ExtmulHighI8X16S, "i16x8.extmul_high_i8x16_s", none, if simd;
        0xfd 158 => I16X8ExtmulLowI8X16U, "i16x8.extmul_low_i8x16_u", none, if simd;
        0xfd 159 => I16X8ExtmulHighI8X16U, "i16x8.extmul_high_i8x16_u", none, if simd;
        0xfd 160 => I32X4Abs, "i32x4.abs", none, if simd;
        0xfd 161 => I32X4Neg, "i32x4.neg", none, if simd;
        0xfd 163 => I32X4AllTrue, "i32x4.all_true", none, if simd;
        0xfd 164 => I32X4Bitmask, "i32x4.bitmask", none, if simd;
        0xfd 167 => I32X4ExtendLowI16X8S, "i32x4.extend_low_i16x8_s", none, if simd;
        0xfd 168 => I32X4ExtendHighI16X8S, "i32x4.extend_high_i16x8_s", none, if simd;
        0xfd 169 => I32X4ExtendLowI16X8U, "i32x4.extend_low_i16x8_u", none, if simd;
        0xfd 170 => I32X4ExtendHighI16X8U, "i32x4.extend_high_i16x8_u", none, if simd;
        0xfd 171 => I32X4Shl, "i32x4.shl", none, if simd;
        0xfd 172 => I32X4ShrS, "i32x4.shr_s", none, if simd;
        0xfd 173 => I32X4ShrU, "i32x4.shr_u", none, if simd;
        0xfd 174 => I32X4Add, "i32x4.add", none, if simd;
        0xfd 177 => I32X4Sub, "i32x4.sub", none, if simd;
        0xfd 181 => I32X4Mul, "i32x4.mul", none, if simd;
        0xfd 182 => I32X4MinS, "i32x4.min_s", none, if simd;
        0xfd 183 => I32X4MinU, "i32x4.min_u", none, if simd;
        0xfd 184 => I32X4MaxS, "i32x4.max_s", none, if simd;
        0xfd 185 => I32X4MaxU, "i32x4.max_u", none, if simd;
        0xfd 186 => I32X4DotI16X8S, "i32x4.dot_i16x8_s", none, if simd;
        0xfd 188 => I32X4ExtmulLowI16X8S, "i32x4.extmul_low_i16x8_s", none, if simd;
        0xfd 189 => I32X4ExtmulHighI16X8S, "i32x4.extmul_high_i16x8_s", none, if simd;
        0xfd 190 => I32X4ExtmulLowI16X8U, "i32x4.extmul_low_i16x8_u", none, if simd;
        0xfd 191 => I32X4ExtmulHighI16X8U, "i32x4.extmul_high_i16x8_u", none, if simd;
        0xfd 192 => I64X2Abs, "i64x2.abs", none, if simd;
        0xfd 193 => I64X2Neg, "i64x2.neg", none, if simd;
        0xfd 195 => I64X2AllTrue, "i64x2.all_true", none, if simd;
        0xfd 196 => I64X2Bitmask, "i64x2.bitmask", none, if simd;
        0xfd 199 => I64X2ExtendLowI32X4S, "i64x2.extend_low_i32x4_s", none, if simd;
        0xfd 200 => I64X2ExtendHighI32X4S, "i64x2.extend_high_i32x4_s", none, if simd;
        0xfd 201 => I64X2ExtendLowI32X4U, "i64x2.extend_low_i32x4_u", none, if simd;
        0xfd 202 => I64X2ExtendHighI32X4U, "i64x2.extend_high_i32x4_u", none, if simd;
        0xfd 203 => I64X2Shl, "i64x2.shl", none, if simd;
        0xfd 204 => I64X2ShrS, "i64x2.shr_s", none, if simd;
        0xfd 205 => I64X2ShrU, "i64x2.shr_u", none, if simd;
        0xfd 206 => I64X2Add, "i64x2.add", none, if simd;
        0xfd 210 => I64X2Sub, "i64x2.sub", none, if simd;
        0xfd 214 => I64X2Mul, "i64x2.mul", none, if simd;
        0xfd 215 => I64X2Eq, "i64x2.eq", none, if simd;
        0xfd 216 => I64X2Ne, "i64x2.ne", none, if simd;
        0xfd 217 => I64X2LtS, "i64x2.lt_s", none, if simd;
        0xfd 218 => I64X2GtS, "i64x2.gt_s", none, if simd;
        0xfd 219 => I64X2LeS, "i64x2.le_s", none, if simd;
        0xfd 220 => I64X2GeS, "i64x2.ge_s", none, if simd;
        0xfd 221 => I64X2ExtmulLowI32X4S, "i64x2.extmul_low_i32x4_s", none, if simd;
        0xfd 222 => I64X2ExtmulHighI32X4S, "i64x2.extmul_high_i32x4_s", none, if simd;
        0xfd 223 => I64X2ExtmulLowI32X4U, "i64x2.extmul_low_i32x4_u", none, if simd;
        0xfd 224 => I64X2ExtmulHighI32X4U, "i64x2.extmul_high_i32x4_u", none, if simd;
        0xfd 225 => F32X4Abs, "f32x4.abs", none, if simd;
        0xfd 226 => F32X4Neg, "f32x4.neg", none, if simd;
        0xfd 228 => F32X4Sqrt, "f32x4.sqrt", none, if simd;
        0xfd 229 => F32X4Add, "f32x4.add", none, if simd;
        0xfd 230 => F32X4Sub, "f32x4.sub", none, if simd;
        0xfd 231 => F32X4Mul, "f32x4.mul", none, if simd;
        0xfd 232 => F32X4Div, "f32x4.div", none, if simd;
        0xfd 233 => F32X4Min, "f32x4.min", none, if simd;
        0xfd 234 => F32X4Max, "f32x4.max", none, if simd;
        0xfd 235 => F32X4Pmin, "f32x4.pmin", none, if simd;
        0xfd 236 => F32X4Pmax, "f32x4.pmax", none, if simd;
        0xfd 237 => F64X2Abs, "f64x2.abs", none, if simd;
        0xfd 238 => F64X2Neg, "f64x2.neg", none, if simd;
        0xfd 240 => F64X2Sqrt, "f64x2.sqrt", none, if simd;
        0xfd 241 => F64X2Add, "f64x2.add", none, if simd;
        0xfd 242 => F64X2Sub, "f64x2.sub", none, if simd;
        0xfd 243 => F64X2Mul, "f64x2.mul", none, if simd;
        0xfd 244 => F64X2Div, "f64x2.div", none, if simd;
        0xfd 245 => F64X2Min, "f64x2.min", none, if simd;
        0xfd 246 => F64X2Max, "f64x2.max", none, if simd;
        0xfd 247 => F64X2Pmin, "f64x2.pmin", none, if simd;
        0xfd 248 => F64X2Pmax, "f64x2.pmax", none, if simd;
        0xfd 249 => I32X4TruncSatF32X4S, "i32x4.trunc_sat_f32x4_s", none, if simd;
        0xfd 250 => I32X4TruncSatF32X4U, "i32x4.trunc_sat_f32x4_u", none, if simd;
        0xfd 251 => F32X4ConvertI32X4S, "f32x4.convert_i32x4_s", none, if simd;
        0xfd 252 => F32X4ConvertI32X4U, "f32x4.convert_i32x4_u", none, if simd;
        0xfd 253 => I32X4TruncSatF64X2SZero, "i32x4.trunc_sat_f64x2_s_zero", none, if simd;
        0xfd 254 => I32X4TruncSatF64X2UZero, "i32x4.trunc_sat_f64x2_u_zero", none, if simd;
        0xfd 255 => F64X2ConvertLowI32X4S, "f64x2.convert_low_i32x4_s", none, if simd;
        0xfd 256 => F64X2ConvertLowI32X4U, "f64x2.convert_low_i32x4_u", none, if simd;
        0xfe 0x00 => MemoryAtomicNotify, "memory.atomic.notify", memarg, if threads;
        0xfe 0x01 => MemoryAtomicWait32, "memory.atomic.wait32", memarg, if threads;
        0xfe 0x02 => MemoryAtomicWait64, "memory.atomic.wait64", memarg, if threads;
        0xfe 0x03 => AtomicFence, "atomic.fence", reserved, if threads;
        0xfe 0x10 => I32AtomicLoad, "i32.atomic.load", memarg, if threads;
        0xfe 0x11 => I64AtomicLoad, "i64.atomic.load", memarg, if threads;
        0xfe 0x12 => I32AtomicLoad8U, "i32.atomic.load8_u", memarg, if threads;
        0xfe 0x13 => I32AtomicLoad16U, "i32.atomic.load16_u", memarg, if threads;
        0xfe 0x14 => I64AtomicLoad8U, "i64.atomic.load8_u", memarg, if threads;
        0xfe 0x15 => I64AtomicLoad16U, "i64.atomic.load16_u", memarg, if threads;
        0xfe 0x16 => I64AtomicLoad32U, "i64.atomic.load32_u", memarg, if threads;
        0xfe 0x17 => I32AtomicStore, "i32.atomic.store", memarg, if threads;
        0xfe 0x18 => I64AtomicStore, "i64.atomic.store", memarg, if threads;
        0xfe 0x19 => I32AtomicStore8, "i32.atomic.store8", memarg, if threads;
        0xfe 0x1a => I32AtomicStore16, "i32.atomic.store16", memarg, if threads;
        0xfe 0x1b => I64AtomicStore8, "i64.atomic.store8", memarg, if threads;
        0xfe 0x1c => I64AtomicStore16, "i64.atomic.store16", memarg, if threads;
        0xfe 0x1d => I64AtomicStore32, "i64.atomic.store32", memarg, if threads;
        0xfe 0x1e => I32AtomicRmwAdd, "i32.atomic.rmw.add", memarg, if threads;
        0xfe 0x1f => I64AtomicRmwAdd, "i64.atomic.rmw.add", memarg, if threads;
        0xfe 0x20 => I32AtomicRmw8AddU, "i32.atomic.rmw8.add_u", memarg, if threads;
        0xfe 0x21 => I32AtomicRmw16AddU, "i32.atomic.rmw16.add_u", memarg, if threads;
        0xfe 0x22 => I64AtomicRmw8AddU, "i64.atomic.rmw8.add_u", memarg, if threads;
        0xfe 0x23 => I64AtomicRmw16AddU, "i64.atomic.rmw16.add_u", memarg, if threads;
        0xfe 0x24 => I64AtomicRmw32AddU, "i64.atomic.rmw32.add_u", memarg, if threads;
        0xfe 0x25 => I32AtomicRmwSub, "i32.atomic.rmw.sub", memarg, if threads;
        0xfe 0x26 => I64AtomicRmwSub, "i64.atomic.rmw.sub", memarg, if threads;
        0xfe 0x27 => I32AtomicRmw8SubU, "i32.atomic.rmw8.sub_u", memarg, if threads;
        0xfe 0x28 => I32AtomicRmw16SubU, "i32.atomic.rmw16.sub_u", memarg, if threads;
        0xfe 0x29 => I64AtomicRmw8SubU, "i64.atomic.rmw8.sub_u", memarg, if threads;
        0xfe 0x2a => I64AtomicRmw16SubU, "i64.atomic.rmw16.sub_u", memarg, if threads;
        0xfe 0x2b => I64AtomicRmw32SubU, "i64.atomic.rmw32.sub_u", memarg, if threads;
        0xfe 0x2c => I32AtomicRmwAnd, "i32.atomic.rmw.and", memarg, if threads;
        0xfe 0x2d => I64AtomicRmwAnd, "i64.atomic.rmw.and", memarg, if threads;
        0xfe 0x2e => I32AtomicRmw8AndU, "i32.atomic.rmw8.and_u", memarg, if threads;
        0xfe 0x2f => I32AtomicRmw16AndU, "i32.atomic.rmw16.and_u", memarg, if threads;
        0xfe 0x30 => I64AtomicRmw8AndU, "i64.atomic.rmw8.and_u", memarg, if threads;
        0xfe 0x31 => I64AtomicRmw16AndU, "i64.atomic.rmw16.and_u", memarg, if threads;
        0xfe 0x32 => I64AtomicRmw32AndU, "i64.atomic.rmw32.and_u", memarg, if threads;
        0xfe 0x33 => I32AtomicRmwOr, "i32.atomic.rmw.or", memarg, if threads;
        0xfe 0x34 => I64AtomicRmwOr, "i64.atomic.rmw.or", memarg, if threads;
        0xfe 0x35 => I32AtomicRmw8OrU, "i32.atomic.rmw8.or_u", memarg, if threads;
        0xfe 0x36 => I32AtomicRmw16OrU, "i32.atomic.rmw16.or_u", memarg, if threads;
        0xfe 0x37 => I64AtomicRmw8OrU, "i64.atomic.rmw8.or_u", memarg, if threads;
        0xfe 0x38 => I64AtomicRmw16OrU, "i64.atomic.rmw16.or_u", memarg, if threads;
        0xfe 0x39 => I64AtomicRmw32OrU, "i64.atomic.rmw32.or_u", memarg, if threads;
        0xfe 0x3a => I32AtomicRmwXor, "i32.atomic.rmw.xor", memarg, if threads;
        0xfe 0x3b => I64AtomicRmwXor, "i64.atomic.rmw.xor", memarg, if threads;
        0xfe 0x3c => I32AtomicRmw8XorU, "i32.atomic.rmw8.xor_u", memarg, if threads;
        0xfe 0x3d => I32AtomicRmw16XorU, "i32.atomic.rmw16.xor_u", memarg, if threads;
        0xfe 0x3e => I64AtomicRmw8XorU, "i64.atomic.rmw8.xor_u", memarg, if threads;
        0xfe 0x3f => I64AtomicRmw16XorU, "i64.atomic.rmw16.xor_u", memarg, if threads;
        0xfe 0x40 => I64AtomicRmw32XorU, "i64.atomic.rmw32.xor_u", memarg, if threads;
        0xfe 0x41 => I32AtomicRmwXchg, "i32.atomic.rmw.xchg", memarg, if threads;
        0xfe 0x42 => I64AtomicRmwXchg, "i64.atomic.rmw.xchg", memarg, if threads;
        0xfe 0x43 => I32AtomicRmw8XchgU, "i32.atomic.rmw8.xchg_u", memarg, if threads;
        0xfe 0x44 => I32AtomicRmw16XchgU, "i32.atomic.rmw16.xchg_u", memarg, if threads;
        0xfe 0x45 => I64AtomicRmw8XchgU, "i64.atomic.rmw8.xchg_u", memarg, if threads;
        0xfe 0x46 => I64AtomicRmw16XchgU, "i64.atomic.rmw16.xchg_u", memarg, if threads;
        0xfe 0x47 => I64AtomicRmw32XchgU, "i64.atomic.rmw32.xchg_u", memarg, if threads;
        0xfe 0x48 => I32AtomicRmwCmpxchg, "i32.atomic.rmw.cmpxchg", memarg, if threads;
        0xfe 0x49 => I64AtomicRmwCmpxchg, "i64.atomic.rmw.cmpxchg", memarg, if threads;
        0xfe 0x4a => I32AtomicRmw8CmpxchgU, "i32.atomic.rmw8.cmpxchg_u", memarg, if threads;
        0xfe 0x4b => I32AtomicRmw16CmpxchgU, "i32.atomic.rmw16.cmpxchg_u", memarg, if threads;
        0xfe 0x4c => I64AtomicRmw8CmpxchgU, "i64.atomic.rmw8.cmpxchg_u", memarg, if threads;
        0xfe 0x4d => I64AtomicRmw16CmpxchgU, "i64.atomic.rmw16.cmpxchg_u", memarg, if threads;
        0xfe 0x4e => I64AtomicRmw32CmpxchgU, "i64.atomic.rmw32.cmpxchg_u", memarg, if threads;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_decode() {
        let mvp = Features::new();
        assert_eq!(ValueType::decode(0x7f, &mvp), Some(ValueType::I32));
        assert_eq!(ValueType::decode(0x7c, &mvp), Some(ValueType::F64));
        assert_eq!(ValueType::decode(0x10, &mvp), None);
    }

    #[test]
    fn test_value_type_feature_gates() {
        let mvp = Features::new();
        assert_eq!(ValueType::decode(0x7b, &mvp), None);
        assert_eq!(ValueType::decode(0x6f, &mvp), None);

        let all = Features::enable_all();
        assert_eq!(ValueType::decode(0x7b, &all), Some(ValueType::V128));
        assert_eq!(ValueType::decode(0x6f, &all), Some(ValueType::Anyref));
    }

    #[test]
    fn test_value_type_round_trip() {
        let all = Features::enable_all();
        for vt in [
            ValueType::I32,
            ValueType::I64,
            ValueType::F32,
            ValueType::F64,
            ValueType::V128,
            ValueType::Anyref,
        ] {
            assert_eq!(ValueType::decode(vt.encode(), &all), Some(vt));
        }
    }

    #[test]
    fn test_block_type_decode() {
        let mvp = Features::new();
        assert_eq!(BlockType::decode(0x40, &mvp), Some(BlockType::Void));
        assert_eq!(BlockType::decode(0x7f, &mvp), Some(BlockType::I32));
        assert_eq!(BlockType::decode(0x00, &mvp), None);
    }

    #[test]
    fn test_section_id_gates() {
        let mvp = Features::new();
        assert_eq!(SectionId::decode(12, &mvp), None);
        assert_eq!(
            SectionId::decode(12, &Features::new().bulk_memory()),
            Some(SectionId::DataCount)
        );
    }

    #[test]
    fn test_opcode_plain_decode() {
        let mvp = Features::new();
        assert_eq!(Opcode::decode(0x00, &mvp), Some(Opcode::Unreachable));
        assert_eq!(Opcode::decode(0x41, &mvp), Some(Opcode::I32Const));
        assert_eq!(Opcode::decode(0xbf, &mvp), Some(Opcode::F64ReinterpretI64));
        // 0x06 is try, gated on exceptions.
        assert_eq!(Opcode::decode(0x06, &mvp), None);
        assert_eq!(
            Opcode::decode(0x06, &Features::new().exceptions()),
            Some(Opcode::Try)
        );
    }

    #[test]
    fn test_opcode_prefixed_decode() {
        let features = Features::new().saturating_float_to_int();
        assert_eq!(
            Opcode::decode_prefixed(0xfc, 0, &features),
            Some(Opcode::I32TruncSatF32S)
        );
        // Bulk ops share the prefix but have their own gate.
        assert_eq!(Opcode::decode_prefixed(0xfc, 8, &features), None);
        assert_eq!(
            Opcode::decode_prefixed(0xfc, 8, &Features::new().bulk_memory()),
            Some(Opcode::MemoryInit)
        );
    }

    #[test]
    fn test_opcode_prefixed_encode() {
        let mut out = Vec::new();
        Opcode::MemoryInit.encode(&mut out);
        assert_eq!(out, vec![0xfc, 0x08]);

        let mut out = Vec::new();
        Opcode::F64X2ConvertLowI32X4U.encode(&mut out);
        assert_eq!(out, vec![0xfd, 0x80, 0x02]);
    }

    #[test]
    fn test_prefix_byte_gating() {
        let mvp = Features::new();
        assert!(!is_prefix_byte(0xfc, &mvp));
        assert!(is_prefix_byte(0xfc, &Features::new().bulk_memory()));
        assert!(is_prefix_byte(0xfd, &Features::new().simd()));
        assert!(is_prefix_byte(0xfe, &Features::new().threads()));
        assert!(!is_prefix_byte(0x41, &Features::enable_all()));
    }

    #[test]
    fn test_symbol_info_flags() {
        let flags = SymbolInfoFlags::decode(0x15).unwrap();
        assert_eq!(flags.binding, Binding::Weak);
        assert_eq!(flags.visibility, Visibility::Hidden);
        assert!(flags.undefined);
        assert!(!flags.explicit_name);
        assert_eq!(flags.encode(), 0x15);
        assert!(!flags.has_name());
        // Both binding bits set is undefined.
        assert_eq!(SymbolInfoFlags::decode(0x3), None);
    }

    #[test]
    fn test_relocation_addend_types() {
        assert!(RelocationType::MemoryAddrLeb.has_addend());
        assert!(RelocationType::SectionOffsetI32.has_addend());
        assert!(!RelocationType::FunctionIndexLeb.has_addend());
    }
}
