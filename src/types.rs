//! Decoded entities of the binary module format.
//!
//! Every entity is a plain value with public fields; alternatives are
//! tagged sums matched on by consumers. Entities that are logically a raw
//! byte range (expressions, segment payloads, section payloads) borrow a
//! [`Span`] of the input; entities that are parsed structure own vectors.
//! Names are borrowed byte slices; UTF-8 validity is a validation concern,
//! not a decode concern.

use std::fmt;

use fhex::ToHex;

use crate::encoding::{
    BlockType, ComdatSymbolKind, ElementType, EventAttribute, ExternalKind, LinkingSubsectionId,
    Mutability, NameSubsectionId, Opcode, RelocationType, SectionId, SymbolInfoFlags,
    SymbolInfoKind, ValueType,
};
use crate::span::Span;

/// Whether a linear memory may be shared between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shared {
    No,
    Yes,
}

/// Size bounds of a table or memory. `shared` is only `Yes` for the
/// threads-proposal flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min: u32,
    pub max: Option<u32>,
    pub shared: Shared,
}

impl Limits {
    pub fn new(min: u32) -> Self {
        Limits {
            min,
            max: None,
            shared: Shared::No,
        }
    }

    pub fn with_max(min: u32, max: u32) -> Self {
        Limits {
            min,
            max: Some(max),
            shared: Shared::No,
        }
    }
}

impl fmt::Display for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "min = {}, max = {}", self.min, max)?,
            None => write!(f, "min = {}", self.min)?,
        }
        if self.shared == Shared::Yes {
            write!(f, " shared")?;
        }
        Ok(())
    }
}

/// Memory access immediate: alignment exponent and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemArg {
    pub align_log2: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub param_types: Vec<ValueType>,
    pub result_types: Vec<ValueType>,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.param_types.iter().map(|vt| vt.text()).collect();
        let results: Vec<&str> = self.result_types.iter().map(|vt| vt.text()).collect();
        write!(
            f,
            "({}) -> {}",
            params.join(", "),
            if results.is_empty() {
                "nil".to_string()
            } else {
                results.join(", ")
            }
        )
    }
}

/// An entry of the type section: a function type behind its 0x60 form tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    pub func_type: FunctionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableType {
    pub limits: Limits,
    pub element_type: ElementType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryType {
    pub limits: Limits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalType {
    pub value_type: ValueType,
    pub mutability: Mutability,
}

impl fmt::Display for GlobalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mutability, self.value_type)
    }
}

/// Event type from the exceptions proposal. The attribute is always
/// `exception` today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventType {
    pub attribute: EventAttribute,
    pub type_index: u32,
}

/// The kind-specific payload of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDesc {
    Function(u32),
    Table(TableType),
    Memory(MemoryType),
    Global(GlobalType),
    Event(EventType),
}

impl ImportDesc {
    pub fn kind(&self) -> ExternalKind {
        match self {
            ImportDesc::Function(_) => ExternalKind::Function,
            ImportDesc::Table(_) => ExternalKind::Table,
            ImportDesc::Memory(_) => ExternalKind::Memory,
            ImportDesc::Global(_) => ExternalKind::Global,
            ImportDesc::Event(_) => ExternalKind::Event,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import<'a> {
    pub module: &'a [u8],
    pub field: &'a [u8],
    pub desc: ImportDesc,
}

impl fmt::Display for Import<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} kind = {}",
            String::from_utf8_lossy(self.module),
            String::from_utf8_lossy(self.field),
            self.desc.kind()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export<'a> {
    pub kind: ExternalKind,
    pub name: &'a [u8],
    pub index: u32,
}

/// An entry of the function section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Function {
    pub type_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub table_type: TableType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    pub memory_type: MemoryType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Global<'a> {
    pub global_type: GlobalType,
    pub init: ConstantExpression<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub event_type: EventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Start {
    pub func_index: u32,
}

/// The declared count from the data count section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCount {
    pub count: u32,
}

/// A restricted initializer expression, stored as its raw bytes including
/// the terminating `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantExpression<'a> {
    pub data: Span<'a>,
}

impl<'a> ConstantExpression<'a> {
    pub fn new(data: impl Into<Span<'a>>) -> Self {
        ConstantExpression { data: data.into() }
    }
}

/// A single `ref.null`/`ref.func` initializer from a passive element
/// segment, stored as its raw bytes including the terminating `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementExpression<'a> {
    pub data: Span<'a>,
}

impl<'a> ElementExpression<'a> {
    pub fn new(data: impl Into<Span<'a>>) -> Self {
        ElementExpression { data: data.into() }
    }
}

/// A balanced instruction sequence ending at its matching `end`, stored as
/// its raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression<'a> {
    pub data: Span<'a>,
}

impl<'a> Expression<'a> {
    pub fn new(data: impl Into<Span<'a>>) -> Self {
        Expression { data: data.into() }
    }
}

/// A run of `count` locals of one type in a code entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locals {
    pub count: u32,
    pub value_type: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code<'a> {
    pub locals: Vec<Locals>,
    pub body: Expression<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSegment<'a> {
    Active {
        table_index: u32,
        offset: ConstantExpression<'a>,
        init: Vec<u32>,
    },
    Passive {
        element_type: ElementType,
        init: Vec<ElementExpression<'a>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSegment<'a> {
    Active {
        memory_index: u32,
        offset: ConstantExpression<'a>,
        init: Span<'a>,
    },
    Passive {
        init: Span<'a>,
    },
}

/// A section with a known id; the payload is undecoded and exactly as long
/// as the declared size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownSection<'a> {
    pub id: SectionId,
    pub data: Span<'a>,
}

/// A custom (id 0) section: its name plus the remaining payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomSection<'a> {
    pub name: &'a [u8],
    pub data: Span<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    Known(KnownSection<'a>),
    Custom(CustomSection<'a>),
}

impl<'a> Section<'a> {
    /// The undecoded payload, whichever variant this is.
    pub fn data(&self) -> Span<'a> {
        match self {
            Section::Known(known) => known.data,
            Section::Custom(custom) => custom.data,
        }
    }
}

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrTableImmediate {
    pub targets: Vec<u32>,
    pub default_target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallIndirectImmediate {
    pub type_index: u32,
    pub reserved: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrOnExnImmediate {
    pub target: u32,
    pub event_index: u32,
}

/// Segment index plus the reserved memory/table byte of
/// `memory.init`/`table.init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitImmediate {
    pub segment_index: u32,
    pub reserved: u8,
}

/// The two reserved bytes of `memory.copy`/`table.copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyImmediate {
    pub src_reserved: u8,
    pub dst_reserved: u8,
}

/// The immediate operand of an instruction. Which variant appears is
/// determined by the opcode.
#[derive(Debug, Clone, PartialEq)]
pub enum Immediate {
    None,
    Block(BlockType),
    Index(u32),
    BrTable(BrTableImmediate),
    CallIndirect(CallIndirectImmediate),
    BrOnExn(BrOnExnImmediate),
    /// A reserved byte (`memory.size`, `memory.grow`, `atomic.fence`).
    Byte(u8),
    /// A SIMD lane index.
    Lane(u8),
    MemArg(MemArg),
    MemArgLane(MemArg, u8),
    S32(i32),
    S64(i64),
    F32(f32),
    F64(f64),
    V128([u8; 16]),
    Shuffle([u8; 16]),
    Init(InitImmediate),
    Copy(CopyImmediate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub immediate: Immediate,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Instruction {
            opcode,
            immediate: Immediate::None,
        }
    }

    pub fn with(opcode: Opcode, immediate: Immediate) -> Self {
        Instruction { opcode, immediate }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.text())?;
        match &self.immediate {
            Immediate::None => Ok(()),
            Immediate::Block(block_type) => write!(f, " {block_type}"),
            Immediate::Index(index) => write!(f, " {index}"),
            Immediate::BrTable(imm) => {
                for target in &imm.targets {
                    write!(f, " {target}")?;
                }
                write!(f, " {}", imm.default_target)
            }
            Immediate::CallIndirect(imm) => write!(f, " {}", imm.type_index),
            Immediate::BrOnExn(imm) => write!(f, " {} {}", imm.target, imm.event_index),
            Immediate::Byte(byte) => write!(f, " {byte}"),
            Immediate::Lane(lane) => write!(f, " {lane}"),
            Immediate::MemArg(memarg) => {
                write!(f, " align={} offset={}", memarg.align_log2, memarg.offset)
            }
            Immediate::MemArgLane(memarg, lane) => write!(
                f,
                " align={} offset={} lane={}",
                memarg.align_log2, memarg.offset, lane
            ),
            Immediate::S32(value) => write!(f, " {value}"),
            Immediate::S64(value) => write!(f, " {value}"),
            Immediate::F32(value) => write!(f, " {}", value.to_hex()),
            Immediate::F64(value) => write!(f, " {}", value.to_hex()),
            Immediate::V128(bytes) | Immediate::Shuffle(bytes) => {
                for byte in bytes {
                    write!(f, " {byte}")?;
                }
                Ok(())
            }
            Immediate::Init(imm) => write!(f, " {}", imm.segment_index),
            Immediate::Copy(_) => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// "name" custom section
// ---------------------------------------------------------------------------

/// One id/size framed subsection of the "name" section; the payload is
/// undecoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameSubsection<'a> {
    pub id: NameSubsectionId,
    pub data: Span<'a>,
}

/// A single index-to-name association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameAssoc<'a> {
    pub index: u32,
    pub name: &'a [u8],
}

/// An index paired with a nested name map, as in the local-names
/// subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndirectNameAssoc<'a> {
    pub index: u32,
    pub name_map: Vec<NameAssoc<'a>>,
}

// ---------------------------------------------------------------------------
// "linking" / "reloc.*" custom sections
// ---------------------------------------------------------------------------

/// One id/size framed subsection of the "linking" section; the payload is
/// undecoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkingSubsection<'a> {
    pub id: LinkingSubsectionId,
    pub data: Span<'a>,
}

/// Name, alignment, and flags of a data segment, from the segment info
/// subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentInfo<'a> {
    pub name: &'a [u8],
    pub align_log2: u32,
    pub flags: u32,
}

/// A start-like function with a priority, from the init functions
/// subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitFunction {
    pub priority: u32,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComdatSymbol {
    pub kind: ComdatSymbolKind,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comdat<'a> {
    pub name: &'a [u8],
    pub flags: u32,
    pub symbols: Vec<ComdatSymbol>,
}

/// Location of a defined data symbol inside its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinedData {
    pub index: u32,
    pub offset: u32,
    pub size: u32,
}

/// The kind-specific payload of a symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolInfoDesc<'a> {
    /// Function, global, and event symbols: an index into the matching
    /// index space, plus a name when the flags call for one.
    Base {
        kind: SymbolInfoKind,
        index: u32,
        name: Option<&'a [u8]>,
    },
    /// Data symbols: always named; defined ones also locate their bytes.
    Data {
        name: &'a [u8],
        defined: Option<DefinedData>,
    },
    /// Section symbols: the index of the target section.
    Section { section: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo<'a> {
    pub flags: SymbolInfoFlags,
    pub desc: SymbolInfoDesc<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationEntry {
    pub reloc_type: RelocationType,
    pub offset: u32,
    pub index: u32,
    pub addend: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_display() {
        let instr = Instruction::with(Opcode::I32Const, Immediate::S32(-3648));
        assert_eq!(instr.to_string(), "i32.const -3648");

        let instr = Instruction::with(
            Opcode::I32Load,
            Immediate::MemArg(MemArg {
                align_log2: 2,
                offset: 16,
            }),
        );
        assert_eq!(instr.to_string(), "i32.load align=2 offset=16");
    }

    #[test]
    fn test_function_type_display() {
        let func_type = FunctionType {
            param_types: vec![ValueType::I32, ValueType::I64],
            result_types: vec![],
        };
        assert_eq!(func_type.to_string(), "(i32, i64) -> nil");
    }

    #[test]
    fn test_limits_display() {
        assert_eq!(Limits::new(1).to_string(), "min = 1");
        assert_eq!(Limits::with_max(2, 1000).to_string(), "min = 2, max = 1000");
    }
}
