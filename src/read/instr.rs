//! Instruction, opcode, and expression decoders.

use crate::encoding::{is_prefix_byte, BlockType, Opcode};
use crate::errors::{ErrorSink, ErrorsContextGuard};
use crate::features::Features;
use crate::span::Span;
use crate::types::{
    BrOnExnImmediate, BrTableImmediate, CallIndirectImmediate, ConstantExpression, CopyImmediate,
    ElementExpression, Expression, Immediate, InitImmediate, Instruction, MemArg,
};

use super::{
    backtrack, read_bytes, read_f32, read_f64, read_index, read_reserved, read_s32, read_s64,
    read_u8, read_var_s33, read_var_u32, read_vector,
};
use crate::encoding::ImmediateKind;

/// Reads an opcode: one byte, or a prefix byte followed by a LEB selector
/// for the 0xFC/0xFD/0xFE families. A prefix byte is only treated as such
/// when a feature using it is enabled.
pub fn read_opcode(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Opcode> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "opcode");
        let byte = read_u8(span, &mut errors)?;
        if is_prefix_byte(byte, features) {
            let value = read_var_u32(span, &mut errors, "opcode")?;
            match Opcode::decode_prefixed(byte, value, features) {
                Some(opcode) => Some(opcode),
                None => {
                    errors.on_error(span.pos(), &format!("Unknown opcode: {byte} {value}"));
                    None
                }
            }
        } else {
            match Opcode::decode(byte, features) {
                Some(opcode) => Some(opcode),
                None => {
                    errors.on_error(span.pos(), &format!("Unknown opcode: {byte}"));
                    None
                }
            }
        }
    })
}

/// Reads a block type. With `multi_value`, bytes that are not a one-byte
/// form are re-read as a non-negative LEB s33 type index.
pub fn read_block_type(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<BlockType> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "block type");
        let start = *span;
        let byte = read_u8(span, &mut errors)?;
        if let Some(block_type) = BlockType::decode(byte, features) {
            return Some(block_type);
        }
        if features.multi_value {
            *span = start;
            let value = read_var_s33(span, &mut errors, "block type index")?;
            if value >= 0 {
                return Some(BlockType::Index(value as u32));
            }
        }
        errors.on_error(span.pos(), &format!("Unknown block type: {byte}"));
        None
    })
}

pub fn read_mem_arg(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<MemArg> {
    backtrack(span, |span| {
        let align_log2 = read_var_u32(span, errors, "align log2")?;
        let offset = read_var_u32(span, errors, "offset")?;
        Some(MemArg { align_log2, offset })
    })
}

pub fn read_br_table_immediate(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<BrTableImmediate> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "br_table");
        let targets = read_vector(span, features, &mut errors, "targets", |s, _f, e| {
            read_index(s, e)
        })?;
        let default_target = {
            let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "default target");
            read_index(span, &mut errors)?
        };
        Some(BrTableImmediate {
            targets,
            default_target,
        })
    })
}

pub fn read_call_indirect_immediate(
    span: &mut Span<'_>,
    errors: &mut dyn ErrorSink,
) -> Option<CallIndirectImmediate> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "call_indirect");
        let type_index = read_index(span, &mut errors)?;
        let reserved = read_reserved(span, &mut errors)?;
        Some(CallIndirectImmediate {
            type_index,
            reserved,
        })
    })
}

pub fn read_br_on_exn_immediate(
    span: &mut Span<'_>,
    errors: &mut dyn ErrorSink,
) -> Option<BrOnExnImmediate> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "br_on_exn");
        let target = read_index(span, &mut errors)?;
        let event_index = {
            let mut errors = ErrorsContextGuard::new(&mut errors, span.pos(), "event index");
            read_index(span, &mut errors)?
        };
        Some(BrOnExnImmediate {
            target,
            event_index,
        })
    })
}

pub fn read_init_immediate(
    span: &mut Span<'_>,
    errors: &mut dyn ErrorSink,
) -> Option<InitImmediate> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "init");
        let segment_index = read_index(span, &mut errors)?;
        let reserved = read_reserved(span, &mut errors)?;
        Some(InitImmediate {
            segment_index,
            reserved,
        })
    })
}

pub fn read_copy_immediate(
    span: &mut Span<'_>,
    errors: &mut dyn ErrorSink,
) -> Option<CopyImmediate> {
    backtrack(span, |span| {
        let mut errors = ErrorsContextGuard::new(errors, span.pos(), "copy");
        let src_reserved = read_reserved(span, &mut errors)?;
        let dst_reserved = read_reserved(span, &mut errors)?;
        Some(CopyImmediate {
            src_reserved,
            dst_reserved,
        })
    })
}

fn read_sixteen_bytes(span: &mut Span<'_>, errors: &mut dyn ErrorSink) -> Option<[u8; 16]> {
    let bytes = read_bytes(span, 16, errors)?;
    let mut array = [0u8; 16];
    array.copy_from_slice(bytes.bytes());
    Some(array)
}

/// Reads one instruction: the opcode, then the immediate the opcode
/// requires.
pub fn read_instruction(
    span: &mut Span<'_>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Instruction> {
    backtrack(span, |span| {
        let opcode = read_opcode(span, features, errors)?;
        let immediate = match opcode.immediate_kind() {
            ImmediateKind::None => Immediate::None,
            ImmediateKind::Block => Immediate::Block(read_block_type(span, features, errors)?),
            ImmediateKind::Index => Immediate::Index(read_index(span, errors)?),
            ImmediateKind::BrTable => {
                Immediate::BrTable(read_br_table_immediate(span, features, errors)?)
            }
            ImmediateKind::CallIndirect => {
                Immediate::CallIndirect(read_call_indirect_immediate(span, errors)?)
            }
            ImmediateKind::BrOnExn => Immediate::BrOnExn(read_br_on_exn_immediate(span, errors)?),
            ImmediateKind::Reserved => Immediate::Byte(read_reserved(span, errors)?),
            ImmediateKind::Lane => Immediate::Lane(read_u8(span, errors)?),
            ImmediateKind::MemArg => Immediate::MemArg(read_mem_arg(span, errors)?),
            ImmediateKind::MemArgLane => {
                let memarg = read_mem_arg(span, errors)?;
                let lane = read_u8(span, errors)?;
                Immediate::MemArgLane(memarg, lane)
            }
            ImmediateKind::S32 => Immediate::S32(read_s32(span, errors)?),
            ImmediateKind::S64 => Immediate::S64(read_s64(span, errors)?),
            ImmediateKind::F32 => Immediate::F32(read_f32(span, errors)?),
            ImmediateKind::F64 => Immediate::F64(read_f64(span, errors)?),
            ImmediateKind::V128 => Immediate::V128(read_sixteen_bytes(span, errors)?),
            ImmediateKind::Shuffle => Immediate::Shuffle(read_sixteen_bytes(span, errors)?),
            ImmediateKind::Init => Immediate::Init(read_init_immediate(span, errors)?),
            ImmediateKind::Copy => Immediate::Copy(read_copy_immediate(span, errors)?),
        };
        Some(Instruction { opcode, immediate })
    })
}

fn read_single_instruction_expression<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
    what: &str,
    is_legal: impl Fn(Opcode) -> bool,
) -> Option<Span<'a>> {
    backtrack(span, |span| {
        let start = *span;
        if span.is_empty() {
            errors.on_error(span.pos(), &format!("Unexpected end of {what}"));
            return None;
        }
        let instr = match read_instruction(span, features, errors) {
            Some(instr) => instr,
            None => {
                errors.on_error(start.pos(), &format!("Unexpected end of {what}"));
                return None;
            }
        };
        if !is_legal(instr.opcode) {
            errors.on_error(
                start.pos(),
                &format!("Illegal instruction in {what}: {}", instr.opcode.text()),
            );
            return None;
        }
        if span.is_empty() {
            errors.on_error(start.pos(), "Expected end instruction");
            return None;
        }
        let end = read_instruction(span, features, errors)?;
        if end.opcode != Opcode::End {
            errors.on_error(start.pos(), "Expected end instruction");
            return None;
        }
        Some(start.up_to(span))
    })
}

/// Reads a constant expression: one legal initializer instruction plus its
/// terminating `end`. The stored span includes the `end` byte.
pub fn read_constant_expression<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ConstantExpression<'a>> {
    let data = read_single_instruction_expression(
        span,
        features,
        errors,
        "constant expression",
        |opcode| {
            matches!(
                opcode,
                Opcode::I32Const
                    | Opcode::I64Const
                    | Opcode::F32Const
                    | Opcode::F64Const
                    | Opcode::GlobalGet
                    | Opcode::RefNull
                    | Opcode::RefFunc
            )
        },
    )?;
    Some(ConstantExpression { data })
}

/// Reads a passive element initializer: `ref.null` or `ref.func` plus its
/// terminating `end`.
pub fn read_element_expression<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<ElementExpression<'a>> {
    let data = read_single_instruction_expression(
        span,
        features,
        errors,
        "element expression",
        |opcode| matches!(opcode, Opcode::RefNull | Opcode::RefFunc),
    )?;
    Some(ElementExpression { data })
}

/// Reads a balanced instruction sequence: `block`/`loop`/`if`/`try` open,
/// `end` closes, `else` is neutral; the scan stops after the `end` at
/// depth zero. The stored span includes that final `end`.
pub fn read_expression<'a>(
    span: &mut Span<'a>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Expression<'a>> {
    backtrack(span, |span| {
        let start = *span;
        let mut depth = 0u32;
        loop {
            if span.is_empty() {
                errors.on_error(span.pos(), "Unexpected end of expression");
                return None;
            }
            let instr = read_instruction(span, features, errors)?;
            match instr.opcode {
                Opcode::Block | Opcode::Loop | Opcode::If | Opcode::Try => depth += 1,
                Opcode::End => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        Some(Expression {
            data: start.up_to(span),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectingErrors;

    fn read_one<'a>(bytes: &'a [u8], features: &Features) -> (Option<Instruction>, CollectingErrors) {
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(bytes);
        let result = read_instruction(&mut span, features, &mut errors);
        if result.is_some() {
            assert!(span.is_empty(), "leftover bytes: {span:?}");
        }
        (result, errors)
    }

    fn expect_instruction(bytes: &[u8], features: &Features, expected: Instruction) {
        let (result, errors) = read_one(bytes, features);
        assert!(errors.errors.is_empty(), "errors: {:?}", errors.errors);
        assert_eq!(result, Some(expected));
    }

    #[test]
    fn test_read_opcode_unknown() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x06]);
        assert_eq!(read_opcode(&mut span, &features, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![(0, "opcode".to_string()), (1, "Unknown opcode: 6".to_string())]
        );
        assert_eq!(span.pos(), 0);

        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0xff]);
        assert_eq!(read_opcode(&mut span, &features, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![(0, "opcode".to_string()), (1, "Unknown opcode: 255".to_string())]
        );
    }

    #[test]
    fn test_read_opcode_prefixed() {
        let features = Features::new().saturating_float_to_int();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0xfc, 0x07]);
        assert_eq!(
            read_opcode(&mut span, &features, &mut errors),
            Some(Opcode::I64TruncSatF64U)
        );

        // With the gate off, 0xfc is not a prefix at all.
        let mvp = Features::new();
        let mut span = Span::new(&[0xfc, 0x07]);
        assert_eq!(read_opcode(&mut span, &mvp, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![(0, "opcode".to_string()), (1, "Unknown opcode: 252".to_string())]
        );
    }

    #[test]
    fn test_read_opcode_prefixed_unknown_selector() {
        let features = Features::new().simd();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0xfd, 0x9a, 0x01]);
        assert_eq!(read_opcode(&mut span, &features, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![
                (0, "opcode".to_string()),
                (3, "Unknown opcode: 253 154".to_string()),
            ]
        );
        assert_eq!(span.pos(), 0);
    }

    #[test]
    fn test_read_instruction_mvp() {
        let features = Features::new();
        expect_instruction(&[0x00], &features, Instruction::new(Opcode::Unreachable));
        expect_instruction(
            &[0x02, 0x7f],
            &features,
            Instruction::with(Opcode::Block, Immediate::Block(BlockType::I32)),
        );
        expect_instruction(
            &[0x03, 0x40],
            &features,
            Instruction::with(Opcode::Loop, Immediate::Block(BlockType::Void)),
        );
        expect_instruction(
            &[0x0c, 0x01],
            &features,
            Instruction::with(Opcode::Br, Immediate::Index(1)),
        );
        expect_instruction(
            &[0x0e, 0x03, 0x03, 0x04, 0x05, 0x06],
            &features,
            Instruction::with(
                Opcode::BrTable,
                Immediate::BrTable(BrTableImmediate {
                    targets: vec![3, 4, 5],
                    default_target: 6,
                }),
            ),
        );
        expect_instruction(
            &[0x11, 0x08, 0x00],
            &features,
            Instruction::with(
                Opcode::CallIndirect,
                Immediate::CallIndirect(CallIndirectImmediate {
                    type_index: 8,
                    reserved: 0,
                }),
            ),
        );
        expect_instruction(
            &[0x20, 0x05],
            &features,
            Instruction::with(Opcode::LocalGet, Immediate::Index(5)),
        );
        expect_instruction(
            &[0x28, 0x0a, 0x0b],
            &features,
            Instruction::with(
                Opcode::I32Load,
                Immediate::MemArg(MemArg {
                    align_log2: 10,
                    offset: 11,
                }),
            ),
        );
        expect_instruction(
            &[0x3f, 0x00],
            &features,
            Instruction::with(Opcode::MemorySize, Immediate::Byte(0)),
        );
        expect_instruction(
            &[0x41, 0x00],
            &features,
            Instruction::with(Opcode::I32Const, Immediate::S32(0)),
        );
        expect_instruction(
            &[0x42, 0x00],
            &features,
            Instruction::with(Opcode::I64Const, Immediate::S64(0)),
        );
        expect_instruction(
            &[0x43, 0x00, 0x00, 0x00, 0x00],
            &features,
            Instruction::with(Opcode::F32Const, Immediate::F32(0.0)),
        );
        expect_instruction(
            &[0x44, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            &features,
            Instruction::with(Opcode::F64Const, Immediate::F64(0.0)),
        );
        expect_instruction(&[0x6a], &features, Instruction::new(Opcode::I32Add));
        expect_instruction(&[0xbf], &features, Instruction::new(Opcode::F64ReinterpretI64));
    }

    #[test]
    fn test_read_instruction_bad_memory_reserved() {
        let features = Features::new();
        for bytes in [&[0x3f, 0x01][..], &[0x40, 0x01][..]] {
            let (result, errors) = read_one(bytes, &features);
            assert_eq!(result, None);
            assert_eq!(
                errors.errors[0].trail(),
                vec![
                    (1, "reserved".to_string()),
                    (2, "Expected reserved byte 0, got 1".to_string()),
                ]
            );
        }
    }

    #[test]
    fn test_read_instruction_call_indirect_bad_reserved() {
        let features = Features::new();
        let (result, errors) = read_one(&[0x11, 0x00, 0x01], &features);
        assert_eq!(result, None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![
                (1, "call_indirect".to_string()),
                (2, "reserved".to_string()),
                (3, "Expected reserved byte 0, got 1".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_instruction_bulk_memory() {
        let features = Features::new().bulk_memory();
        expect_instruction(
            &[0xfc, 0x08, 0x02, 0x00],
            &features,
            Instruction::with(
                Opcode::MemoryInit,
                Immediate::Init(InitImmediate {
                    segment_index: 2,
                    reserved: 0,
                }),
            ),
        );
        expect_instruction(
            &[0xfc, 0x0a, 0x00, 0x00],
            &features,
            Instruction::with(
                Opcode::MemoryCopy,
                Immediate::Copy(CopyImmediate {
                    src_reserved: 0,
                    dst_reserved: 0,
                }),
            ),
        );
    }

    #[test]
    fn test_read_instruction_simd() {
        let features = Features::new().simd();
        expect_instruction(
            &[
                0xfd, 0x0d, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a,
                0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
            ],
            &features,
            Instruction::with(
                Opcode::I8X16Shuffle,
                Immediate::Shuffle([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
            ),
        );
        expect_instruction(
            &[0xfd, 0x15, 0x03],
            &features,
            Instruction::with(Opcode::I8X16ExtractLaneS, Immediate::Lane(3)),
        );
        expect_instruction(
            &[0xfd, 0x54, 0x02, 0x08, 0x01],
            &features,
            Instruction::with(
                Opcode::V128Load8Lane,
                Immediate::MemArgLane(
                    MemArg {
                        align_log2: 2,
                        offset: 8,
                    },
                    1,
                ),
            ),
        );
    }

    #[test]
    fn test_read_instruction_atomics() {
        let features = Features::new().threads();
        expect_instruction(
            &[0xfe, 0x1e, 0x02, 0x00],
            &features,
            Instruction::with(
                Opcode::I32AtomicRmwAdd,
                Immediate::MemArg(MemArg {
                    align_log2: 2,
                    offset: 0,
                }),
            ),
        );
        expect_instruction(
            &[0xfe, 0x03, 0x00],
            &features,
            Instruction::with(Opcode::AtomicFence, Immediate::Byte(0)),
        );
    }

    #[test]
    fn test_read_block_type_index() {
        let features = Features::new().multi_value();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x02]);
        assert_eq!(
            read_block_type(&mut span, &features, &mut errors),
            Some(BlockType::Index(2))
        );

        // Without multi_value the same byte is unknown.
        let mvp = Features::new();
        let mut span = Span::new(&[0x02]);
        assert_eq!(read_block_type(&mut span, &mvp, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![
                (0, "block type".to_string()),
                (1, "Unknown block type: 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_constant_expression() {
        let features = Features::new();
        for bytes in [
            &[0x41, 0x00, 0x0b][..],
            &[0x42, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01, 0x0b][..],
            &[0x43, 0x00, 0x00, 0x00, 0x00, 0x0b][..],
            &[0x44, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0b][..],
            &[0x23, 0x00, 0x0b][..],
        ] {
            let mut errors = CollectingErrors::new();
            let mut span = Span::new(bytes);
            let result = read_constant_expression(&mut span, &features, &mut errors);
            assert!(errors.errors.is_empty(), "errors: {:?}", errors.errors);
            assert_eq!(result, Some(ConstantExpression::new(bytes)));
            assert!(span.is_empty());
        }
    }

    #[test]
    fn test_read_constant_expression_no_end() {
        let features = Features::new();
        for bytes in [&[0x41, 0x00][..], &[0x23, 0x00][..]] {
            let mut errors = CollectingErrors::new();
            let mut span = Span::new(bytes);
            assert_eq!(
                read_constant_expression(&mut span, &features, &mut errors),
                None
            );
            assert_eq!(
                errors.errors[0].trail(),
                vec![(0, "Expected end instruction".to_string())]
            );
            assert_eq!(span.pos(), 0);
        }
    }

    #[test]
    fn test_read_constant_expression_too_long() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x41, 0x00, 0x01, 0x0b]);
        assert_eq!(
            read_constant_expression(&mut span, &features, &mut errors),
            None
        );
        assert_eq!(
            errors.errors[0].trail(),
            vec![(0, "Expected end instruction".to_string())]
        );
    }

    #[test]
    fn test_read_constant_expression_invalid_instruction() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x06]);
        assert_eq!(
            read_constant_expression(&mut span, &features, &mut errors),
            None
        );
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(
            errors.errors[0].trail(),
            vec![(0, "opcode".to_string()), (1, "Unknown opcode: 6".to_string())]
        );
        assert_eq!(
            errors.errors[1].trail(),
            vec![(0, "Unexpected end of constant expression".to_string())]
        );
    }

    #[test]
    fn test_read_constant_expression_illegal_instruction() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x00]);
        assert_eq!(
            read_constant_expression(&mut span, &features, &mut errors),
            None
        );
        assert_eq!(
            errors.errors[0].trail(),
            vec![(
                0,
                "Illegal instruction in constant expression: unreachable".to_string()
            )]
        );
    }

    #[test]
    fn test_read_constant_expression_past_end() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[]);
        assert_eq!(
            read_constant_expression(&mut span, &features, &mut errors),
            None
        );
        assert_eq!(
            errors.errors[0].trail(),
            vec![(0, "Unexpected end of constant expression".to_string())]
        );
    }

    #[test]
    fn test_read_element_expression() {
        let features = Features::new().reference_types();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0xd2, 0x05, 0x0b]);
        assert_eq!(
            read_element_expression(&mut span, &features, &mut errors),
            Some(ElementExpression::new(&[0xd2u8, 0x05, 0x0b][..]))
        );

        let mut span = Span::new(&[0x41, 0x00, 0x0b]);
        assert_eq!(
            read_element_expression(&mut span, &features, &mut errors),
            None
        );
        assert_eq!(
            errors.errors[0].trail(),
            vec![(
                0,
                "Illegal instruction in element expression: i32.const".to_string()
            )]
        );
    }

    #[test]
    fn test_read_expression() {
        let features = Features::new();

        // `end` alone is a one-byte expression.
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x0b, 0xff]);
        let expr = read_expression(&mut span, &features, &mut errors).unwrap();
        assert_eq!(expr.data.len(), 1);
        assert_eq!(span.bytes(), &[0xff]);

        // Nested blocks keep the scan going until the matching end.
        let bytes = &[0x02, 0x40, 0x41, 0x00, 0x1a, 0x0b, 0x0b];
        let mut span = Span::new(bytes);
        let expr = read_expression(&mut span, &features, &mut errors).unwrap();
        assert_eq!(expr.data, &bytes[..]);
        assert!(span.is_empty());
    }

    #[test]
    fn test_read_expression_unbalanced() {
        let features = Features::new();
        let mut errors = CollectingErrors::new();
        let mut span = Span::new(&[0x02, 0x40, 0x41, 0x00]);
        assert_eq!(read_expression(&mut span, &features, &mut errors), None);
        assert_eq!(
            errors.errors[0].trail(),
            vec![(4, "Unexpected end of expression".to_string())]
        );
        assert_eq!(span.pos(), 0);
    }
}
