//! End-to-end tests for the lazy module reader.

mod common;

use common::{expect_no_errors, owned, trails};
use lasm::read::lazy::{read_code_section, read_function_section, read_type_section};
use lasm::{
    read_module, CollectingErrors, CustomSection, Features, KnownSection, Section, SectionId, Span,
};
use rstest::rstest;

#[test]
fn test_basic_module() {
    let bytes = b"\0asm\x01\0\0\0\
        \x01\x03\0\0\0\
        \x01\x05\0\0\0\0\0\
        \x0a\x01\0\
        \x00\x06\x03yup\0\0";
    let features = Features::new();
    let mut errors = CollectingErrors::new();

    let module = read_module(bytes, &features, &mut errors);
    assert_eq!(module.magic, Some(Span::new(b"\0asm")));
    assert_eq!(module.version, Some(Span::new(&[1, 0, 0, 0])));

    let sections: Vec<Section> = module.sections.collect();
    assert_eq!(
        sections,
        vec![
            Section::Known(KnownSection {
                id: SectionId::Type,
                data: Span::new(&[0, 0, 0]),
            }),
            Section::Known(KnownSection {
                id: SectionId::Type,
                data: Span::new(&[0, 0, 0, 0, 0]),
            }),
            Section::Known(KnownSection {
                id: SectionId::Code,
                data: Span::new(&[0]),
            }),
            Section::Custom(CustomSection {
                name: b"yup",
                data: Span::new(&[0, 0]),
            }),
        ]
    );
    expect_no_errors(&errors);
}

#[test]
fn test_section_spans_stay_inside_the_input() {
    let bytes = b"\0asm\x01\0\0\0\x01\x03\0\0\0\x00\x06\x03yup\0\0";
    let features = Features::new();
    let mut errors = CollectingErrors::new();

    let module = read_module(bytes, &features, &mut errors);
    for section in module.sections {
        let data = section.data();
        assert!(data.pos() >= 8);
        assert!(data.pos() + data.len() <= bytes.len());
    }
    expect_no_errors(&errors);
}

#[rstest]
#[case::bad_magic(
    b"wasm\x01\0\0\0".as_slice(),
    vec![vec![
        (0, "magic"),
        (4, r#"Mismatch: expected "\00\61\73\6d", got "\77\61\73\6d""#),
    ]]
)]
#[case::magic_past_end(
    b"\0as".as_slice(),
    vec![
        vec![(0, "magic"), (0, "Unable to read 4 bytes")],
        vec![(0, "version"), (0, "Unable to read 4 bytes")],
    ]
)]
#[case::bad_version(
    b"\0asm\x02\0\0\0".as_slice(),
    vec![vec![
        (4, "version"),
        (8, r#"Mismatch: expected "\01\00\00\00", got "\02\00\00\00""#),
    ]]
)]
#[case::version_past_end(
    b"\0asm\x01".as_slice(),
    vec![vec![(4, "version"), (4, "Unable to read 4 bytes")]]
)]
fn test_header_errors(#[case] bytes: &[u8], #[case] expected: Vec<Vec<(usize, &str)>>) {
    let features = Features::new();
    let mut errors = CollectingErrors::new();
    let module = read_module(bytes, &features, &mut errors);
    drop(module);
    let expected: Vec<Vec<(usize, String)>> = expected.iter().map(|trail| owned(trail)).collect();
    assert_eq!(trails(&errors), expected);
}

#[test]
fn test_header_errors_do_not_stop_sections() {
    // A bad version is reported, but the section sequence still runs.
    let bytes = b"\0asm\x02\0\0\0\x01\x03\0\0\0";
    let features = Features::new();
    let mut errors = CollectingErrors::new();
    let module = read_module(bytes, &features, &mut errors);
    let sections: Vec<Section> = module.sections.collect();
    assert_eq!(sections.len(), 1);
    assert_eq!(errors.errors.len(), 1);
}

#[test]
fn test_corrupt_payload_does_not_desynchronize() {
    // The first type section's payload is garbage, but its declared size
    // is honored, so the next section still parses.
    let bytes = b"\0asm\x01\0\0\0\
        \x01\x03\xff\xff\xff\
        \x0a\x01\0";
    let features = Features::new();
    let mut errors = CollectingErrors::new();
    let module = read_module(bytes, &features, &mut errors);
    let sections: Vec<Section> = module.sections.collect();
    assert_eq!(sections.len(), 2);
    expect_no_errors(&errors);

    // Decoding the corrupt payload reports, without touching the other
    // section's bytes.
    match sections[0] {
        Section::Known(known) => {
            let types = read_type_section(known.data, &features, &mut errors);
            let entries: Vec<_> = types.sequence.collect();
            assert!(entries.is_empty());
            assert!(!errors.errors.is_empty());
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_payloads_reread_on_demand() {
    // Type section: [() -> i32]; function section: [0]; code section:
    // [{no locals; i32.const 7; end}].
    let bytes = b"\0asm\x01\0\0\0\
        \x01\x05\x01\x60\x00\x01\x7f\
        \x03\x02\x01\x00\
        \x0a\x06\x01\x04\x00\x41\x07\x0b";
    let features = Features::new();
    let mut errors = CollectingErrors::new();

    let module = read_module(bytes, &features, &mut errors);
    let sections: Vec<Section> = module.sections.collect();
    assert_eq!(sections.len(), 3);

    let types = read_type_section(sections[0].data(), &features, &mut errors);
    assert_eq!(types.count, Some(1));
    let entries: Vec<_> = types.sequence.collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].func_type.result_types, vec![lasm::ValueType::I32]);

    let functions = read_function_section(sections[1].data(), &features, &mut errors);
    let functions: Vec<_> = functions.sequence.collect();
    assert_eq!(functions, vec![lasm::Function { type_index: 0 }]);

    let code = read_code_section(sections[2].data(), &features, &mut errors);
    let bodies: Vec<_> = code.sequence.collect();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].locals.is_empty());
    assert_eq!(bodies[0].body.data, &[0x41u8, 0x07, 0x0b][..]);

    expect_no_errors(&errors);
}

#[test]
fn test_section_payload_matches_declared_size() {
    let bytes = b"\0asm\x01\0\0\0\x01\x03\0\0\0\x0a\x01\0";
    let features = Features::new();
    let mut errors = CollectingErrors::new();
    let module = read_module(bytes, &features, &mut errors);
    let sizes: Vec<usize> = module.sections.map(|s| s.data().len()).collect();
    assert_eq!(sizes, vec![3, 1]);
}

#[test]
fn test_unknown_section_id_terminates_iteration() {
    let bytes = b"\0asm\x01\0\0\0\x0c\x01\0";
    let features = Features::new();
    let mut errors = CollectingErrors::new();
    let module = read_module(bytes, &features, &mut errors);
    let sections: Vec<Section> = module.sections.collect();
    assert!(sections.is_empty());
    assert_eq!(
        trails(&errors),
        vec![owned(&[(8, "section"), (9, "Unknown section: 12")])]
    );

    // The same id decodes once the gating feature is on.
    let features = Features::new().bulk_memory();
    let mut errors = CollectingErrors::new();
    let module = read_module(bytes, &features, &mut errors);
    let sections: Vec<Section> = module.sections.collect();
    assert_eq!(sections.len(), 1);
    expect_no_errors(&errors);
}
