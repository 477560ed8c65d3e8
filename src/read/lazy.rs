//! Lazy, forward-only iteration over section contents.
//!
//! A [`LazySequence`] decodes one element at a time from the front of its
//! span; nothing is materialized up front, so a consumer can skip or
//! stream. Iterators are single-pass and non-restartable; to traverse a
//! section twice, re-invoke the section reader on the original span.

use std::marker::PhantomData;

use crate::errors::ErrorSink;
use crate::features::Features;
use crate::span::Span;
use crate::types::{
    Code, DataCount, DataSegment, ElementSegment, Event, Export, Function, Global, Import, Memory,
    Start, Table, TypeEntry,
};

use super::entity::{read_data_count, read_start};
use super::{read_count, Read};

/// A forward iterator decoding `T`s from a span.
///
/// A mid-sequence decode failure reports through the sink and terminates
/// the iterator; no partial element is yielded and no failure escapes the
/// iterator boundary.
pub struct LazySequence<'a, 'e, T> {
    span: Span<'a>,
    features: Features,
    errors: &'e mut dyn ErrorSink,
    failed: bool,
    _marker: PhantomData<T>,
}

impl<'a, 'e, T> LazySequence<'a, 'e, T> {
    pub fn new(span: Span<'a>, features: &Features, errors: &'e mut dyn ErrorSink) -> Self {
        LazySequence {
            span,
            features: *features,
            errors,
            failed: false,
            _marker: PhantomData,
        }
    }

    /// The undecoded remainder.
    pub fn remaining(&self) -> Span<'a> {
        self.span
    }

    /// Whether iteration stopped because an element failed to decode.
    pub fn failed(&self) -> bool {
        self.failed
    }
}

impl<'a, 'e, T: Read<'a>> Iterator for LazySequence<'a, 'e, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.failed || self.span.is_empty() {
            return None;
        }
        match T::read(&mut self.span, &self.features, &mut *self.errors) {
            Some(item) => Some(item),
            None => {
                self.failed = true;
                None
            }
        }
    }
}

/// A lazy sequence preceded by a declared element count.
///
/// The count is exposed but not enforced against the number of yielded
/// elements; a mismatch is a validation property.
pub struct LazySection<'a, 'e, T> {
    pub count: Option<u32>,
    pub sequence: LazySequence<'a, 'e, T>,
}

impl<'a, 'e, T> LazySection<'a, 'e, T> {
    pub fn new(mut span: Span<'a>, features: &Features, errors: &'e mut dyn ErrorSink) -> Self {
        let count = read_count(&mut span, &mut *errors);
        let mut sequence = LazySequence::new(span, features, errors);
        if count.is_none() {
            sequence.failed = true;
        }
        LazySection { count, sequence }
    }
}

pub type LazyTypeSection<'a, 'e> = LazySection<'a, 'e, TypeEntry>;
pub type LazyImportSection<'a, 'e> = LazySection<'a, 'e, Import<'a>>;
pub type LazyFunctionSection<'a, 'e> = LazySection<'a, 'e, Function>;
pub type LazyTableSection<'a, 'e> = LazySection<'a, 'e, Table>;
pub type LazyMemorySection<'a, 'e> = LazySection<'a, 'e, Memory>;
pub type LazyGlobalSection<'a, 'e> = LazySection<'a, 'e, Global<'a>>;
pub type LazyExportSection<'a, 'e> = LazySection<'a, 'e, Export<'a>>;
pub type LazyElementSection<'a, 'e> = LazySection<'a, 'e, ElementSegment<'a>>;
pub type LazyCodeSection<'a, 'e> = LazySection<'a, 'e, Code<'a>>;
pub type LazyDataSection<'a, 'e> = LazySection<'a, 'e, DataSegment<'a>>;
pub type LazyEventSection<'a, 'e> = LazySection<'a, 'e, Event>;

pub fn read_type_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyTypeSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_import_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyImportSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_function_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyFunctionSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_table_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyTableSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_memory_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyMemorySection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_global_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyGlobalSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_export_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyExportSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_element_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyElementSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_code_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyCodeSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_data_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyDataSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

pub fn read_event_section<'a, 'e>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &'e mut dyn ErrorSink,
) -> LazyEventSection<'a, 'e> {
    LazySection::new(span.into(), features, errors)
}

/// The start section holds a single function index; it decodes eagerly.
pub fn read_start_section<'a>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<Start> {
    let mut span = span.into();
    read_start(&mut span, features, errors)
}

/// The data count section holds a single count; it decodes eagerly.
pub fn read_data_count_section<'a>(
    span: impl Into<Span<'a>>,
    features: &Features,
    errors: &mut dyn ErrorSink,
) -> Option<DataCount> {
    let mut span = span.into();
    read_data_count(&mut span, features, errors)
}
