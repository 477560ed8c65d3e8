//! Common test utilities shared between integration tests
#![allow(dead_code)]

use lasm::{CollectingErrors, DecodeError};

/// Every recorded error flattened to (offset, text) trails: the context
/// frames in push order, then the message itself.
pub fn trails(errors: &CollectingErrors) -> Vec<Vec<(usize, String)>> {
    errors.errors.iter().map(DecodeError::trail).collect()
}

pub fn owned(trail: &[(usize, &str)]) -> Vec<(usize, String)> {
    trail
        .iter()
        .map(|&(offset, text)| (offset, text.to_string()))
        .collect()
}

pub fn expect_no_errors(errors: &CollectingErrors) {
    assert!(
        errors.errors.is_empty(),
        "unexpected errors: {:?}",
        errors.errors
    );
    assert_eq!(errors.open_contexts(), 0);
}
