use thiserror::Error;

use super::field::{FieldKind, Instruction};
use crate::errors::ErrorDescriptor;

/// A field whose instruction could not be applied. The field was left at
/// its default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` ({kind}): cannot apply `{instruction}`")]
pub struct ConversionError {
    /// Dotted path from the outermost struct, e.g. `user.age`
    pub field: String,
    pub kind: FieldKind,
    pub instruction: String,
}

/// State threaded through one packing call.
#[derive(Debug)]
pub struct PackContext<'a> {
    descriptor: &'a ErrorDescriptor,
    path: Vec<&'static str>,
    diagnostics: Vec<ConversionError>,
}

impl<'a> PackContext<'a> {
    pub fn new(descriptor: &'a ErrorDescriptor) -> Self {
        Self {
            descriptor,
            path: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn descriptor(&self) -> &'a ErrorDescriptor {
        self.descriptor
    }

    pub(crate) fn enter(&mut self, field: &'static str) {
        self.path.push(field);
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    pub(crate) fn reject(&mut self, kind: FieldKind, instruction: Instruction) {
        self.diagnostics.push(ConversionError {
            field: self.path.join("."),
            kind,
            instruction: instruction.to_string(),
        });
    }

    pub fn into_diagnostics(self) -> Vec<ConversionError> {
        self.diagnostics
    }
}

/// Result of [`pack_checked`](super::pack_checked): the packed value plus
/// every field that fell back to its default because of a bad conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct PackReport<T> {
    pub value: T,
    pub diagnostics: Vec<ConversionError>,
}

impl<T> PackReport<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
