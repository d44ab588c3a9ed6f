//! Tag-driven structural packing.
//!
//! A struct deriving [`Pack`] exposes a table of [`FieldSpec`]s, one per
//! field in declaration order. [`pack`] walks that table against a template
//! value and an [`ErrorDescriptor`], building a fresh output:
//!
//! 1. `#[pack("-")]` fields are left at their default
//! 2. nested packable structs are packed recursively
//! 3. untagged fields are left at their default
//! 4. `err.code`, `err.msg` and literal tags are converted into the field type
//!
//! Packing never fails. A tag that cannot be converted leaves its field at
//! the default; [`pack_checked`] reports those fields.

#[cfg(test)]
pub(crate) mod capture;
pub mod context;
pub mod decorated;
pub mod field;

use std::fmt;

use crate::errors::ErrorDescriptor;
pub use context::{ConversionError, PackContext, PackReport};
pub use decorated::Packer;
pub use field::{fill_field, FieldKind, Instruction, PackField};

/// Computes one output field from the template.
pub type FillFn<T> = fn(&T, &mut T, Instruction, &mut PackContext<'_>);

/// One row of a struct's field table
pub struct FieldSpec<T: 'static> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub instruction: Instruction,
    pub fill: FillFn<T>,
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("instruction", &self.instruction)
            .finish_non_exhaustive()
    }
}

/// A struct the packer can rewrite. Use `#[derive(Pack)]`.
pub trait Pack: Default + 'static {
    const FIELDS: &'static [FieldSpec<Self>];
}

/// Pack `template` against `descriptor`, returning a new value.
pub fn pack<T: Pack>(template: &T, descriptor: &ErrorDescriptor) -> T {
    let mut cx = PackContext::new(descriptor);
    pack_fields(template, &mut cx)
}

/// Like [`pack`], also returning the fields whose tag could not be applied.
pub fn pack_checked<T: Pack>(template: &T, descriptor: &ErrorDescriptor) -> PackReport<T> {
    let mut cx = PackContext::new(descriptor);
    let value = pack_fields(template, &mut cx);
    PackReport {
        value,
        diagnostics: cx.into_diagnostics(),
    }
}

/// Walk `T`'s field table within an existing context. Nested packing
/// re-enters here.
pub fn pack_fields<T: Pack>(template: &T, cx: &mut PackContext<'_>) -> T {
    let mut output = T::default();

    for field in T::FIELDS {
        match field.instruction {
            Instruction::Skip => continue,
            Instruction::Untagged if field.kind != FieldKind::Nested => continue,
            _ => {}
        }

        cx.enter(field.name);
        (field.fill)(template, &mut output, field.instruction, cx);
        cx.leave();
    }

    output
}
