use serde::Serialize;
use std::fmt;

use super::context::PackContext;

/// Shape of a field as far as the packer is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Signed,
    Unsigned,
    Bool,
    Float,
    /// Another packable struct, packed recursively
    Nested,
    /// Anything the packer has no conversion for; left at its default
    Other,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Signed => write!(f, "signed integer"),
            Self::Unsigned => write!(f, "unsigned integer"),
            Self::Bool => write!(f, "boolean"),
            Self::Float => write!(f, "floating point"),
            Self::Nested => write!(f, "nested struct"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A parsed `#[pack("...")]` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// No tag, or an empty one
    Untagged,
    /// `-`
    Skip,
    /// `err.code`
    Code,
    /// `err.msg`
    Message,
    /// Any other text, converted into the field's type
    Literal(&'static str),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untagged => Ok(()),
            Self::Skip => write!(f, "-"),
            Self::Code => write!(f, "err.code"),
            Self::Message => write!(f, "err.msg"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

/// A type that can appear as a field of a packable struct.
///
/// Each conversion returns `None` when the value cannot be represented in
/// `Self`; the packer then leaves the field at its default. Implement this
/// for your own types to give them a meaning under `err.code`, `err.msg` or
/// literal tags.
pub trait PackField: Default {
    const KIND: FieldKind;

    fn from_code(code: i16) -> Option<Self> {
        let _ = code;
        None
    }

    fn from_message(message: &str) -> Option<Self> {
        let _ = message;
        None
    }

    fn from_literal(literal: &str) -> Option<Self> {
        let _ = literal;
        None
    }

    /// Recursive packing for [`FieldKind::Nested`] types
    fn pack_nested(&self, cx: &mut PackContext<'_>) -> Self {
        let _ = cx;
        Self::default()
    }
}

/// Compute the output value of one field from its template value.
///
/// Nested kinds recurse regardless of the instruction (except `Skip`);
/// everything else is converted according to the instruction.
pub fn fill_field<F: PackField>(
    template: &F,
    instruction: Instruction,
    cx: &mut PackContext<'_>,
) -> F {
    if instruction == Instruction::Skip {
        return F::default();
    }
    if F::KIND == FieldKind::Nested {
        return template.pack_nested(cx);
    }

    let converted = match instruction {
        Instruction::Untagged | Instruction::Skip => return F::default(),
        Instruction::Code => F::from_code(cx.descriptor().code()),
        Instruction::Message => F::from_message(cx.descriptor().message()),
        Instruction::Literal(literal) => F::from_literal(literal),
    };

    match converted {
        Some(value) => value,
        None => {
            if F::KIND != FieldKind::Other {
                cx.reject(F::KIND, instruction);
            }
            F::default()
        }
    }
}

impl PackField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_message(message: &str) -> Option<Self> {
        Some(message.to_string())
    }

    fn from_literal(literal: &str) -> Option<Self> {
        Some(literal.to_string())
    }
}

macro_rules! integer_field {
    ($kind:expr => $($ty:ty),+) => {
        $(
            impl PackField for $ty {
                const KIND: FieldKind = $kind;

                fn from_code(code: i16) -> Option<Self> {
                    Self::try_from(code).ok()
                }

                fn from_literal(literal: &str) -> Option<Self> {
                    literal.parse().ok()
                }
            }
        )+
    };
}

integer_field!(FieldKind::Signed => i8, i16, i32, i64, i128, isize);
integer_field!(FieldKind::Unsigned => u8, u16, u32, u64, u128, usize);

macro_rules! float_field {
    ($($ty:ty),+) => {
        $(
            impl PackField for $ty {
                const KIND: FieldKind = FieldKind::Float;

                fn from_code(code: i16) -> Option<Self> {
                    Some(Self::from(code))
                }

                fn from_literal(literal: &str) -> Option<Self> {
                    literal.parse().ok()
                }
            }
        )+
    };
}

float_field!(f32, f64);

impl PackField for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_literal(literal: &str) -> Option<Self> {
        literal.parse().ok()
    }
}

// Optional and boxed fields take on the kind of what they hold. An absent
// nested value stays absent.
impl<T: PackField> PackField for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn from_code(code: i16) -> Option<Self> {
        T::from_code(code).map(Some)
    }

    fn from_message(message: &str) -> Option<Self> {
        T::from_message(message).map(Some)
    }

    fn from_literal(literal: &str) -> Option<Self> {
        T::from_literal(literal).map(Some)
    }

    fn pack_nested(&self, cx: &mut PackContext<'_>) -> Self {
        self.as_ref().map(|value| value.pack_nested(cx))
    }
}

impl<T: PackField> PackField for Box<T> {
    const KIND: FieldKind = T::KIND;

    fn from_code(code: i16) -> Option<Self> {
        T::from_code(code).map(Box::new)
    }

    fn from_message(message: &str) -> Option<Self> {
        T::from_message(message).map(Box::new)
    }

    fn from_literal(literal: &str) -> Option<Self> {
        T::from_literal(literal).map(Box::new)
    }

    fn pack_nested(&self, cx: &mut PackContext<'_>) -> Self {
        Box::new(self.as_ref().pack_nested(cx))
    }
}

impl<T> PackField for Vec<T> {
    const KIND: FieldKind = FieldKind::Other;
}

impl PackField for char {
    const KIND: FieldKind = FieldKind::Other;
}

impl PackField for serde_json::Value {
    const KIND: FieldKind = FieldKind::Other;
}
