//! Pack uniform response envelopes from error outcomes.
//!
//! Response structs derive [`Pack`] and tag their fields with
//! `#[pack("...")]`. Given an [`ErrorDescriptor`] (usually obtained from an
//! arbitrary error through [`normalize`]), [`pack`] builds a filled copy of
//! the struct:
//!
//! ```
//! use error_packer::{catalog, normalize, pack, Pack};
//!
//! #[derive(Debug, Default, Pack)]
//! struct LoginResponse {
//!     #[pack("-1")]
//!     seq: i64,
//!     #[pack("err.code")]
//!     code: i64,
//!     #[pack("err.msg")]
//!     msg: String,
//! }
//!
//! let descriptor = normalize(Some(&catalog::INPUT_BODY));
//! let resp = pack(&LoginResponse::default(), &descriptor);
//! assert_eq!(resp.seq, -1);
//! assert_eq!(resp.code, 102);
//! assert_eq!(resp.msg, "input body error");
//! ```

// Lets the derive's `::error_packer` paths resolve inside this crate.
extern crate self as error_packer;

pub mod api;
pub mod config;
pub mod errors;
pub mod packer;

pub use error_packer_derive::Pack;
pub use errors::{
    catalog, normalize, normalize_anyhow, normalize_result, ErrorCategory, ErrorDescriptor,
};
pub use packer::{
    fill_field, pack, pack_checked, pack_fields, ConversionError, FieldKind, FieldSpec, FillFn,
    Instruction, Pack, PackContext, PackField, PackReport, Packer,
};
