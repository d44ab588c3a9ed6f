//! Derive macro for error-packer.
//!
//! Provides `#[derive(Pack)]`, which generates the field table the packer
//! walks and registers the struct as a nested field kind so that it can be
//! embedded in other packable structs.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, Index, LitStr, Member,
};

/// Parsed form of a `#[pack("...")]` tag, mirrored from the runtime
/// `Instruction` so it can be emitted as a constant.
#[derive(Debug, PartialEq, Eq)]
enum Tag {
    None,
    Skip,
    Code,
    Message,
    Literal(String),
}

impl Tag {
    fn parse(raw: &str) -> Self {
        match raw {
            "" => Tag::None,
            "-" => Tag::Skip,
            "err.code" => Tag::Code,
            "err.msg" => Tag::Message,
            other => Tag::Literal(other.to_string()),
        }
    }

    fn to_tokens(&self) -> TokenStream2 {
        match self {
            Tag::None => quote!(::error_packer::Instruction::Untagged),
            Tag::Skip => quote!(::error_packer::Instruction::Skip),
            Tag::Code => quote!(::error_packer::Instruction::Code),
            Tag::Message => quote!(::error_packer::Instruction::Message),
            Tag::Literal(literal) => quote!(::error_packer::Instruction::Literal(#literal)),
        }
    }
}

/// Derives `Pack` and `PackField` for a struct.
///
/// Each field may carry one `#[pack("...")]` tag:
///
/// - `"-"` never touches the field
/// - `"err.code"` receives the descriptor code
/// - `"err.msg"` receives the descriptor message
/// - anything else is parsed into the field's type
///
/// Fields whose type is itself a packable struct are packed recursively
/// unless tagged `"-"`. The struct must implement `Default`, and every field
/// type must implement `PackField`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Default, Pack)]
/// struct LoginResponse {
///     #[pack("-1")]
///     seq: i64,
///     #[pack("err.code")]
///     code: i64,
///     #[pack("err.msg")]
///     msg: String,
/// }
/// ```
#[proc_macro_derive(Pack, attributes(pack))]
pub fn derive_pack(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = input.ident.clone();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "Pack can only be derived for structs",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "Pack can only be derived for structs",
            ))
        }
    };

    let mut specs = Vec::new();
    let members: Vec<(Member, String)> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| f.ident.clone())
            .map(|ident| {
                let label = ident.to_string();
                (Member::Named(ident), label)
            })
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| (Member::Unnamed(Index::from(i)), i.to_string()))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    for (field, (member, label)) in fields.iter().zip(members) {
        let tag = field_tag(&field.attrs)?;
        let instruction = tag.to_tokens();
        let ty = &field.ty;
        specs.push(quote! {
            ::error_packer::FieldSpec {
                name: #label,
                kind: <#ty as ::error_packer::PackField>::KIND,
                instruction: #instruction,
                fill: |template, output, instruction, cx| {
                    output.#member = ::error_packer::fill_field(&template.#member, instruction, cx);
                },
            }
        });
    }

    // Generic parameters flow through the field table, so they need the
    // same capabilities as concrete field types.
    for param in input.generics.type_params_mut() {
        param
            .bounds
            .push(parse_quote!(::error_packer::PackField));
        param.bounds.push(parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::error_packer::Pack for #name #ty_generics #where_clause {
            const FIELDS: &'static [::error_packer::FieldSpec<Self>] = &[
                #(#specs),*
            ];
        }

        impl #impl_generics ::error_packer::PackField for #name #ty_generics #where_clause {
            const KIND: ::error_packer::FieldKind = ::error_packer::FieldKind::Nested;

            fn pack_nested(&self, cx: &mut ::error_packer::PackContext<'_>) -> Self {
                ::error_packer::pack_fields(self, cx)
            }
        }
    })
}

fn field_tag(attrs: &[Attribute]) -> syn::Result<Tag> {
    let mut found: Option<Tag> = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("pack")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "a field may carry only one #[pack(...)] tag",
            ));
        }
        let literal: LitStr = attr.parse_args()?;
        found = Some(Tag::parse(&literal.value()));
    }
    Ok(found.unwrap_or(Tag::None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_vocabulary() {
        assert_eq!(Tag::parse(""), Tag::None);
        assert_eq!(Tag::parse("-"), Tag::Skip);
        assert_eq!(Tag::parse("err.code"), Tag::Code);
        assert_eq!(Tag::parse("err.msg"), Tag::Message);
        assert_eq!(Tag::parse("-1"), Tag::Literal("-1".to_string()));
        assert_eq!(Tag::parse("err.other"), Tag::Literal("err.other".to_string()));
    }

    #[test]
    fn test_field_tag_rejects_duplicates() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[pack("a")]), parse_quote!(#[pack("b")])];
        assert!(field_tag(&attrs).is_err());
    }

    #[test]
    fn test_field_tag_ignores_other_attributes() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(rename = "x")]),
            parse_quote!(#[pack("err.msg")]),
        ];
        assert_eq!(field_tag(&attrs).unwrap(), Tag::Message);
    }

    #[test]
    fn test_expand_rejects_enums() {
        let input: DeriveInput = parse_quote! {
            enum Outcome { Ok, Failed }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn test_expand_struct() {
        let input: DeriveInput = parse_quote! {
            struct Resp {
                #[pack("err.code")]
                code: i64,
                body: Inner,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("Instruction :: Code"));
        assert!(out.contains("FieldKind :: Nested"));
    }
}
