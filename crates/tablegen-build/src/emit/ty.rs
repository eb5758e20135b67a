use crate::emit::{ENUMS_ARTIFACT, lit};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Path;
use tablegen_schema::types::{Primitive, TypeDescriptor};

/// Rust type used for a field in generated code.
pub(crate) fn field_type(ty: &TypeDescriptor, rt: &Path) -> TokenStream {
    match ty {
        TypeDescriptor::Primitive(primitive) => primitive_type(*primitive, rt),
        TypeDescriptor::Enum { name, .. } => {
            let module = format_ident!("{ENUMS_ARTIFACT}");
            let ident = format_ident!("{name}");

            quote!(super::#module::#ident)
        }
    }
}

fn primitive_type(primitive: Primitive, rt: &Path) -> TokenStream {
    match primitive {
        Primitive::Address => quote!(#rt::Address),
        Primitive::Bool => quote!(bool),
        Primitive::Bytes(len) => {
            let len = lit(usize::from(len));
            quote!([u8; #len])
        }
        Primitive::DynBytes => quote!(::std::vec::Vec<u8>),
        Primitive::String => quote!(::std::string::String),
        Primitive::Int(bits) => match bits {
            8 => quote!(i8),
            16 => quote!(i16),
            32 => quote!(i32),
            64 => quote!(i64),
            128 => quote!(i128),
            _ => {
                let width = lit(usize::from(bits / 8));
                quote!(#rt::Int<#width>)
            }
        },
        Primitive::Uint(bits) => match bits {
            8 => quote!(u8),
            16 => quote!(u16),
            32 => quote!(u32),
            64 => quote!(u64),
            128 => quote!(u128),
            _ => {
                let width = lit(usize::from(bits / 8));
                quote!(#rt::Uint<#width>)
            }
        },
    }
}
