use crate::emit::{Artifact, ENUMS_ARTIFACT, EmitOptions, lit};
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use tablegen_schema::{
    MAX_ENUM_VARIANTS,
    node::{EnumDef, ValidatedSchema},
};

/// Emit the shared `enums.rs` artifact holding every enum in the schema.
#[must_use]
pub fn emit_enums(schema: &ValidatedSchema, options: &EmitOptions) -> Artifact {
    let defs = schema.enums().iter().map(|def| emit_enum(def, options));

    let tokens = quote! {
        #(#defs)*
    };

    Artifact::new(format!("{ENUMS_ARTIFACT}.rs"), &tokens)
}

/// Emit one `#[repr(u8)]` enum; variant `i` encodes as `i`.
#[must_use]
pub fn emit_enum(def: &EnumDef, options: &EmitOptions) -> TokenStream {
    let rt = &options.runtime;
    let ident = format_ident!("{}", def.name);
    let name = def.name.as_str();
    let count = lit(def.variant_count());

    let variants: Vec<_> = def.variants.iter().map(|v| format_ident!("{v}")).collect();
    let names: Vec<&str> = def.variants.iter().map(String::as_str).collect();
    let values: Vec<Literal> = (0..def.variant_count())
        .map(|i| Literal::u8_unsuffixed(u8::try_from(i).unwrap_or(u8::MAX)))
        .collect();

    let decls = variants.iter().zip(&values).enumerate().map(|(i, (variant, value))| {
        let default = (i == 0).then(|| quote!(#[default]));
        quote!(#default #variant = #value)
    });

    // a full enum covers every byte, so the catch-all arm would be unreachable
    let fallback = (def.variant_count() < MAX_ENUM_VARIANTS).then(|| {
        quote! {
            value => Err(#rt::DecodeError::InvalidEnumValue {
                enum_name: Self::NAME,
                value,
            }),
        }
    });

    quote! {
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[allow(non_camel_case_types)]
        #[repr(u8)]
        pub enum #ident {
            #(#decls,)*
        }

        impl #ident {
            pub const NAME: &'static str = #name;

            /// Every variant in encoding order.
            pub const VARIANTS: [Self; #count] = [#(Self::#variants),*];

            pub const NAMES: [&'static str; #count] = [#(#names),*];

            #[must_use]
            pub const fn to_u8(self) -> u8 {
                self as u8
            }

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            /// Decode a stored discriminant.
            pub const fn from_u8(value: u8) -> ::std::result::Result<Self, #rt::DecodeError> {
                match value {
                    #(#values => Ok(Self::#variants),)*
                    #fallback
                }
            }
        }

        impl ::std::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for #ident {
            type Err = #rt::ParseEnumError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    #(#names => Ok(Self::#variants),)*
                    _ => Err(#rt::ParseEnumError {
                        enum_name: Self::NAME,
                        name: s.to_string(),
                    }),
                }
            }
        }

        impl #rt::StaticCodec for #ident {
            const WIDTH: usize = 1;

            fn write_to(&self, out: &mut [u8]) {
                out[0] = self.to_u8();
            }

            fn read_from(bytes: &[u8]) -> ::std::result::Result<Self, #rt::DecodeError> {
                Self::from_u8(<u8 as #rt::StaticCodec>::read_from(bytes)?)
            }
        }
    }
}
