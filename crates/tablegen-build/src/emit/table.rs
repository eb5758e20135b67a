use crate::emit::{Artifact, EmitOptions, lit, ty::field_type};
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use syn::Path;
use tablegen_schema::{
    layout::{DynamicSlot, Layout, StaticSlot},
    node::{Field, Table},
};

/// Emit the artifact for one table.
#[must_use]
pub fn emit_table(table: &Table, layout: &Layout, options: &EmitOptions) -> Artifact {
    let builder = TableBuilder {
        table,
        layout,
        rt: &options.runtime,
    };

    let tokens = builder.generate();

    Artifact::new(format!("{}.rs", table.artifact_name()), &tokens)
}

///
/// Placement
/// where a value field lives inside the value blob
///

enum Placement<'a> {
    Static(&'a StaticSlot),
    Dynamic(&'a DynamicSlot),
}

///
/// TableBuilder
///

struct TableBuilder<'a> {
    table: &'a Table,
    layout: &'a Layout,
    rt: &'a Path,
}

impl<'a> TableBuilder<'a> {
    fn generate(&self) -> TokenStream {
        let consts = self.consts();
        let key = self.key_struct();
        let record = self.record_struct();
        let raw = self.raw_accessors();

        quote! {
            #consts
            #key
            #record
            #raw
        }
    }

    fn key_ident(&self) -> Ident {
        format_ident!("{}Key", self.table.name)
    }

    fn record_ident(&self) -> Ident {
        format_ident!("{}", self.table.name)
    }

    fn placement(&self, field: &Field) -> Option<Placement<'a>> {
        if let Some(slot) = self.layout.static_data.iter().find(|s| s.field == field.name) {
            return Some(Placement::Static(slot));
        }

        self.layout
            .dynamic
            .iter()
            .find(|s| s.field == field.name)
            .map(Placement::Dynamic)
    }

    //
    // constants
    //

    fn consts(&self) -> TokenStream {
        let name = self.table.name.as_str();
        let key_width = lit(self.layout.key_width());
        let static_width = lit(self.layout.static_data_width());
        let dynamic_count = lit(self.layout.dynamic.len());
        let fingerprint = Literal::u64_unsuffixed(self.layout.fingerprint());

        let key_names: Vec<&str> = self.table.key_fields.iter().map(|f| f.name.as_str()).collect();
        let value_names: Vec<&str> = self.table.value_fields.iter().map(|f| f.name.as_str()).collect();
        let key_len = lit(key_names.len());
        let value_len = lit(value_names.len());

        quote! {
            /// Table name as declared in the schema.
            pub const TABLE_NAME: &str = #name;

            /// Width in bytes of the encoded key blob.
            pub const KEY_WIDTH: usize = #key_width;

            /// Width in bytes of the static section of the value blob.
            pub const STATIC_DATA_WIDTH: usize = #static_width;

            /// Number of length-prefixed fields after the static section.
            pub const DYNAMIC_FIELD_COUNT: usize = #dynamic_count;

            pub const KEY_FIELDS: [&str; #key_len] = [#(#key_names),*];

            pub const VALUE_FIELDS: [&str; #value_len] = [#(#value_names),*];

            /// Hash of the planned layout; changes whenever the wire format does.
            pub const LAYOUT_FINGERPRINT: u64 = #fingerprint;
        }
    }

    //
    // shared struct pieces
    //

    fn struct_def(&self, ident: &Ident, fields: &[Field]) -> TokenStream {
        let defs = fields.iter().map(|field| {
            let name = format_ident!("{}", field.name);
            let ty = field_type(&field.ty, self.rt);
            quote!(pub #name: #ty)
        });

        quote! {
            #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
            #[allow(non_camel_case_types, non_snake_case)]
            pub struct #ident {
                #(#defs,)*
            }
        }
    }

    fn constructor(&self, fields: &[Field]) -> TokenStream {
        let names: Vec<Ident> = fields.iter().map(|f| format_ident!("{}", f.name)).collect();
        let types = fields.iter().map(|f| field_type(&f.ty, self.rt));

        quote! {
            #[allow(clippy::too_many_arguments)]
            #[must_use]
            pub fn new(#(#names: #types),*) -> Self {
                Self { #(#names),* }
            }
        }
    }

    fn accessors(&self, fields: &[Field]) -> TokenStream {
        fields
            .iter()
            .map(|field| {
                let name = format_ident!("{}", field.name);
                let getter = format_ident!("get_{}", field.name);
                let setter = format_ident!("set_{}", field.name);
                let ty = field_type(&field.ty, self.rt);

                quote! {
                    #[must_use]
                    pub const fn #getter(&self) -> &#ty {
                        &self.#name
                    }

                    pub fn #setter(&mut self, value: #ty) {
                        self.#name = value;
                    }
                }
            })
            .collect()
    }

    // write_static
    // `out` must be exactly as wide as the blob the slots were planned for
    fn write_static(&self, slots: &[StaticSlot]) -> TokenStream {
        let rt = self.rt;

        slots
            .iter()
            .map(|slot| {
                let name = format_ident!("{}", slot.field);
                let ty = field_type(&slot.ty, rt);
                let start = lit(slot.offset);
                let end = lit(slot.end());

                quote! {
                    <#ty as #rt::StaticCodec>::write_to(&self.#name, &mut out[#start..#end]);
                }
            })
            .collect()
    }

    fn read_static(&self, slot: &StaticSlot, blob: &Ident) -> TokenStream {
        let rt = self.rt;
        let ty = field_type(&slot.ty, rt);
        let start = lit(slot.offset);
        let end = lit(slot.end());

        quote!(<#ty as #rt::StaticCodec>::read_from(&#blob[#start..#end])?)
    }

    //
    // key struct
    //

    fn key_struct(&self) -> TokenStream {
        let rt = self.rt;
        let ident = self.key_ident();
        let fields = &self.table.key_fields;

        let def = self.struct_def(&ident, fields);
        let constructor = self.constructor(fields);
        let accessors = self.accessors(fields);
        let writes = self.write_static(&self.layout.key);

        let bytes = format_ident!("bytes");
        let reads = self.layout.key.iter().map(|slot| {
            let name = format_ident!("{}", slot.field);
            let read = self.read_static(slot, &bytes);
            quote!(#name: #read)
        });

        quote! {
            #def

            #[allow(non_snake_case)]
            impl #ident {
                #constructor
                #accessors

                /// Encode the key blob.
                #[must_use]
                pub fn encode(&self) -> [u8; KEY_WIDTH] {
                    let mut out = [0_u8; KEY_WIDTH];
                    #writes

                    out
                }

                /// Decode a key blob of exactly `KEY_WIDTH` bytes.
                pub fn decode(#bytes: &[u8]) -> ::std::result::Result<Self, #rt::DecodeError> {
                    #rt::check_width(#bytes, KEY_WIDTH)?;

                    Ok(Self {
                        #(#reads,)*
                    })
                }
            }
        }
    }

    //
    // record struct
    //

    fn record_struct(&self) -> TokenStream {
        let rt = self.rt;
        let ident = self.record_ident();
        let fields = &self.table.value_fields;

        let def = self.struct_def(&ident, fields);
        let constructor = self.constructor(fields);
        let accessors = self.accessors(fields);
        let encode_static = if self.layout.static_data.is_empty() {
            quote!([0_u8; STATIC_DATA_WIDTH])
        } else {
            let writes = self.write_static(&self.layout.static_data);
            quote! {
                let mut out = [0_u8; STATIC_DATA_WIDTH];
                #writes

                out
            }
        };
        let encode = self.record_encode();
        let decode = self.record_decode();

        quote! {
            #def

            #[allow(non_snake_case)]
            impl #ident {
                #constructor
                #accessors

                /// Encode only the static section of the value blob.
                #[must_use]
                pub fn encode_static(&self) -> [u8; STATIC_DATA_WIDTH] {
                    #encode_static
                }

                /// Encode the value blob: the static section followed by every
                /// dynamic field behind its length prefix.
                pub fn encode(&self) -> ::std::result::Result<::std::vec::Vec<u8>, #rt::EncodeError> {
                    #encode
                }

                /// Decode a value blob, rejecting any trailing bytes.
                pub fn decode(bytes: &[u8]) -> ::std::result::Result<Self, #rt::DecodeError> {
                    #decode
                }
            }
        }
    }

    fn record_encode(&self) -> TokenStream {
        let rt = self.rt;

        if self.layout.dynamic.is_empty() {
            return quote! {
                Ok(self.encode_static().to_vec())
            };
        }

        let pushes = self.layout.dynamic.iter().map(|slot| {
            let name = format_ident!("{}", slot.field);
            let label = slot.field.as_str();
            quote!(writer.push(#label, &self.#name)?;)
        });

        quote! {
            let mut out = self.encode_static().to_vec();
            let mut writer = #rt::DynamicWriter::new(&mut out);
            #(#pushes)*

            Ok(out)
        }
    }

    fn record_decode(&self) -> TokenStream {
        let rt = self.rt;
        let static_data = format_ident!("static_data");

        let split = if self.layout.static_data.is_empty() {
            quote!(let (_, dynamic) = #rt::split_static(bytes, STATIC_DATA_WIDTH)?;)
        } else {
            quote!(let (#static_data, dynamic) = #rt::split_static(bytes, STATIC_DATA_WIDTH)?;)
        };
        let reader = if self.layout.dynamic.is_empty() {
            quote!(let reader = #rt::DynamicReader::new(dynamic);)
        } else {
            quote!(let mut reader = #rt::DynamicReader::new(dynamic);)
        };

        // struct literal fields evaluate in written order, which keeps the
        // dynamic reads in declaration order
        let inits = self.table.value_fields.iter().filter_map(|field| {
            let name = format_ident!("{}", field.name);
            let init = match self.placement(field)? {
                Placement::Static(slot) => self.read_static(slot, &static_data),
                Placement::Dynamic(slot) => {
                    let ty = field_type(&slot.ty, rt);
                    quote!(reader.read::<#ty>()?)
                }
            };

            Some(quote!(#name: #init))
        });

        quote! {
            #split
            #reader
            let record = Self {
                #(#inits,)*
            };
            reader.finish()?;

            Ok(record)
        }
    }

    //
    // raw blob accessors
    //

    fn raw_accessors(&self) -> TokenStream {
        let key = self.layout.key.iter().map(|slot| self.raw_static(slot, "key"));
        let data = self
            .layout
            .static_data
            .iter()
            .map(|slot| self.raw_static(slot, "data"));
        let dynamic = self.layout.dynamic.iter().map(|slot| self.raw_dynamic(slot));

        quote! {
            #(#key)*
            #(#data)*
            #(#dynamic)*
        }
    }

    fn raw_static(&self, slot: &StaticSlot, blob: &str) -> TokenStream {
        let rt = self.rt;
        let blob = format_ident!("{blob}");
        let reader = format_ident!("read_{}", slot.field);
        let writer = format_ident!("write_{}", slot.field);
        let ty = field_type(&slot.ty, rt);
        let offset = lit(slot.offset);
        let width = lit(slot.width);

        quote! {
            #[allow(non_snake_case)]
            pub fn #reader(#blob: &[u8]) -> ::std::result::Result<#ty, #rt::DecodeError> {
                <#ty as #rt::StaticCodec>::read_from(#rt::slot(#blob, #offset, #width)?)
            }

            #[allow(non_snake_case)]
            pub fn #writer(#blob: &mut [u8], value: &#ty) -> ::std::result::Result<(), #rt::DecodeError> {
                <#ty as #rt::StaticCodec>::write_to(value, #rt::slot_mut(#blob, #offset, #width)?);

                Ok(())
            }
        }
    }

    fn raw_dynamic(&self, slot: &DynamicSlot) -> TokenStream {
        let rt = self.rt;
        let reader = format_ident!("read_{}", slot.field);
        let ty = field_type(&slot.ty, rt);
        let skips = (0..slot.index).map(|_| quote!(reader.skip()?;));

        quote! {
            #[allow(non_snake_case)]
            pub fn #reader(data: &[u8]) -> ::std::result::Result<#ty, #rt::DecodeError> {
                let (_, dynamic) = #rt::split_static(data, STATIC_DATA_WIDTH)?;
                let mut reader = #rt::DynamicReader::new(dynamic);
                #(#skips)*

                reader.read::<#ty>()
            }
        }
    }
}
