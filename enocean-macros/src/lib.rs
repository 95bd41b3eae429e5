//! Procedural macros for the enocean crates.
//!
//! [`fields`] turns a struct declaration into a zero-copy reader/writer over a
//! byte buffer. Fields are laid out in declaration order:
//! - `#[bits(n)]` packs a `bool` or `u8` into the current byte, starting at the
//!   least significant bit;
//! - fields without `#[bits]` are byte aligned, `u16` and `u32` are big
//!   endian;
//! - `#[into(Type)]` converts the raw value with `From` in both directions;
//! - fields with `reserved` in their name only take up space.
use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{parse_macro_input, Attribute, ItemStruct};

/// Generate a reader/writer for a bit-packed structure.
#[proc_macro_attribute]
pub fn fields(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);

    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: ItemStruct) -> syn::Result<TokenStream> {
    let item_attr = input.attrs;
    let vis = input.vis;
    let name = input.ident;

    let mut getters = vec![];
    let mut setters = vec![];

    let mut offset = 0usize;
    let mut bits_offset = 0usize;

    for field in input.fields {
        let Some(fnname) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(
                &field,
                "only named fields are supported",
            ));
        };
        let ty = field.ty.to_token_stream().to_string();
        let docs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("doc"))
            .collect();
        let bits = int_attr(&field.attrs, "bits")?;
        let into = into_attr(&field.attrs)?;

        let width = match (bits, ty.as_str()) {
            (Some(_), "bool" | "u8") => 0,
            (None, "bool" | "u8") => 1,
            (None, "u16") => 2,
            (None, "u32") => 4,
            (Some(_), _) => {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "bit fields must be `bool` or `u8`",
                ))
            }
            (None, _) => {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "unsupported field type",
                ))
            }
        };

        match bits {
            Some(bits) if bits == 0 || bits_offset + bits > 8 => {
                return Err(syn::Error::new_spanned(
                    &fnname,
                    "bit field crosses a byte boundary",
                ));
            }
            None if bits_offset != 0 => {
                return Err(syn::Error::new_spanned(
                    &fnname,
                    "field does not start on a byte boundary",
                ));
            }
            _ => (),
        }

        if !fnname.to_string().contains("reserved") {
            let (raw_ty, read, write) = match (bits, ty.as_str()) {
                (Some(_), "bool") => (
                    quote!(bool),
                    quote! { (self.buffer.as_ref()[#offset] >> #bits_offset) & 0b1 != 0 },
                    quote! {
                        let byte = &mut self.buffer.as_mut()[#offset];
                        *byte = (*byte & !(0b1 << #bits_offset)) | ((value as u8) << #bits_offset);
                    },
                ),
                (Some(bits), _) => {
                    let mask = ((1u16 << bits) - 1) as u8;
                    (
                        quote!(u8),
                        quote! { (self.buffer.as_ref()[#offset] >> #bits_offset) & #mask },
                        quote! {
                            let byte = &mut self.buffer.as_mut()[#offset];
                            *byte = (*byte & !(#mask << #bits_offset)) | ((value & #mask) << #bits_offset);
                        },
                    )
                }
                (None, "bool") => (
                    quote!(bool),
                    quote! { self.buffer.as_ref()[#offset] != 0 },
                    quote! { self.buffer.as_mut()[#offset] = value as u8; },
                ),
                (None, "u8") => (
                    quote!(u8),
                    quote! { self.buffer.as_ref()[#offset] },
                    quote! { self.buffer.as_mut()[#offset] = value; },
                ),
                (None, _) => {
                    let end = offset + width;
                    let raw_ty = field.ty.to_token_stream();
                    (
                        raw_ty.clone(),
                        quote! {
                            let mut bytes = [0u8; #width];
                            bytes.copy_from_slice(&self.buffer.as_ref()[#offset..#end]);
                            #raw_ty::from_be_bytes(bytes)
                        },
                        quote! {
                            self.buffer.as_mut()[#offset..#end].copy_from_slice(&value.to_be_bytes());
                        },
                    )
                }
            };

            let setter = format_ident!("set_{}", fnname);
            let setter_doc = format!("Set the `{fnname}` field.");

            match into {
                Some(into) => {
                    getters.push(quote! {
                        #(#docs)*
                        #[inline]
                        pub fn #fnname(&self) -> #into {
                            <#into>::from({ #read })
                        }
                    });
                    setters.push(quote! {
                        #[doc = #setter_doc]
                        #[inline]
                        pub fn #setter(&mut self, value: #into) {
                            let value: #raw_ty = value.into();
                            #write
                        }
                    });
                }
                None => {
                    getters.push(quote! {
                        #(#docs)*
                        #[inline]
                        pub fn #fnname(&self) -> #raw_ty {
                            #read
                        }
                    });
                    setters.push(quote! {
                        #[doc = #setter_doc]
                        #[inline]
                        pub fn #setter(&mut self, value: #raw_ty) {
                            #write
                        }
                    });
                }
            }
        }

        match bits {
            Some(bits) => {
                bits_offset += bits;
                if bits_offset == 8 {
                    offset += 1;
                    bits_offset = 0;
                }
            }
            None => offset += width,
        }
    }

    if bits_offset != 0 {
        return Err(syn::Error::new_spanned(
            &name,
            "the last byte is not completely described",
        ));
    }

    let new_doc = format!("Create a new [`{name}`] reader/writer without checking the buffer length.");

    Ok(quote! {
        #(#item_attr)*
        #vis struct #name<T: AsRef<[u8]>> {
            buffer: T,
        }

        impl<T: AsRef<[u8]>> #name<T> {
            #[doc = #new_doc]
            pub fn new_unchecked(buffer: T) -> Self {
                Self { buffer }
            }

            /// Returns `true` when the buffer is long enough to hold every field.
            pub fn check_len(&self) -> bool {
                self.buffer.as_ref().len() >= Self::size()
            }

            /// Returns the size of this structure in bytes.
            pub const fn size() -> usize {
                #offset
            }

            /// Consume the reader and return the underlying buffer.
            pub fn into_inner(self) -> T {
                self.buffer
            }

            #(#getters)*
        }

        impl<T: AsRef<[u8]> + AsMut<[u8]>> #name<T> {
            #(#setters)*
        }
    }
    .into())
}

fn int_attr(attrs: &[Attribute], name: &str) -> syn::Result<Option<usize>> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident(name))
        .map(|attr| attr.parse_args::<syn::LitInt>()?.base10_parse::<usize>())
        .transpose()
}

fn into_attr(attrs: &[Attribute]) -> syn::Result<Option<syn::Type>> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident("into"))
        .map(|attr| attr.parse_args::<syn::Type>())
        .transpose()
}
