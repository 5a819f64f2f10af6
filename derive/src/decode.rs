use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_decode(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`Decode` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`Decode` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields marked `skip`.
        .collect::<Result<Vec<_>>>()?;

    check_positions(&fields)?;

    let shapes = fields.iter().map(|field| {
        let FieldMetadata { segment, tag, .. } = field;
        let tag = tag.as_ref().map(LitStr::value).unwrap_or_default();

        quote! {
            ::hl7_decode::avec::FieldShape { name: #segment, tag: #tag }
        }
    });

    let cases = fields.iter().enumerate().map(|(index, field)| {
        let name = &field.name;
        quote! { #index => Some(&mut self.#name), }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::hl7_decode::avec::Structure for #name #ty_generics #where_clause {
            fn shape(&self) -> &'static [::hl7_decode::avec::FieldShape] {
                const SHAPE: &[::hl7_decode::avec::FieldShape] = &[#(#shapes),*];
                SHAPE
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::hl7_decode::avec::Decode> {
                match index {
                    #(#cases)*
                    _ => None,
                }
            }
        }

        impl #impl_generics ::hl7_decode::avec::Decode for #name #ty_generics #where_clause {
            fn assign(&mut self, value: &::hl7_decode::sans::Value<'_>) {
                ::hl7_decode::avec::mapping::assign_value(self, value)
            }

            fn assign_segment(
                &mut self,
                occurrences: &[::hl7_decode::avec::document::FieldMap<'_>],
            ) {
                ::hl7_decode::avec::mapping::assign_segment(self, occurrences)
            }

            fn assign_group(
                &mut self,
                document: &::hl7_decode::avec::document::Document<'_>,
            ) -> ::core::option::Option<usize> {
                Some(::hl7_decode::avec::mapping::assign_group(self, document))
            }

            fn assign_unmatched(
                &mut self,
                document: &::hl7_decode::avec::document::Document<'_>,
            ) -> bool {
                ::hl7_decode::avec::mapping::map(self, document)
            }

            fn structure(
                &mut self,
            ) -> ::core::option::Option<&mut dyn ::hl7_decode::avec::Structure> {
                Some(self)
            }
        }
    };

    Ok(expanded.into())
}

/// Reject fields sharing a position, whether explicit or implied by
/// declaration order.
fn check_positions(fields: &[FieldMetadata]) -> Result<()> {
    let mut positions = HashSet::new();

    for (index, field) in fields.iter().enumerate() {
        let position = field.index().unwrap_or(index + 1);

        if !positions.insert(position) {
            let span = field.tag.as_ref().map_or(field.name.span(), LitStr::span);
            Err(Error::new(span, "Field identifiers must be unique."))?
        }
    }

    Ok(())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    /// Upper-cased identifier, the segment name absent one in the tag.
    segment: String,
    tag: Option<LitStr>,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new(field.span(), "Field must be named."))?
        };

        let segment = name.unraw().to_string().to_uppercase();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("hl7")) else {
            return Ok(Some(Self {
                name,
                segment,
                tag: None,
            }));
        };

        let tag = match attr.meta.require_list()?.parse_args()? {
            FieldAttribute::Skip => return Ok(None),
            FieldAttribute::Tag(tag) => tag,
        };

        Ok(Some(Self {
            name,
            segment,
            tag: Some(tag),
        }))
    }

    /// The explicit field index supplied by the tag, if any.
    fn index(&self) -> Option<usize> {
        let value = self.tag.as_ref()?.value();
        let name = value.split(',').next()?;

        name.parse().ok()
    }
}

#[derive(Debug)]
enum FieldAttribute {
    Skip,
    Tag(LitStr),
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        if let Ok(ident) = input.parse::<Ident>() {
            if ident == "skip" {
                return Ok(Self::Skip);
            }

            Err(Error::new_spanned(
                ident,
                "Field attribute must be a string literal or `skip`.",
            ))?
        }

        Ok(Self::Tag(input.parse::<LitStr>()?))
    }
}
