use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, Result, Token, Type,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_from_events(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromEvents` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromEvents` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut kinds = HashSet::new();
    for field in &fields {
        if !kinds.insert(field.kind.to_string()) {
            Err(Error::new_spanned(
                &field.kind,
                "Message kinds must be unique.",
            ))?
        }
    }

    let cases = fields.iter().map(|field| {
        let FieldMetadata {
            name,
            kind,
            storage,
        } = field;

        let assignment = match storage {
            Storage::Option => quote! {
                self.#name = Some(event.clone())
            },
            Storage::Vec => quote! {
                self.#name.push(event.clone())
            },
            Storage::Handler(field_type, handler) => {
                let body = &handler.body;
                let acc = handler.inputs.iter().nth(0).unwrap();
                let val = handler.inputs.iter().nth(1).unwrap();

                quote! {
                    (|#acc: &mut #field_type, #val| {#body})(&mut self.#name, event)
                }
            }
        };

        quote! { ::fermata::sans::event::MessageKind::#kind => { #assignment; } }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl ::fermata::avec::FromEvents for #name {
            #[allow(unreachable_patterns)]
            fn add_event(&mut self, event: &::fermata::sans::event::Event) {
                match event.kind() {
                    #(#cases)*
                    _ => {}
                }
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    kind: Ident,
    storage: Storage,
}

#[derive(Debug)]
enum Storage {
    Option,
    Vec,
    Handler(Type, ExprClosure),
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("event")) else {
            return Ok(None);
        };

        let EventAttribute { kind, handler } = attr.meta.require_list()?.parse_args()?;

        let storage = if let Some(handler) = handler {
            if handler.inputs.len() != 2 {
                Err(Error::new_spanned(
                    &handler,
                    "Handler closure must have two parameters.",
                ))?
            }

            Storage::Handler(field.ty.clone(), handler)
        } else {
            let Type::Path(path) = &field.ty else {
                Err(Error::new_spanned(
                    &field.ty,
                    "Field must have a type annotation.",
                ))?
            };

            let Some(segment) = path.path.segments.last() else {
                Err(Error::new_spanned(
                    &path.path.segments,
                    "Field without a handler must have an `Option<Event>` or `Vec<Event>` type.",
                ))?
            };

            if segment.ident == "Option" {
                Storage::Option
            } else if segment.ident == "Vec" {
                Storage::Vec
            } else {
                Err(Error::new_spanned(
                    &segment.ident,
                    "Field without a handler must have an `Option<Event>` or `Vec<Event>` type.",
                ))?
            }
        };

        Ok(Some(Self {
            name,
            kind,
            storage,
        }))
    }
}

#[derive(Debug)]
struct EventAttribute {
    kind: Ident,
    handler: Option<ExprClosure>,
}

impl Parse for EventAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let kind = input.parse::<Ident>()?;

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { kind, handler })
    }
}
