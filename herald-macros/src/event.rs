//! `#[derive(Event)]`.
//!
//! Field attributes:
//! - `#[propagation]` marks the `Propagation` field. Without it a field named
//!   `propagation` is used.
//! - `#[category]` marks the field whose value is the event category. Its type
//!   becomes `Event::Category`.
//!
//! Container attribute:
//! - `#[event(category = "name")]` sets a fixed `&'static str` category. When
//!   neither this nor a `#[category]` field is present, the category is the
//!   struct name.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Field, Fields, LitStr, parse_macro_input,
    punctuated::Punctuated, token::Comma,
};

/// Implementation of `#[derive(Event)]`.
pub fn derive_event_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "`Event` can only be derived for structs with named fields",
            ));
        }
    };

    let propagation = propagation_field(fields)?.ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "missing propagation flag: add a `propagation: Propagation` field or mark one with `#[propagation]`",
        )
    })?;
    let propagation_ident = &propagation.ident;

    let fixed = fixed_category(&input.attrs)?;
    let marked = single_marked(fields, "category")?;

    let (category_type, category_expr) = match (marked, fixed) {
        (Some(field), Some(lit)) => {
            return Err(syn::Error::new_spanned(
                lit,
                format!(
                    "`#[event(category = ...)]` conflicts with the `#[category]` field `{}`",
                    field.ident.as_ref().map(ToString::to_string).unwrap_or_default()
                ),
            ));
        }
        (Some(field), None) => {
            let ty = &field.ty;
            let ident = &field.ident;
            (
                quote! { #ty },
                quote! { ::core::clone::Clone::clone(&self.#ident) },
            )
        }
        (None, Some(lit)) => (quote! { &'static str }, quote! { #lit }),
        (None, None) => {
            let lit = LitStr::new(&name.to_string(), name.span());
            (quote! { &'static str }, quote! { #lit })
        }
    };

    Ok(quote! {
        impl #impl_generics ::herald::Event for #name #ty_generics #where_clause {
            type Category = #category_type;

            fn category(&self) -> Self::Category {
                #category_expr
            }

            fn propagation(&self) -> &::herald::Propagation {
                &self.#propagation_ident
            }
        }
    })
}

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn single_marked<'a>(
    fields: &'a Punctuated<Field, Comma>,
    attr: &str,
) -> syn::Result<Option<&'a Field>> {
    let mut marked = fields.iter().filter(|field| has_attr(&field.attrs, attr));
    let first = marked.next();
    if let Some(extra) = marked.next() {
        return Err(syn::Error::new_spanned(
            extra,
            format!("only one field may be marked `#[{attr}]`"),
        ));
    }
    Ok(first)
}

fn propagation_field(fields: &Punctuated<Field, Comma>) -> syn::Result<Option<&Field>> {
    if let Some(field) = single_marked(fields, "propagation")? {
        return Ok(Some(field));
    }
    Ok(fields
        .iter()
        .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "propagation")))
}

fn fixed_category(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut category = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("category") {
                category = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("unknown attribute, expected `category = \"...\"`"))
            }
        })?;
    }
    Ok(category)
}
