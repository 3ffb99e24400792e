//! `#[listener]`: turn a plain function into a reusable listener type.
//!
//! ```rust,ignore
//! #[herald::listener(priority = 10, filter = |e: &Order| e.total > 100)]
//! fn audit(order: &Order) -> Result<(), AuditError> {
//!     // ...
//!     Ok(())
//! }
//!
//! dispatcher.add_listener(OrderKind::Placed, &audit::listener());
//! ```
//!
//! The function is replaced by a unit struct of the same name that
//! implements `Handler<Order>`. `audit::listener()` hands out one shared
//! `Listener`, named after the function and created with the configured
//! priority on first use.

use proc_macro::TokenStream;
use proc_macro2::{Literal, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Expr, FnArg, Ident, ItemFn, LitInt, LitStr, Token, Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Implementation of `#[listener]`.
pub fn listener_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ListenerArgs);
    let input = parse_macro_input!(item as ItemFn);
    match expand(args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: ListenerArgs, input: ItemFn) -> syn::Result<TokenStream2> {
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let fn_attrs = &input.attrs;

    if let Some(asyncness) = &input.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "listener functions are called synchronously and cannot be async",
        ));
    }

    let inputs = &input.sig.inputs;
    if inputs.len() != 1 {
        return Err(syn::Error::new_spanned(
            inputs,
            "listener function must take exactly one argument: fn(event: &Event)",
        ));
    }
    let event_type = match inputs.first() {
        Some(FnArg::Typed(pat_type)) => match &*pat_type.ty {
            Type::Reference(type_ref) if type_ref.mutability.is_none() => &type_ref.elem,
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "listener event argument must be a shared reference (&Event)",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                inputs,
                "listener function must take an event argument: fn(event: &Event)",
            ));
        }
    };

    let struct_name = args.name.clone().unwrap_or_else(|| fn_name.clone());
    let listener_name = LitStr::new(&struct_name.to_string(), struct_name.span());
    let priority = priority_tokens(args.priority.unwrap_or(0));

    let body_name = format_ident!("__herald_{}_body", fn_name);
    let mut body = input.clone();
    body.sig.ident = body_name.clone();
    body.vis = syn::Visibility::Inherited;
    body.attrs.clear();

    let filter_check = args.filter.as_ref().map(|filter| {
        quote! {
            if !(#filter)(event) {
                return ::core::result::Result::Ok(());
            }
        }
    });

    Ok(quote! {
        #(#fn_attrs)*
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #fn_vis struct #struct_name;

        impl #struct_name {
            /// Listener name used in logs and errors.
            pub const NAME: &'static str = #listener_name;
            /// Priority assigned by [`Self::listener`]. Higher values run first.
            pub const PRIORITY: i32 = #priority;

            /// The listener backed by this handler.
            ///
            /// Every call returns a handle to the same listener, so it can be
            /// registered once and removed again by calling this a second time.
            pub fn listener() -> ::herald::Listener<#event_type> {
                static LISTENER: ::std::sync::OnceLock<::herald::Listener<#event_type>> =
                    ::std::sync::OnceLock::new();
                LISTENER
                    .get_or_init(|| {
                        let listener = ::herald::Listener::named_handler(Self::NAME, #struct_name);
                        listener.set_priority(Self::PRIORITY);
                        listener
                    })
                    .clone()
            }
        }

        impl ::herald::Handler<#event_type> for #struct_name {
            fn handle(
                &self,
                event: &#event_type,
            ) -> ::core::result::Result<(), ::herald::BoxError> {
                #body

                #filter_check
                ::herald::IntoOutcome::into_outcome(#body_name(event))
            }
        }
    })
}

/// `-N` as two tokens, so that `i32::MIN` stays a valid constant.
fn priority_tokens(priority: i32) -> TokenStream2 {
    let magnitude = Literal::i64_unsuffixed(i64::from(priority).abs());
    if priority < 0 {
        quote! { -#magnitude }
    } else {
        quote! { #magnitude }
    }
}

struct ListenerArgs {
    priority: Option<i32>,
    name: Option<Ident>,
    filter: Option<Expr>,
}

impl Parse for ListenerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut priority = None;
        let mut name = None;
        let mut filter = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "priority" => {
                    let negative = input.parse::<Option<Token![-]>>()?.is_some();
                    let lit: LitInt = input.parse()?;
                    let magnitude: i64 = lit.base10_parse()?;
                    let value = if negative { -magnitude } else { magnitude };
                    priority = Some(i32::try_from(value).map_err(|_| {
                        syn::Error::new(lit.span(), format!("priority {value} does not fit in i32"))
                    })?);
                }
                "name" => {
                    let lit: LitStr = input.parse()?;
                    let mut ident = syn::parse_str::<Ident>(&lit.value()).map_err(|_| {
                        syn::Error::new(
                            lit.span(),
                            format!("`{}` is not a valid identifier", lit.value()),
                        )
                    })?;
                    ident.set_span(lit.span());
                    name = Some(ident);
                }
                "filter" => {
                    let expr: Expr = input.parse()?;
                    filter = Some(expr);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ListenerArgs {
            priority,
            name,
            filter,
        })
    }
}
