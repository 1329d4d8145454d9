//! Token expansion for the derives.

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields};

/// Named fields of a struct, or a spanned error naming the derive.
fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(&named.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{} needs a struct with named fields", derive),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{} can only be derived for structs", derive),
        )),
    }
}

pub fn context(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let impls = named_fields(&input, "Context")?.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            impl #impl_generics crate::FromRef<#name #ty_generics> for #ty #where_clause {
                fn from_ref(ctx: &#name #ty_generics) -> Self {
                    ::core::clone::Clone::clone(&ctx.#ident)
                }
            }
        }
    });

    Ok(quote! { #(#impls)* })
}

pub fn from_context(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let inits = named_fields(&input, "FromContext")?.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        quote! {
            #ident: <#ty as crate::FromRef<Context>>::from_ref(ctx)
        }
    });

    Ok(quote! {
        impl #impl_generics crate::FromRef<Context> for #name #ty_generics #where_clause {
            fn from_ref(ctx: &Context) -> Self {
                Self { #(#inits),* }
            }
        }
    })
}
