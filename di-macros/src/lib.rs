//! Derive macros for Curricula's compile-time dependency injection.
//!
//! - `#[derive(Context)]` marks the root context: each field becomes
//!   extractable from it through `FromRef`.
//! - `#[derive(FromContext)]` builds a service from the context by
//!   resolving every field through `FromRef`.
//!
//! Generated code refers to `crate::FromRef`, so the consuming crate must
//! expose the trait at its root.

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod expand;

/// Implements `FromRef<Self>` for the type of every field by cloning it out
/// of the context.
///
/// ```ignore
/// #[derive(Context, Clone)]
/// pub struct Context {
///     pub store: InMemoryStore,
///     pub config: Arc<Config>,
/// }
///
/// // impl FromRef<Context> for InMemoryStore { ... }
/// // impl FromRef<Context> for Arc<Config> { ... }
/// ```
#[proc_macro_derive(Context)]
pub fn derive_context(input: TokenStream) -> TokenStream {
    expand::context(parse_macro_input!(input))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `FromRef<Context>` for a service whose fields can each be
/// resolved from the `Context` type in scope at the derive site.
///
/// ```ignore
/// #[derive(FromContext, Clone)]
/// pub struct CourseService {
///     store: InMemoryStore,    // InMemoryStore::from_ref(ctx)
///     config: Arc<Config>,     // Arc::<Config>::from_ref(ctx)
/// }
/// ```
#[proc_macro_derive(FromContext)]
pub fn derive_from_context(input: TokenStream) -> TokenStream {
    expand::from_context(parse_macro_input!(input))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
