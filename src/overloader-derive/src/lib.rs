mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{DeriveInput, Result as SynResult};

#[proc_macro_derive(Target, attributes(target))]
pub fn derive_target(item: TokenStream) -> TokenStream {
    match derive_target_impl(item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_target_impl(item: TokenStream) -> SynResult<TokenStream2> {
    let input = syn::parse::<DeriveInput>(item)?;
    let data = attrs::parse_target(&input)?;
    Ok(impls::expand_implementation(&input, data))
}
