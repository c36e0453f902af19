use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_events;

#[proc_macro_derive(FromEvents, attributes(event))]
pub fn derive_from_events(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_events::expand_from_events(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
