//! Full paths of core items.
//!
//! Generated code must not depend on what the invoking crate has in scope.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

pub(crate) struct OptionFP;
pub(crate) struct ResultFP;
pub(crate) struct DefaultFP;
pub(crate) struct CloneFP;

impl ToTokens for OptionFP {
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::option::Option));
    }
}

impl ToTokens for ResultFP {
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::result::Result));
    }
}

impl ToTokens for DefaultFP {
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::default::Default));
    }
}

impl ToTokens for CloneFP {
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(quote!(::core::clone::Clone));
    }
}
