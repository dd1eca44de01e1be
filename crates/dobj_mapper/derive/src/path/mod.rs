//! This independent module is used to provide the required path.
//! So as to minimize changes when the `dobj_mapper` structure is modified.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `dobj_mapper` crate.
///
/// 1. For crates that depend on `dobj_mapper`, `::dobj_mapper` is returned.
/// 2. For crates that depend on `dobj`, `::dobj::mapper` is returned.
/// 3. For other situations, `::dobj_mapper` is returned, but this may be incorrect.
///
/// Reading the manifest is relatively expensive, so the path is resolved
/// once per derive and passed around.
pub(crate) fn dobj_mapper() -> syn::Path {
    dobj_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("dobj_mapper"))
}

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

#[inline(always)]
pub(crate) fn data_object_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::DataObject
    }
}

#[inline(always)]
pub(crate) fn object_info_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::info::ObjectInfo
    }
}

#[inline(always)]
pub(crate) fn object_ref_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::info::ObjectRef
    }
}

#[inline(always)]
pub(crate) fn type_tag_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::info::TypeTag
    }
}

#[inline(always)]
pub(crate) fn resolve_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::resolve
    }
}

#[inline(always)]
pub(crate) fn field_type_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::resolve::FieldType
    }
}

#[inline(always)]
pub(crate) fn resolved_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::hydrate::Resolved
    }
}

#[inline(always)]
pub(crate) fn resolved_fields_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::hydrate::ResolvedFields
    }
}

#[inline(always)]
pub(crate) fn ser_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ser
    }
}

#[inline(always)]
pub(crate) fn field_value_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ser::FieldValue
    }
}

#[inline(always)]
pub(crate) fn record_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::Record
    }
}

#[inline(always)]
pub(crate) fn to_record_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::ToRecord
    }
}

#[inline(always)]
pub(crate) fn value_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::Value
    }
}

#[inline(always)]
pub(crate) fn result_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::Result
    }
}

#[inline(always)]
pub(crate) fn json_(crate_path: &syn::Path) -> TokenStream {
    quote! {
        #crate_path::__macro_exports::json
    }
}
