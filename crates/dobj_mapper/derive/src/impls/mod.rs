//! Code generation.

// -----------------------------------------------------------------------------
// Modules

mod data_object;
mod field_type;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DataObjectStruct;

pub(crate) use data_object::impl_trait_data_object;
pub(crate) use field_type::{impl_trait_field_type, impl_trait_field_value, impl_trait_to_record};

/// All impls generated by `#[derive(DataObject)]`.
pub(crate) fn impl_data_object(info: &DataObjectStruct) -> TokenStream {
    let data_object_tokens = impl_trait_data_object(info);
    let field_type_tokens = impl_trait_field_type(info);
    let field_value_tokens = impl_trait_field_value(info);
    let to_record_tokens = impl_trait_to_record(info);

    quote! {
        const _: () = {
            #data_object_tokens

            #field_type_tokens

            #field_value_tokens

            #to_record_tokens
        };
    }
}
