use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::DataObjectStruct;

/// Generates the `FieldType` impl: a data object is a nested field type.
pub(crate) fn impl_trait_field_type(info: &DataObjectStruct) -> TokenStream {
    let crate_path = info.crate_path();
    let field_type_ = crate::path::field_type_(crate_path);
    let type_tag_ = crate::path::type_tag_(crate_path);
    let object_ref_ = crate::path::object_ref_(crate_path);
    let resolved_ = crate::path::resolved_(crate_path);
    let resolve_ = crate::path::resolve_(crate_path);
    let result_ = crate::path::result_(crate_path);

    let ident = info.ident();

    quote! {
        impl #field_type_ for #ident {
            #[inline]
            fn type_tag() -> #type_tag_ {
                #type_tag_::NestedObject(#object_ref_::of::<Self>())
            }

            fn from_resolved(__resolved: #resolved_) -> #result_<Self> {
                #resolve_::object_from_resolved::<Self>(__resolved)
            }
        }
    }
}

/// Generates the `FieldValue` impl: a data object serializes to a mapping.
pub(crate) fn impl_trait_field_value(info: &DataObjectStruct) -> TokenStream {
    let crate_path = info.crate_path();
    let field_value_ = crate::path::field_value_(crate_path);
    let ser_ = crate::path::ser_(crate_path);
    let value_ = crate::path::value_(crate_path);

    let ident = info.ident();

    quote! {
        impl #field_value_ for #ident {
            #[inline]
            fn to_value(&self, __options: #ser_::SerializeOptions) -> #value_ {
                #ser_::serialize_value(self, __options)
            }
        }
    }
}

/// Generates the `ToRecord` impl: a data object is a record source.
pub(crate) fn impl_trait_to_record(info: &DataObjectStruct) -> TokenStream {
    let crate_path = info.crate_path();
    let to_record_ = crate::path::to_record_(crate_path);
    let data_object_ = crate::path::data_object_(crate_path);
    let record_ = crate::path::record_(crate_path);

    let ident = info.ident();

    quote! {
        impl #to_record_ for #ident {
            #[inline]
            fn to_record(&self) -> #record_ {
                #data_object_::to_array(self, false)
            }
        }
    }
}
