use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use crate::derive_data::DataObjectStruct;

/// Generates the `DataObject` impl.
///
/// Similar to following:
///
/// ```ignore
/// impl DataObject for Project {
///     fn describe() -> ObjectInfo {
///         ObjectInfo::new::<Self>("Project", [
///             resolve::classify::<String>("title"),
///             resolve::classify::<String>("domain").with_default(|| json!("example.com")),
///         ])
///     }
///
///     fn assemble(mut __fields: ResolvedFields, __parameters: &Record) -> Result<Self> {
///         Ok(Self {
///             title: __fields.take::<String>(0usize)?,
///             domain: __fields.take::<String>(1usize)?,
///             cache: <usize as Default>::default(),
///         })
///     }
///
///     fn field_at(&self, __index: usize) -> Option<&dyn FieldValue> { /* ... */ }
/// }
/// ```
pub(crate) fn impl_trait_data_object(info: &DataObjectStruct) -> TokenStream {
    use crate::path::fp::{CloneFP, DefaultFP, OptionFP, ResultFP};

    let crate_path = info.crate_path();
    let data_object_ = crate::path::data_object_(crate_path);
    let object_info_ = crate::path::object_info_(crate_path);
    let resolve_ = crate::path::resolve_(crate_path);
    let resolved_fields_ = crate::path::resolved_fields_(crate_path);
    let field_value_ = crate::path::field_value_(crate_path);
    let record_ = crate::path::record_(crate_path);
    let result_ = crate::path::result_(crate_path);
    let json_ = crate::path::json_(crate_path);

    let ident = info.ident();
    let type_name = LitStr::new(&ident.to_string(), ident.span());

    let descriptors = info.declared_fields().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        let with_snake_name = match &field.snake_name {
            Some(snake_name) => quote! {
                .with_snake_name(#snake_name)
            },
            None => crate::utils::empty(),
        };
        let with_default = match &field.attrs.default {
            Some(expr) => quote! {
                .with_default(|| #json_!(#expr))
            },
            None => crate::utils::empty(),
        };
        quote! {
            #resolve_::classify::<#ty>(#name) #with_snake_name #with_default
        }
    });

    let members = info.fields().iter().map(|field| {
        let member = field.ident;
        let ty = field.ty;
        let value = match field.index {
            Some(index) => quote! {
                __fields.take::<#ty>(#index)?
            },
            None if field.attrs.parameters.is_some() => quote! {
                <#ty as #CloneFP>::clone(__parameters)
            },
            None => quote! {
                <#ty as #DefaultFP>::default()
            },
        };
        quote! {
            #member: #value
        }
    });

    let field_arms = info.declared_fields().filter_map(|field| {
        let member = field.ident;
        let index = field.index?;
        Some(quote! {
            #index => #OptionFP::Some(&self.#member as &dyn #field_value_),
        })
    });

    let prepare_tokens = match &info.attrs().prepare {
        Some(prepare) => quote! {
            fn prepare(&mut self, __parameters: &#record_) -> #result_<()> {
                #prepare(self, __parameters)
            }
        },
        None => crate::utils::empty(),
    };

    quote! {
        impl #data_object_ for #ident {
            fn describe() -> #object_info_ {
                #object_info_::new::<Self>(#type_name, [
                    #(#descriptors,)*
                ])
            }

            #[allow(unused_mut)]
            fn assemble(
                mut __fields: #resolved_fields_,
                __parameters: &#record_,
            ) -> #result_<Self> {
                #ResultFP::Ok(Self {
                    #(#members,)*
                })
            }

            fn field_at(&self, __index: usize) -> #OptionFP<&dyn #field_value_> {
                match __index {
                    #(#field_arms)*
                    _ => #OptionFP::None,
                }
            }

            #prepare_tokens
        }
    }
}
