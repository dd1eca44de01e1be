use std::collections::BTreeMap;

use dobj_utils::case::{camel_case, snake_case};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// DataObjectField

/// A named field of the derived struct.
pub(crate) struct DataObjectField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// Declared name, `None` for skipped and parameters fields.
    pub name: Option<LitStr>,
    /// Snake key taken from the identifier, `None` for renamed fields and
    /// fields that are not declared.
    pub snake_name: Option<LitStr>,
    /// Position in the declared fields, `None` for skipped and parameters
    /// fields.
    pub index: Option<usize>,
}

// -----------------------------------------------------------------------------
// DataObjectStruct

/// The parsed derive input.
pub(crate) struct DataObjectStruct<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    fields: Vec<DataObjectField<'a>>,
    crate_path: Path,
}

impl<'a> DataObjectStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`DataObject` cannot be derived for generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unnamed(_) | Fields::Unit => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`DataObject` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`DataObject` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`DataObject` cannot be derived for unions",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::with_capacity(named.named.len());
        let mut declared = BTreeMap::<String, &Ident>::new();
        let mut parameters: Option<&Ident> = None;
        let mut index = 0_usize;

        for field in &named.named {
            // `Fields::Named` always carries identifiers.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;

            if attrs.parameters.is_some() {
                if let Some(first) = parameters {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("`parameters` is already set on `{first}`"),
                    ));
                }
                parameters = Some(ident);
            }

            let (name, snake_name, field_index) = if attrs.is_declared() {
                let (name, snake_name) = match &attrs.rename {
                    Some(lit) => (lit.clone(), None),
                    None => (
                        LitStr::new(&declared_name(ident), ident.span()),
                        Some(LitStr::new(&snake_key(ident), ident.span())),
                    ),
                };

                if let Some(other) = declared.insert(name.value(), ident) {
                    return Err(syn::Error::new(
                        name.span(),
                        format!("`{}` is also declared by `{other}`", name.value()),
                    ));
                }

                index += 1;
                (Some(name), snake_name, Some(index - 1))
            } else {
                (None, None, None)
            };

            fields.push(DataObjectField {
                ident,
                ty: &field.ty,
                attrs,
                name,
                snake_name,
                index: field_index,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
            crate_path: crate::path::dobj_mapper(),
        })
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn crate_path(&self) -> &Path {
        &self.crate_path
    }

    /// All fields, in source order.
    #[inline]
    pub fn fields(&self) -> &[DataObjectField<'a>] {
        &self.fields
    }

    /// Declared fields, in declaration order.
    pub fn declared_fields(&self) -> impl Iterator<Item = &DataObjectField<'a>> {
        self.fields.iter().filter(|f| f.index.is_some())
    }
}

/// The camelCase form of the field identifier, without `r#`.
fn declared_name(ident: &Ident) -> String {
    let raw = ident.to_string();
    camel_case(raw.strip_prefix("r#").unwrap_or(&raw))
}

/// The snake_case form of the field identifier, without `r#`.
///
/// Built from the identifier rather than from the declared name:
/// `address_1` stays `address_1` while its declared name is `address1`.
fn snake_key(ident: &Ident) -> String {
    let raw = ident.to_string();
    snake_case(raw.strip_prefix("r#").unwrap_or(&raw))
}

#[cfg(test)]
mod tests {
    use quote::format_ident;

    use super::{declared_name, snake_key};

    #[test]
    fn declared_names() {
        assert_eq!(declared_name(&format_ident!("user_name")), "userName");
        assert_eq!(declared_name(&format_ident!("title")), "title");
        assert_eq!(declared_name(&format_ident!("r#type")), "type");
    }

    #[test]
    fn snake_names_keep_digit_segments() {
        assert_eq!(declared_name(&format_ident!("address_1")), "address1");
        assert_eq!(snake_key(&format_ident!("address_1")), "address_1");
        assert_eq!(snake_key(&format_ident!("is_2fa_enabled")), "is_2fa_enabled");
        assert_eq!(snake_key(&format_ident!("r#type")), "type");
    }
}
