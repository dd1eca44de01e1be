use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Expr, LitStr, Path};

use crate::DATA_OBJECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[data_object(...)]` attributes on the struct.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `prepare = path`
    pub prepare: Option<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(DATA_OBJECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("prepare") {
            if self.prepare.is_some() {
                return Err(meta.error("duplicate `prepare` attribute"));
            }
            self.prepare = Some(meta.value()?.parse()?);
            return Ok(());
        }

        Err(meta.error("unknown data_object type attribute, expected `prepare`"))
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[data_object(...)]` attributes on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `rename = "name"`
    pub rename: Option<LitStr>,
    /// `default = expr`
    pub default: Option<Expr>,
    /// `skip`
    pub skip: Option<Span>,
    /// `parameters`
    pub parameters: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(DATA_OBJECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }

        this.validate()?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta<'_>) -> syn::Result<()> {
        let span = meta.path.get_ident().map(|i| i.span());

        if meta.path.is_ident("rename") {
            if self.rename.is_some() {
                return Err(meta.error("duplicate `rename` attribute"));
            }
            self.rename = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("default") {
            if self.default.is_some() {
                return Err(meta.error("duplicate `default` attribute"));
            }
            self.default = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("skip") {
            self.skip = span;
        } else if meta.path.is_ident("parameters") {
            self.parameters = span;
        } else {
            return Err(meta.error(
                "unknown data_object field attribute, expected one of `rename`, `default`, `skip`, `parameters`",
            ));
        }

        Ok(())
    }

    fn validate(&self) -> syn::Result<()> {
        let Some(span) = self.skip.or(self.parameters) else {
            return Ok(());
        };

        let conflicting = (self.skip.is_some() && self.parameters.is_some())
            || self.rename.is_some()
            || self.default.is_some();

        if conflicting {
            return Err(syn::Error::new(
                span,
                "`skip` and `parameters` fields are not declared, they take no other attribute",
            ));
        }
        Ok(())
    }

    /// Returns `true` if the field is part of the declared fields.
    #[inline]
    pub fn is_declared(&self) -> bool {
        self.skip.is_none() && self.parameters.is_none()
    }
}
