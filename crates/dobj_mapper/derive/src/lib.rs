//! See following macros:
//!
//! - [`DataObject`]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static DATA_OBJECT_ATTRIBUTE_NAME: &str = "data_object";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Data Object Derivation
///
/// `#[derive(DataObject)]` implements the following traits for a struct
/// with named fields:
///
/// - `DataObject`: field metadata, assembly from resolved values, field access
/// - `FieldType`: the struct can be a field of another data object
/// - `FieldValue`: the struct serializes to a nested mapping
/// - `ToRecord`: the struct can be a record source
///
/// Generic structs, tuple structs, unit structs and enums are rejected.
///
/// ## Declared Names
///
/// Every field is declared under the camelCase form of its identifier:
/// `user_name` is declared as `userName`. Hydration looks up the declared
/// name first and its snake_case form second, so both `{"userName": ..}`
/// and `{"user_name": ..}` fill the field.
///
/// Use `rename` to declare another name:
///
/// ```rust, ignore
/// #[derive(DataObject)]
/// struct Account {
///     #[data_object(rename = "login")]
///     user_name: String,
/// }
/// ```
///
/// ## Defaults
///
/// A default value is used when no key of the raw record matches. The
/// expression is converted with `serde_json::json!` and then resolved like
/// any raw value.
///
/// ```rust, ignore
/// #[derive(DataObject)]
/// struct Settings {
///     #[data_object(default = "dark")]
///     theme: String,
///     #[data_object(default = 14)]
///     font_size: u8,
/// }
/// ```
///
/// ## Skipped Fields
///
/// `skip` removes a field from the metadata. It is neither hydrated nor
/// serialized and is initialized with `Default::default()`.
///
/// ```rust, ignore
/// #[derive(DataObject)]
/// struct Order {
///     total: f64,
///     #[data_object(skip)]
///     total_with_tax: f64,
/// }
/// ```
///
/// ## Raw Parameters
///
/// At most one field of type `Record` can be marked `parameters`. It
/// receives a copy of the raw input and is neither declared nor serialized.
///
/// ```rust, ignore
/// #[derive(DataObject)]
/// struct Order {
///     total: f64,
///     #[data_object(parameters)]
///     raw: Record,
/// }
/// ```
///
/// ## Prepare Hook
///
/// `prepare = path` names a function `fn(&mut Self, &Record) -> Result<()>`
/// that runs after all fields are assigned. An error aborts hydration.
///
/// ```rust, ignore
/// #[derive(DataObject)]
/// #[data_object(prepare = Self::compute_tax)]
/// struct Order {
///     total: f64,
///     #[data_object(skip)]
///     total_with_tax: f64,
/// }
///
/// impl Order {
///     fn compute_tax(&mut self, _: &Record) -> dobj_mapper::Result<()> {
///         self.total_with_tax = self.total * 1.12;
///         Ok(())
///     }
/// }
/// ```
///
/// This attribute can only be applied at the type level.
#[proc_macro_derive(DataObject, attributes(data_object))]
pub fn derive_data_object(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::DataObjectStruct::from_ast(&ast) {
        Ok(data) => impls::impl_data_object(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
