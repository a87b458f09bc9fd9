//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";
static STORABLE_ATTRIBUTE_NAME: &str = "storable";
static STORE_ATTRIBUTE_NAME: &str = "store";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection for Storage
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `Typed`
/// - `Reflect`
/// - `Struct` (for `struct T { ... }` and `struct T;`)
/// - `Enum` (for enums with unit variants only)
///
/// Generic types, tuple structs and enums with data are rejected.
///
/// ## Storable Structs
///
/// `#[storable]` opts a struct into field-by-field storage. Only fields
/// marked `#[store]` are reflected and stored:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[storable]
/// struct Furnace {
///     #[store]
///     fuel: i32,
///     #[store(phase(save, sync))]
///     burning: bool,
///     cache: Vec<u8>, // not reflected
/// }
/// ```
///
/// `phase(..)` accepts `save`, `client`, `sync`, `update` and `item`. An
/// empty or missing list means every phase.
///
/// A whole-object handler replaces field storage:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[storable(handler = ColorHandler)]
/// struct Color { /* ... */ }
/// ```
///
/// A single field can name a handler that is tried before the registry:
///
/// ```rust, ignore
/// #[store(handler = CompactHandler)]
/// ids: Vec<i32>,
/// ```
///
/// Handlers named in attributes must implement `Handler + Default`.
///
/// ## Bases
///
/// One field may be marked `#[reflect(base)]`. A storable base contributes
/// its stored fields ahead of the struct's own; any other base is stored
/// whole by its own handlers.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[storable]
/// struct Chest {
///     #[reflect(base)]
///     block: BlockEntity,
///     #[store]
///     items: Vec<Item>,
/// }
/// ```
///
/// ## Lifecycle
///
/// - `#[reflect(default)]`: use `Default::default` as the factory.
/// - `#[reflect(factory = path)]`: use a `fn() -> Self`.
/// - `#[reflect(after_decode = path)]`: call a `fn(&mut Self)` after the
///   struct has been decoded. May be repeated.
///
/// Declaring more than one factory is an error.
#[proc_macro_derive(Reflect, attributes(reflect, storable, store))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_impls = match derive_data::ReflectDerive::from_input(&ast) {
        Ok(derive_data::ReflectDerive::Struct(info)) => impls::impl_struct(&info),
        Ok(derive_data::ReflectDerive::Enum(info)) => impls::impl_enum(&info),
        Err(err) => return err.into_compile_error().into(),
    };

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
