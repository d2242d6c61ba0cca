//! # diagno-forms
//!
//! Assessment forms described as data. Each disease has a table of
//! [`FieldDescriptor`]s in [`catalog`]; a [`TypedForm`] holds the values for
//! one of them and turns them into a `DiseaseInput` on submit.

pub mod catalog;
pub mod field;
pub mod form;

pub use field::{ChoiceOption, FieldDescriptor, FieldKind};
pub use form::TypedForm;
