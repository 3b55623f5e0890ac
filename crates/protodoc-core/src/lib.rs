#![forbid(unsafe_code)]

//! Descriptor model and diagram configuration for protodoc (headless).
//!
//! The model mirrors the JSON written by `protoc-gen-doc --doc_opt=json`; see [`Documentation`].

pub mod config;
pub mod error;
pub mod model;

pub use config::DiagramConfig;
pub use error::{Error, Result};
pub use model::{
    Documentation, Enum, EnumValue, Extension, FieldOptions, File, HttpOptions, HttpRule, Message,
    MessageField, MethodOptions, ScalarValueType, Service, ServiceMethod, ValidatorRule,
};
