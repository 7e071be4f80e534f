//! Synthesis of Groovy syntax fragments from semantic inputs.
//!
//! A request is rendered into a small scaffold source, parsed with the real
//! grammar into a throwaway unit, and the requested node is picked out of the
//! tree by a fixed path that is checked step by step.
//!
//! # Example
//!
//! ```
//! use groovy_synth::ElementFactory;
//!
//! let factory = ElementFactory::new();
//! let decl = factory
//!     .variable_declaration(&["final"], None, &["x", "y"], None)
//!     .expect("valid declaration");
//! assert_eq!(decl.names(), ["x", "y"]);
//! assert_eq!(decl.modifier_names(), ["final"]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod error;
pub mod factory;
pub mod locate;
pub mod request;
pub mod scaffold;
pub mod text;
pub mod unit;

#[cfg(test)]
mod factory_tests;
#[cfg(test)]
mod locate_tests;

pub use error::{ParseFailure, Result, SynthError, TextOrigin};
pub use factory::{ElementFactory, FactoryConfig, Synthesized};
pub use request::{ConstructionRequest, Initializer, TypeSource};
pub use text::TypeDescriptor;
pub use unit::{EphemeralUnit, Grammar, GroovyGrammar, UnitName};
