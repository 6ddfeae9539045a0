//! Builds media transformation pipeline descriptors.
//!
//! Operations accumulate typed, validated options and render to `kind=name:value,...`
//! segments; a [`Pipeline`] joins segments with `/` in the order they were appended.
//!
//! ```
//! use transform_chain::{Pipeline, ops::{Crop, Resize, ResizeFit}};
//!
//! let mut crop = Crop::new();
//! crop.dim([0, 0, 800, 600])?;
//! let mut resize = Resize::new();
//! resize.width(400)?.fit(ResizeFit::Max);
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.append(crop).append(resize);
//! assert_eq!(pipeline.render(), "crop=dim:[0,0,800,600]/resize=width:400,fit:max");
//! # Ok::<(), transform_chain::TransformError>(())
//! ```
#![forbid(unsafe_code)]

mod foundation;

pub mod document;
pub mod fingerprint;
pub mod operation;
pub mod ops;
pub mod pipeline;
pub mod schema;
pub mod value;

pub use foundation::{error, grammar};

pub use document::{PipelineDocument, StepDocument};
pub use error::{TransformError, TransformResult};
pub use fingerprint::PipelineFingerprint;
pub use operation::{Operation, TransformOption};
pub use pipeline::Pipeline;
pub use schema::{OperationSchema, OptionSpec, OptionType, schema, schemas};
pub use value::{OptionValue, Resource, WireEnum};
