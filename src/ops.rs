//! Typed operation builders.
//!
//! Every builder here comes out of one [`operation!`] table: the table yields the kind's static
//! [`OperationSchema`] and one typed setter per row, so the setters and the generic/JSON paths
//! can never disagree about names, types or bounds.

use crate::schema::OperationSchema;

/// Maps a table type to its [`OptionType`](crate::schema::OptionType).
macro_rules! option_type {
    (bool) => {
        $crate::schema::OptionType::Bool
    };
    (int) => {
        $crate::schema::OptionType::Int
    };
    (range($min:expr, $max:expr)) => {
        $crate::schema::OptionType::Range {
            min: $min,
            max: $max,
        }
    };
    (text) => {
        $crate::schema::OptionType::Text
    };
    (choice($e:ty)) => {
        $crate::schema::OptionType::Enum(<$e as $crate::value::WireEnum>::TOKENS)
    };
    (resource) => {
        $crate::schema::OptionType::Resource
    };
    (ints($n:literal, $min:expr, $max:expr)) => {
        $crate::schema::OptionType::List {
            item: &$crate::schema::OptionType::Range {
                min: $min,
                max: $max,
            },
            min_len: $n,
            max_len: $n,
        }
    };
    (choices($e:ty, $lo:literal, $hi:literal)) => {
        $crate::schema::OptionType::List {
            item: &$crate::schema::OptionType::Enum(<$e as $crate::value::WireEnum>::TOKENS),
            min_len: $lo,
            max_len: $hi,
        }
    };
}

/// Emits the typed setter for one table row.
macro_rules! setter {
    ($(#[$m:meta])* $setter:ident $wire:literal bool) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: bool) -> &mut Self {
            self.op.put($wire, $crate::value::OptionValue::Bool(value));
            self
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal int) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: i64) -> &mut Self {
            self.op.put($wire, $crate::value::OptionValue::Int(value));
            self
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal range($min:expr, $max:expr)) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: i64) -> $crate::error::TransformResult<&mut Self> {
            self.op
                .set($wire, $crate::value::OptionValue::bounded(value, $min, $max))?;
            Ok(self)
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal text) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: impl Into<String>) -> &mut Self {
            self.op
                .put($wire, $crate::value::OptionValue::Text(value.into()));
            self
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal choice($e:ty)) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: $e) -> &mut Self {
            self.op.put($wire, $crate::value::OptionValue::choice(value));
            self
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal resource) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: $crate::value::Resource) -> &mut Self {
            self.op
                .put($wire, $crate::value::OptionValue::Resource(value));
            self
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal ints($n:literal, $min:expr, $max:expr)) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: [i64; $n]) -> $crate::error::TransformResult<&mut Self> {
            let items = value
                .iter()
                .map(|v| $crate::value::OptionValue::bounded(*v, $min, $max))
                .collect();
            self.op.set($wire, $crate::value::OptionValue::List(items))?;
            Ok(self)
        }
    };
    ($(#[$m:meta])* $setter:ident $wire:literal choices($e:ty, $lo:literal, $hi:literal)) => {
        $(#[$m])*
        pub fn $setter(&mut self, value: &[$e]) -> $crate::error::TransformResult<&mut Self> {
            let items = value
                .iter()
                .map(|v| $crate::value::OptionValue::choice(*v))
                .collect();
            self.op.set($wire, $crate::value::OptionValue::List(items))?;
            Ok(self)
        }
    };
}

/// Declares a typed operation builder from an option table.
///
/// ```ignore
/// operation! {
///     pub struct Rotate => "rotate" {
///         deg("deg"): range(0, 359);
///         exif("exif"): bool;
///     }
/// }
/// ```
macro_rules! operation {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $kind:literal {
            $(
                $(#[$fmeta:meta])*
                $setter:ident($wire:literal): $ty:ident $( ( $($arg:tt)* ) )?;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            op: $crate::operation::Operation,
        }

        impl $name {
            pub const SCHEMA: $crate::schema::OperationSchema = $crate::schema::OperationSchema {
                kind: $kind,
                options: &[
                    $(
                        $crate::schema::OptionSpec {
                            name: $wire,
                            ty: option_type!($ty $( ( $($arg)* ) )?),
                        },
                    )*
                ],
            };

            pub fn new() -> Self {
                Self {
                    op: $crate::operation::Operation::from_schema(&Self::SCHEMA),
                }
            }

            $(
                setter!($(#[$fmeta])* $setter $wire $ty $( ( $($arg)* ) )?);
            )*

            /// Generic escape hatch, validated against this kind's table.
            pub fn set(
                &mut self,
                name: &str,
                value: $crate::value::OptionValue,
            ) -> $crate::error::TransformResult<&mut Self> {
                self.op.set(name, value)?;
                Ok(self)
            }

            pub fn operation(&self) -> &$crate::operation::Operation {
                &self.op
            }

            pub fn into_operation(self) -> $crate::operation::Operation {
                self.op
            }

            pub fn render(&self) -> String {
                self.op.render()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.op, f)
            }
        }

        impl From<$name> for $crate::operation::Operation {
            fn from(v: $name) -> Self {
                v.op
            }
        }

        impl From<&$name> for $crate::operation::Operation {
            fn from(v: &$name) -> Self {
                v.op.clone()
            }
        }
    };
}

pub mod enums;
pub mod image;
pub mod video;

pub use enums::{Align, AspectMode, OutputFormat, ResizeFit, StorageAccess, StorageLocation};
pub use image::{Crop, Flip, Flop, Output, Resize, Rotate, Watermark};
pub use video::VideoConvert;

pub(crate) static REGISTRY: &[&OperationSchema] = &[
    &VideoConvert::SCHEMA,
    &Resize::SCHEMA,
    &Crop::SCHEMA,
    &Rotate::SCHEMA,
    &Flip::SCHEMA,
    &Flop::SCHEMA,
    &Watermark::SCHEMA,
    &Output::SCHEMA,
];
