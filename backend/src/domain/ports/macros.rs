//! Helper macro for port error enums.
//!
//! Each variant names the domain [`ErrorCode`](crate::domain::ErrorCode) it
//! surfaces as, so services convert adapter failures with `?` instead of
//! hand-written match arms.

/// Declare a port error enum.
///
/// Generates the `thiserror` enum, one snake_case constructor per variant
/// (fields taken as `impl Into<T>`), `error_code()`, and
/// `From<Enum> for Error` carrying the formatted message.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $code:ident, $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*

            /// Domain error code this failure surfaces as.
            #[must_use]
            pub fn error_code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $(Self::$variant { .. } => $crate::domain::ErrorCode::$code,)*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                Self::new(error.error_code(), error.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;
