//! Helper macro for declaring port error enums.
//!
//! Every variant carries named fields and a display message; the macro adds a
//! snake-case constructor per variant whose parameters take `impl Into<T>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
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
                    #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Throttled { message: String, retry_after_secs: u64 } =>
                "throttled: {message} (retry in {retry_after_secs}s)",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::unreachable("dns lookup failed");
        assert_eq!(err.to_string(), "unreachable: dns lookup failed");
    }

    #[test]
    fn constructors_support_mixed_field_types() {
        let err = SamplePortError::throttled("slow down", 30_u64);
        assert_eq!(err.to_string(), "throttled: slow down (retry in 30s)");
    }
}
