//! Macros for declaring status enums.

/// Declare a status enum and generate its [`State`](crate::core::State)
/// implementation.
///
/// Each variant is paired with a human-readable description. The generated
/// enum is `Copy`, hashable, serializable, and gets an `ALL` constant listing
/// every variant in declaration order.
///
/// # Example
///
/// ```
/// use catpoint::status_enum;
/// use catpoint::core::State;
///
/// status_enum! {
///     pub enum DoorState {
///         Open => "Door is open",
///         Closed => "Door is closed",
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// assert_eq!(DoorState::Closed.description(), "Door is closed");
/// assert_eq!(DoorState::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $description:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn description(&self) -> &'static str {
                match self {
                    $(Self::$variant => $description),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
