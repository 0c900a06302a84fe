//! Macros for declaring state and event enums.

/// Generate a state enum and its `State` implementation.
///
/// # Example
///
/// ```
/// use mathq::core::State;
/// use mathq::state_enum;
///
/// state_enum! {
///     pub enum ReadState {
///         Reading,
///         Done,
///         Rejected,
///     }
///     final: [Done, Rejected]
///     error: [Rejected]
/// }
///
/// assert!(ReadState::Rejected.is_error());
/// assert_eq!(ReadState::Done.name(), "Done");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}

/// Generate an event enum and its `Event` implementation.
///
/// # Example
///
/// ```
/// use mathq::core::Event;
/// use mathq::event_enum;
///
/// event_enum! {
///     pub enum Feed {
///         Item,
///         Eof,
///     }
/// }
///
/// assert_eq!(Feed::Eof.name(), "Eof");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
