//! Macros for declaring lifecycle vocabularies.

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// Each variant is paired with its symbolic name. States listed under
/// `final:` are terminal. The enum also gets `Display` and an `ALL`
/// constant listing the variants in declaration order.
///
/// # Example
///
/// ```
/// use statekeeper::core::State;
/// use statekeeper::state_enum;
///
/// state_enum! {
///     pub enum DoorState {
///         Closed => "closed",
///         Open => "open",
///         Removed => "removed",
///     }
///     final: [Removed]
/// }
///
/// assert_eq!(DoorState::Open.name(), "open");
/// assert!(DoorState::Removed.is_final());
/// assert_eq!(DoorState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
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
            /// Every state, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
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

/// Declare a transition-name enum and implement
/// [`TransitionName`](crate::core::TransitionName) for it.
///
/// # Example
///
/// ```
/// use statekeeper::core::TransitionName;
/// use statekeeper::transition_name_enum;
///
/// transition_name_enum! {
///     pub enum DoorAction {
///         Open => "open",
///         Close => "close",
///     }
/// }
///
/// assert_eq!(DoorAction::Close.name(), "close");
/// assert_eq!(DoorAction::Open.to_string(), "open");
/// ```
#[macro_export]
macro_rules! transition_name_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
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
            /// Every transition name, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::TransitionName for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::TransitionName::name(self))
            }
        }
    };
}
