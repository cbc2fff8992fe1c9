//! Macros for ergonomic state machine construction.

/// Generate a `State` implementation for a fieldless enum.
///
/// Also generates an `ALL` constant listing every variant in declaration
/// order, handy for `StateMachineBuilder::states`.
///
/// # Example
///
/// ```
/// use chatmode::core::State;
/// use chatmode::state_enum;
///
/// state_enum! {
///     pub enum Mode {
///         Idle,
///         Help,
///         Meme,
///     }
/// }
///
/// assert_eq!(Mode::Help.name(), "Help");
/// assert_eq!(Mode::ALL, &[Mode::Idle, Mode::Help, Mode::Meme]);
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
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
