//! Table macro for the status taxonomy

/// Expands a `Name = code => "description"` table into the [`Status`] enum
/// together with its forward lookups. Declaration order is significant: it is
/// the order of `Status::ALL` and the tie-break order when decoding a code
/// shared by several names.
///
/// [`Status`]: crate::Status
macro_rules! status_table {
    ($($name:ident = $code:literal => $desc:literal,)+) => {
        /// Named result of a credential store request
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Status {
            $($name,)+
        }

        impl Status {
            /// Every named status, in declaration order
            pub const ALL: &'static [Status] = &[$(Status::$name,)+];

            /// Integer code reported by the store for this status
            pub const fn code(self) -> StatusCode {
                match self {
                    $(Status::$name => $code,)+
                }
            }

            /// Fixed human-readable description
            pub const fn description(self) -> &'static str {
                match self {
                    $(Status::$name => $desc,)+
                }
            }

            /// Variant name, e.g. `"ItemNotFound"`
            pub const fn name(self) -> &'static str {
                match self {
                    $(Status::$name => stringify!($name),)+
                }
            }
        }
    };
}
