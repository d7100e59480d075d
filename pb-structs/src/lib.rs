pub mod config;
pub mod core;
pub mod reduction;

/// Declares a plain data struct with public fields and the serde derives
/// shared by every record type. `Option` fields default to `None` when absent.
#[macro_export]
macro_rules! serializable_struct {
    ( @ $name:ident { } -> ($($fields:tt)*) ) => (
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
        pub struct $name {
            $($fields)*
        }
    );
    ( @ $name:ident { $(#[$attr:meta])* $param:ident : Option<$type:ty>, $($rest:tt)* } -> ($($fields:tt)*) ) => (
        serializable_struct!(@ $name { $($rest)* } -> (
            $($fields)*
            $(#[$attr])*
            #[serde(default)]
            pub $param : Option<$type>,
        ));
    );
    ( @ $name:ident { $(#[$attr:meta])* $param:ident : $type:ty, $($rest:tt)* } -> ($($fields:tt)*) ) => (
        serializable_struct!(@ $name { $($rest)* } -> (
            $($fields)*
            $(#[$attr])*
            pub $param : $type,
        ));
    );
    ( $name:ident { $( $rest:tt)* } ) => {
        serializable_struct!(@ $name { $($rest)* } -> ());
    };
}
