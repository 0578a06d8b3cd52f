/// Declares a closed enum with one wire string per variant, implementing
/// `Display`, `FromStr` and serde through that string.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::BlobModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    _ => Err($crate::BlobModelError::UnknownValue {
                        kind: stringify!($name),
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Getters and `set_*` setters over `Option` fields.
///
/// * `str`: `String` field, read as `Option<&str>`
/// * `bytes`: `Vec<u8>` field, read as `Option<&[u8]>`
/// * `borrow`: any field, read by reference
/// * `copy`: `Copy` field, read by value
///
/// Setters return `&mut Self` so calls can be chained.
macro_rules! accessors {
    ($ty:ident { $( $(#[$meta:meta])* $get:ident / $set:ident : $kind:ident $t:ty ),* $(,)? }) => {
        impl $ty {
            $( accessors!(@one $(#[$meta])* $get $set $kind $t); )*
        }
    };
    (@one $(#[$meta:meta])* $get:ident $set:ident str $t:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<&str> {
            self.$get.as_deref()
        }

        pub fn $set(&mut self, value: impl Into<$t>) -> &mut Self {
            self.$get = Some(value.into());
            self
        }
    };
    (@one $(#[$meta:meta])* $get:ident $set:ident bytes $t:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<&[u8]> {
            self.$get.as_deref()
        }

        pub fn $set(&mut self, value: impl Into<$t>) -> &mut Self {
            self.$get = Some(value.into());
            self
        }
    };
    (@one $(#[$meta:meta])* $get:ident $set:ident borrow $t:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<&$t> {
            self.$get.as_ref()
        }

        pub fn $set(&mut self, value: $t) -> &mut Self {
            self.$get = Some(value);
            self
        }
    };
    (@one $(#[$meta:meta])* $get:ident $set:ident copy $t:ty) => {
        $(#[$meta])*
        pub fn $get(&self) -> Option<$t> {
            self.$get
        }

        pub fn $set(&mut self, value: $t) -> &mut Self {
            self.$get = Some(value);
            self
        }
    };
}
