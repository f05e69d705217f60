use std::num::ParseIntError;

use thiserror::Error;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("not an integer")]
    NotAnInteger {
        #[from]
        #[source]
        error: ParseIntError,
    },

    #[error("identifiers must be positive, got {}", .value)]
    NotPositive { value: i32 },
}


/// Implemented by all serial (database-generated, positive integer) identifiers.
pub trait SerialIdNewtype: Copy {
    fn new(id: i32) -> Self;

    fn into_inner(self) -> i32;
}


macro_rules! create_serial_id_newtype {
    ($struct_name:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $struct_name(i32);

        impl $struct_name {
            #[inline]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl $crate::ids::SerialIdNewtype for $struct_name {
            #[inline]
            fn new(id: i32) -> Self {
                Self(id)
            }

            #[inline]
            fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl std::str::FromStr for $struct_name {
            type Err = $crate::ids::IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s.parse::<i32>()?;

                if value < 1 {
                    return Err($crate::ids::IdParseError::NotPositive { value });
                }

                Ok(Self(value))
            }
        }

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}


create_serial_id_newtype!(CategoryId);

create_serial_id_newtype!(RecipeId);

create_serial_id_newtype!(UserId);



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_positive_identifiers_only() {
        assert_eq!("42".parse::<CategoryId>(), Ok(CategoryId::new(42)));

        assert_eq!(
            "0".parse::<RecipeId>(),
            Err(IdParseError::NotPositive { value: 0 })
        );
        assert_eq!(
            "-3".parse::<RecipeId>(),
            Err(IdParseError::NotPositive { value: -3 })
        );
        assert!(matches!(
            "abc".parse::<UserId>(),
            Err(IdParseError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn serializes_transparently() {
        let serialized = serde_json::to_string(&RecipeId::new(7)).unwrap();
        assert_eq!(serialized, "7");

        let deserialized: CategoryId = serde_json::from_str("12").unwrap();
        assert_eq!(deserialized.into_inner(), 12);
    }
}
