use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name {
            value: CompactString,
        }

        impl $name {
            pub fn new<S: Into<CompactString>>(id: S) -> Self {
                Self { value: id.into() }
            }

            pub fn as_str(&self) -> &str {
                &self.value
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<$name, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserialize_id(deserializer).map($name::new)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.value == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.value == *other
            }
        }
    };
}

string_id!(
    /// Release identifier, e.g. `rel_XYZ123`
    ReleaseId
);
string_id!(TrackId);
string_id!(ArtistId);
string_id!(
    /// Label identifier, e.g. `lbl_9f3a`
    LabelId
);
string_id!(DeliveryTargetId);

/// Ids arrive as strings from most endpoints, but a few legacy fields
/// (`parent_label_id`, numeric dsp ids) are plain integers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<CompactString, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = CompactString;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.into())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.into())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(compact_str::format_compact!("{value}"))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(compact_str::format_compact!("{value}"))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
