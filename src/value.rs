use std::fmt;

use crate::{
    error::{TransformError, TransformResult},
    grammar::{self, LIST_CLOSE, LIST_OPEN, LIST_SEPARATOR},
};

/// A closed set of wire tokens a caller picks from, e.g. a storage location.
pub trait WireEnum: Copy + Sized + 'static {
    /// Every accepted token, in declaration order.
    const TOKENS: &'static [&'static str];

    fn token(self) -> &'static str;

    fn from_token(token: &str) -> Option<Self>;
}

/// Declares a `WireEnum` with a fixed token per variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant, )+
        }

        impl $crate::value::WireEnum for $name {
            const TOKENS: &'static [&'static str] = &[$($token),+];

            fn token(self) -> &'static str {
                match self {
                    $( Self::$variant => $token, )+
                }
            }

            fn from_token(token: &str) -> Option<Self> {
                match token {
                    $( $token => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::value::WireEnum::token(*self))
            }
        }
    };
}

pub(crate) use wire_enum;

/// Something an option can point at: an external URL or an opaque content handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Url(url::Url),
    Handle(String),
}

impl Resource {
    /// Parse an absolute `http`/`https` URL.
    pub fn url(raw: &str) -> TransformResult<Self> {
        let parsed = url::Url::parse(raw)
            .map_err(|e| TransformError::invalid_value("url", format!("'{raw}': {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(Self::Url(parsed)),
            other => Err(TransformError::invalid_value(
                "url",
                format!("unsupported scheme '{other}' in '{raw}'"),
            )),
        }
    }

    /// A content handle must be non-empty and free of whitespace.
    pub fn handle(raw: impl Into<String>) -> TransformResult<Self> {
        let handle = Self::Handle(raw.into());
        handle.validate("handle")?;
        Ok(handle)
    }

    /// URL when the text carries an `http`/`https` scheme (any case), handle otherwise.
    pub fn parse(raw: &str) -> TransformResult<Self> {
        let has_prefix = |prefix: &str| {
            raw.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        };
        if has_prefix("http://") || has_prefix("https://") {
            Self::url(raw)
        } else {
            Self::handle(raw)
        }
    }

    /// The rules [`Resource::handle`] and [`Resource::url`] enforce, applied to any value.
    pub fn validate(&self, option: &str) -> TransformResult<()> {
        match self {
            Self::Url(u) => match u.scheme() {
                "http" | "https" => Ok(()),
                other => Err(TransformError::invalid_value(
                    option,
                    format!("unsupported scheme '{other}' in '{u}'"),
                )),
            },
            Self::Handle(h) if h.is_empty() => Err(TransformError::invalid_value(
                option,
                "handle must be non-empty",
            )),
            Self::Handle(h) if h.chars().any(char::is_whitespace) => {
                Err(TransformError::invalid_value(
                    option,
                    format!("handle '{h}' must not contain whitespace"),
                ))
            }
            Self::Handle(_) => Ok(()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(u) => u.as_str(),
            Self::Handle(h) => h,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    /// Integer that must lie in `min..=max`; checked when the option is set.
    Bounded {
        value: i64,
        min: i64,
        max: i64,
    },
    Text(String),
    /// Wire token of an enumerated constant.
    Enum(&'static str),
    Resource(Resource),
    List(Vec<OptionValue>),
}

impl OptionValue {
    pub fn bounded(value: i64, min: i64, max: i64) -> Self {
        Self::Bounded { value, min, max }
    }

    pub fn choice<E: WireEnum>(value: E) -> Self {
        Self::Enum(value.token())
    }

    /// Self-consistency check that does not depend on any schema: bounded values must sit
    /// inside their own bounds, enum tokens must be plain wire tokens and resources must
    /// satisfy their construction rules, recursively through lists.
    pub fn check(&self, option: &str) -> TransformResult<()> {
        match self {
            Self::Bounded { value, min, max } => {
                if value < min || value > max {
                    return Err(TransformError::out_of_range(option, *value, *min, *max));
                }
                Ok(())
            }
            Self::Enum(token) => {
                if grammar::is_plain_token(token) {
                    Ok(())
                } else {
                    Err(TransformError::invalid_value(
                        option,
                        format!("enum token '{token}' contains reserved characters"),
                    ))
                }
            }
            Self::Resource(r) => r.validate(option),
            Self::List(items) => items.iter().try_for_each(|item| item.check(option)),
            _ => Ok(()),
        }
    }

    /// Canonical wire token. Assumes the value already passed [`OptionValue::check`].
    pub fn encode(&self) -> String {
        let mut out = String::new();
        self.encode_into(&mut out);
        out
    }

    pub(crate) fn encode_into(&self, out: &mut String) {
        match self {
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::Int(v) | Self::Bounded { value: v, .. } => out.push_str(&v.to_string()),
            Self::Text(s) => out.push_str(&grammar::escape(s)),
            Self::Enum(token) => out.push_str(token),
            Self::Resource(r) => out.push_str(&grammar::escape(r.as_str())),
            Self::List(items) => {
                out.push(LIST_OPEN);
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(LIST_SEPARATOR);
                    }
                    item.encode_into(out);
                }
                out.push(LIST_CLOSE);
            }
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Resource> for OptionValue {
    fn from(v: Resource) -> Self {
        Self::Resource(v)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    wire_enum! {
        pub enum Shade {
            Light => "light",
            Dark => "dark_mode",
        }
    }

    #[test]
    fn scalars_encode_to_their_literal_text() {
        assert_eq!(OptionValue::Bool(true).encode(), "true");
        assert_eq!(OptionValue::Bool(false).encode(), "false");
        assert_eq!(OptionValue::Int(-42).encode(), "-42");
        assert_eq!(OptionValue::bounded(12, 1, 12).encode(), "12");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(OptionValue::from("clip 1/2").encode(), "clip%201%2F2");
    }

    #[test]
    fn enum_uses_wire_token_not_symbol() {
        assert_eq!(OptionValue::choice(Shade::Dark).encode(), "dark_mode");
        assert_eq!(Shade::TOKENS, &["light", "dark_mode"]);
        assert_eq!(Shade::from_token("light"), Some(Shade::Light));
        assert_eq!(Shade::from_token("Light"), None);
        assert_eq!(Shade::Dark.to_string(), "dark_mode");
    }

    #[test]
    fn resources_encode_escaped() {
        let url = Resource::url("https://example.com/wm.png").unwrap();
        assert_eq!(
            OptionValue::from(url).encode(),
            "https%3A%2F%2Fexample.com%2Fwm.png"
        );
        let handle = Resource::handle("3AB239102DB").unwrap();
        assert_eq!(OptionValue::from(handle).encode(), "3AB239102DB");
    }

    #[test]
    fn resource_parsing() {
        assert!(matches!(
            Resource::parse("https://example.com/a.png").unwrap(),
            Resource::Url(_)
        ));
        assert!(matches!(
            Resource::parse("abcDEF123").unwrap(),
            Resource::Handle(_)
        ));
        assert!(Resource::url("ftp://example.com/a.png").is_err());
        assert!(Resource::url("not a url").is_err());
        assert!(Resource::handle("").is_err());
        assert!(Resource::handle("a b").is_err());
    }

    #[test]
    fn uppercase_scheme_parses_as_url() {
        let parsed = Resource::parse("HTTPS://example.com/a.png").unwrap();
        assert!(matches!(parsed, Resource::Url(_)));
        assert_eq!(parsed.as_str(), "https://example.com/a.png");
        assert!(matches!(
            Resource::parse("Http://example.com/").unwrap(),
            Resource::Url(_)
        ));
        assert!(matches!(Resource::parse("http").unwrap(), Resource::Handle(_)));
    }

    #[test]
    fn check_rejects_directly_built_resources() {
        let empty = OptionValue::Resource(Resource::Handle(String::new()));
        let err = empty.check("file").unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { .. }));
        assert_eq!(err.option(), Some("file"));

        let spaced = OptionValue::Resource(Resource::Handle("a b".into()));
        assert!(spaced.check("file").is_err());

        let ftp = url::Url::parse("ftp://example.com/a.png").unwrap();
        assert!(OptionValue::Resource(Resource::Url(ftp)).check("file").is_err());

        let ok = OptionValue::Resource(Resource::Handle("3AB239102DB".into()));
        assert!(ok.check("file").is_ok());
    }

    #[test]
    fn check_rejects_enum_tokens_with_reserved_characters() {
        assert!(OptionValue::Enum("dark_mode").check("mode").is_ok());
        let err = OptionValue::Enum("a,evil:1/other").check("mode").unwrap_err();
        assert!(matches!(err, TransformError::InvalidValue { .. }));
        assert!(OptionValue::Enum("").check("mode").is_err());
        assert!(
            OptionValue::List(vec![OptionValue::Enum("top"), OptionValue::Enum("x y")])
                .check("position")
                .is_err()
        );
    }

    #[test]
    fn lists_use_brackets_and_commas() {
        let v = OptionValue::List(vec![
            OptionValue::bounded(0, 0, 10),
            OptionValue::Int(20),
            OptionValue::Enum("top"),
        ]);
        assert_eq!(v.encode(), "[0,20,top]");
    }

    #[test]
    fn check_rejects_out_of_bounds_recursively() {
        assert!(OptionValue::bounded(5, 1, 12).check("x").is_ok());
        let err = OptionValue::List(vec![OptionValue::bounded(-1, 0, 9)])
            .check("dim")
            .unwrap_err();
        assert_eq!(err.option(), Some("dim"));
        assert_eq!(err.violated_bound(), Some(0));
    }
}
