use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named quantity that can be set on or read from a solver handle.
///
/// Names follow the conventional lower-case spelling (`"lbx"`, `"u"`, ...),
/// which is what [`Display`](fmt::Display) and [`FromStr`] use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Lower bound on the state.
    Lbx,
    /// Upper bound on the state.
    Ubx,
    /// Lower bound on the control.
    Lbu,
    /// Upper bound on the control.
    Ubu,
    /// State.
    X,
    /// Control.
    U,
    /// Output reference.
    Yref,
}

/// Error returned when parsing an unrecognized field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field name: {0:?}")]
pub struct UnknownField(pub String);

impl Field {
    /// Returns the conventional name of this field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lbx => "lbx",
            Self::Ubx => "ubx",
            Self::Lbu => "lbu",
            Self::Ubu => "ubu",
            Self::X => "x",
            Self::U => "u",
            Self::Yref => "yref",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lbx" => Ok(Self::Lbx),
            "ubx" => Ok(Self::Ubx),
            "lbu" => Ok(Self::Lbu),
            "ubu" => Ok(Self::Ubu),
            "x" => Ok(Self::X),
            "u" => Ok(Self::U),
            "yref" => Ok(Self::Yref),
            other => Err(UnknownField(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back_to_fields() {
        for field in [
            Field::Lbx,
            Field::Ubx,
            Field::Lbu,
            Field::Ubu,
            Field::X,
            Field::U,
            Field::Yref,
        ] {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "lbz".parse::<Field>().unwrap_err();
        assert_eq!(err, UnknownField("lbz".into()));
    }
}
