use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownTag;

/// Clause subject-matter taxonomy.
///
/// Serialized as the three-letter code (`"FIN"`), which is also what
/// [`FromStr`] accepts (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Technical requirements, deliverables, service levels
    #[serde(rename = "TEC")]
    Tec,
    /// Legal protections, liability, warranties
    #[serde(rename = "LEG")]
    Leg,
    /// Payments, fees, penalties
    #[serde(rename = "FIN")]
    Fin,
    /// Compliance and regulation
    #[serde(rename = "COM")]
    Com,
    /// Intellectual property
    #[serde(rename = "IPX")]
    Ipx,
    /// Termination and exit
    #[serde(rename = "TRM")]
    Trm,
    /// Dispute resolution
    #[serde(rename = "DIS")]
    Dis,
    /// Document control
    #[serde(rename = "DOC")]
    Doc,
    /// Execution and signing authority
    #[serde(rename = "EXE")]
    Exe,
    /// External dependencies
    #[serde(rename = "EXT")]
    Ext,
}

impl Tag {
    /// All tags in taxonomy order.
    pub const ALL: [Tag; 10] = [
        Tag::Tec,
        Tag::Leg,
        Tag::Fin,
        Tag::Com,
        Tag::Ipx,
        Tag::Trm,
        Tag::Dis,
        Tag::Doc,
        Tag::Exe,
        Tag::Ext,
    ];

    /// The three-letter taxonomy code.
    pub fn code(&self) -> &'static str {
        match self {
            Tag::Tec => "TEC",
            Tag::Leg => "LEG",
            Tag::Fin => "FIN",
            Tag::Com => "COM",
            Tag::Ipx => "IPX",
            Tag::Trm => "TRM",
            Tag::Dis => "DIS",
            Tag::Doc => "DOC",
            Tag::Exe => "EXE",
            Tag::Ext => "EXT",
        }
    }

    /// Human-readable category name.
    pub fn description(&self) -> &'static str {
        match self {
            Tag::Tec => "Technical & Deliverables",
            Tag::Leg => "Legal Protections",
            Tag::Fin => "Financial Terms",
            Tag::Com => "Compliance & Regulatory",
            Tag::Ipx => "Intellectual Property",
            Tag::Trm => "Termination",
            Tag::Dis => "Dispute Resolution",
            Tag::Doc => "Document Control",
            Tag::Exe => "Execution & Authority",
            Tag::Ext => "External Dependencies",
        }
    }

    /// Join tag codes with `", "`.
    pub fn join_codes(tags: &[Tag]) -> String {
        tags.iter().map(Tag::code).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownTag(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("fin".parse::<Tag>(), Ok(Tag::Fin));
        assert_eq!(" LEG ".parse::<Tag>(), Ok(Tag::Leg));
        assert_eq!(
            "XYZ".parse::<Tag>(),
            Err(UnknownTag("XYZ".to_string()))
        );
    }

    #[test]
    fn join_codes_keeps_order() {
        assert_eq!(Tag::join_codes(&[Tag::Leg, Tag::Fin]), "LEG, FIN");
        assert_eq!(Tag::join_codes(&[]), "");
    }
}
