use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::profile::ProfileField;

/// A destination a customer can be sent to with a generated link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Whatsapp,
    Twitter,
    Instagram,
    Facebook,
    Email,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Whatsapp,
        Platform::Twitter,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Email,
    ];

    /// The single identifying field a link for this platform cannot do without.
    pub fn required_field(self) -> ProfileField {
        match self {
            Platform::Whatsapp => ProfileField::WhatsappNumber,
            Platform::Twitter => ProfileField::TwitterId,
            Platform::Instagram => ProfileField::InstagramUsername,
            Platform::Facebook => ProfileField::FacebookPageName,
            Platform::Email => ProfileField::Email,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Whatsapp => "WhatsApp",
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Email => "Email",
        }
    }

    /// Whether the link carries the draft message.
    pub fn carries_message(self) -> bool {
        matches!(self, Platform::Whatsapp | Platform::Twitter)
    }

    pub fn copied_notice(self) -> String {
        format!("{} link copied!", self.label())
    }

    pub fn key(self) -> &'static str {
        match self {
            Platform::Whatsapp => "whatsapp",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Email => "email",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform '{0}' (expected whatsapp, twitter, instagram, facebook or email)")]
pub struct ParsePlatformError(pub String);

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whatsapp" | "wa" => Ok(Platform::Whatsapp),
            "twitter" | "x" => Ok(Platform::Twitter),
            "instagram" | "ig" => Ok(Platform::Instagram),
            "facebook" | "fb" | "messenger" => Ok(Platform::Facebook),
            "email" | "mail" | "mailto" => Ok(Platform::Email),
            _ => Err(ParsePlatformError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields() {
        assert_eq!(Platform::Whatsapp.required_field(), ProfileField::WhatsappNumber);
        assert_eq!(Platform::Twitter.required_field(), ProfileField::TwitterId);
        assert_eq!(Platform::Instagram.required_field(), ProfileField::InstagramUsername);
        assert_eq!(Platform::Facebook.required_field(), ProfileField::FacebookPageName);
        assert_eq!(Platform::Email.required_field(), ProfileField::Email);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("X".parse(), Ok(Platform::Twitter));
        assert_eq!("messenger".parse(), Ok(Platform::Facebook));
        assert_eq!("mailto".parse(), Ok(Platform::Email));
        assert!("telegram".parse::<Platform>().is_err());
    }

    #[test]
    fn copied_notice_matches_label() {
        assert_eq!(Platform::Whatsapp.copied_notice(), "WhatsApp link copied!");
        assert_eq!(Platform::Email.copied_notice(), "Email link copied!");
    }
}
