use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed, named string fields held in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    WhatsappNumber,
    TwitterId,
    InstagramUsername,
    FacebookPageName,
    Email,
    Cc,
    Bcc,
    Subject,
    EmailBody,
    DraftMessage,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::WhatsappNumber,
        ProfileField::TwitterId,
        ProfileField::InstagramUsername,
        ProfileField::FacebookPageName,
        ProfileField::Email,
        ProfileField::Cc,
        ProfileField::Bcc,
        ProfileField::Subject,
        ProfileField::EmailBody,
        ProfileField::DraftMessage,
    ];

    /// Stable key used in the persisted store. Never change these.
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::WhatsappNumber => "whatsappNumber",
            ProfileField::TwitterId => "twitterId",
            ProfileField::InstagramUsername => "instagramUsername",
            ProfileField::FacebookPageName => "facebookPageName",
            ProfileField::Email => "email",
            ProfileField::Cc => "cc",
            ProfileField::Bcc => "bcc",
            ProfileField::Subject => "subject",
            ProfileField::EmailBody => "emailBody",
            ProfileField::DraftMessage => "draftMessage",
        }
    }

    /// snake_case key written by earlier releases. Still read, replaced on
    /// the next write of the field.
    pub fn legacy_key(self) -> Option<&'static str> {
        match self {
            ProfileField::WhatsappNumber => Some("whatsapp_number"),
            ProfileField::TwitterId => Some("twitter_id"),
            ProfileField::InstagramUsername => Some("instagram_username"),
            ProfileField::FacebookPageName => Some("facebook_page_name"),
            ProfileField::EmailBody => Some("email_body"),
            ProfileField::DraftMessage => Some("draft_message"),
            ProfileField::Email
            | ProfileField::Cc
            | ProfileField::Bcc
            | ProfileField::Subject => None,
        }
    }

    /// Human-readable label, as shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::WhatsappNumber => "WhatsApp number",
            ProfileField::TwitterId => "Twitter ID",
            ProfileField::InstagramUsername => "Instagram username",
            ProfileField::FacebookPageName => "Facebook Page username",
            ProfileField::Email => "Email address",
            ProfileField::Cc => "CC",
            ProfileField::Bcc => "BCC",
            ProfileField::Subject => "Subject",
            ProfileField::EmailBody => "Email body",
            ProfileField::DraftMessage => "Starter message",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile field '{0}' (expected one of: {keys})", keys = field_keys())]
pub struct ParseFieldError(pub String);

fn field_keys() -> String {
    ProfileField::ALL
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for ProfileField {
    type Err = ParseFieldError;

    /// Accepts the storage key, the camelCase name, or a short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match normalized.as_str() {
            "whatsappnumber" | "whatsapp" | "wa" => ProfileField::WhatsappNumber,
            "twitterid" | "twitter" | "x" => ProfileField::TwitterId,
            "instagramusername" | "instagram" | "ig" => ProfileField::InstagramUsername,
            "facebookpagename" | "facebook" | "fb" => ProfileField::FacebookPageName,
            "email" => ProfileField::Email,
            "cc" => ProfileField::Cc,
            "bcc" => ProfileField::Bcc,
            "subject" => ProfileField::Subject,
            "emailbody" | "body" => ProfileField::EmailBody,
            "draftmessage" | "message" | "draft" => ProfileField::DraftMessage,
            _ => return Err(ParseFieldError(s.to_string())),
        };
        Ok(field)
    }
}

/// Snapshot of every profile field. Values are stored verbatim; a field that
/// was never set reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(alias = "whatsapp_number")]
    pub whatsapp_number: String,
    #[serde(alias = "twitter_id")]
    pub twitter_id: String,
    #[serde(alias = "instagram_username")]
    pub instagram_username: String,
    #[serde(alias = "facebook_page_name")]
    pub facebook_page_name: String,
    pub email: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    #[serde(alias = "email_body")]
    pub email_body: String,
    #[serde(alias = "draft_message")]
    pub draft_message: String,
}

impl ProfileRecord {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::WhatsappNumber => &self.whatsapp_number,
            ProfileField::TwitterId => &self.twitter_id,
            ProfileField::InstagramUsername => &self.instagram_username,
            ProfileField::FacebookPageName => &self.facebook_page_name,
            ProfileField::Email => &self.email,
            ProfileField::Cc => &self.cc,
            ProfileField::Bcc => &self.bcc,
            ProfileField::Subject => &self.subject,
            ProfileField::EmailBody => &self.email_body,
            ProfileField::DraftMessage => &self.draft_message,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::WhatsappNumber => &mut self.whatsapp_number,
            ProfileField::TwitterId => &mut self.twitter_id,
            ProfileField::InstagramUsername => &mut self.instagram_username,
            ProfileField::FacebookPageName => &mut self.facebook_page_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Cc => &mut self.cc,
            ProfileField::Bcc => &mut self.bcc,
            ProfileField::Subject => &mut self.subject,
            ProfileField::EmailBody => &mut self.email_body,
            ProfileField::DraftMessage => &mut self.draft_message,
        };
        *slot = value.into();
    }

    /// Iterate fields in display order with their current values.
    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        ProfileField::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_defaults_to_empty() {
        let record = ProfileRecord::default();
        for field in ProfileField::ALL {
            assert_eq!(record.get(field), "", "{field}");
        }
    }

    #[test]
    fn set_then_get_is_verbatim() {
        let mut record = ProfileRecord::default();
        for field in ProfileField::ALL {
            let value = format!("  0{}  & é ", field.key());
            record.set(field, value.clone());
            assert_eq!(record.get(field), value);
        }
    }

    #[test]
    fn fields_are_independent() {
        let mut record = ProfileRecord::default();
        record.set(ProfileField::Cc, "copy@example.com");
        assert_eq!(record.get(ProfileField::Cc), "copy@example.com");
        assert_eq!(record.get(ProfileField::Bcc), "");
        assert_eq!(record.get(ProfileField::Email), "");
    }

    #[test]
    fn parse_accepts_keys_camel_case_and_aliases() {
        for field in ProfileField::ALL {
            assert_eq!(field.key().parse::<ProfileField>(), Ok(field));
        }
        assert_eq!("whatsappNumber".parse(), Ok(ProfileField::WhatsappNumber));
        assert_eq!("twitterId".parse(), Ok(ProfileField::TwitterId));
        assert_eq!("emailBody".parse(), Ok(ProfileField::EmailBody));
        assert_eq!("x".parse(), Ok(ProfileField::TwitterId));
        assert_eq!("IG".parse(), Ok(ProfileField::InstagramUsername));
        assert_eq!("facebook-page-name".parse(), Ok(ProfileField::FacebookPageName));
        assert_eq!("message".parse(), Ok(ProfileField::DraftMessage));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "telegram".parse::<ProfileField>().unwrap_err();
        assert_eq!(err, ParseFieldError("telegram".into()));
        assert!(err.to_string().contains("whatsappNumber"));
    }

    #[test]
    fn serde_uses_storage_keys() {
        let record: ProfileRecord = toml::from_str("twitterId = \"39238474\"\n").unwrap();
        assert_eq!(record.twitter_id, "39238474");
        assert_eq!(record.email, "");

        let written = toml::to_string(&record).unwrap();
        for field in ProfileField::ALL {
            assert!(written.contains(&format!("{} = ", field.key())), "{written}");
        }
        assert_eq!(
            serde_json::to_value(ProfileField::DraftMessage).unwrap(),
            serde_json::json!("draftMessage")
        );
    }

    #[test]
    fn snake_case_keys_still_load() {
        let record: ProfileRecord =
            toml::from_str("whatsapp_number = \"0801\"\ndraft_message = \"Hi\"\n").unwrap();
        assert_eq!(record.whatsapp_number, "0801");
        assert_eq!(record.draft_message, "Hi");
        for field in ProfileField::ALL {
            if let Some(old) = field.legacy_key() {
                assert_eq!(old.parse::<ProfileField>(), Ok(field));
                assert_ne!(old, field.key());
            }
        }
    }
}
