use serde::Serialize;

use crate::model::config::EmailFormat;
use crate::model::platform::Platform;
use crate::model::profile::ProfileRecord;
use crate::ops::encode::{encode_address, encode_component, encode_uri};

/// Dialing prefix substituted for a leading `0` in WhatsApp numbers.
/// A fixed business rule for Nigerian numbers, not general phone parsing.
pub const WHATSAPP_COUNTRY_CODE: &str = "234";

/// Replace a leading `0` with the country code. Anything else, including
/// surrounding whitespace or a `+`, is returned as-is.
pub fn normalize_whatsapp_number(number: &str) -> String {
    match number.strip_prefix('0') {
        Some(rest) => format!("{}{}", WHATSAPP_COUNTRY_CODE, rest),
        None => number.to_string(),
    }
}

/// Whether `value` can identify a recipient: non-empty once trimmed.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Every link for one profile snapshot and message. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedLinks {
    /// WhatsApp number in international-prefix form.
    pub whatsapp_number: String,
    pub whatsapp: String,
    pub twitter: String,
    pub instagram: String,
    pub facebook: String,
    pub email: String,
}

impl DerivedLinks {
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::Whatsapp => &self.whatsapp,
            Platform::Twitter => &self.twitter,
            Platform::Instagram => &self.instagram,
            Platform::Facebook => &self.facebook,
            Platform::Email => &self.email,
        }
    }
}

/// Builds contact links from a profile snapshot. Pure: no I/O, and the same
/// inputs always give the same URLs.
#[derive(Debug, Clone)]
pub struct LinkBuilder<'a> {
    profile: &'a ProfileRecord,
    message: &'a str,
    email_format: EmailFormat,
}

impl<'a> LinkBuilder<'a> {
    /// Builder using the profile's draft message.
    pub fn new(profile: &'a ProfileRecord) -> Self {
        LinkBuilder {
            profile,
            message: &profile.draft_message,
            email_format: EmailFormat::default(),
        }
    }

    pub fn with_message(mut self, message: &'a str) -> Self {
        self.message = message;
        self
    }

    pub fn with_email_format(mut self, format: EmailFormat) -> Self {
        self.email_format = format;
        self
    }

    pub fn message(&self) -> &str {
        self.message
    }

    pub fn whatsapp_number(&self) -> String {
        normalize_whatsapp_number(&self.profile.whatsapp_number)
    }

    pub fn whatsapp(&self) -> String {
        format!(
            "https://wa.me/{}?text={}",
            encode_component(&self.whatsapp_number()),
            encode_component(self.message)
        )
    }

    pub fn twitter(&self) -> String {
        format!(
            "https://twitter.com/messages/compose?recipient_id={}&text={}",
            encode_component(&self.profile.twitter_id),
            encode_component(self.message)
        )
    }

    /// Instagram's scheme has no prefilled-text parameter.
    pub fn instagram(&self) -> String {
        format!(
            "https://ig.me/m/{}",
            encode_component(&self.profile.instagram_username)
        )
    }

    pub fn facebook(&self) -> String {
        format!("http://m.me/{}", encode_component(&self.profile.facebook_page_name))
    }

    pub fn email(&self) -> String {
        match self.email_format {
            EmailFormat::Rfc6068 => self.email_rfc6068(),
            EmailFormat::Legacy => self.email_legacy(),
        }
    }

    fn email_rfc6068(&self) -> String {
        let p = self.profile;
        let headers: Vec<String> = [
            ("cc", encode_address(&p.cc)),
            ("bcc", encode_address(&p.bcc)),
            ("subject", encode_component(&p.subject)),
            ("body", encode_component(&p.email_body)),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

        let mut link = format!("mailto:{}", encode_address(&p.email));
        if !headers.is_empty() {
            link.push('?');
            link.push_str(&headers.join("&"));
        }
        link
    }

    fn email_legacy(&self) -> String {
        let p = self.profile;
        encode_uri(&format!(
            "mailto:{}?cc{}&bcc{}&subject{}&body{}",
            p.email, p.cc, p.bcc, p.subject, p.email_body
        ))
    }

    pub fn link(&self, platform: Platform) -> String {
        match platform {
            Platform::Whatsapp => self.whatsapp(),
            Platform::Twitter => self.twitter(),
            Platform::Instagram => self.instagram(),
            Platform::Facebook => self.facebook(),
            Platform::Email => self.email(),
        }
    }

    /// Whether the platform's identifying field is filled in. Gates both
    /// copying and opening.
    pub fn is_usable(&self, platform: Platform) -> bool {
        is_present(self.profile.get(platform.required_field()))
    }

    /// Platforms whose identifying field is still empty.
    pub fn missing(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| !self.is_usable(*p))
            .collect()
    }

    pub fn build(&self) -> DerivedLinks {
        let links = DerivedLinks {
            whatsapp_number: self.whatsapp_number(),
            whatsapp: self.whatsapp(),
            twitter: self.twitter(),
            instagram: self.instagram(),
            facebook: self.facebook(),
            email: self.email(),
        };
        tracing::debug!(message_len = self.message.len(), email_format = %self.email_format, "links built");
        links
    }
}
