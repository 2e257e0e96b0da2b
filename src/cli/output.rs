use serde::Serialize;

use crate::model::platform::Platform;
use crate::model::profile::{ProfileField, ProfileRecord};
use crate::ops::links::LinkBuilder;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct FieldJson<'a> {
    pub field: ProfileField,
    pub value: &'a str,
}

#[derive(Serialize)]
pub struct LinkJson {
    pub platform: Platform,
    pub url: String,
    pub usable: bool,
    pub required_field: ProfileField,
}

#[derive(Serialize)]
pub struct LinksJson {
    pub message: String,
    pub whatsapp_number: String,
    pub links: Vec<LinkJson>,
}

#[derive(Serialize)]
pub struct ShareJson {
    pub platform: Platform,
    pub url: String,
    pub action: &'static str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn link_to_json(builder: &LinkBuilder<'_>, platform: Platform) -> LinkJson {
    LinkJson {
        platform,
        url: builder.link(platform),
        usable: builder.is_usable(platform),
        required_field: platform.required_field(),
    }
}

pub fn links_to_json(builder: &LinkBuilder<'_>) -> LinksJson {
    LinksJson {
        message: builder.message().to_string(),
        whatsapp_number: builder.whatsapp_number(),
        links: Platform::ALL
            .into_iter()
            .map(|p| link_to_json(builder, p))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per field: padded label, then the value. Multi-line values are
/// shown with escaped newlines so each field stays on one line.
pub fn format_profile(record: &ProfileRecord) -> Vec<String> {
    let width = ProfileField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);
    record
        .iter()
        .map(|(field, value)| {
            let shown = if value.is_empty() {
                "-".to_string()
            } else {
                value.replace('\n', "\\n")
            };
            format!("{:<width$}  {}", field.label(), shown, width = width)
        })
        .collect()
}

/// One line per platform. Unusable links are flagged with `!` and name the
/// field that still has to be set.
pub fn format_links(builder: &LinkBuilder<'_>) -> Vec<String> {
    let width = Platform::ALL
        .iter()
        .map(|p| p.label().len())
        .max()
        .unwrap_or(0);
    Platform::ALL
        .into_iter()
        .map(|platform| {
            let marker = if builder.is_usable(platform) { ' ' } else { '!' };
            let mut line = format!(
                "{} {:<width$}  {}",
                marker,
                platform.label(),
                builder.link(platform),
                width = width
            );
            if !builder.is_usable(platform) {
                line.push_str(&format!(
                    "  (missing {})",
                    platform.required_field().key()
                ));
            }
            line
        })
        .collect()
}

pub fn missing_hint(platform: Platform) -> String {
    format!(
        "set it with: socio set {} <value>",
        platform.required_field().key()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn profile_lines_are_aligned() {
        let record = ProfileRecord {
            twitter_id: "39238474".into(),
            email_body: "Hello\nthere".into(),
            ..Default::default()
        };
        let lines = format_profile(&record);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "WhatsApp number         -");
        assert_eq!(lines[1], "Twitter ID              39238474");
        assert_eq!(lines[8], "Email body              Hello\\nthere");
    }

    #[test]
    fn links_flag_missing_fields() {
        let record = ProfileRecord {
            twitter_id: "39238474".into(),
            draft_message: "Hi there!".into(),
            ..Default::default()
        };
        let builder = LinkBuilder::new(&record);
        assert_snapshot!(format_links(&builder).join("\n"), @r"
        ! WhatsApp   https://wa.me/?text=Hi%20there!  (missing whatsappNumber)
          Twitter    https://twitter.com/messages/compose?recipient_id=39238474&text=Hi%20there!
        ! Instagram  https://ig.me/m/  (missing instagramUsername)
        ! Facebook   http://m.me/  (missing facebookPageName)
        ! Email      mailto:  (missing email)
        ");
    }

    #[test]
    fn links_json_shape() {
        let record = ProfileRecord {
            email: "a@b.com".into(),
            ..Default::default()
        };
        let builder = LinkBuilder::new(&record);
        let json = serde_json::to_value(links_to_json(&builder)).unwrap();
        assert_eq!(json["links"].as_array().unwrap().len(), 5);
        assert_eq!(json["links"][4]["platform"], "email");
        assert_eq!(json["links"][4]["url"], "mailto:a@b.com");
        assert_eq!(json["links"][4]["usable"], true);
        assert_eq!(json["links"][0]["required_field"], "whatsappNumber");
        assert_eq!(json["links"][0]["usable"], false);
    }

    #[test]
    fn hint_names_storage_key() {
        assert_eq!(
            missing_hint(Platform::Instagram),
            "set it with: socio set instagramUsername <value>"
        );
    }
}
