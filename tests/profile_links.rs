//! End-to-end tests through the public library API: a file-backed profile
//! feeding the link builder.

use pretty_assertions::assert_eq;
use sociomarketer::io::profile_store::{FileProfileStore, MemoryProfileStore, ProfileStore};
use sociomarketer::model::{EmailFormat, Platform, ProfileField};
use sociomarketer::ops::links::LinkBuilder;
use url::Url;

fn stores(dir: &std::path::Path) -> Vec<Box<dyn ProfileStore>> {
    vec![
        Box::new(MemoryProfileStore::new()),
        Box::new(FileProfileStore::open(dir.join("profile.toml")).unwrap()),
    ]
}

#[test]
fn every_field_defaults_to_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    for store in stores(tmp.path()) {
        for field in ProfileField::ALL {
            assert_eq!(store.get(field), "");
        }
    }
}

#[test]
fn set_get_round_trip_is_exact() {
    let tmp = tempfile::TempDir::new().unwrap();
    let samples = [
        "",
        " ",
        "08012345678",
        "quote \" and backslash \\",
        "multi\nline\r\nvalue",
        "'''\"\"\"",
        "emoji 🎉 and ẹ̀",
    ];
    for mut store in stores(tmp.path()) {
        for field in ProfileField::ALL {
            for sample in samples {
                store.set(field, sample).unwrap();
                assert_eq!(store.get(field), sample);
            }
        }
    }

    let reopened = FileProfileStore::open(tmp.path().join("profile.toml")).unwrap();
    for field in ProfileField::ALL {
        assert_eq!(reopened.get(field), samples[samples.len() - 1]);
    }
}

#[test]
fn twitter_end_to_end() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut store = FileProfileStore::open(tmp.path().join("profile.toml")).unwrap();
    store.set(ProfileField::TwitterId, "39238474").unwrap();
    store.set(ProfileField::DraftMessage, "Hi there!").unwrap();

    let record = store.snapshot();
    assert_eq!(
        LinkBuilder::new(&record).twitter(),
        "https://twitter.com/messages/compose?recipient_id=39238474&text=Hi%20there!"
    );
}

#[test]
fn whatsapp_number_normalization_through_store() {
    let mut store = MemoryProfileStore::new();
    store.set(ProfileField::WhatsappNumber, "08012345678").unwrap();
    let record = store.snapshot();
    let links = LinkBuilder::new(&record).build();
    assert_eq!(links.whatsapp_number, "2348012345678");
    // the store keeps the raw input
    assert_eq!(store.get(ProfileField::WhatsappNumber), "08012345678");

    store.set(ProfileField::WhatsappNumber, "2348012345678").unwrap();
    let record = store.snapshot();
    assert_eq!(LinkBuilder::new(&record).whatsapp_number(), "2348012345678");
}

#[test]
fn text_parameter_round_trips_reserved_characters() {
    let mut store = MemoryProfileStore::new();
    store.set(ProfileField::WhatsappNumber, "08012345678").unwrap();
    store.set(ProfileField::TwitterId, "39238474").unwrap();
    let message = "Q&A? #sale 100% = 🔥 + more/less";
    store.set(ProfileField::DraftMessage, message).unwrap();

    let record = store.snapshot();
    let links = LinkBuilder::new(&record).build();
    for link in [&links.whatsapp, &links.twitter] {
        let url = Url::parse(link).unwrap();
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some(message));
        assert_eq!(url.fragment(), None);
    }
}

#[test]
fn email_only_address_is_valid_mailto() {
    let mut store = MemoryProfileStore::new();
    store.set(ProfileField::Email, "a@b.com").unwrap();
    let record = store.snapshot();
    let link = LinkBuilder::new(&record).email();
    let url = Url::parse(&link).unwrap();
    assert_eq!(url.scheme(), "mailto");
    assert_eq!(url.path(), "a@b.com");
    assert_eq!(url.query_pairs().count(), 0);
}

#[test]
fn usability_follows_required_fields() {
    let mut store = MemoryProfileStore::new();
    let record = store.snapshot();
    let builder = LinkBuilder::new(&record);
    assert!(Platform::ALL.iter().all(|p| !builder.is_usable(*p)));

    store.set(ProfileField::Email, "a@b.com").unwrap();
    store.set(ProfileField::InstagramUsername, "   ").unwrap();
    let record = store.snapshot();
    let builder = LinkBuilder::new(&record).with_email_format(EmailFormat::Legacy);
    assert!(builder.is_usable(Platform::Email));
    assert!(!builder.is_usable(Platform::Instagram));
    assert_eq!(
        builder.missing(),
        vec![
            Platform::Whatsapp,
            Platform::Twitter,
            Platform::Instagram,
            Platform::Facebook
        ]
    );
}
