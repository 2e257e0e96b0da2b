use crate::io::profile_store::{ProfileStore, StoreError};
use crate::model::config::EmailFormat;
use crate::model::platform::Platform;
use crate::model::profile::ProfileField;
use crate::ops::links::LinkBuilder;

/// Failure reported by a platform capability (clipboard, URL handler).
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("no {0} command available on this platform")]
    Unavailable(&'static str),
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
    #[error("{0}")]
    Rejected(String),
}

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CapabilityError>;
}

pub trait UrlOpener {
    /// Hand `url` to whatever handler the platform has for it. An error
    /// means nothing could dispatch it.
    fn open(&mut self, url: &str) -> Result<(), CapabilityError>;
}

/// Answer to a "missing parameter" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingChoice {
    /// Store this value for the missing field and carry on.
    Set(String),
    Cancel,
}

/// User feedback. Rendering is up to the implementor.
pub trait Notifier {
    fn notify(&mut self, message: &str);

    /// The platform's identifying field is empty. Ask whether to fill it in.
    fn missing_parameter(&mut self, platform: Platform) -> MissingChoice;
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("missing parameter: {} is required for {} links", .field.label(), .platform.label())]
    MissingParameter {
        platform: Platform,
        field: ProfileField,
    },
    #[error("link error: could not open {} link ({source}); please enter safe and appropriate characters", .platform.label())]
    LinkError {
        platform: Platform,
        source: CapabilityError,
    },
    #[error("could not copy {} link: {source}", .platform.label())]
    Clipboard {
        platform: Platform,
        source: CapabilityError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Options shared by copy and open.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShareOptions<'a> {
    /// Message to use instead of the stored draft.
    pub message: Option<&'a str>,
    pub email_format: EmailFormat,
}

/// Build the link for `platform`, asking the notifier to fill in the
/// identifying field if it is empty. Values the user supplies are stored.
pub fn resolve_link(
    store: &mut impl ProfileStore,
    notifier: &mut impl Notifier,
    platform: Platform,
    options: ShareOptions<'_>,
) -> Result<String, ShareError> {
    if let Some(link) = usable_link(&*store, platform, options) {
        return Ok(link);
    }

    let field = platform.required_field();
    tracing::info!(%platform, field = field.key(), "missing parameter");
    match notifier.missing_parameter(platform) {
        MissingChoice::Set(value) => {
            store.set(field, &value)?;
            usable_link(&*store, platform, options)
                .ok_or(ShareError::MissingParameter { platform, field })
        }
        MissingChoice::Cancel => Err(ShareError::MissingParameter { platform, field }),
    }
}

fn usable_link(
    store: &impl ProfileStore,
    platform: Platform,
    options: ShareOptions<'_>,
) -> Option<String> {
    let record = store.snapshot();
    let mut builder = LinkBuilder::new(&record).with_email_format(options.email_format);
    if let Some(message) = options.message {
        builder = builder.with_message(message);
    }
    builder.is_usable(platform).then(|| builder.link(platform))
}

/// Copy the platform's link to the clipboard and notify. Returns the link.
pub fn copy_link(
    store: &mut impl ProfileStore,
    clipboard: &mut impl Clipboard,
    notifier: &mut impl Notifier,
    platform: Platform,
    options: ShareOptions<'_>,
) -> Result<String, ShareError> {
    let link = resolve_link(store, notifier, platform, options)?;
    clipboard
        .set_text(&link)
        .map_err(|e| ShareError::Clipboard {
            platform,
            source: e,
        })?;
    tracing::debug!(%platform, "link copied");
    notifier.notify(&platform.copied_notice());
    Ok(link)
}

/// Open the platform's link with the system handler. Returns the link.
pub fn open_link(
    store: &mut impl ProfileStore,
    opener: &mut impl UrlOpener,
    notifier: &mut impl Notifier,
    platform: Platform,
    options: ShareOptions<'_>,
) -> Result<String, ShareError> {
    let link = resolve_link(store, notifier, platform, options)?;
    opener.open(&link).map_err(|e| ShareError::LinkError {
        platform,
        source: e,
    })?;
    tracing::debug!(%platform, "link opened");
    notifier.notify(&format!("Opening {} link", platform.label()));
    Ok(link)
}
