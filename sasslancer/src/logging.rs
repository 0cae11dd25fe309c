use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, Registry};

pub type LevelHandle = reload::Handle<LevelFilter, Registry>;

/// Installs the global subscriber, writing to stderr so stdout stays free for
/// the parse output. The returned handle changes the level later on, e.g.
/// once the config file has been read.
pub fn tracing_init(level: impl Into<LevelFilter>) -> anyhow::Result<LevelHandle> {
    let (filter, handle) = reload::Layer::new(level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()?;

    Ok(handle)
}

pub fn set_level(handle: &LevelHandle, level: impl Into<LevelFilter>) -> anyhow::Result<()> {
    handle.modify(|filter| *filter = level.into())?;
    Ok(())
}
