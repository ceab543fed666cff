/// Faults detected while a reader, writer or owner is being set up.
/// A record that runs into one of these never becomes operational;
/// records sharing the same owner are not affected.
#[derive(Debug, PartialEq)]
pub enum ConfigError
{
    UnknownOwner(String),
    BitOutOfRange
    {
        bit: u32,
        width: u32,
    },
    DuplicateOwner(String),
    DuplicateClient(u32),
    BadWidth(u32),
    SettingsUnreadable(String),
    SettingsInvalid(String),
}

/// Caller errors on an operational writer.
#[derive(Debug, PartialEq)]
pub enum WriteError
{
    // A second write was requested while the completion for the first
    // one is still outstanding.
    CommandPending,
}
