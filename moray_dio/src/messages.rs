use strum_macros::Display;

/// Address of a command issuer on the server link. Completions carry
/// the id of the client that caused them, so the dispatch table can
/// hand each one to its single consumer.
pub type ClientId = u32;

/// Commands understood by the remote register server.
#[derive(Clone, Copy, PartialEq, Debug, Display)]
pub enum RegisterCommand
{
    StartMonitor,
    SetBits,
    ClearBits,
}

#[derive(Clone, Copy, PartialEq, Debug, Display)]
pub enum CompletionStatus
{
    Ok,
    Failed,
}

// Outbound half of an exchange. The mask selects the bits the command
// operates on; StartMonitor ignores it.
#[derive(Clone)]
pub struct CommandMessage
{
    pub client: ClientId,
    pub cmd: RegisterCommand,
    pub mask: u32,
}

/// The asynchronous reply to a previously issued command, or a
/// monitor push carrying a fresh register value. Delivered by value
/// to exactly one consumer and dropped there.
#[derive(Clone)]
pub struct CompletionMessage
{
    pub client: ClientId,
    pub cmd: RegisterCommand,
    pub status: CompletionStatus,
    pub value: u32,
}

/// Connect/disconnect notification from the transport.
#[derive(Clone, Copy)]
pub struct LinkEvent
{
    pub connected: bool,
}

/// Fan-out signal: asks the record runtime to re-scan everything
/// that depends on the named register owner.
#[derive(Clone)]
pub struct ScanRequest
{
    pub owner: String,
}

/// Connection event forwarded for the record runtime's own
/// bookkeeping, after the owner has acted on it.
#[derive(Clone)]
pub struct LinkState
{
    pub owner: String,
    pub connected: bool,
}
