//! Human-readable message dumps for diagnostics. The format is informal.

use std::io::{self, Write};

use super::{ControlMessage, Registry};

/// Write a message summary using the process-wide registry.
///
/// See [`print_message_with`].
pub fn print_message<M, W>(message: &M, out: &mut W, include_payload: bool) -> io::Result<()>
where
    M: ControlMessage + ?Sized,
    W: Write + ?Sized,
{
    print_message_with(Registry::global(), message, out, include_payload)
}

/// Write `message: type=<name> id=<id>`, naming the type through `registry`.
///
/// Unknown identifiers print as `(major:minor)`. With `include_payload` a
/// second `payload=` line shows the payload as the transport delivered it,
/// before any `mac` collapsing.
pub fn print_message_with<M, W>(
    registry: &Registry,
    message: &M,
    out: &mut W,
    include_payload: bool,
) -> io::Result<()>
where
    M: ControlMessage + ?Sized,
    W: Write + ?Sized,
{
    let header = message.header();
    match registry.reverse_lookup(header.type_id()) {
        Some(name) => writeln!(out, "message: type={name} id={}", header.id())?,
        None => writeln!(out, "message: type=({}) id={}", header.type_id(), header.id())?,
    }
    if include_payload {
        writeln!(out, "payload={}", message.payload())?;
    }
    Ok(())
}
