/// True when prompts are answered from a terminal rather than piped data.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// True when stdout can render ANSI colours.
pub fn stdout_is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
