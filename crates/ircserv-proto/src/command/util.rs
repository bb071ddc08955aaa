use std::fmt::{self, Write};

/// Check if a string needs colon-prefixing as a trailing IRC argument.
pub fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(' ') || s.starts_with(':')
}

/// Reject arguments that would break out of the current line.
pub fn validate_param(param: &str) -> fmt::Result {
    if param
        .as_bytes()
        .iter()
        .any(|&b| b == b'\r' || b == b'\n' || b == 0)
    {
        return Err(fmt::Error);
    }
    Ok(())
}

/// Write a command whose last argument gets a colon only when it needs one.
pub fn write_cmd<S: AsRef<str>>(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[S]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, rest)) = args.split_last() else {
        return Ok(());
    };
    for arg in rest {
        validate_param(arg.as_ref())?;
        f.write_char(' ')?;
        f.write_str(arg.as_ref())?;
    }
    let last = last.as_ref();
    validate_param(last)?;
    f.write_char(' ')?;
    if needs_colon_prefix(last) {
        f.write_char(':')?;
    }
    f.write_str(last)
}

/// Write a command whose last argument is always free-form text.
pub fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    let Some((last, rest)) = args.split_last() else {
        return Ok(());
    };
    for arg in rest {
        validate_param(arg)?;
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    validate_param(last)?;
    f.write_str(" :")?;
    f.write_str(last)
}
