//! Positional placeholder substitution for fetcher templates

/// Replace every `{N}` in `template` with `args[N]` in a single pass.
///
/// Placeholders without a matching argument are left untouched, and text
/// coming from an argument is never substituted again.
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .and_then(|close| Some((close, after[..close].parse::<usize>().ok()?)))
            .and_then(|(close, index)| Some((close, *args.get(index)?)));
        match placeholder {
            Some((close, arg)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Split `template` on whitespace, then substitute placeholders per token.
///
/// Each substituted argument stays a single argv entry, whatever it contains.
pub fn command_argv(template: &str, args: &[&str]) -> Vec<String> {
    template
        .split_whitespace()
        .map(|token| substitute(token, args))
        .collect()
}
