/// Render a keyboard shortcut definition like `"mod+shift+s"` for display.
///
/// `mod` is the platform command key (⌘ on macOS, Ctrl elsewhere). On macOS
/// keys are joined without separators (`"⌘ShiftS"`), elsewhere with `+`
/// (`"Ctrl+Shift+S"`). Each modifier name is replaced once.
pub fn format_shortcut_display(shortcut: &str, is_mac: bool) -> String {
    if shortcut.is_empty() {
        return String::new();
    }

    let (command, control, alt) = if is_mac {
        ("⌘", "^", "⌥")
    } else {
        ("Ctrl", "Ctrl", "Alt")
    };

    let replaced = shortcut
        .replacen("mod", command, 1)
        .replacen("ctrl", control, 1)
        .replacen("alt", alt, 1)
        .replacen("shift", "Shift", 1);

    replaced
        .split('+')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(if is_mac { "" } else { "+" })
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
