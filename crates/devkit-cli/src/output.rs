use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print `body` indented by two spaces, skipping blank lines.
pub fn print_indented(body: &str) {
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        println!("  {line}");
    }
}
