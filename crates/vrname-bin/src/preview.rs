use anyhow::Result;
use inquire::Confirm;
use similar::{ChangeTag, TextDiff};
use vrname_core::RenamePlan;

pub fn render_plan(plans: &[RenamePlan]) {
    println!("\n📁 Rename plan:");
    for plan in plans {
        if plan.original == plan.renamed {
            println!("  {} (unchanged)", plan.original);
        } else {
            println!("  {}", render_rename(&plan.original, &plan.renamed));
        }
    }
}

pub fn show_plan_and_confirm(plans: &[RenamePlan]) -> Result<bool> {
    render_plan(plans);

    let apply_plan = Confirm::new(&format!("Copy {} file(s)?", plans.len()))
        .with_default(true)
        .prompt()?;

    Ok(apply_plan)
}

// Character-level diff of the rename: inserted text green, removed text
// red, the rest untouched.
fn render_rename(original: &str, renamed: &str) -> String {
    let diff = TextDiff::from_chars(original, renamed);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let style = match change.tag() {
            ChangeTag::Delete => "\x1b[31m", // Red
            ChangeTag::Insert => "\x1b[32m", // Green
            ChangeTag::Equal => "\x1b[0m",   // Default
        };
        output.push_str(style);
        output.push_str(change.value());
    }
    output.push_str("\x1b[0m");

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_pattern_is_highlighted() {
        let rendered = render_rename("clip.mp4", "clip_LR.mp4");
        assert!(rendered.contains("\x1b[32m"));
        // Stripped of escape codes, the rendering spells out the new name.
        let plain: String = strip_ansi(&rendered);
        assert_eq!(plain, "clip_LR.mp4");
    }

    #[test]
    fn test_equal_names_render_without_highlights() {
        let rendered = render_rename("clip.mp4", "clip.mp4");
        assert!(!rendered.contains("\x1b[32m"));
        assert!(!rendered.contains("\x1b[31m"));
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
