//! Usage and help text rendering
//!
//! Pure text generation: the caller decides where the output goes.

use crate::cli::spec::{OptionDescriptor, OptionKind};

/// Render the usage banner and option listing.
///
/// Produces one `usage:` line from the synopsis, then one line per option in
/// registration order showing the flag form, its help text and its default.
/// The output depends on nothing but the inputs, so repeated calls are
/// byte-identical.
pub fn render(program: &str, synopsis: &str, options: &[OptionDescriptor]) -> String {
    let mut text = if synopsis.is_empty() {
        format!("usage: {}\n", program)
    } else {
        format!("usage: {} {}\n", program, synopsis)
    };

    if options.is_empty() {
        return text;
    }
    text.push_str("\nOptions:\n");

    let cells: Vec<String> = options.iter().map(flag_cell).collect();
    let width = cells.iter().map(|cell| cell.len()).max().unwrap_or(0);

    for (descriptor, cell) in options.iter().zip(&cells) {
        text.push_str(&format!(
            "  {:<width$}  {} (default: {})\n",
            cell,
            descriptor.help,
            descriptor.default.display(),
            width = width,
        ));
    }
    text
}

/// The flag column for one option: `--name` or `--name <value>`
fn flag_cell(descriptor: &OptionDescriptor) -> String {
    match descriptor.kind() {
        OptionKind::Flag => format!("--{}", descriptor.name),
        _ => format!("--{} <value>", descriptor.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::spec::{ArgumentSpec, OptionValue};

    fn sample_options() -> ArgumentSpec {
        let mut spec = ArgumentSpec::new().unwrap();
        spec.register("port", OptionValue::Int(8080), "port to listen on")
            .unwrap();
        spec.register(
            "host",
            OptionValue::Str("localhost".to_string()),
            "host to listen on",
        )
        .unwrap();
        spec.register("json", OptionValue::Flag(false), "output the result as JSON")
            .unwrap();
        spec
    }

    #[test]
    fn test_render_is_pure() {
        let spec = sample_options();
        let first = render("httpd", "[options]", spec.options());
        let second = render("httpd", "[options]", spec.options());
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_shape() {
        let spec = sample_options();
        let text = render("httpd", "[options]", spec.options());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "usage: httpd [options]");
        assert_eq!(lines[2], "Options:");
        // Registration order, not alphabetical.
        assert!(lines[3].contains("--port <value>"));
        assert!(lines[3].contains("port to listen on (default: 8080)"));
        assert!(lines[4].contains("--host <value>"));
        assert!(lines[4].contains("(default: localhost)"));
        // Boolean flags render without a value placeholder.
        assert!(lines[5].contains("--json "));
        assert!(!lines[5].contains("--json <value>"));
        assert!(lines[5].contains("(default: false)"));
    }

    #[test]
    fn test_render_without_options() {
        let text = render("true", "", &[]);
        assert_eq!(text, "usage: true\n");
    }
}
