use clap::ValueEnum;
use domain_notifications::Email;
use eyre::{Result, WrapErr};
use serde_json::Value;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Subject header line followed by the HTML body
    Html,
    /// The whole email as pretty JSON
    Json,
}

/// Read a context from `path` (`-` is stdin). No path means an empty context.
pub fn load_context(path: Option<&Path>) -> Result<Value> {
    let raw = match path {
        None => return Ok(Value::Object(Default::default())),
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("Failed to read context from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read context file {}", path.display()))?,
    };

    parse_context(&raw)
}

fn parse_context(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).wrap_err("Context is not valid JSON")?;
    if !value.is_object() {
        eyre::bail!("Context must be a JSON object");
    }
    Ok(value)
}

pub fn write_email(out: &mut impl Write, email: &Email, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Html => {
            writeln!(out, "Subject: {}", email.subject)?;
            if let Some(stream) = email.message_stream() {
                writeln!(out, "MessageStream: {}", stream)?;
            }
            writeln!(out)?;
            writeln!(out, "{}", email.html_body)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, email)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_notifications::{LayoutConfig, Mailer, MailerConfig};
    use serde_json::json;

    fn rendered() -> Email {
        Mailer::new(MailerConfig::default())
            .unwrap()
            .priority_email(LayoutConfig::none())
            .render("activation", &json!({"code": "123456"}))
            .unwrap()
    }

    #[test]
    fn test_missing_context_is_empty_object() {
        assert_eq!(load_context(None).unwrap(), json!({}));
    }

    #[test]
    fn test_parse_context_rejects_non_objects() {
        assert!(parse_context("[1, 2]").is_err());
        assert!(parse_context("{not json").is_err());
        assert_eq!(parse_context(r#"{"code": "1"}"#).unwrap(), json!({"code": "1"}));
    }

    #[test]
    fn test_write_html() {
        let mut out = Vec::new();
        write_email(&mut out, &rendered(), OutputFormat::Html).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Subject: 123456 is your Zerg email verification code\n"));
        assert!(text.contains("MessageStream: priority\n"));
        assert!(text.contains("<b>123456</b>"));
    }

    #[test]
    fn test_write_json() {
        let mut out = Vec::new();
        write_email(&mut out, &rendered(), OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["stream"], "priority");
        assert_eq!(value["params"]["MessageStream"], "priority");
    }
}
