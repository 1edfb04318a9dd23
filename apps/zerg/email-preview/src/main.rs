//! Email Preview
//!
//! Renders a transactional email template locally, the same way the API would,
//! and prints the result. Useful when editing templates.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_notifications::{LayoutConfig, Mailer, MailerConfig};
use eyre::Result;
use std::path::PathBuf;
use tracing::info;

mod preview;

use preview::{OutputFormat, load_context, write_email};

#[derive(Parser)]
#[command(name = "zerg-email-preview")]
#[command(about = "Render Zerg transactional emails without sending them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template and print it
    Render {
        /// Template name (see `list`)
        template: String,

        /// JSON file with the template context, `-` for stdin. Defaults to `{}`.
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Send on the priority stream
        #[arg(short, long)]
        priority: bool,

        /// Render the bare body without the layout
        #[arg(long)]
        no_layout: bool,

        /// Recipient address
        #[arg(long)]
        to: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,
    },

    /// List the registered templates
    List,
}

fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let mailer = Mailer::new(MailerConfig::from_env()?)?;

    match cli.command {
        Commands::Render {
            template,
            context,
            priority,
            no_layout,
            to,
            format,
        } => {
            let context = load_context(context.as_deref())?;
            let layout = if no_layout {
                LayoutConfig::none()
            } else {
                LayoutConfig::default()
            };

            let mut handle = if priority {
                mailer.priority_email(layout)
            } else {
                mailer.base_email(layout)
            };
            if let Some(to) = to {
                handle = handle.to(to);
            }

            let email = handle.render(&template, &context)?;
            info!(template = %template, stream = %email.stream, "Rendered email");

            write_email(&mut std::io::stdout().lock(), &email, format)?;
        }

        Commands::List => {
            println!("edition: {}", mailer.edition());
            for name in mailer.templates() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
