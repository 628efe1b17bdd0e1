//! Check-config command - prints the resolved configuration.

use anyhow::Result;
use colored::Colorize;
use folio_core::{AppConfig, MailTransport};

/// Prints the configuration with secrets redacted.
pub fn cmd_check_config(config: &AppConfig) -> Result<()> {
    let config = config.redact_secrets();

    println!("{} Configuration is valid", "✓".green());
    println!();

    println!("{}", "Server".bold());
    println!("  Address:          {}:{}", config.server.host, config.server.port);
    println!("  Request timeout:  {:?}", config.server.request_timeout);
    println!("  Body limit:       {} bytes", config.server.body_limit);
    if config.server.cors_allowed_origins.is_empty() {
        println!("  CORS origins:     {}", "any".yellow());
    } else {
        println!(
            "  CORS origins:     {}",
            config.server.cors_allowed_origins.join(", ")
        );
    }

    println!("{}", "Database".bold());
    println!("  URL:              {}", config.database.url);
    println!("  Max connections:  {}", config.database.max_connections);
    println!("  Acquire timeout:  {:?}", config.database.acquire_timeout);

    println!("{}", "Mail".bold());
    println!("  Transport:        {}", config.mail.transport.name());
    match &config.mail.transport {
        MailTransport::Smtp(smtp) => {
            println!("  SMTP relay:       {}:{}", smtp.host, smtp.port);
            println!("  SMTP username:    {}", smtp.username);
        }
        MailTransport::SendGrid(sendgrid) => {
            println!("  API base URL:     {}", sendgrid.base_url);
            println!("  From address:     {}", sendgrid.from_address);
        }
        MailTransport::Log => {
            println!("  {}", "Messages are logged, not sent".yellow());
        }
    }
    println!("  From name:        {}", config.mail.from_name);
    println!("  Timeout:          {:?}", config.mail.timeout);

    println!("{}", "Forms".bold());
    println!("  Review key:       {}", config.forms.review_key);
    match &config.forms.contact_key {
        Some(key) => println!("  Contact key:      {}", key),
        None => println!("  Contact key:      {}", "none (open form)".yellow()),
    }
    match &config.forms.admin_email {
        Some(email) => println!("  Admin email:      {}", email),
        None => println!(
            "  Admin email:      {}",
            "not set; contact submissions will fail".red()
        ),
    }

    println!("{}", "Login".bold());
    match &config.auth {
        Some(auth) => {
            println!("  Username:         {}", auth.username);
            println!("  Token lifetime:   {:?}", auth.token_ttl);
        }
        None => println!("  {}", "disabled".yellow()),
    }

    Ok(())
}
