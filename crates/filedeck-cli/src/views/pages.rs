use std::io::{self, Write};

use colored::Colorize;
use filedeck_core::router::Location;

use crate::app::AppContext;

pub fn home(out: &mut dyn Write, ctx: &AppContext) -> io::Result<()> {
    let name = ctx
        .session
        .session()
        .map(|s| s.name.as_str())
        .unwrap_or_default();
    writeln!(out, "{}", format!("Welcome, {}", name).bright_magenta().bold())?;
    writeln!(out)?;
    writeln!(out, "  {}  list your files", "/files ".cyan())?;
    writeln!(out, "  {}  upload a file", "/upload".cyan())?;
    Ok(())
}

pub fn login(out: &mut dyn Write, location: &Location) -> io::Result<()> {
    writeln!(out, "{}", "Login".bright_magenta().bold())?;
    if let Some(ref from) = location.redirected_from {
        writeln!(
            out,
            "{}",
            format!("{} requires a session.", from).bright_yellow()
        )?;
    }
    writeln!(out, "{}", "Log in with: filedeck login <name>".bright_black())?;
    Ok(())
}

pub fn uploader(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "Upload a file".bright_magenta().bold())?;
    writeln!(
        out,
        "{}",
        "Run: filedeck files upload <path> [--no-content]".bright_black()
    )?;
    Ok(())
}

pub fn dynamic_page(out: &mut dyn Write, location: &Location) -> io::Result<()> {
    let title = location.param("title").unwrap_or_default();
    writeln!(out, "{}", title.bright_magenta().bold())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{context, rendered};

    #[test]
    fn test_login_mentions_redirect_source() {
        let mut ctx = context(Vec::new(), false);
        let location = ctx.navigate("/upload").unwrap();

        let text = rendered(|out| login(out, &location));
        assert!(text.contains("/upload requires a session."));
        assert!(text.contains("filedeck login <name>"));
    }

    #[test]
    fn test_home_greets_user() {
        let mut ctx = context(Vec::new(), false);
        ctx.session.login("alice").unwrap();

        let text = rendered(|out| home(out, &ctx));
        assert!(text.starts_with("Welcome, alice"));
    }

    #[test]
    fn test_dynamic_page_shows_decoded_title() {
        let mut ctx = context(Vec::new(), false);
        ctx.session.login("alice").unwrap();
        let location = ctx.navigate("/page/Hello%20World").unwrap();

        let text = rendered(|out| dynamic_page(out, &location));
        assert_eq!(text, "Hello World\n");
    }
}
